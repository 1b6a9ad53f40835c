//! Calculatrice complexe : noyau d’évaluation (texte -> Complexe) et mode console.
//!
//! ```
//! use calculatrice_complexe::noyau::{evaluer, Complexe};
//!
//! let z = evaluer("3+4j").unwrap();
//! assert_eq!(z, Complexe::new(3.0, 4.0).unwrap());
//! assert_eq!(z.abs(), 5.0);
//! assert_eq!(z.to_string(), "3+4j");
//! ```

pub mod noyau;

#[cfg(not(target_arch = "wasm32"))]
pub mod console;
