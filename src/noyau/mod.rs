//! Noyau complexe
//!
//! Organisation interne :
//! - complexe.rs : type Complexe + opérations variadiques (add, sub, mul, div, exp, log, pow)
//! - erreur.rs   : erreurs typées du calcul
//! - jetons.rs   : normalisation par motifs + tokenisation
//! - analyse.rs  : descente récursive (parenthèses → addition → multiplication → puissance → atome)
//! - format.rs   : formes d’affichage (joli, polaire, fixe, précision)
//! - eval.rs     : pipeline complet + démarche

pub mod analyse;
pub mod complexe;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use complexe::Complexe;
pub use erreur::ErreurCalcul;
pub use eval::{eval_expression, evaluer, evaluer_texte, DemarcheNoyau};
pub use format::{formater, Forme, Reglages, CHIFFRES_DEFAUT, PRECISION_MAX};
