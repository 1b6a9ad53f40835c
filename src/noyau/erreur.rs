// src/noyau/erreur.rs
//
// Erreurs du noyau. Aucune n’est rattrapée en interne : elles remontent
// telles quelles jusqu’à l’appelant (UI ou console).

use thiserror::Error;

use super::complexe::Complexe;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurCalcul {
    /// Une composante n’est pas finie (NaN ou ±inf) à la construction.
    #[error("nombre invalide : ({reel}, {imag})")]
    NombreInvalide { reel: f64, imag: f64 },

    /// Le quotient n’est pas fini (dénominateur nul ou sous-dépassement).
    #[error("division impossible : ({numerateur}) / ({denominateur})")]
    Division {
        numerateur: Complexe,
        denominateur: Complexe,
    },

    /// Jeton que la grammaire ne sait pas traiter.
    #[error("expression invalide : jeton {jeton:?} inattendu (reste : {reste:?})")]
    ExpressionInvalide { jeton: String, reste: String },

    /// Parenthèses déséquilibrées ou jetons en trop.
    #[error("analyse impossible : {0}")]
    Analyse(String),
}
