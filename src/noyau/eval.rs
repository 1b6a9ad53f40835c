//! Noyau: évaluation (pipeline réel)
//!
//! texte -> normalisation -> jetons -> descente récursive -> Complexe -> formes d’affichage
//!
//! Deux entrées :
//! - `evaluer` : la valeur seule (réel, complexe ou texte)
//! - `eval_expression` : la valeur + la démarche affichée par l’UI

use tracing::debug;

use super::analyse::analyser;
use super::complexe::{Complexe, Operande};
use super::erreur::ErreurCalcul;
use super::format::{
    format_fixe, format_joli, format_nombre, format_polaire, format_precision, formater, Reglages,
};
use super::jetons::{format_tokens, tokenize};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub resultat: String,
    pub joli: String,
    pub polaire: String,
    pub fixe: String,
    pub precision: String,
    pub module: String,
    pub argument: String,
    pub note: String,
}

/// Évaluateur : accepte un complexe, un réel ou un texte.
pub fn evaluer(entree: impl Into<Operande>) -> Result<Complexe, ErreurCalcul> {
    entree.into().resoudre()
}

/// Évalue un texte (sans démarche).
pub fn evaluer_texte(texte: &str) -> Result<Complexe, ErreurCalcul> {
    let jetons = tokenize(texte);
    debug!(jetons = %format_tokens(&jetons), "normalisation");
    analyser(jetons)
}

/// API publique : évalue une expression et retourne:
/// - la valeur
/// - la démarche (jetons, toutes les formes, module / argument)
pub fn eval_expression(
    expr_str: &str,
    reglages: &Reglages,
) -> Result<(Complexe, DemarcheNoyau), ErreurCalcul> {
    // 1) Jetons
    let jetons = tokenize(expr_str);
    let jetons_txt = format_tokens(&jetons);
    debug!(jetons = %jetons_txt, "normalisation");

    // 2) Analyse
    let valeur = analyser(jetons)?;

    // 3) Formes
    let d = DemarcheNoyau {
        jetons: jetons_txt,
        resultat: formater(valeur, reglages),
        joli: format_joli(valeur),
        polaire: format_polaire(valeur),
        fixe: format_fixe(valeur, reglages.chiffres),
        precision: format_precision(valeur, reglages.chiffres),
        module: format_nombre(valeur.abs()),
        argument: format_nombre(valeur.angle()),
        note: "Pipeline: normalisation → jetons → (parenthèses → addition → multiplication → puissance → atome) → formes.".into(),
    };

    Ok((valeur, d))
}
