// src/noyau/format.rs
//
// Formes d’affichage d’un complexe. Toutes :
// - omettent la partie réelle ou imaginaire nulle ("4j", "3", "0"),
// - mettent entre les deux parties le signe de la partie imaginaire ("3-4j"),
// - produisent un texte que l’évaluateur relit.

use std::f64::consts::PI;
use std::str::FromStr;

use super::complexe::Complexe;

/// Décimales de la forme « jolie » avant élagage des zéros.
const DECIMALES_JOLI: usize = 12;

/// Chiffres significatifs exploitables d’un f64.
pub const PRECISION_MAX: usize = 17;

/// Chiffres par défaut (formes fixe / précision).
pub const CHIFFRES_DEFAUT: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Forme {
    #[default]
    Joli,
    Polaire,
    Fixe,
    Precision,
}

impl Forme {
    pub const TOUTES: [Forme; 4] = [Forme::Joli, Forme::Polaire, Forme::Fixe, Forme::Precision];

    pub fn libelle(self) -> &'static str {
        match self {
            Forme::Joli => "joli",
            Forme::Polaire => "polaire",
            Forme::Fixe => "fixe",
            Forme::Precision => "précision",
        }
    }
}

impl FromStr for Forme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "joli" => Ok(Forme::Joli),
            "polaire" => Ok(Forme::Polaire),
            "fixe" => Ok(Forme::Fixe),
            "precision" | "précision" => Ok(Forme::Precision),
            autre => Err(format!(
                "forme inconnue « {autre} » (joli, polaire, fixe, precision)"
            )),
        }
    }
}

/// Réglages d’affichage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub forme: Forme,
    pub chiffres: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            forme: Forme::Joli,
            chiffres: CHIFFRES_DEFAUT,
        }
    }
}

/// Forme choisie par les réglages.
pub fn formater(c: Complexe, reglages: &Reglages) -> String {
    match reglages.forme {
        Forme::Joli => format_joli(c),
        Forme::Polaire => format_polaire(c),
        Forme::Fixe => format_fixe(c, reglages.chiffres),
        Forme::Precision => format_precision(c, reglages.chiffres),
    }
}

/* ------------------------ Assemblage ------------------------ */

/// `reel` : texte signé ou None ; `imag` : (négatif ?, texte de la valeur absolue) ou None.
fn assembler(reel: Option<String>, imag: Option<(bool, String)>) -> String {
    match (reel, imag) {
        (None, None) => "0".to_string(),
        (Some(r), None) => r,
        (None, Some((neg, m))) => {
            if neg {
                format!("-{m}j")
            } else {
                format!("{m}j")
            }
        }
        (Some(r), Some((neg, m))) => {
            let signe = if neg { '-' } else { '+' };
            format!("{r}{signe}{m}j")
        }
    }
}

/// Formate chaque partie non nulle avec `f`.
fn par_parties(c: Complexe, f: impl Fn(f64) -> String) -> String {
    let reel = (c.real != 0.0).then(|| f(c.real));
    let imag = (c.imag != 0.0).then(|| (c.imag < 0.0, f(c.imag.abs())));
    assembler(reel, imag)
}

/* ------------------------ Joli ------------------------ */

/// Élague les zéros de fin (et le point s’il ne reste rien derrière).
fn elaguer(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Réel en notation fixe élaguée ; None si l’affichage vaut zéro.
fn joli_non_nul(x: f64) -> Option<String> {
    let s = elaguer(format!("{:.*}", DECIMALES_JOLI, x));
    match s.as_str() {
        "0" | "-0" => None,
        _ => Some(s),
    }
}

/// Nombre réel seul en forme jolie ("0" si nul).
pub fn format_nombre(x: f64) -> String {
    joli_non_nul(x).unwrap_or_else(|| "0".to_string())
}

/// Forme par défaut : notation fixe, zéros de fin élagués.
///
/// Une partie qui s’affiche nulle (même arrondie) est omise : j^2 donne "-1".
pub fn format_joli(c: Complexe) -> String {
    let reel = joli_non_nul(c.real);
    let imag = joli_non_nul(c.imag.abs()).map(|m| (c.imag < 0.0, m));
    assembler(reel, imag)
}

/* ------------------------ Polaire ------------------------ */

/// r·e^(θ/π jπ), écrit "{r}e^({t}jπ)" ; un réel garde la forme jolie.
pub fn format_polaire(c: Complexe) -> String {
    if joli_non_nul(c.imag).is_none() {
        return format_joli(c);
    }
    let r = format_nombre(c.abs());
    let t = format_nombre(c.angle() / PI);
    format!("{r}e^({t}jπ)")
}

/* ------------------------ Fixe ------------------------ */

/// `n` décimales, sans élagage.
pub fn format_fixe(c: Complexe, n: usize) -> String {
    par_parties(c, |x| format!("{x:.n$}"))
}

/* ------------------------ Précision ------------------------ */

/// Écriture scientifique relisible : exposant toujours signé ("1.5e+7", "2e-9").
fn scientifique(x: f64, decimales: usize) -> String {
    let s = format!("{x:.decimales$e}");
    match s.split_once('e') {
        Some((mantisse, exposant)) if !exposant.starts_with('-') => {
            format!("{mantisse}e+{exposant}")
        }
        _ => s,
    }
}

/// L’exposant est lu après arrondi à `n` chiffres : 9.9999 sur 3 chiffres est 10.0.
fn precision_reel(x: f64, n: usize) -> String {
    let arrondi = format!("{:.*e}", n - 1, x);
    let exposant = arrondi
        .split_once('e')
        .and_then(|(_, e)| e.parse::<i64>().ok())
        .unwrap_or(0);
    let n = n as i64;

    if exposant < -6 || exposant >= n {
        scientifique(x, (n - 1) as usize)
    } else {
        let decimales = (n - 1 - exposant).max(0) as usize;
        format!("{x:.decimales$}")
    }
}

/// `n` chiffres significatifs (1..=17).
pub fn format_precision(c: Complexe, n: usize) -> String {
    let n = n.clamp(1, PRECISION_MAX);
    par_parties(c, |x| precision_reel(x, n))
}
