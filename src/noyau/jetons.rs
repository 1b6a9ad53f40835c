// src/noyau/jetons.rs
//
// Normalisation + tokenisation.
// Chaque étape est une réécriture complète de la chaîne (motifs regex),
// dans un ordre fixe : les étapes suivantes supposent les précédentes faites.
//
// 1. minuscules, espaces repliés, séparateur interne entre chaque caractère
// 2. fusion des chiffres consécutifs (point fixe)
// 3. fusion chiffres . chiffres (ou virgule) en un décimal
// 4. ** => ^
// 5. π / pi => décimales de π
// 6. i / j => j
// 7. repli des signes : -+ +- => -, ++ -- => +
// 8. e x p / e ^ => exp ; l o g / l n => ln
// 9. découpe sur le séparateur, jetons vides ignorés

use std::borrow::Cow;
use std::f64::consts::PI;
use std::fmt;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// Séparateur interne (jamais produit par l’utilisateur : retiré de l’entrée).
const SEP: char = '\u{1F}';

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Suite de chiffres, éventuellement décimale ("12", "3.5").
    Num(String),
    J,
    E,
    Exp,
    Ln,

    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    LPar,
    RPar,

    Espace,

    /// Tout ce que la grammaire ne connaît pas (l’erreur vient à l’analyse).
    Inconnu(String),
}

impl Tok {
    /// Marqueur de fin d’expression : + - * / ^ espace ) (la fin de suite se teste à part).
    pub fn termine_expression(&self) -> bool {
        matches!(
            self,
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Espace | Tok::RPar
        )
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(s) | Tok::Inconnu(s) => f.write_str(s),
            Tok::J => f.write_str("j"),
            Tok::E => f.write_str("e"),
            Tok::Exp => f.write_str("exp"),
            Tok::Ln => f.write_str("ln"),
            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::Caret => f.write_str("^"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Espace => f.write_str(" "),
        }
    }
}

/* ------------------------ Motifs (compilés une fois) ------------------------ */

struct Motifs {
    espaces: Regex,
    chiffres: Regex,
    decimal: Regex,
    double_etoile: Regex,
    pi: Regex,
    imaginaire: Regex,
    signe_moins: Regex,
    signe_plus: Regex,
    exp: Regex,
    ln: Regex,
}

fn motif(gabarit: &str) -> Regex {
    // `_` dans le gabarit = séparateur interne
    let source = gabarit.replace('_', r"\x1F");
    Regex::new(&source).expect("motif de normalisation")
}

fn motifs() -> &'static Motifs {
    static MOTIFS: OnceLock<Motifs> = OnceLock::new();
    MOTIFS.get_or_init(|| Motifs {
        espaces: motif(r"[ \t\r\n]+"),
        chiffres: motif(r"([0-9])_([0-9])"),
        decimal: motif(r"([0-9]+)_[.,]_([0-9]+)"),
        double_etoile: motif(r"\*_\*"),
        pi: motif(r"π|p_i"),
        imaginaire: motif(r"[ij]"),
        signe_moins: motif(r"-_\+|\+_-"),
        signe_plus: motif(r"\+_\+|-_-"),
        exp: motif(r"e_x_p|e_\^"),
        ln: motif(r"l_o_g|l_n"),
    })
}

/// Décimales de π telles qu’injectées à la place de π / pi.
pub fn pi_texte() -> String {
    format!("{PI}")
}

/// Remplace jusqu’à ce que plus rien ne change.
fn jusqu_au_point_fixe(mut s: String, re: &Regex, par: &str) -> String {
    while let Cow::Owned(suivant) = re.replace_all(&s, par) {
        s = suivant;
    }
    s
}

fn separer_caracteres(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for (k, c) in s.chars().enumerate() {
        if k > 0 {
            out.push(SEP);
        }
        out.push(c);
    }
    out
}

/// Pipeline de normalisation : texte brut -> suite de jetons textuels.
pub fn normaliser(brut: &str) -> Vec<String> {
    let m = motifs();

    // 1) minuscules + espaces + séparateurs
    let s = brut.to_lowercase().replace(SEP, "");
    let s = m.espaces.replace_all(&s, " ");
    let s = separer_caracteres(&s);

    // 2) chiffres consécutifs
    let s = jusqu_au_point_fixe(s, &m.chiffres, "${1}${2}");

    // 3) décimaux (la virgule devient un point)
    let s = m.decimal.replace_all(&s, "${1}.${2}");

    // 4) ** => ^
    let s = m.double_etoile.replace_all(&s, "^");

    // 5) π
    let s = m.pi.replace_all(&s, NoExpand(&pi_texte()));

    // 6) unité imaginaire
    let s = m.imaginaire.replace_all(&s, "j");

    // 7) repli des signes
    let mut s = s.into_owned();
    loop {
        let apres = m.signe_moins.replace_all(&s, "-");
        let apres = m.signe_plus.replace_all(&apres, "+").into_owned();
        if apres == s {
            break;
        }
        s = apres;
    }

    // 8) fonctions nommées
    let s = m.exp.replace_all(&s, "exp");
    let s = m.ln.replace_all(&s, "ln");

    // 9) découpe
    s.split(SEP)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn est_nombre(t: &str) -> bool {
    t.starts_with(|c: char| c.is_ascii_digit())
        && t.chars().all(|c| c.is_ascii_digit() || c == '.')
        && t.parse::<f64>().is_ok()
}

fn classer(t: &str) -> Tok {
    match t {
        "+" => Tok::Plus,
        "-" => Tok::Minus,
        "*" => Tok::Star,
        "/" => Tok::Slash,
        "^" => Tok::Caret,
        "(" => Tok::LPar,
        ")" => Tok::RPar,
        " " => Tok::Espace,
        "j" => Tok::J,
        "e" => Tok::E,
        "exp" => Tok::Exp,
        "ln" => Tok::Ln,
        _ if est_nombre(t) => Tok::Num(t.to_string()),
        _ => Tok::Inconnu(t.to_string()),
    }
}

/// Tokenize une chaîne : normalisation complète puis classement des jetons.
pub fn tokenize(s: &str) -> Vec<Tok> {
    normaliser(s).iter().map(|t| classer(t)).collect()
}

/// Format utilitaire (démarche) : liste de jetons en texte, espaces visibles.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Espace => "␣".to_string(),
            autre => autre.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
