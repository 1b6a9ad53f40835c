// src/noyau/analyse.rs
//
// Descente récursive sur la suite de jetons normalisés.
//
// Niveaux (du plus externe au plus interne) :
//   contenu_parentheses -> addition -> multiplication -> exponentiation -> atome
//
// Les jetons sont lus strictement de gauche à droite à travers un `Flux`
// (curseur sur un tableau immuable). Là où un résultat intermédiaire doit
// « reprendre » la grammaire, on le passe en accumulateur (fonctions `suite_*`)
// au lieu de le réinjecter sous forme de texte.
//
// Fin d’expression : + - * / ^ espace ) ou fin de suite.

use tracing::trace;

use super::complexe::Complexe;
use super::erreur::ErreurCalcul;
use super::jetons::{format_tokens, Tok};

/// Curseur sur la suite de jetons.
#[derive(Debug)]
pub struct Flux {
    jetons: Vec<Tok>,
    pos: usize,
}

impl Flux {
    pub fn new(jetons: Vec<Tok>) -> Self {
        Self { jetons, pos: 0 }
    }

    pub fn peek(&self) -> Option<&Tok> {
        self.voir(0)
    }

    fn voir(&self, k: usize) -> Option<&Tok> {
        self.jetons.get(self.pos + k)
    }

    pub fn pop(&mut self) -> Option<Tok> {
        let t = self.jetons.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    pub fn est_epuise(&self) -> bool {
        self.pos >= self.jetons.len()
    }

    fn avancer(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.jetons.len());
    }

    fn sauter_espaces(&mut self) {
        while self.peek() == Some(&Tok::Espace) {
            self.pos += 1;
        }
    }

    fn sauter_espaces_et_plus(&mut self) {
        while matches!(self.peek(), Some(Tok::Espace | Tok::Plus)) {
            self.pos += 1;
        }
    }

    /// Vrai si le prochain jeton termine l’expression courante.
    fn suit_fin(&self) -> bool {
        self.peek().map_or(true, Tok::termine_expression)
    }

    /// Reste non consommé (messages d’erreur).
    pub fn reste(&self) -> String {
        format_tokens(&self.jetons[self.pos..])
    }
}

/// Point d’entrée : la suite entière est traitée comme un groupe implicite.
pub fn analyser(mut jetons: Vec<Tok>) -> Result<Complexe, ErreurCalcul> {
    jetons.push(Tok::RPar);
    let mut flux = Flux::new(jetons);

    let v = contenu_parentheses(&mut flux)?;

    if !flux.est_epuise() {
        return Err(ErreurCalcul::Analyse(format!(
            "parenthèse fermante en trop (reste : {})",
            flux.reste()
        )));
    }

    trace!(resultat = %v, "analyse terminée");
    Ok(v)
}

/* ------------------------ Parenthèses ------------------------ */

fn contenu_parentheses(flux: &mut Flux) -> Result<Complexe, ErreurCalcul> {
    flux.sauter_espaces_et_plus();

    // () vaut 1
    match flux.peek() {
        None => return Ok(Complexe::UN),
        Some(Tok::RPar) => {
            flux.pop();
            return Ok(Complexe::UN);
        }
        _ => {}
    }

    // "-x..." se lit "0 - x..."
    let v = if flux.peek() == Some(&Tok::Minus) {
        suite_addition(flux, Complexe::ZERO)?
    } else {
        addition(flux)?
    };

    flux.sauter_espaces();
    match flux.pop() {
        Some(Tok::RPar) => Ok(v),
        Some(t) => Err(ErreurCalcul::Analyse(format!(
            "')' attendue, trouvé {:?} (reste : {})",
            t.to_string(),
            flux.reste()
        ))),
        None => Err(ErreurCalcul::Analyse("parenthèse fermante manquante".into())),
    }
}

/* ------------------------ Addition / soustraction ------------------------ */

fn addition(flux: &mut Flux) -> Result<Complexe, ErreurCalcul> {
    flux.sauter_espaces();

    match flux.peek() {
        // plus unaire : ignoré
        Some(Tok::Plus) => {
            flux.pop();
            addition(flux)
        }
        // moins unaire : 0 - terme, puis la chaîne continue
        Some(Tok::Minus) => suite_addition(flux, Complexe::ZERO),
        _ => {
            let gauche = multiplication(flux)?;
            suite_addition(flux, gauche)
        }
    }
}

/// `gauche` déjà calculé ; traite les + / - qui suivent.
///
/// `+` recurse à droite ; `-` prend un seul terme multiplicatif puis reprend
/// avec la différence, ce qui garde `a - b + c` et `a - b - c` de gauche à droite.
fn suite_addition(flux: &mut Flux, gauche: Complexe) -> Result<Complexe, ErreurCalcul> {
    flux.sauter_espaces();

    match flux.peek() {
        Some(Tok::Plus) => {
            flux.pop();
            let droite = addition(flux)?;
            gauche.plus(droite)
        }
        Some(Tok::Minus) => {
            flux.pop();
            let droite = multiplication(flux)?;
            let difference = gauche.moins(droite)?;
            suite_addition(flux, difference)
        }
        _ => Ok(gauche),
    }
}

/* ------------------------ Multiplication / division ------------------------ */

fn multiplication(flux: &mut Flux) -> Result<Complexe, ErreurCalcul> {
    let gauche = exponentiation(flux)?;
    suite_multiplication(flux, gauche)
}

fn suite_multiplication(flux: &mut Flux, gauche: Complexe) -> Result<Complexe, ErreurCalcul> {
    flux.sauter_espaces();

    match flux.peek() {
        Some(Tok::Star) => {
            flux.pop();
            let droite = multiplication(flux)?;
            gauche.fois(droite)
        }
        Some(Tok::Slash) => {
            flux.pop();
            let diviseur = exponentiation(flux)?;
            let quotient = gauche.divise_par(diviseur)?;

            // le quotient multiplie tout le terme qui suit : a/b*c = (a/b)*c,
            // et a/b/c aussi (comportement historique, voir DESIGN.md)
            flux.sauter_espaces();
            match flux.peek() {
                Some(Tok::Star | Tok::Slash) => {
                    flux.pop();
                    let suite = multiplication(flux)?;
                    quotient.fois(suite)
                }
                _ if flux.suit_fin() => Ok(quotient),
                _ => {
                    let suite = multiplication(flux)?;
                    quotient.fois(suite)
                }
            }
        }
        _ if flux.suit_fin() => Ok(gauche),
        _ => {
            // juxtaposition : "2 3", "exp(1) 2"
            let facteur = atome(flux)?;
            let produit = gauche.fois(facteur)?;

            // le produit reprend la grammaire comme un groupe "(produit)"
            let groupe = juxtaposition(flux, produit)?;
            let groupe = suite_exponentiation(flux, groupe)?;
            suite_multiplication(flux, groupe)
        }
    }
}

/* ------------------------ Exponentiation ------------------------ */

fn exponentiation(flux: &mut Flux) -> Result<Complexe, ErreurCalcul> {
    let base = atome(flux)?;
    suite_exponentiation(flux, base)
}

/// Associative à droite : a^b^c = a^(b^c).
fn suite_exponentiation(flux: &mut Flux, base: Complexe) -> Result<Complexe, ErreurCalcul> {
    flux.sauter_espaces();

    if flux.peek() == Some(&Tok::Caret) {
        flux.pop();
        let exposant = exponentiation(flux)?;
        return base.puissance(exposant);
    }
    Ok(base)
}

/* ------------------------ Atomes ------------------------ */

fn atome(flux: &mut Flux) -> Result<Complexe, ErreurCalcul> {
    flux.sauter_espaces();

    // rien après une juxtaposition : neutre
    let Some(jeton) = flux.pop() else {
        return Ok(Complexe::UN);
    };

    match jeton {
        Tok::Num(texte) => {
            let v = nombre(flux, &texte)?;
            juxtaposition(flux, v)
        }
        Tok::Exp => atome(flux)?.exp(),
        Tok::Ln => atome(flux)?.ln(),
        Tok::E => juxtaposition(flux, Complexe::EULER),
        Tok::J => juxtaposition(flux, Complexe::J),
        Tok::LPar => {
            let v = contenu_parentheses(flux)?;
            juxtaposition(flux, v)
        }
        Tok::Minus => {
            let v = -atome(flux)?;
            juxtaposition(flux, v)
        }
        autre => Err(ErreurCalcul::ExpressionInvalide {
            jeton: autre.to_string(),
            reste: flux.reste(),
        }),
    }
}

/// Multiplie `v` par l’atome collé derrière, s’il y en a un.
fn juxtaposition(flux: &mut Flux, v: Complexe) -> Result<Complexe, ErreurCalcul> {
    if flux.suit_fin() {
        return Ok(v);
    }
    let suivant = atome(flux)?;
    v.fois(suivant)
}

/// Littéral numérique, avec suffixe scientifique éventuel `e+NN` / `e-NN`.
fn nombre(flux: &mut Flux, texte: &str) -> Result<Complexe, ErreurCalcul> {
    let scientifique = match (flux.voir(0), flux.voir(1), flux.voir(2)) {
        (Some(Tok::E), Some(signe @ (Tok::Plus | Tok::Minus)), Some(Tok::Num(exposant)))
            if exposant.chars().all(|c| c.is_ascii_digit()) =>
        {
            Some(format!("{texte}e{signe}{exposant}"))
        }
        _ => None,
    };

    let litteral = match scientifique {
        Some(s) => {
            flux.avancer(3);
            s
        }
        None => texte.to_string(),
    };

    let x = litteral
        .parse::<f64>()
        .map_err(|_| ErreurCalcul::ExpressionInvalide {
            jeton: litteral.clone(),
            reste: flux.reste(),
        })?;
    Complexe::new(x, 0.0)
}
