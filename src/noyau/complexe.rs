// src/noyau/complexe.rs
//
// Valeur complexe en double précision.
// - Construction vérifiée : composantes finies (sinon NombreInvalide).
// - Opérations variadiques libres (add/sub/mul/div/exp/log) + pow.
// - Méthodes de valeur minces qui délèguent aux fonctions libres.

use std::f64::consts::E;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use super::erreur::ErreurCalcul;
use super::eval::evaluer_texte;
use super::format::format_joli;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complexe {
    pub real: f64,
    pub imag: f64,
}

/// Ce que les opérations acceptent : réel, complexe, ou texte à évaluer.
#[derive(Clone, Debug, PartialEq)]
pub enum Operande {
    Reel(f64),
    Complexe(Complexe),
    Texte(String),
}

impl Operande {
    /// Ramène l’opérande à une valeur complexe (le texte passe par l’évaluateur).
    pub fn resoudre(&self) -> Result<Complexe, ErreurCalcul> {
        match self {
            Operande::Reel(x) => Complexe::new(*x, 0.0),
            Operande::Complexe(c) => Ok(*c),
            Operande::Texte(s) => evaluer_texte(s),
        }
    }
}

impl From<f64> for Operande {
    fn from(x: f64) -> Self {
        Operande::Reel(x)
    }
}

impl From<i32> for Operande {
    fn from(x: i32) -> Self {
        Operande::Reel(f64::from(x))
    }
}

impl From<Complexe> for Operande {
    fn from(c: Complexe) -> Self {
        Operande::Complexe(c)
    }
}

impl From<&str> for Operande {
    fn from(s: &str) -> Self {
        Operande::Texte(s.to_string())
    }
}

impl From<String> for Operande {
    fn from(s: String) -> Self {
        Operande::Texte(s)
    }
}

impl Complexe {
    pub const ZERO: Complexe = Complexe::brut(0.0, 0.0);
    pub const UN: Complexe = Complexe::brut(1.0, 0.0);
    pub const J: Complexe = Complexe::brut(0.0, 1.0);
    pub const EULER: Complexe = Complexe::brut(E, 0.0);

    const fn brut(real: f64, imag: f64) -> Complexe {
        Complexe { real, imag }
    }

    pub fn new(real: f64, imag: f64) -> Result<Complexe, ErreurCalcul> {
        if !real.is_finite() || !imag.is_finite() {
            return Err(ErreurCalcul::NombreInvalide { reel: real, imag });
        }
        Ok(Complexe { real, imag })
    }

    /// Construction à deux termes : `premier` puis un terme imaginaire (ou complexe).
    ///
    /// - réel `b`               => imag += b
    /// - complexe imaginaire pur => imag += c.imag
    /// - autre complexe          => real -= c.real ; imag += c.imag
    pub fn avec_terme(
        premier: impl Into<Operande>,
        second: impl Into<Operande>,
    ) -> Result<Complexe, ErreurCalcul> {
        let base = premier.into().resoudre()?;
        let (mut real, mut imag) = (base.real, base.imag);

        match second.into() {
            Operande::Reel(b) => imag += b,
            autre => {
                let t = autre.resoudre()?;
                if t.real != 0.0 {
                    real -= t.real;
                }
                imag += t.imag;
            }
        }

        Complexe::new(real, imag)
    }

    /// Norme euclidienne.
    pub fn abs(self) -> f64 {
        (self.real * self.real + self.imag * self.imag).sqrt()
    }

    /// Argument dans (-π, π].
    pub fn angle(self) -> f64 {
        let m = self.abs();
        let n = if m == 0.0 { 1.0 } else { m };
        // -0.0 donnerait -π sur l’axe réel négatif
        let y = if self.imag == 0.0 { 0.0 } else { self.imag / n };
        y.atan2(self.real / n)
    }

    pub fn plus(self, autre: impl Into<Operande>) -> Result<Complexe, ErreurCalcul> {
        add(&[self.into(), autre.into()])
    }

    pub fn moins(self, autre: impl Into<Operande>) -> Result<Complexe, ErreurCalcul> {
        sub(&[self.into(), autre.into()])
    }

    pub fn fois(self, autre: impl Into<Operande>) -> Result<Complexe, ErreurCalcul> {
        mul(&[self.into(), autre.into()])
    }

    pub fn divise_par(self, autre: impl Into<Operande>) -> Result<Complexe, ErreurCalcul> {
        div(&[self.into(), autre.into()])
    }

    pub fn puissance(self, exposant: impl Into<Operande>) -> Result<Complexe, ErreurCalcul> {
        pow(self, exposant)
    }

    pub fn exp(self) -> Result<Complexe, ErreurCalcul> {
        exp(&[self.into()])
    }

    pub fn ln(self) -> Result<Complexe, ErreurCalcul> {
        log(&[self.into()])
    }
}

impl Neg for Complexe {
    type Output = Complexe;

    fn neg(self) -> Complexe {
        Complexe::brut(-self.real, -self.imag)
    }
}

impl fmt::Display for Complexe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_joli(*self))
    }
}

impl FromStr for Complexe {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        evaluer_texte(s)
    }
}

/* ------------------------ Règles binaires ------------------------ */

fn somme(a: Complexe, b: Complexe) -> Result<Complexe, ErreurCalcul> {
    Complexe::new(a.real + b.real, a.imag + b.imag)
}

fn difference(a: Complexe, b: Complexe) -> Result<Complexe, ErreurCalcul> {
    Complexe::new(a.real - b.real, a.imag - b.imag)
}

fn produit(a: Complexe, b: Complexe) -> Result<Complexe, ErreurCalcul> {
    Complexe::new(
        a.real * b.real - a.imag * b.imag,
        a.real * b.imag + a.imag * b.real,
    )
}

fn quotient(a: Complexe, b: Complexe) -> Result<Complexe, ErreurCalcul> {
    let d = b.real * b.real + b.imag * b.imag;
    let real = (a.real * b.real + a.imag * b.imag) / d;
    let imag = (a.imag * b.real - a.real * b.imag) / d;

    if !real.is_finite() || !imag.is_finite() {
        return Err(ErreurCalcul::Division {
            numerateur: a,
            denominateur: b,
        });
    }
    Complexe::new(real, imag)
}

/// Applique la règle binaire de gauche à droite. Liste vide => `neutre`.
fn replier(
    termes: &[Operande],
    neutre: Complexe,
    regle: fn(Complexe, Complexe) -> Result<Complexe, ErreurCalcul>,
) -> Result<Complexe, ErreurCalcul> {
    let Some((premier, reste)) = termes.split_first() else {
        return Ok(neutre);
    };

    let mut acc = premier.resoudre()?;
    for t in reste {
        acc = regle(acc, t.resoudre()?)?;
    }
    Ok(acc)
}

/* ------------------------ Opérations publiques ------------------------ */

pub fn add(termes: &[Operande]) -> Result<Complexe, ErreurCalcul> {
    replier(termes, Complexe::ZERO, somme)
}

pub fn sub(termes: &[Operande]) -> Result<Complexe, ErreurCalcul> {
    replier(termes, Complexe::ZERO, difference)
}

pub fn mul(termes: &[Operande]) -> Result<Complexe, ErreurCalcul> {
    replier(termes, Complexe::UN, produit)
}

/// Échoue (Division) dès qu’une étape donne un quotient non fini.
pub fn div(termes: &[Operande]) -> Result<Complexe, ErreurCalcul> {
    replier(termes, Complexe::UN, quotient)
}

/// e^c où c est le produit de tous les termes.
pub fn exp(termes: &[Operande]) -> Result<Complexe, ErreurCalcul> {
    let c = mul(termes)?;
    let m = c.real.exp();
    Complexe::new(m * c.imag.cos(), m * c.imag.sin())
}

/// ln(c), branche principale, où c est le produit de tous les termes.
pub fn log(termes: &[Operande]) -> Result<Complexe, ErreurCalcul> {
    let c = mul(termes)?;
    Complexe::new(c.abs().ln(), c.angle())
}

/// base^exposant = exp(exposant * ln(base)).
pub fn pow(
    base: impl Into<Operande>,
    exposant: impl Into<Operande>,
) -> Result<Complexe, ErreurCalcul> {
    let l = log(&[base.into()])?;
    exp(&[exposant.into(), l.into()])
}
