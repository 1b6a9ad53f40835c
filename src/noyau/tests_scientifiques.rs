//! Tests scientifiques (campagne) : invariants algébriques + aller-retour d’affichage.
//!
//! But : vérifier les propriétés sur beaucoup de valeurs sans faire chauffer la machine.
//! - RNG déterministe (seed fixe)
//! - budget temps global
//! - composantes bornées (|x| ≤ 1000) : la forme jolie (12 décimales) reste alors
//!   sous les 15 chiffres significatifs et se relit à l’identique.
//! - plus quelques magnitudes extrêmes (1e-9 .. 1e200), comparées en relatif.

use std::time::{Duration, Instant};

use super::complexe::{add, div, exp, log, mul, pow, Complexe};
use super::eval::{eval_expression, evaluer};
use super::format::{format_joli, format_polaire, format_precision, Reglages};

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Générateurs ------------------------ */

fn gen_composante(rng: &mut Rng) -> f64 {
    match rng.pick(5) {
        0 => 0.0,
        // centièmes
        1 | 2 => (rng.pick(200_001) as f64 - 100_000.0) / 100.0,
        // fractions binaires (exactes en décimal)
        3 => (rng.pick(2_048_001) as f64 - 1_024_000.0) / 1024.0,
        // quelconque
        _ => (rng.pick(1_000_001) as f64 - 500_000.0) / 777.0,
    }
}

fn gen_complexe(rng: &mut Rng) -> Complexe {
    Complexe::new(gen_composante(rng), gen_composante(rng)).unwrap()
}

fn gen_non_nul(rng: &mut Rng) -> Complexe {
    loop {
        let c = gen_complexe(rng);
        if c.abs() > 1e-3 {
            return c;
        }
    }
}

/* ------------------------ Comparaisons ------------------------ */

fn proche_rel(a: Complexe, b: Complexe, tol: f64) -> bool {
    let echelle = 1.0_f64.max(b.abs());
    (a.real - b.real).abs() <= tol * echelle && (a.imag - b.imag).abs() <= tol * echelle
}

fn assert_proche(a: Complexe, b: Complexe, tol: f64, ctx: &str) {
    assert!(
        proche_rel(a, b, tol),
        "{ctx}: ({}, {}) vs ({}, {})",
        a.real,
        a.imag,
        b.real,
        b.imag
    );
}

/* ------------------------ Scénarios littéraux ------------------------ */

#[test]
fn sci_scenarios_litteraux() {
    let r = Reglages::default();
    let ev = |s: &str| {
        eval_expression(s, &r)
            .unwrap_or_else(|e| panic!("expr={s:?} err={e}"))
            .0
    };
    let z = |a: f64, b: f64| Complexe::new(a, b).unwrap();

    assert_eq!(ev("3+4j"), z(3.0, 4.0));
    assert_eq!(ev("3+4j").abs(), 5.0);
    assert_eq!(ev("2*(3+j)"), z(6.0, 2.0));
    assert_proche(ev("j^2"), z(-1.0, 0.0), 1e-12, "j^2");
    assert_eq!(ev("2j"), z(0.0, 2.0));
    assert_eq!(ev("-3-4j"), z(-3.0, -4.0));
    assert_eq!(ev("1e+3"), z(1000.0, 0.0));

    assert!(eval_expression("(", &r).is_err());
    assert!(div(&[1.into(), 0.into()]).is_err());
}

/* ------------------------ Aller-retour d’affichage ------------------------ */

#[test]
fn sci_aller_retour_joli() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..400 {
        budget(t0, max);
        let c = gen_complexe(&mut rng);
        let s = format_joli(c);
        let relu = evaluer(s.as_str()).unwrap_or_else(|e| panic!("relecture {s:?}: {e}"));
        assert_proche(relu, c, 1e-12, &s);
    }
}

#[test]
fn sci_aller_retour_magnitudes_extremes() {
    let valeurs = [
        (1e15, 0.0),
        (-1.5e15, 2.0),
        (123456789012345.67, -1e15),
        (1e-9, 0.0),
        (0.0, -2.5e-9),
        (3.0, 1e-9),
        (1e200, 0.0),
        (-1e200, 7e199),
        (0.0, 1.7e308),
    ];

    for (reel, imag) in valeurs {
        let c = Complexe::new(reel, imag).unwrap();
        // échelle : la plus grande composante (|c| déborderait vers 1e308)
        let echelle = reel.abs().max(imag.abs());

        let s = format_joli(c);
        let relu = evaluer(s.as_str()).unwrap_or_else(|e| panic!("relecture {s:?}: {e}"));
        assert!(
            (relu.real - reel).abs() <= 1e-12 * echelle
                && (relu.imag - imag).abs() <= 1e-12 * echelle,
            "{s}: ({}, {}) vs ({reel}, {imag})",
            relu.real,
            relu.imag
        );
        assert_eq!(format_joli(relu), s, "point fixe");

        let q = format_precision(c, 17);
        let relu = evaluer(q.as_str()).unwrap_or_else(|e| panic!("relecture {q:?}: {e}"));
        assert!(
            (relu.real - reel).abs() <= 1e-12 * echelle
                && (relu.imag - imag).abs() <= 1e-12 * echelle,
            "{q}"
        );
    }
}

#[test]
fn sci_point_fixe_du_rendu() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0xF1C5_u64);

    for _ in 0..400 {
        budget(t0, max);
        let s1 = format_joli(gen_complexe(&mut rng));
        let s2 = format_joli(evaluer(s1.as_str()).unwrap());
        assert_eq!(s1, s2);
    }

    // valeur non représentable exactement
    let s1 = format_joli(Complexe::new(1.0 / 3.0, -2.0 / 3.0).unwrap());
    assert_eq!(format_joli(evaluer(s1.as_str()).unwrap()), s1);
}

#[test]
fn sci_aller_retour_polaire_et_precision() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0xA1E5_u64);

    for _ in 0..200 {
        budget(t0, max);
        let c = gen_complexe(&mut rng);

        let p = format_polaire(c);
        let relu = evaluer(p.as_str()).unwrap_or_else(|e| panic!("relecture {p:?}: {e}"));
        assert_proche(relu, c, 1e-9, &p);

        let q = format_precision(c, 17);
        let relu = evaluer(q.as_str()).unwrap_or_else(|e| panic!("relecture {q:?}: {e}"));
        assert_proche(relu, c, 1e-12, &q);
    }
}

/* ------------------------ Invariants algébriques ------------------------ */

#[test]
fn sci_commutativite_associativite() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);
        let a = gen_complexe(&mut rng);
        let b = gen_complexe(&mut rng);
        let c = gen_complexe(&mut rng);

        let ab = add(&[a.into(), b.into()]).unwrap();
        let ba = add(&[b.into(), a.into()]).unwrap();
        assert_proche(ab, ba, 1e-12, "a+b");

        let g = add(&[ab.into(), c.into()]).unwrap();
        let d = add(&[a.into(), add(&[b.into(), c.into()]).unwrap().into()]).unwrap();
        assert_proche(g, d, 1e-12, "(a+b)+c");

        let ab = mul(&[a.into(), b.into()]).unwrap();
        let ba = mul(&[b.into(), a.into()]).unwrap();
        assert_proche(ab, ba, 1e-12, "a*b");

        let g = mul(&[ab.into(), c.into()]).unwrap();
        let d = mul(&[a.into(), mul(&[b.into(), c.into()]).unwrap().into()]).unwrap();
        assert_proche(g, d, 1e-9, "(a*b)*c");
    }
}

#[test]
fn sci_division_inverse_de_multiplication() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0xD1_u64);

    for _ in 0..300 {
        budget(t0, max);
        let a = gen_complexe(&mut rng);
        let b = gen_non_nul(&mut rng);
        let ab = mul(&[a.into(), b.into()]).unwrap();
        let q = div(&[ab.into(), b.into()]).unwrap();
        assert_proche(q, a, 1e-9, "(a*b)/b");
    }
}

#[test]
fn sci_puissance_et_exponentielle() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0xE7_u64);

    for _ in 0..300 {
        budget(t0, max);
        let a = gen_non_nul(&mut rng);

        let carre = pow(a, 2).unwrap();
        let aa = mul(&[a.into(), a.into()]).unwrap();
        assert_proche(carre, aa, 1e-9, "a^2");

        let retour = exp(&[log(&[a.into()]).unwrap().into()]).unwrap();
        assert_proche(retour, a, 1e-9, "exp(log(a))");
    }
}

#[test]
fn sci_branche_principale() {
    use std::f64::consts::PI;

    let mut rng = Rng::new(0xB4_u64);
    for _ in 0..300 {
        let a = gen_complexe(&mut rng);
        let t = a.angle();
        assert!(t > -PI && t <= PI, "angle hors (-π, π] : {t}");
        assert_eq!(log(&[a.into()]).map(|l| l.imag).unwrap_or(t), t);
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // chaîne + / - alternée : 1 - 1 + 1 - 1 ... sur 300 termes
    let mut expr = String::from("1");
    for k in 1..300 {
        expr.push_str(if k % 2 == 0 { "+1" } else { "-1" });
        budget(t0, max);
    }

    let v = evaluer(expr.as_str()).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, Complexe::new(0.0, 0.0).unwrap());
}

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut expr = "1+j".to_string();
    for _ in 0..60 {
        expr = format!("({expr})");
        budget(t0, max);
    }

    let v = evaluer(expr.as_str()).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, Complexe::new(1.0, 1.0).unwrap());
}
