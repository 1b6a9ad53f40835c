//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seules les erreurs arithmétiques sont admises
//! - soupe de caractères : jamais de panique, erreur ou valeur

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::eval::{eval_expression, evaluer};
use super::format::{format_joli, Reglages};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    // Liste blanche : sur une expression bien formée, seule l’arithmétique peut échouer
    // (division par zéro, 0^x, ln(0), débordements).
    matches!(
        e,
        ErreurCalcul::Division { .. } | ErreurCalcul::NombreInvalide { .. }
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        3 => format!("{}e-{}", 1 + rng.pick(9), rng.pick(3)),
        4 => format!("{},5", rng.pick(20)),
        _ => format!("{}", 10 + rng.pick(990)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 | 1 => gen_nombre(rng),
        2 => format!("{}j", gen_nombre(rng)),
        3 => "j".to_string(),
        4 => "pi".to_string(),
        5 => "e".to_string(),
        _ => "i".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        // exposant petit pour rester fini
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => format!("exp({})", gen_atom(rng)),
        7 => format!("ln({})", gen_expr(rng, depth - 1)),
        _ => {
            if rng.coin() {
                format!("-({})", gen_expr(rng, depth - 1))
            } else {
                format!("{} {}", gen_atom(rng), gen_atom(rng))
            }
        }
    }
}

fn gen_soupe(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '9', '.', ',', '+', '-', '*', '/', '^', '(', ')', 'j', 'i', 'e', 'x', 'p',
        'l', 'n', 'o', 'g', 'π', ' ',
    ];
    let n = rng.pick(16) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_erreurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let reglages = Reglages::default();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match eval_expression(&expr, &reglages) {
            Ok((v, d)) => {
                // deuxième passage identique, bit à bit
                let (v2, d2) = eval_expression(&expr, &reglages).unwrap();
                assert_eq!(v, v2, "expr={expr:?}");
                assert_eq!(d.joli, d2.joli);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_relecture_du_rendu() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let Ok(v) = evaluer(expr.as_str()) else {
            continue;
        };
        if v.abs() >= 100.0 {
            continue;
        }

        // la forme jolie se relit et redonne le même texte
        let s1 = format_joli(v);
        let relu = evaluer(s1.as_str()).unwrap_or_else(|e| panic!("expr={expr:?} s1={s1:?} err={e}"));
        assert_eq!(format_joli(relu), s1, "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_soupe_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0x50_u64);

    for _ in 0..500 {
        budget(t0, max);
        let s = gen_soupe(&mut rng);
        // Ok ou Err : les deux sont acceptables, pas la panique
        let _ = evaluer(s.as_str());
    }
}
