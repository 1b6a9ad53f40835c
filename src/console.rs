// src/console.rs
//
// Mode console : un bloc de texte lu sur l’entrée, évalué, écrit sur la sortie.
// Pas de découpe en lignes, pas de reprise : la première erreur remonte à main().

use std::io::{self, Read, Write};

use thiserror::Error;
use tracing::debug;

use crate::noyau::{evaluer_texte, formater, ErreurCalcul, Reglages};

#[derive(Error, Debug)]
pub enum ErreurConsole {
    #[error("entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Calcul(#[from] ErreurCalcul),
}

/// Lit tout `entree`, évalue, écrit le résultat (forme des réglages) suivi d’un saut de ligne.
pub fn executer<R: Read, W: Write>(
    mut entree: R,
    mut sortie: W,
    reglages: &Reglages,
) -> Result<(), ErreurConsole> {
    let mut texte = String::new();
    entree.read_to_string(&mut texte)?;
    debug!(octets = texte.len(), "entrée lue");

    let valeur = evaluer_texte(&texte)?;
    writeln!(sortie, "{}", formater(valeur, reglages))?;
    sortie.flush()?;
    Ok(())
}
