//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultats, erreur, réglages, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Chiffres bornés (formes fixe / précision).

use calculatrice_complexe::noyau::eval::DemarcheNoyau;
use calculatrice_complexe::noyau::{Forme, Reglages, CHIFFRES_DEFAUT};

/// Garde-fou : au-delà, les formes fixe/précision n’apportent rien sur un f64.
pub const CHIFFRES_MAX: usize = 20;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub module: String,
    pub argument: String,
    pub note: String,
}

/// Toutes les formes du dernier résultat (affichées ensemble).
#[derive(Clone, Default, Debug)]
pub struct Formes {
    pub joli: String,
    pub polaire: String,
    pub fixe: String,
    pub precision: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // forme choisie
    pub formes: Formes,
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub forme: Forme,
    pub chiffres: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_reglages(Reglages::default())
    }
}

impl AppCalc {
    /// État initial avec des réglages donnés (ligne de commande).
    pub fn avec_reglages(reglages: Reglages) -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            formes: Formes::default(),
            erreur: String::new(),
            demarche: Demarche::default(),
            forme: reglages.forme,
            chiffres: reglages.chiffres.min(CHIFFRES_MAX),
            focus_entree: true,
        }
    }

    pub fn reglages(&self) -> Reglages {
        Reglages {
            forme: self.forme,
            chiffres: self.chiffres,
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + réglages par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.forme = Forme::default();
        self.chiffres = CHIFFRES_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.formes = Formes::default();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Place une erreur.
    ///
    /// Le dernier résultat reste affiché ; la démarche (non fiable) est effacée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat complet venu du noyau.
    pub fn set_resultats(&mut self, d: DemarcheNoyau) {
        self.erreur.clear();
        self.resultat = d.resultat;
        self.formes = Formes {
            joli: d.joli,
            polaire: d.polaire,
            fixe: d.fixe,
            precision: d.precision,
        };
        self.demarche = Demarche {
            jetons: d.jetons,
            module: d.module,
            argument: d.argument,
            note: d.note,
        };
        self.focus_entree = true;
    }

    /// Garde-fou : borne le nombre de chiffres.
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.min(CHIFFRES_MAX);
        self.focus_entree = true;
    }
}
