// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus), DEL retire les noms de fonction d’un bloc
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;
use tracing::warn;

use calculatrice_complexe::noyau::{eval_expression, Forme};

use super::etat::{AppCalc, CHIFFRES_MAX};

/// Motifs retirés d’un bloc par le backspace.
const MOTIFS_ENTIERS: [&str; 4] = ["exp(", "ln(", "pi", "π"];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice complexe");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (1+2j)*(3-j), 2e^(jπ/2), ln(-1)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        // Actions + réglages
        ui.horizontal(|ui| {
            // C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultats + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            let avant = self.forme;
            egui::ComboBox::from_id_salt("forme_resultat")
                .selected_text(self.forme.libelle())
                .show_ui(ui, |ui| {
                    for f in Forme::TOUTES {
                        ui.selectable_value(&mut self.forme, f, f.libelle());
                    }
                });

            let mut d = self.chiffres as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=CHIFFRES_MAX as u32)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_chiffres(d as usize);
            }

            // réglage modifié : le résultat affiché suit
            if (self.forme != avant || resp.changed()) && !self.resultat.is_empty() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "j", "j", InsertKind::Word);
            self.bouton_insert(ui, "π", "π", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);
            self.bouton_insert(ui, "exp", "exp(", InsertKind::Func);
            self.bouton_insert(ui, "ln", "ln(", InsertKind::Func);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "j", "j", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Résultat ({}) :", self.forme.libelle()));
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

        ui.add_space(6.0);

        egui::Grid::new("formes_resultat")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for (titre, valeur) in [
                    ("Joli", &self.formes.joli),
                    ("Polaire", &self.formes.polaire),
                    ("Fixe", &self.formes.fixe),
                    ("Précision", &self.formes.precision),
                ] {
                    ui.label(format!("{titre} :"));
                    ui.monospace(valeur.as_str());
                    ui.end_row();
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Module", "demarche_module", &self.demarche.module);
                Self::champ_demarche(ui, "Argument", "demarche_argument", &self.demarche.argument);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule : cadre + label monospace, pas de TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => backspace_entree(&mut self.entree),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            inserer(&mut self.entree, to_insert, kind);
            self.focus_entree = true;
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat/formes/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        match eval_expression(&self.entree, &self.reglages()) {
            Ok((_valeur, d)) => self.set_resultats(d),
            Err(e) => {
                warn!(entree = %self.entree, erreur = %e, "expression rejetée");
                self.set_erreur(e.to_string());
            }
        }
        self.focus_entree = true;
    }
}

/* ------------------------ Édition de l’entrée (sans egui) ------------------------ */

fn retirer_espaces_finaux(entree: &mut String) {
    while entree.ends_with(' ') {
        entree.pop();
    }
}

/// Backspace “intelligent” : retire d’un coup "exp(", "ln(", "pi", sinon un caractère.
fn backspace_entree(entree: &mut String) {
    retirer_espaces_finaux(entree);

    match MOTIFS_ENTIERS.iter().find(|m| entree.ends_with(*m)) {
        Some(m) => entree.truncate(entree.len() - m.len()),
        None => {
            entree.pop();
        }
    }

    retirer_espaces_finaux(entree);
}

/// Insertion d’un bouton, avec espaces automatiques autour des opérateurs.
fn inserer(entree: &mut String, texte: &str, kind: InsertKind) {
    match kind {
        InsertKind::CloseParen => {
            retirer_espaces_finaux(entree);
            entree.push_str(texte);
        }
        InsertKind::OpenParen | InsertKind::Func => {
            // "2" puis "exp(" : espace pour ne pas coller un nombre à un nom
            let dernier = entree.chars().rev().find(|c| !c.is_whitespace());
            if matches!(dernier, Some(c) if c.is_ascii_alphanumeric() || c == ')') {
                retirer_espaces_finaux(entree);
                entree.push(' ');
            }
            entree.push_str(texte);
        }
        InsertKind::Op => {
            retirer_espaces_finaux(entree);
            if !entree.is_empty() {
                entree.push(' ');
            }
            entree.push_str(texte);
            entree.push(' ');
        }
        InsertKind::Digit => entree.push_str(texte),
        InsertKind::Word => {
            // deux lettres collées formeraient un autre mot ("e" puis "xp" = "exp")
            if texte.starts_with(|c: char| c.is_ascii_alphabetic())
                && entree.ends_with(|c: char| c.is_ascii_alphabetic())
            {
                entree.push(' ');
            }
            entree.push_str(texte);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
