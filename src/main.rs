// src/main.rs
//
// Calculatrice complexe: point d’entrée NATIF + WEB (WASM)
// ---------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//   ou, avec --console, une évaluation stdin -> stdout sans fenêtre
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// IMPORTANT (structure projet):
// - `impl eframe::App for AppCalc` vit dans src/app.rs
// - Ici: point d’entrée seulement (natif + web)

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

#[cfg(not(target_arch = "wasm32"))]
use calculatrice_complexe::console;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice complexe";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;

    use calculatrice_complexe::noyau::{Forme, Reglages, CHIFFRES_DEFAUT};

    /// Calculatrice de nombres complexes (fenêtre par défaut).
    #[derive(Parser, Debug)]
    #[command(version, about)]
    pub struct Cli {
        /// Lit une expression sur l’entrée standard et écrit le résultat (sans fenêtre)
        #[arg(long)]
        pub console: bool,

        /// Forme du résultat : joli, polaire, fixe, precision
        #[arg(long, default_value = "joli")]
        pub forme: Forme,

        /// Chiffres des formes fixe et précision
        #[arg(long, default_value_t = CHIFFRES_DEFAUT)]
        pub chiffres: usize,

        /// Journal détaillé sur stderr
        #[arg(long)]
        pub verbeux: bool,
    }

    impl Cli {
        pub fn reglages(&self) -> Reglages {
            Reglages {
                forme: self.forme,
                chiffres: self.chiffres,
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn installer_journal(verbeux: bool) {
    let niveau = if verbeux {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // stdout reste réservé aux résultats du mode console
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(niveau)
        .with_target(false)
        .init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;

    let args = cli::Cli::parse();
    installer_journal(args.verbeux);
    let reglages = args.reglages();

    if args.console {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        if let Err(e) = console::executer(stdin.lock(), stdout.lock(), &reglages) {
            tracing::error!(erreur = %e, "évaluation abandonnée");
            eprintln!("erreur : {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([540.0, 760.0])
            .with_min_inner_size([420.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::avec_reglages(reglages)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
