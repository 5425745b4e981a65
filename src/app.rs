// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalculatrice (pour main.rs: use crate::app::AppCalculatrice;)
// - Fournir l'impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter/Backspace sont gérés dans vue.rs, avec le reste du clavier.
// - Ici, seul le raccourci global ESC (équivalent du bouton "C").

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalculatrice;`
pub use etat::AppCalculatrice;

use eframe::egui;

impl eframe::App for AppCalculatrice {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = tout effacer (comme le bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.effacer();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
