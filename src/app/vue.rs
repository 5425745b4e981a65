// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalculatrice (etat.rs) pour natif + wasm
// - Clavier : symboles tapés, Enter évalue, Backspace efface
// - Tactile : gros boutons, « = » grisé tant que la machine l'interdit
//
// Note :
// - Clavier et boutons passent tous deux par la même frame egui :
//   les mutations de la machine restent strictement sérialisées.

use eframe::egui;

use super::etat::AppCalculatrice;

/// Symboles relayés depuis le clavier (tout le reste est ignoré,
/// lettres comprises).
const SYMBOLES_CLAVIER: &str = "0123456789.+-*/%";

impl AppCalculatrice {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.clavier(ui);

        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_affichage(ui);
        ui.add_space(8.0);
        self.ui_pave(ui);
    }

    /* ------------------------ Clavier ------------------------ */

    /// Route les événements clavier vers la machine.
    /// Miroir du pavé : symboles, Enter (=), Backspace (DEL).
    fn clavier(&mut self, ui: &mut egui::Ui) {
        let evenements = ui.input(|i| i.events.clone());
        for ev in evenements {
            match ev {
                egui::Event::Text(texte) => {
                    for c in texte.chars().filter(|c| SYMBOLES_CLAVIER.contains(*c)) {
                        self.saisir(c);
                    }
                }
                egui::Event::Key {
                    key: egui::Key::Enter,
                    pressed: true,
                    ..
                } => {
                    self.evaluer();
                }
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } => {
                    self.retour_arriere();
                }
                _ => {}
            }
        }
    }

    /* ------------------------ Affichage ------------------------ */

    /// Zone d'affichage : lecture seule, défilement collé à droite pour
    /// que la fin de l'expression reste visible.
    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::horizontal()
                    .auto_shrink([false, true])
                    .stick_to_right(true)
                    .show(ui, |ui| {
                        // hauteur stable, même écran vide
                        ui.set_min_height(
                            ui.text_style_height(&egui::TextStyle::Monospace),
                        );
                        ui.monospace(self.affichage());
                    });
            });
    }

    /* ------------------------ Pavé ------------------------ */

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "C", "Efface tout", Action::Effacer);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::RetourArriere);
                self.bouton_symbole(ui, '%');
                self.bouton_symbole(ui, '/');
                ui.end_row();

                self.bouton_symbole(ui, '7');
                self.bouton_symbole(ui, '8');
                self.bouton_symbole(ui, '9');
                self.bouton_symbole(ui, '*');
                ui.end_row();

                self.bouton_symbole(ui, '4');
                self.bouton_symbole(ui, '5');
                self.bouton_symbole(ui, '6');
                self.bouton_symbole(ui, '-');
                ui.end_row();

                self.bouton_symbole(ui, '1');
                self.bouton_symbole(ui, '2');
                self.bouton_symbole(ui, '3');
                self.bouton_symbole(ui, '+');
                ui.end_row();

                self.bouton_symbole(ui, '0');
                self.bouton_symbole(ui, '.');
                self.bouton_egal(ui);
                ui.end_row();
            });
    }

    fn bouton_symbole(&mut self, ui: &mut egui::Ui, c: char) {
        let resp = ui.add_sized([56.0, 40.0], egui::Button::new(c.to_string()));
        if resp.clicked() {
            self.saisir(c);
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 40.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Effacer => self.effacer(),
                Action::RetourArriere => self.retour_arriere(),
            }
        }
    }

    /// « = » : grisé tant que la machine refuse l'évaluation, revérifié à
    /// chaque frame (donc après chaque mutation).
    fn bouton_egal(&mut self, ui: &mut egui::Ui) {
        let resp = ui.add_enabled(
            self.egal_actif(),
            egui::Button::new("=").min_size(egui::vec2(118.0, 40.0)),
        );
        if resp.clicked() {
            self.evaluer();
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Effacer,
    RetourArriere,
}
