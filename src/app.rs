// src/app.rs
//
// Coquille eframe de la calculatrice postfixe.
//
// etat.rs porte l’état (entrée, résultat, RPN, démarche), vue.rs le dessine
// et appelle le noyau. Ici : une seule image par frame, même code natif et wasm.
// Enter/Backspace restent dans vue.rs, liés au focus du champ d’entrée.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl AppCalc {
    /// Échap vide l’entrée, comme "C" ; résultat et RPN restent affichés.
    fn raccourcis_globaux(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.clear_entree();
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.raccourcis_globaux(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.ui(ui));
    }
}
