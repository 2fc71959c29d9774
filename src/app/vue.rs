// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue, Backspace nettoie les espaces finaux (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use calculatrice_postfixe::noyau::{self, DemarcheNoyau};

use super::etat::{AppCalc, Demarche, CHIFFRES_MAX};

impl From<DemarcheNoyau> for Demarche {
    fn from(d: DemarcheNoyau) -> Self {
        Self {
            jetons: d.jetons,
            normalises: d.normalises,
            rpn: d.rpn,
            note: d.note,
        }
    }
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice postfixe");
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

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (3+4)*2^3, 3(5+1), 2.5+1.25")
                .id_source("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / opérateurs / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        // --- Clavier : Backspace (seulement si le champ est focus) ---
        // TextEdit retire déjà le caractère ; on nettoie juste les espaces laissés derrière.
        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
        if resp.has_focus() && backspace {
            trim_espaces_finaux(&mut self.entree);
        }

        ui.add_space(6.0);

        // Actions + chiffres significatifs
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + RPN + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Précision :");
            let mut d = self.chiffres as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(1..=CHIFFRES_MAX as u32)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_chiffres(d as usize);
            }
        });

        ui.add_space(8.0);

        // Opérateurs + parenthèses + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", InsertKind::Op);
            self.bouton_insert(ui, "-", InsertKind::Op);
            self.bouton_insert(ui, "*", InsertKind::Op);
            self.bouton_insert(ui, "/", InsertKind::Op);
            self.bouton_insert(ui, "^", InsertKind::Op);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_postfixe")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", InsertKind::Digit);
                self.bouton_insert(ui, "/", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", InsertKind::Digit);
                self.bouton_insert(ui, "*", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", InsertKind::Digit);
                ui.label("");
                self.bouton_insert(ui, "-", InsertKind::Op);
                ui.end_row();
            });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        if self.resultat_dispo {
            Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);
        } else {
            ui.monospace("indisponible");
        }

        ui.add_space(6.0);

        ui.label("RPN :");
        Self::champ_monospace(ui, "postfixe_out", &self.postfixe, 2);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(
                    ui,
                    "Jetons normalisés",
                    "demarche_normalises",
                    &self.demarche.normalises,
                );
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
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
                Action::Backspace => {
                    self.entree.pop();
                    trim_espaces_finaux(&mut self.entree);
                }
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, symbole: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(symbole));
        if resp.clicked() {
            inserer(&mut self.entree, symbole, kind);
            self.focus_entree = true;
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat/RPN/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        match noyau::eval_expression(&self.entree, self.chiffres) {
            Ok((resultat, _valeur, d_noyau)) => self.set_resultats(resultat, d_noyau.into()),
            Err(e) => {
                log::debug!("entrée rejetée {:?}: {e}", self.entree);
                self.set_erreur(e.to_string());
            }
        }
    }
}

fn trim_espaces_finaux(s: &mut String) {
    while s.ends_with(' ') {
        s.pop();
    }
}

/// Insertion “propre” d’un symbole depuis un bouton (espaces autour des opérateurs).
fn inserer(entree: &mut String, symbole: &str, kind: InsertKind) {
    match kind {
        InsertKind::CloseParen => {
            trim_espaces_finaux(entree);
            entree.push_str(symbole);
        }
        InsertKind::OpenParen => {
            // "3(" et ")(" restent collés : la grammaire y insère le '*' implicite
            entree.push_str(symbole);
        }
        InsertKind::Op => {
            trim_espaces_finaux(entree);
            if !entree.is_empty() {
                entree.push(' ');
            }
            entree.push_str(symbole);
            entree.push(' ');
        }
        InsertKind::Digit => {
            // chiffres: pas d’espaces auto
            entree.push_str(symbole);
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
    Op,
    OpenParen,
    CloseParen,
}
