//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, RPN, erreur, chiffres, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Chiffres significatifs bornés (un f64 n’en porte pas plus de 17).

/// Chiffres significatifs affichés par défaut (comme "%.16g").
pub const CHIFFRES_DEFAUT: usize = 16;

/// Au-delà, un f64 n’a plus rien à dire.
pub const CHIFFRES_MAX: usize = 17;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub normalises: String,
    pub rpn: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,     // valeur affichée (%.Ng)
    pub postfixe: String,     // RPN de la dernière évaluation réussie
    pub erreur: String,       // message d’erreur (si parsing/éval échoue)
    pub resultat_dispo: bool, // false si rien d’évalué ou erreur

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub chiffres: usize, // chiffres significatifs du résultat

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            postfixe: String::new(),
            erreur: String::new(),
            resultat_dispo: false, // au démarrage : rien à lire
            demarche: Demarche::default(),
            chiffres: CHIFFRES_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + chiffres par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.chiffres = CHIFFRES_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + RPN + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.postfixe.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` et `postfixe` (dernier succès) pour ne pas “effacer l’écran” sur une faute.
    /// - On efface la démarche (elle décrirait une expression rejetée).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + RPN + démarche).
    pub fn set_resultats(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.postfixe = demarche.rpn.clone();
        self.resultat_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : 1..=CHIFFRES_MAX.
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
        self.focus_entree = true;
    }
}
