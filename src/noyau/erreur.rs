// src/noyau/erreur.rs
//
// Erreurs du noyau : une seule énumération pour tout le pipeline
// (jetons -> grammaire -> RPN -> évaluation).
//
// Les positions sont des index de caractères (pas d'octets) dans l'entrée.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurExpression {
    /// Littéral numérique invalide : deux points, point final, suivi d'un caractère
    /// inconnu, ou valeur hors des doubles finis.
    NombreMalForme { position: usize },

    /// Ni chiffre, ni opérateur/parenthèse, ni espace.
    CaractereInconnu { caractere: char, position: usize },

    /// Règle d'adjacence ou d'équilibre des parenthèses violée.
    Grammaire(String),

    /// Aucun jeton (entrée vide) ou RPN vide.
    ExpressionVide,

    /// pop() sur une pile de jetons vide.
    PileVide,

    /// Opérateur rencontré avec moins de deux opérandes (RPN mal formée).
    SousDebordement,

    /// inserer_avant() au-delà du sommet.
    IndexHorsPile { index: usize, longueur: usize },
}

impl ErreurExpression {
    /// Rejet par la grammaire infixe (tracé au niveau debug).
    pub fn grammaire(raison: impl Into<String>) -> Self {
        let raison = raison.into();
        log::debug!("grammaire: rejet ({raison})");
        Self::Grammaire(raison)
    }
}

impl fmt::Display for ErreurExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NombreMalForme { position } => {
                write!(f, "nombre mal formé (position {position})")
            }
            Self::CaractereInconnu {
                caractere,
                position,
            } => write!(f, "caractère inattendu: '{caractere}' (position {position})"),
            Self::Grammaire(raison) => write!(f, "expression invalide: {raison}"),
            Self::ExpressionVide => write!(f, "Entrée vide"),
            Self::PileVide => write!(f, "pile de jetons vide"),
            Self::SousDebordement => {
                write!(f, "RPN invalide: opérateur sans deux opérandes")
            }
            Self::IndexHorsPile { index, longueur } => {
                write!(f, "insertion hors pile (index {index}, longueur {longueur})")
            }
        }
    }
}

impl std::error::Error for ErreurExpression {}
