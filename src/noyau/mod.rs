//! Noyau infixe -> postfixe (RPN)
//!
//! Organisation interne :
//! - erreur.rs    : taxonomie des erreurs (une seule énumération)
//! - jetons.rs    : Tok/Op + tokenisation + relecture d’une RPN
//! - pile.rs      : pile de jetons (Vec) + insertion avant un jeton
//! - grammaire.rs : validation infixe + '*' implicites
//! - rpn.rs       : shunting-yard + évaluation sur pile
//! - format.rs    : affichage %.16g des nombres, jetons en texte
//! - eval.rs      : pipeline complet

pub mod erreur;
pub mod eval;
pub mod format;
pub mod grammaire;
pub mod jetons;
pub mod pile;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurExpression;
pub use eval::{
    eval_expression, evaluate_postfix, format_postfix, infix_to_postfix, DemarcheNoyau,
};
pub use jetons::{lire_postfixe, Op, Tok};
