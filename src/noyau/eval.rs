//! Noyau — évaluation (pipeline réel)
//!
//! texte -> jetons -> grammaire (+ '*' implicites) -> RPN -> f64
//!
//! Chaque étape possède la séquence qu’elle produit et la cède à la suivante.
//! Aucun état global : deux évaluations peuvent tourner en parallèle.

use super::erreur::ErreurExpression;
use super::format::{format_nombre, format_tokens};
use super::grammaire::normaliser;
use super::jetons::{tokenize, Tok};
use super::rpn::{eval_rpn, to_rpn};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub normalises: String,
    pub rpn: String,
    pub note: String,
}

/// Une RPN validée + la trace des étapes qui l’ont produite.
struct Analyse {
    rpn: Vec<Tok>,
    demarche: DemarcheNoyau,
}

fn analyser(s: &str) -> Result<Analyse, ErreurExpression> {
    // 1) Jetons
    let mut pile = tokenize(s)?;
    if pile.is_empty() {
        return Err(ErreurExpression::ExpressionVide);
    }
    let jetons_txt = format_tokens(pile.as_slice());
    log::debug!("jetons: {jetons_txt}");

    // 2) Grammaire (sur place)
    normaliser(&mut pile)?;
    let infixe = pile.into_sequence();
    let normalises_txt = format_tokens(&infixe);
    log::debug!("normalisés: {normalises_txt}");

    // 3) RPN
    let rpn = to_rpn(&infixe)?;
    let rpn_txt = format_tokens(&rpn);
    log::debug!("rpn: {rpn_txt}");

    Ok(Analyse {
        rpn,
        demarche: DemarcheNoyau {
            jetons: jetons_txt,
            normalises: normalises_txt,
            rpn: rpn_txt,
            note: "Pipeline: jetons → grammaire (× implicites) → RPN (shunting-yard) → évaluation sur pile.".into(),
        },
    })
}

/// Infixe -> RPN validée, ou rejet (premier défaut détecté).
pub fn infix_to_postfix(s: &str) -> Result<Vec<Tok>, ErreurExpression> {
    analyser(s).map(|a| a.rpn)
}

/// Évalue une RPN issue de `infix_to_postfix`.
/// Sur une RPN fabriquée à la main : SousDebordement si un opérateur manque d’opérandes.
pub fn evaluate_postfix(rpn: &[Tok]) -> Result<f64, ErreurExpression> {
    eval_rpn(rpn)
}

/// RPN en texte : "3 4 + 2 3 ^ *" (nombres en %.16g).
pub fn format_postfix(rpn: &[Tok]) -> String {
    format_tokens(rpn)
}

/// API publique (UI) : évalue une expression et retourne:
/// - le résultat affiché avec `chiffres` chiffres significatifs
/// - la valeur brute
/// - la démarche (jetons, jetons normalisés, RPN)
pub fn eval_expression(
    expr_str: &str,
    chiffres: usize,
) -> Result<(String, f64, DemarcheNoyau), ErreurExpression> {
    let analyse = analyser(expr_str)?;
    let valeur = eval_rpn(&analyse.rpn)?;
    log::debug!("résultat: {valeur}");

    Ok((format_nombre(valeur, chiffres), valeur, analyse.demarche))
}
