// src/noyau/rpn.rs
//
// Shunting-yard -> RPN, puis évaluation de la RPN sur une pile d’opérandes.
//
// Règles:
// - Num : sortie directe
// - '(' : pile ops
// - ')' : dépile vers la sortie jusqu’à '(' (la '(' est jetée)
// - opérateur : dépile tant que le sommet n’est pas '(' et a une précédence >= ;
//   donc TOUS les opérateurs sont associatifs à gauche, '^' compris :
//   "2^3^2" => "2 3 ^ 2 ^" => (2^3)^2 = 64 (choix assumé, pas 2^(3^2))
//
// Entrée attendue : une séquence déjà validée par grammaire::normaliser.

use super::erreur::ErreurExpression;
use super::jetons::{Op, Tok};
use super::pile::PileJetons;

/// Convertit une suite infixe (validée) en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: ( 3 + 4 ) * 2 ^ 3
///   rpn:    3 4 + 2 3 ^ *
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurExpression> {
    let mut out = PileJetons::with_capacity(tokens.len());
    let mut ops = PileJetons::new();

    for &tok in tokens {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::Op(Op::LPar) => ops.push(tok),

            Tok::Op(Op::RPar) => {
                // dépile jusqu’à '('
                while let Some(&top) = ops.peek() {
                    if top.est_op(Op::LPar) {
                        break;
                    }
                    out.push(ops.pop()?);
                }
                // jette la '(' (PileVide si la ')' n’a pas d’ouvrante)
                ops.pop()?;
            }

            Tok::Op(op) => {
                while let Some(&Tok::Op(top)) = ops.peek() {
                    if top == Op::LPar || top.precedence() < op.precedence() {
                        break;
                    }
                    out.push(ops.pop()?);
                }
                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while !ops.is_empty() {
        out.push(ops.pop()?);
    }

    if out.is_empty() {
        return Err(ErreurExpression::ExpressionVide);
    }
    Ok(out.into_sequence())
}

fn applique(op: Op, gauche: f64, droite: f64) -> Result<f64, ErreurExpression> {
    match op {
        Op::Plus => Ok(gauche + droite),
        Op::Minus => Ok(gauche - droite),
        Op::Star => Ok(gauche * droite),
        // division IEEE : x/0 => ±inf, 0/0 => NaN (pas une erreur)
        Op::Slash => Ok(gauche / droite),
        Op::Caret => Ok(gauche.powf(droite)),
        Op::LPar | Op::RPar => Err(ErreurExpression::Grammaire(
            "parenthèse inattendue en RPN".into(),
        )),
    }
}

/// Évalue une RPN. Chaque opérateur consomme val1 (sommet, opérande droite)
/// puis val2 (opérande gauche) et empile `val2 op val1`.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurExpression> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for &tok in rpn {
        match tok {
            Tok::Num(v) => st.push(v),
            Tok::Op(op) => {
                let val1 = st.pop().ok_or(ErreurExpression::SousDebordement)?;
                let val2 = st.pop().ok_or(ErreurExpression::SousDebordement)?;
                st.push(applique(op, val2, val1)?);
            }
        }
    }

    match st.as_slice() {
        [resultat] => Ok(*resultat),
        [] => Err(ErreurExpression::ExpressionVide),
        reste => Err(ErreurExpression::Grammaire(format!(
            "RPN incomplète: {} valeurs restantes",
            reste.len()
        ))),
    }
}
