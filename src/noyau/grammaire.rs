// src/noyau/grammaire.rs
//
// Validation de la grammaire infixe + multiplication implicite.
//
// Parcours de DROITE à GAUCHE (du sommet de la pile vers le premier jeton),
// en comparant chaque jeton à son prédécesseur (celui de gauche).
//
// profondeur = ouvrantes - fermantes sur le suffixe déjà visité :
// - une expression équilibrée donne 0 à la fin
// - profondeur > 0 => une '(' n’est jamais refermée à sa droite
//
// Juxtaposition (multiplication implicite) :
//   3(5+1)     -> 3 * (5+1)
//   (5+1)3     -> (5+1) * 3
//   (3+1)(5+1) -> (3+1) * (5+1)
// refusée si elle est détectée à profondeur 1.

use super::erreur::ErreurExpression;
use super::jetons::{Op, Tok};
use super::pile::PileJetons;

fn delta_profondeur(tok: &Tok) -> i64 {
    match tok {
        Tok::Op(Op::LPar) => 1,
        Tok::Op(Op::RPar) => -1,
        _ => 0,
    }
}

/// `)` suivi d’un nombre ou de `(`, ou nombre suivi de `(`.
fn est_juxtaposition(precedent: &Tok, courant: &Tok) -> bool {
    (precedent.est_op(Op::RPar) && (courant.est_operande() || courant.est_op(Op::LPar)))
        || (courant.est_op(Op::LPar) && precedent.est_operande())
}

/// Valide la pile infixe et y insère les `*` implicites (sur place).
pub fn normaliser(pile: &mut PileJetons) -> Result<(), ErreurExpression> {
    let dernier = *pile.peek().ok_or(ErreurExpression::ExpressionVide)?;

    // fin d’expression : opérande ou ')' seulement
    if let Tok::Op(op) = dernier {
        if op != Op::RPar {
            return Err(ErreurExpression::grammaire(format!(
                "l'expression se termine par '{}'",
                op.symbole()
            )));
        }
    }

    if pile.len() == 1 {
        return match dernier {
            Tok::Num(_) => Ok(()),
            Tok::Op(op) => Err(ErreurExpression::grammaire(format!(
                "'{}' seul n'est pas une expression",
                op.symbole()
            ))),
        };
    }

    let mut profondeur: i64 = 0;
    let mut i = pile.len() - 1;

    while i > 0 {
        let (Some(&courant), Some(&precedent)) = (pile.get(i), pile.get(i - 1)) else {
            break;
        };

        profondeur += delta_profondeur(&courant);

        if est_juxtaposition(&precedent, &courant) {
            if profondeur == 1 {
                return Err(ErreurExpression::grammaire(
                    "juxtaposition au premier niveau de parenthèses",
                ));
            }
            log::trace!("grammaire: '*' implicite insérée en {i}");
            pile.inserer_avant(i, Tok::Op(Op::Star))?;
            // le '*' inséré occupe maintenant l’index i : il est visité au tour suivant
            continue;
        }

        if profondeur > 0 {
            return Err(ErreurExpression::grammaire("parenthèse ouvrante non fermée"));
        }

        let meme_categorie = precedent.est_operande() == courant.est_operande();
        if meme_categorie && !courant.est_op(Op::LPar) && !precedent.est_op(Op::RPar) {
            return Err(ErreurExpression::grammaire(if courant.est_operande() {
                "deux nombres consécutifs sans opérateur"
            } else {
                "deux opérateurs consécutifs"
            }));
        }

        i -= 1;
    }

    // premier jeton (gauche)
    let premier = *pile.get(0).ok_or(ErreurExpression::ExpressionVide)?;
    profondeur += delta_profondeur(&premier);

    if profondeur != 0 {
        return Err(ErreurExpression::grammaire("parenthèses non équilibrées"));
    }

    if let Tok::Op(op) = premier {
        if op != Op::LPar {
            return Err(ErreurExpression::grammaire(format!(
                "l'expression commence par '{}'",
                op.symbole()
            )));
        }
    }

    Ok(())
}
