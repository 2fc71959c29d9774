// src/noyau/pile.rs
//
// Pile de jetons (LIFO) adossée à un Vec.
//
// Ordre : l’index 0 est le PREMIER jeton empilé, le sommet est le dernier.
// Comme la tokenisation empile de gauche à droite, l’ordre du Vec est
// l’ordre de lecture de l’expression.
//
// inserer_avant(i, t) remplace l’ancien “prepend avant un noeud” d’une liste
// chaînée : t prend l’index i et l’ancien jeton i passe en i+1.

use super::erreur::ErreurExpression;
use super::jetons::Tok;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PileJetons {
    jetons: Vec<Tok>,
}

impl PileJetons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            jetons: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, tok: Tok) {
        self.jetons.push(tok);
    }

    pub fn pop(&mut self) -> Result<Tok, ErreurExpression> {
        self.jetons.pop().ok_or(ErreurExpression::PileVide)
    }

    /// Sommet de pile (dernier empilé).
    pub fn peek(&self) -> Option<&Tok> {
        self.jetons.last()
    }

    pub fn len(&self) -> usize {
        self.jetons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jetons.is_empty()
    }

    /// Accès par index (0 = premier empilé).
    pub fn get(&self, index: usize) -> Option<&Tok> {
        self.jetons.get(index)
    }

    /// Insère `tok` juste avant le jeton d’index `index` (ordre d’empilement).
    /// `index == len()` revient à un push.
    pub fn inserer_avant(&mut self, index: usize, tok: Tok) -> Result<(), ErreurExpression> {
        if index > self.jetons.len() {
            return Err(ErreurExpression::IndexHorsPile {
                index,
                longueur: self.jetons.len(),
            });
        }
        self.jetons.insert(index, tok);
        Ok(())
    }

    /// Vide la pile en séquence ordonnée : ordre d’empilement (gauche -> droite).
    pub fn into_sequence(self) -> Vec<Tok> {
        self.jetons
    }

    /// Vue en lecture seule, dans l’ordre d’empilement.
    pub fn as_slice(&self) -> &[Tok] {
        &self.jetons
    }
}

#[cfg(test)]
impl From<Vec<Tok>> for PileJetons {
    fn from(jetons: Vec<Tok>) -> Self {
        Self { jetons }
    }
}
