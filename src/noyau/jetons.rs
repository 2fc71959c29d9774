// src/noyau/jetons.rs

use super::erreur::ErreurExpression;
use super::pile::PileJetons;

/// Opérateurs binaires + parenthèses (ensemble fermé).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

impl Op {
    pub fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            '^' => Some(Op::Caret),
            '(' => Some(Op::LPar),
            ')' => Some(Op::RPar),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
            Op::Caret => '^',
            Op::LPar => '(',
            Op::RPar => ')',
        }
    }

    /// ^ > * / > + - ; les parenthèses n’ont pas de précédence.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Minus => 1,
            Op::Star | Op::Slash => 2,
            Op::Caret => 3,
            Op::LPar | Op::RPar => 0,
        }
    }
}

/// Un jeton : opérande (double fini, >= 0) ou opérateur/parenthèse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Op),
}

impl Tok {
    pub fn est_operande(&self) -> bool {
        matches!(self, Tok::Num(_))
    }

    pub fn est_op(&self, op: Op) -> bool {
        matches!(self, Tok::Op(o) if *o == op)
    }
}

/// Espace, ou caractère de contrôle de \t (9) à \r (13).
fn est_espace(c: char) -> bool {
    c == ' ' || ('\u{9}'..='\u{d}').contains(&c)
}

/// Tokenize une chaîne en pile de jetons (ordre d’empilement = gauche -> droite).
/// Supporte:
/// - entiers (ex: 12) et décimaux avec un seul point (ex: 2.5)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - espaces et \t..\r ignorés
///
/// Pas de moins unaire : "-3" passe ici, la grammaire le rejettera.
pub fn tokenize(s: &str) -> Result<PileJetons, ErreurExpression> {
    let chars: Vec<char> = s.chars().collect();
    let mut pile = PileJetons::with_capacity(chars.len());
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(op) = Op::depuis_char(c) {
            pile.push(Tok::Op(op));
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let (longueur, point) = info_nombre(&chars[i..])
                .ok_or(ErreurExpression::NombreMalForme { position: i })?;
            let valeur = valeur_nombre(&chars[i..i + longueur], point);
            // un opérande reste un double fini : "999...9" au-delà de f64::MAX est refusé
            if !valeur.is_finite() {
                return Err(ErreurExpression::NombreMalForme { position: i });
            }
            pile.push(Tok::Num(valeur));
            i += longueur;
            continue;
        }

        if est_espace(c) {
            i += 1;
            continue;
        }

        return Err(ErreurExpression::CaractereInconnu {
            caractere: c,
            position: i,
        });
    }

    Ok(pile)
}

/// Mesure le littéral qui commence en chars[0] (un chiffre).
/// Retourne (longueur, index du point éventuel), ou None si mal formé :
/// - deux points
/// - suivi d’autre chose qu’un opérateur, un espace ou la fin
/// - termine par un point ("3.")
fn info_nombre(chars: &[char]) -> Option<(usize, Option<usize>)> {
    let mut longueur = 0;
    let mut point = None;

    while longueur < chars.len() && (chars[longueur].is_ascii_digit() || chars[longueur] == '.') {
        if chars[longueur] == '.' {
            if point.is_some() {
                return None;
            }
            point = Some(longueur);
        }
        longueur += 1;
    }

    if let Some(&suivant) = chars.get(longueur) {
        if Op::depuis_char(suivant).is_none() && !est_espace(suivant) {
            return None;
        }
    }

    if longueur == 0 || chars[longueur - 1] == '.' {
        return None;
    }

    Some((longueur, point))
}

fn chiffre(c: char) -> f64 {
    c.to_digit(10).map_or(0.0, f64::from)
}

/// Somme positionnelle : chiffre * 10^rang, du poids fort au poids faible.
fn somme_positionnelle(chiffres: &[char]) -> f64 {
    let n = chiffres.len();
    chiffres.iter().enumerate().fold(0.0, |acc, (k, &c)| {
        let d = chiffre(c);
        if d == 0.0 {
            return acc;
        }
        let rang = i32::try_from(n - 1 - k).unwrap_or(i32::MAX);
        acc + d * 10f64.powi(rang)
    })
}

/// Valeur d’un littéral déjà validé par info_nombre.
/// Décimal : partie entière + (partie fractionnaire comme entier) / 10^(longueur frac).
fn valeur_nombre(chiffres: &[char], point: Option<usize>) -> f64 {
    // chemin rapide : un seul chiffre
    if chiffres.len() == 1 {
        return chiffre(chiffres[0]);
    }

    match point {
        None => somme_positionnelle(chiffres),
        Some(p) => {
            let entier = somme_positionnelle(&chiffres[..p]);
            let frac = &chiffres[p + 1..];
            let echelle = 10f64.powi(i32::try_from(frac.len()).unwrap_or(i32::MAX));
            let fraction = somme_positionnelle(frac) / echelle;
            if fraction.is_nan() {
                // inf / inf : plus de 308 décimales, on repasse par Horner
                entier + fraction_horner(frac)
            } else {
                entier + fraction
            }
        }
    }
}

/// 0.d1d2...dn lu de droite à gauche : jamais de débordement.
fn fraction_horner(frac: &[char]) -> f64 {
    frac.iter().rev().fold(0.0, |acc, &c| (acc + chiffre(c)) / 10.0)
}

/// Relit une RPN rendue par format_postfix ("3 4 + 2 3 ^ *").
/// Nombres : forme %g acceptée (0.5, 1e+20), mais finis et >= 0 seulement.
/// Parenthèses refusées (une RPN n’en contient pas).
pub fn lire_postfixe(s: &str) -> Result<Vec<Tok>, ErreurExpression> {
    let mut out = Vec::new();

    for mot in s.split_whitespace() {
        // position en caractères (pas en octets)
        let debut = mot.as_ptr() as usize - s.as_ptr() as usize;
        let position = s[..debut].chars().count();

        let mut it = mot.chars();
        if let (Some(c), None) = (it.next(), it.next()) {
            match Op::depuis_char(c) {
                Some(Op::LPar | Op::RPar) => {
                    return Err(ErreurExpression::Grammaire(format!(
                        "parenthèse inattendue en RPN (position {position})"
                    )));
                }
                Some(op) => {
                    out.push(Tok::Op(op));
                    continue;
                }
                None => {}
            }
        }

        match mot.parse::<f64>() {
            Ok(v) if v.is_finite() && v.is_sign_positive() => out.push(Tok::Num(v)),
            _ => return Err(ErreurExpression::NombreMalForme { position }),
        }
    }

    Ok(out)
}
