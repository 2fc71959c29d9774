//! Tests fuzz safe : robustesse + déterminisme + comparaison à une référence exacte.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - référence : descente récursive sur rationnels exacts (num-rational),
//!   mêmes règles (précédences, associativité à gauche, '*' implicites)
//! - invariant clé : accepté par le pipeline <=> accepté par la référence

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::{evaluate_postfix, infix_to_postfix, ErreurExpression};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Référence exacte ------------------------ */

#[derive(Clone, Debug)]
enum RefTok {
    Num(BigRational),
    Op(char),
}

fn rat_depuis_litteral(lit: &str) -> Option<BigRational> {
    if lit.ends_with('.') {
        return None;
    }
    let (ent, frac) = lit.split_once('.').unwrap_or((lit, ""));
    if frac.contains('.') {
        return None;
    }
    let n = BigInt::parse_bytes(format!("{ent}{frac}").as_bytes(), 10)?;
    let d = BigInt::from(10).pow(frac.len() as u32);
    Some(BigRational::new(n, d))
}

fn ref_jetons(s: &str) -> Option<Vec<RefTok>> {
    let c: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < c.len() {
        let ch = c[i];
        if ch == ' ' {
            i += 1;
        } else if "+-*/^()".contains(ch) {
            out.push(RefTok::Op(ch));
            i += 1;
        } else if ch.is_ascii_digit() {
            let debut = i;
            while i < c.len() && (c[i].is_ascii_digit() || c[i] == '.') {
                i += 1;
            }
            let lit: String = c[debut..i].iter().collect();
            out.push(RefTok::Num(rat_depuis_litteral(&lit)?));
        } else {
            return None;
        }
    }
    Some(out)
}

/// Descente récursive :
///   expr  := terme (('+'|'-') terme)*
///   terme := puis (('*'|'/') puis | puis implicite)*
///   puis  := prim ('^' prim)*            (associatif à gauche)
///   prim  := nombre | '(' expr ')'
/// Implicite : prim suivante commence par '(' ; ou par un nombre si la
/// précédente finissait par ')'.
struct Reference {
    t: Vec<RefTok>,
    i: usize,
    /// division par zéro / exposant non entier : valeur non comparable
    hors_domaine: bool,
    /// plus grande valeur absolue intermédiaire (tolérance de comparaison)
    max_abs: f64,
}

impl Reference {
    fn peek(&self) -> Option<&RefTok> {
        self.t.get(self.i)
    }

    fn peek_op(&self) -> Option<char> {
        match self.peek() {
            Some(RefTok::Op(c)) => Some(*c),
            _ => None,
        }
    }

    fn note(&mut self, v: &BigRational) {
        if let Some(f) = v.to_f64() {
            self.max_abs = self.max_abs.max(f.abs());
        }
    }

    fn expr(&mut self) -> Option<BigRational> {
        let mut a = self.terme()?;
        while let Some(c @ ('+' | '-')) = self.peek_op() {
            self.i += 1;
            let b = self.terme()?;
            a = if c == '+' { a + b } else { a - b };
            self.note(&a);
        }
        Some(a)
    }

    fn terme(&mut self) -> Option<BigRational> {
        let (mut a, mut paren) = self.puis()?;
        loop {
            let op = match self.peek() {
                Some(RefTok::Op(c @ ('*' | '/'))) => {
                    let c = *c;
                    self.i += 1;
                    c
                }
                Some(RefTok::Op('(')) => '*',
                Some(RefTok::Num(_)) if paren => '*',
                _ => break,
            };
            let (b, p) = self.puis()?;
            paren = p;
            if op == '/' {
                if b.is_zero() {
                    self.hors_domaine = true;
                    a = BigRational::zero();
                } else {
                    a /= b;
                }
            } else {
                a *= b;
            }
            self.note(&a);
        }
        Some(a)
    }

    fn puis(&mut self) -> Option<(BigRational, bool)> {
        let (mut a, mut paren) = self.prim()?;
        while self.peek_op() == Some('^') {
            self.i += 1;
            let (b, p) = self.prim()?;
            paren = p;
            let e = if b.is_integer() { b.to_integer().to_i32() } else { None };
            match e {
                Some(e) if e.abs() <= 8 && !(a.is_zero() && e < 0) => a = a.pow(e),
                _ => {
                    self.hors_domaine = true;
                    a = BigRational::zero();
                }
            }
            self.note(&a);
        }
        Some((a, paren))
    }

    fn prim(&mut self) -> Option<(BigRational, bool)> {
        match self.peek().cloned() {
            Some(RefTok::Num(n)) => {
                self.i += 1;
                self.note(&n);
                Some((n, false))
            }
            Some(RefTok::Op('(')) => {
                self.i += 1;
                let v = self.expr()?;
                if self.peek_op() != Some(')') {
                    return None;
                }
                self.i += 1;
                Some((v, true))
            }
            _ => None,
        }
    }
}

/// None : syntaxe refusée. Some((None, _)) : hors domaine (division par zéro...).
fn reference(s: &str) -> Option<(Option<BigRational>, f64)> {
    let mut r = Reference {
        t: ref_jetons(s)?,
        i: 0,
        hors_domaine: false,
        max_abs: 0.0,
    };
    let v = r.expr()?;
    if r.i != r.t.len() {
        return None;
    }
    Some(((!r.hors_domaine).then_some(v), r.max_abs))
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Littéraux exacts en binaire (le parsing f64 ne perd rien).
fn gen_litteral(rng: &mut Rng) -> String {
    const LITS: [&str; 14] = [
        "0", "1", "2", "3", "4", "5", "7", "9", "12", "10", "2.5", "0.25", "1.75", "3.125",
    ];
    LITS[rng.pick(LITS.len() as u32) as usize].to_string()
}

fn gen_prim(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 || rng.pick(3) != 0 {
        gen_litteral(rng)
    } else {
        format!("({})", gen_expr(rng, depth - 1))
    }
}

fn gen_puis(rng: &mut Rng, depth: usize) -> String {
    let p = gen_prim(rng, depth);
    if rng.pick(5) == 0 {
        format!("{p}^{}", rng.pick(4))
    } else {
        p
    }
}

fn gen_terme(rng: &mut Rng, depth: usize) -> String {
    let mut s = gen_puis(rng, depth);
    for _ in 0..rng.pick(3) {
        match rng.pick(4) {
            0 => s = format!("{s} * {}", gen_puis(rng, depth)),
            1 => s = format!("{s} / {}", gen_puis(rng, depth)),
            // juxtaposition : nombre ou ')' suivi de '('
            2 => s = format!("{s}({})", gen_expr(rng, depth.saturating_sub(1))),
            _ => {
                // ')' suivi d’un nombre
                if s.ends_with(')') {
                    s = format!("{s}{}", gen_litteral(rng));
                } else {
                    s = format!("{s} * {}", gen_puis(rng, depth));
                }
            }
        }
    }
    s
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    let mut s = gen_terme(rng, depth);
    for _ in 0..rng.pick(3) {
        let op = if rng.pick(2) == 0 { "+" } else { "-" };
        s = format!("{s} {op} {}", gen_terme(rng, depth));
    }
    s
}

/// Une mutation : insertion d’un jeton (entouré d’espaces) ou retrait d’un opérateur/parenthèse.
fn muter(rng: &mut Rng, s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if rng.pick(2) == 0 {
        const INSERTS: [&str; 7] = [" + ", " - ", " * ", " ^ ", " ( ", " ) ", " 7 "];
        let pos = rng.pick(chars.len() as u32 + 1) as usize;
        let ins = INSERTS[rng.pick(INSERTS.len() as u32) as usize];
        for (k, c) in ins.chars().enumerate() {
            chars.insert(pos + k, c);
        }
    } else {
        let candidats: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(_, c)| "+-*/^()".contains(**c))
            .map(|(i, _)| i)
            .collect();
        if !candidats.is_empty() {
            let k = candidats[rng.pick(candidats.len() as u32) as usize];
            chars.remove(k);
        }
    }
    chars.into_iter().collect()
}

fn eval_pipeline(s: &str) -> Result<f64, ErreurExpression> {
    let rpn = infix_to_postfix(s)?;
    evaluate_postfix(&rpn)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_reference_sur_exemples() {
    // la référence elle-même doit suivre les mêmes conventions
    let v = |s: &str| reference(s).and_then(|(v, _)| v).and_then(|r| r.to_f64());
    assert_eq!(v("(3+4)*2^3"), Some(56.0));
    assert_eq!(v("2^3^2"), Some(64.0));
    assert_eq!(v("8-2+1"), Some(7.0));
    assert_eq!(v("3(5+1)"), Some(18.0));
    assert_eq!(v("(5+1)3"), Some(18.0));
    assert_eq!(v("(3+1)(5+1)"), Some(24.0));
    assert_eq!(v("2.5+1.25"), Some(3.75));
    assert!(reference("3 4 +").is_none());
    assert!(reference("3++4").is_none());
}

#[test]
fn fuzz_safe_valeurs_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut compares = 0usize;
    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let (exact, max_abs) =
            reference(&expr).unwrap_or_else(|| panic!("référence refuse {expr:?}"));

        let v = eval_pipeline(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        let Some(exact) = exact else {
            continue; // division par zéro : IEEE côté f64, rien à comparer
        };
        let Some(attendu) = exact.to_f64() else {
            continue;
        };
        if !v.is_finite() || !attendu.is_finite() {
            continue;
        }

        let tol = 1e-6 * (1.0 + max_abs);
        assert!(
            (v - attendu).abs() <= tol,
            "expr={expr:?} : pipeline={v} référence={attendu} (tol={tol})"
        );
        compares += 1;
    }

    // sinon le fuzz ne “balaye” rien
    assert!(compares > 200, "trop peu de comparaisons: {compares}");
}

#[test]
fn fuzz_safe_acceptation_identique_apres_mutation() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..600 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 2);
        let expr = muter(&mut rng, &base);

        let accepte_ref = reference(&expr).is_some();
        match infix_to_postfix(&expr) {
            Ok(rpn) => {
                assert!(accepte_ref, "pipeline accepte, référence refuse: {expr:?}");
                // RPN validée => jamais de sous-débordement
                assert!(
                    !matches!(evaluate_postfix(&rpn), Err(ErreurExpression::SousDebordement)),
                    "sous-débordement sur {expr:?}"
                );
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    !accepte_ref,
                    "pipeline refuse ({e}), référence accepte: {expr:?}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 20, "trop peu d'erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..50 {
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);

        let ra = eval_pipeline(&ea).map(f64::to_bits);
        let rb = eval_pipeline(&eb).map(f64::to_bits);
        assert_eq!(ra, rb, "expr={ea:?}");
    }
}
