//! Calculatrice postfixe : infixe (+ - * / ^, parenthèses) -> RPN -> f64.
//!
//! ```
//! use calculatrice_postfixe::noyau::{evaluate_postfix, format_postfix, infix_to_postfix};
//!
//! let rpn = infix_to_postfix("(3+4)*2^3").unwrap();
//! assert_eq!(format_postfix(&rpn), "3 4 + 2 3 ^ *");
//! assert_eq!(evaluate_postfix(&rpn).unwrap(), 56.0);
//! ```

pub mod noyau;
