// src/noyau/format.rs

use super::jetons::Tok;

/// Précision des opérandes dans une RPN rendue (compatible "%.16g").
pub const CHIFFRES_RPN: usize = 16;

/* ------------------------ Nombres (%.Pg) ------------------------ */

fn sans_zeros_finaux(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Équivalent de printf("%.*g", chiffres, v) :
/// - exposant décimal X (après arrondi à `chiffres` chiffres significatifs)
/// - -4 <= X < chiffres  => notation fixe
/// - sinon               => d.ddde±XX
/// - zéros finaux (et point final) retirés
pub fn format_nombre(v: f64, chiffres: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let p = chiffres.max(1);
    let p_i32 = i32::try_from(p).unwrap_or(i32::MAX);

    // "{:.Ne}" donne "d.ddddde-X" : l’exposant est déjà celui de la valeur arrondie
    let sci = format!("{:.*e}", p - 1, v);
    let Some((mantisse, exposant)) = sci.split_once('e') else {
        return sci;
    };
    let x: i32 = exposant.parse().unwrap_or(0);

    if x < -4 || x >= p_i32 {
        let signe = if x < 0 { '-' } else { '+' };
        format!("{}e{signe}{:02}", sans_zeros_finaux(mantisse), x.abs())
    } else {
        let decimales = usize::try_from(p_i32 - 1 - x).unwrap_or(0);
        sans_zeros_finaux(&format!("{v:.decimales$}")).to_string()
    }
}

/* ------------------------ Jetons ------------------------ */

/// Liste de jetons en texte, séparés par des espaces.
/// Nombres en %.16g, opérateurs/parenthèses par leur symbole.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(v) => format_nombre(*v, CHIFFRES_RPN),
            Tok::Op(op) => op.symbole().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
