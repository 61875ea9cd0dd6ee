//! Token-level grammars for the built-in column types.
//!
//! Each predicate decides whether a single non-missing token is a valid
//! literal of one type; the matching `parse_*` function converts a token the
//! predicate accepted. Missing cells never reach these functions; callers
//! represent them as `None` and handle them before consulting a grammar.

use std::str::FromStr;

/// Accepted logical literals, exact and case-sensitive.
const TRUE_LITERALS: &[&str] = &["TRUE", "T", "True", "true", "1"];
const FALSE_LITERALS: &[&str] = &["FALSE", "F", "False", "false", "0"];

/// True when `token` is one of the accepted logical spellings.
pub fn is_logical(token: &str) -> bool {
    TRUE_LITERALS.contains(&token) || FALSE_LITERALS.contains(&token)
}

/// Converts a logical literal; `None` when the token is not in the set.
pub fn parse_logical(token: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&token) {
        Some(true)
    } else if FALSE_LITERALS.contains(&token) {
        Some(false)
    } else {
        None
    }
}

/// True when `token` is an optional sign followed by one or more decimal
/// digits and nothing else. No separators, no decimal point, no exponent.
pub fn is_integer(token: &str) -> bool {
    let digits = token
        .strip_prefix(['+', '-'])
        .unwrap_or(token)
        .as_bytes();
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

/// Converts an integer literal to `i64`. Returns `None` both for tokens the
/// grammar rejects and for tokens whose value does not fit in an `i64`; the
/// caller distinguishes the two via [`is_integer`] when it matters.
pub fn parse_integer(token: &str) -> Option<i64> {
    if !is_integer(token) {
        return None;
    }
    i64::from_str(token).ok()
}

/// Special floating-point tokens; `Inf` and `Infinity` also accept a sign.
fn is_double_special(token: &str) -> bool {
    let body = token.strip_prefix(['+', '-']).unwrap_or(token);
    matches!(body, "Inf" | "Infinity") || token == "NaN"
}

/// True when `token` is a floating-point literal: optional sign, digits,
/// optional decimal point with trailing digits, optional exponent, or one
/// of the special tokens `NaN`, `Inf`, `Infinity`.
pub fn is_double(token: &str) -> bool {
    if is_double_special(token) {
        return true;
    }

    let mut rest = token.strip_prefix(['+', '-']).unwrap_or(token);
    let int_digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if int_digits == 0 {
        return false;
    }
    rest = &rest[int_digits..];

    if let Some(frac) = rest.strip_prefix('.') {
        let frac_digits = frac.bytes().take_while(u8::is_ascii_digit).count();
        if frac_digits == 0 {
            return false;
        }
        rest = &frac[frac_digits..];
    }

    if let Some(exp) = rest.strip_prefix(['e', 'E']) {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        let exp_digits = exp.bytes().take_while(u8::is_ascii_digit).count();
        if exp_digits == 0 {
            return false;
        }
        rest = &exp[exp_digits..];
    }

    rest.is_empty()
}

/// Converts a floating-point literal. `f64::from_str` accepts every token
/// [`is_double`] admits, including the NaN/infinity spellings.
pub fn parse_double(token: &str) -> Option<f64> {
    if !is_double(token) {
        return None;
    }
    f64::from_str(token).ok()
}
