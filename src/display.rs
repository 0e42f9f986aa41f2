//! Conversion between calculator numbers and text.

use crate::Problem;

/// Fractional digits shown when no other precision is configured
pub const DEFAULT_PRECISION: usize = 10;

/// Render a result for the calculator display
///
/// Whole numbers have no fractional part, other values have at most `precision`
/// fractional digits with trailing zeros removed. NaN and the infinities are
/// shown as `NaN`, `∞` and `-∞` so that they're never mistaken for numbers.
///
/// ```
/// use rpncalc::display::format_number;
/// assert_eq!(format_number(4.0, 10), "4");
/// assert_eq!(format_number(0.1 + 0.2, 10), "0.3");
/// assert_eq!(format_number(1.0 / 0.0, 10), "∞");
/// ```
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "∞" } else { "-∞" }.to_owned();
    }
    if value.fract() == 0.0 {
        // Also folds -0 into 0
        return if value == 0.0 {
            "0".to_owned()
        } else {
            format!("{value}")
        };
    }

    let fixed = format!("{value:.precision$}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        _ => trimmed.to_owned(),
    }
}

/// Parse a number typed or stored as text
///
/// Surrounding whitespace and the digit separators `_` and `,` are ignored.
/// The special values written by Rust's float formatting (`NaN`, `inf`, `-inf`)
/// are accepted so that any operand can be stored and read back exactly.
pub fn parse_number(text: &str) -> Result<f64, Problem> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | ','))
        .collect();
    if digits.is_empty() {
        return Err(Problem::BadNumber(text.to_owned()));
    }
    digits
        .parse()
        .map_err(|_| Problem::BadNumber(text.to_owned()))
}

/// Could this text name a variable?
///
/// A name starts with a letter, the rest are letters, digits or `_`.
pub fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic())
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
