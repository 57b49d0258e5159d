use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A value as typed into a form control: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

fn skip_digits(bytes: &[u8], mut at: usize, radix: u32) -> usize {
    while bytes.get(at).is_some_and(|b| (*b as char).is_digit(radix)) {
        at += 1;
    }
    at
}

/// Longest decimal-literal prefix of `text`: optional sign, then `Infinity`
/// or digits with an optional fraction and exponent. Empty when there is none.
fn decimal_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text[end..].starts_with("Infinity") {
        return &text[..end + "Infinity".len()];
    }

    let int_end = skip_digits(bytes, end, 10);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1, 10);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return "";
    }

    // an exponent counts only when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp, 10);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &text[..end]
}

/// Reads `text` the way a form input is read: leading whitespace is skipped
/// and the longest numeric prefix is used, so `"12abc"` reads as 12.
fn leading_number(text: &str) -> Option<f64> {
    let prefix = decimal_prefix(text.trim_start());
    if prefix.is_empty() {
        return None;
    }
    prefix.parse::<f64>().ok()
}

/// Leading integer of `text`: optional sign, then decimal digits, or hex
/// digits after `0x`. `"1e3"` reads as 1.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let negative = bytes.first() == Some(&b'-');

    let rest = &text[sign..];
    let (radix, start) = if rest.starts_with("0x") || rest.starts_with("0X") {
        (16, sign + 2)
    } else {
        (10, sign)
    };

    let end = skip_digits(bytes, start, radix);
    if end == start {
        return None;
    }

    let magnitude = i64::from_str_radix(&text[start..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Reads a numeric field, falling back to `default` when it is absent,
/// blank, unparsable or not finite.
pub fn parse_or_default(raw: Option<&RawField>, default: f64) -> f64 {
    let parsed = match raw {
        None => None,
        Some(RawField::Number(n)) => Some(*n),
        Some(RawField::Text(t)) if t.trim().is_empty() => None,
        Some(RawField::Text(t)) => leading_number(t),
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => default,
    }
}

/// Integer variant of [`parse_or_default`]. Text is read up to its first
/// non-digit; numbers are truncated.
pub fn parse_int_or_default(raw: Option<&RawField>, default: i64) -> i64 {
    let parsed = match raw {
        None => None,
        Some(RawField::Number(n)) if n.is_finite() && n.abs() < 9.0e18 => Some(n.trunc() as i64),
        Some(RawField::Number(_)) => None,
        Some(RawField::Text(t)) => leading_integer(t),
    };
    parsed.unwrap_or(default)
}

/// Rounds half toward positive infinity (`-2.5` becomes `-2`).
pub fn js_round(x: f64) -> f64 {
    // f64::round sends ties away from zero; negative ties go back up one
    let r = x.round();
    if x - r == 0.5 { r + 1.0 } else { r }
}

/// Two-decimal fixed-point string used for money subfields. Exact ties round
/// away from zero and `-0` prints unsigned.
pub fn fixed2(x: f64) -> String {
    let sign = if x < 0.0 { "-" } else { "" };
    let magnitude = x.abs();

    // a binary float sits exactly halfway between two cents only when it is
    // an odd number of eighths
    let eighths = magnitude * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (magnitude * 100.0).ceil();
        return format!("{}{:.2}", sign, cents / 100.0);
    }

    format!("{}{:.2}", sign, magnitude)
}

/// Number printed the way the payroll schema expects: integral values carry
/// no fraction and negative zero prints as `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsNumber(pub f64);

impl JsNumber {
    fn as_integral(&self) -> Option<i128> {
        let x = self.0;
        if x.is_finite() && x.fract() == 0.0 && x.abs() < 1.0e21 {
            Some(x as i128)
        } else {
            None
        }
    }
}

impl fmt::Display for JsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_integral() {
            Some(i) => write!(f, "{}", i),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for JsNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integral() {
            Some(i) => serializer.serialize_i128(i),
            None => serializer.serialize_f64(self.0),
        }
    }
}

/// Shorthand for `JsNumber(x).to_string()`.
pub fn number_string(x: f64) -> String {
    JsNumber(x).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_blank_fall_back_to_default() {
        assert_eq!(parse_or_default(None, 4.0), 4.0);
        assert_eq!(parse_or_default(Some(&"".into()), 4.0), 4.0);
        assert_eq!(parse_or_default(Some(&"   ".into()), 25.0), 25.0);
    }

    #[test]
    fn unparsable_text_falls_back_to_default() {
        assert_eq!(parse_or_default(Some(&"abc".into()), 30.0), 30.0);
        assert_eq!(parse_or_default(Some(&"NaN".into()), 30.0), 30.0);
        assert_eq!(parse_or_default(Some(&"Infinity".into()), 0.0), 0.0);
    }

    #[test]
    fn text_is_read_by_its_numeric_prefix() {
        assert_eq!(parse_or_default(Some(&"3000000".into()), 0.0), 3_000_000.0);
        assert_eq!(parse_or_default(Some(&" 12.5kg".into()), 0.0), 12.5);
        assert_eq!(parse_or_default(Some(&"-7".into()), 0.0), -7.0);
        assert_eq!(parse_or_default(Some(&"1e3x".into()), 0.0), 1000.0);
        assert_eq!(parse_or_default(Some(&"1e+x".into()), 0.0), 1.0);
        assert_eq!(parse_or_default(Some(&".5".into()), 0.0), 0.5);
        assert_eq!(parse_or_default(Some(&"5.".into()), 0.0), 5.0);
        assert_eq!(parse_or_default(Some(&"-.5e1z".into()), 0.0), -5.0);
        assert_eq!(parse_or_default(Some(&".".into()), 9.0), 9.0);
        assert_eq!(parse_or_default(Some(&"+".into()), 9.0), 9.0);
        assert_eq!(parse_or_default(Some(&"inf".into()), 9.0), 9.0);
    }

    #[test]
    fn long_digit_runs_followed_by_junk_read_in_one_pass() {
        let text = format!("{}{}", "1".repeat(200_000), "x".repeat(200_000));
        // the prefix overflows to infinity, which falls back
        assert_eq!(parse_or_default(Some(&text.as_str().into()), 7.0), 7.0);

        let text = format!("{}{}", "1".repeat(10), "x".repeat(200_000));
        assert_eq!(parse_or_default(Some(&text.as_str().into()), 7.0), 1_111_111_111.0);
    }

    #[test]
    fn explicit_zero_is_kept() {
        assert_eq!(parse_or_default(Some(&0.0.into()), 4.0), 0.0);
        assert_eq!(parse_or_default(Some(&"0".into()), 4.0), 0.0);
    }

    #[test]
    fn integers_truncate_and_default() {
        assert_eq!(parse_int_or_default(Some(&"2.9".into()), 1), 2);
        assert_eq!(parse_int_or_default(Some(&"x".into()), 1), 1);
        assert_eq!(parse_int_or_default(None, 1), 1);
        assert_eq!(parse_int_or_default(Some(&2.9.into()), 1), 2);
    }

    #[test]
    fn integers_stop_at_the_first_non_digit() {
        assert_eq!(parse_int_or_default(Some(&"1e3".into()), 7), 1);
        assert_eq!(parse_int_or_default(Some(&" -12abc".into()), 7), -12);
        assert_eq!(parse_int_or_default(Some(&"0x1A".into()), 7), 26);
        assert_eq!(parse_int_or_default(Some(&"".into()), 7), 7);
        assert_eq!(parse_int_or_default(Some(&"-".into()), 7), 7);
        assert_eq!(parse_int_or_default(Some(&"99999999999999999999".into()), 7), 7);
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(js_round(2.5), 3.0);
        assert_eq!(js_round(-2.5), -2.0);
        assert_eq!(js_round(119_999.6), 120_000.0);
        assert_eq!(js_round(-0.5), 0.0);
        assert_eq!(js_round(-1.2), -1.0);
    }

    #[test]
    fn rounding_has_no_addition_error() {
        assert_eq!(js_round(0.49999999999999994), 0.0);
        assert_eq!(js_round(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
    }

    #[test]
    fn numbers_print_without_trailing_fraction() {
        assert_eq!(number_string(45.0), "45");
        assert_eq!(number_string(-0.0), "0");
        assert_eq!(number_string(12.5), "12.5");
        assert_eq!(fixed2(1500.0), "1500.00");
        assert_eq!(serde_json::to_string(&JsNumber(45.0)).unwrap(), "45");
        assert_eq!(serde_json::to_string(&JsNumber(0.25)).unwrap(), "0.25");
    }

    #[test]
    fn large_integers_print_in_full() {
        assert_eq!(number_string(1.0e16), "10000000000000000");
        assert_eq!(
            serde_json::to_string(&JsNumber(1.0e16)).unwrap(),
            "10000000000000000"
        );
        assert_eq!(
            serde_json::to_string(&JsNumber(-9.0e15)).unwrap(),
            "-9000000000000000"
        );
    }

    #[test]
    fn money_ties_round_away_from_zero() {
        assert_eq!(fixed2(10.125), "10.13");
        assert_eq!(fixed2(0.375), "0.38");
        assert_eq!(fixed2(0.125), "0.13");
        assert_eq!(fixed2(-10.125), "-10.13");
        // 1.005 is stored just below the tie
        assert_eq!(fixed2(1.005), "1.00");
        assert_eq!(fixed2(2.345), "2.35");
    }

    #[test]
    fn money_drops_the_sign_of_negative_zero() {
        assert_eq!(fixed2(-0.0), "0.00");
        assert_eq!(fixed2(-0.001), "-0.00");
        assert_eq!(fixed2(-12.5), "-12.50");
    }
}
