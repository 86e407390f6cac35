//! Lenient numeric parsing for hand-prepared office data
//!
//! Spreadsheet exports carry quantities like `"12 ea"` and prices like
//! `"$1,250.00"`. These helpers read the leading number of a cell and ignore
//! whatever follows, returning `None` when no digits lead the text.
//!
//! # Examples
//!
//! ```
//! use firetrack_core::numeric::{leading_int, parse_money};
//!
//! assert_eq!(leading_int("12 ea"), Some(12));
//! assert_eq!(parse_money("$1,250.50"), Some(1250.5));
//! assert_eq!(parse_money("n/a"), None);
//! ```

use serde::{Deserialize, Deserializer};

/// Byte length of an optional leading `+`/`-`
fn split_sign(s: &str) -> usize {
    match s.as_bytes().first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    }
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Parse the leading base-10 integer of `text`
pub fn leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let sign = split_sign(s);
    let digits = digit_run(bytes, sign);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parse the leading decimal number of `text`
///
/// Accepts an optional sign, an integer part, a fractional part and an
/// exponent, in the usual spreadsheet notation.
pub fn leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = split_sign(s);

    let int_digits = digit_run(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_start = end + 1;
        let exp_sign = split_sign(&s[exp_start..]);
        let exp_digits = digit_run(bytes, exp_start + exp_sign);
        if exp_digits > 0 {
            end = exp_start + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Parse a currency cell, stripping `$` and thousands separators first
pub fn parse_money(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    leading_float(&cleaned)
}

/// Serde helper for optional decimal columns
///
/// Hosted databases hand `numeric` columns back as JSON strings, so both
/// `12.5` and `"12.5"` are accepted. Text goes through [`parse_money`], so
/// spreadsheet cells such as `"$80,000.00"` read as `80000`. `null`, a blank
/// string or text without a leading number decode as `None`.
pub fn deserialize_opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => parse_money(&s),
        None => None,
    })
}

/// Serde helper for decimal form fields where blank means zero
pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_decimal(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("42"), Some(42));
        assert_eq!(leading_int("  -7 units"), Some(-7));
        assert_eq!(leading_int("3.9"), Some(3));
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int("-"), None);
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("12.5"), Some(12.5));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("5."), Some(5.0));
        assert_eq!(leading_float("1e3 each"), Some(1000.0));
        assert_eq!(leading_float("2e"), Some(2.0));
        assert_eq!(leading_float("-0.25"), Some(-0.25));
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float("USD 5"), None);
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("$1,234.56"), Some(1234.56));
        assert_eq!(parse_money("  $0.99"), Some(0.99));
        assert_eq!(parse_money(""), None);
    }

    #[test]
    fn test_deserialize_opt_decimal() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_opt_decimal")]
            amount: Option<f64>,
        }

        let row: Row = serde_json::from_str(r#"{"amount": 10}"#).unwrap();
        assert_eq!(row.amount, Some(10.0));
        let row: Row = serde_json::from_str(r#"{"amount": "10.25"}"#).unwrap();
        assert_eq!(row.amount, Some(10.25));
        let row: Row = serde_json::from_str(r#"{"amount": ""}"#).unwrap();
        assert_eq!(row.amount, None);
        let row: Row = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        assert_eq!(row.amount, None);
        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.amount, None);
    }

    #[test]
    fn test_deserialize_opt_decimal_money_text() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_opt_decimal")]
            amount: Option<f64>,
        }

        let row: Row = serde_json::from_str(r#"{"amount": "125,000"}"#).unwrap();
        assert_eq!(row.amount, Some(125_000.0));
        let row: Row = serde_json::from_str(r#"{"amount": "$80,000.00"}"#).unwrap();
        assert_eq!(row.amount, Some(80_000.0));
        let row: Row = serde_json::from_str(r#"{"amount": "-2.5"}"#).unwrap();
        assert_eq!(row.amount, Some(-2.5));
    }

    #[test]
    fn test_deserialize_decimal_or_zero() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default, deserialize_with = "deserialize_decimal_or_zero")]
            cost: f64,
        }

        let form: Form = serde_json::from_str(r#"{"cost": ""}"#).unwrap();
        assert_eq!(form.cost, 0.0);
        let form: Form = serde_json::from_str(r#"{"cost": "150"}"#).unwrap();
        assert_eq!(form.cost, 150.0);
    }
}
