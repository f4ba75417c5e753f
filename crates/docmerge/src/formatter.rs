//! Value formatting and HTML escaping.
//!
//! Every resolved variable goes through [`format_value`] and then
//! [`escape_html`] before it reaches the output.
//!
//! Hint inference from the last path segment:
//!
//! | last segment                                                  | hint       |
//! |---------------------------------------------------------------|------------|
//! | `amount` `price` `budget` `total` `cost` (exact, any case)     | `Currency` |
//! | ends with `Amount` `Price` `Budget` `Total` `Cost`             | `Currency` |
//! | ends with `_amount` `_price` `_budget` `_total` `_cost`        | `Currency` |
//! | `date` (any case), ends with `Date` or `_date`                 | `Date`     |
//! | anything else                                                 | `Plain`    |
//!
//! An explicit hint in [`RenderOptions`] for the full path wins over the
//! table.

use std::fmt::{Display, Formatter, Result as FmtResult, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::options::{DEFAULT_DATE_FORMAT, RenderOptions};
use crate::types::Value;

const CURRENCY_SUFFIXES: [&str; 5] = ["Amount", "Price", "Budget", "Total", "Cost"];
const DATE_SUFFIXES: [&str; 1] = ["Date"];

/// How a resolved value is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    /// Two decimals with the configured currency symbol.
    Currency,
    /// The configured calendar-date format.
    Date,
    /// Plain string conversion.
    Plain,
}

impl Display for FormatHint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            FormatHint::Currency => "currency",
            FormatHint::Date => "date",
            FormatHint::Plain => "plain",
        })
    }
}

/// Infers a hint from the naming convention of the last path segment.
pub fn infer_hint(path: &str) -> FormatHint {
    let segment = path.rsplit('.').next().unwrap_or(path);
    if CURRENCY_SUFFIXES
        .iter()
        .any(|suffix| segment_matches(segment, suffix))
    {
        FormatHint::Currency
    } else if DATE_SUFFIXES
        .iter()
        .any(|suffix| segment_matches(segment, suffix))
    {
        FormatHint::Date
    } else {
        FormatHint::Plain
    }
}

/// The hint used for `path`: an explicit override, else the inferred one.
pub fn hint_for(path: &str, options: &RenderOptions) -> FormatHint {
    options
        .hint_override(path)
        .unwrap_or_else(|| infer_hint(path))
}

fn segment_matches(segment: &str, suffix: &str) -> bool {
    if segment.eq_ignore_ascii_case(suffix) {
        return true;
    }
    if segment.len() > suffix.len() && segment.ends_with(suffix) {
        return true;
    }
    let snake = format!("_{}", suffix.to_ascii_lowercase());
    segment.len() > snake.len() && segment.to_ascii_lowercase().ends_with(&snake)
}

/// Formats a value for output. `None` formats as [`FormatHint::Plain`].
///
/// Dates always use the configured date format. Under a currency hint,
/// numbers and numeric strings become amounts; under a date hint, ISO dates
/// and RFC 3339 timestamps become dates. Anything that does not fit its hint
/// falls back to plain conversion. `Null` is always empty.
///
/// ```
/// use docmerge::formatter::{FormatHint, format_value};
/// use docmerge::{RenderOptions, Value};
///
/// let options = RenderOptions::builder().currency_symbol("$").build();
/// assert_eq!(format_value(&Value::from(1234.5), Some(FormatHint::Currency), &options), "$1234.50");
/// assert_eq!(format_value(&Value::from("2024-03-05T09:30:00Z"), Some(FormatHint::Date), &options), "2024-03-05");
/// assert_eq!(format_value(&Value::from(2.5), None, &options), "2.5");
/// ```
pub fn format_value(value: &Value, hint: Option<FormatHint>, options: &RenderOptions) -> String {
    if let Value::Date(date) = value {
        return format_date(*date, options.date_format());
    }
    match hint.unwrap_or(FormatHint::Plain) {
        FormatHint::Currency => currency_cents(value)
            .map(|cents| format_cents(cents, options.currency_symbol()))
            .unwrap_or_else(|| value.to_string()),
        FormatHint::Date => value
            .as_str()
            .and_then(parse_date)
            .map(|date| format_date(date, options.date_format()))
            .unwrap_or_else(|| value.to_string()),
        FormatHint::Plain => value.to_string(),
    }
}

/// Whole cents of a currency value. Integers convert exactly.
fn currency_cents(value: &Value) -> Option<i128> {
    match value {
        Value::Integer(n) => Some(i128::from(*n) * 100),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(amount_to_cents),
        _ => value.as_f64().and_then(amount_to_cents),
    }
}

/// Rounds to whole cents, half away from zero. The integral part is split off
/// first so large amounts keep their fractional cents.
fn amount_to_cents(amount: f64) -> Option<i128> {
    if !amount.is_finite() {
        return None;
    }
    let whole = amount.trunc();
    let fraction = ((amount - whole) * 100.0).round();
    Some((whole as i128).saturating_mul(100).saturating_add(fraction as i128))
}

/// Formats an amount with exactly two decimals, rounding half away from zero.
///
/// The minus sign goes before the symbol: `-$5.00`. Non-finite amounts
/// format as plain numbers.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    match amount_to_cents(amount) {
        Some(cents) => format_cents(cents, symbol),
        None => amount.to_string(),
    }
}

fn format_cents(cents: i128, symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{sign}{symbol}{}.{:02}",
        cents.div_euclid(100),
        cents.rem_euclid(100)
    )
}

/// Formats a date, falling back to ISO when `format` is not a valid
/// `strftime` string.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    out
}

/// Returns true if `format` contains only valid `strftime` items.
pub fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| item != Item::Error)
}

/// Parses `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps, dropping any time of day.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| text.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

/// Escapes `&`, `<`, `>`, `"` and `'` for safe insertion into HTML.
///
/// ```
/// use docmerge::formatter::escape_html;
///
/// assert_eq!(escape_html("<script>alert('x')</script>"), "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(500.0, ""), "500.00");
        assert_eq!(format_currency(0.125, "$"), "$0.13");
        assert_eq!(format_currency(-0.125, "$"), "-$0.13");
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
        assert_eq!(format_currency(1999.999, "£"), "£2000.00");
    }

    #[test]
    fn large_amounts_keep_exact_cents() {
        assert_eq!(format_currency(4503599627370495.5, "$"), "$4503599627370495.50");
        assert_eq!(format_currency(-4503599627370495.5, "$"), "-$4503599627370495.50");
        assert_eq!(currency_cents(&Value::Integer(9007199254740993)), Some(900719925474099300));
        assert_eq!(
            format_value(
                &Value::Integer(i64::MIN),
                Some(FormatHint::Currency),
                &RenderOptions::default()
            ),
            "-9223372036854775808.00"
        );
    }

    #[test]
    fn snake_case_suffix_needs_a_prefix() {
        assert!(segment_matches("line_total", "Total"));
        assert!(!segment_matches("_total", "Total"));
        assert!(!segment_matches("subtotal", "Total"));
    }

    #[test]
    fn invalid_date_format_falls_back_to_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(!is_valid_date_format("%Q"));
        assert_eq!(format_date(date, "%Q"), "2024-03-05");
        assert_eq!(format_date(date, "%d.%m.%Y"), "05.03.2024");
    }
}
