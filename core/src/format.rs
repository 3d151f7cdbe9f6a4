//! Locale formatting for the dashboard: Brazilian Real amounts and
//! `DD/MM/YYYY` dates, plus the parsers for the string-typed wire fields.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use numfmt::{Formatter, Precision};

/// Currency symbol followed by a no-break space, as pt-BR renders it.
const CURRENCY_PREFIX: &str = "R$\u{a0}";

/// Largest magnitude `format_currency` accepts. Keeps the amount in cents
/// exactly representable as an `f64`.
pub const MAX_AMOUNT: f64 = 1e12;

/// Format `value` as Brazilian Real, e.g. `1000.5` -> `"R$ 1.000,50"`.
///
/// Rounds half away from zero to the cent. The sign is kept (`-R$ 10,00`) and
/// anything that rounds to zero cents renders as `R$ 0,00`. Returns `None`
/// for non-finite values and magnitudes above [`MAX_AMOUNT`].
pub fn format_currency(value: f64) -> Option<String> {
    if !value.is_finite() || value.abs() > MAX_AMOUNT {
        return None;
    }

    let cents = (value * 100.0).round();
    let negative = cents < 0.0;
    let cents = cents.abs();
    let units = (cents / 100.0).trunc();
    let fraction = cents - units * 100.0;

    // numfmt only groups the integer part; pt-BR swaps its `,` for `.`.
    let units = units_formatter()?.fmt_string(units).replace(',', ".");

    let sign = if negative { "-" } else { "" };
    Some(format!("{sign}{CURRENCY_PREFIX}{units},{fraction:02.0}"))
}

fn units_formatter() -> Option<&'static Formatter> {
    static FORMATTER: OnceLock<Option<Formatter>> = OnceLock::new();

    FORMATTER
        .get_or_init(|| {
            Formatter::new()
                .separator(',')
                .ok()
                .map(|formatter| formatter.precision(Precision::Decimals(0)))
        })
        .as_ref()
}

/// Format the calendar day (UTC) of `timestamp` as `DD/MM/YYYY`.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d/%m/%Y").to_string()
}

/// Parse a decimal-as-string amount. Blank and non-finite input is rejected.
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}
