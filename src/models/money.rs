//! Monetary helpers shared by the models and the calculation layer.
//!
//! Amounts are [`Decimal`] throughout. Anything that enters the engine from
//! the outside (typed text, JSON, YAML) goes through one of the coercions in
//! this module so that malformed or negative values become zero instead of
//! errors.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Largest amount accepted from the outside: one quadrillion currency units.
///
/// Every input amount is capped here, so sums and products of inputs stay far
/// inside the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Clamps an amount into `0..=MAX_AMOUNT`.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{MAX_AMOUNT, clamp_amount};
/// use rust_decimal::Decimal;
///
/// assert_eq!(clamp_amount(Decimal::new(-150, 0)), Decimal::ZERO);
/// assert_eq!(clamp_amount(Decimal::new(150, 0)), Decimal::new(150, 0));
/// assert_eq!(clamp_amount(Decimal::MAX), MAX_AMOUNT);
/// ```
pub fn clamp_amount(amount: Decimal) -> Decimal {
    if amount.is_sign_negative() {
        Decimal::ZERO
    } else if amount > MAX_AMOUNT {
        MAX_AMOUNT
    } else {
        amount
    }
}

/// Parses a user-entered amount.
///
/// Surrounding whitespace and space-grouped thousands (`"200 000"`) are
/// accepted. Text that does not parse, and negative values, yield zero.
/// Amounts above [`MAX_AMOUNT`] are capped.
///
/// # Example
///
/// ```
/// use payslip_engine::models::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("200 000"), Decimal::new(200_000, 0));
/// assert_eq!(parse_amount("12.50"), Decimal::new(1250, 2));
/// assert_eq!(parse_amount("abc"), Decimal::ZERO);
/// assert_eq!(parse_amount("-40"), Decimal::ZERO);
/// ```
pub fn parse_amount(text: &str) -> Decimal {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .parse::<Decimal>()
        .map(clamp_amount)
        .unwrap_or(Decimal::ZERO)
}

/// Rounds an amount to the nearest whole currency unit, halves away from zero.
pub fn round_to_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display: whole units, thousands grouped by spaces.
///
/// # Example
///
/// ```
/// use payslip_engine::models::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(1_234_567, 0)), "1 234 567");
/// assert_eq!(format_amount(Decimal::new(112_005, 1)), "11 201");
/// assert_eq!(format_amount(Decimal::ZERO), "0");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_to_unit(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats an amount followed by a currency label, e.g. `"21 250 FCFA"`.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    format!("{} {}", format_amount(amount), currency)
}

/// Serde helper that deserializes an amount without ever failing.
///
/// Numbers and numeric strings are accepted; negative values clamp to zero;
/// `null`, non-numeric strings and any other shape become zero. Combine with
/// `#[serde(default)]` so missing fields are zero as well.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Amount(Decimal),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Amount(value) => clamp_amount(value),
        RawAmount::Text(text) => parse_amount(&text),
        RawAmount::Other(_) => Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "lenient_amount")]
        amount: Decimal,
    }

    fn lenient(json: &str) -> Decimal {
        serde_json::from_str::<Wrapper>(json).unwrap().amount
    }

    #[test]
    fn test_clamp_amount_keeps_zero_and_positive() {
        assert_eq!(clamp_amount(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(clamp_amount(dec("0.01")), dec("0.01"));
        assert_eq!(clamp_amount(dec("-0.01")), Decimal::ZERO);
    }

    #[test]
    fn test_max_amount_is_one_quadrillion() {
        assert_eq!(MAX_AMOUNT, dec("1000000000000000"));
        assert_eq!(clamp_amount(MAX_AMOUNT), MAX_AMOUNT);
        assert_eq!(clamp_amount(dec("1000000000000000.01")), MAX_AMOUNT);
    }

    #[test]
    fn test_huge_amounts_are_capped() {
        assert_eq!(parse_amount("79228162514264337593543950335"), MAX_AMOUNT);
        assert_eq!(lenient(r#"{"amount": "79228162514264337593543950335"}"#), MAX_AMOUNT);
    }

    #[test]
    fn test_parse_amount_coerces_garbage_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("  "), Decimal::ZERO);
        assert_eq!(parse_amount("12,5"), Decimal::ZERO);
        assert_eq!(parse_amount("1 500 000"), dec("1500000"));
        assert_eq!(parse_amount(" 75000 "), dec("75000"));
    }

    #[test]
    fn test_round_to_unit_rounds_half_away_from_zero() {
        assert_eq!(round_to_unit(dec("21250.5")), dec("21251"));
        assert_eq!(round_to_unit(dec("21250.49")), dec("21250"));
        assert_eq!(round_to_unit(dec("0.5")), dec("1"));
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(dec("999")), "999");
        assert_eq!(format_amount(dec("1000")), "1 000");
        assert_eq!(format_amount(dec("200000.00")), "200 000");
        assert_eq!(format_amount(dec("-4900")), "-4 900");
    }

    #[test]
    fn test_format_currency_appends_label() {
        assert_eq!(format_currency(dec("21250"), "FCFA"), "21 250 FCFA");
    }

    #[test]
    fn test_lenient_amount_accepts_numbers_and_numeric_strings() {
        assert_eq!(lenient(r#"{"amount": 200000}"#), dec("200000"));
        assert_eq!(lenient(r#"{"amount": "12500.50"}"#), dec("12500.50"));
    }

    #[test]
    fn test_lenient_amount_coerces_invalid_values_to_zero() {
        assert_eq!(lenient(r#"{"amount": "n/a"}"#), Decimal::ZERO);
        assert_eq!(lenient(r#"{"amount": null}"#), Decimal::ZERO);
        assert_eq!(lenient(r#"{"amount": true}"#), Decimal::ZERO);
        assert_eq!(lenient(r#"{"amount": -300}"#), Decimal::ZERO);
        assert_eq!(lenient(r#"{}"#), Decimal::ZERO);
    }
}
