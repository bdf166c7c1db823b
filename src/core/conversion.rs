//! Cross-rate conversion between two currencies of one rate table

use crate::core::rates::RateTable;
use rust_decimal::prelude::*;
use std::fmt::Display;
use thiserror::Error;

/// Results at or below this magnitude are kept to six decimal places.
pub const SMALL_RESULT_THRESHOLD: f64 = 9.999000099990002e-05;

const SMALL_RESULT_PLACES: u32 = 6;
const DEFAULT_PLACES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::From => write!(f, "from"),
            Side::To => write!(f, "to"),
        }
    }
}

/// User-facing conversion failures. None of these change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Please do not leave any fields empty!")]
    EmptyFields,

    #[error("Please enter a positive number with no decimal in amount field!")]
    AmountNotInteger,

    #[error("Please enter an existing currency from the list!")]
    InvalidCurrency { side: Side },

    #[error("Please enter an existing currency from the list!")]
    ZeroResult,

    #[error("The converted amount is too large to display!")]
    ResultTooLarge,

    #[error("No exchange rate data has been loaded yet")]
    NoTable,
}

/// Validated user input for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: u64,
    pub from_code: String,
    pub to_code: String,
}

impl ConversionRequest {
    /// Validates the raw field values. The first failing check wins.
    pub fn parse(
        from_code: &str,
        to_code: &str,
        amount_text: &str,
    ) -> Result<Self, ConversionError> {
        if from_code.is_empty() || to_code.is_empty() || amount_text.is_empty() {
            return Err(ConversionError::EmptyFields);
        }
        if !is_all_digits(amount_text) {
            return Err(ConversionError::AmountNotInteger);
        }
        let amount = amount_text
            .parse::<u64>()
            .map_err(|_| ConversionError::AmountNotInteger)?;
        if is_all_digits(from_code) {
            return Err(ConversionError::InvalidCurrency { side: Side::From });
        }
        if is_all_digits(to_code) {
            return Err(ConversionError::InvalidCurrency { side: Side::To });
        }

        Ok(Self {
            amount,
            from_code: from_code.to_string(),
            to_code: to_code.to_string(),
        })
    }
}

/// A successful conversion, already rounded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: u64,
    pub from_code: String,
    pub to_code: String,
    pub value: Decimal,
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} is equal to {} {}",
            self.amount, self.from_code, self.value, self.to_code
        )
    }
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Rate of the last code in table order that contains `code`, or zero when
/// nothing matches.
///
/// Matching is by substring, so "USD" also hits a code like "AUSD" listed
/// after it.
pub fn find_rate(table: &RateTable, code: &str) -> f64 {
    table
        .iter()
        .filter(|(key, _)| key.contains(code))
        .last()
        .map_or(0.0, |(_, rate)| rate)
}

/// Rounds a raw conversion result for display.
///
/// Tiny results get six places, everything else two. Rounding happens on the
/// exact decimal expansion of the float, half to even. Returns `None` for
/// values a `Decimal` cannot hold.
pub fn check_result(raw: f64) -> Option<Decimal> {
    let exact = Decimal::from_f64_retain(raw)?;
    let places = if raw.abs() <= SMALL_RESULT_THRESHOLD {
        SMALL_RESULT_PLACES
    } else {
        DEFAULT_PLACES
    };
    let mut rounded = exact.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(places);
    Some(rounded)
}

/// Converts `request.amount` units of the `from` currency into the `to` currency.
pub fn convert(table: &RateTable, request: &ConversionRequest) -> Result<Conversion, ConversionError> {
    let rate_from = find_rate(table, &request.from_code);
    if rate_from == 0.0 {
        return Err(ConversionError::InvalidCurrency { side: Side::From });
    }
    let rate_to = find_rate(table, &request.to_code);
    if rate_to == 0.0 {
        return Err(ConversionError::InvalidCurrency { side: Side::To });
    }

    let raw = (rate_to / rate_from) * request.amount as f64;
    let value = check_result(raw).ok_or(ConversionError::ResultTooLarge)?;
    if value.is_zero() {
        return Err(ConversionError::ZeroResult);
    }

    Ok(Conversion {
        amount: request.amount,
        from_code: request.from_code.clone(),
        to_code: request.to_code.clone(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table(rates: &[(&str, f64)]) -> RateTable {
        RateTable::new(
            1760745600,
            rates
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        )
    }

    fn run(table: &RateTable, from: &str, to: &str, amount: &str) -> Result<Conversion, ConversionError> {
        let request = ConversionRequest::parse(from, to, amount)?;
        convert(table, &request)
    }

    #[test]
    fn test_parse_empty_fields_win_over_everything() {
        for (from, to, amount) in [
            ("", "EUR", "100"),
            ("USD", "", "100"),
            ("USD", "EUR", ""),
            ("", "", "12.5"),
            ("123", "", "abc"),
        ] {
            assert_eq!(
                ConversionRequest::parse(from, to, amount),
                Err(ConversionError::EmptyFields),
                "inputs: {from:?} {to:?} {amount:?}"
            );
        }
    }

    #[test]
    fn test_parse_amount_must_be_digits() {
        for amount in ["12.5", "-3", "1e3", " 10", "ten"] {
            assert_eq!(
                ConversionRequest::parse("USD", "EUR", amount),
                Err(ConversionError::AmountNotInteger)
            );
        }
        // Does not fit the amount type
        assert_eq!(
            ConversionRequest::parse("USD", "EUR", "99999999999999999999999"),
            Err(ConversionError::AmountNotInteger)
        );
    }

    #[test]
    fn test_parse_numeric_codes_rejected_in_order() {
        assert_eq!(
            ConversionRequest::parse("840", "978", "5"),
            Err(ConversionError::InvalidCurrency { side: Side::From })
        );
        assert_eq!(
            ConversionRequest::parse("USD", "978", "5"),
            Err(ConversionError::InvalidCurrency { side: Side::To })
        );
        let request = ConversionRequest::parse("US1", "EUR", "007").unwrap();
        assert_eq!(request.amount, 7);
        assert_eq!(request.from_code, "US1");
    }

    #[test]
    fn test_convert_usd_eur() {
        let rates = table(&[("USD", 1.0), ("EUR", 0.9)]);

        let forward = run(&rates, "USD", "EUR", "100").unwrap();
        assert_eq!(forward.value, dec!(90));
        assert_eq!(forward.to_string(), "100 USD is equal to 90.00 EUR");

        let back = run(&rates, "EUR", "USD", "1").unwrap();
        assert_eq!(back.value, dec!(1.11));
        assert_eq!(back.to_string(), "1 EUR is equal to 1.11 USD");
    }

    #[test]
    fn test_same_currency_returns_amount() {
        let rates = table(&[("USD", 1.0), ("JPY", 151.37)]);
        let result = run(&rates, "JPY", "JPY", "250").unwrap();
        assert_eq!(result.value, dec!(250));
    }

    #[test]
    fn test_round_trip_recovers_amount() {
        let rates = table(&[("USD", 1.0), ("GBP", 0.5), ("INR", 88.0)]);
        let forward = run(&rates, "USD", "GBP", "300").unwrap();
        assert_eq!(forward.value, dec!(150));
        let back = run(&rates, "GBP", "USD", &forward.value.trunc().to_string()).unwrap();
        assert_eq!(back.value, dec!(300));

        let to_inr = run(&rates, "GBP", "INR", "2").unwrap();
        assert_eq!(to_inr.value, dec!(352));
    }

    #[test]
    fn test_unknown_codes_are_invalid() {
        let rates = table(&[("USD", 1.0), ("EUR", 0.9)]);
        assert_eq!(
            run(&rates, "XYZ", "EUR", "10"),
            Err(ConversionError::InvalidCurrency { side: Side::From })
        );
        assert_eq!(
            run(&rates, "USD", "XYZ", "10"),
            Err(ConversionError::InvalidCurrency { side: Side::To })
        );
    }

    #[test]
    fn test_zero_rate_is_invalid() {
        let rates = table(&[("USD", 1.0), ("VEF", 0.0)]);
        assert_eq!(
            run(&rates, "VEF", "USD", "10"),
            Err(ConversionError::InvalidCurrency { side: Side::From })
        );
    }

    #[test]
    fn test_substring_lookup_last_match_wins() {
        let rates = table(&[("USD", 1.0), ("AUSD", 2.0), ("EUR", 0.5)]);
        assert_eq!(find_rate(&rates, "USD"), 2.0);
        assert_eq!(find_rate(&rates, "EU"), 0.5);
        assert_eq!(find_rate(&rates, "GBP"), 0.0);

        let result = run(&rates, "USD", "EUR", "8").unwrap();
        assert_eq!(result.value, dec!(2));
    }

    #[test]
    fn test_small_results_keep_six_places() {
        let rates = table(&[("USD", 1.0), ("BTC", 0.0000093)]);
        let result = run(&rates, "USD", "BTC", "1").unwrap();
        assert_eq!(result.value, dec!(0.000009));
        assert_eq!(result.to_string(), "1 USD is equal to 0.000009 BTC");
    }

    #[test]
    fn test_check_result_threshold() {
        assert_eq!(check_result(0.0000123456).unwrap().to_string(), "0.000012");
        assert_eq!(check_result(SMALL_RESULT_THRESHOLD).unwrap().scale(), 6);
        assert_eq!(check_result(0.0001).unwrap().to_string(), "0.00");
        assert_eq!(check_result(1234.5678).unwrap().to_string(), "1234.57");
        assert!(check_result(f64::NAN).is_none());
    }

    #[test]
    fn test_results_beyond_decimal_range() {
        let rates = table(&[("USD", 1.0), ("IRR", 42000.0), ("BTC", 0.0000093)]);
        assert_eq!(
            run(&rates, "BTC", "IRR", "18000000000000000000"),
            Err(ConversionError::ResultTooLarge)
        );
        assert_ne!(
            ConversionError::ResultTooLarge.to_string(),
            ConversionError::ZeroResult.to_string()
        );

        let fits = run(&rates, "BTC", "IRR", "1000000000000").unwrap();
        assert!(fits.value > dec!(4500000000000000000000));
    }

    #[test]
    fn test_results_rounding_to_zero_are_rejected() {
        let rates = table(&[("USD", 1.0), ("SHIB", 0.0000000004)]);
        assert_eq!(run(&rates, "USD", "SHIB", "1"), Err(ConversionError::ZeroResult));
        assert_eq!(run(&rates, "USD", "USD", "0"), Err(ConversionError::ZeroResult));
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::From.to_string(), "from");
        assert_eq!(Side::To.to_string(), "to");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConversionError::EmptyFields.to_string(),
            "Please do not leave any fields empty!"
        );
        assert_eq!(
            ConversionError::ZeroResult.to_string(),
            ConversionError::InvalidCurrency { side: Side::To }.to_string()
        );
    }
}
