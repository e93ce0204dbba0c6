//! Currency codes.
//!
//! A money changer trades whatever currencies the administrator configures,
//! so the code is a validated open set rather than a closed enum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid currency code: {0}")]
pub struct CurrencyCodeError(pub String);

/// ISO 4217-shaped currency code: exactly three ASCII letters, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyCodeError`] unless the input is exactly three ASCII
    /// letters (any case).
    pub fn parse(s: &str) -> Result<Self, CurrencyCodeError> {
        if s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(s.to_ascii_uppercase()))
        } else {
            Err(CurrencyCodeError(s.to_string()))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_normalizes_case() {
        assert_eq!(CurrencyCode::parse("usd").unwrap().as_str(), "USD");
        assert_eq!(CurrencyCode::parse("Idr").unwrap().as_str(), "IDR");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(CurrencyCode::parse("").is_err());
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("USDT").is_err());
        assert!(CurrencyCode::parse("U$D").is_err());
        assert!(CurrencyCode::parse("123").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            CurrencyCode::from_str("sgd").unwrap(),
            CurrencyCode::parse("SGD").unwrap()
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: CurrencyCode = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(ok.as_str(), "EUR");
        assert!(serde_json::from_str::<CurrencyCode>("\"EURO\"").is_err());
    }
}
