//! The fixed currency table.
//!
//! Credit-note numbers encode a per-currency index (`00` = EUR,
//! `01` = USD), so the set of supported currencies is a closed table.
//! Adding a currency is a data change here, not a logic change
//! anywhere else.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A supported reporting currency.
///
/// Equality is by ISO code; the symbol and internal index ride along.
/// Serializes as the bare ISO code and deserializes through the table,
/// so an unsupported code is rejected at the boundary.
#[derive(Debug, Clone, Copy)]
pub struct Currency {
    /// ISO 4217 code, e.g. "EUR".
    pub iso_code: &'static str,
    /// Monetary symbol used when formatting amounts.
    pub monetary_symbol: &'static str,
    /// Index encoded into credit-note numbers (EUR = 0, USD = 1).
    pub internal_index: u8,
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.iso_code == other.iso_code
    }
}

impl Eq for Currency {}

pub const EUR: Currency = Currency {
    iso_code: "EUR",
    monetary_symbol: "€",
    internal_index: 0,
};

pub const USD: Currency = Currency {
    iso_code: "USD",
    monetary_symbol: "$",
    internal_index: 1,
};

/// All supported currencies, in internal-index order.
pub const CURRENCIES: &[Currency] = &[EUR, USD];

impl Currency {
    /// Look up a currency by ISO 4217 code, case-insensitively.
    /// Returns `None` for codes absent from the table.
    pub fn from_iso(code: &str) -> Option<Currency> {
        CURRENCIES
            .iter()
            .copied()
            .find(|c| c.iso_code.eq_ignore_ascii_case(code))
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.iso_code)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Currency::from_iso(&code)
            .ok_or_else(|| D::Error::custom(format!("currency '{code}' is not supported")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_currencies() {
        assert_eq!(Currency::from_iso("EUR"), Some(EUR));
        assert_eq!(Currency::from_iso("USD"), Some(USD));
        assert_eq!(Currency::from_iso("eur"), Some(EUR));
        assert_eq!(Currency::from_iso("usd"), Some(USD));
    }

    #[test]
    fn unknown_currencies() {
        assert_eq!(Currency::from_iso("GBP"), None);
        assert_eq!(Currency::from_iso(""), None);
        assert_eq!(Currency::from_iso("EURO"), None);
    }

    #[test]
    fn indices_match_position() {
        for (i, c) in CURRENCIES.iter().enumerate() {
            assert_eq!(c.internal_index as usize, i);
        }
    }

    #[test]
    fn equality_is_by_iso_code() {
        assert_eq!(EUR, EUR);
        assert_ne!(EUR, USD);
    }
}
