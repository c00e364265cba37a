use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currencies::Currency;
use super::error::AccountingError;

/// An amount of money in a specific currency.
///
/// Arithmetic is only defined between amounts of the same currency;
/// mixing currencies fails with [`AccountingError::CurrencyMismatch`]
/// instead of silently producing a meaningless number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Add another amount of the same currency.
    pub fn add(&self, other: &Money) -> Result<Money, AccountingError> {
        if self.currency != other.currency {
            return Err(AccountingError::CurrencyMismatch {
                left: self.currency.iso_code,
                right: other.currency.iso_code,
            });
        }
        Ok(Money::new(self.amount + other.amount, self.currency))
    }

    /// Sum a non-empty sequence of same-currency amounts.
    ///
    /// An empty sequence fails with [`AccountingError::EmptySum`]: there
    /// is no currency to express zero in.
    pub fn sum<I>(amounts: I) -> Result<Money, AccountingError>
    where
        I: IntoIterator<Item = Money>,
    {
        let mut iter = amounts.into_iter();
        let first = iter.next().ok_or(AccountingError::EmptySum)?;
        iter.try_fold(first, |acc, m| acc.add(&m))
    }

    /// The absolute value, keeping the currency.
    pub fn abs(&self) -> Money {
        Money::new(self.amount.abs(), self.currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    /// Formats as symbol + thousands-grouped amount: `€1,234.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = format!("{:.2}", self.amount);
        let (sign, digits) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

        let mut grouped = String::new();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        write!(
            f,
            "{}{}{}.{}",
            sign, self.currency.monetary_symbol, grouped, frac_part
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currencies::{EUR, USD};
    use rust_decimal_macros::dec;

    #[test]
    fn add_same_currency() {
        let a = Money::new(dec!(1.10), EUR);
        let b = Money::new(dec!(2.20), EUR);
        assert_eq!(a.add(&b).unwrap(), Money::new(dec!(3.30), EUR));
    }

    #[test]
    fn add_is_commutative() {
        let a = Money::new(dec!(7.31), EUR);
        let b = Money::new(dec!(0.19), EUR);
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn add_rejects_cross_currency() {
        let a = Money::new(dec!(1.00), EUR);
        let b = Money::new(dec!(1.00), USD);
        assert!(matches!(
            a.add(&b),
            Err(AccountingError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn sum_of_singleton_is_identity() {
        let a = Money::new(dec!(42.42), USD);
        assert_eq!(Money::sum([a]).unwrap(), a);
    }

    #[test]
    fn sum_of_empty_fails() {
        assert!(matches!(
            Money::sum(std::iter::empty()),
            Err(AccountingError::EmptySum)
        ));
    }

    #[test]
    fn sum_rejects_mixed_currencies() {
        let amounts = [Money::new(dec!(1), EUR), Money::new(dec!(2), USD)];
        assert!(matches!(
            Money::sum(amounts),
            Err(AccountingError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn abs_negates_negative() {
        let m = Money::new(dec!(-2.90), EUR);
        assert_eq!(m.abs(), Money::new(dec!(2.90), EUR));
        assert_eq!(m.abs().abs(), m.abs());
    }

    #[test]
    fn display_small_amount() {
        assert_eq!(Money::new(dec!(1), EUR).to_string(), "€1.00");
        assert_eq!(Money::new(dec!(-0.50), USD).to_string(), "-$0.50");
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::new(dec!(1234.5), EUR).to_string(), "€1,234.50");
        assert_eq!(Money::new(dec!(1234567.89), USD).to_string(), "$1,234,567.89");
    }
}
