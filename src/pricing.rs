//! Pricing
//!
//! Minor-unit money arithmetic shared by the cart aggregate.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A multiplication or sum left the `i64` minor-unit range.
    #[error("price calculation overflowed")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total(
    unit_price: &Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sum a sequence of amounts, starting from zero in `currency`.
///
/// # Errors
///
/// - [`PricingError::Money`]: an amount is in a different currency.
/// - [`PricingError::Overflow`]: the sum left the minor-unit range.
pub fn total_price<I>(
    amounts: I,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError>
where
    I: IntoIterator<Item = Result<Money<'static, Currency>, PricingError>>,
{
    amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| {
            let amount = amount?;

            if amount.currency() != currency {
                return Err(PricingError::Money(MoneyError::CurrencyMismatch {
                    expected: currency.iso_alpha_code,
                    actual: amount.currency().iso_alpha_code,
                }));
            }

            acc.to_minor_units()
                .checked_add(amount.to_minor_units())
                .map(|minor| Money::from_minor(minor, currency))
                .ok_or(PricingError::Overflow)
        })
}

/// Apply a percentage to an amount, rounding half away from zero to minor units.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the result cannot be represented.
pub fn percent_of(
    amount: &Money<'static, Currency>,
    percent: &Percentage,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = percent_of_minor(percent, amount.to_minor_units())?;

    Ok(Money::from_minor(minor, amount.currency()))
}

/// Calculate a percentage of a minor unit amount.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] on overflow.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage does not expose the inner Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, GBP};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_total_multiplies_unit_price() -> TestResult {
        let total = line_total(&Money::from_minor(2_99, EUR), 3)?;

        assert_eq!(total, Money::from_minor(8_97, EUR));

        Ok(())
    }

    #[test]
    fn line_total_overflow_returns_error() {
        let result = line_total(&Money::from_minor(i64::MAX, EUR), 2);

        assert_eq!(result, Err(PricingError::Overflow));
    }

    #[test]
    fn total_price_of_nothing_is_zero() -> TestResult {
        let total = total_price(std::iter::empty(), EUR)?;

        assert_eq!(total, Money::from_minor(0, EUR));

        Ok(())
    }

    #[test]
    fn total_price_sums_amounts() -> TestResult {
        let total = total_price(
            [
                Ok(Money::from_minor(1_00, EUR)),
                Ok(Money::from_minor(2_50, EUR)),
            ],
            EUR,
        )?;

        assert_eq!(total, Money::from_minor(3_50, EUR));

        Ok(())
    }

    #[test]
    fn total_price_rejects_other_currencies() {
        let result = total_price([Ok(Money::from_minor(1_00, GBP))], EUR);

        assert!(
            matches!(
                result,
                Err(PricingError::Money(MoneyError::CurrencyMismatch { .. }))
            ),
            "expected currency mismatch, got {result:?}"
        );
    }

    #[test]
    fn percent_of_rounds_half_away_from_zero() -> TestResult {
        let tax = percent_of(&Money::from_minor(10_05, EUR), &Percentage::from(0.08))?;
        assert_eq!(tax, Money::from_minor(80, EUR));

        let tax = percent_of(&Money::from_minor(6_25, EUR), &Percentage::from(0.10))?;
        assert_eq!(tax, Money::from_minor(63, EUR));

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let result = percent_of_minor(&Percentage::from(2.0), i64::MAX);

        assert_eq!(result, Err(PricingError::PercentConversion));
    }
}
