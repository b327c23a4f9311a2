use crate::error::{Result, YieldError};
use rust_decimal::Decimal;

/// Seconds in a Julian year: 365.25 * 24 * 60 * 60.
pub const SECONDS_PER_YEAR: Decimal = Decimal::from_parts(31_557_600, 0, 0, false, 0);

/// Annualizes per-unit-liquidity rewards earned over `duration_seconds`.
///
/// apr = ((spread + incentive) / base_price) * (SECONDS_PER_YEAR / duration) * 100
///
/// # Returns
/// The APR in percent.
///
/// # Errors
/// - [`YieldError::InvalidDuration`] if `duration_seconds <= 0`
/// - [`YieldError::InvalidSpotPrice`] if `base_price <= 0`
/// - [`YieldError::Overflow`] if an intermediate leaves the decimal range
pub fn calculate_apr(
    spread_reward_per_unit: Decimal,
    incentive_reward_per_unit: Decimal,
    base_price: Decimal,
    duration_seconds: Decimal,
) -> Result<Decimal> {
    if duration_seconds <= Decimal::ZERO {
        return Err(YieldError::InvalidDuration { duration_seconds });
    }
    if base_price <= Decimal::ZERO {
        return Err(YieldError::invalid_spot_price(
            base_price,
            "base price must be positive",
        ));
    }

    let overflow = |operation| YieldError::Overflow { operation };

    let reward_per_unit = spread_reward_per_unit
        .checked_add(incentive_reward_per_unit)
        .ok_or(overflow("combined reward"))?;
    let period_yield = reward_per_unit
        .checked_div(base_price)
        .ok_or(overflow("period yield"))?;
    let periods_per_year = SECONDS_PER_YEAR
        .checked_div(duration_seconds)
        .ok_or(overflow("periods per year"))?;

    period_yield
        .checked_mul(periods_per_year)
        .and_then(|annual| annual.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(overflow("apr"))
}
