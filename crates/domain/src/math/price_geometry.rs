use crate::error::{Result, YieldError};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

/// Checks that `lower_tick < upper_tick` and that neither tick is negative.
///
/// Equal ticks are reported as a degenerate range, everything else as an
/// invalid position.
pub fn validate_tick_range(lower_tick: i64, upper_tick: i64) -> Result<()> {
    if lower_tick < 0 || upper_tick < 0 {
        return Err(YieldError::invalid_position(format!(
            "ticks must be non-negative (lower_tick={lower_tick}, upper_tick={upper_tick})"
        )));
    }
    if lower_tick == upper_tick {
        return Err(YieldError::DegenerateRange {
            lower_tick,
            upper_tick,
        });
    }
    if lower_tick > upper_tick {
        return Err(YieldError::invalid_position(format!(
            "lower_tick {lower_tick} must be below upper_tick {upper_tick}"
        )));
    }
    Ok(())
}

fn sqrt_tick(tick: i64) -> Result<Decimal> {
    Decimal::from(tick)
        .sqrt()
        .ok_or_else(|| YieldError::invalid_position(format!("no square root for tick {tick}")))
}

/// Liquidity normalized by the square-root width of the tick range.
/// unit = L / (sqrt(upper) - sqrt(lower))
pub fn unit_liquidity(liquidity: Decimal, lower_tick: i64, upper_tick: i64) -> Result<Decimal> {
    validate_tick_range(lower_tick, upper_tick)?;

    let divisor = sqrt_tick(upper_tick)? - sqrt_tick(lower_tick)?;
    if divisor <= Decimal::ZERO {
        return Err(YieldError::DegenerateRange {
            lower_tick,
            upper_tick,
        });
    }

    liquidity.checked_div(divisor).ok_or(YieldError::Overflow {
        operation: "unit liquidity",
    })
}

/// Base price of the range: sqrt(spot * (lower + upper) / 2), where the
/// midpoint is taken over raw tick indices.
pub fn base_price(spot_price: Decimal, lower_tick: i64, upper_tick: i64) -> Result<Decimal> {
    if spot_price <= Decimal::ZERO {
        return Err(YieldError::invalid_spot_price(
            spot_price,
            "spot price must be positive",
        ));
    }
    validate_tick_range(lower_tick, upper_tick)?;

    let midpoint_tick = (Decimal::from(lower_tick) + Decimal::from(upper_tick)) / Decimal::TWO;
    let product = spot_price
        .checked_mul(midpoint_tick)
        .ok_or(YieldError::Overflow {
            operation: "base price",
        })?;

    product.sqrt().ok_or(YieldError::Overflow {
        operation: "base price square root",
    })
}
