use crate::entities::pool::Pool;
use crate::error::{Result, YieldError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spot price of `base_denom` quoted in `quote_denom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotPrice {
    pub value: Decimal,
    pub base_denom: String,
    pub quote_denom: String,
}

impl SpotPrice {
    pub fn new(
        value: Decimal,
        base_denom: impl Into<String>,
        quote_denom: impl Into<String>,
    ) -> Self {
        Self {
            value,
            base_denom: base_denom.into(),
            quote_denom: quote_denom.into(),
        }
    }

    /// Spot price of the pool's `token0` in `token1`.
    #[must_use]
    pub fn for_pool(value: Decimal, pool: &Pool) -> Self {
        Self::new(value, &pool.token0_denom, &pool.token1_denom)
    }

    /// Returns the price of `token0` in `token1` for `pool`, inverting a
    /// price that was quoted the other way round.
    ///
    /// # Errors
    /// [`YieldError::InvalidSpotPrice`] when the price is not positive or was
    /// quoted for a different pair.
    pub fn token0_in_token1(&self, pool: &Pool) -> Result<Decimal> {
        if self.value <= Decimal::ZERO {
            return Err(YieldError::invalid_spot_price(
                self.value,
                "spot price must be positive",
            ));
        }

        if self.base_denom == pool.token0_denom && self.quote_denom == pool.token1_denom {
            return Ok(self.value);
        }
        if self.base_denom == pool.token1_denom && self.quote_denom == pool.token0_denom {
            return Decimal::ONE
                .checked_div(self.value)
                .ok_or(YieldError::Overflow {
                    operation: "spot price inversion",
                });
        }

        Err(YieldError::invalid_spot_price(
            self.value,
            format!(
                "quoted as {}/{} but pool {} trades {}/{}",
                self.base_denom, self.quote_denom, pool.id, pool.token0_denom, pool.token1_denom
            ),
        ))
    }
}
