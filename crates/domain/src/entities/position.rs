use crate::entities::pool::PoolId;
use crate::error::{Result, YieldError};
use crate::math::price_geometry::validate_tick_range;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub u64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PositionId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A liquidity position active inside `[lower_tick, upper_tick]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub pool_id: PoolId,
    pub lower_tick: i64,
    pub upper_tick: i64,
    pub liquidity: Decimal,
}

impl Position {
    /// Builds a validated position.
    ///
    /// # Errors
    /// Returns [`YieldError::InvalidPosition`] or [`YieldError::DegenerateRange`]
    /// when the ticks or liquidity are unusable.
    pub fn new(
        id: u64,
        pool_id: u64,
        lower_tick: i64,
        upper_tick: i64,
        liquidity: Decimal,
    ) -> Result<Self> {
        let position = Self {
            id: PositionId(id),
            pool_id: PoolId(pool_id),
            lower_tick,
            upper_tick,
            liquidity,
        };
        position.validate()?;
        Ok(position)
    }

    /// Checks the tick invariant and the sign of the liquidity amount.
    ///
    /// # Errors
    /// See [`Position::new`].
    pub fn validate(&self) -> Result<()> {
        validate_tick_range(self.lower_tick, self.upper_tick)?;
        if self.liquidity < Decimal::ZERO {
            return Err(YieldError::invalid_position(format!(
                "position {} has negative liquidity {}",
                self.id, self.liquidity
            )));
        }
        Ok(())
    }
}
