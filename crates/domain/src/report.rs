//! Position yield report.
//!
//! Orchestrates geometry, reward aggregation and annualization over a fully
//! resolved snapshot. A failure in any step is returned as is; no partial
//! report is ever produced.

use crate::entities::{Pool, Position, PositionSnapshot, RewardRecord};
use crate::enums::{DenomPolicy, RewardKind};
use crate::error::{Result, YieldError};
use crate::math::price_geometry::{base_price, unit_liquidity};
use crate::metrics::apr::calculate_apr;
use crate::metrics::rewards::{aggregate, reward_per_unit_liquidity};
use crate::value_objects::{MeasurementWindow, SpotPrice, YieldReport};
use rayon::prelude::*;
use tracing::debug;

/// Computes [`YieldReport`]s under a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldCalculator {
    denom_policy: DenomPolicy,
}

impl YieldCalculator {
    /// Creates a calculator with denomination-blind reward summation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how reward lists spanning several denominations are handled.
    #[must_use]
    pub fn with_denom_policy(mut self, denom_policy: DenomPolicy) -> Self {
        self.denom_policy = denom_policy;
        self
    }

    /// Returns the configured denomination policy.
    #[must_use]
    pub fn denom_policy(&self) -> DenomPolicy {
        self.denom_policy
    }

    /// Computes the APR of `position` over `window`.
    ///
    /// # Arguments
    /// * `position` - Position whose ticks and liquidity are measured
    /// * `pool` - Pool the position belongs to, used to orient `spot_price`
    /// * `spot_price` - Current spot price of the pair
    /// * `spread_rewards` - Spread rewards accrued during the window
    /// * `incentive_rewards` - Incentive rewards accrued during the window
    /// * `window` - Duration over which the rewards accrued
    ///
    /// # Errors
    /// Any [`YieldError`] raised by validation or by an intermediate step.
    pub fn compute(
        &self,
        position: &Position,
        pool: &Pool,
        spot_price: &SpotPrice,
        spread_rewards: &[RewardRecord],
        incentive_rewards: &[RewardRecord],
        window: &MeasurementWindow,
    ) -> Result<YieldReport> {
        position.validate()?;
        if position.pool_id != pool.id {
            return Err(YieldError::invalid_position(format!(
                "position {} belongs to pool {}, not pool {}",
                position.id, position.pool_id, pool.id
            )));
        }
        window.validate()?;

        let spot = spot_price.token0_in_token1(pool)?;
        let unit = unit_liquidity(position.liquidity, position.lower_tick, position.upper_tick)?;
        let base = base_price(spot, position.lower_tick, position.upper_tick)?;

        let spread_total = aggregate(RewardKind::Spread, spread_rewards, self.denom_policy)?;
        let incentive_total =
            aggregate(RewardKind::Incentive, incentive_rewards, self.denom_policy)?;
        let spread_per_unit = reward_per_unit_liquidity(spread_total, unit)?;
        let incentive_per_unit = reward_per_unit_liquidity(incentive_total, unit)?;

        let apr = calculate_apr(
            spread_per_unit,
            incentive_per_unit,
            base,
            window.duration_seconds,
        )?;

        debug!(
            position = %position.id,
            pool = %pool.id,
            unit_liquidity = %unit,
            base_price = %base,
            apr = %apr,
            "Computed position yield"
        );

        Ok(YieldReport {
            position_id: position.id,
            apr,
            spread_reward_per_unit_liquidity: spread_per_unit,
            incentive_reward_per_unit_liquidity: incentive_per_unit,
            unit_liquidity: unit,
            base_price: base,
            duration_seconds: window.duration_seconds,
        })
    }

    /// Computes the APR of a resolved snapshot.
    ///
    /// # Errors
    /// See [`YieldCalculator::compute`].
    pub fn compute_snapshot(
        &self,
        snapshot: &PositionSnapshot,
        window: &MeasurementWindow,
    ) -> Result<YieldReport> {
        self.compute(
            &snapshot.position,
            &snapshot.pool,
            &snapshot.spot_price,
            &snapshot.spread_rewards,
            &snapshot.incentive_rewards,
            window,
        )
    }

    /// Computes many independent snapshots in parallel.
    ///
    /// Results are returned in input order, one per job.
    pub fn compute_batch(
        &self,
        jobs: &[(PositionSnapshot, MeasurementWindow)],
    ) -> Vec<Result<YieldReport>> {
        jobs.par_iter()
            .map(|(snapshot, window)| self.compute_snapshot(snapshot, window))
            .collect()
    }
}

/// Computes a [`YieldReport`] with the default options.
///
/// # Errors
/// See [`YieldCalculator::compute`].
pub fn compute_yield(
    position: &Position,
    pool: &Pool,
    spot_price: &SpotPrice,
    spread_rewards: &[RewardRecord],
    incentive_rewards: &[RewardRecord],
    window: &MeasurementWindow,
) -> Result<YieldReport> {
    YieldCalculator::new().compute(
        position,
        pool,
        spot_price,
        spread_rewards,
        incentive_rewards,
        window,
    )
}
