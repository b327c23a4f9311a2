//! Pool data providers for the APR calculator.
//!
//! This crate resolves everything the yield core needs about a position:
//! position ticks and liquidity, the pool pair, the spot price, and the
//! claimable reward lists. It also serves the liquidity-per-tick-range
//! dataset used for distribution summaries.

/// Provider configuration.
pub mod config;
/// Provider errors.
pub mod error;
/// Provider implementations.
pub mod providers;

pub use config::ProviderConfig;
pub use error::ProviderError;

use async_trait::async_trait;
use clapr_domain::entities::{Pool, PoolId, Position, PositionId, PositionSnapshot, RewardRecord};
use clapr_domain::metrics::liquidity_distribution::TickLiquidity;
use clapr_domain::value_objects::SpotPrice;
use tracing::debug;

/// Source of position, pool, price and reward data.
#[async_trait]
pub trait PoolDataProvider: Send + Sync {
    /// Fetches a position's pool, ticks and liquidity.
    async fn position(&self, position_id: PositionId) -> Result<Position, ProviderError>;

    /// Fetches the token pair of a concentrated-liquidity pool.
    async fn pool(&self, pool_id: PoolId) -> Result<Pool, ProviderError>;

    /// Fetches the spot price of `token0` quoted in `token1`.
    async fn spot_price(&self, pool: &Pool) -> Result<SpotPrice, ProviderError>;

    /// Fetches the spread rewards a position can claim.
    async fn claimable_spread_rewards(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<RewardRecord>, ProviderError>;

    /// Fetches the incentives a position can claim.
    async fn claimable_incentives(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<RewardRecord>, ProviderError>;

    /// Fetches the liquidity active over each tick range of a pool.
    async fn liquidity_per_tick_range(
        &self,
        pool_id: PoolId,
    ) -> Result<Vec<TickLiquidity>, ProviderError>;

    /// Resolves a complete snapshot of one position.
    ///
    /// Fails as a whole if any part is unavailable, so the yield core never
    /// starts on partial data.
    async fn snapshot(&self, position_id: PositionId) -> Result<PositionSnapshot, ProviderError> {
        let position = self.position(position_id).await?;
        let pool = self.pool(position.pool_id).await?;

        let (spot_price, spread_rewards, incentive_rewards) = tokio::try_join!(
            self.spot_price(&pool),
            self.claimable_spread_rewards(position_id),
            self.claimable_incentives(position_id),
        )?;

        debug!(
            position = %position_id,
            pool = %pool.id,
            spread_rewards = spread_rewards.len(),
            incentive_rewards = incentive_rewards.len(),
            "Resolved position snapshot"
        );

        Ok(PositionSnapshot {
            position,
            pool,
            spot_price,
            spread_rewards,
            incentive_rewards,
        })
    }
}
