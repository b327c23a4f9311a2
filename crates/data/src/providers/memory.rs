//! In-memory provider for offline replays and tests.

use crate::PoolDataProvider;
use crate::error::ProviderError;
use async_trait::async_trait;
use clapr_domain::entities::{Pool, PoolId, Position, PositionId, PositionSnapshot, RewardRecord};
use clapr_domain::metrics::liquidity_distribution::TickLiquidity;
use clapr_domain::value_objects::SpotPrice;
use std::collections::HashMap;

/// Serves data registered up front. Anything not registered is reported as
/// unavailable, exactly like an unreachable remote.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    positions: HashMap<PositionId, Position>,
    pools: HashMap<PoolId, Pool>,
    spot_prices: HashMap<PoolId, SpotPrice>,
    spread_rewards: HashMap<PositionId, Vec<RewardRecord>>,
    incentives: HashMap<PositionId, Vec<RewardRecord>>,
    tick_liquidity: HashMap<PoolId, Vec<TickLiquidity>>,
}

impl StaticProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every part of a snapshot.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: PositionSnapshot) -> Self {
        let position_id = snapshot.position.id;
        let pool_id = snapshot.pool.id;
        self.positions.insert(position_id, snapshot.position);
        self.spot_prices.insert(pool_id, snapshot.spot_price);
        self.pools.insert(pool_id, snapshot.pool);
        self.spread_rewards
            .insert(position_id, snapshot.spread_rewards);
        self.incentives
            .insert(position_id, snapshot.incentive_rewards);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.positions.insert(position.id, position);
        self
    }

    #[must_use]
    pub fn with_pool(mut self, pool: Pool) -> Self {
        self.pools.insert(pool.id, pool);
        self
    }

    #[must_use]
    pub fn with_spot_price(mut self, pool_id: PoolId, price: SpotPrice) -> Self {
        self.spot_prices.insert(pool_id, price);
        self
    }

    #[must_use]
    pub fn with_tick_liquidity(mut self, pool_id: PoolId, rows: Vec<TickLiquidity>) -> Self {
        self.tick_liquidity.insert(pool_id, rows);
        self
    }
}

fn lookup<K, V>(map: &HashMap<K, V>, key: &K, resource: String) -> Result<V, ProviderError>
where
    K: std::hash::Hash + Eq,
    V: Clone,
{
    map.get(key)
        .cloned()
        .ok_or_else(|| ProviderError::unavailable(resource, "not registered"))
}

#[async_trait]
impl PoolDataProvider for StaticProvider {
    async fn position(&self, position_id: PositionId) -> Result<Position, ProviderError> {
        lookup(&self.positions, &position_id, format!("position {position_id}"))
    }

    async fn pool(&self, pool_id: PoolId) -> Result<Pool, ProviderError> {
        lookup(&self.pools, &pool_id, format!("pool {pool_id}"))
    }

    async fn spot_price(&self, pool: &Pool) -> Result<SpotPrice, ProviderError> {
        lookup(
            &self.spot_prices,
            &pool.id,
            format!("spot price of pool {}", pool.id),
        )
    }

    async fn claimable_spread_rewards(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<RewardRecord>, ProviderError> {
        lookup(
            &self.spread_rewards,
            &position_id,
            format!("spread rewards of position {position_id}"),
        )
    }

    async fn claimable_incentives(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<RewardRecord>, ProviderError> {
        lookup(
            &self.incentives,
            &position_id,
            format!("incentives of position {position_id}"),
        )
    }

    async fn liquidity_per_tick_range(
        &self,
        pool_id: PoolId,
    ) -> Result<Vec<TickLiquidity>, ProviderError> {
        lookup(
            &self.tick_liquidity,
            &pool_id,
            format!("liquidity per tick range of pool {pool_id}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clapr_domain::report::YieldCalculator;
    use clapr_domain::value_objects::MeasurementWindow;
    use rust_decimal_macros::dec;

    fn snapshot() -> PositionSnapshot {
        let pool = Pool::new(1066, "uosmo", "uusdc");
        PositionSnapshot {
            position: Position::new(42, 1066, 100, 400, dec!(1000)).unwrap(),
            spot_price: SpotPrice::for_pool(dec!(2), &pool),
            pool,
            spread_rewards: vec![RewardRecord::new("uosmo", dec!(50))],
            incentive_rewards: vec![RewardRecord::new("uosmo", dec!(25))],
        }
    }

    #[tokio::test]
    async fn test_snapshot_round_trips_through_provider() {
        let provider = StaticProvider::new().with_snapshot(snapshot());
        let resolved = provider.snapshot(PositionId(42)).await.unwrap();
        assert_eq!(resolved, snapshot());

        let window = MeasurementWindow::from_secs(86_400).unwrap();
        let report = YieldCalculator::new()
            .compute_snapshot(&resolved, &window)
            .unwrap();
        assert!((report.apr - dec!(1225.0857)).abs() < dec!(0.0001));
    }

    #[tokio::test]
    async fn test_missing_part_fails_the_whole_snapshot() {
        let full = snapshot();
        let provider = StaticProvider::new()
            .with_position(full.position.clone())
            .with_pool(full.pool.clone())
            .with_spot_price(full.pool.id, full.spot_price.clone());

        match provider.snapshot(PositionId(42)).await {
            Err(ProviderError::DataUnavailable { resource, .. }) => {
                assert!(resource.contains("of position 42"));
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            provider.snapshot(PositionId(7)).await,
            Err(ProviderError::DataUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_tick_liquidity() {
        let rows = vec![TickLiquidity::new(0, 10, 5.0), TickLiquidity::new(10, 30, 7.0)];
        let provider = StaticProvider::new().with_tick_liquidity(PoolId(3), rows.clone());
        assert_eq!(
            provider.liquidity_per_tick_range(PoolId(3)).await.unwrap(),
            rows
        );
        assert!(provider.liquidity_per_tick_range(PoolId(4)).await.is_err());
    }
}
