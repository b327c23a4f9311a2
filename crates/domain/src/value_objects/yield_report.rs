use crate::entities::position::PositionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annualized yield of a single position over one measurement window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldReport {
    pub position_id: PositionId,
    /// Annualized rate, in percent.
    pub apr: Decimal,
    pub spread_reward_per_unit_liquidity: Decimal,
    pub incentive_reward_per_unit_liquidity: Decimal,
    pub unit_liquidity: Decimal,
    pub base_price: Decimal,
    pub duration_seconds: Decimal,
}
