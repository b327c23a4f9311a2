use crate::entities::pool::Pool;
use crate::entities::position::Position;
use crate::entities::reward::RewardRecord;
use crate::value_objects::price::SpotPrice;
use serde::{Deserialize, Serialize};

/// Everything the yield core needs about one position, fully resolved.
///
/// A data provider assembles this before any calculation starts, so the
/// core never sees a partially fetched position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub position: Position,
    pub pool: Pool,
    pub spot_price: SpotPrice,
    pub spread_rewards: Vec<RewardRecord>,
    pub incentive_rewards: Vec<RewardRecord>,
}
