use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A reward accrued to a position, in a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub denom: String,
    pub amount: Decimal,
}

impl RewardRecord {
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}
