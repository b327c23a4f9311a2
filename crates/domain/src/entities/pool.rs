use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolId(pub u64);

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concentrated-liquidity pool, reduced to the pair it trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub token0_denom: String,
    pub token1_denom: String,
}

impl Pool {
    pub fn new(
        id: u64,
        token0_denom: impl Into<String>,
        token1_denom: impl Into<String>,
    ) -> Self {
        Self {
            id: PoolId(id),
            token0_denom: token0_denom.into(),
            token1_denom: token1_denom.into(),
        }
    }
}

impl From<u64> for PoolId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
