use serde::{Deserialize, Serialize};
use std::fmt;

/// Which reward list a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardKind {
    /// Trading-fee rewards.
    Spread,
    /// Separately distributed incentives.
    Incentive,
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spread => f.write_str("spread"),
            Self::Incentive => f.write_str("incentive"),
        }
    }
}

/// How reward lists with several denominations are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenomPolicy {
    /// Sum amounts across denominations without checking them.
    #[default]
    Blind,
    /// Reject a list that spans more than one denomination.
    RequireUniform,
}
