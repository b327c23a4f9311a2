//! Error taxonomy for yield calculations.

use crate::enums::RewardKind;
use rust_decimal::Decimal;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, YieldError>;

/// Failures raised by the yield core.
///
/// Every variant names the offending field or value. None of them is ever
/// converted into a zero result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YieldError {
    /// Tick bounds out of order or negative, liquidity negative, or the
    /// position does not belong to the supplied pool.
    #[error("invalid position: {reason}")]
    InvalidPosition {
        /// What is wrong with the position.
        reason: String,
    },
    /// The tick range has zero width after square-root conversion.
    #[error("degenerate tick range [{lower_tick}, {upper_tick}]")]
    DegenerateRange {
        /// Lower tick bound.
        lower_tick: i64,
        /// Upper tick bound.
        upper_tick: i64,
    },
    /// Spot price is non-positive or quoted for a different pair.
    #[error("invalid spot price {value}: {reason}")]
    InvalidSpotPrice {
        /// The rejected price.
        value: Decimal,
        /// Why it was rejected.
        reason: String,
    },
    /// A divisor is zero.
    #[error("division by zero: {field} is zero")]
    DivisionByZero {
        /// Name of the zero divisor.
        field: &'static str,
    },
    /// The measurement window is not positive.
    #[error("invalid measurement duration {duration_seconds}s: must be positive")]
    InvalidDuration {
        /// The rejected duration.
        duration_seconds: Decimal,
    },
    /// A reward record carries a negative amount.
    #[error("invalid {kind} reward {amount}{denom}: amount must be non-negative")]
    InvalidReward {
        /// Which reward list the record came from.
        kind: RewardKind,
        /// Reward denomination.
        denom: String,
        /// The rejected amount.
        amount: Decimal,
    },
    /// A reward list spans several denominations under strict policy.
    #[error("mixed denominations in {kind} rewards: {denoms:?}")]
    MixedDenom {
        /// Which reward list is mixed.
        kind: RewardKind,
        /// Distinct denominations found, sorted.
        denoms: Vec<String>,
    },
    /// Decimal arithmetic left the representable range.
    #[error("decimal overflow while computing {operation}")]
    Overflow {
        /// The step that overflowed.
        operation: &'static str,
    },
}

impl YieldError {
    /// Stable name of the error kind, for user-facing output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPosition { .. } => "InvalidPositionError",
            Self::DegenerateRange { .. } => "DegenerateRangeError",
            Self::InvalidSpotPrice { .. } => "InvalidSpotPriceError",
            Self::DivisionByZero { .. } => "DivisionByZeroError",
            Self::InvalidDuration { .. } => "InvalidDurationError",
            Self::InvalidReward { .. } => "InvalidRewardError",
            Self::MixedDenom { .. } => "MixedDenomError",
            Self::Overflow { .. } => "OverflowError",
        }
    }

    pub(crate) fn invalid_position(reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_spot_price(value: Decimal, reason: impl Into<String>) -> Self {
        Self::InvalidSpotPrice {
            value,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offending_field() {
        let err = YieldError::DivisionByZero {
            field: "unit_liquidity",
        };
        assert_eq!(err.to_string(), "division by zero: unit_liquidity is zero");
        assert_eq!(err.kind(), "DivisionByZeroError");

        let err = YieldError::DegenerateRange {
            lower_tick: 7,
            upper_tick: 7,
        };
        assert_eq!(err.to_string(), "degenerate tick range [7, 7]");
    }
}
