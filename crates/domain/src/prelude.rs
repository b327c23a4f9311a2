//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clapr_domain::prelude::*;
//! ```

// Entities
pub use crate::entities::{
    Pool, PoolId, Position, PositionId, PositionSnapshot, RewardRecord,
};

// Enums
pub use crate::enums::{DenomPolicy, RewardKind};

// Errors
pub use crate::error::{Result, YieldError};

// Geometry
pub use crate::math::price_geometry::{base_price, unit_liquidity, validate_tick_range};

// Metrics
pub use crate::metrics::apr::{SECONDS_PER_YEAR, calculate_apr};
pub use crate::metrics::liquidity_distribution::{
    LiquidityStats, TickLiquidity, filter_outliers, quantile,
};
pub use crate::metrics::rewards::{ensure_uniform_denom, reward_per_unit_liquidity, total_reward};

// Report
pub use crate::report::{YieldCalculator, compute_yield};

// Value objects
pub use crate::value_objects::{MeasurementWindow, SpotPrice, YieldReport};
