//! Domain model and yield math for concentrated-liquidity positions.
//!
//! This crate is the pure core of the APR calculator:
//! - Tick-range geometry (unit liquidity, base price)
//! - Reward aggregation and per-unit-liquidity normalization
//! - Time annualization of reward rates
//! - The position yield report façade
//! - Liquidity-per-tick-range distribution statistics
//!
//! Nothing in here performs I/O. Callers resolve a [`entities::PositionSnapshot`]
//! through a data provider first and hand it to [`report::YieldCalculator`].

/// Prelude module for convenient imports.
pub mod prelude;

/// Domain entities resolved from the chain.
pub mod entities;
/// Shared enumerations.
pub mod enums;
/// Error taxonomy of the core.
pub mod error;
/// Tick-range geometry.
pub mod math;
/// Reward, APR and distribution metrics.
pub mod metrics;
/// Position yield report façade.
pub mod report;
/// Small immutable values passed into and out of the core.
pub mod value_objects;
