pub mod apr;
pub mod liquidity_distribution;
pub mod rewards;
