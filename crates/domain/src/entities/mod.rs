pub mod pool;
pub mod position;
pub mod reward;
pub mod snapshot;

// Re-export for easier access
pub use pool::{Pool, PoolId};
pub use position::{Position, PositionId};
pub use reward::RewardRecord;
pub use snapshot::PositionSnapshot;
