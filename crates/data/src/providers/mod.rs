//! Provider implementations.

mod lcd;
mod memory;
pub mod responses;

pub use lcd::{LcdProvider, endpoint_url};
pub use memory::StaticProvider;
