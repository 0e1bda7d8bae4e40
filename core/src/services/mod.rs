//! Business services containing domain logic and use cases.

pub mod control;

// Re-export commonly used types
pub use control::{RecordStore, TokenController};
