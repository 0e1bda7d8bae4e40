//! Value objects representing immutable domain concepts.

pub mod control_policy;
pub mod renew_outcome;

// Re-export commonly used types
pub use control_policy::{TokenControlConfig, TokenControlConfigPatch};
pub use renew_outcome::RenewOutcome;
