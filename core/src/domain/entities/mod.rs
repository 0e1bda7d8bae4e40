//! Domain entities representing core business objects.

pub mod token_record;

// Re-export commonly used types
pub use token_record::{TokenRecord, TokenRecordPatch, TokenStatus};
