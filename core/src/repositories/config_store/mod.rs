//! Expiry policy storage module.

mod r#trait;
pub use r#trait::ControlConfigStore;

mod memory;
pub use memory::InMemoryConfigStore;
