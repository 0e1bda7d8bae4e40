//! Cache layer module.

mod r#trait;
pub use r#trait::CacheStore;

mod memory;
pub use memory::InMemoryCacheStore;
