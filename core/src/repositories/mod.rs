pub mod cache;
pub mod config_store;
pub mod lock;
pub mod token_record;

pub use cache::{CacheStore, InMemoryCacheStore};
pub use config_store::{ControlConfigStore, InMemoryConfigStore};
pub use lock::{LocalLockManager, LockGuard, LockManager};
pub use token_record::{InMemoryTokenRecordRepository, TokenRecordRepository};
