//! Lock coordination module.

mod r#trait;
pub use r#trait::{LockGuard, LockManager};

mod local;
pub use local::LocalLockManager;
