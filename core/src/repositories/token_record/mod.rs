//! Token record persistence module.

mod r#trait;
pub use r#trait::TokenRecordRepository;

mod memory;
pub use memory::InMemoryTokenRecordRepository;
