//! MySQL repository implementations

pub mod token_record_repository;

pub use token_record_repository::MySqlTokenRecordRepository;
