//! Database module - MySQL token record persistence using SQLx

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::MySqlTokenRecordRepository;
