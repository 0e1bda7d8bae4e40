//! Cross-route handler helpers

pub mod error_handler;

pub use error_handler::handle_control_error;
