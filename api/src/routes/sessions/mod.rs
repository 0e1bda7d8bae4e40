//! Session route handlers
//!
//! One handler per lifecycle operation:
//! - issuing a fresh token
//! - reading the raw record
//! - classifying against the expiry policy
//! - renewing under the rotation lock
//! - recording activity

pub mod info;
pub mod issue;
pub mod renew;
pub mod status;
pub mod touch;
