//! Token lifecycle control
//!
//! This module owns the full life of an opaque session token: issuing
//! records, classifying them against the expiry policy, and rotating
//! them safely under a per-token lock.

mod records;
mod service;

#[cfg(test)]
mod tests;

pub use records::RecordStore;
pub use service::TokenController;
