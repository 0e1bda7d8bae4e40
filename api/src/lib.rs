//! HTTP surface for the Turnkey session token service
//!
//! Exposes the token lifecycle controller over actix-web: session
//! routes, token policy routes, and the session guard middleware that
//! protects authenticated endpoints.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;
