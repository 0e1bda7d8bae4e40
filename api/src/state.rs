//! Shared application state handed to every handler

use std::sync::Arc;

use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};
use tk_core::services::control::TokenController;

/// Application state generic over the controller's collaborators
///
/// The same routes and middleware serve both the in-memory stack and
/// the MySQL/Redis stack; only the type parameters change at wiring
/// time in `main`.
pub struct AppState<R, C, L, P>
where
    R: TokenRecordRepository,
    C: CacheStore,
    L: LockManager,
    P: ControlConfigStore,
{
    /// The token lifecycle controller
    pub controller: Arc<TokenController<R, C, L, P>>,
    /// The expiry policy store, exposed for the policy routes
    pub policy: Arc<P>,
}

impl<R, C, L, P> AppState<R, C, L, P>
where
    R: TokenRecordRepository,
    C: CacheStore,
    L: LockManager,
    P: ControlConfigStore,
{
    /// Bundle a controller and its policy store
    pub fn new(controller: Arc<TokenController<R, C, L, P>>, policy: Arc<P>) -> Self {
        Self { controller, policy }
    }
}
