//! Token expiry policy routes

use actix_web::{web, HttpResponse};

use tk_core::domain::value_objects::control_policy::TokenControlConfigPatch;
use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};

use crate::dto::PolicyUpdateRequest;
use crate::handlers::handle_control_error;
use crate::state::AppState;

/// Handler for GET /api/v1/token-policy
///
/// Returns the effective policy, including defaults a fresh deployment
/// has never written.
pub async fn get_policy<R, C, L, P>(state: web::Data<AppState<R, C, L, P>>) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    match state.policy.load().await {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(error) => handle_control_error(error),
    }
}

/// Handler for PUT /api/v1/token-policy
///
/// Applies a partial update; omitted fields keep their current values.
/// Responds with the full policy now in effect.
pub async fn update_policy<R, C, L, P>(
    state: web::Data<AppState<R, C, L, P>>,
    request: web::Json<PolicyUpdateRequest>,
) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    let patch = TokenControlConfigPatch {
        max_token_lifetime_ms: request.max_token_lifetime_ms,
        max_inactive_interval_ms: request.max_inactive_interval_ms,
    };
    match state.policy.store(patch).await {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(error) => handle_control_error(error),
    }
}
