//! Handler for POST /api/v1/sessions

use actix_web::{web, HttpResponse};

use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};

use crate::dto::IssueResponse;
use crate::handlers::handle_control_error;
use crate::state::AppState;

/// Issue a fresh session token
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "token_id": "0b4f9c1e-..." }
/// ```
///
/// ## Errors
/// - 500: record store or cache unavailable
pub async fn issue_session<R, C, L, P>(state: web::Data<AppState<R, C, L, P>>) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    match state.controller.issue().await {
        Ok(token_id) => HttpResponse::Created().json(IssueResponse { token_id }),
        Err(error) => handle_control_error(error),
    }
}
