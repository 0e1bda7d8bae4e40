//! Handler for GET /api/v1/sessions/{id}/status

use actix_web::{web, HttpResponse};

use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};

use crate::dto::StatusResponse;
use crate::handlers::handle_control_error;
use crate::state::AppState;

/// Classify a token against the current expiry policy
///
/// Every classification is a 200 response, including `missing`: an
/// unknown identifier is an expected answer, not a transport failure.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "status": "valid" }
/// ```
pub async fn session_status<R, C, L, P>(
    state: web::Data<AppState<R, C, L, P>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    match state.controller.check(&path.into_inner()).await {
        Ok(status) => HttpResponse::Ok().json(StatusResponse { status }),
        Err(error) => handle_control_error(error),
    }
}
