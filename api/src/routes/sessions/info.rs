//! Handler for GET /api/v1/sessions/{id}

use actix_web::{web, HttpResponse};

use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};
use tk_shared::errors::{error_codes, ErrorResponse};

use crate::dto::SessionInfoResponse;
use crate::handlers::handle_control_error;
use crate::state::AppState;

/// Fetch the raw record behind a token identifier
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "id": "0b4f9c1e-...",
///     "sign_in_time": 1700000000000,
///     "last_access_time": 1700000900000,
///     "resigned": false
/// }
/// ```
///
/// ## Errors
/// - 404: no record exists for the identifier
/// - 500: record store or cache unavailable
pub async fn session_info<R, C, L, P>(
    state: web::Data<AppState<R, C, L, P>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    let id = path.into_inner();
    match state.controller.get_info(&id).await {
        Ok(Some(record)) => HttpResponse::Ok().json(SessionInfoResponse::from(record)),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("no session found for token {}", id),
        )),
        Err(error) => handle_control_error(error),
    }
}
