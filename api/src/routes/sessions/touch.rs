//! Handler for POST /api/v1/sessions/{id}/touch

use actix_web::{web, HttpResponse};

use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};

use crate::handlers::handle_control_error;
use crate::state::AppState;

/// Record activity on a session token
///
/// # Response
/// - 204: last access time updated
/// - 404: no record exists for the identifier
pub async fn touch_session<R, C, L, P>(
    state: web::Data<AppState<R, C, L, P>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    match state.controller.record_access(&path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_control_error(error),
    }
}
