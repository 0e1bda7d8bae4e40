//! Guarded example route

use actix_web::{HttpResponse, web};
use serde_json::json;

use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};

use crate::middleware::session_guard::SessionContext;
use crate::state::AppState;

/// Handler for GET /api/v1/me
///
/// Reachable only through the session guard, which has already checked
/// the token and recorded the access. Echoes what the guard learned.
pub async fn me<R, C, L, P>(
    _state: web::Data<AppState<R, C, L, P>>,
    session: SessionContext,
) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    HttpResponse::Ok().json(json!({
        "token_id": session.token_id,
        "sign_in_time": session.sign_in_time,
    }))
}
