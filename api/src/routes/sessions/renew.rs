//! Handler for POST /api/v1/sessions/{id}/renew

use actix_web::{web, HttpResponse};

use tk_core::domain::value_objects::renew_outcome::RenewOutcome;
use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};

use crate::dto::RenewResponse;
use crate::handlers::handle_control_error;
use crate::state::AppState;

/// Response header carrying the successor token id
pub const NEW_TOKEN_HEADER: &str = "x-new-token";

/// Rotate a token, minting a successor
///
/// A successful rotation also sets the `x-new-token` header so
/// interceptor-style clients can pick up the replacement without
/// parsing the body. `missing` and `unrenewable` stay 200 responses;
/// they are answers, not failures.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "status": "renewed", "token_id": "7c1d02ab-..." }
/// ```
///
/// ## Errors
/// - 503: rotation lock contended, retry (`TOKEN_RENEW_FAILED`)
/// - 500: record store or cache unavailable
pub async fn renew_session<R, C, L, P>(
    state: web::Data<AppState<R, C, L, P>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    match state.controller.renew(&path.into_inner()).await {
        Ok(outcome) => {
            let mut response = HttpResponse::Ok();
            if let RenewOutcome::Renewed { id } = &outcome {
                response.insert_header((NEW_TOKEN_HEADER, id.as_str()));
            }
            response.json(RenewResponse::from(outcome))
        }
        Err(error) => handle_control_error(error),
    }
}
