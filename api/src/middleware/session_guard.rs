//! Session guard middleware
//!
//! Protects routes behind a live session token. The guard pulls the
//! token id from the `Authorization: Bearer` header, classifies it
//! through the controller, and rejects anything but a valid token with
//! a 401 whose error code tells the client what went wrong: re-sign-in
//! for missing/idle/expired sessions, switch to the successor token for
//! a superseded one. A valid token gets its access recorded and a
//! [`SessionContext`] injected for handlers downstream.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use log::warn;
use std::{
    future::{ready, Ready},
    marker::PhantomData,
    rc::Rc,
    task::{Context, Poll},
};

use tk_core::domain::entities::token_record::TokenStatus;
use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};
use tk_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::handle_control_error;
use crate::state::AppState;

/// Session details injected into requests that pass the guard
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The token id the request presented
    pub token_id: String,
    /// Epoch milliseconds of the session chain's original sign-in
    pub sign_in_time: i64,
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req.extensions().get::<SessionContext>().cloned();
        ready(context.ok_or_else(|| {
            unauthorized(error_codes::MISSING_SESSION, "no session on this request")
        }))
    }
}

/// Session guard middleware factory
///
/// Generic over the same collaborator types as [`AppState`], so the one
/// guard serves whichever stack the binary wired up.
pub struct SessionGuard<R, C, L, P> {
    _collaborators: PhantomData<fn() -> (R, C, L, P)>,
}

impl<R, C, L, P> SessionGuard<R, C, L, P> {
    /// Create the middleware factory
    pub fn new() -> Self {
        Self {
            _collaborators: PhantomData,
        }
    }
}

impl<R, C, L, P> Default for SessionGuard<R, C, L, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B, R, C, L, P> Transform<S, ServiceRequest> for SessionGuard<R, C, L, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S, R, C, L, P>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
            _collaborators: PhantomData,
        }))
    }
}

/// Session guard middleware service
pub struct SessionGuardMiddleware<S, R, C, L, P> {
    service: Rc<S>,
    _collaborators: PhantomData<fn() -> (R, C, L, P)>,
}

impl<S, B, R, C, L, P> Service<ServiceRequest> for SessionGuardMiddleware<S, R, C, L, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState<R, C, L, P>>>()
                .cloned()
                .ok_or_else(|| {
                    warn!("session guard mounted without AppState");
                    InternalError::from_response(
                        "missing state",
                        HttpResponse::InternalServerError().json(ErrorResponse::new(
                            error_codes::INTERNAL_ERROR,
                            "service misconfigured",
                        )),
                    )
                })?;

            let token_id = extract_bearer_token(&req).ok_or_else(|| {
                unauthorized(
                    error_codes::MISSING_SESSION,
                    "missing or malformed Authorization header",
                )
            })?;

            let record = state
                .controller
                .get_info(&token_id)
                .await
                .map_err(|error| forward_error(handle_control_error(error)))?
                .ok_or_else(|| {
                    unauthorized(error_codes::MISSING_SESSION, "unknown session token")
                })?;

            let status = state
                .controller
                .check(&token_id)
                .await
                .map_err(|error| forward_error(handle_control_error(error)))?;

            match status {
                TokenStatus::Valid => {}
                TokenStatus::Idle => {
                    return Err(unauthorized(
                        error_codes::INACTIVE_SESSION,
                        "session idle past the inactivity bound",
                    ));
                }
                TokenStatus::Revoked => {
                    return Err(unauthorized(
                        error_codes::EXPIRED_SESSION,
                        "session outlived its maximum lifetime",
                    ));
                }
                TokenStatus::Unrenewable => {
                    return Err(unauthorized(
                        error_codes::RENEWED_TOKEN,
                        "token superseded by a renewal",
                    ));
                }
                TokenStatus::Missing => {
                    return Err(unauthorized(
                        error_codes::MISSING_SESSION,
                        "unknown session token",
                    ));
                }
            }

            state
                .controller
                .record_access(&token_id)
                .await
                .map_err(|error| forward_error(handle_control_error(error)))?;

            req.extensions_mut().insert(SessionContext {
                token_id,
                sign_in_time: record.sign_in_time,
            });

            service.call(req).await
        })
    }
}

/// Pull the token id out of `Authorization: Bearer <id>`
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// 401 with the given error code in the standard envelope
fn unauthorized(code: &str, message: &str) -> Error {
    forward_error(HttpResponse::Unauthorized().json(ErrorResponse::new(code, message)))
}

/// Wrap a prepared response so actix returns it as-is
fn forward_error(response: HttpResponse) -> Error {
    InternalError::from_response("session guard rejection", response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn bearer_request(value: &str) -> ServiceRequest {
        TestRequest::default()
            .insert_header((AUTHORIZATION, value))
            .to_srv_request()
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token(&bearer_request("Bearer abc-123")),
            Some("abc-123".to_string())
        );
        assert_eq!(extract_bearer_token(&bearer_request("Bearer ")), None);
        assert_eq!(extract_bearer_token(&bearer_request("Basic abc")), None);
        assert_eq!(
            extract_bearer_token(&TestRequest::default().to_srv_request()),
            None
        );
    }
}
