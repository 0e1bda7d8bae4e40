//! Mapping from controller errors to HTTP responses
//!
//! Status values (`missing`, `unrenewable`, …) never reach this module;
//! they travel in 200 bodies. Everything here is a genuine failure.

use actix_web::HttpResponse;
use log::error;

use tk_core::errors::ControlError;
use tk_shared::errors::{error_codes, ErrorResponse};

/// Convert a [`ControlError`] into the HTTP error envelope
///
/// `LockUnavailable` maps to 503 with the renew-failed code so clients
/// know the request is safe to retry; collaborator failures are opaque
/// 5xx responses that keep driver details out of the wire.
pub fn handle_control_error(error: ControlError) -> HttpResponse {
    match error {
        ControlError::NotFound { id } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("no session found for token {}", id),
        )),
        ControlError::LockUnavailable { .. } => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::TOKEN_RENEW_FAILED,
                "token renewal is contended, retry the request",
            ))
        }
        ControlError::Store { message } => {
            error!("record store failure: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::DATABASE_ERROR,
                "record store unavailable",
            ))
        }
        ControlError::Cache { message } => {
            error!("cache failure: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::CACHE_ERROR,
                "cache unavailable",
            ))
        }
        ControlError::Lock { message } => {
            error!("lock service failure: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "lock service unavailable",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = handle_control_error(ControlError::NotFound {
            id: "x".to_string(),
        });
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_lock_contention_maps_to_503() {
        let response = handle_control_error(ControlError::LockUnavailable {
            key: "renew:x".to_string(),
        });
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_collaborator_failures_map_to_500() {
        for error in [
            ControlError::Store {
                message: "down".to_string(),
            },
            ControlError::Cache {
                message: "down".to_string(),
            },
            ControlError::Lock {
                message: "down".to_string(),
            },
        ] {
            let response = handle_control_error(error);
            assert_eq!(
                response.status(),
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
