//! Session DTOs
//!
//! Statuses and renewal outcomes serialize as their lowercase string
//! forms, matching what clients switch on.

use serde::{Deserialize, Serialize};

use tk_core::domain::entities::token_record::{TokenRecord, TokenStatus};
use tk_core::domain::value_objects::renew_outcome::RenewOutcome;

/// Response for POST /api/v1/sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct IssueResponse {
    /// Identifier of the freshly issued token
    pub token_id: String,
}

/// Response for GET /api/v1/sessions/{id}
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionInfoResponse {
    pub id: String,
    /// Epoch milliseconds of the original sign-in
    pub sign_in_time: i64,
    /// Epoch milliseconds of the last recorded access
    pub last_access_time: i64,
    /// Whether this token was superseded by a renewal
    pub resigned: bool,
}

impl From<TokenRecord> for SessionInfoResponse {
    fn from(record: TokenRecord) -> Self {
        Self {
            id: record.id,
            sign_in_time: record.sign_in_time,
            last_access_time: record.last_access_time,
            resigned: record.resigned,
        }
    }
}

/// Response for GET /api/v1/sessions/{id}/status
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: TokenStatus,
}

/// Response for POST /api/v1/sessions/{id}/renew
///
/// `token_id` is present only when the status is `renewed`; a missing
/// or already superseded token keeps a 200 response with just the
/// status, since neither is a transport failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenewResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
}

impl From<RenewOutcome> for RenewResponse {
    fn from(outcome: RenewOutcome) -> Self {
        let status = outcome.as_str().to_string();
        Self {
            token_id: match outcome {
                RenewOutcome::Renewed { id } => Some(id),
                _ => None,
            },
            status,
        }
    }
}

/// Request body for PUT /api/v1/token-policy
///
/// Both fields are optional; omitted fields keep their current values.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PolicyUpdateRequest {
    pub max_token_lifetime_ms: Option<i64>,
    pub max_inactive_interval_ms: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renew_response_from_outcomes() {
        let renewed: RenewResponse = RenewOutcome::Renewed {
            id: "next".to_string(),
        }
        .into();
        assert_eq!(renewed.status, "renewed");
        assert_eq!(renewed.token_id.as_deref(), Some("next"));

        let missing: RenewResponse = RenewOutcome::Missing.into();
        assert_eq!(missing.status, "missing");
        assert!(missing.token_id.is_none());

        let json = serde_json::to_value(&missing).unwrap();
        assert!(json.get("token_id").is_none());
    }

    #[test]
    fn test_status_response_serializes_lowercase() {
        let json = serde_json::to_value(StatusResponse {
            status: TokenStatus::Unrenewable,
        })
        .unwrap();
        assert_eq!(json["status"], "unrenewable");
    }
}
