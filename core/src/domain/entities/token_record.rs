//! Session token records and their lifecycle classification
//!
//! A [`TokenRecord`] is the durable footprint of one opaque session token.
//! Records are never deleted: expiry and rotation are expressed purely
//! through the timestamps and the `resigned` flag, so the full renewal
//! history of a session stays auditable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::control_policy::TokenControlConfig;

/// Durable state of a single session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Opaque token identifier handed to the client
    pub id: String,

    /// When the session chain this token belongs to was first established,
    /// in epoch milliseconds. Carried unchanged across renewals.
    pub sign_in_time: i64,

    /// When the token was last presented, in epoch milliseconds
    pub last_access_time: i64,

    /// Whether this token has been superseded by a renewal
    pub resigned: bool,
}

impl TokenRecord {
    /// Create a record for a brand new session
    ///
    /// The identifier is a freshly generated UUID and both timestamps
    /// start at `now_ms`.
    pub fn issue(now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sign_in_time: now_ms,
            last_access_time: now_ms,
            resigned: false,
        }
    }

    /// Create the replacement record minted by a renewal
    ///
    /// The successor gets a fresh identifier and access time but keeps
    /// this record's `sign_in_time`, so the session chain ages as one.
    pub fn successor(&self, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sign_in_time: self.sign_in_time,
            last_access_time: now_ms,
            resigned: false,
        }
    }

    /// Mark this token as superseded
    pub fn resign(&mut self) {
        self.resigned = true;
    }

    /// Apply a partial update to this record
    ///
    /// The `resigned` flag only ever moves from `false` to `true`; a
    /// patch cannot resurrect a superseded token.
    pub fn apply(&mut self, patch: &TokenRecordPatch) {
        if let Some(last_access_time) = patch.last_access_time {
            self.last_access_time = last_access_time;
        }
        if patch.resigned == Some(true) {
            self.resigned = true;
        }
    }

    /// Classify this record against the given policy at time `now_ms`
    ///
    /// Checks run in a fixed order: a superseded token is unrenewable no
    /// matter how fresh its timestamps are, inactivity is reported before
    /// lifetime expiry, and a bound of zero disables that check entirely.
    pub fn status_at(&self, now_ms: i64, policy: &TokenControlConfig) -> TokenStatus {
        if self.resigned {
            return TokenStatus::Unrenewable;
        }
        if policy.max_inactive_interval_ms > 0
            && now_ms - self.last_access_time > policy.max_inactive_interval_ms
        {
            return TokenStatus::Idle;
        }
        if policy.max_token_lifetime_ms > 0
            && now_ms - self.sign_in_time > policy.max_token_lifetime_ms
        {
            return TokenStatus::Revoked;
        }
        TokenStatus::Valid
    }
}

/// Partial update applied to a [`TokenRecord`]
///
/// `sign_in_time` is deliberately absent: the origin of a session chain
/// is immutable once recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecordPatch {
    /// New last access timestamp in epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access_time: Option<i64>,

    /// New resigned flag; only a transition to `true` is honored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resigned: Option<bool>,
}

impl TokenRecordPatch {
    /// Patch that refreshes the last access timestamp
    pub fn touch(now_ms: i64) -> Self {
        Self {
            last_access_time: Some(now_ms),
            resigned: None,
        }
    }

    /// Patch that marks the token as superseded
    pub fn resign() -> Self {
        Self {
            last_access_time: None,
            resigned: Some(true),
        }
    }

    /// Whether this patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.last_access_time.is_none() && self.resigned.is_none()
    }
}

/// Lifecycle classification of a token at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    /// The token is live and usable
    Valid,
    /// The token sat unused longer than the inactivity bound allows
    Idle,
    /// The session chain outlived its maximum lifetime
    Revoked,
    /// The token was superseded by a renewal
    Unrenewable,
    /// No record exists for the presented identifier
    Missing,
}

impl TokenStatus {
    /// Stable string form used in responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::Valid => "valid",
            TokenStatus::Idle => "idle",
            TokenStatus::Revoked => "revoked",
            TokenStatus::Unrenewable => "unrenewable",
            TokenStatus::Missing => "missing",
        }
    }
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
