//! Result of a token renewal attempt

/// What a renewal attempt concluded once the rotation lock was held
///
/// Only collaborator failures surface as errors; these three outcomes
/// are all successful observations of the token's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewOutcome {
    /// The token was rotated; `id` names the replacement token
    Renewed { id: String },
    /// No record exists for the presented identifier
    Missing,
    /// The token was already superseded, so the chain cannot fork
    Unrenewable,
}

impl RenewOutcome {
    /// Identifier of the replacement token, when one was minted
    pub fn token_id(&self) -> Option<&str> {
        match self {
            RenewOutcome::Renewed { id } => Some(id),
            _ => None,
        }
    }

    /// Stable string form used in responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            RenewOutcome::Renewed { .. } => "renewed",
            RenewOutcome::Missing => "missing",
            RenewOutcome::Unrenewable => "unrenewable",
        }
    }
}
