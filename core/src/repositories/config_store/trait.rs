//! Storage interface for the token expiry policy

use async_trait::async_trait;

use crate::domain::value_objects::control_policy::{TokenControlConfig, TokenControlConfigPatch};
use crate::errors::ControlResult;

/// Storage for the single, service-wide expiry policy
///
/// A deployment that never stored a policy is not an error case; `load`
/// answers with the built-in defaults so expiry checks always have
/// bounds to work with.
#[async_trait]
pub trait ControlConfigStore: Send + Sync {
    /// Fetch the effective policy, falling back to defaults when none
    /// was ever stored
    async fn load(&self) -> ControlResult<TokenControlConfig>;

    /// Apply a partial update to the stored policy
    ///
    /// # Returns
    /// The full policy now in effect
    async fn store(&self, patch: TokenControlConfigPatch) -> ControlResult<TokenControlConfig>;
}
