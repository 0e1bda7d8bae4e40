//! Failure-injecting collaborators for controller tests

use async_trait::async_trait;

use crate::domain::entities::token_record::TokenRecord;
use crate::errors::{ControlError, ControlResult};
use crate::repositories::TokenRecordRepository;

/// Repository whose every call fails with a store error
pub struct FailingTokenRecordRepository;

fn store_error() -> ControlError {
    ControlError::Store {
        message: "record store offline".to_string(),
    }
}

#[async_trait]
impl TokenRecordRepository for FailingTokenRecordRepository {
    async fn find_by_id(&self, _id: &str) -> ControlResult<Option<TokenRecord>> {
        Err(store_error())
    }

    async fn create(&self, _record: &TokenRecord) -> ControlResult<()> {
        Err(store_error())
    }

    async fn update(&self, _record: &TokenRecord) -> ControlResult<bool> {
        Err(store_error())
    }
}
