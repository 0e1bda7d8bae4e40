//! MySQL implementation of the TokenRecordRepository trait
//!
//! Persists session token records in the `token_records` table. Rows are
//! inserted once at issuance and overwritten in place afterwards; nothing
//! here ever deletes a row, so the renewal history of every session chain
//! stays queryable.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use tk_core::domain::entities::token_record::TokenRecord;
use tk_core::errors::{ControlError, ControlResult};
use tk_core::repositories::TokenRecordRepository;

/// MySQL-backed token record repository
pub struct MySqlTokenRecordRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRecordRepository {
    /// Create a repository over an existing connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a [`TokenRecord`] entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> ControlResult<TokenRecord> {
        let id: String = row.try_get("id").map_err(|e| ControlError::Store {
            message: format!("failed to get id: {}", e),
        })?;
        let sign_in_time: i64 = row.try_get("sign_in_time").map_err(|e| ControlError::Store {
            message: format!("failed to get sign_in_time: {}", e),
        })?;
        let last_access_time: i64 =
            row.try_get("last_access_time")
                .map_err(|e| ControlError::Store {
                    message: format!("failed to get last_access_time: {}", e),
                })?;
        let resigned: bool = row.try_get("resigned").map_err(|e| ControlError::Store {
            message: format!("failed to get resigned: {}", e),
        })?;

        Ok(TokenRecord {
            id,
            sign_in_time,
            last_access_time,
            resigned,
        })
    }

    /// Whether a row exists for the given identifier
    async fn exists(&self, id: &str) -> ControlResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM token_records WHERE id = ?) as present")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ControlError::Store {
                message: format!("failed to probe token record existence: {}", e),
            })?;

        let present: i8 = row.try_get("present").map_err(|e| ControlError::Store {
            message: format!("failed to get existence result: {}", e),
        })?;
        Ok(present == 1)
    }
}

#[async_trait]
impl TokenRecordRepository for MySqlTokenRecordRepository {
    async fn find_by_id(&self, id: &str) -> ControlResult<Option<TokenRecord>> {
        let query = r#"
            SELECT id, sign_in_time, last_access_time, resigned
            FROM token_records
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ControlError::Store {
                message: format!("failed to find token record: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, record: &TokenRecord) -> ControlResult<()> {
        let query = r#"
            INSERT INTO token_records (
                id, sign_in_time, last_access_time, resigned
            ) VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&record.id)
            .bind(record.sign_in_time)
            .bind(record.last_access_time)
            .bind(record.resigned)
            .execute(&self.pool)
            .await
            .map_err(|e| ControlError::Store {
                message: format!("failed to create token record: {}", e),
            })?;

        Ok(())
    }

    async fn update(&self, record: &TokenRecord) -> ControlResult<bool> {
        let query = r#"
            UPDATE token_records
            SET sign_in_time = ?, last_access_time = ?, resigned = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(record.sign_in_time)
            .bind(record.last_access_time)
            .bind(record.resigned)
            .bind(&record.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ControlError::Store {
                message: format!("failed to update token record: {}", e),
            })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // MySQL reports changed rows, not matched rows: an update that
        // rewrites identical values affects zero rows even though the row
        // is there. Probe before declaring the record absent.
        self.exists(&record.id).await
    }
}
