//! MySQL implementation of the CodeStore trait.
//!
//! Codes live in the `codes` table keyed by email. Issue is a `REPLACE INTO`
//! so the newest code always wins, and consumption deletes the row only
//! while it still carries the evaluated code and timestamp.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use mg_core::domain::{Consumption, VerificationRecord};
use mg_core::errors::StoreError;
use mg_core::repositories::CodeStore;

/// MySQL implementation of CodeStore
pub struct MySqlCodeStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCodeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRecord, StoreError> {
        let email: String = row
            .try_get("email")
            .map_err(|e| StoreError::backend(format!("Failed to get email: {}", e)))?;
        let code: String = row
            .try_get("code")
            .map_err(|e| StoreError::backend(format!("Failed to get code: {}", e)))?;
        let created_at: i64 = row
            .try_get("created_at")
            .map_err(|e| StoreError::backend(format!("Failed to get created_at: {}", e)))?;

        Ok(VerificationRecord::new(email, code, created_at))
    }
}

#[async_trait]
impl CodeStore for MySqlCodeStore {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        sqlx::query("REPLACE INTO codes (email, code, created_at) VALUES (?, ?, ?)")
            .bind(&record.identity)
            .bind(&record.code)
            .bind(record.issued_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to store code: {}", e)))?;

        Ok(())
    }

    async fn get(&self, identity: &str) -> Result<Option<VerificationRecord>, StoreError> {
        let row = sqlx::query("SELECT email, code, created_at FROM codes WHERE email = ?")
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to load code: {}", e)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete(&self, identity: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM codes WHERE email = ?")
            .bind(identity)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to delete code: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn consume(
        &self,
        record: &VerificationRecord,
        _consumption: Consumption,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM codes WHERE email = ? AND code = ? AND created_at = ?")
                .bind(&record.identity)
                .bind(&record.code)
                .bind(record.issued_at)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::backend(format!("Failed to consume code: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
