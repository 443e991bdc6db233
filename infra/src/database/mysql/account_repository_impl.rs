//! MySQL implementation of the AccountRepository trait.
//!
//! Accounts live in the `users` table; the activation code and its issue
//! time are nullable columns on the same row, so activation is a single
//! conditional `UPDATE`.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use mg_core::domain::{Account, VerificationRecord};
use mg_core::errors::StoreError;
use mg_core::repositories::AccountRepository;

/// Resets an existing inactive account; active rows never match.
const RESET_INACTIVE: &str = r#"
    UPDATE users
    SET password = ?, activation_code = NULL, activation_code_created_at = NULL, created_at = ?
    WHERE email = ? AND is_active = 0
"#;

const INSERT_ACCOUNT: &str = r#"
    INSERT INTO users (
        email, password, is_active, activation_code, activation_code_created_at, created_at
    ) VALUES (?, ?, 0, NULL, NULL, ?)
"#;

const SET_ACTIVATION_CODE: &str = r#"
    UPDATE users
    SET activation_code = ?, activation_code_created_at = ?
    WHERE email = ? AND is_active = 0
"#;

const CONSUME_ACTIVATION_CODE: &str = r#"
    UPDATE users
    SET is_active = IF(?, 1, is_active),
        activation_code = NULL,
        activation_code_created_at = NULL
    WHERE email = ? AND activation_code = ? AND activation_code_created_at = ?
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, StoreError> {
        let field = |name: &str, e: sqlx::Error| {
            StoreError::backend(format!("Failed to get {}: {}", name, e))
        };

        let is_active: Option<i8> = row.try_get("is_active").map_err(|e| field("is_active", e))?;

        Ok(Account {
            identity: row.try_get("email").map_err(|e| field("email", e))?,
            credential_hash: row
                .try_get::<Option<String>, _>("password")
                .map_err(|e| field("password", e))?
                .unwrap_or_default(),
            is_active: is_active.unwrap_or(0) == 1,
            pending_activation_code: row
                .try_get("activation_code")
                .map_err(|e| field("activation_code", e))?,
            activation_issued_at: row
                .try_get("activation_code_created_at")
                .map_err(|e| field("activation_code_created_at", e))?,
            created_at: row
                .try_get::<Option<i64>, _>("created_at")
                .map_err(|e| field("created_at", e))?
                .unwrap_or_default(),
        })
    }

    async fn is_inactive(&self, identity: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM users WHERE email = ? AND is_active = 0")
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to check account: {}", e)))?;

        Ok(row.is_some())
    }

    async fn reset_inactive(&self, account: &Account) -> Result<bool, StoreError> {
        let result = sqlx::query(RESET_INACTIVE)
            .bind(&account.credential_hash)
            .bind(account.created_at)
            .bind(&account.identity)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to save account: {}", e)))?;

        if result.rows_affected() > 0 {
            Ok(true)
        } else {
            self.is_inactive(&account.identity).await
        }
    }

    /// `Ok(false)` when a row for the email already exists
    async fn insert_inactive(&self, account: &Account) -> Result<bool, StoreError> {
        let result = sqlx::query(INSERT_ACCOUNT)
            .bind(&account.identity)
            .bind(&account.credential_hash)
            .bind(account.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(StoreError::backend(format!("Failed to save account: {}", e))),
        }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>, StoreError> {
        let query = r#"
            SELECT email, password, is_active, activation_code,
                   activation_code_created_at, created_at
            FROM users
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to find account: {}", e)))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn save_registration(&self, account: &Account) -> Result<bool, StoreError> {
        // A concurrent registration may insert between the two statements;
        // the second pass then finds its inactive row
        for _ in 0..2 {
            if self.reset_inactive(account).await? || self.insert_inactive(account).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn set_activation_code(&self, record: &VerificationRecord) -> Result<bool, StoreError> {
        let result = sqlx::query(SET_ACTIVATION_CODE)
            .bind(&record.code)
            .bind(record.issued_at)
            .bind(&record.identity)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to store activation code: {}", e)))?;

        // An update writing identical values may report zero affected rows
        if result.rows_affected() > 0 {
            Ok(true)
        } else {
            self.is_inactive(&record.identity).await
        }
    }

    async fn clear_activation_code(&self, identity: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET activation_code = NULL, activation_code_created_at = NULL
            WHERE email = ? AND activation_code IS NOT NULL
            "#,
        )
        .bind(identity)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::backend(format!("Failed to clear activation code: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn consume_activation_code(
        &self,
        record: &VerificationRecord,
        activate: bool,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(CONSUME_ACTIVATION_CODE)
            .bind(activate)
            .bind(&record.identity)
            .bind(&record.code)
            .bind(record.issued_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to consume activation code: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
