//! Table bootstrap for the MySQL backend

use sqlx::MySqlPool;

use crate::InfrastructureError;

/// Standalone verification codes, one row per email
pub const CREATE_CODES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS codes (
    email VARCHAR(255) PRIMARY KEY,
    code VARCHAR(10) NOT NULL,
    created_at BIGINT NOT NULL
)
"#;

/// Accounts with their embedded activation code
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    email VARCHAR(255) PRIMARY KEY,
    password VARCHAR(255),
    is_active TINYINT DEFAULT 0,
    activation_code VARCHAR(10),
    activation_code_created_at BIGINT,
    created_at BIGINT
)
"#;

/// Create the tables when missing
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    for statement in [CREATE_CODES_TABLE, CREATE_USERS_TABLE] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database schema ready");
    Ok(())
}
