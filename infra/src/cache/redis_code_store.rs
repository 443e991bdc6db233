//! Redis-backed code store
//!
//! Each identity owns one hash at `{prefix}:verification:code:{email}` with
//! the fields `code` and `issued_at`. Keys carry no Redis expiry: an expired
//! record stays readable until a verify observes it and deletes it, the same
//! as in the SQL and in-memory stores.

use async_trait::async_trait;

use mg_core::domain::{Consumption, VerificationRecord};
use mg_core::errors::StoreError;
use mg_core::repositories::CodeStore;

use super::redis_client::RedisClient;

/// Key namespace for verification codes
pub const CODE_KEY_PREFIX: &str = "verification:code:";

/// Delete the hash only if it still holds the given code and issue time
const COMPARE_AND_DELETE: &str = r#"
local code = redis.call('HGET', KEYS[1], 'code')
local issued_at = redis.call('HGET', KEYS[1], 'issued_at')
if code == ARGV[1] and issued_at == ARGV[2] then
    redis.call('DEL', KEYS[1])
    return 1
end
return 0
"#;

/// Code store over Redis hashes
#[derive(Clone)]
pub struct RedisCodeStore {
    client: RedisClient,
}

impl RedisCodeStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, identity: &str) -> String {
        self.client
            .config()
            .prefixed(&format!("{}{}", CODE_KEY_PREFIX, identity))
    }
}

/// Rebuild a record from the hash fields; `None` for a missing or partial hash
pub(crate) fn record_from_fields(
    identity: &str,
    fields: &std::collections::HashMap<String, String>,
) -> Result<Option<VerificationRecord>, StoreError> {
    let (Some(code), Some(issued_at)) = (fields.get("code"), fields.get("issued_at")) else {
        return Ok(None);
    };

    let issued_at = issued_at
        .parse::<i64>()
        .map_err(|e| StoreError::backend(format!("Corrupt issued_at for code record: {}", e)))?;

    Ok(Some(VerificationRecord::new(identity, code.clone(), issued_at)))
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let fields = [
            ("code", record.code.clone()),
            ("issued_at", record.issued_at.to_string()),
        ];
        self.client
            .hash_replace(&self.key(&record.identity), &fields)
            .await?;
        Ok(())
    }

    async fn get(&self, identity: &str) -> Result<Option<VerificationRecord>, StoreError> {
        let fields = self.client.hash_get_all(&self.key(identity)).await?;
        record_from_fields(identity, &fields)
    }

    async fn delete(&self, identity: &str) -> Result<bool, StoreError> {
        Ok(self.client.delete(&self.key(identity)).await?)
    }

    async fn consume(
        &self,
        record: &VerificationRecord,
        _consumption: Consumption,
    ) -> Result<bool, StoreError> {
        let removed = self
            .client
            .eval_int(
                COMPARE_AND_DELETE,
                &self.key(&record.identity),
                &[record.code.clone(), record.issued_at.to_string()],
            )
            .await?;
        Ok(removed == 1)
    }
}
