//! Backend wiring
//!
//! Turns an [`AppConfig`] into live collaborators and the [`AppState`]
//! built on them. Which stores are used depends on `CODE_STORE`:
//!
//! | backend  | codes   | accounts |
//! |----------|---------|----------|
//! | `mysql`  | MySQL   | MySQL    |
//! | `redis`  | Redis   | MySQL    |
//! | `memory` | memory  | memory   |

use std::sync::Arc;

use tracing::info;

use mg_core::repositories::{AccountRepository, CodeStore};
use mg_core::services::{CodeLifecycleConfig, CredentialHasher};
use mg_infra::cache::{RedisClient, RedisCodeStore};
use mg_infra::database::{ensure_schema, DatabasePool, MySqlAccountRepository, MySqlCodeStore};
use mg_infra::email::create_notifier;
use mg_infra::memory::{InMemoryAccountRepository, InMemoryCodeStore};
use mg_infra::security::BcryptHasher;
use mg_infra::InfrastructureError;
use mg_shared::config::{AppConfig, CodePolicyConfig, StoreBackend};

use crate::app::AppState;

/// Connect every backend named by `config` and build the services
pub async fn build_state(config: &AppConfig) -> Result<AppState, InfrastructureError> {
    let lifecycle = CodeLifecycleConfig::from(&config.code_policy);
    let notifier = create_notifier(&config.email, ttl_minutes(&config.code_policy))?;
    let hasher: Arc<dyn CredentialHasher> = Arc::new(BcryptHasher::from_config(&config.security));

    let (codes, accounts): (Arc<dyn CodeStore>, Arc<dyn AccountRepository>) = match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; codes and accounts are lost on restart");
            (
                Arc::new(InMemoryCodeStore::new()),
                Arc::new(InMemoryAccountRepository::new()),
            )
        }
        StoreBackend::Mysql | StoreBackend::Redis => {
            let database = DatabasePool::new(config.database.clone()).await?;
            ensure_schema(database.get_pool()).await?;
            let accounts: Arc<dyn AccountRepository> =
                Arc::new(MySqlAccountRepository::new(database.get_pool().clone()));

            let codes: Arc<dyn CodeStore> = if config.store == StoreBackend::Redis {
                let client = RedisClient::new(config.cache.clone()).await?;
                Arc::new(RedisCodeStore::new(client))
            } else {
                Arc::new(MySqlCodeStore::new(database.get_pool().clone()))
            };
            (codes, accounts)
        }
    };

    info!(
        store = ?config.store,
        email_provider = ?config.email.provider,
        code_ttl_ms = lifecycle.code_ttl_ms,
        "Services wired"
    );

    Ok(AppState::new(codes, accounts, notifier, hasher, lifecycle)
        .with_max_payload_size(config.server.max_payload_size))
}

/// Expiry window as quoted in email bodies, never below one minute
pub fn ttl_minutes(policy: &CodePolicyConfig) -> i64 {
    ((policy.code_ttl_seconds / 60) as i64).max(1)
}
