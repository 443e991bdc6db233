//! Unit tests for the account service

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::domain::value_objects::{CodePurpose, RejectReason, VerifyOutcome};
use crate::errors::{DomainError, NotificationError};
use crate::services::account::AccountService;
use crate::services::code_lifecycle::tests::mocks::{MockAccountRepository, MockHasher, MockNotifier};
use crate::services::code_lifecycle::{CodeLifecycleConfig, ManualClock};

const T0: i64 = 1_700_000_000_000;

struct Fixture {
    accounts: Arc<MockAccountRepository>,
    notifier: Arc<MockNotifier>,
    clock: Arc<ManualClock>,
    service: AccountService<MockAccountRepository, MockNotifier, MockHasher>,
}

fn fixture() -> Fixture {
    let accounts = Arc::new(MockAccountRepository::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let clock = Arc::new(ManualClock::new(T0));
    let service = AccountService::with_clock(
        accounts.clone(),
        notifier.clone(),
        Arc::new(MockHasher),
        clock.clone(),
        CodeLifecycleConfig::default(),
    );
    Fixture {
        accounts,
        notifier,
        clock,
        service,
    }
}

impl Fixture {
    fn activation_code(&self, email: &str) -> String {
        let sent = self.notifier.last_sent(email).expect("activation code should be sent");
        assert_eq!(sent.purpose, CodePurpose::Activation);
        sent.code
    }
}

#[tokio::test]
async fn test_register_creates_inactive_account() {
    let f = fixture();

    let result = f.service.register("a@x.com", "secret").await.unwrap();
    assert!(!result.account.is_active);
    assert_eq!(result.activation_expires_at, T0 + 600_000);

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.credential_hash, "hashed:secret");
    assert_eq!(stored.created_at, T0);
    assert_eq!(stored.pending_activation_code, Some(f.activation_code("a@x.com")));
    assert_eq!(stored.activation_issued_at, Some(T0));
}

#[tokio::test]
async fn test_register_validation() {
    let f = fixture();

    assert!(matches!(
        f.service.register("bad-email", "secret").await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        f.service.register("a@x.com", "").await,
        Err(DomainError::Validation { .. })
    ));
    assert_eq!(f.notifier.sent_count(), 0);
    assert!(f.accounts.account("a@x.com").is_none());
}

#[tokio::test]
async fn test_reregister_inactive_account_overwrites() {
    let f = fixture();

    f.service.register("a@x.com", "first").await.unwrap();
    let first_code = f.activation_code("a@x.com");
    f.clock.advance(5_000);
    f.service.register("a@x.com", "second").await.unwrap();
    let second_code = f.activation_code("a@x.com");

    let stored = f.accounts.account("a@x.com").unwrap();
    assert_eq!(stored.credential_hash, "hashed:second");
    assert_eq!(stored.created_at, T0 + 5_000);

    if first_code != second_code {
        let stale = f.service.verify_activation_code("a@x.com", &first_code).await.unwrap();
        assert_eq!(stale, VerifyOutcome::Rejected(RejectReason::Mismatch));
    }
    let fresh = f.service.verify_activation_code("a@x.com", &second_code).await.unwrap();
    assert_eq!(fresh, VerifyOutcome::Accepted);
}

#[tokio::test]
async fn test_register_active_account_rejected() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    let code = f.activation_code("a@x.com");
    f.service.verify_activation_code("a@x.com", &code).await.unwrap();

    let result = f.service.register("a@x.com", "other").await;
    assert!(matches!(result, Err(DomainError::AccountAlreadyActive)));

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(stored.is_active);
    assert_eq!(stored.credential_hash, "hashed:secret");
}

#[tokio::test]
async fn test_register_activated_concurrently_is_rejected() {
    let f = fixture();

    f.service.register("a@x.com", "first").await.unwrap();
    // Activation lands between the active check and the write
    f.accounts.activate_before_write.store(true, Ordering::SeqCst);

    let result = f.service.register("a@x.com", "second").await;
    assert!(matches!(result, Err(DomainError::AccountAlreadyActive)));

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(stored.is_active);
    assert_eq!(stored.credential_hash, "hashed:first");
    assert!(stored.pending_activation_code.is_none());
    assert_eq!(f.notifier.sent_count(), 1);
}

#[tokio::test]
async fn test_activation_sets_active_and_clears_code() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    let code = f.activation_code("a@x.com");
    f.clock.advance(1_000);

    let outcome = f.service.verify_activation_code("a@x.com", &code).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Accepted);

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(stored.is_active);
    assert!(stored.pending_activation_code.is_none());
    assert!(stored.activation_issued_at.is_none());

    let replay = f.service.verify_activation_code("a@x.com", &code).await.unwrap();
    assert_eq!(replay, VerifyOutcome::Rejected(RejectReason::NotFound));
}

#[tokio::test]
async fn test_expired_activation_clears_without_activating() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    let code = f.activation_code("a@x.com");
    f.clock.advance(601_000);

    let outcome = f.service.verify_activation_code("a@x.com", &code).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Rejected(RejectReason::Expired));

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(!stored.is_active);
    assert!(stored.pending_activation_code.is_none());
}

#[tokio::test]
async fn test_wrong_activation_code_keeps_pending() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    let code = f.activation_code("a@x.com");
    let wrong = if code == "100000" { "100001" } else { "100000" };

    let outcome = f.service.verify_activation_code("a@x.com", wrong).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Rejected(RejectReason::Mismatch));

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.pending_activation_code, Some(code));
}

#[tokio::test]
async fn test_verify_activation_unknown_account() {
    let f = fixture();

    let result = f.service.verify_activation_code("ghost@x.com", "123456").await;
    assert!(matches!(result, Err(DomainError::AccountNotFound)));
}

#[tokio::test]
async fn test_resend_activation_code() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    f.clock.advance(500_000);

    let expires_at = f.service.resend_activation_code("a@x.com").await.unwrap();
    assert_eq!(expires_at, T0 + 500_000 + 600_000);
    assert_eq!(f.notifier.sent_count(), 2);

    // The resent code restarts the window
    f.clock.advance(500_000);
    let code = f.activation_code("a@x.com");
    let outcome = f.service.verify_activation_code("a@x.com", &code).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Accepted);
}

#[tokio::test]
async fn test_resend_unknown_account() {
    let f = fixture();

    let result = f.service.resend_activation_code("ghost@x.com").await;
    assert!(matches!(result, Err(DomainError::AccountNotFound)));
    assert_eq!(f.notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_resend_active_account() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    let code = f.activation_code("a@x.com");
    f.service.verify_activation_code("a@x.com", &code).await.unwrap();

    let result = f.service.resend_activation_code("a@x.com").await;
    assert!(matches!(result, Err(DomainError::AccountAlreadyActive)));
}

#[tokio::test]
async fn test_resend_after_concurrent_activation_is_rejected() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    f.accounts.activate_before_write.store(true, Ordering::SeqCst);

    let result = f.service.resend_activation_code("a@x.com").await;
    assert!(matches!(result, Err(DomainError::AccountAlreadyActive)));

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(stored.is_active);
    assert!(stored.pending_activation_code.is_none());
    assert_eq!(f.notifier.sent_count(), 1);
}

#[tokio::test]
async fn test_register_delivery_failure_keeps_account_and_code() {
    let f = fixture();
    f.notifier.should_fail.store(true, Ordering::SeqCst);

    let result = f.service.register("a@x.com", "secret").await;
    assert!(matches!(result, Err(DomainError::Notification(NotificationError::DeliveryFailed { .. }))));

    let stored = f.accounts.account("a@x.com").unwrap();
    assert!(!stored.is_active);
    assert!(stored.pending_activation_code.is_some());
}

#[tokio::test]
async fn test_login_flow() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();

    let before = f.service.login("a@x.com", "secret").await;
    assert!(matches!(before, Err(DomainError::AccountNotActive)));

    let code = f.activation_code("a@x.com");
    f.service.verify_activation_code("a@x.com", &code).await.unwrap();

    let account = f.service.login("A@X.com", "secret").await.unwrap();
    assert_eq!(account.identity, "a@x.com");
    assert!(account.is_active);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let f = fixture();

    f.service.register("a@x.com", "secret").await.unwrap();
    let code = f.activation_code("a@x.com");
    f.service.verify_activation_code("a@x.com", &code).await.unwrap();

    assert!(matches!(
        f.service.login("a@x.com", "wrong").await,
        Err(DomainError::InvalidCredentials)
    ));
    assert!(matches!(
        f.service.login("ghost@x.com", "secret").await,
        Err(DomainError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_repository_failure_surfaces_as_storage_error() {
    let f = fixture();
    f.accounts.should_fail.store(true, Ordering::SeqCst);

    let result = f.service.register("a@x.com", "secret").await;
    assert!(matches!(result, Err(DomainError::Storage(_))));
    assert_eq!(f.notifier.sent_count(), 0);
}
