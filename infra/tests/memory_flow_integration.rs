//! End-to-end flows over the in-memory stores, mock email and bcrypt

use std::sync::Arc;

use mg_core::domain::{CodePurpose, RejectReason, VerifyOutcome};
use mg_core::errors::DomainError;
use mg_core::services::{AccountService, CodeLifecycleConfig, EmailVerificationService, ManualClock};
use mg_infra::email::MockEmailNotifier;
use mg_infra::memory::{InMemoryAccountRepository, InMemoryCodeStore};
use mg_infra::security::BcryptHasher;

const T0: i64 = 1_700_000_000_000;

#[tokio::test]
async fn test_verification_flow() {
    let clock = Arc::new(ManualClock::new(T0));
    let notifier = Arc::new(MockEmailNotifier::new(10));
    let service = EmailVerificationService::with_clock(
        Arc::new(InMemoryCodeStore::new()),
        notifier.clone(),
        clock.clone(),
        CodeLifecycleConfig::default(),
    );

    service.send_code("a@x.com").await.unwrap();
    let code = notifier
        .last_code("a@x.com", CodePurpose::Verification)
        .await
        .unwrap();

    clock.advance(1_000);
    assert_eq!(service.verify_code("a@x.com", &code).await.unwrap(), VerifyOutcome::Accepted);
    assert_eq!(
        service.verify_code("a@x.com", &code).await.unwrap(),
        VerifyOutcome::Rejected(RejectReason::NotFound)
    );
}

#[tokio::test]
async fn test_register_activate_login() {
    let clock = Arc::new(ManualClock::new(T0));
    let notifier = Arc::new(MockEmailNotifier::new(10));
    let service = AccountService::with_clock(
        Arc::new(InMemoryAccountRepository::new()),
        notifier.clone(),
        Arc::new(BcryptHasher::new(4)),
        clock.clone(),
        CodeLifecycleConfig::default(),
    );

    service.register("user@x.com", "hunter2").await.unwrap();
    assert!(matches!(
        service.login("user@x.com", "hunter2").await,
        Err(DomainError::AccountNotActive)
    ));

    let code = notifier
        .last_code("user@x.com", CodePurpose::Activation)
        .await
        .unwrap();
    clock.advance(30_000);
    assert_eq!(
        service.verify_activation_code("user@x.com", &code).await.unwrap(),
        VerifyOutcome::Accepted
    );

    let account = service.login("user@x.com", "hunter2").await.unwrap();
    assert!(account.is_active);
    assert!(matches!(
        service.login("user@x.com", "wrong").await,
        Err(DomainError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_expired_activation_then_resend() {
    let clock = Arc::new(ManualClock::new(T0));
    let notifier = Arc::new(MockEmailNotifier::new(10));
    let service = AccountService::with_clock(
        Arc::new(InMemoryAccountRepository::new()),
        notifier.clone(),
        Arc::new(BcryptHasher::new(4)),
        clock.clone(),
        CodeLifecycleConfig::default(),
    );

    service.register("late@x.com", "pw").await.unwrap();
    let stale = notifier.last_code("late@x.com", CodePurpose::Activation).await.unwrap();
    clock.advance(601_000);
    assert_eq!(
        service.verify_activation_code("late@x.com", &stale).await.unwrap(),
        VerifyOutcome::Rejected(RejectReason::Expired)
    );

    service.resend_activation_code("late@x.com").await.unwrap();
    let fresh = notifier.last_code("late@x.com", CodePurpose::Activation).await.unwrap();
    assert_eq!(
        service.verify_activation_code("late@x.com", &fresh).await.unwrap(),
        VerifyOutcome::Accepted
    );
}
