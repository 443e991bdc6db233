//! Email delivery for issued codes.
//!
//! - **SMTP**: real delivery through lettre
//! - **Mock**: logs instead of sending; for development and tests

pub mod mock_email;
pub mod smtp;
pub mod templates;


pub use mock_email::MockEmailNotifier;
pub use smtp::SmtpNotifier;
pub use templates::CodeEmailContent;

use std::sync::Arc;

use mg_core::services::Notifier;
use mg_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

/// Create the notifier selected by configuration
///
/// `ttl_minutes` is quoted in the message body.
pub fn create_notifier(
    config: &EmailConfig,
    ttl_minutes: i64,
) -> Result<Arc<dyn Notifier>, InfrastructureError> {
    match config.provider {
        EmailProvider::Smtp => Ok(Arc::new(SmtpNotifier::new(config, ttl_minutes)?)),
        EmailProvider::Mock => {
            tracing::warn!("Using mock email notifier; codes are only logged");
            Ok(Arc::new(MockEmailNotifier::new(ttl_minutes)))
        }
    }
}
