//! SMTP notifier implementation.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use mg_core::domain::CodePurpose;
use mg_core::errors::NotificationError;
use mg_core::services::Notifier;
use mg_shared::config::EmailConfig;
use mg_shared::utils::validation::mask_email;

use super::templates::CodeEmailContent;
use crate::InfrastructureError;

/// Sends codes through an SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    ttl_minutes: i64,
}

impl SmtpNotifier {
    /// Build the transport from configuration; nothing is sent until the
    /// first message.
    pub fn new(config: &EmailConfig, ttl_minutes: i64) -> Result<Self, InfrastructureError> {
        let smtp = &config.smtp;

        let mut builder = if smtp.use_tls {
            let tls_params = TlsParameters::new(smtp.host.clone()).map_err(|e| {
                InfrastructureError::Config(format!("TLS configuration error: {}", e))
            })?;

            // Port 465 uses implicit TLS (SMTPS), other ports use STARTTLS
            if smtp.port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
                    .map_err(|e| InfrastructureError::Config(format!("SMTP relay error: {}", e)))?
                    .port(smtp.port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                    .map_err(|e| InfrastructureError::Config(format!("SMTP relay error: {}", e)))?
                    .port(smtp.port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host).port(smtp.port)
        };

        if let (Some(user), Some(pass)) = (&smtp.username, &smtp.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = config
            .sender()
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        tracing::info!(host = %smtp.host, port = smtp.port, "SMTP notifier configured");

        Ok(Self {
            transport: builder.build(),
            from,
            ttl_minutes,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(
        &self,
        identity: &str,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<(), NotificationError> {
        let to = identity
            .parse::<Mailbox>()
            .map_err(|_| NotificationError::InvalidRecipient {
                recipient: mask_email(identity),
            })?;

        let content = CodeEmailContent::new(purpose, code, self.ttl_minutes);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(content.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html),
                    ),
            )
            .map_err(|e| NotificationError::delivery(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(NotificationError::delivery)?;

        tracing::info!(
            identity = %mask_email(identity),
            purpose = %purpose,
            event = "email_sent",
            "Code email sent"
        );

        Ok(())
    }
}
