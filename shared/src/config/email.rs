//! Email delivery configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Email provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Deliver through an SMTP relay
    Smtp,
    /// Log messages instead of sending them
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" | "console" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host name
    pub host: String,
    /// Relay port (465 uses implicit TLS, anything else STARTTLS)
    pub port: u16,
    /// Login user
    #[serde(default)]
    pub username: Option<String>,
    /// Login password
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Require TLS
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("smtp.gmail.com"),
            port: 587,
            username: None,
            password: None,
            use_tls: default_use_tls(),
        }
    }
}

/// Email configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Which provider delivers messages
    pub provider: EmailProvider,

    /// SMTP settings, used when `provider` is `smtp`
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Sender address
    pub from_address: String,

    /// Optional sender display name
    #[serde(default)]
    pub from_name: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Smtp,
            smtp: SmtpConfig::default(),
            from_address: String::from("no-reply@mailgate.local"),
            from_name: Some(String::from("MailGate")),
        }
    }
}

impl EmailConfig {
    /// Mock provider configuration
    pub fn mock() -> Self {
        Self {
            provider: EmailProvider::Mock,
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// `EMAIL_USER` / `EMAIL_PASS` are accepted as fallbacks for the SMTP
    /// login, and `EMAIL_USER` doubles as the sender address when
    /// `EMAIL_FROM` is not set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let username = std::env::var("SMTP_USERNAME")
            .or_else(|_| std::env::var("EMAIL_USER"))
            .ok();
        let password = std::env::var("SMTP_PASSWORD")
            .or_else(|_| std::env::var("EMAIL_PASS"))
            .ok();
        let from_address = std::env::var("EMAIL_FROM")
            .ok()
            .or_else(|| username.clone())
            .unwrap_or(defaults.from_address);

        Self {
            provider: env_or("EMAIL_PROVIDER", EmailProvider::Mock),
            smtp: SmtpConfig {
                host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp.host),
                port: env_or("SMTP_PORT", defaults.smtp.port),
                username,
                password,
                use_tls: env_or("SMTP_USE_TLS", defaults.smtp.use_tls),
            },
            from_address,
            from_name: std::env::var("EMAIL_FROM_NAME").ok().or(defaults.from_name),
        }
    }

    /// Sender mailbox in `Name <address>` form
    pub fn sender(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_address),
            None => self.from_address.clone(),
        }
    }
}

fn default_use_tls() -> bool {
    true
}
