//! Email templates for verification and activation codes.

use mg_core::domain::CodePurpose;

/// Rendered email for one code
#[derive(Debug, Clone)]
pub struct CodeEmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl CodeEmailContent {
    /// Render the email for `code`, stating that it expires after
    /// `ttl_minutes`.
    pub fn new(purpose: CodePurpose, code: &str, ttl_minutes: i64) -> Self {
        Self {
            subject: purpose.subject().to_string(),
            text: Self::text_template(purpose, code, ttl_minutes),
            html: Self::html_template(purpose, code, ttl_minutes),
        }
    }

    fn text_template(purpose: CodePurpose, code: &str, ttl_minutes: i64) -> String {
        format!(
            r#"Your {label} is: {code}

This code will expire in {ttl} minutes.

If you didn't request this code, please ignore this email."#,
            label = purpose.code_label(),
            code = code,
            ttl = ttl_minutes
        )
    }

    fn html_template(purpose: CodePurpose, code: &str, ttl_minutes: i64) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; background: #f5f5f5; }}
        .card {{ max-width: 520px; margin: 40px auto; background: white; border-radius: 8px; padding: 32px; }}
        .code {{ font-size: 32px; font-weight: bold; letter-spacing: 8px; text-align: center; padding: 20px; background: #f0f7ff; border-radius: 8px; font-family: monospace; }}
        .expires {{ color: #666; font-size: 14px; text-align: center; }}
    </style>
</head>
<body>
    <div class="card">
        <p>Your {label} is:</p>
        <div class="code">{code}</div>
        <p class="expires">This code will expire in {ttl} minutes.</p>
        <p>If you didn't request this code, please ignore this email.</p>
    </div>
</body>
</html>"#,
            label = purpose.code_label(),
            code = code,
            ttl = ttl_minutes
        )
    }
}
