//! Why a code was issued.

use serde::{Deserialize, Serialize};

/// The flow a code belongs to; selects the email wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    /// Standalone proof of email ownership
    Verification,
    /// Account activation after registration
    Activation,
}

impl CodePurpose {
    /// Stable identifier used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Verification => "verification",
            CodePurpose::Activation => "activation",
        }
    }

    /// Email subject line
    pub fn subject(&self) -> &'static str {
        match self {
            CodePurpose::Verification => "Your Verification Code",
            CodePurpose::Activation => "Your Account Activation Code",
        }
    }

    /// Noun used in message bodies ("verification code", "activation code")
    pub fn code_label(&self) -> &'static str {
        match self {
            CodePurpose::Verification => "verification code",
            CodePurpose::Activation => "activation code",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
