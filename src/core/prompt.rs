//! Interactive prompting seam
//!
//! Prompts are modeled as a trait so the credential flow can be driven
//! by a scripted implementation under test. Prompts block indefinitely
//! awaiting operator input; no timeout is applied.

use crate::models::SecureString;
use crate::utils::CredentialError;

/// Interactive input capability
pub trait Prompter: Send + Sync {
    /// Prompt for a text value with a suggested default
    ///
    /// Empty input accepts the default; the result is never empty.
    fn prompt_default(&self, message: &str, default: &str) -> Result<String, CredentialError>;

    /// Prompt for a password with masked (non-echoing) input
    fn prompt_password(&self, message: &str) -> Result<SecureString, CredentialError>;
}

/// Terminal prompter for interactive use
pub struct ConsolePrompter;

impl ConsolePrompter {
    pub fn new() -> Self {
        ConsolePrompter
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn prompt_default(&self, message: &str, default: &str) -> Result<String, CredentialError> {
        let value = inquire::Text::new(message)
            .with_default(default)
            .prompt()
            .map_err(|e| CredentialError::Prompt(e.to_string()))?;

        let trimmed = value.trim();
        if trimmed.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }

    fn prompt_password(&self, message: &str) -> Result<SecureString, CredentialError> {
        let password = inquire::Password::new(message)
            .without_confirmation()
            .prompt()
            .map_err(|e| CredentialError::Prompt(e.to_string()))?;

        Ok(SecureString::new(password))
    }
}

/// Suggested username: the current OS user
///
/// Falls back to `Administrator` when neither `USERNAME` (Windows) nor
/// `USER` (Unix) is set.
pub fn suggested_username() -> String {
    std::env::var("USERNAME")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_else(|_| "Administrator".to_string())
}
