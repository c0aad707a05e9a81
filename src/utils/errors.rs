//! Error types for the credential cache
//!
//! All error types use thiserror for clean error handling.
//! SECURITY: Error messages MUST NOT contain passwords or sensitive data.

/// Errors from credential storage and acquisition
///
/// Propagation policy: secure-store read anomalies are absorbed by the
/// cache (degraded to "absent/expired") and never reach the caller as
/// this type. What does reach the caller: interactive-input failures,
/// invalid usernames, and store *write* failures from direct
/// [`SecureStore::set`](crate::core::SecureStore::set) calls.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Credential not found: {0}")]
    NotFound(String),

    #[error("Secure store error: {0}")]
    Platform(String),

    #[error("Interactive prompt failed: {0}")]
    Prompt(String),

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Invalid username format: {0}")]
    InvalidUsername(String),
}

/// Errors from remote command execution (the transport collaborator)
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Authentication failed")]
    Authentication,

    #[error("Command execution failed: {0}")]
    CommandFailed(String),
}
