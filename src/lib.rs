//! winrm-credcache - time-limited credential cache for WinRM automation
//!
//! Core library exposing platform-agnostic types and traits.

// Public modules
pub mod constants;
pub mod core;
pub mod logger;
pub mod models;
pub mod utils;

// Platform-specific modules
#[cfg(windows)]
pub mod platform;

// Re-export commonly used types
pub use crate::core::{
    resolve_domain, suggested_username, CommandOutput, ConsolePrompter, CredentialCache, Prompter,
    RemoteExecutor, SecureStore,
};
pub use crate::models::{CacheKey, Credentials, SecureString, Username};
pub use crate::utils::{CredentialError, SessionError};
