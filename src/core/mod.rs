//! Core business logic (platform-agnostic)
//!
//! CRITICAL: This module MUST NOT import platform-specific code or UI frameworks.

pub mod cache;
pub mod domain;
pub mod executor;
pub mod prompt;
pub mod store;

// Test doubles (tests only)
#[cfg(test)]
pub mod mock;

pub use cache::CredentialCache;
pub use domain::resolve_domain;
pub use executor::{commands, CommandOutput, RemoteExecutor};
pub use prompt::{suggested_username, ConsolePrompter, Prompter};
pub use store::SecureStore;
