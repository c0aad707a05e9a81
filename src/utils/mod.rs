//! Shared utilities

pub mod errors;

pub use errors::{CredentialError, SessionError};
