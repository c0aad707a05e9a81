//! Domain model types

pub mod credentials;

pub use credentials::{CacheKey, Credentials, SecureString, Username};
