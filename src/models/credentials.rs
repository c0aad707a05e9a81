//! Domain model types for the credential cache
//!
//! SECURITY: Credential types implement Drop to clear sensitive data.

use crate::constants::{MAX_USERNAME_LENGTH, SERVICE_PREFIX};
use crate::utils::CredentialError;
use std::fmt;

/// Windows username in various formats
///
/// Valid formats:
/// - `user` (local user)
/// - `.\\user` (explicit local user)
/// - `DOMAIN\\user` (domain user)
/// - `user@domain.com` (UPN format)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Create a new username after validation
    pub fn new(username: impl Into<String>) -> Result<Self, CredentialError> {
        let username = username.into();

        if username.is_empty() {
            return Err(CredentialError::InvalidUsername(
                "Username cannot be empty".to_string(),
            ));
        }

        if username.len() > MAX_USERNAME_LENGTH {
            return Err(CredentialError::InvalidUsername(format!(
                "Username exceeds maximum length ({})",
                MAX_USERNAME_LENGTH
            )));
        }

        Ok(Username(username))
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = CredentialError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Username::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = CredentialError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Username::new(value)
    }
}

/// Password that zeros memory on drop
///
/// SECURITY: This type never implements Display or Debug in a way that
/// reveals the password.
pub struct SecureString(String);

impl Clone for SecureString {
    fn clone(&self) -> Self {
        SecureString(self.0.clone())
    }
}

impl SecureString {
    /// Create a new secure string
    pub fn new(password: impl Into<String>) -> Self {
        SecureString(password.into())
    }

    /// Get the password as a string slice
    ///
    /// Use this sparingly and only when necessary for API calls.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the length of the password
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the password is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for SecureString {
    fn drop(&mut self) {
        // Zero the memory
        // SAFETY: We own this String and are zeroing it before drop
        unsafe {
            let bytes = self.0.as_bytes_mut();
            for byte in bytes {
                std::ptr::write_volatile(byte, 0);
            }
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SECURITY: Never reveal the password content
        write!(f, "SecureString(*** {} bytes ***)", self.0.len())
    }
}

/// Domain credentials for Windows authentication
#[derive(Clone, Debug)]
pub struct Credentials {
    username: Username,
    password: SecureString,
}

impl Credentials {
    /// Create new credentials
    pub fn new(username: Username, password: SecureString) -> Self {
        Credentials { username, password }
    }

    /// Get the username
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Get the password
    pub fn password(&self) -> &SecureString {
        &self.password
    }
}

/// Secure-store address of one cached credential
///
/// `service` is `winrm-mcp-<domain>`, `account` is `<domain>\<user>`.
/// These exact formats are a durable on-store contract: entries written
/// by earlier versions are addressed the same way, so neither half may
/// change shape. At most one live entry exists per key; writes
/// overwrite, they never accumulate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    service: String,
    account: String,
}

impl CacheKey {
    /// Build the key for a resolved domain and username
    pub fn for_domain(domain: &str, username: &Username) -> Self {
        CacheKey {
            service: format!("{}{}", SERVICE_PREFIX, domain),
            account: format!("{}\\{}", domain, username.as_str()),
        }
    }

    /// Service half of the key (`winrm-mcp-<domain>`)
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Account half of the key (`<domain>\<user>`)
    pub fn account(&self) -> &str {
        &self.account
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("user").is_ok());
        assert!(Username::new("DOMAIN\\user").is_ok());
        assert!(Username::new("user@domain.com").is_ok());
        assert!(Username::new(".\\user").is_ok());
        assert!(Username::new("").is_err());
        assert!(Username::new("a".repeat(300)).is_err());
    }

    #[test]
    fn test_secure_string_drops() {
        let password = SecureString::new("secret");
        assert_eq!(password.len(), 6);
        // Drop happens automatically here
    }

    #[test]
    fn test_secure_string_debug_no_leak() {
        let password = SecureString::new("secret123");
        let debug_output = format!("{:?}", password);
        assert!(!debug_output.contains("secret"));
        assert!(debug_output.contains("9 bytes"));
    }

    #[test]
    fn test_cache_key_formats() {
        let user = Username::new("svc_probe").unwrap();
        let key = CacheKey::for_domain("corp.example.com", &user);
        assert_eq!(key.service(), "winrm-mcp-corp.example.com");
        assert_eq!(key.account(), "corp.example.com\\svc_probe");
    }

    #[test]
    fn test_cache_key_equality() {
        let user = Username::new("admin").unwrap();
        let a = CacheKey::for_domain("corp.local", &user);
        let b = CacheKey::for_domain("corp.local", &user);
        let c = CacheKey::for_domain("other.local", &user);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
