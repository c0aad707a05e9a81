//! Platform-agnostic secure storage trait and expiry-stamp handling
//!
//! The expiry policy lives here rather than in platform code so every
//! backend shares the same bias: **fail-safe-as-expired**. Any ambiguity
//! about a stored entry (missing, unreadable, malformed stamp) resolves
//! toward re-authentication, never toward reusing a possibly-stale or
//! corrupted secret.

use crate::constants::EXPIRY_STAMP_PREFIX;
use crate::models::{CacheKey, SecureString};
use crate::utils::CredentialError;
use async_trait::async_trait;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Platform-agnostic secure credential storage
///
/// Implementations handle platform-specific secure storage (Windows
/// Credential Manager, in-memory test store, etc.), addressed by a
/// [`CacheKey`]. Each entry holds one password plus an expiry stamp in
/// an associated comment/metadata field.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Retrieve the password stored under a key
    ///
    /// # Returns
    /// * `Ok(Some(password))` - If an entry exists
    /// * `Ok(None)` - If no entry is stored (not an error)
    /// * `Err(CredentialError)` - If the lookup itself failed
    ///
    /// Callers on the cache read path treat `Err` the same as `Ok(None)`.
    async fn get(&self, key: &CacheKey) -> Result<Option<SecureString>, CredentialError>;

    /// Store a password under a key with a time-to-live
    ///
    /// Implementations MUST first attempt an unconditional delete of any
    /// existing entry for the key (ignoring failure) so that overwrites
    /// never accumulate duplicates, then create the new entry with an
    /// `expires:<unixSeconds>` stamp in the comment field.
    ///
    /// # Errors
    /// Fails loudly if the create step fails; the prior delete is
    /// best-effort.
    ///
    /// # Security
    /// - Credentials MUST be stored encrypted at rest
    /// - MUST use OS-provided secure storage in production backends
    /// - MUST NOT log password values
    async fn set(
        &self,
        key: &CacheKey,
        password: &SecureString,
        ttl: Duration,
    ) -> Result<(), CredentialError>;

    /// Delete the entry for a key
    ///
    /// # Returns
    /// * `Ok(())` - Success (idempotent - succeeds even if no entry exists)
    async fn delete(&self, key: &CacheKey) -> Result<(), CredentialError>;

    /// Read the raw expiry stamp (comment field) for a key
    ///
    /// # Returns
    /// * `Ok(Some(stamp))` - The stored comment, expected `expires:<n>`
    /// * `Ok(None)` - No entry, or entry without a comment
    async fn expiry_stamp(&self, key: &CacheKey) -> Result<Option<String>, CredentialError>;

    /// Whether the entry for a key is expired at `now`
    ///
    /// Fail-safe-as-expired: a missing entry, a read error, or a stamp
    /// that does not match `expires:<int>` all count as expired, forcing
    /// re-authentication instead of trusting ambiguous state.
    async fn is_expired(&self, key: &CacheKey, now: SystemTime) -> bool {
        match self.expiry_stamp(key).await {
            Ok(Some(stamp)) => match parse_expiry_stamp(&stamp) {
                Some(expires_at) => unix_seconds(now) > expires_at,
                None => true,
            },
            Ok(None) | Err(_) => true,
        }
    }
}

/// Encode an absolute expiry time as the on-store stamp
pub fn encode_expiry_stamp(expires_at_unix: u64) -> String {
    format!("{}{}", EXPIRY_STAMP_PREFIX, expires_at_unix)
}

/// Parse an `expires:<unixSeconds>` stamp
///
/// The grammar is strict: the exact prefix followed by one or more ASCII
/// digits and nothing else. Signs, whitespace, or trailing characters
/// make the stamp unparsable (`None`), which read paths treat as expired.
pub fn parse_expiry_stamp(stamp: &str) -> Option<u64> {
    let digits = stamp.strip_prefix(EXPIRY_STAMP_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Absolute expiry for an entry written at `now` with the given TTL
pub fn expiry_for_ttl(now: SystemTime, ttl: Duration) -> u64 {
    unix_seconds(now).saturating_add(ttl.as_secs())
}

/// Seconds since the Unix epoch (0 for pre-epoch clocks)
pub fn unix_seconds(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
