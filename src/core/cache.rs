//! Credential cache orchestration
//!
//! Ties the domain resolver, the prompter, and the secure store together
//! into the interactive acquisition flow: cached-and-unexpired entries
//! are returned without prompting for a password, everything else (miss,
//! expired, unreadable) goes through a fresh masked prompt and is
//! persisted with a fixed TTL.
//!
//! One cache key moves through `Absent -> Valid -> Expired -> Valid ...`;
//! absent and expired are indistinguishable to every read path here.

use crate::constants::CREDENTIAL_CACHE_TTL;
use crate::core::domain::resolve_domain;
use crate::core::executor::{CommandOutput, RemoteExecutor};
use crate::core::prompt::{suggested_username, Prompter};
use crate::core::store::SecureStore;
use crate::logger::{log_info, log_warn};
use crate::models::{CacheKey, Credentials, Username};
use crate::utils::{CredentialError, SessionError};
use std::sync::Arc;
use std::time::SystemTime;

/// Time-limited credential cache keyed by (service, account)
///
/// Both collaborators are injected capabilities so the flow can run
/// against an in-memory store and a scripted prompter under test.
pub struct CredentialCache {
    store: Arc<dyn SecureStore>,
    prompter: Arc<dyn Prompter>,
}

impl CredentialCache {
    /// Create a cache over a secure store and a prompter
    pub fn new(store: Arc<dyn SecureStore>, prompter: Arc<dyn Prompter>) -> Self {
        CredentialCache { store, prompter }
    }

    /// Get credentials for a hostname, prompting only on miss or expiry
    ///
    /// Flow:
    /// 1. Resolve the domain (may prompt for bare hostnames).
    /// 2. Prompt for the username with the current OS user as default.
    /// 3. Unexpired cached entry present: return it, no password prompt.
    /// 4. Otherwise prompt for the password (masked). An empty password
    ///    is an input error and nothing is returned or stored.
    /// 5. Persist with the fixed 4-hour TTL. Persistence failure is a
    ///    logged warning only; the fresh credentials are still returned.
    ///
    /// Store read failures on the way (lookup errors, malformed expiry
    /// stamps) are absorbed and degrade to a cache miss; they never
    /// surface to the caller.
    pub async fn get_credentials(&self, hostname: &str) -> Result<Credentials, CredentialError> {
        let domain = resolve_domain(hostname, self.prompter.as_ref())?;

        let suggested = suggested_username();
        let username = self
            .prompter
            .prompt_default(&format!("Username for {}", domain), &suggested)?;
        let username = Username::new(username)?;

        let key = CacheKey::for_domain(&domain, &username);

        if !self.store.is_expired(&key, SystemTime::now()).await {
            // Lookup errors are a miss, not a failure
            if let Ok(Some(password)) = self.store.get(&key).await {
                log_info(&format!("Using cached credentials for {}", key.account()));
                return Ok(Credentials::new(username, password));
            }
        }

        let password = self
            .prompter
            .prompt_password(&format!("Password for {}", key.account()))?;
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }

        match self.store.set(&key, &password, CREDENTIAL_CACHE_TTL).await {
            Ok(()) => log_info("Credentials cached for 4 hours"),
            Err(e) => log_warn(&format!(
                "Could not cache credentials for {}: {}",
                key.account(),
                e
            )),
        }

        Ok(Credentials::new(username, password))
    }

    /// Read-only probe: are valid cached credentials available?
    ///
    /// Resolves the domain and checks the entry for the *suggested*
    /// (current OS) username without prompting for one. Known
    /// limitation: if the operator overrode the username during capture,
    /// the cached entry lives under a different account and this probe
    /// reports `false` even though a usable credential exists.
    pub async fn credentials_available(&self, hostname: &str) -> Result<bool, CredentialError> {
        let domain = resolve_domain(hostname, self.prompter.as_ref())?;
        let username = Username::new(suggested_username())?;
        let key = CacheKey::for_domain(&domain, &username);

        if self.store.is_expired(&key, SystemTime::now()).await {
            return Ok(false);
        }
        Ok(matches!(self.store.get(&key).await, Ok(Some(_))))
    }

    /// Acquire credentials and run one remote command with them
    ///
    /// The credentials binding is scoped to this call: it is dropped
    /// (and its password memory zeroed) before returning, on both the
    /// success and the failure path. Executor errors surface unchanged
    /// as a generic [`SessionError`]; credential acquisition failures
    /// surface as an authentication failure.
    pub async fn execute_remote(
        &self,
        executor: &dyn RemoteExecutor,
        hostname: &str,
        command: &str,
    ) -> Result<CommandOutput, SessionError> {
        let credentials = self.get_credentials(hostname).await.map_err(|e| {
            log_warn(&format!("Credential acquisition failed: {}", e));
            SessionError::Authentication
        })?;

        executor.execute(hostname, &credentials, command).await
        // `credentials` dropped here on every path
    }
}
