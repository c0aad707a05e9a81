//! Test doubles for the credential flow
//!
//! An in-memory secure store with failure-injection knobs, a scripted
//! prompter, and a mock executor. Used to exercise the cache logic
//! without an OS credential store, a terminal, or real servers.

use crate::core::executor::{CommandOutput, RemoteExecutor};
use crate::core::prompt::Prompter;
use crate::core::store::{encode_expiry_stamp, expiry_for_ttl, SecureStore};
use crate::models::{CacheKey, Credentials, SecureString};
use crate::utils::{CredentialError, SessionError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// In-memory secure store
///
/// Entries are `(password, expiry stamp)` pairs. `seed` writes raw
/// entries with arbitrary stamps so tests can simulate clock advance or
/// corrupted metadata without waiting out a TTL.
pub struct MemoryStore {
    entries: Mutex<HashMap<CacheKey, (String, String)>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Store whose reads all fail (lookup-error scenarios)
    pub fn failing_reads() -> Self {
        MemoryStore {
            fail_reads: true,
            ..Self::new()
        }
    }

    /// Store whose writes all fail (persist-error scenarios)
    pub fn failing_writes() -> Self {
        MemoryStore {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Insert an entry with a raw stamp, bypassing the TTL computation
    pub fn seed(&self, key: &CacheKey, password: &str, stamp: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), (password.to_string(), stamp.to_string()));
    }

    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl SecureStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<SecureString>, CredentialError> {
        if self.fail_reads {
            return Err(CredentialError::Platform("simulated read failure".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(password, _)| SecureString::new(password.clone())))
    }

    async fn set(
        &self,
        key: &CacheKey,
        password: &SecureString,
        ttl: Duration,
    ) -> Result<(), CredentialError> {
        if self.fail_writes {
            return Err(CredentialError::Platform("simulated write failure".into()));
        }
        let stamp = encode_expiry_stamp(expiry_for_ttl(SystemTime::now(), ttl));
        let mut entries = self.entries.lock().unwrap();
        // Delete-then-create, as the real backends do
        entries.remove(key);
        entries.insert(key.clone(), (password.as_str().to_string(), stamp));
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CredentialError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn expiry_stamp(&self, key: &CacheKey) -> Result<Option<String>, CredentialError> {
        if self.fail_reads {
            return Err(CredentialError::Platform("simulated read failure".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, stamp)| stamp.clone()))
    }
}

/// Prompter that replays scripted answers
///
/// Text answers and passwords are consumed in order; an empty scripted
/// text answer accepts the prompt's default, matching interactive
/// behavior. Running out of scripted answers panics, which makes an
/// unexpected prompt (e.g. a password prompt on a cache hit) fail the
/// test loudly.
pub struct ScriptedPrompter {
    text: Mutex<VecDeque<String>>,
    passwords: Mutex<VecDeque<String>>,
    text_prompts: Mutex<usize>,
    password_prompts: Mutex<usize>,
}

impl ScriptedPrompter {
    pub fn new(text: Vec<String>, passwords: Vec<String>) -> Self {
        ScriptedPrompter {
            text: Mutex::new(text.into()),
            passwords: Mutex::new(passwords.into()),
            text_prompts: Mutex::new(0),
            password_prompts: Mutex::new(0),
        }
    }

    /// Prompter that expects never to be asked anything
    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }

    /// Prompter with text answers only
    pub fn with_text(text: Vec<String>) -> Self {
        Self::new(text, vec![])
    }

    pub fn prompts_seen(&self) -> usize {
        *self.text_prompts.lock().unwrap()
    }

    pub fn password_prompts_seen(&self) -> usize {
        *self.password_prompts.lock().unwrap()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_default(&self, message: &str, default: &str) -> Result<String, CredentialError> {
        *self.text_prompts.lock().unwrap() += 1;
        let answer = self
            .text
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected text prompt: {}", message));
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn prompt_password(&self, message: &str) -> Result<SecureString, CredentialError> {
        *self.password_prompts.lock().unwrap() += 1;
        let answer = self
            .passwords
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected password prompt: {}", message));
        Ok(SecureString::new(answer))
    }
}

/// Mock remote executor recording every call
pub struct MockExecutor {
    fail: bool,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        MockExecutor {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Executor that simulates an unreachable host
    pub fn unreachable() -> Self {
        MockExecutor {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(hostname, username, command)` per call, in order
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteExecutor for MockExecutor {
    async fn execute(
        &self,
        hostname: &str,
        credentials: &Credentials,
        command: &str,
    ) -> Result<CommandOutput, SessionError> {
        self.calls.lock().unwrap().push((
            hostname.to_string(),
            credentials.username().as_str().to_string(),
            command.to_string(),
        ));
        if self.fail {
            return Err(SessionError::Connection("Connection timeout".to_string()));
        }
        Ok(CommandOutput {
            status_code: 0,
            stdout: "Mock PowerShell execution result".to_string(),
            stderr: String::new(),
        })
    }
}
