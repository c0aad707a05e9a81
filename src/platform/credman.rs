//! Windows Credential Manager storage backend
//!
//! This module contains all unsafe Windows API code for credential
//! storage. Entries are generic credentials encrypted at rest by DPAPI
//! and tied to the user account. The expiry stamp (`expires:<n>`) rides
//! in the credential's Comment field, next to the password blob it
//! governs, so one entry carries both the secret and its lifetime.
//!
//! Key mapping: a [`CacheKey`] `(service, account)` becomes the target
//! name `<service>:<account>`, with the account also recorded in the
//! credential's UserName field.

use crate::core::store::{encode_expiry_stamp, expiry_for_ttl, SecureStore};
use crate::models::{CacheKey, SecureString};
use crate::utils::CredentialError;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::time::{Duration, SystemTime};
use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::FILETIME;
use windows::Win32::Security::Credentials::{
    CredDeleteW, CredFree, CredReadW, CredWriteW, CREDENTIALW, CRED_FLAGS,
    CRED_PERSIST_LOCAL_MACHINE, CRED_TYPE_GENERIC,
};

/// Windows Credential Manager implementation of [`SecureStore`]
///
/// Uses CredRead/CredWrite/CredDelete APIs.
///
/// # Security
/// - Credentials encrypted at rest using DPAPI
/// - Keys tied to user account
/// - Credentials never logged or exposed
pub struct WindowsCredentialManager;

impl WindowsCredentialManager {
    /// Create a new Windows credential manager instance
    pub fn new() -> Self {
        WindowsCredentialManager
    }

    fn target_name(key: &CacheKey) -> String {
        format!("{}:{}", key.service(), key.account())
    }
}

impl Default for WindowsCredentialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecureStore for WindowsCredentialManager {
    async fn get(&self, key: &CacheKey) -> Result<Option<SecureString>, CredentialError> {
        // Delegate to synchronous implementation (Windows APIs are synchronous)
        self.get_sync(key)
    }

    async fn set(
        &self,
        key: &CacheKey,
        password: &SecureString,
        ttl: Duration,
    ) -> Result<(), CredentialError> {
        self.set_sync(key, password, ttl)
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CredentialError> {
        self.delete_sync(key)
    }

    async fn expiry_stamp(&self, key: &CacheKey) -> Result<Option<String>, CredentialError> {
        self.stamp_sync(key)
    }
}

/// Encode a Rust string as a null-terminated UTF-16 buffer
fn to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}

impl WindowsCredentialManager {
    /// Synchronous retrieve implementation
    fn get_sync(&self, key: &CacheKey) -> Result<Option<SecureString>, CredentialError> {
        unsafe {
            let target_name = to_wide(&Self::target_name(key));
            let mut pcred = std::ptr::null_mut();

            match CredReadW(
                PCWSTR::from_raw(target_name.as_ptr()),
                CRED_TYPE_GENERIC,
                0,
                &mut pcred,
            ) {
                Ok(_) => {
                    // SAFETY: pcred is valid after successful CredReadW
                    let cred = &*(pcred as *const CREDENTIALW);

                    // Extract password from credential blob (stored as UTF-16)
                    let password_bytes = std::slice::from_raw_parts(
                        cred.CredentialBlob,
                        cred.CredentialBlobSize as usize,
                    );

                    // Convert byte pairs to u16 values (UTF-16 characters)
                    let password_wide: Vec<u16> = password_bytes
                        .chunks_exact(2)
                        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
                        .collect();

                    let password = String::from_utf16(&password_wide)
                        .map_err(|e| {
                            CredentialError::Platform(format!(
                                "Failed to decode password for '{}': {:?}",
                                key, e
                            ))
                        })?
                        .trim_end_matches('\0')
                        .to_string();

                    // CRITICAL: Free the credential allocated by Windows
                    CredFree(pcred as *const _);

                    Ok(Some(SecureString::new(password)))
                }
                Err(_) => {
                    // Credential not found - this is not an error, just None
                    Ok(None)
                }
            }
        }
    }

    /// Synchronous comment/stamp read implementation
    fn stamp_sync(&self, key: &CacheKey) -> Result<Option<String>, CredentialError> {
        unsafe {
            let target_name = to_wide(&Self::target_name(key));
            let mut pcred = std::ptr::null_mut();

            match CredReadW(
                PCWSTR::from_raw(target_name.as_ptr()),
                CRED_TYPE_GENERIC,
                0,
                &mut pcred,
            ) {
                Ok(_) => {
                    // SAFETY: pcred is valid after successful CredReadW
                    let cred = &*(pcred as *const CREDENTIALW);

                    let stamp = if !cred.Comment.is_null() {
                        match PWSTR::from_raw(cred.Comment.0).to_string() {
                            Ok(s) => Some(s),
                            // Undecodable comment: report absent, the
                            // expiry policy resolves that as expired
                            Err(_) => None,
                        }
                    } else {
                        None
                    };

                    CredFree(pcred as *const _);
                    Ok(stamp)
                }
                Err(_) => Ok(None),
            }
        }
    }

    /// Synchronous store implementation
    ///
    /// Deletes any existing entry first (best-effort) so a write always
    /// leaves exactly one entry per key, then creates the new entry
    /// with the expiry stamp in the Comment field.
    fn set_sync(
        &self,
        key: &CacheKey,
        password: &SecureString,
        ttl: Duration,
    ) -> Result<(), CredentialError> {
        let _ = self.delete_sync(key);

        let stamp = encode_expiry_stamp(expiry_for_ttl(SystemTime::now(), ttl));

        unsafe {
            // Convert strings to UTF-16 (wide) format required by Windows APIs
            let password_wide = to_wide(password.as_str());
            let target_name = to_wide(&Self::target_name(key));
            let username_wide = to_wide(key.account());
            let comment_wide = to_wide(&stamp);

            // Build CREDENTIALW structure for Windows Credential Manager
            // SAFETY: All pointers are valid for the duration of the CredWriteW call
            let cred = CREDENTIALW {
                Flags: CRED_FLAGS(0),
                Type: CRED_TYPE_GENERIC,
                TargetName: PWSTR(target_name.as_ptr() as *mut u16),
                Comment: PWSTR(comment_wide.as_ptr() as *mut u16),
                LastWritten: FILETIME::default(),
                // Size in BYTES (UTF-16 chars are 2 bytes each)
                CredentialBlobSize: (password_wide.len() * 2) as u32,
                CredentialBlob: password_wide.as_ptr() as *mut u8,
                Persist: CRED_PERSIST_LOCAL_MACHINE,
                AttributeCount: 0,
                Attributes: std::ptr::null_mut(),
                TargetAlias: PWSTR::null(),
                UserName: PWSTR(username_wide.as_ptr() as *mut u16),
            };

            // Call Windows API to store credential
            CredWriteW(&cred, 0).map_err(|e| {
                CredentialError::Platform(format!(
                    "Failed to save credentials for '{}': {:?}",
                    key, e
                ))
            })?;
        }

        Ok(())
    }

    /// Synchronous delete implementation
    fn delete_sync(&self, key: &CacheKey) -> Result<(), CredentialError> {
        unsafe {
            let target_name = to_wide(&Self::target_name(key));

            // CredDeleteW returns error if credential doesn't exist,
            // but we treat this as success (idempotent delete)
            let result = CredDeleteW(PCWSTR::from_raw(target_name.as_ptr()), CRED_TYPE_GENERIC, 0);

            match result {
                Ok(_) => Ok(()),
                Err(e) => {
                    // Check if error is "not found" - treat as success
                    // ERROR_NOT_FOUND = 0x80070490
                    let error_code = e.code().0;
                    if error_code == 0x80070490u32 as i32 {
                        Ok(())
                    } else {
                        Err(CredentialError::Platform(format!(
                            "Failed to delete credentials for '{}': {:?}",
                            key, e
                        )))
                    }
                }
            }
        }
    }
}
