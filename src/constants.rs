//! # Application-Wide Constants
//!
//! Centralized configuration values and magic numbers used throughout the
//! credential cache.
//!
//! ## Design Rationale
//!
//! Constants are defined here (rather than scattered across modules) to:
//! - Make configuration changes easier (single source of truth)
//! - Improve discoverability (grep for constant name finds definition + all uses)
//! - Document WHY each value was chosen

use std::time::Duration;

// ============================================================================
// Cache Key Namespacing (durable on-store contract)
// ============================================================================

/// Prefix for secure-store service names: `winrm-mcp-<domain>`
///
/// **Contract**: this prefix plus the `<domain>\<user>` account format is
/// what previously cached entries were written under. Changing either
/// orphans every existing entry, so they are frozen here.
pub const SERVICE_PREFIX: &str = "winrm-mcp-";

// ============================================================================
// Expiry Policy
// ============================================================================

/// How long a cached credential stays valid after capture.
///
/// **Rationale**: 4 hours covers a working session of remote
/// administration without leaving a usable secret in the store
/// overnight. Fixed by policy, not exposed through the cache API.
pub const CREDENTIAL_CACHE_TTL: Duration = Duration::from_secs(4 * 3600);

/// Prefix of the expiry stamp stored in the secure-store comment field.
///
/// Full grammar is `expires:<unixSeconds>`, ASCII digits only after the
/// colon. Anything that deviates is treated as unparsable, which the
/// read path resolves as "expired".
pub const EXPIRY_STAMP_PREFIX: &str = "expires:";

// ============================================================================
// Input Limits
// ============================================================================

/// Maximum hostname length (characters)
///
/// **Rationale**: DNS hostnames limited to 253 characters (RFC 1035),
/// but 255 gives buffer for display and matches common validation.
pub const MAX_HOSTNAME_LENGTH: usize = 255;

/// Maximum username length (characters)
///
/// Matches the cap used for `DOMAIN\user` style names on Windows.
pub const MAX_USERNAME_LENGTH: usize = 256;

// ============================================================================
// Remote Execution (collaborator defaults)
// ============================================================================

/// Default WinRM HTTP port (PowerShell Remoting).
pub const DEFAULT_WINRM_PORT: u16 = 5985;

/// Upper bound for a single remote command execution.
///
/// **Rationale**: 30 seconds allows slow cmdlets (WMI enumeration on
/// loaded servers) while preventing indefinite hangs on dead hosts.
pub const WINRM_OPERATION_TIMEOUT_SECS: u64 = 30;
