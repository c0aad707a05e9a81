//! Hostname to domain resolution
//!
//! Derives the cache/service domain from a hostname: an FQDN yields
//! everything after its first label, a bare hostname falls back to an
//! interactive prompt.

use crate::core::prompt::Prompter;
use crate::utils::CredentialError;

/// Resolve the domain for a hostname
///
/// `host.sub.example.com` resolves to `sub.example.com` with no I/O. A
/// hostname without a usable domain part (no dot, or a trailing dot with
/// nothing after it) prompts the operator, suggesting `<hostname>.local`;
/// empty input accepts the suggestion. The result is always non-empty.
///
/// Side effect: may block on interactive input.
pub fn resolve_domain(hostname: &str, prompter: &dyn Prompter) -> Result<String, CredentialError> {
    if let Some((_, domain)) = hostname.split_once('.') {
        if !domain.is_empty() {
            return Ok(domain.to_string());
        }
    }

    let bare = hostname.trim_end_matches('.');
    let suggested = format!("{}.local", bare);
    prompter.prompt_default(&format!("Enter domain for {}", bare), &suggested)
}
