//! Interactive credential acquisition CLI
//!
//! Captures and caches credentials for a remote Windows host so that
//! subsequent non-interactive tooling finds them ready in the secure
//! store. `--check` probes availability without capturing anything.

use clap::Parser;
use winrm_credcache::constants::MAX_HOSTNAME_LENGTH;
use winrm_credcache::logger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hostname or FQDN of the remote Windows host
    hostname: String,

    /// Only check whether valid cached credentials exist (exit 1 if not)
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_logger();

    if args.hostname.trim().is_empty() {
        anyhow::bail!("Hostname cannot be empty");
    }
    if args.hostname.len() > MAX_HOSTNAME_LENGTH {
        anyhow::bail!("Hostname exceeds maximum length ({})", MAX_HOSTNAME_LENGTH);
    }

    run(args).await
}

#[cfg(windows)]
async fn run(args: Args) -> anyhow::Result<()> {
    use std::sync::Arc;
    use winrm_credcache::platform::WindowsCredentialManager;
    use winrm_credcache::{ConsolePrompter, CredentialCache, CredentialError};

    let cache = CredentialCache::new(
        Arc::new(WindowsCredentialManager::new()),
        Arc::new(ConsolePrompter::new()),
    );

    if args.check {
        if cache.credentials_available(&args.hostname).await? {
            println!("Valid cached credentials are available for {}", args.hostname);
            return Ok(());
        }
        println!(
            "No valid cached credentials for {}; run `winrm-credcache {}` to authenticate",
            args.hostname, args.hostname
        );
        std::process::exit(1);
    }

    match cache.get_credentials(&args.hostname).await {
        Ok(credentials) => {
            println!("Credentials ready for {}", credentials.username());
            Ok(())
        }
        Err(CredentialError::EmptyPassword) => {
            eprintln!("Password cannot be empty");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(not(windows))]
async fn run(_args: Args) -> anyhow::Result<()> {
    eprintln!(
        "winrm-credcache requires the Windows Credential Manager; \
         no secure store backend is available on this platform"
    );
    std::process::exit(2);
}
