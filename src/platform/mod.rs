//! Platform-specific implementations (Windows only)
//!
//! CRITICAL: All unsafe Windows API code lives here, behind the
//! platform-agnostic traits from `core`.

pub mod credman;

pub use credman::WindowsCredentialManager;
