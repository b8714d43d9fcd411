//! User interface module.
//!
//! All terminal output of a release run goes through [formatter]; log lines
//! (`RUST_LOG`) are separate and go to stderr via `env_logger`.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_recovery_hint, display_release_summary, display_rewrite, display_status,
    display_step, display_success,
};
