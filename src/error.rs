use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::domain::Step;
use crate::precondition::PreconditionViolation;

/// Unified error type for bump-version operations.
///
/// Variants wrapping another error expose it through `source()` instead of
/// repeating it in their message; print with `{:#}` (anyhow) to see the chain.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),

    #[error("Failed to parse {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution failed at step '{step}': `{command}` exited with {status}")]
    StepFailed {
        step: Step,
        command: String,
        status: ExitStatus,
    },

    #[error("Command execution failed at step '{step}': {reason}")]
    StepRejected { step: Step, reason: String },

    #[error("Failed to run `{command}`")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation failed")]
    Git(#[from] git2::Error),
}

/// Convenience type alias for Results in bump-version
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BumpError::Io {
            path: path.into(),
            source,
        }
    }

    /// The release step this error halted, if it came from one
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            BumpError::StepFailed { step, .. } | BumpError::StepRejected { step, .. } => {
                Some(*step)
            }
            _ => None,
        }
    }
}
