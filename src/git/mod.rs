//! Git operations abstraction layer
//!
//! The release sequence only ever talks to git through the [Repository]
//! trait, so the orchestration logic can be exercised against a fake.
//!
//! - [repository::GitRepository]: the real implementation. Status queries go
//!   through `git2`; mutating steps shell out to the `git` binary so that the
//!   user's credentials, hooks and signing config apply as usual.
//! - [mock::MockRepository]: records calls and injects failures for tests
//!
//! ```rust,no_run
//! # use bump_version::git::{GitRepository, Repository};
//! # fn example() -> bump_version::Result<()> {
//! let repo = GitRepository::open(".")?;
//! if repo.list_untracked()?.is_empty() && !repo.has_uncommitted_changes()? {
//!     repo.stage_all()?;
//!     repo.commit("bump version to v1.0.0")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitCall, MockRepository};
pub use repository::GitRepository;

use crate::error::Result;

/// The git primitives a release needs.
///
/// Query methods are read-only. Every mutating method maps to exactly one
/// git command and fails with [crate::error::BumpError::StepFailed] (or
/// `StepRejected`) naming that step when the command does not succeed.
pub trait Repository {
    /// Paths of files that are neither tracked nor excluded by ignore rules
    fn list_untracked(&self) -> Result<Vec<String>>;

    /// Whether any tracked file (staged or not) differs from HEAD
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Stage every change in the working tree (`git add .`)
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged changes with `message`
    fn commit(&self, message: &str) -> Result<()>;

    /// Push the current branch to its upstream
    fn push(&self) -> Result<()>;

    /// Create an annotated tag `name` at HEAD
    fn tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push all tags to the default remote
    fn push_tags(&self) -> Result<()>;
}
