use std::cell::RefCell;
use std::collections::HashSet;

use crate::domain::Step;
use crate::error::{BumpError, Result};
use crate::git::Repository;

/// A call made against [MockRepository], in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    ListUntracked,
    HasUncommittedChanges,
    StageAll,
    Commit { message: String },
    Push,
    Tag { name: String, message: String },
    PushTags,
}

impl GitCall {
    /// Whether the call would change the repository or a remote
    pub fn is_mutating(&self) -> bool {
        !matches!(self, GitCall::ListUntracked | GitCall::HasUncommittedChanges)
    }
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    untracked: Vec<String>,
    uncommitted: bool,
    failing: HashSet<Step>,
    calls: RefCell<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a clean mock repository where every command succeeds
    pub fn new() -> Self {
        MockRepository {
            untracked: Vec::new(),
            uncommitted: false,
            failing: HashSet::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Report `path` as an untracked file
    pub fn add_untracked(&mut self, path: impl Into<String>) {
        self.untracked.push(path.into());
    }

    /// Report tracked changes relative to HEAD
    pub fn set_uncommitted(&mut self, uncommitted: bool) {
        self.uncommitted = uncommitted;
    }

    /// Make the command behind `step` fail
    pub fn fail_on(&mut self, step: Step) {
        self.failing.insert(step);
    }

    /// Every call recorded so far
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    /// Recorded calls that would have changed the repository
    pub fn mutating_calls(&self) -> Vec<GitCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.is_mutating())
            .cloned()
            .collect()
    }

    fn record(&self, step: Step, call: GitCall) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.failing.contains(&step) {
            return Err(BumpError::StepRejected {
                step,
                reason: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_untracked(&self) -> Result<Vec<String>> {
        self.record(Step::CheckUntracked, GitCall::ListUntracked)?;
        Ok(self.untracked.clone())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        self.record(Step::CheckUncommitted, GitCall::HasUncommittedChanges)?;
        Ok(self.uncommitted)
    }

    fn stage_all(&self) -> Result<()> {
        self.record(Step::Stage, GitCall::StageAll)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(
            Step::Commit,
            GitCall::Commit {
                message: message.to_string(),
            },
        )
    }

    fn push(&self) -> Result<()> {
        self.record(Step::Push, GitCall::Push)
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(
            Step::Tag,
            GitCall::Tag {
                name: name.to_string(),
                message: message.to_string(),
            },
        )
    }

    fn push_tags(&self) -> Result<()> {
        self.record(Step::PushTags, GitCall::PushTags)
    }
}
