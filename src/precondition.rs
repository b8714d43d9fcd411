use std::fmt;

use log::debug;

use crate::error::Result;
use crate::git::Repository;

/// Working-tree states that block a release.
/// Reported before anything is rewritten, committed or pushed.
#[derive(Debug, Clone, PartialEq)]
pub enum PreconditionViolation {
    /// Files exist that are neither tracked nor ignored
    UntrackedFiles { paths: Vec<String> },
    /// Tracked files differ from the last commit
    UncommittedChanges,
}

impl std::error::Error for PreconditionViolation {}

impl fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionViolation::UntrackedFiles { paths } => {
                write!(
                    f,
                    "There are untracked files. Use `git status` to see the files.\n\
                     Please remove or commit the files before running the command."
                )?;
                for path in paths.iter().take(10) {
                    write!(f, "\n  {}", path)?;
                }
                if paths.len() > 10 {
                    write!(f, "\n  ... and {} more", paths.len() - 10)?;
                }
                Ok(())
            }
            PreconditionViolation::UncommittedChanges => write!(
                f,
                "There are uncommitted changes. Use `git status` to see the changes.\n\
                 Please commit the changes before running the command."
            ),
        }
    }
}

/// Fails if any untracked, non-ignored file exists
pub fn check_untracked<R: Repository + ?Sized>(repo: &R) -> Result<()> {
    let paths = repo.list_untracked()?;
    debug!("{} untracked file(s)", paths.len());
    if !paths.is_empty() {
        return Err(PreconditionViolation::UntrackedFiles { paths }.into());
    }
    Ok(())
}

/// Fails if the tracked tree differs from HEAD
pub fn check_uncommitted<R: Repository + ?Sized>(repo: &R) -> Result<()> {
    if repo.has_uncommitted_changes()? {
        return Err(PreconditionViolation::UncommittedChanges.into());
    }
    Ok(())
}

/// Runs both working-tree checks, untracked files first
pub fn check_preconditions<R: Repository + ?Sized>(repo: &R) -> Result<()> {
    check_untracked(repo)?;
    check_uncommitted(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BumpError;
    use crate::git::MockRepository;

    #[test]
    fn test_clean_tree_passes() {
        let repo = MockRepository::new();
        assert!(check_preconditions(&repo).is_ok());
    }

    #[test]
    fn test_untracked_reported_first() {
        let mut repo = MockRepository::new();
        repo.add_untracked("notes.txt");
        repo.set_uncommitted(true);

        let err = check_preconditions(&repo).unwrap_err();
        match err {
            BumpError::Precondition(PreconditionViolation::UntrackedFiles { paths }) => {
                assert_eq!(paths, vec!["notes.txt".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_uncommitted_changes_block() {
        let mut repo = MockRepository::new();
        repo.set_uncommitted(true);

        let err = check_preconditions(&repo).unwrap_err();
        assert!(matches!(
            err,
            BumpError::Precondition(PreconditionViolation::UncommittedChanges)
        ));
    }

    #[test]
    fn test_messages_are_actionable() {
        let untracked = PreconditionViolation::UntrackedFiles {
            paths: vec!["a.txt".to_string()],
        }
        .to_string();
        assert!(untracked.contains("git status"));
        assert!(untracked.contains("a.txt"));

        let uncommitted = PreconditionViolation::UncommittedChanges.to_string();
        assert!(uncommitted.contains("commit the changes"));
    }

    #[test]
    fn test_long_untracked_list_is_truncated() {
        let paths: Vec<String> = (0..15).map(|i| format!("file{i}.txt")).collect();
        let msg = PreconditionViolation::UntrackedFiles { paths }.to_string();
        assert!(msg.contains("file9.txt"));
        assert!(!msg.contains("file10.txt"));
        assert!(msg.contains("... and 5 more"));
    }
}
