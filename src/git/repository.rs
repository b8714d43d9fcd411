use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Repository as Git2Repo, Status, StatusOptions};
use log::debug;

use crate::domain::Step;
use crate::error::{BumpError, Result};

/// A git working tree: `git2` for status queries, the `git` binary for
/// everything that changes the repository or talks to a remote.
pub struct GitRepository {
    repo: Git2Repo,
    workdir: PathBuf,
}

impl GitRepository {
    /// Open the repository containing `path`, searching parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("bare repository has no working tree"))?
            .to_path_buf();

        debug!("opened git repository at {}", workdir.display());
        Ok(GitRepository { repo, workdir })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir);
        cmd
    }

    /// Runs one git command with inherited stdio; a non-zero exit fails `step`
    fn run(&self, step: Step, args: &[&str]) -> Result<()> {
        let command = display_command(args);
        debug!("[{}] running `{}`", step, command);

        let status = self
            .git_cmd()
            .args(args)
            .status()
            .map_err(|source| BumpError::CommandSpawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BumpError::StepFailed {
                step,
                command,
                status,
            });
        }
        Ok(())
    }
}

/// Renders argv the way a user would type it, quoting arguments with spaces
fn display_command(args: &[&str]) -> String {
    let mut parts = vec!["git".to_string()];
    for arg in args {
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            parts.push(format!("\"{}\"", arg));
        } else {
            parts.push(arg.to_string());
        }
    }
    parts.join(" ")
}

impl super::Repository for GitRepository {
    fn list_untracked(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .include_ignored(false)
            .recurse_untracked_dirs(true);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(statuses
            .iter()
            .filter(|entry| entry.status().contains(Status::WT_NEW))
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(statuses.iter().any(|entry| {
            let status = entry.status();
            !status.is_empty() && !status.intersects(Status::WT_NEW | Status::IGNORED)
        }))
    }

    fn stage_all(&self) -> Result<()> {
        self.run(Step::Stage, &["add", "."])
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(Step::Commit, &["commit", "-m", message])
    }

    fn push(&self) -> Result<()> {
        self.run(Step::Push, &["push"])
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.run(Step::Tag, &["tag", "-a", name, "-m", message])
    }

    fn push_tags(&self) -> Result<()> {
        self.run(Step::PushTags, &["push", "--tags"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;

    fn init_repo() -> (tempfile::TempDir, Git2Repo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn commit_all(repo: &Git2Repo) {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &parents)
            .unwrap();
    }

    #[test]
    fn test_display_command_quotes_spaces() {
        assert_eq!(
            display_command(&["commit", "-m", "bump version to v1.0.0"]),
            "git commit -m \"bump version to v1.0.0\""
        );
        assert_eq!(display_command(&["push", "--tags"]), "git push --tags");
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GitRepository::open(dir.path()).is_err());
    }

    #[test]
    fn test_clean_repository_has_no_findings() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();
        commit_all(&repo);

        let git = GitRepository::open(dir.path()).unwrap();
        assert!(git.list_untracked().unwrap().is_empty());
        assert!(!git.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_untracked_respects_gitignore() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join(".gitignore"), "build/\n").unwrap();
        commit_all(&repo);

        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("build/out.bin"), "x").unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notes/todo.txt"), "x").unwrap();

        let git = GitRepository::open(dir.path()).unwrap();
        assert_eq!(git.list_untracked().unwrap(), vec!["notes/todo.txt"]);
        assert!(!git.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_modified_tracked_file_is_uncommitted() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();
        commit_all(&repo);
        fs::write(dir.path().join("README.md"), "changed\n").unwrap();

        let git = GitRepository::open(dir.path()).unwrap();
        assert!(git.has_uncommitted_changes().unwrap());
        assert!(git.list_untracked().unwrap().is_empty());
    }
}
