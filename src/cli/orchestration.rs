//! Main release workflow orchestration logic
//!
//! Runs the release as an ordered list of named [Step]s:
//!
//! ```text
//! check-untracked → check-uncommitted → rewrite-files → stage → commit → push → tag → push-tags
//! ```
//!
//! Each step either succeeds or halts the run; later steps never execute and
//! earlier ones are not undone. Keeping this apart from `main.rs` lets the
//! sequence be driven programmatically (and against a mock repository)
//! without clap.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::{ReleaseConfig, DEFAULT_CONFIG_PATH};
use crate::domain::{Step, VersionTag};
use crate::error::Result;
use crate::git::Repository;
use crate::precondition;
use crate::rewrite;
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Version exactly as supplied by the user, e.g. `v1.2.3`
    pub version: String,

    /// Config document; relative paths resolve against `workdir`
    pub config_path: Option<PathBuf>,

    /// Directory the release runs in; config-relative paths resolve against it
    pub workdir: PathBuf,
}

impl ReleaseArgs {
    pub fn new(version: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        ReleaseArgs {
            version: version.into(),
            config_path: None,
            workdir: workdir.into(),
        }
    }

    /// Absolute location of the config document
    pub fn config_location(&self) -> PathBuf {
        let path = self
            .config_path
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        self.workdir.join(path)
    }
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    /// The tag that was created and pushed (the raw version argument)
    pub tag: String,

    /// The version written into files
    pub version: String,

    /// Commit and tag message
    pub message: String,

    /// Every file the rewrite step wrote, in order
    pub rewritten: Vec<PathBuf>,

    /// Steps that completed, in order
    pub completed: Vec<Step>,
}

/// Main release workflow
///
/// Orchestrates the entire release:
/// 1. Refuse to run with untracked files or uncommitted changes
/// 2. Load the config and rewrite every configured version string
/// 3. Stage, commit, push, tag and push tags
///
/// # Arguments
///
/// * `args` - Version, config location and working directory
/// * `repo` - Git capability the workflow runs against
///
/// # Returns
///
/// The release report, or the error of the first step that failed
pub fn run_release<R: Repository + ?Sized>(args: &ReleaseArgs, repo: &R) -> Result<ReleaseReport> {
    let tag = VersionTag::new(args.version.clone());
    let mut message = tag.message(Default::default());
    let mut rewritten = Vec::new();
    let mut completed = Vec::new();

    for step in Step::ALL {
        ui::display_step(step);
        info!("step {}", step);

        let outcome = match step {
            Step::CheckUntracked => precondition::check_untracked(repo),
            Step::CheckUncommitted => precondition::check_uncommitted(repo),
            Step::RewriteFiles => ReleaseConfig::load(&args.config_location()).and_then(|config| {
                message = tag.message(config.message_version());
                rewrite_files(config, &args.workdir, &tag, &mut rewritten)
            }),
            Step::Stage => repo.stage_all(),
            Step::Commit => repo.commit(&message),
            Step::Push => repo.push(),
            Step::Tag => repo.tag(tag.raw(), &message),
            Step::PushTags => repo.push_tags(),
        };

        if let Err(err) = outcome {
            error!("release halted at step '{}': {}", step, err);
            let touched = step != Step::RewriteFiles || !rewritten.is_empty();
            if step.is_mutating() && touched {
                ui::display_recovery_hint(step, tag.raw(), &message);
            }
            return Err(err);
        }
        if step == Step::CheckUncommitted {
            ui::display_success("Working tree is clean");
        }
        completed.push(step);
    }

    Ok(ReleaseReport {
        tag: tag.raw().to_string(),
        version: tag.normalized().to_string(),
        message,
        rewritten,
        completed,
    })
}

/// Applies every configured rewrite, recording each file as it is written.
fn rewrite_files(
    mut config: ReleaseConfig,
    workdir: &Path,
    tag: &VersionTag,
    rewritten: &mut Vec<PathBuf>,
) -> Result<()> {
    let targets = rewrite::plan(&config, workdir);
    if targets.is_empty() {
        info!("no config document at {}, nothing to rewrite", config.path().display());
        ui::display_status("No version files configured");
        return Ok(());
    }

    for target in &targets {
        let changed = target.apply(&mut config, tag.normalized())?;
        rewritten.push(target.path().to_path_buf());
        let shown = target
            .path()
            .strip_prefix(workdir)
            .unwrap_or_else(|_| target.path());
        ui::display_rewrite(target.kind(), &shown.display().to_string(), changed);
    }
    Ok(())
}
