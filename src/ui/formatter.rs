//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic for the release run.
//! Diagnostics go to stdout, next to the progress lines they follow.

use console::style;

use crate::domain::Step;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    println!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Announce a release step as it starts.
pub fn display_step(step: Step) {
    display_status(&step_description(step));
}

/// Human wording for each release step
pub fn step_description(step: Step) -> String {
    match step {
        Step::CheckUntracked => "Checking for untracked files".to_string(),
        Step::CheckUncommitted => "Checking for uncommitted changes".to_string(),
        Step::RewriteFiles => "Rewriting version strings".to_string(),
        Step::Stage => "Staging changes".to_string(),
        Step::Commit => "Committing".to_string(),
        Step::Push => "Pushing commits".to_string(),
        Step::Tag => "Creating tag".to_string(),
        Step::PushTags => "Pushing tags".to_string(),
    }
}

/// Report one rewritten file.
///
/// # Arguments
/// * `kind` - What was rewritten (e.g. "__version__")
/// * `path` - The file, as shown to the user
/// * `changed` - Whether the content actually changed
pub fn display_rewrite(kind: &str, path: &str, changed: bool) {
    if changed {
        println!("  {} {} ({})", style("✎").cyan(), path, kind);
    } else {
        println!("  {} {} ({}, already up to date)", style("·").dim(), path, kind);
    }
}

/// What the operator still has to do by hand after `failed` halted a release.
///
/// Steps before `failed` have taken effect and are not undone; the hint lists
/// the git commands for the remaining ones. Returns `None` when nothing in the
/// repository changed yet.
pub fn recovery_hint(failed: Step, tag: &str, message: &str) -> Option<String> {
    if !failed.is_mutating() {
        return None;
    }

    let remaining: Vec<String> = Step::ALL
        .iter()
        .skip_while(|s| **s != failed)
        .filter_map(|s| match s {
            Step::Stage => Some("git add .".to_string()),
            Step::Commit => Some(format!("git commit -m \"{}\"", message)),
            Step::Push => Some("git push".to_string()),
            Step::Tag => Some(format!("git tag -a {} -m \"{}\"", tag, message)),
            Step::PushTags => Some("git push --tags".to_string()),
            Step::CheckUntracked | Step::CheckUncommitted | Step::RewriteFiles => None,
        })
        .collect();

    let mut hint = String::from(
        "The release stopped part way; earlier steps were not undone.\n\
         Inspect the repository with `git status`, fix the problem, then finish with:",
    );
    for cmd in remaining {
        hint.push_str("\n  ");
        hint.push_str(&cmd);
    }
    Some(hint)
}

/// Display the manual recovery instructions for a halted release.
pub fn display_recovery_hint(failed: Step, tag: &str, message: &str) {
    if let Some(hint) = recovery_hint(failed, tag, message) {
        println!("\n{} {}", style("→").yellow(), hint);
    }
}

/// Display the final summary of a successful release.
pub fn display_release_summary(tag: &str, files: usize) {
    println!(
        "\n{} Released {} ({} file(s) rewritten)\n",
        style("✓").green().bold(),
        style(tag).bold(),
        files
    );
}
