//! Version rewriters
//!
//! Each strategy is a pure transform from old file content to new file content;
//! the only I/O lives in [`rewrite_file`], so the transforms are testable
//! without touching disk.
//!
//! - [`document`]: version fields inside the config document itself
//! - [`marker`]: `__version__ = "..."` lines in a source file
//! - [`next_line`]: the line following a configured search prefix

pub mod document;
pub mod marker;
pub mod next_line;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{ReleaseConfig, ReplacePattern};
use crate::error::{BumpError, Result};

/// One file the release will rewrite, and how
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteTarget {
    /// Version fields of the config document
    Document { path: PathBuf },
    /// Source file carrying a `__version__ =` assignment
    MarkerLine { path: PathBuf },
    /// File rewritten by a named replace pattern
    NextLine {
        name: String,
        path: PathBuf,
        search: String,
        replace: String,
    },
}

impl RewriteTarget {
    pub fn from_pattern(pattern: &ReplacePattern, base: &Path) -> Self {
        RewriteTarget::NextLine {
            name: pattern.name.clone(),
            path: base.join(&pattern.file),
            search: pattern.search.clone(),
            replace: pattern.replace.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            RewriteTarget::Document { path }
            | RewriteTarget::MarkerLine { path }
            | RewriteTarget::NextLine { path, .. } => path,
        }
    }

    /// Writes `version` into the target file.
    ///
    /// The document target re-serializes the document held by `config`; the
    /// other targets read their file from disk. A document target without a
    /// loaded document is a no-op.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the file content changed
    /// * `Err` - If the file cannot be read or written
    pub fn apply(&self, config: &mut ReleaseConfig, version: &str) -> Result<bool> {
        match self {
            RewriteTarget::Document { path } => {
                let Some(doc) = config.document_mut() else {
                    return Ok(false);
                };
                let before = doc.to_string();
                let fields = document::set_version_fields(doc, version);
                if fields.is_empty() {
                    warn!("no version field found in {}", path.display());
                } else {
                    debug!("set {} in {}", fields.join(", "), path.display());
                }
                let after = doc.to_string();
                write_file(path, &after)?;
                Ok(after != before)
            }
            RewriteTarget::MarkerLine { path } => {
                rewrite_file(path, |old| marker::rewrite(old, version))
            }
            RewriteTarget::NextLine {
                name,
                path,
                search,
                replace,
            } => {
                debug!("applying replace pattern '{}'", name);
                let line = next_line::render(replace, version);
                rewrite_file(path, |old| next_line::rewrite(old, search, &line))
            }
        }
    }

    /// Short label for progress output
    pub fn kind(&self) -> &'static str {
        match self {
            RewriteTarget::Document { .. } => "version fields",
            RewriteTarget::MarkerLine { .. } => "__version__",
            RewriteTarget::NextLine { .. } => "replace pattern",
        }
    }
}

/// Reads `path`, applies `transform`, and writes the result back in place.
///
/// The file is written even when the content is unchanged.
///
/// # Returns
/// * `Ok(bool)` - Whether the content changed
/// * `Err` - If the file cannot be read or written
pub fn rewrite_file<F>(path: &Path, transform: F) -> Result<bool>
where
    F: FnOnce(&str) -> String,
{
    let old = fs::read_to_string(path).map_err(|e| BumpError::io(path, e))?;
    let new = transform(&old);
    let changed = new != old;

    write_file(path, &new)?;
    debug!("rewrote {} (changed: {})", path.display(), changed);

    Ok(changed)
}

/// Writes `content` to `path`, replacing the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| BumpError::io(path, e))
}

/// Line terminator of `line`; a final line without one counts as `\n`
fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// `text` with every line break written as `\r\n`
fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// Every rewrite the config asks for, in application order: document
/// fields, then the `__version__` file, then replace patterns.
///
/// Relative paths in the config resolve against `base`.
pub fn plan(config: &ReleaseConfig, base: &Path) -> Vec<RewriteTarget> {
    let mut targets = Vec::new();

    if config.has_document() {
        targets.push(RewriteTarget::Document {
            path: config.path().to_path_buf(),
        });
    }
    if let Some(version_file) = config.version_file() {
        targets.push(RewriteTarget::MarkerLine {
            path: base.join(version_file),
        });
    }
    for pattern in config.replace_patterns() {
        targets.push(RewriteTarget::from_pattern(pattern, base));
    }

    targets
}
