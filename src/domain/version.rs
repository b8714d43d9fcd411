use std::fmt;

/// Strip a single leading `v` from a version tag.
///
/// No other transformation is applied and the remainder is not validated as a
/// semantic version: `"vv1.0.0"` becomes `"v1.0.0"`, `"1.0.0"` stays as is.
pub fn normalize(raw: &str) -> &str {
    raw.strip_prefix('v').unwrap_or(raw)
}

/// Which form of the version goes into commit and tag messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageVersion {
    /// The argument exactly as the user typed it, prefix included
    #[default]
    Raw,
    /// The version with its leading `v` stripped
    Normalized,
}

impl MessageVersion {
    /// Parse the `message_version` config value
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "raw" => Some(MessageVersion::Raw),
            "normalized" => Some(MessageVersion::Normalized),
            _ => None,
        }
    }
}

/// A version argument as supplied on the command line.
///
/// The raw form names the tag; the normalized form is what gets written into
/// files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    raw: String,
}

impl VersionTag {
    pub fn new(raw: impl Into<String>) -> Self {
        VersionTag { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        normalize(&self.raw)
    }

    /// The version string used in commit and tag messages
    pub fn for_message(&self, choice: MessageVersion) -> &str {
        match choice {
            MessageVersion::Raw => self.raw(),
            MessageVersion::Normalized => self.normalized(),
        }
    }

    /// Commit and tag message, e.g. `bump version to v1.2.3`
    pub fn message(&self, choice: MessageVersion) -> String {
        format!("bump version to {}", self.for_message(choice))
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
