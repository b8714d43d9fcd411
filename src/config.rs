use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use toml_edit::DocumentMut;

use crate::domain::MessageVersion;
use crate::error::{BumpError, Result};
use crate::rewrite::next_line;

/// Config document looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "pyproject.toml";

/// A named `[tool.bump_version.replace_patterns.<name>]` rule.
///
/// Every line starting with `search` has the line after it replaced by
/// `replace`, with `{version}` substituted by the normalized version.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReplacePattern {
    #[serde(skip)]
    pub name: String,
    pub file: PathBuf,
    pub search: String,
    pub replace: String,
}

impl ReplacePattern {
    /// The replacement line with `{version}` filled in
    pub fn render(&self, version: &str) -> String {
        next_line::render(&self.replace, version)
    }
}

#[derive(Debug, Deserialize, Default)]
struct PyProject {
    #[serde(default)]
    tool: Option<ToolSection>,
}

#[derive(Debug, Deserialize, Default)]
struct ToolSection {
    #[serde(default)]
    bump_version: Option<BumpVersionSection>,
}

/// Raw shape of `[tool.bump_version]`; every key is optional.
#[derive(Debug, Deserialize, Default)]
struct BumpVersionSection {
    #[serde(default)]
    version_file: Option<PathBuf>,

    #[serde(default)]
    replace_patterns: Option<toml::Table>,

    #[serde(default)]
    message_version: Option<String>,
}

/// Release settings read from the project's config document.
///
/// Holds the format-preserving document itself (for the version-field
/// rewrite) next to the typed `[tool.bump_version]` settings. A missing
/// document yields an empty config, so every rewrite group reads as "not
/// configured".
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    path: PathBuf,
    document: Option<DocumentMut>,
    version_file: Option<PathBuf>,
    replace_patterns: Vec<ReplacePattern>,
    message_version: MessageVersion,
}

impl ReleaseConfig {
    /// Config with no backing document
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        ReleaseConfig {
            path: path.into(),
            document: None,
            version_file: None,
            replace_patterns: Vec::new(),
            message_version: MessageVersion::default(),
        }
    }

    /// Loads the config document at `path`.
    ///
    /// # Returns
    /// * `Ok(ReleaseConfig)` - Parsed config, or an empty one if the file does not exist
    /// * `Err` - If the file exists but cannot be read, parsed, or has an invalid
    ///   `[tool.bump_version]` section
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no config document at {}", path.display());
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(BumpError::io(path, e)),
        };

        Self::parse(path, &content)
    }

    /// Parses config `content` as if it had been read from `path`
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let document = content
            .parse::<DocumentMut>()
            .map_err(|source| BumpError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let pyproject: PyProject = toml::from_str(content).map_err(|e| {
            BumpError::config(format!(
                "invalid [tool.bump_version] section in {}: {}",
                path.display(),
                e.message()
            ))
        })?;
        let section = pyproject
            .tool
            .and_then(|tool| tool.bump_version)
            .unwrap_or_default();

        let message_version = match section.message_version.as_deref() {
            None => MessageVersion::default(),
            Some(value) => MessageVersion::from_config(value).ok_or_else(|| {
                BumpError::config(format!(
                    "message_version must be \"raw\" or \"normalized\", got \"{}\"",
                    value
                ))
            })?,
        };

        let mut replace_patterns = Vec::new();
        for (name, value) in section.replace_patterns.unwrap_or_default() {
            let mut pattern: ReplacePattern = value.try_into().map_err(|e: toml::de::Error| {
                BumpError::config(format!(
                    "replace pattern '{}' in {}: {}",
                    name,
                    path.display(),
                    e.message()
                ))
            })?;
            pattern.name = name;
            replace_patterns.push(pattern);
        }

        debug!(
            "loaded {} (version_file: {:?}, {} replace pattern(s))",
            path.display(),
            section.version_file,
            replace_patterns.len()
        );

        Ok(ReleaseConfig {
            path: path.to_path_buf(),
            document: Some(document),
            version_file: section.version_file,
            replace_patterns,
            message_version,
        })
    }

    /// Path the document was (or would have been) read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&DocumentMut> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut DocumentMut> {
        self.document.as_mut()
    }

    /// `[tool.bump_version] version_file`, if configured
    pub fn version_file(&self) -> Option<&Path> {
        self.version_file.as_deref()
    }

    /// Replace patterns in document order
    pub fn replace_patterns(&self) -> &[ReplacePattern] {
        &self.replace_patterns
    }

    pub fn message_version(&self) -> MessageVersion {
        self.message_version
    }

    /// The version currently recorded in the document.
    ///
    /// Reads `project.version`, falling back to `tool.poetry.version`.
    pub fn current_version(&self) -> Option<&str> {
        let doc = self.document.as_ref()?;
        doc.get("project")
            .and_then(|project| project.get("version"))
            .and_then(|v| v.as_str())
            .or_else(|| {
                doc.get("tool")
                    .and_then(|tool| tool.get("poetry"))
                    .and_then(|poetry| poetry.get("version"))
                    .and_then(|v| v.as_str())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ReleaseConfig> {
        ReleaseConfig::parse(Path::new("pyproject.toml"), content)
    }

    #[test]
    fn test_missing_file_yields_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReleaseConfig::load(&dir.path().join("pyproject.toml")).unwrap();
        assert!(!config.has_document());
        assert!(config.version_file().is_none());
        assert!(config.replace_patterns().is_empty());
        assert_eq!(config.current_version(), None);
    }

    #[test]
    fn test_document_without_tool_section() {
        let config = parse("[project]\nname = \"demo\"\nversion = \"0.1.0\"\n").unwrap();
        assert!(config.has_document());
        assert!(config.version_file().is_none());
        assert!(config.replace_patterns().is_empty());
        assert_eq!(config.message_version(), MessageVersion::Raw);
        assert_eq!(config.current_version(), Some("0.1.0"));
    }

    #[test]
    fn test_full_bump_version_section() {
        let config = parse(
            r#"
[project]
version = "1.0.0"

[tool.bump_version]
version_file = "demo/__init__.py"
message_version = "normalized"

[tool.bump_version.replace_patterns.readme]
file = "README.md"
search = "<!-- version -->"
replace = "version {version}\n"

[tool.bump_version.replace_patterns.docs]
file = "docs/index.md"
search = "Current:"
replace = "{version}\n"
"#,
        )
        .unwrap();

        assert_eq!(config.version_file(), Some(Path::new("demo/__init__.py")));
        assert_eq!(config.message_version(), MessageVersion::Normalized);

        let names: Vec<&str> = config
            .replace_patterns()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["readme", "docs"]);

        let readme = &config.replace_patterns()[0];
        assert_eq!(readme.file, PathBuf::from("README.md"));
        assert_eq!(readme.search, "<!-- version -->");
        assert_eq!(readme.render("1.2.3"), "version 1.2.3\n");
    }

    #[test]
    fn test_poetry_version_is_current_fallback() {
        let config = parse("[tool.poetry]\nversion = \"2.0.0\"\n").unwrap();
        assert_eq!(config.current_version(), Some("2.0.0"));
    }

    #[test]
    fn test_parse_failure_is_fatal() {
        let err = parse("[project\nversion = 1").unwrap_err();
        assert!(matches!(err, BumpError::ConfigParse { .. }));
    }

    #[test]
    fn test_pattern_missing_key_is_config_error() {
        let err = parse(
            r#"
[tool.bump_version.replace_patterns.broken]
file = "README.md"
search = "x"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, BumpError::Config(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_unknown_message_version_rejected() {
        let err = parse("[tool.bump_version]\nmessage_version = \"both\"\n").unwrap_err();
        assert!(err.to_string().contains("message_version"));
    }

    #[test]
    fn test_other_tool_sections_are_ignored() {
        let config = parse(
            r#"
[tool.black]
line-length = 100

[tool.poetry.dependencies]
python = "^3.10"
"#,
        )
        .unwrap();
        assert!(config.version_file().is_none());
        assert!(config.replace_patterns().is_empty());
    }
}
