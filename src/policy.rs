use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const DEFAULT_BLOCKED_ROOTS: &[&str] =
    &["/etc", "/usr", "/bin", "/sbin", "/var", "/sys", "/proc"];
const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    ".txt", ".json", ".md", ".csv", ".log", ".xml", ".yaml", ".yml",
];
const DEFAULT_BLOCKED_EXTENSIONS: &[&str] = &[".exe", ".bat", ".sh", ".ps1", ".cmd"];

/// Immutable configuration deciding which paths operations may touch.
///
/// Roots are directory prefixes; a blocked root always overrides an allowed one, and a
/// blocked extension always overrides an allowed one. Extensions carry their leading dot
/// and must be lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathPolicy {
    pub allowed_roots: Vec<PathBuf>,
    #[serde(default)]
    pub blocked_roots: Vec<PathBuf>,
    /// When defined and non-empty, only paths with one of these extensions pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_extensions: Option<BTreeSet<String>>,
    /// Declared cap on file content size in bytes.
    ///
    /// No handler enforces this cap today; callers wanting one must layer it on top of
    /// read/write.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

const fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

impl PathPolicy {
    /// Policy permitting a single root, with no extension rules and the default size cap.
    pub fn single_root(root: impl Into<PathBuf>) -> Self {
        Self {
            allowed_roots: vec![root.into()],
            blocked_roots: Vec::new(),
            allowed_extensions: None,
            blocked_extensions: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// The stock policy, rooted at an explicit working directory.
    ///
    /// Allows text-like extensions under `dir`, blocks the usual system directories and
    /// executable-like extensions, and caps file size at 10 MiB. The base directory is a
    /// parameter rather than ambient process state so the policy stays testable.
    pub fn with_working_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            allowed_roots: vec![dir.into()],
            blocked_roots: DEFAULT_BLOCKED_ROOTS.iter().map(PathBuf::from).collect(),
            allowed_extensions: Some(
                DEFAULT_ALLOWED_EXTENSIONS
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect(),
            ),
            blocked_extensions: Some(
                DEFAULT_BLOCKED_EXTENSIONS
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect(),
            ),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Structural validation only: no filesystem IO, roots are not checked for existence.
    pub fn validate(&self) -> Result<()> {
        if self.allowed_roots.is_empty() {
            return Err(Error::InvalidPolicy("allowed_roots is empty".to_string()));
        }
        for root in self.allowed_roots.iter().chain(&self.blocked_roots) {
            if root.as_os_str().is_empty() {
                return Err(Error::InvalidPolicy(
                    "root paths must not be empty".to_string(),
                ));
            }
        }
        validate_extensions(self.allowed_extensions.as_ref(), "allowed_extensions")?;
        validate_extensions(self.blocked_extensions.as_ref(), "blocked_extensions")?;
        if self.max_file_size == 0 {
            return Err(Error::InvalidPolicy(
                "max_file_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_extensions(extensions: Option<&BTreeSet<String>>, field: &str) -> Result<()> {
    let Some(extensions) = extensions else {
        return Ok(());
    };
    for ext in extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(Error::InvalidPolicy(format!(
                "{field} entries must start with '.' and name an extension: {ext:?}"
            )));
        }
        if ext.chars().any(|ch| ch.is_ascii_uppercase()) {
            return Err(Error::InvalidPolicy(format!(
                "{field} entries must be lowercase: {ext:?}"
            )));
        }
    }
    Ok(())
}
