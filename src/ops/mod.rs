//! Operation handlers and their shared request/response plumbing.
//!
//! Every handler follows the same three-phase contract: narrow the untyped parameter bag,
//! check the path against the policy, then perform the filesystem action and fold any IO
//! failure into a failure [`OperationResult`]. Handlers never return `Err` and never
//! panic on IO problems.

use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::params::ParamError;
use crate::policy::PathPolicy;

mod delete;
mod list;
mod mkdir;
mod read;
mod write;

pub use delete::delete_file;
pub use list::list_files;
pub use mkdir::create_directory;
pub use read::read_file;
pub use write::write_file;


/// Shared state for operation calls: an immutable policy, nothing else.
#[derive(Debug)]
pub struct Context {
    policy: PathPolicy,
}

impl Context {
    pub fn new(policy: PathPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    pub fn read_file(&self, params: &serde_json::Value) -> OperationResult {
        read_file(self, params)
    }

    pub fn write_file(&self, params: &serde_json::Value) -> OperationResult {
        write_file(self, params)
    }

    pub fn list_files(&self, params: &serde_json::Value) -> OperationResult {
        list_files(self, params)
    }

    pub fn delete_file(&self, params: &serde_json::Value) -> OperationResult {
        delete_file(self, params)
    }

    pub fn create_directory(&self, params: &serde_json::Value) -> OperationResult {
        create_directory(self, params)
    }
}

/// Uniform outcome of every operation: success with optional payload, or failure with a
/// stable human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OperationResult {
    pub fn success_with_data(data: Payload) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    pub(super) fn invalid_parameters(err: &ParamError) -> Self {
        debug!(error = %err, "rejected operation parameters");
        Self::failure("invalid parameters")
    }

    /// Deliberately generic: which safety rule fired is never revealed to the caller.
    pub(super) fn unsafe_path(path: &str) -> Self {
        debug!(path, "rejected unsafe path");
        Self::failure("unsafe path")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Entries(Vec<FileEntry>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Present only for regular files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<SystemTime>,
}
