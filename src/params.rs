//! Structural validation of per-operation parameter bags.
//!
//! Each operation accepts an untyped [`serde_json::Value`]; the functions here narrow it
//! into a typed parameter struct or report a tagged [`ParamError`]. Nothing in this module
//! inspects the filesystem or the policy; those checks happen later in the handlers.

use serde_json::{Map, Value};
use thiserror::Error;

/// Longest accepted request path, in bytes.
pub const MAX_PATH_BYTES: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("parameters must be an object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("file path is empty")]
    EmptyPath,

    #[error("file path is too long ({len} bytes; max 4096)")]
    PathTooLong { len: usize },

    #[error("file path contains a NUL byte")]
    PathContainsNul,
}

#[derive(Debug, Clone)]
pub struct ReadParams {
    pub path: String,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WriteParams {
    pub path: String,
    pub content: String,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListParams {
    pub path: String,
    pub recursive: bool,
    /// Validated for shape but unused by the filesystem layer.
    pub include_hidden: bool,
}

#[derive(Debug, Clone)]
pub struct DeleteParams {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct MkdirParams {
    pub path: String,
    pub recursive: bool,
}

pub fn read_params(value: &Value) -> Result<ReadParams, ParamError> {
    let obj = as_object(value)?;
    Ok(ReadParams {
        path: required_path(obj)?,
        encoding: optional_string(obj, "encoding")?,
    })
}

pub fn write_params(value: &Value) -> Result<WriteParams, ParamError> {
    let obj = as_object(value)?;
    let content = obj
        .get("content")
        .ok_or(ParamError::MissingField("content"))?
        .as_str()
        .ok_or(ParamError::WrongType {
            field: "content",
            expected: "string",
        })?;
    Ok(WriteParams {
        path: required_path(obj)?,
        // The empty string is valid content.
        content: content.to_string(),
        encoding: optional_string(obj, "encoding")?,
    })
}

pub fn list_params(value: &Value) -> Result<ListParams, ParamError> {
    let obj = as_object(value)?;
    Ok(ListParams {
        path: required_path(obj)?,
        recursive: optional_bool(obj, "recursive")?,
        include_hidden: optional_bool(obj, "includeHidden")?,
    })
}

pub fn delete_params(value: &Value) -> Result<DeleteParams, ParamError> {
    let obj = as_object(value)?;
    Ok(DeleteParams {
        path: required_path(obj)?,
    })
}

pub fn mkdir_params(value: &Value) -> Result<MkdirParams, ParamError> {
    let obj = as_object(value)?;
    Ok(MkdirParams {
        path: required_path(obj)?,
        recursive: optional_bool(obj, "recursive")?,
    })
}

/// String-level checks for a request path, one distinct error per reason: empty after
/// trimming, longer than [`MAX_PATH_BYTES`] bytes, or containing a NUL byte. Policy checks
/// happen separately.
pub fn validate_file_path(path: &str) -> Result<(), ParamError> {
    if path.trim().is_empty() {
        return Err(ParamError::EmptyPath);
    }
    if path.len() > MAX_PATH_BYTES {
        return Err(ParamError::PathTooLong { len: path.len() });
    }
    if path.contains('\0') {
        return Err(ParamError::PathContainsNul);
    }
    Ok(())
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ParamError> {
    value.as_object().ok_or(ParamError::NotAnObject)
}

fn required_path(obj: &Map<String, Value>) -> Result<String, ParamError> {
    let path = obj
        .get("path")
        .ok_or(ParamError::MissingField("path"))?
        .as_str()
        .ok_or(ParamError::WrongType {
            field: "path",
            expected: "string",
        })?;
    validate_file_path(path)?;
    Ok(path.to_string())
}

fn optional_bool(obj: &Map<String, Value>, field: &'static str) -> Result<bool, ParamError> {
    match obj.get(field) {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(ParamError::WrongType {
            field,
            expected: "boolean",
        }),
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ParamError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ParamError::WrongType {
            field,
            expected: "string",
        }),
    }
}
