use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use serde_json::Value;

use crate::params;
use crate::safety;

use super::{Context, OperationResult};

/// Removes a single file. Directories are refused with a distinct message; the metadata
/// pre-check keeps that outcome deterministic instead of depending on the platform's
/// `unlink` errno.
pub fn delete_file(ctx: &Context, params: &Value) -> OperationResult {
    let request = match params::delete_params(params) {
        Ok(request) => request,
        Err(err) => return OperationResult::invalid_parameters(&err),
    };
    if !safety::is_path_safe(&request.path, ctx.policy()) {
        return OperationResult::unsafe_path(&request.path);
    }

    let target = Path::new(&request.path);
    let meta = match fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(err) => return delete_failure(&err),
    };
    if meta.is_dir() {
        return OperationResult::failure("path is a directory");
    }

    match fs::remove_file(target) {
        Ok(()) => OperationResult::success_with_message("file deleted successfully"),
        Err(err) => delete_failure(&err),
    }
}

fn delete_failure(err: &io::Error) -> OperationResult {
    match err.kind() {
        ErrorKind::NotFound => OperationResult::failure("file not found"),
        ErrorKind::PermissionDenied => OperationResult::failure("delete access denied"),
        ErrorKind::IsADirectory => OperationResult::failure("path is a directory"),
        _ => OperationResult::failure(format!("failed to delete file: {err}")),
    }
}
