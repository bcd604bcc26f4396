use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use serde_json::Value;

use crate::params;
use crate::safety;

use super::{Context, OperationResult};

/// Writes content to the target path, creating missing parent directories first and
/// overwriting any existing content.
pub fn write_file(ctx: &Context, params: &Value) -> OperationResult {
    let request = match params::write_params(params) {
        Ok(request) => request,
        Err(err) => return OperationResult::invalid_parameters(&err),
    };
    if !safety::is_path_safe(&request.path, ctx.policy()) {
        return OperationResult::unsafe_path(&request.path);
    }

    let path = Path::new(&request.path);
    let outcome =
        ensure_parent_dirs(path).and_then(|()| fs::write(path, request.content.as_bytes()));
    match outcome {
        Ok(()) => OperationResult::success_with_message("file written successfully"),
        Err(err) => match err.kind() {
            ErrorKind::PermissionDenied => OperationResult::failure("write access denied"),
            ErrorKind::StorageFull => OperationResult::failure("insufficient disk space"),
            _ => OperationResult::failure(format!("failed to write file: {err}")),
        },
    }
}

fn ensure_parent_dirs(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
