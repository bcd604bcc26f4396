use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::params;
use crate::safety;

use super::{Context, OperationResult};

pub fn create_directory(ctx: &Context, params: &Value) -> OperationResult {
    let request = match params::mkdir_params(params) {
        Ok(request) => request,
        Err(err) => return OperationResult::invalid_parameters(&err),
    };
    if !safety::is_path_safe(&request.path, ctx.policy()) {
        return OperationResult::unsafe_path(&request.path);
    }

    let target = Path::new(&request.path);
    let outcome = if request.recursive {
        fs::create_dir_all(target)
    } else {
        fs::create_dir(target)
    };
    match outcome {
        Ok(()) => OperationResult::success_with_message("directory created successfully"),
        Err(err) => match err.kind() {
            // Creating something that already exists is reported as success, not failure.
            ErrorKind::AlreadyExists => {
                OperationResult::success_with_message("directory already exists")
            }
            ErrorKind::PermissionDenied => {
                OperationResult::failure("access denied creating directory")
            }
            ErrorKind::NotADirectory => {
                OperationResult::failure("parent path is not a directory")
            }
            _ => OperationResult::failure(format!("failed to create directory: {err}")),
        },
    }
}
