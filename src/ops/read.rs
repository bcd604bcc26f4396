use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::params;
use crate::safety;

use super::{Context, OperationResult, Payload};

pub fn read_file(ctx: &Context, params: &Value) -> OperationResult {
    let request = match params::read_params(params) {
        Ok(request) => request,
        Err(err) => return OperationResult::invalid_parameters(&err),
    };
    if !safety::is_path_safe(&request.path, ctx.policy()) {
        return OperationResult::unsafe_path(&request.path);
    }

    match fs::read_to_string(Path::new(&request.path)) {
        Ok(content) => OperationResult::success_with_data(Payload::Text(content)),
        Err(err) => match err.kind() {
            ErrorKind::NotFound => OperationResult::failure("file not found"),
            ErrorKind::PermissionDenied => OperationResult::failure("access denied"),
            _ => OperationResult::failure(format!("failed to read file: {err}")),
        },
    }
}
