use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::debug;
use walkdir::WalkDir;

use crate::params;
use crate::path_utils;
use crate::safety;

use super::{Context, EntryKind, FileEntry, OperationResult, Payload};

/// Enumerates directory entries into one flat sequence.
///
/// With `recursive`, subdirectories are descended depth-first immediately after their own
/// entry, so children follow their parent in the output. Unreadable nested entries are
/// omitted and enumeration continues; only a failure on the requested directory itself
/// fails the call.
pub fn list_files(ctx: &Context, params: &Value) -> OperationResult {
    let request = match params::list_params(params) {
        Ok(request) => request,
        Err(err) => return OperationResult::invalid_parameters(&err),
    };
    if !safety::is_path_safe(&request.path, ctx.policy()) {
        return OperationResult::unsafe_path(&request.path);
    }

    // Entries carry absolute paths, so enumerate from the resolved form.
    let dir = match path_utils::resolve_lexical(Path::new(&request.path)) {
        Ok(dir) => dir,
        Err(err) => return OperationResult::failure(format!("failed to list directory: {err}")),
    };

    // The requested directory must itself be enumerable; failures here abort the call.
    if let Err(err) = fs::read_dir(&dir) {
        return match err.kind() {
            ErrorKind::NotFound => OperationResult::failure("directory not found"),
            ErrorKind::PermissionDenied => OperationResult::failure("directory access denied"),
            _ => OperationResult::failure(format!("failed to list directory: {err}")),
        };
    }

    let max_depth = if request.recursive { usize::MAX } else { 1 };
    let mut entries = Vec::<FileEntry>::new();
    for entry in WalkDir::new(&dir).min_depth(1).max_depth(max_depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(err) => {
                debug!(error = %err, "skipping entry without metadata");
                continue;
            }
        };

        let file_type = entry.file_type();
        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
            kind: if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            size_bytes: file_type.is_file().then(|| meta.len()),
            modified: meta.modified().ok(),
        });
    }

    OperationResult::success_with_data(Payload::Entries(entries))
}
