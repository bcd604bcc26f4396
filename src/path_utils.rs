//! Lexical path helpers used by the safety checks.
//!
//! This module is intentionally **lexical**: it never touches the filesystem and therefore
//! never resolves symlinks. Normalization collapses `.` segments, resolves `..` against
//! preceding normal segments, and keeps `..` from escaping the filesystem root of an
//! absolute path.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Absolute, normalized form of `path`: relative inputs are joined onto the process
/// working directory before symbolic segments are collapsed.
pub(crate) fn resolve_lexical(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_path_lexical(&absolute))
}

pub(crate) fn normalize_path_lexical(path: &Path) -> PathBuf {
    enum Segment {
        ParentDir,
        Normal(OsString),
    }

    let mut path_prefix: Option<OsString> = None;
    let mut has_root = false;
    let mut segments: Vec<Segment> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(segments.last(), Some(Segment::Normal(_))) {
                    segments.pop();
                } else if !has_root {
                    segments.push(Segment::ParentDir);
                }
            }
            Component::Normal(part) => segments.push(Segment::Normal(part.to_os_string())),
            Component::RootDir => has_root = true,
            Component::Prefix(prefix_comp) => {
                path_prefix = Some(prefix_comp.as_os_str().to_os_string());
            }
        }
    }

    let mut out = PathBuf::new();
    if let Some(prefix) = path_prefix {
        out.push(Path::new(&prefix));
    }
    if has_root {
        out.push(std::path::MAIN_SEPARATOR_STR);
    }
    for segment in segments {
        match segment {
            Segment::ParentDir => out.push(".."),
            Segment::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Lowercased extension of the final path segment, leading dot included.
///
/// The extension starts at the last `.` of the final segment; a name whose only `.` is its
/// first character (`.env`) has no extension, and neither does a dotless name. Returns the
/// empty string in both cases.
pub(crate) fn extension_of(path: &str) -> String {
    let Some(name) = Path::new(path).file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_ascii_lowercase(),
        _ => String::new(),
    }
}
