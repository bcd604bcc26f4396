//! `fs-warden` provides policy-guarded filesystem operations for local tooling.
//!
//! The crate enforces an explicit allow/block path policy in-process and exposes five
//! operations (read/write/list/delete/mkdir) behind untyped parameter bags, each returning
//! a uniform [`ops::OperationResult`] instead of raising errors.

mod error;
pub mod ops;
pub mod params;
mod path_utils;
pub mod policy;
pub mod policy_io;
pub mod safety;

pub use error::{Error, Result};

pub use ops::{
    Context, EntryKind, FileEntry, OperationResult, Payload, create_directory, delete_file,
    list_files, read_file, write_file,
};
pub use params::{
    DeleteParams, ListParams, MkdirParams, ParamError, ReadParams, WriteParams,
    validate_file_path,
};
pub use policy::PathPolicy;
pub use safety::{UnsafePathReason, check_path, is_path_safe};
