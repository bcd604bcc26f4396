//! Path-safety validation.
//!
//! Every check here is lexical and side-effect free: candidates are normalized without
//! touching the filesystem, so the functions can be called concurrently against a shared
//! read-only [`PathPolicy`]. The ordering of checks is part of the contract: traversal
//! text scan, resolution, allowed roots, blocked roots, then extensions.

use std::path::Path;

use crate::path_utils;
use crate::policy::PathPolicy;

/// Why a candidate path was rejected.
///
/// Callers surfacing rejections to untrusted parties should collapse this to a generic
/// message; the operation handlers do exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsafePathReason {
    /// The raw input contains `..` or `~`.
    Traversal,
    /// The path could not be resolved to an absolute form.
    Unresolvable,
    OutsideAllowedRoots,
    BlockedRoot,
    BlockedExtension,
    ExtensionNotAllowed,
}

/// Whether `candidate` may be used for any operation under `policy`.
///
/// Never panics; any failure during resolution counts as unsafe.
pub fn is_path_safe(candidate: &str, policy: &PathPolicy) -> bool {
    check_path(candidate, policy).is_ok()
}

/// [`is_path_safe`] with an explicit rejection reason, short-circuiting on the first
/// failed check.
pub fn check_path(candidate: &str, policy: &PathPolicy) -> Result<(), UnsafePathReason> {
    // Textual scan of the *original* input: traversal intent is rejected even when
    // normalization would collapse it away.
    if candidate.contains("..") || candidate.contains('~') {
        return Err(UnsafePathReason::Traversal);
    }

    let resolved = path_utils::resolve_lexical(Path::new(candidate))
        .map_err(|_| UnsafePathReason::Unresolvable)?;

    if !policy
        .allowed_roots
        .iter()
        .any(|root| starts_with_resolved_root(&resolved, root))
    {
        return Err(UnsafePathReason::OutsideAllowedRoots);
    }

    // Block always wins, even when the path is also under an allowed root.
    if policy
        .blocked_roots
        .iter()
        .any(|root| starts_with_resolved_root(&resolved, root))
    {
        return Err(UnsafePathReason::BlockedRoot);
    }

    let ext = path_utils::extension_of(candidate);
    if let Some(blocked) = &policy.blocked_extensions
        && blocked.contains(&ext)
    {
        return Err(UnsafePathReason::BlockedExtension);
    }
    if let Some(allowed) = &policy.allowed_extensions
        && !allowed.is_empty()
        && !allowed.contains(&ext)
    {
        return Err(UnsafePathReason::ExtensionNotAllowed);
    }

    Ok(())
}

/// String-prefix comparison between the resolved candidate and a resolved root.
fn starts_with_resolved_root(resolved: &Path, root: &Path) -> bool {
    let Ok(resolved_root) = path_utils::resolve_lexical(root) else {
        return false;
    };
    resolved
        .to_string_lossy()
        .starts_with(resolved_root.to_string_lossy().as_ref())
}
