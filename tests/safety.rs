use std::collections::BTreeSet;
use std::path::PathBuf;

use fs_warden::policy::PathPolicy;
use fs_warden::safety::{UnsafePathReason, check_path, is_path_safe};

fn extensions(entries: &[&str]) -> Option<BTreeSet<String>> {
    Some(entries.iter().map(|ext| ext.to_string()).collect())
}

fn scenario_policy() -> PathPolicy {
    PathPolicy {
        allowed_roots: vec![PathBuf::from("/tmp")],
        blocked_roots: vec![PathBuf::from("/etc")],
        allowed_extensions: extensions(&[".log"]),
        blocked_extensions: extensions(&[".tmp"]),
        max_file_size: 1024,
    }
}

#[test]
fn traversal_segments_are_always_unsafe() {
    let policy = PathPolicy::single_root("/");
    for path in [
        "..",
        "../secret.txt",
        "/tmp/../etc/passwd",
        "a/../b.log",
        "~",
        "~/notes.log",
        "/tmp/~backup.log",
    ] {
        assert!(!is_path_safe(path, &policy), "expected unsafe: {path}");
        assert_eq!(check_path(path, &policy), Err(UnsafePathReason::Traversal));
    }
}

#[test]
fn paths_outside_every_allowed_root_are_unsafe() {
    let policy = PathPolicy::single_root("/tmp");
    assert_eq!(
        check_path("/home/user/file.log", &policy),
        Err(UnsafePathReason::OutsideAllowedRoots)
    );
    assert!(is_path_safe("/tmp/file.log", &policy));
}

#[test]
fn blocked_root_wins_over_allowed_root() {
    let policy = PathPolicy {
        allowed_roots: vec![PathBuf::from("/")],
        blocked_roots: vec![PathBuf::from("/etc")],
        allowed_extensions: None,
        blocked_extensions: None,
        max_file_size: 1024,
    };
    assert_eq!(
        check_path("/etc/hosts", &policy),
        Err(UnsafePathReason::BlockedRoot)
    );
    assert!(is_path_safe("/home/user/file", &policy));
}

#[test]
fn blocked_extension_wins_over_allowed_extension() {
    let policy = PathPolicy {
        allowed_roots: vec![PathBuf::from("/tmp")],
        blocked_roots: Vec::new(),
        // Listed as both allowed and blocked; block must win.
        allowed_extensions: extensions(&[".log", ".tmp"]),
        blocked_extensions: extensions(&[".tmp"]),
        max_file_size: 1024,
    };
    assert_eq!(
        check_path("/tmp/scratch.tmp", &policy),
        Err(UnsafePathReason::BlockedExtension)
    );
    assert!(is_path_safe("/tmp/scratch.log", &policy));
}

#[test]
fn allowed_extension_set_restricts_everything_else() {
    let policy = scenario_policy();
    assert_eq!(
        check_path("/tmp/report.txt", &policy),
        Err(UnsafePathReason::ExtensionNotAllowed)
    );
    // A directory-style path has no extension, which the allowed set also rejects.
    assert_eq!(
        check_path("/tmp/subdir", &policy),
        Err(UnsafePathReason::ExtensionNotAllowed)
    );
}

#[test]
fn scenario_from_mixed_policy() {
    let policy = scenario_policy();
    assert!(is_path_safe("/tmp/test.log", &policy));
    assert!(!is_path_safe("/tmp/test.tmp", &policy));
    assert!(!is_path_safe("/etc/test.log", &policy));
}

#[test]
fn extension_comparison_is_case_insensitive() {
    let policy = scenario_policy();
    assert!(is_path_safe("/tmp/TEST.LOG", &policy));
    assert!(!is_path_safe("/tmp/TEST.TMP", &policy));
}

#[test]
fn empty_allowed_extension_set_means_unrestricted() {
    let policy = PathPolicy {
        allowed_roots: vec![PathBuf::from("/tmp")],
        blocked_roots: Vec::new(),
        allowed_extensions: Some(BTreeSet::new()),
        blocked_extensions: None,
        max_file_size: 1024,
    };
    assert!(is_path_safe("/tmp/anything.xyz", &policy));
    assert!(is_path_safe("/tmp/noext", &policy));
}

#[test]
fn relative_paths_resolve_against_the_working_directory() {
    let cwd = std::env::current_dir().expect("cwd");
    let inside = PathPolicy::single_root(&cwd);
    assert!(is_path_safe("notes.log", &inside));

    let elsewhere = PathPolicy::single_root("/nonexistent-root");
    assert!(!is_path_safe("notes.log", &elsewhere));
}

#[test]
fn dotfiles_have_no_extension() {
    let policy = scenario_policy();
    // `.env` has no extension under extname rules, so the allowed set rejects it.
    assert_eq!(
        check_path("/tmp/.env", &policy),
        Err(UnsafePathReason::ExtensionNotAllowed)
    );
    assert!(is_path_safe("/tmp/.hidden.log", &policy));
}
