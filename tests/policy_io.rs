use std::path::PathBuf;

use fs_warden::Error;
use fs_warden::policy::DEFAULT_MAX_FILE_SIZE;
use fs_warden::policy_io::{self, PolicyFormat};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write policy file");
    path
}

#[test]
fn parses_a_toml_policy() {
    let policy = policy_io::parse_policy(
        r#"
            allowed_roots = ["/tmp", "/var/data"]
            blocked_roots = ["/tmp/secrets"]
            allowed_extensions = [".txt", ".log"]
            max_file_size = 4096
        "#,
        PolicyFormat::Toml,
    )
    .expect("valid toml");

    assert_eq!(
        policy.allowed_roots,
        vec![PathBuf::from("/tmp"), PathBuf::from("/var/data")]
    );
    assert_eq!(policy.blocked_roots, vec![PathBuf::from("/tmp/secrets")]);
    assert!(policy.allowed_extensions.expect("set").contains(".log"));
    assert!(policy.blocked_extensions.is_none());
    assert_eq!(policy.max_file_size, 4096);
}

#[test]
fn parses_a_json_policy_with_defaults() {
    let policy = policy_io::parse_policy(
        r#"{ "allowed_roots": ["/srv"] }"#,
        PolicyFormat::Json,
    )
    .expect("valid json");

    assert_eq!(policy.allowed_roots, vec![PathBuf::from("/srv")]);
    assert!(policy.blocked_roots.is_empty());
    assert_eq!(policy.max_file_size, DEFAULT_MAX_FILE_SIZE);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = policy_io::parse_policy(
        r#"
            allowed_roots = ["/tmp"]
            allowed_extentions = [".txt"]
        "#,
        PolicyFormat::Toml,
    )
    .expect_err("typoed field");
    assert!(matches!(err, Error::InvalidPolicy(_)), "got {err:?}");
}

#[test]
fn load_detects_format_from_extension() {
    let dir = tempfile::tempdir().expect("tempdir");

    let toml = write_file(&dir, "policy.toml", "allowed_roots = [\"/tmp\"]\n");
    let policy = policy_io::load_policy(&toml).expect("toml load");
    assert_eq!(policy.allowed_roots, vec![PathBuf::from("/tmp")]);

    let json = write_file(&dir, "policy.json", r#"{ "allowed_roots": ["/tmp"] }"#);
    let policy = policy_io::load_policy(&json).expect("json load");
    assert_eq!(policy.allowed_roots, vec![PathBuf::from("/tmp")]);
}

#[test]
fn load_rejects_unsupported_extensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "policy.yaml", "allowed_roots: [/tmp]\n");

    let err = policy_io::load_policy(&path).expect_err("yaml refused");
    assert!(matches!(err, Error::InvalidPolicy(_)), "got {err:?}");
}

#[test]
fn load_rejects_oversized_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let big = format!(
        "allowed_roots = [\"/tmp\"]\n# {}\n",
        "x".repeat(256)
    );
    let path = write_file(&dir, "policy.toml", &big);

    let err = policy_io::load_policy_limited(&path, 64).expect_err("too large");
    assert!(matches!(err, Error::InvalidPolicy(_)), "got {err:?}");

    policy_io::load_policy_limited(&path, 64 * 1024).expect("fits under a sane limit");
}

#[test]
fn load_rejects_a_zero_byte_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "policy.toml", "allowed_roots = [\"/tmp\"]\n");

    let err = policy_io::load_policy_limited(&path, 0).expect_err("zero limit");
    assert!(matches!(err, Error::InvalidPolicy(_)), "got {err:?}");
}

#[test]
#[cfg(unix)]
fn load_refuses_symlinked_policy_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let real = write_file(&dir, "policy.toml", "allowed_roots = [\"/tmp\"]\n");
    let link = dir.path().join("link.toml");
    std::os::unix::fs::symlink(&real, &link).expect("symlink");

    let err = policy_io::load_policy(&link).expect_err("symlink refused");
    assert!(matches!(err, Error::InvalidPath(_)), "got {err:?}");
}

#[test]
fn loaded_policy_must_pass_structural_validation() {
    let dir = tempfile::tempdir().expect("tempdir");

    let path = write_file(&dir, "empty.toml", "allowed_roots = []\n");
    let err = policy_io::load_policy(&path).expect_err("empty roots");
    assert!(matches!(err, Error::InvalidPolicy(_)), "got {err:?}");

    let path = write_file(
        &dir,
        "badext.toml",
        "allowed_roots = [\"/tmp\"]\nallowed_extensions = [\"txt\"]\n",
    );
    let err = policy_io::load_policy(&path).expect_err("extension without dot");
    assert!(matches!(err, Error::InvalidPolicy(_)), "got {err:?}");
}

#[test]
fn load_reports_missing_files_as_io_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = policy_io::load_policy(dir.path().join("absent.toml")).expect_err("missing");
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}
