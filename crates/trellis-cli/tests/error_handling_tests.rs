//! Exit codes and suggestions for failing invocations.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trellis(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("trellis").unwrap();
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("TRELLIS_BLUEPRINTS_DIR");
    cmd
}

fn write_manifest(dir: &Path, stems: &str) -> std::path::PathBuf {
    let path = dir.join("bad.toml");
    fs::write(
        &path,
        format!(
            r#"
[blueprint]
name = "bad"
output = "bad-out"

[[roots]]
id = "src"
path = "src"
platform = "shared-source"

[[groups]]
name = "core"
root = "src"
kind = "source"
extension = "kt"
stems = [{stems}]
"#
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_unknown_blueprint_exits_3() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .args(["run", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Blueprint 'nope' not found"))
        .stderr(predicate::str::contains("trellis list"));
}

#[test]
fn test_duplicate_path_exits_2_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), r#""core/App", "core/App""#);

    trellis(temp.path())
        .args(["run", "bad.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));

    assert!(!temp.path().join("bad-out").exists());
}

#[test]
fn test_traversal_stem_exits_2_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), r#""ok/App", "../../escape""#);

    trellis(temp.path())
        .args(["run", "bad.toml"])
        .assert()
        .code(2);

    assert!(!temp.path().join("bad-out").exists());
    assert!(!temp.path().join("escape.kt").exists());
}

#[test]
fn test_malformed_manifest_exits_2() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.toml"), "[blueprint\nname = ").unwrap();

    trellis(temp.path())
        .args(["check", "broken.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn test_check_rejects_invalid_manifest() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), r#""core/App", "core/App""#);

    trellis(temp.path())
        .args(["check", "bad.toml"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_config_file_exits_4() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .args(["--config", "missing.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_key_exits_4() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_bad_arguments_exit_2() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .args(["run", "--jobs", "0"])
        .assert()
        .code(2);

    trellis(temp.path())
        .args(["-q", "-v", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_verbose_shows_logs() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .args(["-v", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}
