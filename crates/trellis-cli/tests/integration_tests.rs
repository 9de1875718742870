//! Integration tests for the `trellis` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

const PICNIC_FILES: usize = 695;
const APP_KT: &str = "composeApp/src/commonMain/kotlin/com/picnic/app/App.kt";

/// A command isolated from the caller's config and environment.
fn trellis(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("trellis").unwrap();
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("TRELLIS_BLUEPRINTS_DIR")
        .env_remove("TRELLIS_SCAFFOLD__OUTPUT_DIR");
    cmd
}

fn count_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trellis creates the directories"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_runs_default_blueprint() {
    let temp = TempDir::new().unwrap();

    trellis(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{PICNIC_FILES} files present under"
        )))
        .stdout(predicate::str::contains("picnic-app"));

    let out = temp.path().join("picnic-app");
    assert!(out.join(APP_KT).is_file());
    assert_eq!(count_files(&out), PICNIC_FILES);
}

#[test]
fn test_rerun_is_idempotent_and_keeps_content() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("app");

    trellis(temp.path())
        .args(["run", "-o"])
        .arg(&out)
        .assert()
        .success();

    fs::write(out.join(APP_KT), "fun main() {}\n").unwrap();

    trellis(temp.path())
        .args(["run", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{PICNIC_FILES} files present under"
        )));

    assert_eq!(fs::read_to_string(out.join(APP_KT)).unwrap(), "fun main() {}\n");
    assert_eq!(count_files(&out), PICNIC_FILES);
}

#[test]
fn test_parallel_jobs_match_sequential() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("parallel");

    trellis(temp.path())
        .args(["run", "picnic", "--jobs", "4", "--output"])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(count_files(&out), PICNIC_FILES);
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("planned");

    trellis(temp.path())
        .args(["run", "--dry-run", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("new    "))
        .stdout(predicate::str::contains(format!(
            "{PICNIC_FILES} to create, 0 already present"
        )));

    assert!(!out.exists());
}

#[test]
fn test_json_output_is_run_report() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("json");

    let assert = trellis(temp.path())
        .args(["--output-format", "json", "run", "-o"])
        .arg(&out)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["total"], PICNIC_FILES);
    assert_eq!(report["created"], PICNIC_FILES);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["cancelled"], false);
}

#[test]
fn test_custom_manifest() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("tiny.toml");
    fs::write(
        &manifest,
        r#"
[blueprint]
name = "tiny"
output = "tiny-out"

[[roots]]
id = "src"
path = "src"
platform = "shared-source"

[[groups]]
name = "core"
root = "src"
kind = "source"
extension = "kt"
stems = ["App", "core/di/AppModule"]

[[groups]]
name = "keep"
root = "src"
kind = "marker"
stems = ["assets/.gitkeep"]
"#,
    )
    .unwrap();

    trellis(temp.path())
        .args(["run", "./tiny.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 files present under"));

    let out = temp.path().join("tiny-out/src");
    assert!(out.join("App.kt").is_file());
    assert!(out.join("core/di/AppModule.kt").is_file());
    assert!(out.join("assets/.gitkeep").is_file());
    assert_eq!(fs::metadata(out.join("App.kt")).unwrap().len(), 0);
}

#[test]
fn test_blocked_directory_reports_failure() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("blocked");
    // A file where the shared source root's first directory should be.
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("composeApp"), "not a directory").unwrap();

    trellis(temp.path())
        .args(["run", "-o"])
        .arg(&out)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("files present under"))
        .stderr(predicate::str::contains("failed:"))
        .stderr(predicate::str::contains("  1. "))
        .stderr(predicate::str::contains("composeApp"));

    // Entries outside composeApp/ were still created.
    assert!(out.join("settings.gradle.kts").is_file());
    assert_eq!(fs::read_to_string(out.join("composeApp")).unwrap(), "not a directory");
}

#[test]
fn test_check_command() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("picnic: {PICNIC_FILES} files")));

    assert!(!temp.path().join("picnic-app").exists());
}

#[test]
fn test_list_command() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Blueprints"))
        .stdout(predicate::str::contains("picnic"));

    trellis(temp.path())
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff("picnic\n"));
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().unwrap();
    let assert = trellis(temp.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let list: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(list[0]["name"], "picnic");
    assert_eq!(list[0]["files"], PICNIC_FILES);
}

#[test]
fn test_quiet_flag() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .args(["-q", "run"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("picnic-app").join(APP_KT).is_file());
}

#[test]
fn test_local_config_sets_output_dir() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".trellis.toml"),
        "[scaffold]\noutput_dir = \"from-config\"\n",
    )
    .unwrap();

    trellis(temp.path()).assert().success();
    assert!(temp.path().join("from-config").join(APP_KT).is_file());
}

#[test]
fn test_env_overrides_config() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .env("TRELLIS_SCAFFOLD__OUTPUT_DIR", "from-env")
        .args(["config", "get", "scaffold.output_dir"])
        .assert()
        .success()
        .stdout(predicate::str::diff("from-env\n"));
}

#[test]
fn test_init_local_then_refuses_overwrite() {
    let temp = TempDir::new().unwrap();

    trellis(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));

    let written = fs::read_to_string(temp.path().join(".trellis.toml")).unwrap();
    assert!(written.contains("[scaffold]"));
    assert!(written.contains("blueprint = \"picnic\""));

    trellis(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_shell_completions() {
    let temp = TempDir::new().unwrap();
    trellis(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trellis"));
}
