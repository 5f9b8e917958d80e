//! CLI integration tests: run the actual ally binary.
//! Marked `#[ignore]` to skip in normal `cargo test`.

use std::path::{Path, PathBuf};
use std::process::Command;

/// A project dir whose config points the token file into the dir itself and
/// the backend at a port nothing listens on.
fn sandbox() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ally-cli-test-{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(dir.join(".anxiety-ally")).unwrap();
    let token = dir.join("token");
    std::fs::write(
        dir.join(".anxiety-ally").join("config.toml"),
        format!(
            "[api]\nurl = \"http://127.0.0.1:9\"\n\n[storage]\ntoken_path = {:?}\n",
            token.display().to_string()
        ),
    )
    .unwrap();
    dir
}

fn ally(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ally"));
    cmd.current_dir(dir).env_remove("ALLY_API_URL");
    cmd
}

#[test]
#[ignore]
fn test_cli_status_anonymous() {
    let dir = sandbox();
    let output = ally(&dir).arg("status").output().expect("failed to execute");
    assert!(
        output.status.success(),
        "ally status failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("anonymous"));
    assert!(stdout.contains("http://127.0.0.1:9"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[ignore]
fn test_cli_status_prints_config() {
    let dir = sandbox();
    let output = ally(&dir)
        .args(["status", "--config"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[api]"));
    assert!(stdout.contains("token_path"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[ignore]
fn test_cli_whoami_json_when_signed_out() {
    let dir = sandbox();
    let output = ally(&dir)
        .args(["whoami", "--json"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim())
            .expect("invalid JSON output");
    assert!(value.is_null());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[ignore]
fn test_cli_resource_commands_require_login() {
    let dir = sandbox();
    for args in [
        &["journal", "list"][..],
        &["mood", "aggregate", "week"][..],
        &["breathing"][..],
    ] {
        let output = ally(&dir).args(args).output().expect("failed to execute");
        assert!(!output.status.success(), "{args:?} should fail signed out");
        assert!(String::from_utf8_lossy(&output.stderr).contains("not signed in"));
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[ignore]
fn test_cli_stale_token_is_cleared() {
    let dir = sandbox();
    std::fs::write(dir.join("token"), "tok-stale").unwrap();
    let output = ally(&dir).arg("status").output().expect("failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Session expired. Please login again."));
    assert!(!dir.join("token").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[ignore]
fn test_cli_login_unreachable_backend_fails() {
    let dir = sandbox();
    let output = ally(&dir)
        .args(["login", "-e", "sam@example.com", "-p", "hunter22"])
        .output()
        .expect("failed to execute");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Login failed. Please try again."));
    assert!(!dir.join("token").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[ignore]
fn test_cli_logout_always_succeeds() {
    let dir = sandbox();
    let output = ally(&dir).arg("logout").output().expect("failed to execute");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Signed out"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[ignore]
fn test_cli_rejects_out_of_range_mood() {
    let dir = sandbox();
    let output = ally(&dir)
        .args(["mood", "create", "11"])
        .output()
        .expect("failed to execute");
    assert!(!output.status.success());
    let _ = std::fs::remove_dir_all(&dir);
}
