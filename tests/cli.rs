use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with its data directory pointed at `dir` and no API overrides
fn budgetdash(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budgetdash").expect("bin");
    cmd.env("BUDGETDASH_DATA_DIR", dir.path())
        .env_remove("BUDGETDASH_ENDPOINT")
        .env_remove("BUDGETDASH_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("overview"))
        .stdout(predicate::str::contains("transactions"))
        .stdout(predicate::str::contains("prefs"));
}

#[test]
fn config_shows_data_dir_and_session() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_string_lossy().to_string()))
        .stdout(predicate::str::contains("not logged in"));
}

#[test]
fn endpoint_flag_overrides_settings() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .args(["--endpoint", "http://localhost:9999/graphql", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:9999/graphql"));
}

#[test]
fn prefs_toggle_persists() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .args(["prefs", "toggle", "savings-goals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Show savings goals: off"));

    budgetdash(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("savings-goals        off"));
}

#[test]
fn prefs_period_and_reset() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .args(["prefs", "period", "2025-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("April 2025"));

    budgetdash(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("April 2025"));

    budgetdash(&dir)
        .args(["prefs", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preferences reset"));

    budgetdash(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("savings-goals        on"));
}

#[test]
fn prefs_rejects_bad_period() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .args(["prefs", "period", "2025-13"])
        .assert()
        .failure();
}

#[test]
fn prefs_rejects_unknown_toggle() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .args(["prefs", "toggle", "sparkles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preference"));
}

#[test]
fn logout_without_session() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn whoami_requires_login() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("budgetdash login"));
}

#[test]
fn data_commands_require_login() {
    let dir = TempDir::new().unwrap();
    budgetdash(&dir)
        .args(["transactions", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not authenticated"));
}
