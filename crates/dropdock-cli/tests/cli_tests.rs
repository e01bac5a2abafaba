use assert_cmd::Command;
use predicates::prelude::*;

fn dropdock() -> Command {
    let mut cmd = Command::cargo_bin("dropdock").unwrap();
    cmd.env_clear();
    cmd
}

#[test]
fn test_help_lists_settings() {
    dropdock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--pihole-url"))
        .stdout(predicate::str::contains("PIHOLE_GROUPS"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_invalid_log_level_fails() {
    let dir = tempfile::tempdir().unwrap();

    dropdock()
        .env("LOG_LEVEL", "loud")
        .env("LOG_FILE", dir.path().join("dropdock.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level"));
}

#[test]
fn test_unreachable_feed_exits_non_zero_and_logs() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("dropdock.log");

    dropdock()
        .args(["--feed-url", "http://127.0.0.1:9/drop/asndrop.json"])
        .args(["--pihole-url", "http://127.0.0.1:9/api"])
        .arg("--log-file")
        .arg(&log_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("feed fetch failed"));

    let log = std::fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("Starting dropdock"));
    assert!(log.contains("dropdock run failed"));
}

#[test]
fn test_env_file_in_working_directory_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "LOG_LEVEL=loud\n").unwrap();

    dropdock()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level"));
}

#[test]
fn test_process_environment_overrides_env_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "LOG_LEVEL=debug\n").unwrap();

    dropdock()
        .current_dir(dir.path())
        .env("LOG_LEVEL", "3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level"));
}
