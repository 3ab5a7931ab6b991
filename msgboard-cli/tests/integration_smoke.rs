//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

const DB_VARS: [&str; 5] = ["DB_USER", "DB_HOST", "DB_NAME", "DB_PASSWORD", "DB_PORT"];

fn msgboard() -> Command {
    let mut cmd = Command::cargo_bin("msgboard").unwrap();
    for var in DB_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_serve_help() {
    msgboard()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--lenient-schema"));
}

#[test]
fn test_config_reports_missing_vars() {
    msgboard()
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required environment variables"))
        .stderr(predicate::str::contains("DB_USER"));
}

#[test]
fn test_config_redacts_password() {
    msgboard()
        .arg("config")
        .env("DB_USER", "board")
        .env("DB_HOST", "db")
        .env("DB_NAME", "messages_db")
        .env("DB_PASSWORD", "hunter2")
        .env("DB_PORT", "5432")
        .assert()
        .success()
        .stdout(predicate::str::contains("database: messages_db"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_serve_fails_fast_without_config() {
    msgboard()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid database configuration"));
}
