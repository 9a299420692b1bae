//! End-to-end tests for the passbook binary
//!
//! Credentials are fed through stdin, one line per prompt, using the
//! non-interactive fallback of the credential prompt.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CREDENTIAL: &str = "Str0ng!Pw";

fn passbook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("passbook").unwrap();
    cmd.env("PASSBOOK_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn test_help_runs() {
    Command::cargo_bin("passbook")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("personal banking ledger"));
}

#[test]
fn test_config_shows_paths() {
    let data_dir = TempDir::new().unwrap();

    passbook(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ledger.json"))
        .stdout(predicate::str::contains("7810106666"));
}

#[test]
fn test_create_deposit_balance_flow() {
    let data_dir = TempDir::new().unwrap();

    passbook(&data_dir)
        .args(["account", "create", "alice"])
        .write_stdin(format!("{}\n{}\n", CREDENTIAL, CREDENTIAL))
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created successfully!"))
        .stdout(predicate::str::contains("7810106666"));

    passbook(&data_dir)
        .args(["account", "deposit", "alice", "50"])
        .write_stdin(format!("{}\n", CREDENTIAL))
        .assert()
        .success()
        .stdout(predicate::str::contains("New balance: $50.00"));

    passbook(&data_dir)
        .args(["account", "balance", "alice"])
        .write_stdin(format!("{}\n", CREDENTIAL))
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance: $50.00"));
}

#[test]
fn test_withdraw_flow() {
    let data_dir = TempDir::new().unwrap();

    passbook(&data_dir)
        .args(["account", "create", "bob"])
        .write_stdin(format!("{}\n{}\n", CREDENTIAL, CREDENTIAL))
        .assert()
        .success();

    passbook(&data_dir)
        .args(["account", "deposit", "bob", "100"])
        .write_stdin(format!("{}\n", CREDENTIAL))
        .assert()
        .success();

    passbook(&data_dir)
        .args(["account", "withdraw", "bob", "30"])
        .write_stdin(format!("{}\n", CREDENTIAL))
        .assert()
        .success()
        .stdout(predicate::str::contains("New balance: $70.00"));

    passbook(&data_dir)
        .args(["account", "withdraw", "bob", "1000"])
        .write_stdin(format!("{}\n", CREDENTIAL))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_weak_credential_rejected() {
    let data_dir = TempDir::new().unwrap();

    passbook(&data_dir)
        .args(["account", "create", "alice"])
        .write_stdin("weak\nweak\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Weak credential"));
}

#[test]
fn test_wrong_credential_and_unknown_account_look_alike() {
    let data_dir = TempDir::new().unwrap();

    passbook(&data_dir)
        .args(["account", "create", "alice"])
        .write_stdin(format!("{}\n{}\n", CREDENTIAL, CREDENTIAL))
        .assert()
        .success();

    let wrong = passbook(&data_dir)
        .args(["account", "balance", "alice"])
        .write_stdin("wrong\n")
        .assert()
        .failure();

    let unknown = passbook(&data_dir)
        .args(["account", "balance", "ghost"])
        .write_stdin("wrong\n")
        .assert()
        .failure();

    // Same message for a bad credential and a missing account
    let wrong_msg = String::from_utf8_lossy(&wrong.get_output().stderr).to_string();
    let unknown_msg = String::from_utf8_lossy(&unknown.get_output().stderr).to_string();
    assert!(wrong_msg.contains("Invalid credential"));
    assert_eq!(wrong_msg, unknown_msg);
}

#[test]
fn test_duplicate_account_rejected() {
    let data_dir = TempDir::new().unwrap();

    passbook(&data_dir)
        .args(["account", "create", "alice"])
        .write_stdin(format!("{}\n{}\n", CREDENTIAL, CREDENTIAL))
        .assert()
        .success();

    passbook(&data_dir)
        .args(["account", "create", "alice"])
        .write_stdin(format!("{}\n{}\n", CREDENTIAL, CREDENTIAL))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account already exists"));
}

#[test]
fn test_profile_update() {
    let data_dir = TempDir::new().unwrap();

    passbook(&data_dir)
        .args(["account", "create", "carol"])
        .write_stdin(format!("{}\n{}\n", CREDENTIAL, CREDENTIAL))
        .assert()
        .success();

    passbook(&data_dir)
        .args([
            "account",
            "profile",
            "carol",
            "--first-name",
            "Carol",
            "--last-name",
            "Jones",
        ])
        .write_stdin(format!("{}\n", CREDENTIAL))
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated for carol."));
}
