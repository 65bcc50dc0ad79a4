//! Integration tests for the `sg` binary.
//!
//! Each test runs the real binary against scripts and config files in a
//! temporary directory, with the default config lookup pointed at that
//! directory so a developer's own config cannot leak in.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const NESTED_SCRIPT: &str = r#"{
    "initial_scroll": 120,
    "steps": [
        { "op": "open", "overlay": "cart", "kind": "bottom_sheet" },
        { "op": "open", "overlay": "confirm" },
        { "op": "close", "overlay": "cart" },
        { "op": "close", "overlay": "confirm" }
    ]
}"#;

/// `sg` with config lookup isolated to `home`.
fn sg(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sg").unwrap();
    cmd.env_remove("SCROLLGATE_CONFIG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path());
    cmd
}

#[test]
fn help_mentions_replay() {
    let home = TempDir::new().unwrap();
    sg(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn replay_prints_table_and_summary() {
    let home = TempDir::new().unwrap();
    let script = home.child("nested.json");
    script.write_str(NESTED_SCRIPT).unwrap();

    sg(&home)
        .arg("replay")
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("open cart"))
        .stdout(predicate::str::contains("engaged at 120px"))
        .stdout(predicate::str::contains("disengaged, restored 120px"))
        .stdout(predicate::str::contains(
            "final count 0, offset 120px; 1 engaged, 1 disengaged, 0 absorbed, 0 orphaned",
        ));
}

#[test]
fn replay_json_output() {
    let home = TempDir::new().unwrap();
    let script = home.child("nested.json");
    script.write_str(NESTED_SCRIPT).unwrap();

    let output = sg(&home)
        .args(["replay", "--json"])
        .arg(script.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["effect"], "engaged");
    assert_eq!(entries[0]["at"], 120);
    assert_eq!(entries[1]["count"], 2);
    assert_eq!(entries[3]["effect"], "disengaged");
    assert_eq!(json["final_count"], 0);
    assert_eq!(json["stats"]["engagements"], 1);
}

#[test]
fn replay_warns_on_excess_release_and_leftover_holders() {
    let home = TempDir::new().unwrap();
    let script = home.child("unbalanced.json");
    script
        .write_str(r#"{ "steps": [ { "op": "release" }, { "op": "acquire" } ] }"#)
        .unwrap();

    sg(&home)
        .arg("replay")
        .arg(script.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("1 release(s) arrived while the lock was idle"))
        .stderr(predicate::str::contains("still pinned"));
}

#[test]
fn quiet_replay_prints_only_summary() {
    let home = TempDir::new().unwrap();
    let script = home.child("nested.json");
    script.write_str(NESTED_SCRIPT).unwrap();

    sg(&home)
        .args(["--quiet", "replay"])
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("final count 0"))
        .stdout(predicate::str::contains("open cart").not());
}

#[test]
fn replay_missing_script_fails() {
    let home = TempDir::new().unwrap();
    sg(&home)
        .args(["replay", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: Failed to load script"));
}

#[test]
fn replay_invalid_script_fails() {
    let home = TempDir::new().unwrap();
    let script = home.child("bad.json");
    script
        .write_str(r#"{ "steps": [ { "op": "open", "overlay": "has space" } ] }"#)
        .unwrap();

    sg(&home)
        .arg("replay")
        .arg(script.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid holder id"));
}

#[test]
fn config_show_defaults() {
    let home = TempDir::new().unwrap();
    sg(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("excess_release = \"warn\""))
        .stdout(predicate::str::contains("restore_scroll = true"))
        .stdout(predicate::str::contains("max_scroll = 10000"));
}

#[test]
fn config_from_xdg_location() {
    let home = TempDir::new().unwrap();
    home.child("scrollgate/config.toml")
        .write_str("[lock]\nexcess_release = \"ignore\"\n")
        .unwrap();

    sg(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("excess_release = \"ignore\""));

    sg(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn explicit_config_changes_replay() {
    let home = TempDir::new().unwrap();
    let config = home.child("sg.toml");
    config
        .write_str("[lock]\nrestore_scroll = false\n\n[viewport]\nmax_scroll = 500\n")
        .unwrap();
    let script = home.child("nested.json");
    script.write_str(NESTED_SCRIPT).unwrap();

    sg(&home)
        .arg("--config")
        .arg(config.path())
        .arg("replay")
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("disengaged, restored 0px"));
}

#[test]
fn explicit_missing_config_fails() {
    let home = TempDir::new().unwrap();
    sg(&home)
        .args(["--config", "absent.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    sg(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sg"));
}
