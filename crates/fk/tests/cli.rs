//! End-to-end tests for the `fk` binary.
//!
//! Each test runs the compiled binary against a temporary config file and
//! JSON items, so nothing in the user's home directory is read or written.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const CONFIG: &str = r#"
version = 1

[[filters]]
key = "serial"
label = "Serial"
hint = "Token serial number"

[[filters]]
key = "type"
field = "tokentype"
match = "equals"

[[filters]]
key = "user"
field = "user.username"

[[filters]]
key = "active"
match = "boolean"
"#;

const ITEMS: &str = r#"[
    { "serial": "OATH0001", "tokentype": "hotp", "active": true, "user": { "username": "alice" } },
    { "serial": "TOTP0002", "tokentype": "totp", "active": true, "user": { "username": "bob" } },
    { "serial": "TOTP0003", "tokentype": "totp", "active": false }
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), CONFIG).unwrap();
        fs::write(dir.path().join("items.json"), ITEMS).unwrap();
        Self { dir }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn items_path(&self) -> PathBuf {
        self.dir.path().join("items.json")
    }

    fn fk(&self, args: &[&str]) -> Output {
        run_fk(&self.config_path(), args)
    }
}

fn run_fk(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fk"))
        .arg("--config")
        .arg(config)
        .arg("--no-color")
        .args(args)
        .env_remove("FK_LOG")
        .output()
        .expect("failed to run fk")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "fk failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_parse_json() {
    let fixture = Fixture::new();
    let output = fixture.fk(&["--json", "parse", r#"Name:"strict policy" archived"#]);
    let json = stdout_json(&output);
    assert_eq!(json["filters"][0]["key"], "Name");
    assert_eq!(json["filters"][0]["value"], "strict policy");
    assert_eq!(json["filters"][1]["key"], "archived");
    assert!(json["filters"][1]["value"].is_null());
}

#[test]
fn test_apply_filters_items() {
    let fixture = Fixture::new();
    let items = fixture.items_path();
    let output = fixture.fk(&[
        "--json",
        "apply",
        "Type:TOTP",
        "--hidden",
        "active=yes",
        "--input",
        items.to_str().unwrap(),
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["raw_value"], "type: totp");
    assert_eq!(json["api_filter_string"], "type: totp active: yes");
    assert_eq!(json["total"], 3);
    assert_eq!(json["matched"], 1);
    assert_eq!(json["items"][0]["serial"], "TOTP0002");
}

#[test]
fn test_apply_summary_text() {
    let fixture = Fixture::new();
    let items = fixture.items_path();
    let output = fixture.fk(&["apply", "user:*", "--summary", "--input", items.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Search: user: *"));
    assert!(stdout.contains("3 of 3 items match"));
    assert!(!stdout.contains("OATH0001"));
}

#[test]
fn test_apply_warns_about_unknown_key() {
    let fixture = Fixture::new();
    let items = fixture.items_path();
    let output = fixture.fk(&["--json", "apply", "sereal:totp", "--input", items.to_str().unwrap()]);
    let json = stdout_json(&output);
    assert_eq!(json["unknown_keys"][0], "sereal");
    assert_eq!(json["matched"], 3);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Did you mean 'serial'?"));
}

#[test]
fn test_apply_unknown_hidden_key_fails() {
    let fixture = Fixture::new();
    let items = fixture.items_path();
    let output = fixture.fk(&[
        "--json",
        "apply",
        "",
        "--hidden",
        "realm=internal",
        "--input",
        items.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "FILTER_ERROR");
}

#[test]
fn test_apply_rejects_non_array_input() {
    let fixture = Fixture::new();
    let path = fixture.dir.path().join("object.json");
    fs::write(&path, r#"{"serial":"x"}"#).unwrap();
    let output = fixture.fk(&["apply", "serial:x", "--input", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("JSON array"));
}

#[test]
fn test_keys_lists_catalog() {
    let fixture = Fixture::new();
    let json = stdout_json(&fixture.fk(&["--json", "keys"]));
    let keys: Vec<&str> = json["keys"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["serial", "type", "user", "active"]);
    assert_eq!(json["keys"][1]["match"], "equals");
}

#[test]
fn test_config_init_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fk").join("config.toml");

    let output = run_fk(&path, &["config", "init"]);
    assert!(output.status.success());
    assert!(path.exists());

    let output = run_fk(&path, &["config", "init"]);
    assert_eq!(output.status.code(), Some(5));

    let output = run_fk(&path, &["config", "path"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), path.display().to_string());
}

#[test]
fn test_invalid_config_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[[filters]]\nkey = \"Bad Key\"\n").unwrap();

    let output = run_fk(&path, &["--json", "keys"]);
    assert_eq!(output.status.code(), Some(5));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "CONFIG_ERROR");
}
