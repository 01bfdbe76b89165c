// Rust guideline compliant 2026-10-18

//! End-to-end tests for the `pearly` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ARTICLE_SCHEMA: &str = r#"
name = "Article"

[[field]]
name = "title"
type = "string"
maxlength = 10
dname = "Title"

[[field]]
name = "published"
type = "date"

[[field]]
name = "views"
type = "number"

[[field]]
name = "notes"
"#;

const ENV_VARS: &[&str] = &[
    "PEARLY_PACKAGE",
    "PEARLY_LOCALE",
    "PEARLY_ISO8601",
    "PEARLY_TYPE_PATTERN",
    "PEARLY_FALLBACK_NAMESPACES",
];

/// Writes the fixture files and returns the temp dir holding them.
fn fixture(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(temp_dir.path().join("article.toml"), ARTICLE_SCHEMA).expect("write schema");
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).expect("write fixture");
    }
    temp_dir
}

fn pearly(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pearly"));
    command.current_dir(dir).args(args);
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command.output().expect("run pearly")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!("expected JSON output ({err}), got:\n{}", stdout(output))
    })
}

#[test]
fn check_valid_record_prints_fields() {
    let dir = fixture(&[(
        "ok.json",
        r#"{"title": "Tom & Jim", "published": "2024-01-01", "views": "12.7"}"#,
    )]);
    let output = pearly(dir.path(), &["check", "article.toml", "ok.json"]);

    assert!(
        output.status.success(),
        "expected success, got status: {:?}\nstderr: {}",
        output.status.code(),
        stderr(&output)
    );
    let out = stdout(&output);
    assert!(out.contains("Article is valid"), "got:\n{out}");
    assert!(out.contains("Tom &amp; Jim"), "got:\n{out}");
    assert!(out.contains("2024-01-01"), "got:\n{out}");
}

#[test]
fn check_invalid_record_exits_with_one() {
    let dir = fixture(&[(
        "long.json",
        r#"{"title": "A very long title exceeding limit", "published": "2024-01-01"}"#,
    )]);
    let output = pearly(dir.path(), &["check", "article.toml", "long.json"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(
        out.contains("Length of 'Title' is greater than maximum allowed length of '10'"),
        "got:\n{out}"
    );
}

#[test]
fn check_json_reports_values_by_mode() {
    let dir = fixture(&[(
        "ok.json",
        r#"{"title": "<b>Hi</b>", "published": "2024-01-01", "views": "12.7"}"#,
    )]);

    let model = json(&pearly(
        dir.path(),
        &["check", "article.toml", "ok.json", "--json", "--mode", "model"],
    ));
    assert_eq!(model["valid"], serde_json::json!(true));
    assert_eq!(model["mode"], serde_json::json!("model"));
    assert_eq!(model["values"]["title"], serde_json::json!("<b>Hi</b>"));
    assert_eq!(model["values"]["views"], serde_json::json!(12));
    assert_eq!(model["values"]["notes"], serde_json::Value::Null);

    let escaped = json(&pearly(
        dir.path(),
        &["check", "article.toml", "ok.json", "--json", "--escape", "xml"],
    ));
    assert_eq!(
        escaped["values"]["title"],
        serde_json::json!("&lt;b&gt;Hi&lt;/b&gt;")
    );

    let unescaped = json(&pearly(
        dir.path(),
        &["check", "article.toml", "ok.json", "--json", "--escape", "none"],
    ));
    assert_eq!(unescaped["values"]["title"], serde_json::json!("<b>Hi</b>"));
}

#[test]
fn check_json_lists_validation_messages() {
    let dir = fixture(&[("long.json", r#"{"title": "A very long title"}"#)]);
    let output = pearly(dir.path(), &["--json", "check", "article.toml", "long.json"]);

    assert_eq!(output.status.code(), Some(1));
    let body = json(&output);
    assert_eq!(body["valid"], serde_json::json!(false));
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
}

#[test]
fn check_unknown_field_is_an_error() {
    let dir = fixture(&[("extra.json", r#"{"title": "Hi", "author": "someone"}"#)]);
    let output = pearly(dir.path(), &["check", "article.toml", "extra.json"]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Undefined property 'author'."), "got:\n{err}");
}

#[test]
fn check_missing_schema_is_an_error() {
    let dir = fixture(&[("ok.json", "{}")]);
    let output = pearly(dir.path(), &["--json", "check", "missing.toml", "ok.json"]);

    assert_eq!(output.status.code(), Some(2));
    let err: serde_json::Value =
        serde_json::from_slice(&output.stderr).expect("error should be JSON");
    assert!(err["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("missing.toml")));
}

#[test]
fn config_file_controls_date_display() {
    let dir = fixture(&[
        ("event.toml", "name = \"Event\"\n[[field]]\nname = \"at\"\ntype = \"datetime\"\n"),
        ("event.json", r#"{"at": "2024-03-15 14:30:00"}"#),
        ("iso.toml", "iso8601 = true\n"),
    ]);

    let plain = json(&pearly(
        dir.path(),
        &["--json", "check", "event.toml", "event.json", "--mode", "view"],
    ));
    assert_eq!(plain["values"]["at"], serde_json::json!("2024-03-15 14:30:00"));

    let iso = json(&pearly(
        dir.path(),
        &[
            "--json", "--config", "iso.toml", "check", "event.toml", "event.json", "--mode",
            "view",
        ],
    ));
    assert_eq!(iso["values"]["at"], serde_json::json!("2024-03-15T14:30:00+0000"));
}

#[test]
fn invalid_config_is_an_error() {
    let dir = fixture(&[
        ("ok.json", "{}"),
        ("bad.toml", "type_pattern = \"{package}.Types\"\n"),
    ]);
    let output = pearly(
        dir.path(),
        &["--config", "bad.toml", "check", "article.toml", "ok.json"],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("type_pattern"));
}

#[test]
fn diff_reports_changed_fields() {
    let dir = fixture(&[
        (
            "before.json",
            r#"{"title": "Hello", "published": "2024-01-01", "views": 3}"#,
        ),
        (
            "after.json",
            r#"{"title": "Hello", "published": "2024/01/02", "views": "3.9"}"#,
        ),
    ]);
    let output = pearly(
        dir.path(),
        &["--json", "diff", "article.toml", "before.json", "after.json"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body = json(&output);
    assert_eq!(body["total"], serde_json::json!(1));
    assert_eq!(body["dirty"]["published"], serde_json::json!("2024-01-02"));
}

#[test]
fn diff_without_changes() {
    let dir = fixture(&[("same.json", r#"{"title": "Hello"}"#)]);
    let output = pearly(dir.path(), &["diff", "article.toml", "same.json", "same.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("no changes"));
}

#[test]
fn types_marks_fallbacks() {
    let dir = fixture(&[]);
    let output = pearly(dir.path(), &["--json", "types", "date", "money"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body = json(&output);
    assert_eq!(body["total"], serde_json::json!(2));
    assert_eq!(body["types"][0]["resolved"], serde_json::json!("date"));
    assert_eq!(body["types"][1]["resolved"], serde_json::json!("string"));
    assert_eq!(
        body["types"][0]["class_path"],
        serde_json::json!("Pearly.Model.Type.DateType")
    );
    assert_eq!(body["types"][1]["class_path"], serde_json::Value::Null);
}

#[test]
fn types_reports_the_matched_namespace() {
    let dir = fixture(&[("shop.toml", "package = \"Shop\"\n")]);
    let output = pearly(
        dir.path(),
        &["--json", "--config", "shop.toml", "types", "date", "string"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body = json(&output);
    assert_eq!(
        body["types"][0]["class_path"],
        serde_json::json!("Pearly.Model.Type.DateType")
    );
    assert_eq!(body["types"][1]["class_path"], serde_json::Value::Null);
    assert!(!body.to_string().contains("Shop.Model.Type"));
}

#[test]
fn types_defaults_to_builtins() {
    let dir = fixture(&[]);
    let output = pearly(dir.path(), &["types"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    for name in ["string", "number", "date", "datetime"] {
        assert!(out.contains(name), "missing {name} in:\n{out}");
    }
    assert!(!out.contains("fallback"));
}

#[test]
fn invalid_log_level_is_rejected() {
    let dir = fixture(&[]);
    let output = pearly(dir.path(), &["--log-level", "loud", "types"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid log level"));
}

#[test]
fn log_file_receives_json_logs() {
    let dir = fixture(&[]);
    let log = dir.path().join("pearly.log");
    let log_arg = log.to_string_lossy().to_string();
    let output = pearly(
        dir.path(),
        &["--log-level", "debug", "--log-file", &log_arg, "types", "money"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = fs::read_to_string(&log).expect("log file should exist");
    let first = content.lines().next().expect("log file should not be empty");
    let entry: serde_json::Value = serde_json::from_str(first).expect("log lines are JSON");
    assert!(entry.get("level").is_some());
}
