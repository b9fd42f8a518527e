use assert_cmd::Command;
use predicates::str::contains;
use serde_json::json;
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

const ACTIONS: &str = r#"export default {
  zip: async () => { return 1; },
  getId: async () => { return Table1.selectedRow.id; },
  assert: () => { return missing; },
  base: 1,
}"#;

fn jsobject_cli() -> Command {
  let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("jsobject-cli");
  cmd.timeout(Duration::from_secs(5));
  cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
  serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn check_lists_sorted_members() {
  let assert = jsobject_cli()
    .args(["check", "--global", "Table1"])
    .write_stdin(ACTIONS)
    .assert()
    .success();
  let json = stdout_json(assert.get_output());
  assert_eq!(json["view"]["state"], "functionAdvisory");
  assert_eq!(
    json["view"]["orderedFunctionNames"],
    json!(["assert", "getId", "zip"])
  );
  assert_eq!(json["view"]["asyncFunctionNames"], json!(["getId", "zip"]));
  assert_eq!(json["view"]["variableNames"], json!(["base"]));
  assert_eq!(json["diagnostics"].as_array().unwrap().len(), 1);
  assert_eq!(json["diagnostics"][0]["targetFunction"], "assert");
}

#[test]
fn check_fails_on_invalid_object() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("Api1.js");
  fs::write(&path, "export default {\n  myFun1: ()=>>{\n  }\n}").unwrap();
  let assert = jsobject_cli()
    .arg("check")
    .arg(&path)
    .assert()
    .failure()
    .code(1)
    .stderr(contains("error[PJ0003]"))
    .stderr(contains("Api1.js:2:15"))
    .stderr(contains('^'));
  let json = stdout_json(assert.get_output());
  assert_eq!(json["view"]["state"], "objectInvalid");
  assert_eq!(
    json["view"]["callout"]["message"],
    "expected expression, found `>`"
  );
}

#[test]
fn run_reports_gate_decision() {
  let assert = jsobject_cli()
    .args(["run", "getId", "--global", "Table1"])
    .write_stdin(ACTIONS)
    .assert()
    .success();
  let json = stdout_json(assert.get_output());
  assert_eq!(
    json,
    json!({"decision": "permitted", "function": "getId", "isAsync": true})
  );

  let assert = jsobject_cli()
    .args(["run", "base"])
    .write_stdin(ACTIONS)
    .assert()
    .failure()
    .code(1);
  let json = stdout_json(assert.get_output());
  assert_eq!(json["decision"], "refused");
  assert_eq!(json["code"], "JSO0201");
}

#[test]
fn config_file_sets_options() {
  let dir = tempdir().unwrap();
  let config = dir.path().join("jsobject.json");
  fs::write(
    &config,
    r#"{"globals": ["Table1"], "policy": "strict", "parse": {"sourceShape": "bareObject"}}"#,
  )
  .unwrap();
  let assert = jsobject_cli()
    .arg("check")
    .arg("--config")
    .arg(&config)
    .write_stdin("{ f() { return Table1.data; }, g() { return nope; } }")
    .assert()
    .failure()
    .code(1);
  let json = stdout_json(assert.get_output());
  assert_eq!(json["view"]["state"], "objectInvalid");
  assert_eq!(json["view"]["callout"]["code"], "JSO0101");

  jsobject_cli()
    .args(["check", "--bare-object", "--policy", "permissive"])
    .write_stdin("{ g() { return nope; } }")
    .assert()
    .success();
}

#[test]
fn io_and_json_errors_exit_with_two() {
  let dir = tempdir().unwrap();
  jsobject_cli()
    .arg("check")
    .arg(dir.path().join("missing.js"))
    .assert()
    .failure()
    .code(2)
    .stderr(contains("failed to read"));

  jsobject_cli()
    .args(["validate", "--value", "[1,"])
    .assert()
    .failure()
    .code(2)
    .stderr(contains("invalid JSON for --value"));
}

#[test]
fn validate_primary_keys() {
  let assert = jsobject_cli()
    .args([
      "validate",
      "--value",
      "[1, 2]",
      "--context",
      r#"{"listData": [{"id": 1}, {"id": 2}]}"#,
    ])
    .assert()
    .success();
  assert_eq!(
    stdout_json(assert.get_output()),
    json!({"isValid": true, "parsed": [1, 2], "messages": [{"name": "", "message": ""}]})
  );

  let assert = jsobject_cli()
    .args(["validate", "--dynamic", "--context", r#"{"listData": []}"#])
    .assert()
    .failure()
    .code(1);
  let json = stdout_json(assert.get_output());
  assert_eq!(json["isValid"], false);
  assert!(json.get("parsed").is_none());
  assert_eq!(
    json["messages"][0]["message"],
    "Use currentItem or currentIndex to find a good data identifier. You can also combine two or more data attributes or columns."
  );
}

#[test]
fn validate_generic_rule() {
  let assert = jsobject_cli()
    .args([
      "validate",
      "--rule",
      r#"{"type": "number", "max": 10}"#,
      "--value",
      "\"12\"",
    ])
    .assert()
    .failure();
  let json = stdout_json(assert.get_output());
  assert_eq!(json["parsed"], 10);
  assert_eq!(json["messages"][0]["message"], "Maximum allowed value: 10");
}
