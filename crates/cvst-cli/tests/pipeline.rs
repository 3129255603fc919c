//! End-to-end runs of the zod2schema pipeline against real files.

use std::path::Path;

use serde_json::{json, Value};

use cvst_cli::error::CommandError;
use cvst_cli::zod2schema::{run_zod2schema, Zod2SchemaArgs};

fn args(input: &Path, output: &Path) -> Zod2SchemaArgs {
    Zod2SchemaArgs {
        input: input.to_string_lossy().into_owned(),
        output: output.to_string_lossy().into_owned(),
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn scenario_a_required_name_optional_age() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("person.json");
    let output = dir.path().join("person.schema.json");
    std::fs::write(
        &input,
        json!({
            "default": {
                "kind": "object",
                "fields": {
                    "name": { "kind": "string" },
                    "age": { "kind": "number", "integer": false, "optionality": "optional" }
                }
            }
        })
        .to_string(),
    )
    .unwrap();

    let written = run_zod2schema(&args(&input, &output)).await.unwrap();
    assert_eq!(written, output);

    let schema = read_json(&output);
    assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["name"]));
    assert_eq!(schema["properties"]["name"]["type"], "string");
    assert_eq!(schema["properties"]["age"]["type"], "number");
}

#[tokio::test]
async fn scenario_b_date_or_present_from_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("end-date.yaml");
    let output = dir.path().join("end-date.json");
    std::fs::write(
        &input,
        r#"
kind: union
variants:
  - kind: object
    fields:
      year: { kind: number, integer: true, minimum: 1900, maximum: 2100 }
      month: { kind: number, integer: true, minimum: 1, maximum: 12 }
      day: { kind: number, integer: true, minimum: 1, maximum: 31 }
  - kind: literal
    value: Present
"#,
    )
    .unwrap();

    run_zod2schema(&args(&input, &output)).await.unwrap();

    let schema = read_json(&output);
    let any_of = schema["anyOf"].as_array().unwrap();
    assert_eq!(any_of.len(), 2);
    assert_eq!(any_of[0]["type"], "object");
    assert_eq!(any_of[0]["properties"]["year"]["minimum"], json!(1900));
    assert_eq!(any_of[1]["enum"], json!(["Present"]));
}

#[tokio::test]
async fn scenario_c_nested_output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flag.json");
    let output = dir.path().join("deeply/nested/dir/flag.json");
    std::fs::write(&input, r#"{ "kind": "boolean" }"#).unwrap();

    run_zod2schema(&args(&input, &output)).await.unwrap();

    assert!(output.is_file());
    assert_eq!(read_json(&output)["type"], "boolean");
}

#[tokio::test]
async fn scenario_d_txt_input_is_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("schema.txt");
    let output = dir.path().join("out/schema.json");

    let err = run_zod2schema(&args(&input, &output)).await.unwrap_err();

    assert!(matches!(err, CommandError::Path(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn unrepresentable_conversion_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("color.json");
    let output = dir.path().join("color.schema.json");
    std::fs::write(&output, "{\"previous\": true}").unwrap();
    std::fs::write(
        &input,
        json!({
            "kind": "object",
            "fields": {
                "color": {
                    "kind": "refined",
                    "base": { "kind": "string" },
                    "refinement": { "type": "custom", "name": "is-color", "message": "Invalid color format" },
                    "optionality": "optional"
                }
            }
        })
        .to_string(),
    )
    .unwrap();

    let err = run_zod2schema(&args(&input, &output)).await.unwrap_err();

    match &err {
        CommandError::Conversion(e) => assert!(e.to_string().contains("/properties/color")),
        other => panic!("expected a conversion error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 6);
    assert_eq!(read_json(&output), json!({ "previous": true }));
}

#[tokio::test]
async fn lookalike_value_fails_the_type_guard() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("decoy.json");
    let output = dir.path().join("decoy.schema.json");
    std::fs::write(&input, r#"{ "kind": "zod-string", "parse": "function" }"#).unwrap();

    let err = run_zod2schema(&args(&input, &output)).await.unwrap_err();

    assert!(matches!(err, CommandError::TypeGuard));
    assert_eq!(err.to_string(), "input does not export a valid schema");
    assert!(!output.exists());
}

#[tokio::test]
async fn missing_input_is_an_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_zod2schema(&args(
        &dir.path().join("absent.yml"),
        &dir.path().join("out.json"),
    ))
    .await
    .unwrap_err();
    assert!(matches!(err, CommandError::Access { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn output_is_fully_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("s.json");
    let output = dir.path().join("s.schema.json");
    std::fs::write(&input, r#"{ "kind": "string", "min_length": 1 }"#).unwrap();
    std::fs::write(&output, " ".repeat(10_000)).unwrap();

    run_zod2schema(&args(&input, &output)).await.unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.ends_with("}\n"));
    assert_eq!(read_json(&output)["minLength"], json!(1));
}

#[tokio::test]
async fn misnamed_constraints_are_rejected_not_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("name.yaml");
    let output = dir.path().join("name.schema.json");
    std::fs::write(
        &input,
        "kind: object\nfields:\n  name:\n    kind: string\n    minLength: 3\n    pattern: '^[a-z]+$'\n",
    )
    .unwrap();

    let err = run_zod2schema(&args(&input, &output)).await.unwrap_err();

    assert!(matches!(err, CommandError::TypeGuard));
    assert_eq!(err.exit_code(), 5);
    assert!(!output.exists());
}

#[tokio::test]
async fn misspelled_optionality_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("person.json");
    let output = dir.path().join("person.schema.json");
    std::fs::write(
        &input,
        r#"{ "kind": "object", "fields": { "a": { "kind": "string", "optional": true } } }"#,
    )
    .unwrap();

    let err = run_zod2schema(&args(&input, &output)).await.unwrap_err();

    assert!(matches!(err, CommandError::TypeGuard));
    assert!(!output.exists());
}

#[tokio::test]
async fn rust_only_pattern_syntax_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("code.json");
    let output = dir.path().join("code.schema.json");
    std::fs::write(
        &input,
        json!({
            "kind": "refined",
            "base": { "kind": "string" },
            "refinement": { "type": "pattern", "pattern": "(?i)^abc$" }
        })
        .to_string(),
    )
    .unwrap();

    let err = run_zod2schema(&args(&input, &output)).await.unwrap_err();

    assert!(matches!(err, CommandError::TypeGuard));
    assert!(!output.exists());
}
