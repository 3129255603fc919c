//! # Schema Loader
//!
//! Reads a schema-definition document and resolves the value it exports.
//!
//! Definitions are declarative JSON or YAML documents describing a
//! validator tree in its serialized form. Loading never executes code; the
//! [`SchemaLoader`] trait is the seam where a different source (an embedded
//! registry, a remote store) would plug in.
//!
//! ## Export resolution
//!
//! A document with a top-level non-null `default` member exports that
//! member. Any other document exports itself.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CommandError;

/// Source of schema-definition values.
#[async_trait]
pub trait SchemaLoader: Send + Sync {
    /// Load the value exported by the document at `path`.
    async fn load(&self, path: &Path) -> Result<Value, CommandError>;
}

/// Loads definitions from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

#[async_trait]
impl SchemaLoader for FileLoader {
    async fn load(&self, path: &Path) -> Result<Value, CommandError> {
        let access = |source| CommandError::Access {
            path: path.to_path_buf(),
            source,
        };
        let metadata = tokio::fs::metadata(path).await.map_err(access)?;
        if !metadata.is_file() {
            return Err(CommandError::Access {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        let text = tokio::fs::read_to_string(path).await.map_err(access)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read schema definition");

        let document = parse_document(path, &text).map_err(|reason| CommandError::Load {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(resolve_export(document))
    }
}

/// Pick the exported value out of a loaded document.
pub fn resolve_export(document: Value) -> Value {
    match document {
        Value::Object(mut map) if map.get("default").is_some_and(|v| !v.is_null()) => {
            map.remove("default").unwrap_or(Value::Null)
        }
        other => other,
    }
}

// Errors name the format; serde's message carries line and column.
fn parse_document(path: &Path, text: &str) -> Result<Value, String> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(text).map_err(|e| format!("invalid JSON: {e}"))
    } else {
        // `preserve_order` keeps mapping order through this conversion
        serde_yaml::from_str(text).map_err(|e| format!("invalid YAML: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_member_is_preferred() {
        let doc = json!({ "default": { "kind": "string" }, "other": 1 });
        assert_eq!(resolve_export(doc), json!({ "kind": "string" }));
    }

    #[test]
    fn null_default_falls_back_to_document() {
        let doc = json!({ "default": null, "kind": "boolean" });
        assert_eq!(resolve_export(doc.clone()), doc);
        assert_eq!(resolve_export(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn yaml_keeps_mapping_order() {
        let json = parse_document(
            Path::new("s.yaml"),
            "kind: object\nfields:\n  zeta: { kind: string }\n  alpha: { kind: boolean }\n",
        )
        .unwrap();
        let keys: Vec<&String> = json["fields"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn yaml_numbers_stay_integral() {
        let json = parse_document(Path::new("s.yml"), "minimum: 1900\nratio: 0.5").unwrap();
        assert!(json["minimum"].is_i64());
        assert_eq!(json["ratio"], json!(0.5));
    }

    #[test]
    fn parse_picks_format_by_extension() {
        let parsed = parse_document(Path::new("s.YML"), "kind: string").unwrap();
        assert_eq!(parsed, json!({ "kind": "string" }));
        let err = parse_document(Path::new("s.json"), "kind: string").unwrap_err();
        assert!(err.starts_with("invalid JSON"), "{err}");
    }

    #[tokio::test]
    async fn load_error_names_format_and_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "kind: string\nfields: [unclosed\n").unwrap();
        match FileLoader.load(&path).await.unwrap_err() {
            CommandError::Load { path: at, reason } => {
                assert_eq!(at, path);
                assert!(reason.starts_with("invalid YAML"), "{reason}");
                assert!(reason.contains("line"), "{reason}");
            }
            other => panic!("expected a load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileLoader
            .load(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Access { .. }));
    }

    #[tokio::test]
    async fn syntax_error_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"kind\": ").unwrap();
        let err = FileLoader.load(&path).await.unwrap_err();
        assert!(matches!(err, CommandError::Load { .. }));
    }
}
