//! # Type Guard
//!
//! Decides whether an arbitrary JSON value is a validator tree the converter
//! can process. The guard is deliberately conservative: a value that merely
//! looks similar is rejected here with a clear reason instead of failing
//! somewhere deep inside the conversion walk.
//!
//! Checks run in a fixed order, cheapest and most telling first:
//!
//! 1. the value is an object;
//! 2. it carries a string `kind` discriminant naming a known kind;
//! 3. no node or refinement carries a member its kind does not define;
//! 4. the whole value deserializes into a [`Validator`];
//! 5. the tree passes [`Validator::check`].
//!
//! Step 3 exists because an unknown member is almost always a constraint
//! written under the wrong name (`minLength` for `min_length`, a stray
//! `optional: true`). Ignoring it would emit a schema looser than intended.

use serde_json::{Map, Value};

use crate::error::GuardError;
use crate::node::{json_type_name, pointer, Kind, Validator};

/// Accept `value` as a validator tree or explain why not.
///
/// # Errors
///
/// Returns the first [`GuardError`] found in the order above.
pub fn guard(value: &Value) -> Result<Validator, GuardError> {
    let object = value.as_object().ok_or(GuardError::NotAnObject {
        found: json_type_name(value),
    })?;

    let tag = object
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(GuardError::MissingDiscriminant)?;
    if !Kind::TAGS.contains(&tag) {
        return Err(GuardError::UnknownKind(tag.to_string()));
    }
    check_members(object, "")?;

    let validator: Validator =
        serde_json::from_value(value.clone()).map_err(|e| GuardError::Malformed(e.to_string()))?;
    validator.check()?;
    Ok(validator)
}

const NODE_MEMBERS: [&str; 3] = ["kind", "optionality", "description"];

fn kind_members(tag: &str) -> &'static [&'static str] {
    match tag {
        "string" => &["min_length", "max_length", "format"],
        "number" => &["integer", "minimum", "maximum"],
        "enum" => &["values"],
        "literal" => &["value"],
        "object" => &["fields"],
        "array" => &["items", "min_items", "max_items"],
        "union" => &["variants"],
        "refined" => &["base", "refinement"],
        _ => &[],
    }
}

fn refinement_members(tag: &str) -> &'static [&'static str] {
    match tag {
        "pattern" => &["pattern"],
        "length" => &["min", "max"],
        "range" => &["minimum", "maximum"],
        "custom" => &["name", "message"],
        _ => &[],
    }
}

// Shapes other than unknown members are left to deserialization, which
// reports them with serde's own messages.
fn check_members(node: &Map<String, Value>, path: &str) -> Result<(), GuardError> {
    let Some(tag) = node.get("kind").and_then(Value::as_str) else {
        return Ok(());
    };
    let allowed = kind_members(tag);
    reject_unknown(node, path, |key| {
        NODE_MEMBERS.contains(&key) || allowed.contains(&key)
    })?;

    match tag {
        "object" => {
            if let Some(fields) = node.get("fields").and_then(Value::as_object) {
                let properties = pointer(path, "properties");
                for (name, field) in fields {
                    if let Some(field) = field.as_object() {
                        check_members(field, &pointer(&properties, name))?;
                    }
                }
            }
        }
        "array" => {
            if let Some(items) = node.get("items").and_then(Value::as_object) {
                check_members(items, &pointer(path, "items"))?;
            }
        }
        "union" => {
            if let Some(variants) = node.get("variants").and_then(Value::as_array) {
                let any_of = pointer(path, "anyOf");
                for (i, variant) in variants.iter().enumerate() {
                    if let Some(variant) = variant.as_object() {
                        check_members(variant, &pointer(&any_of, &i.to_string()))?;
                    }
                }
            }
        }
        "refined" => {
            if let Some(base) = node.get("base").and_then(Value::as_object) {
                check_members(base, path)?;
            }
            if let Some(refinement) = node.get("refinement").and_then(Value::as_object) {
                let allowed = refinement
                    .get("type")
                    .and_then(Value::as_str)
                    .map(refinement_members)
                    .unwrap_or_default();
                reject_unknown(refinement, path, |key| key == "type" || allowed.contains(&key))?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn reject_unknown(
    members: &Map<String, Value>,
    path: &str,
    known: impl Fn(&str) -> bool,
) -> Result<(), GuardError> {
    match members.keys().find(|key| !known(key)) {
        Some(key) => {
            let at = if path.is_empty() { "(root)" } else { path };
            Err(GuardError::Malformed(format!("unknown member '{key}' at {at}")))
        }
        None => Ok(()),
    }
}

/// Whether `value` is a validator tree.
pub fn is_validator(value: &Value) -> bool {
    guard(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use serde_json::json;

    #[test]
    fn accepts_serialized_tree() {
        let tree = crate::templates::standard_resume().unwrap();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(guard(&value).unwrap(), tree);
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            guard(&json!([1, 2])),
            Err(GuardError::NotAnObject { found: "array" })
        );
        assert!(!is_validator(&json!("string")));
    }

    #[test]
    fn checks_discriminant_before_shape() {
        // a lookalike exposing a parse member but no discriminant
        let decoy = json!({ "parse": "function", "_def": { "typeName": "ZodString" } });
        assert_eq!(guard(&decoy), Err(GuardError::MissingDiscriminant));

        let decoy = json!({ "kind": "sedan", "fields": {} });
        assert_eq!(guard(&decoy), Err(GuardError::UnknownKind("sedan".into())));

        let decoy = json!({ "kind": 7 });
        assert_eq!(guard(&decoy), Err(GuardError::MissingDiscriminant));
    }

    #[test]
    fn rejects_malformed_children() {
        let value = json!({ "kind": "array", "items": { "kind": "nope" } });
        assert!(matches!(guard(&value), Err(GuardError::Malformed(_))));

        let value = json!({ "kind": "array" });
        assert!(matches!(guard(&value), Err(GuardError::Malformed(_))));
    }

    #[test]
    fn rejects_misnamed_constraints() {
        let value = json!({ "kind": "string", "minLength": 3, "pattern": "^[a-z]+$" });
        assert_eq!(
            guard(&value),
            Err(GuardError::Malformed(
                "unknown member 'minLength' at (root)".into()
            ))
        );

        let value = json!({
            "kind": "object",
            "fields": { "a": { "kind": "string", "optional": true } }
        });
        assert_eq!(
            guard(&value),
            Err(GuardError::Malformed(
                "unknown member 'optional' at /properties/a".into()
            ))
        );
    }

    #[test]
    fn rejects_unknown_members_deep_in_the_tree() {
        let in_union = json!({
            "kind": "array",
            "items": {
                "kind": "union",
                "variants": [{ "kind": "boolean" }, { "kind": "number", "exclusiveMinimum": 0 }]
            }
        });
        assert!(matches!(
            guard(&in_union),
            Err(GuardError::Malformed(msg)) if msg.ends_with("/items/anyOf/1")
        ));

        let in_refinement = json!({
            "kind": "refined",
            "base": { "kind": "string" },
            "refinement": { "type": "pattern", "pattern": "^a", "flags": "i" }
        });
        assert!(matches!(
            guard(&in_refinement),
            Err(GuardError::Malformed(msg)) if msg.contains("'flags'")
        ));
    }

    #[test]
    fn accepts_every_documented_member() {
        let value = json!({
            "kind": "refined",
            "description": "a short tag",
            "optionality": { "default": "x" },
            "base": { "kind": "string", "min_length": 1, "max_length": 8, "format": "email" },
            "refinement": { "type": "length", "min": 1, "max": 4 }
        });
        assert!(guard(&value).is_ok());
    }

    #[test]
    fn rejects_trees_breaking_authoring_rules() {
        let value = json!({ "kind": "union", "variants": [] });
        assert_eq!(
            guard(&value),
            Err(GuardError::Invalid(SchemaError::EmptyUnion {
                path: String::new()
            }))
        );
    }
}
