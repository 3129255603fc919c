//! # Composite Combinators
//!
//! Objects, arrays, unions and literals. Constructors that can produce an
//! invalid tree (duplicate field names, an empty union, a non-scalar literal)
//! return `Result` so the mistake surfaces where the schema is written, not
//! when it is converted.

use serde_json::Value;

use crate::error::SchemaError;
use crate::node::{Fields, Kind, Validator};

/// An object with the given fields, in declaration order.
///
/// # Errors
///
/// Returns [`SchemaError::DuplicateField`] if a name repeats.
pub fn object<I, K>(fields: I) -> Result<Validator, SchemaError>
where
    I: IntoIterator<Item = (K, Validator)>,
    K: Into<String>,
{
    let mut map = Fields::new();
    for (name, field) in fields {
        let name = name.into();
        if map.contains_key(&name) {
            return Err(SchemaError::DuplicateField { field: name });
        }
        map.insert(name, field);
    }
    Ok(Validator::new(Kind::Object { fields: map }))
}

/// An array whose elements all satisfy `items`.
pub fn array(items: Validator) -> Validator {
    Validator::new(Kind::Array {
        items: Box::new(items),
        min_items: None,
        max_items: None,
    })
}

/// Ordered alternatives.
///
/// # Errors
///
/// Returns [`SchemaError::EmptyUnion`] when no variant is given.
pub fn union<I>(variants: I) -> Result<Validator, SchemaError>
where
    I: IntoIterator<Item = Validator>,
{
    let variants: Vec<Validator> = variants.into_iter().collect();
    if variants.is_empty() {
        return Err(SchemaError::EmptyUnion {
            path: String::new(),
        });
    }
    Ok(Validator::new(Kind::Union { variants }))
}

/// Exactly `value`, which must be a string, number, boolean or null.
///
/// # Errors
///
/// Returns [`SchemaError::NonScalarLiteral`] for arrays and objects.
pub fn literal(value: impl Into<Value>) -> Result<Validator, SchemaError> {
    let value = value.into();
    if value.is_array() || value.is_object() {
        return Err(SchemaError::NonScalarLiteral {
            path: String::new(),
        });
    }
    Ok(Validator::new(Kind::Literal { value }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{number, string};
    use serde_json::json;

    #[test]
    fn object_keeps_declaration_order() {
        let v = object([("zeta", string()), ("alpha", number()), ("mid", string())]).unwrap();
        match v.kind() {
            Kind::Object { fields } => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                assert_eq!(names, ["zeta", "alpha", "mid"]);
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn object_rejects_duplicate_field() {
        let err = object([("name", string()), ("name", number())]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                field: "name".into()
            }
        );
    }

    #[test]
    fn empty_union_fails_at_authoring_time() {
        assert!(matches!(
            union(Vec::new()),
            Err(SchemaError::EmptyUnion { .. })
        ));
    }

    #[test]
    fn literal_must_be_scalar() {
        assert!(literal("Present").is_ok());
        assert!(literal(3).is_ok());
        assert!(literal(Value::Null).is_ok());
        assert!(matches!(
            literal(json!(["Present"])),
            Err(SchemaError::NonScalarLiteral { .. })
        ));
    }
}
