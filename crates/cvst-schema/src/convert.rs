//! # JSON Schema Conversion
//!
//! Projects a validator tree onto a JSON Schema draft-07 document.
//!
//! ## Algorithm
//!
//! Recursive descent dispatching on [`Kind`]. A refined node converts its
//! base first and then folds the refinement into the base's keywords
//! (`pattern`, `minLength`, `minimum`, ...). A refinement that cannot be
//! folded, above all a [`Refinement::Custom`] predicate, fails the whole
//! conversion: a schema looser than its validator would be unsound for the
//! tools that consume it.
//!
//! ## Determinism
//!
//! Conversion does no I/O and keeps insertion order everywhere, so the same
//! tree always yields the same bytes or the same error.
//!
//! ## IO modes
//!
//! [`IoMode::Output`] describes documents as they look after
//! [`Validator::parse`]: unknown keys have been stripped, so non-empty
//! objects are closed with `additionalProperties: false`. [`IoMode::Input`]
//! describes what parsing accepts and leaves objects open.
//!
//! In both modes defaulted fields are not `required`; their default is
//! emitted under `default`.

use serde_json::{json, Map, Number, Value};

use crate::error::ConversionError;
use crate::node::{pointer, Kind, Optionality, Refinement, StringFormat, Validator};
use crate::primitive::E164_PATTERN;

/// `$schema` URI of the target dialect.
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Which side of [`Validator::parse`] the emitted schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoMode {
    /// Values accepted by parsing.
    Input,
    /// Values produced by parsing.
    #[default]
    Output,
}

/// Conversion settings. The dialect is always draft-07 and unrepresentable
/// constructs always fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    /// Side of parsing to describe.
    pub io: IoMode,
}

/// Convert `root` into a draft-07 JSON Schema document.
///
/// # Errors
///
/// Returns [`ConversionError::Unrepresentable`] with the JSON Pointer of the
/// first node that has no draft-07 equivalent.
pub fn to_json_schema(root: &Validator, options: &ConvertOptions) -> Result<Value, ConversionError> {
    let body = Converter { options }.node(root, "")?;
    let mut document = Map::new();
    document.insert("$schema".into(), Value::String(DRAFT_07.into()));
    document.extend(body);
    Ok(Value::Object(document))
}

struct Converter<'a> {
    options: &'a ConvertOptions,
}

impl Converter<'_> {
    fn node(&self, node: &Validator, path: &str) -> Result<Map<String, Value>, ConversionError> {
        let mut schema = self.kind(node.kind(), path)?;
        if let Some(description) = node.description() {
            schema.insert("description".into(), Value::String(description.into()));
        }
        if let Optionality::Default(value) = node.optionality() {
            schema.insert("default".into(), value.clone());
        }
        Ok(schema)
    }

    fn kind(&self, kind: &Kind, path: &str) -> Result<Map<String, Value>, ConversionError> {
        let mut schema = Map::new();
        match kind {
            Kind::String {
                min_length,
                max_length,
                format,
            } => {
                schema.insert("type".into(), json!("string"));
                if let Some(min) = min_length {
                    schema.insert("minLength".into(), json!(min));
                }
                if let Some(max) = max_length {
                    schema.insert("maxLength".into(), json!(max));
                }
                match format {
                    Some(StringFormat::Email) => {
                        schema.insert("format".into(), json!("email"));
                    }
                    Some(StringFormat::Url) => {
                        schema.insert("format".into(), json!("uri"));
                    }
                    // draft-07 has no phone format
                    Some(StringFormat::E164) => {
                        schema.insert("pattern".into(), json!(E164_PATTERN));
                    }
                    None => {}
                }
            }
            Kind::Number {
                integer,
                minimum,
                maximum,
            } => {
                let ty = if *integer { "integer" } else { "number" };
                schema.insert("type".into(), json!(ty));
                if let Some(min) = minimum {
                    schema.insert("minimum".into(), number(*min, path)?);
                }
                if let Some(max) = maximum {
                    schema.insert("maximum".into(), number(*max, path)?);
                }
            }
            Kind::Boolean => {
                schema.insert("type".into(), json!("boolean"));
            }
            Kind::Enum { values } => {
                schema.insert("type".into(), json!("string"));
                schema.insert("enum".into(), json!(values));
            }
            Kind::Literal { value } => {
                let ty = match value {
                    Value::String(_) => "string",
                    Value::Number(_) => "number",
                    Value::Bool(_) => "boolean",
                    Value::Null => "null",
                    Value::Array(_) | Value::Object(_) => {
                        return Err(unrepresentable(path, "literal must be a scalar value"))
                    }
                };
                schema.insert("type".into(), json!(ty));
                schema.insert("enum".into(), Value::Array(vec![value.clone()]));
            }
            Kind::Object { fields } => {
                let properties_path = pointer(path, "properties");
                let mut properties = Map::new();
                let mut required = Vec::new();
                for (name, field) in fields {
                    let field_schema = self.node(field, &pointer(&properties_path, name))?;
                    properties.insert(name.clone(), Value::Object(field_schema));
                    if field.is_required() {
                        required.push(Value::String(name.clone()));
                    }
                }
                schema.insert("type".into(), json!("object"));
                schema.insert("properties".into(), Value::Object(properties));
                if !required.is_empty() {
                    schema.insert("required".into(), Value::Array(required));
                }
                if self.options.io == IoMode::Output && !fields.is_empty() {
                    schema.insert("additionalProperties".into(), Value::Bool(false));
                }
            }
            Kind::Array {
                items,
                min_items,
                max_items,
            } => {
                let items = self.node(items, &pointer(path, "items"))?;
                schema.insert("type".into(), json!("array"));
                schema.insert("items".into(), Value::Object(items));
                if let Some(min) = min_items {
                    schema.insert("minItems".into(), json!(min));
                }
                if let Some(max) = max_items {
                    schema.insert("maxItems".into(), json!(max));
                }
            }
            Kind::Union { variants } => {
                if variants.is_empty() {
                    return Err(unrepresentable(path, "union has no variants"));
                }
                let any_of_path = pointer(path, "anyOf");
                let any_of = variants
                    .iter()
                    .enumerate()
                    .map(|(i, variant)| {
                        self.node(variant, &pointer(&any_of_path, &i.to_string()))
                            .map(Value::Object)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                schema.insert("anyOf".into(), Value::Array(any_of));
            }
            Kind::Refined { base, refinement } => {
                schema = self.node(base, path)?;
                refine(&mut schema, refinement, path)?;
            }
        }
        Ok(schema)
    }
}

fn refine(
    schema: &mut Map<String, Value>,
    refinement: &Refinement,
    path: &str,
) -> Result<(), ConversionError> {
    let ty = schema.get("type").and_then(Value::as_str).map(str::to_owned);
    match (refinement, ty.as_deref()) {
        (Refinement::Pattern { pattern }, Some("string")) => {
            if schema.contains_key("pattern") {
                all_of(schema, json!({ "pattern": pattern }));
            } else {
                schema.insert("pattern".into(), json!(pattern));
            }
        }
        (Refinement::Length { min, max }, Some("string")) => {
            tighten(schema, "minLength", min.map(|n| n as f64), Bound::Lower, path)?;
            tighten(schema, "maxLength", max.map(|n| n as f64), Bound::Upper, path)?;
        }
        (Refinement::Length { min, max }, Some("array")) => {
            tighten(schema, "minItems", min.map(|n| n as f64), Bound::Lower, path)?;
            tighten(schema, "maxItems", max.map(|n| n as f64), Bound::Upper, path)?;
        }
        (Refinement::Range { minimum, maximum }, Some("number" | "integer")) => {
            tighten(schema, "minimum", *minimum, Bound::Lower, path)?;
            tighten(schema, "maximum", *maximum, Bound::Upper, path)?;
        }
        (Refinement::Custom(check), _) => {
            return Err(unrepresentable(
                path,
                format!("custom refinement '{}' has no declarative equivalent", check.name()),
            ))
        }
        (refinement, ty) => {
            let name = match refinement {
                Refinement::Pattern { .. } => "pattern",
                Refinement::Length { .. } => "length",
                Refinement::Range { .. } => "range",
                Refinement::Custom(_) => "custom",
            };
            return Err(unrepresentable(
                path,
                format!("{name} refinement cannot apply to a {} node", ty.unwrap_or("untyped")),
            ));
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

// Keep the stricter of an existing keyword and a refinement bound.
fn tighten(
    schema: &mut Map<String, Value>,
    key: &str,
    bound: Option<f64>,
    side: Bound,
    path: &str,
) -> Result<(), ConversionError> {
    let Some(bound) = bound else {
        return Ok(());
    };
    let stricter = match (schema.get(key).and_then(Value::as_f64), side) {
        (Some(existing), Bound::Lower) => existing.max(bound),
        (Some(existing), Bound::Upper) => existing.min(bound),
        (None, _) => bound,
    };
    schema.insert(key.into(), number(stricter, path)?);
    Ok(())
}

fn all_of(schema: &mut Map<String, Value>, clause: Value) {
    match schema.get_mut("allOf") {
        Some(Value::Array(clauses)) => clauses.push(clause),
        _ => {
            schema.insert("allOf".into(), Value::Array(vec![clause]));
        }
    }
}

// Integral bounds are written without a fractional part.
fn number(n: f64, path: &str) -> Result<Value, ConversionError> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Ok(json!(n as i64));
    }
    Number::from_f64(n)
        .map(Value::Number)
        .ok_or_else(|| unrepresentable(path, format!("bound {n} is not a finite number")))
}

fn unrepresentable(path: &str, reason: impl Into<String>) -> ConversionError {
    ConversionError::Unrepresentable {
        path: path.to_string(),
        reason: reason.into(),
    }
}
