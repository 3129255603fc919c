//! # Runtime Parsing
//!
//! [`Validator::parse`] checks a JSON document against a validator tree and
//! returns the document as it looks after defaulting: unknown object keys
//! are dropped, absent defaulted fields are filled in, absent optional
//! fields stay absent.
//!
//! Every problem is collected before failing, each [`Issue`] pointing at
//! the offending value with a JSON Pointer.

use serde_json::{Map, Value};

use crate::error::{Issue, ValidationError};
use crate::node::{json_type_name, pointer, Kind, Optionality, Refinement, Validator};
use crate::pattern;

impl Validator {
    /// Parse `value` against this tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every issue found.
    pub fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
        let mut issues = Vec::new();
        match self.parse_at(value, "", &mut issues) {
            Some(parsed) if issues.is_empty() => Ok(parsed),
            _ => Err(ValidationError::new(issues)),
        }
    }

    // Returns `Some` exactly when no issue was pushed.
    fn parse_at(&self, value: &Value, path: &str, issues: &mut Vec<Issue>) -> Option<Value> {
        match self.kind() {
            Kind::String {
                min_length,
                max_length,
                format,
            } => {
                let Some(s) = value.as_str() else {
                    issues.push(type_issue(path, "string", value));
                    return None;
                };
                let before = issues.len();
                let len = s.chars().count() as u64;
                if let Some(min) = min_length.filter(|min| len < *min) {
                    issues.push(Issue::new(
                        path,
                        format!("must contain at least {min} character(s)"),
                    ));
                }
                if let Some(max) = max_length.filter(|max| len > *max) {
                    issues.push(Issue::new(
                        path,
                        format!("must contain at most {max} character(s)"),
                    ));
                }
                if let Some(format) = format.filter(|f| !f.matches(s)) {
                    issues.push(Issue::new(path, format!("invalid {format}")));
                }
                (issues.len() == before).then(|| value.clone())
            }
            Kind::Number {
                integer,
                minimum,
                maximum,
            } => {
                let Some(n) = value.as_f64() else {
                    issues.push(type_issue(path, "number", value));
                    return None;
                };
                let before = issues.len();
                if *integer && n.fract() != 0.0 {
                    issues.push(Issue::new(path, "expected integer, received float"));
                }
                check_range(n, *minimum, *maximum, path, issues);
                (issues.len() == before).then(|| value.clone())
            }
            Kind::Boolean => {
                if value.is_boolean() {
                    Some(value.clone())
                } else {
                    issues.push(type_issue(path, "boolean", value));
                    None
                }
            }
            Kind::Enum { values } => match value.as_str() {
                Some(s) if values.iter().any(|v| v == s) => Some(value.clone()),
                _ => {
                    let expected: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
                    issues.push(Issue::new(
                        path,
                        format!("expected one of {}", expected.join(" | ")),
                    ));
                    None
                }
            },
            Kind::Literal { value: expected } => {
                if value == expected {
                    Some(value.clone())
                } else {
                    issues.push(Issue::new(path, format!("expected literal {expected}")));
                    None
                }
            }
            Kind::Object { fields } => {
                let Some(input) = value.as_object() else {
                    issues.push(type_issue(path, "object", value));
                    return None;
                };
                let before = issues.len();
                let mut output = Map::new();
                for (name, field) in fields {
                    let field_path = pointer(path, name);
                    match input.get(name) {
                        Some(v) => {
                            if let Some(parsed) = field.parse_at(v, &field_path, issues) {
                                output.insert(name.clone(), parsed);
                            }
                        }
                        None => match absent_field(field) {
                            Absent::Missing => issues.push(Issue::new(&field_path, "required")),
                            Absent::Omit => {}
                            Absent::Fill(default) => {
                                output.insert(name.clone(), default.clone());
                            }
                        },
                    }
                }
                (issues.len() == before).then_some(Value::Object(output))
            }
            Kind::Array {
                items,
                min_items,
                max_items,
            } => {
                let Some(elements) = value.as_array() else {
                    issues.push(type_issue(path, "array", value));
                    return None;
                };
                let before = issues.len();
                check_length(elements.len() as u64, *min_items, *max_items, "item", path, issues);
                let parsed: Vec<Value> = elements
                    .iter()
                    .enumerate()
                    .filter_map(|(i, element)| {
                        items.parse_at(element, &pointer(path, &i.to_string()), issues)
                    })
                    .collect();
                (issues.len() == before).then_some(Value::Array(parsed))
            }
            Kind::Union { variants } => {
                for variant in variants {
                    let mut scratch = Vec::new();
                    if let Some(parsed) = variant.parse_at(value, path, &mut scratch) {
                        return Some(parsed);
                    }
                }
                issues.push(Issue::new(
                    path,
                    format!("no union variant matched ({} tried)", variants.len()),
                ));
                None
            }
            Kind::Refined { base, refinement } => {
                let parsed = base.parse_at(value, path, issues)?;
                let before = issues.len();
                apply_refinement(refinement, &parsed, path, issues);
                (issues.len() == before).then_some(parsed)
            }
        }
    }
}

enum Absent<'a> {
    Missing,
    Omit,
    Fill(&'a Value),
}

// Optionality of a field, looking through refinements the same way
// `Validator::is_required` does.
fn absent_field(field: &Validator) -> Absent<'_> {
    match (field.optionality(), field.kind()) {
        (Optionality::Required, Kind::Refined { base, .. }) => absent_field(base),
        (Optionality::Required, _) => Absent::Missing,
        (Optionality::Optional, _) => Absent::Omit,
        (Optionality::Default(value), _) => Absent::Fill(value),
    }
}

fn apply_refinement(refinement: &Refinement, value: &Value, path: &str, issues: &mut Vec<Issue>) {
    match refinement {
        Refinement::Pattern { pattern } => {
            let Some(s) = value.as_str() else {
                issues.push(type_issue(path, "string", value));
                return;
            };
            match pattern::compile(pattern) {
                Ok(re) if re.is_match(s) => {}
                Ok(_) => issues.push(Issue::new(path, format!("does not match pattern {pattern}"))),
                Err(reason) => issues.push(Issue::new(path, format!("invalid pattern: {reason}"))),
            }
        }
        Refinement::Length { min, max } => match value {
            Value::String(s) => {
                check_length(s.chars().count() as u64, *min, *max, "character", path, issues)
            }
            Value::Array(a) => check_length(a.len() as u64, *min, *max, "item", path, issues),
            other => issues.push(Issue::new(
                path,
                format!("length check needs a string or array, received {}", json_type_name(other)),
            )),
        },
        Refinement::Range { minimum, maximum } => match value.as_f64() {
            Some(n) => check_range(n, *minimum, *maximum, path, issues),
            None => issues.push(type_issue(path, "number", value)),
        },
        Refinement::Custom(check) => match check.predicate() {
            Some(predicate) if predicate.test(value) => {}
            Some(_) => issues.push(Issue::new(path, check.message())),
            None => issues.push(Issue::new(
                path,
                format!("custom check '{}' has no predicate bound", check.name()),
            )),
        },
    }
}

fn check_length(
    len: u64,
    min: Option<u64>,
    max: Option<u64>,
    unit: &str,
    path: &str,
    issues: &mut Vec<Issue>,
) {
    if let Some(min) = min.filter(|min| len < *min) {
        issues.push(Issue::new(path, format!("must contain at least {min} {unit}(s)")));
    }
    if let Some(max) = max.filter(|max| len > *max) {
        issues.push(Issue::new(path, format!("must contain at most {max} {unit}(s)")));
    }
}

fn check_range(n: f64, minimum: Option<f64>, maximum: Option<f64>, path: &str, issues: &mut Vec<Issue>) {
    if let Some(min) = minimum.filter(|min| n < *min) {
        issues.push(Issue::new(path, format!("must be >= {min}")));
    }
    if let Some(max) = maximum.filter(|max| n > *max) {
        issues.push(Issue::new(path, format!("must be <= {max}")));
    }
}

fn type_issue(path: &str, expected: &str, value: &Value) -> Issue {
    Issue::new(
        path,
        format!("expected {expected}, received {}", json_type_name(value)),
    )
}
