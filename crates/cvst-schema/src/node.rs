//! # Validator Nodes
//!
//! The validator tree is built from [`Validator`] nodes. Each node holds a
//! closed [`Kind`] (primitive, composite, union, literal or refined), an
//! [`Optionality`] that applies when the node is used as an object field,
//! and an optional human description.
//!
//! ## Serialized form
//!
//! Nodes serialize to a tagged JSON shape, which is also the format accepted
//! by the schema loader:
//!
//! ```json
//! {
//!   "kind": "object",
//!   "fields": {
//!     "name": { "kind": "string", "min_length": 1 },
//!     "age": { "kind": "number", "optionality": "optional" }
//!   }
//! }
//! ```
//!
//! ## Invariants
//!
//! - Object field names are unique and keep declaration order.
//! - Refinements are a closed set. Only [`Refinement::Custom`] carries an
//!   opaque predicate, and that predicate never crosses serialization.
//! - Trees are finite and acyclic: children are owned, never shared.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Ordered field mapping of an object node.
pub type Fields = IndexMap<String, Validator>;

/// A node in the composable schema tree describing one constrained shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    #[serde(flatten)]
    kind: Kind,

    #[serde(default, skip_serializing_if = "Optionality::is_required")]
    optionality: Optionality,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Structural kind of a node together with its kind-specific constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Kind {
    /// UTF-8 string, optionally bounded in length and tagged with a format.
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<StringFormat>,
    },
    /// JSON number, optionally restricted to integers and bounded.
    Number {
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        integer: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    /// `true` or `false`.
    Boolean,
    /// One of a fixed set of strings.
    Enum { values: Vec<String> },
    /// Exactly one scalar value.
    Literal { value: Value },
    /// Named fields, each with its own optionality.
    Object {
        #[serde(default)]
        fields: Fields,
    },
    /// Homogeneous array.
    Array {
        items: Box<Validator>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_items: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_items: Option<u64>,
    },
    /// Ordered alternatives; the first one that parses wins.
    Union { variants: Vec<Validator> },
    /// A base node with one extra constraint layered on top.
    Refined {
        base: Box<Validator>,
        refinement: Refinement,
    },
}

impl Kind {
    /// Every discriminant accepted in the serialized form.
    pub const TAGS: [&'static str; 9] = [
        "string", "number", "boolean", "enum", "literal", "object", "array", "union", "refined",
    ];

    /// The serialized discriminant of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Kind::String { .. } => "string",
            Kind::Number { .. } => "number",
            Kind::Boolean => "boolean",
            Kind::Enum { .. } => "enum",
            Kind::Literal { .. } => "literal",
            Kind::Object { .. } => "object",
            Kind::Array { .. } => "array",
            Kind::Union { .. } => "union",
            Kind::Refined { .. } => "refined",
        }
    }
}

/// Named string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFormat {
    /// An e-mail address.
    Email,
    /// An absolute URL.
    Url,
    /// An E.164 phone number.
    E164,
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringFormat::Email => write!(f, "email"),
            StringFormat::Url => write!(f, "url"),
            StringFormat::E164 => write!(f, "e164"),
        }
    }
}

/// How a node behaves when it is absent from its parent object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Optionality {
    /// The field must be present.
    #[default]
    Required,
    /// The field may be omitted.
    Optional,
    /// The field may be omitted; parsing then supplies this value.
    Default(Value),
}

impl Optionality {
    /// Returns true for [`Optionality::Required`].
    pub fn is_required(&self) -> bool {
        matches!(self, Optionality::Required)
    }
}

/// A constraint layered on a base node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Refinement {
    /// The string must match a regular expression.
    Pattern { pattern: String },
    /// String length (in characters) or array length bounds.
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u64>,
    },
    /// Numeric bounds, inclusive.
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    /// An opaque runtime check with no declarative form.
    Custom(CustomCheck),
}

/// An opaque, side-effect-free predicate over a parsed value.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    /// Wrap a closure as a predicate.
    pub fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate the predicate.
    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// A named custom refinement.
///
/// The predicate is only available to trees built in-process. Trees loaded
/// from a document carry the name and message but no predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomCheck {
    name: String,
    message: String,
    #[serde(skip)]
    predicate: Option<Predicate>,
}

impl CustomCheck {
    /// Create a custom check bound to a predicate.
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Some(Predicate::new(predicate)),
        }
    }

    /// Name identifying the check.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message reported when the check fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The bound predicate, if any.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }
}

// Predicates are opaque; two checks are the same check when their names and
// messages agree.
impl PartialEq for CustomCheck {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.message == other.message
    }
}

impl Validator {
    /// Create a required, undescribed node of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            optionality: Optionality::Required,
            description: None,
        }
    }

    /// The node's kind and constraints.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The node's optionality.
    pub fn optionality(&self) -> &Optionality {
        &self.optionality
    }

    /// The node's description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the node must be present when used as an object field.
    ///
    /// A refined node whose own optionality is `Required` inherits the
    /// optionality of its base, so a refinement never makes an optional
    /// field mandatory.
    pub fn is_required(&self) -> bool {
        match (&self.optionality, &self.kind) {
            (Optionality::Required, Kind::Refined { base, .. }) => base.is_required(),
            (optionality, _) => optionality.is_required(),
        }
    }

    /// Mark the node as optional.
    pub fn optional(mut self) -> Self {
        self.optionality = Optionality::Optional;
        self
    }

    /// Mark the node as required.
    pub fn required(mut self) -> Self {
        self.optionality = Optionality::Required;
        self
    }

    /// Supply a default used when the node is absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.optionality = Optionality::Default(value.into());
        self
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wrap the node in a refinement.
    ///
    /// Optionality and description move to the new outer node.
    pub fn refine(self, refinement: Refinement) -> Self {
        let Validator {
            kind,
            optionality,
            description,
        } = self;
        Validator {
            kind: Kind::Refined {
                base: Box::new(Validator::new(kind)),
                refinement,
            },
            optionality,
            description,
        }
    }

    /// Require string values to match `pattern`.
    pub fn regex(self, pattern: impl Into<String>) -> Self {
        self.refine(Refinement::Pattern {
            pattern: pattern.into(),
        })
    }

    /// Layer an opaque predicate on the node.
    pub fn custom(
        self,
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.refine(Refinement::Custom(CustomCheck::new(name, message, predicate)))
    }

    /// Minimum length of a string (characters) or array (items).
    pub fn min_len(mut self, min: u64) -> Self {
        match &mut self.kind {
            Kind::String { min_length, .. } => *min_length = Some(min),
            Kind::Array { min_items, .. } => *min_items = Some(min),
            _ => {
                return self.refine(Refinement::Length {
                    min: Some(min),
                    max: None,
                })
            }
        }
        self
    }

    /// Maximum length of a string (characters) or array (items).
    pub fn max_len(mut self, max: u64) -> Self {
        match &mut self.kind {
            Kind::String { max_length, .. } => *max_length = Some(max),
            Kind::Array { max_items, .. } => *max_items = Some(max),
            _ => {
                return self.refine(Refinement::Length {
                    min: None,
                    max: Some(max),
                })
            }
        }
        self
    }

    /// Shorthand for `min_len(1)`.
    pub fn nonempty(self) -> Self {
        self.min_len(1)
    }

    /// Inclusive lower bound of a number.
    pub fn min(mut self, bound: f64) -> Self {
        match &mut self.kind {
            Kind::Number { minimum, .. } => *minimum = Some(bound),
            _ => {
                return self.refine(Refinement::Range {
                    minimum: Some(bound),
                    maximum: None,
                })
            }
        }
        self
    }

    /// Inclusive upper bound of a number.
    pub fn max(mut self, bound: f64) -> Self {
        match &mut self.kind {
            Kind::Number { maximum, .. } => *maximum = Some(bound),
            _ => {
                return self.refine(Refinement::Range {
                    minimum: None,
                    maximum: Some(bound),
                })
            }
        }
        self
    }

    /// Check the authoring rules over the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in depth-first order.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.check_at("")
    }

    fn check_at(&self, path: &str) -> Result<(), SchemaError> {
        match &self.kind {
            Kind::String {
                min_length,
                max_length,
                ..
            } => check_bounds(path, min_length.map(|n| n as f64), max_length.map(|n| n as f64)),
            Kind::Number {
                minimum, maximum, ..
            } => check_bounds(path, *minimum, *maximum),
            Kind::Boolean => Ok(()),
            Kind::Enum { values } => {
                if values.is_empty() {
                    return Err(SchemaError::EmptyEnum {
                        path: path.to_string(),
                    });
                }
                for (i, value) in values.iter().enumerate() {
                    if values[..i].contains(value) {
                        return Err(SchemaError::DuplicateEnumValue {
                            path: path.to_string(),
                            value: value.clone(),
                        });
                    }
                }
                Ok(())
            }
            Kind::Literal { value } => match value {
                Value::Array(_) | Value::Object(_) => Err(SchemaError::NonScalarLiteral {
                    path: path.to_string(),
                }),
                _ => Ok(()),
            },
            Kind::Object { fields } => {
                let properties = pointer(path, "properties");
                for (name, field) in fields {
                    field.check_at(&pointer(&properties, name))?;
                }
                Ok(())
            }
            Kind::Array {
                items,
                min_items,
                max_items,
            } => {
                check_bounds(path, min_items.map(|n| n as f64), max_items.map(|n| n as f64))?;
                items.check_at(&pointer(path, "items"))
            }
            Kind::Union { variants } => {
                if variants.is_empty() {
                    return Err(SchemaError::EmptyUnion {
                        path: path.to_string(),
                    });
                }
                let any_of = pointer(path, "anyOf");
                for (i, variant) in variants.iter().enumerate() {
                    variant.check_at(&pointer(&any_of, &i.to_string()))?;
                }
                Ok(())
            }
            Kind::Refined { base, refinement } => {
                base.check_at(path)?;
                match refinement {
                    Refinement::Pattern { pattern } => crate::pattern::compile(pattern)
                        .map(|_| ())
                        .map_err(|reason| SchemaError::InvalidPattern {
                            path: path.to_string(),
                            reason,
                        }),
                    Refinement::Length { min, max } => {
                        check_bounds(path, min.map(|n| n as f64), max.map(|n| n as f64))
                    }
                    Refinement::Range { minimum, maximum } => check_bounds(path, *minimum, *maximum),
                    Refinement::Custom(_) => Ok(()),
                }
            }
        }
    }
}

fn check_bounds(path: &str, lower: Option<f64>, upper: Option<f64>) -> Result<(), SchemaError> {
    match (lower, upper) {
        (Some(lower), Some(upper)) if lower > upper => Err(SchemaError::InvertedBounds {
            path: path.to_string(),
            lower,
            upper,
        }),
        _ => Ok(()),
    }
}

/// Append one RFC 6901 reference token to a JSON Pointer.
pub(crate) fn pointer(base: &str, token: &str) -> String {
    format!("{base}/{}", token.replace('~', "~0").replace('/', "~1"))
}

/// JSON type name used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
