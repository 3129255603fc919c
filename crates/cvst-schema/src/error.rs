//! # Error Types
//!
//! Enum errors derive `Display` and `Error` via `thiserror`.
//!
//! - [`SchemaError`]: a validator tree is malformed at authoring time
//!   (empty union, bad pattern, inverted bounds).
//! - [`ConversionError`]: a well-formed tree contains a construct that has
//!   no draft-07 equivalent.
//! - [`ValidationError`]: a document failed [`Validator::parse`]. Carries
//!   every [`Issue`] found, each with its JSON Pointer path.
//! - [`GuardError`]: an arbitrary JSON value is not a validator tree.
//!
//! [`Validator::parse`]: crate::Validator::parse

use std::fmt;

use thiserror::Error;

/// A validator tree violates a structural rule at authoring time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A union was declared with no variants.
    #[error("union at '{path}' has no variants")]
    EmptyUnion {
        /// JSON Pointer of the union node.
        path: String,
    },

    /// An enum was declared with no values.
    #[error("enum at '{path}' has no values")]
    EmptyEnum {
        /// JSON Pointer of the enum node.
        path: String,
    },

    /// An enum lists the same value twice.
    #[error("enum at '{path}' repeats value '{value}'")]
    DuplicateEnumValue {
        /// JSON Pointer of the enum node.
        path: String,
        /// The repeated value.
        value: String,
    },

    /// An object declares the same field name twice.
    #[error("object declares field '{field}' more than once")]
    DuplicateField {
        /// The repeated field name.
        field: String,
    },

    /// A literal holds an array or object.
    #[error("literal at '{path}' must be a string, number, boolean or null")]
    NonScalarLiteral {
        /// JSON Pointer of the literal node.
        path: String,
    },

    /// A pattern refinement does not compile.
    #[error("pattern at '{path}' does not compile: {reason}")]
    InvalidPattern {
        /// JSON Pointer of the refined node.
        path: String,
        /// Compiler message from the regex engine.
        reason: String,
    },

    /// A lower bound exceeds its upper bound.
    #[error("bounds at '{path}' are inverted: {lower} > {upper}")]
    InvertedBounds {
        /// JSON Pointer of the node.
        path: String,
        /// Declared lower bound.
        lower: f64,
        /// Declared upper bound.
        upper: f64,
    },
}

/// Conversion of a validator tree to JSON Schema failed.
///
/// Conversion is all-or-nothing: no partial document is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A node (usually a custom refinement) cannot be expressed in draft-07.
    #[error("unrepresentable construct at '{path}': {reason}")]
    Unrepresentable {
        /// JSON Pointer of the node within the emitted document.
        path: String,
        /// What could not be expressed.
        reason: String,
    },
}

/// A single problem found while parsing a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// JSON Pointer path to the offending value in the input.
    pub path: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl Issue {
    pub(crate) fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.path, self.message)
        }
    }
}

/// A document did not satisfy a validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Returns all issues, in the order they were found.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} issue(s):", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A JSON value was rejected by the type guard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardError {
    /// The value is not a JSON object.
    #[error("expected an object, found {found}")]
    NotAnObject {
        /// JSON type name of the value.
        found: &'static str,
    },

    /// The object has no string `kind` member.
    #[error("missing 'kind' discriminant")]
    MissingDiscriminant,

    /// The `kind` member names no known validator kind.
    #[error("unknown validator kind '{0}'")]
    UnknownKind(String),

    /// The discriminant is valid but the rest of the tree is not.
    #[error("malformed validator tree: {0}")]
    Malformed(String),

    /// The tree deserialized but breaks an authoring rule.
    #[error(transparent)]
    Invalid(#[from] SchemaError),
}
