//! # cvst-schema: Resume Validators and JSON Schema Conversion
//!
//! A composable validator model for structured documents (resumes in
//! particular) and a deterministic projection of any validator tree onto
//! JSON Schema draft-07.
//!
//! ## Building trees
//!
//! Primitive constructors ([`string`], [`int`], [`email`], [`enumeration`],
//! ...) and combinators ([`object`], [`array`], [`union`], [`literal`]) nest
//! arbitrarily. Builders on [`Validator`] add optionality, defaults and
//! refinements:
//!
//! ```rust
//! use cvst_schema::{int, object, string, to_json_schema, ConvertOptions};
//!
//! let person = object([
//!     ("name", string().nonempty()),
//!     ("age", int().min(0.0).optional()),
//! ])
//! .unwrap();
//!
//! let schema = to_json_schema(&person, &ConvertOptions::default()).unwrap();
//! assert_eq!(schema["required"], serde_json::json!(["name"]));
//! ```
//!
//! ## Modules
//!
//! - [`node`]: the [`Validator`] tree, its kinds and refinements.
//! - [`parse`]: runtime parsing with defaulting and accumulated issues.
//! - [`convert`]: the JSON Schema converter.
//! - [`guard`]: accepting untrusted JSON as a validator tree.
//! - [`semantic`] and [`templates`]: the resume vocabulary.
//!
//! ## Crate Policy
//!
//! - No I/O anywhere in this crate; loading and writing files is the
//!   caller's job.
//! - Conversion never drops a constraint. Anything draft-07 cannot express
//!   is a [`ConversionError`].
//! - No `.unwrap()` outside tests and static pattern initialisation.

pub mod composite;
pub mod convert;
pub mod error;
pub mod guard;
pub mod node;
pub mod parse;
mod pattern;
pub mod primitive;
pub mod semantic;
pub mod templates;

pub use composite::{array, literal, object, union};
pub use convert::{to_json_schema, ConvertOptions, IoMode, DRAFT_07};
pub use error::{ConversionError, GuardError, Issue, SchemaError, ValidationError};
pub use guard::{guard, is_validator};
pub use node::{CustomCheck, Fields, Kind, Optionality, Predicate, Refinement, StringFormat, Validator};
pub use primitive::{boolean, e164, email, enumeration, int, number, string, url};
pub use templates::{template, TEMPLATE_NAMES};
