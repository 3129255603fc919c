//! # cvst-cli: Resume Schema Command-Line Interface
//!
//! Library half of the `cvst` binary. Argument structs live next to their
//! handlers so the binary only assembles subcommands and maps errors to
//! exit codes.
//!
//! ## Subcommands
//!
//! - `zod2schema`: convert a schema-definition document to JSON Schema.
//! - `template`: write the JSON Schema of a built-in resume template.
//!
//! ## Crate Policy
//!
//! - Path arguments are checked before any filesystem access.
//! - Filesystem steps use `tokio::fs` and are awaited sequentially.
//! - Every failure is a [`CommandError`](error::CommandError) rendered on
//!   a single line.

pub mod error;
pub mod loader;
pub mod output;
pub mod paths;
pub mod template;
pub mod zod2schema;
