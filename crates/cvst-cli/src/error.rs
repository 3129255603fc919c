//! # Command Errors
//!
//! One variant per failure kind of the conversion pipeline. Every variant is
//! terminal for the invocation and renders as a single line; `main` maps it
//! to a distinct exit code with [`CommandError::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

use cvst_schema::ConversionError;

/// Failure of a CLI command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Missing or malformed path argument. Raised before any I/O.
    #[error("{0}")]
    Path(String),

    /// Input unreadable or output unwritable.
    #[error("cannot access {}: {source}", path.display())]
    Access {
        /// File that could not be read or prepared.
        path: PathBuf,
        /// Underlying filesystem failure.
        #[source]
        source: std::io::Error,
    },

    /// The input document could not be parsed.
    #[error("failed to load {}: {reason}", path.display())]
    Load {
        /// Input document.
        path: PathBuf,
        /// Parser message, with line and column when known.
        reason: String,
    },

    /// The loaded value is not a validator tree.
    #[error("input does not export a valid schema")]
    TypeGuard,

    /// The tree has no draft-07 equivalent.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Persisting the output document failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Output document.
        path: PathBuf,
        /// Underlying filesystem or serialization failure.
        #[source]
        source: std::io::Error,
    },

    /// `cvst template` was given a name no template answers to.
    #[error("unknown template '{name}' (available: {available})")]
    UnknownTemplate {
        /// Name as given on the command line.
        name: String,
        /// Comma-separated list of known names.
        available: String,
    },

    /// A built-in template failed its own authoring checks.
    #[error("template '{name}' is invalid: {source}")]
    Template {
        /// Template name.
        name: String,
        /// Authoring rule the template breaks.
        #[source]
        source: cvst_schema::SchemaError,
    },
}

impl CommandError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Path(_) | Self::UnknownTemplate { .. } => 2,
            Self::Access { .. } => 3,
            Self::Load { .. } => 4,
            Self::TypeGuard | Self::Template { .. } => 5,
            Self::Conversion(_) => 6,
            Self::Write { .. } => 7,
        }
    }
}
