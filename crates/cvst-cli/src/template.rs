//! # template Subcommand
//!
//! Writes the JSON Schema of a built-in resume template. Shares the
//! `Converting` and `WritingOutput` steps with `zod2schema`; there is no
//! input document to load or guard.

use std::path::PathBuf;

use clap::Args;

use cvst_schema::{template, to_json_schema, ConvertOptions, TEMPLATE_NAMES};

use crate::error::CommandError;
use crate::output::{prepare_output, write_document};
use crate::paths::validate_output;

/// Arguments for the `cvst template` subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template name, e.g. `standard-resume`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Path to the output schema file (.json).
    #[arg(short, long, value_name = "PATH")]
    pub output: String,
}

/// Execute the template subcommand.
pub async fn run_template(args: &TemplateArgs) -> Result<PathBuf, CommandError> {
    let output = validate_output(&args.output)?;

    let tree = template(&args.name)
        .ok_or_else(|| CommandError::UnknownTemplate {
            name: args.name.clone(),
            available: TEMPLATE_NAMES.join(", "),
        })?
        .map_err(|source| CommandError::Template {
            name: args.name.clone(),
            source,
        })?;
    tracing::debug!(template = %args.name, "resolved built-in template");

    let schema = to_json_schema(&tree, &ConvertOptions::default())?;
    prepare_output(&output).await?;
    write_document(&output, &schema).await?;
    tracing::info!(template = %args.name, output = %output.display(), "schema written");
    Ok(output)
}
