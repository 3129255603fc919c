//! # zod2schema Subcommand
//!
//! Converts a schema-definition document into a JSON Schema draft-07 file.
//!
//! ## Pipeline
//!
//! `ValidatingPaths → LoadingModule → GuardingType → Converting →
//! WritingOutput → Done`. Any step may fail, which ends the run at
//! `Failed`. Steps are awaited one after another.
//!
//! The output file is only touched in `WritingOutput`, so a run that fails
//! earlier (bad paths, unloadable input, unrepresentable tree) leaves the
//! filesystem exactly as it found it.

use std::fmt;
use std::path::PathBuf;

use clap::Args;

use cvst_schema::{guard, to_json_schema, ConvertOptions};

use crate::error::CommandError;
use crate::loader::{FileLoader, SchemaLoader};
use crate::output::{prepare_output, write_document};
use crate::paths::{validate_input, validate_output};

/// Arguments for the `cvst zod2schema` subcommand.
#[derive(Args, Debug)]
pub struct Zod2SchemaArgs {
    /// Path to the input schema definition (.json, .yaml or .yml).
    #[arg(short, long, value_name = "PATH")]
    pub input: String,

    /// Path to the output schema file (.json).
    #[arg(short, long, value_name = "PATH")]
    pub output: String,
}

/// Step of a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Checking the `--input` and `--output` arguments. No I/O yet.
    ValidatingPaths,
    /// Reading the definition and resolving its export.
    LoadingModule,
    /// Accepting the export as a validator tree.
    GuardingType,
    /// Projecting the tree onto draft-07.
    Converting,
    /// Preparing the output file and writing the document.
    WritingOutput,
    /// The schema has been written.
    Done,
    /// A step failed; nothing after it ran.
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ValidatingPaths => "validating-paths",
            Self::LoadingModule => "loading-module",
            Self::GuardingType => "guarding-type",
            Self::Converting => "converting",
            Self::WritingOutput => "writing-output",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One conversion run.
#[derive(Debug)]
pub struct Pipeline<L> {
    loader: L,
    options: ConvertOptions,
    state: PipelineState,
}

impl<L: SchemaLoader> Pipeline<L> {
    /// A pipeline reading definitions through `loader`, converting in
    /// output mode.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            options: ConvertOptions::default(),
            state: PipelineState::ValidatingPaths,
        }
    }

    /// State reached by the last [`run`](Self::run).
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Execute every step, returning the output path on success.
    pub async fn run(&mut self, input: &str, output: &str) -> Result<PathBuf, CommandError> {
        self.state = PipelineState::ValidatingPaths;
        let result = self.steps(input, output).await;
        match &result {
            Ok(path) => {
                self.transition(PipelineState::Done);
                tracing::info!(output = %path.display(), "schema written");
            }
            Err(e) => {
                tracing::debug!(failed_in = %self.state, error = %e, "conversion aborted");
                self.transition(PipelineState::Failed);
            }
        }
        result
    }

    async fn steps(&mut self, input: &str, output: &str) -> Result<PathBuf, CommandError> {
        let input = validate_input(input)?;
        let output = validate_output(output)?;

        self.transition(PipelineState::LoadingModule);
        let exported = self.loader.load(&input).await?;

        self.transition(PipelineState::GuardingType);
        let tree = guard(&exported).map_err(|e| {
            tracing::debug!(reason = %e, "type guard rejected input");
            CommandError::TypeGuard
        })?;

        self.transition(PipelineState::Converting);
        let schema = to_json_schema(&tree, &self.options)?;

        self.transition(PipelineState::WritingOutput);
        prepare_output(&output).await?;
        write_document(&output, &schema).await?;
        Ok(output)
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::trace!(from = %self.state, to = %next, "pipeline transition");
        self.state = next;
    }
}

/// Execute the zod2schema subcommand with the filesystem loader.
pub async fn run_zod2schema(args: &Zod2SchemaArgs) -> Result<PathBuf, CommandError> {
    Pipeline::new(FileLoader).run(&args.input, &args.output).await
}
