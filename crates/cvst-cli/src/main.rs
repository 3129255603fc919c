//! # cvst CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cvst_cli::template::{run_template, TemplateArgs};
use cvst_cli::zod2schema::{run_zod2schema, Zod2SchemaArgs};

/// cvst: resume schema toolchain.
///
/// Converts validator definitions into JSON Schema draft-07 documents and
/// exports the schemas of the built-in resume templates.
#[derive(Parser, Debug)]
#[command(name = "cvst", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a JSON schema from a validator definition.
    Zod2schema(Zod2SchemaArgs),

    /// Generate the JSON schema of a built-in resume template.
    Template(TemplateArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cvst CLI starting");

    let result = match &cli.command {
        Commands::Zod2schema(args) => run_zod2schema(args).await,
        Commands::Template(args) => run_template(args).await,
    };

    match result {
        Ok(path) => {
            println!("Successfully generated JSON schema at: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
