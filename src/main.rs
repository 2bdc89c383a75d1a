//! apigw-model command-line tool.
//!
//! Converts gateway API definitions between the stored (wire) JSON form and
//! the editor form, and validates stored catalogs.
//!
//! ```text
//!  wire JSON ──receive──▶ editor JSON      durations "3s" → 3
//!  editor JSON ──send──▶ wire JSON         durations 90 → "90s"
//!  wire catalog ──validate──▶ issues
//! ```

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use apigw_model::catalog::{validate_definition, Catalog, ValidationIssue};
use apigw_model::config::{load_or_default, ToolConfig};
use apigw_model::observability::init_logging;
use apigw_model::serializer::{self, Direction};

#[derive(Parser)]
#[command(name = "apigw-model")]
#[command(about = "Convert and validate API gateway definitions", long_about = None)]
struct Cli {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert stored wire JSON into editor JSON
    Receive {
        file: PathBuf,
        /// Input is a single definition instead of a group
        #[arg(long)]
        definition: bool,
    },
    /// Convert editor JSON into wire JSON
    Send {
        file: PathBuf,
        /// Input is a single definition instead of a group
        #[arg(long)]
        definition: bool,
    },
    /// Validate a stored JSON array of groups
    Validate { file: PathBuf },
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability)?;

    tracing::debug!(config = ?cli.config, "apigw-model starting");

    match cli.command {
        Commands::Receive { file, definition } => {
            let raw = read_json(&file)?;
            let adjusted = if definition {
                serializer::deserialize_definition_from_json(&raw, Direction::Received)?.to_json()?
            } else {
                serializer::deserialize_group_from_json(&raw, Direction::Received)?.to_json()?
            };
            print_json(&adjusted, &config)?;
        }
        Commands::Send { file, definition } => {
            let raw = read_json(&file)?;
            if definition {
                let def = serializer::prepare_definition(&raw)?;
                if config.validation.on_send {
                    if let Err(issues) = validate_definition(&def) {
                        report(&issues);
                        return Ok(ExitCode::FAILURE);
                    }
                }
                print_json(&def, &config)?;
            } else {
                let group = serializer::prepare_group(&raw)?;
                if config.validation.on_send {
                    let mut failed = false;
                    for def in &group.definitions {
                        if let Err(issues) = validate_definition(def) {
                            tracing::error!(definition = %def.name, "definition failed validation");
                            report(&issues);
                            failed = true;
                        }
                    }
                    if failed {
                        return Ok(ExitCode::FAILURE);
                    }
                }
                print_json(&group, &config)?;
            }
        }
        Commands::Validate { file } => {
            let raw = read_json(&file)?;
            let catalog = Catalog::load(&raw)?;
            match catalog.validate() {
                Ok(()) => {
                    tracing::info!(
                        groups = catalog.groups().len(),
                        definitions = catalog.definitions().count(),
                        "catalog is valid"
                    );
                }
                Err(issues) => {
                    report(&issues);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_json(path: &Path) -> Result<Value, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T, config: &ToolConfig) -> Result<(), Box<dyn Error>> {
    let out = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn report(issues: &[ValidationIssue]) {
    for issue in issues {
        eprintln!("error: {}", issue);
    }
}
