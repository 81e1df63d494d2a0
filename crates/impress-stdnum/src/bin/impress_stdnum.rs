//! impress-stdnum command-line tool
//!
//! Validate a standard number of a given family, or scan text for every
//! family the configuration enables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use impress_stdnum::{NumberKind, RecognizedNumber, Registry, StdnumConfig, StdnumError};

/// Recognize, validate and format standard numbers (ISBN, ISSN, IBAN, DOI, …)
#[derive(Parser)]
#[command(name = "impress-stdnum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/impress-stdnum/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate text as one family
    Check {
        /// Family tag (isbn, issn, doi, …)
        family: String,
        /// Text containing the number
        text: String,
        /// Compute the check symbol instead of verifying it
        #[arg(long)]
        create_checksum: bool,
        /// Report ISBNs in their 13-digit form
        #[arg(long)]
        prefer_ean: bool,
    },
    /// Find every configured family in text
    Scan {
        /// Text to scan
        text: String,
    },
    /// List supported family tags
    Families,
}

#[derive(Serialize)]
struct CheckFailure {
    family: NumberKind,
    error: String,
}

fn load_registry(cli: &Cli) -> Result<Registry, StdnumError> {
    let config = match &cli.config {
        Some(path) => StdnumConfig::load(path)?,
        None => StdnumConfig::load_or_default()?,
    };
    Registry::from_config(&config)
}

fn print_number(number: &RecognizedNumber, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(number)?);
        return Ok(());
    }
    println!("{}", number.kind.label());
    println!("  canonical: {}", number.canonical);
    if let Some(formatted) = &number.formatted {
        println!("  formatted: {}", formatted);
    }
    for variant in &number.variants {
        println!("  variant:   {}", variant);
    }
    Ok(())
}

/// `Ok(false)` when nothing valid was found
fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Families => {
            let tags: Vec<&str> = NumberKind::all().iter().map(|k| k.tag()).collect();
            if cli.json {
                println!("{}", serde_json::to_string(&tags)?);
            } else {
                for tag in tags {
                    println!("{}", tag);
                }
            }
            Ok(true)
        }
        Commands::Check {
            family,
            text,
            create_checksum,
            prefer_ean,
        } => {
            let kind: NumberKind = family.parse()?;
            let mut registry = load_registry(cli)?;
            if *create_checksum {
                registry = registry.with_create_checksum(true);
            }
            if *prefer_ean {
                registry = registry.with_prefer_ean(true);
            }
            match registry.check(kind, text) {
                Ok(id) => {
                    if let Some(number) = RecognizedNumber::from_identifier(&id) {
                        print_number(&number, cli.json)?;
                    }
                    Ok(true)
                }
                Err(e) => {
                    tracing::debug!("{} check failed for {:?}: {}", kind, text, e);
                    if cli.json {
                        let failure = CheckFailure {
                            family: kind,
                            error: e.to_string(),
                        };
                        println!("{}", serde_json::to_string_pretty(&failure)?);
                    } else {
                        eprintln!("{}: {}", kind.label(), e);
                    }
                    Ok(false)
                }
            }
        }
        Commands::Scan { text } => {
            let registry = load_registry(cli)?;
            let found = registry.recognize(text);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                for number in &found {
                    print_number(number, false)?;
                }
            }
            Ok(!found.is_empty())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
