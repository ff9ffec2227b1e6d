//! ldkernel CLI - file/stdin adapter around the deterministic transform kernel.
//!
//! All I/O lives here. The kernel crates only ever see parsed JSON values.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod errors;
mod input;
mod output;

use commands::{canonicalize, digest, transform};

#[derive(Parser)]
#[command(name = "ldkernel")]
#[command(about = "Deterministic JSON-LD transform and canonicalization CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a JSON-LD document and print the canonical result
    Transform {
        /// Input JSON-LD file (or stdin if not provided)
        input: Option<String>,
        /// Rule set to apply
        #[arg(long, value_enum, default_value_t = transform::RuleSet::Identity)]
        rules: transform::RuleSet,
        /// JSON pipeline configuration file
        #[arg(long)]
        config: Option<String>,
        /// Override the kernel version stamped into provenance
        #[arg(long)]
        kernel_version: Option<String>,
        /// Print compact output instead of two-space indentation
        #[arg(long)]
        compact: bool,
        /// Exit with error code if the result is an error document
        #[arg(long)]
        strict: bool,
        /// Reject inputs larger than SIZE bytes (default: unlimited)
        #[arg(long)]
        max_size: Option<u64>,
    },
    /// Print the canonical form of input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Indent output with two spaces
        #[arg(long)]
        pretty: bool,
        /// Reject inputs larger than SIZE bytes (default: unlimited)
        #[arg(long)]
        max_size: Option<u64>,
    },
    /// Print the sha-256 digest of the canonical form of input JSON
    Digest {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Reject inputs larger than SIZE bytes (default: unlimited)
        #[arg(long)]
        max_size: Option<u64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transform {
            input,
            rules,
            config,
            kernel_version,
            compact,
            strict,
            max_size,
        } => transform::run(transform::TransformArgs {
            input,
            rules,
            config,
            kernel_version,
            compact,
            strict,
            max_size,
        }),
        Commands::Canonicalize {
            input,
            pretty,
            max_size,
        } => canonicalize::run(input, pretty, max_size),
        Commands::Digest {
            input,
            json,
            max_size,
        } => digest::run(input, json, max_size),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
