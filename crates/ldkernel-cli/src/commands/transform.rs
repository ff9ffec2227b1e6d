//! Transform command implementation.

use clap::ValueEnum;
use ldkernel_core::{KernelVersion, Pipeline, PipelineConfig};
use ldkernel_events::event_pipeline;
use tracing::{debug, info};

use crate::errors::CliError;
use crate::input::read_json;
use crate::output::print_document;

/// Named rule sets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleSet {
    /// Validate and stamp provenance; leave the document unchanged.
    Identity,
    /// schema.org Event normalization rules.
    EventNormalization,
}

pub struct TransformArgs {
    pub input: Option<String>,
    pub rules: RuleSet,
    pub config: Option<String>,
    pub kernel_version: Option<String>,
    pub compact: bool,
    pub strict: bool,
    pub max_size: Option<u64>,
}

pub fn run(args: TransformArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref(), args.kernel_version)?;
    let pipeline = build_pipeline(args.rules, config)?;
    debug!(rules = ?pipeline.rule_names().collect::<Vec<_>>(), "pipeline ready");

    let value = read_json(args.input.as_deref(), args.max_size)?;
    let result = pipeline.transform(&value);

    match &result {
        Ok(output) => info!(
            rules_applied = output.provenance().rules_applied().len(),
            "transform succeeded"
        ),
        Err(err) => info!(code = %err.code(), "transform rejected input"),
    }

    let output = match result {
        Ok(output) => output.into_value(),
        Err(err) => {
            if args.strict {
                print_document(&err.to_value(), args.compact)?;
                return Err(CliError::Rejected(err.code().clone()));
            }
            err.to_value()
        }
    };

    print_document(&output, args.compact)?;
    Ok(())
}

fn load_config(
    path: Option<&str>,
    kernel_version: Option<String>,
) -> Result<PipelineConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| {
                match source.kind() {
                    std::io::ErrorKind::NotFound => CliError::NotFound(path.to_string()),
                    _ => CliError::Read {
                        path: path.to_string(),
                        source,
                    },
                }
            })?;
            PipelineConfig::from_json_str(&text)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(version) = kernel_version {
        config = config.with_kernel_version(KernelVersion::parse(version)?);
    }
    Ok(config)
}

fn build_pipeline(rules: RuleSet, config: PipelineConfig) -> Result<Pipeline, CliError> {
    Ok(match rules {
        RuleSet::Identity => Pipeline::identity(config),
        RuleSet::EventNormalization => event_pipeline(config)?,
    })
}
