//! One-shot compile pipeline: read inputs, build tables, emit, write.

use crate::config::{CompileConfig, WarningPolicy};
use crate::context::BuildContext;
use crate::descriptor::{Descriptor, DescriptorKind};
use crate::diagnostics::BuildWarning;
use crate::emitter::{EmitOptions, emit};
use crate::error::{ContractError, Result};
use crate::output;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// A fully built contract that has not been written anywhere yet.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub context: BuildContext,
    pub document: Value,
    pub paths: usize,
    /// Build warnings followed by emission warnings.
    pub warnings: Vec<BuildWarning>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub output: PathBuf,
    pub digest: String,
    pub error_codes: usize,
    pub operations: usize,
    pub services: usize,
    pub paths: usize,
    pub warnings: Vec<BuildWarning>,
}

/// Build the contract in memory without touching the output path.
///
/// # Errors
///
/// Returns an error if no service descriptor is configured, or if an input cannot be read or
/// parsed.
pub fn build(config: &CompileConfig) -> Result<Compiled> {
    if config.services.is_empty() {
        return Err(ContractError::Config(
            "at least one service descriptor is required".to_string(),
        ));
    }

    let sources = load_sources(config)?;

    let mut context = BuildContext::new();
    for path in &config.schemas {
        context.schemas.load(path)?;
    }
    context.build(&sources)?;

    let options = EmitOptions {
        duplicate_status: config.duplicate_status,
        layout: config.layout,
        info: config.info.clone(),
    };
    let emission = emit(&context, &options)?;

    let mut warnings = context.diagnostics.warnings().to_vec();
    warnings.extend(emission.warnings);

    Ok(Compiled {
        context,
        document: emission.document,
        paths: emission.paths,
        warnings,
    })
}

/// Compile the configured descriptors into the contract file.
///
/// Nothing is written unless every input parsed and, under [`WarningPolicy::Fail`], the build
/// produced no warnings.
///
/// # Errors
///
/// Returns an error on unreadable or malformed inputs, denied warnings, or a failed write.
pub fn compile(config: &CompileConfig) -> Result<BuildReport> {
    let compiled = build(config)?;

    match config.warnings {
        WarningPolicy::Warn => {
            for w in &compiled.warnings {
                tracing::warn!("{}", w);
            }
        }
        WarningPolicy::Fail if !compiled.warnings.is_empty() => {
            for w in &compiled.warnings {
                tracing::error!("{}", w);
            }
            return Err(ContractError::WarningsDenied {
                count: compiled.warnings.len(),
            });
        }
        WarningPolicy::Fail | WarningPolicy::Ignore => {}
    }

    let bytes = output::render(&compiled.document)?;
    output::write_atomic(&config.output, &bytes)?;
    let digest = output::digest(&bytes);
    tracing::info!(
        "Wrote {} path(s) to {} ({})",
        compiled.paths,
        config.output.display(),
        digest
    );

    Ok(BuildReport {
        output: config.output.clone(),
        digest,
        error_codes: compiled.context.error_codes.len(),
        operations: compiled.context.operations.len(),
        services: compiled.context.services.len(),
        paths: compiled.paths,
        warnings: compiled.warnings,
    })
}

fn load_sources(config: &CompileConfig) -> Result<Vec<Descriptor>> {
    let inputs = [
        (DescriptorKind::Errors, &config.errors),
        (DescriptorKind::Operations, &config.operations),
        (DescriptorKind::Services, &config.services),
    ];

    let mut sources = Vec::new();
    for (kind, paths) in inputs {
        for path in paths {
            sources.push(Descriptor::load(kind, path)?);
        }
    }
    Ok(sources)
}
