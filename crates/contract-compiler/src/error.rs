//! Error types for `unrelated-contract-compiler`.

use thiserror::Error;

/// Main error type for contract compilation.
///
/// Every variant is fatal: a run that produces one of these never writes output.
/// Non-fatal findings are collected as [`crate::diagnostics::BuildWarning`]s instead.
#[derive(Error, Debug)]
pub enum ContractError {
    /// Configuration errors (no inputs, conflicting settings).
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: failed to read {kind} descriptor '{path}': {source}")]
    ReadInput {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An XML descriptor could not be parsed.
    #[error("Input error: malformed {kind} descriptor '{path}': {source}")]
    MalformedInput {
        kind: &'static str,
        path: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Schema error: failed to read schema document '{path}': {source}")]
    SchemaReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema error: failed to parse OpenAPI document '{path}': {source}")]
    SchemaParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Output error: failed to write contract to '{path}': {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The warning policy is `fail` and the build produced warnings.
    #[error("Build produced {count} warning(s) and warnings are treated as failures")]
    WarningsDenied { count: usize },

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for contract compilation.
pub type Result<T> = std::result::Result<T, ContractError>;
