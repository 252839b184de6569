use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default output location, as read by the mock server.
pub const DEFAULT_OUTPUT: &str = "coral-operations.json";

/// Configuration for one compiler run.
///
/// Input kinds are always explicit: a file is an error, operation or service descriptor because
/// it was listed under that key, never because of its name or content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileConfig {
    /// Error-definition descriptors (`httperror` → `httpresponsecode`).
    #[serde(default)]
    pub errors: Vec<PathBuf>,

    /// Operation-definition descriptors.
    #[serde(default)]
    pub operations: Vec<PathBuf>,

    /// Service-membership descriptors.
    #[serde(default)]
    pub services: Vec<PathBuf>,

    /// Optional `OpenAPI` documents whose `components.schemas` are used to check schema references.
    #[serde(default)]
    pub schemas: Vec<PathBuf>,

    /// Where the contract document is written.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// What to do with build warnings.
    #[serde(default)]
    pub warnings: WarningPolicy,

    /// Which response to keep when two error targets map to the same status code.
    #[serde(default)]
    pub duplicate_status: DuplicateStatusPolicy,

    /// Shape of the emitted document.
    #[serde(default)]
    pub layout: DocumentLayout,

    /// `info` block used by [`DocumentLayout::OpenApi`].
    #[serde(default)]
    pub info: InfoConfig,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            operations: Vec::new(),
            services: Vec::new(),
            schemas: Vec::new(),
            output: default_output(),
            warnings: WarningPolicy::default(),
            duplicate_status: DuplicateStatusPolicy::default(),
            layout: DocumentLayout::default(),
            info: InfoConfig::default(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// Build warning policy: warn, fail, or ignore.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WarningPolicy {
    /// Log each warning and still write the contract.
    #[default]
    Warn,
    /// Abort without writing output if any warning was produced.
    Fail,
    /// Collect warnings in the report but do not log them.
    Ignore,
}

/// Resolution for two error targets of one operation that share a status code.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateStatusPolicy {
    /// The first response written under a code is kept.
    #[default]
    KeepFirst,
    /// Each later error target replaces the response under its code.
    KeepLast,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLayout {
    /// Bare mapping from path to path item.
    #[default]
    Paths,
    /// Full `OpenAPI` 3 envelope with `openapi`, `info`, `paths` and optional `components`.
    OpenApi,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
        }
    }
}

fn default_title() -> String {
    "Service contract".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}
