//! Non-fatal build findings.
//!
//! Anything the compiler silently omits or defaults in the emitted contract is recorded here so
//! the omission stays visible to the operator.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaRole {
    Input,
    Output,
}

impl fmt::Display for SchemaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaRole::Input => f.write_str("input"),
            SchemaRole::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BuildWarning {
    /// A descriptor element lacked the attribute that identifies it and was skipped.
    MissingAttribute {
        file: String,
        element: String,
        attribute: String,
    },
    /// A service references an operation that no operation descriptor defines.
    UnknownOperation { service: String, operation: String },
    /// An operation references a schema that no schema document defines.
    UnknownSchema {
        operation: String,
        schema: String,
        role: SchemaRole,
    },
    /// An operation declares no input schema; its request body degrades to an open object.
    MissingInput { operation: String },
    /// An error target has no status code definition; `500` was used.
    DefaultedErrorCode { operation: String, error: String },
    /// Two responses of one operation resolved to the same status code.
    StatusCodeCollision {
        operation: String,
        code: String,
        kept: String,
        dropped: String,
    },
    /// Two services emit the same path; the later service's path item was kept.
    DuplicatePath {
        path: String,
        replaced_service: String,
        service: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::MissingAttribute {
                file,
                element,
                attribute,
            } => write!(
                f,
                "{file}: skipped <{element}> without a '{attribute}' attribute"
            ),
            BuildWarning::UnknownOperation { service, operation } => write!(
                f,
                "service '{service}' references unknown operation '{operation}'; omitted"
            ),
            BuildWarning::UnknownSchema {
                operation,
                schema,
                role,
            } => write!(
                f,
                "operation '{operation}' {role} schema '{schema}' is not defined in any schema document"
            ),
            BuildWarning::MissingInput { operation } => write!(
                f,
                "operation '{operation}' declares no input schema; request body uses an open object"
            ),
            BuildWarning::DefaultedErrorCode { operation, error } => write!(
                f,
                "operation '{operation}' error '{error}' has no status code; defaulted to 500"
            ),
            BuildWarning::StatusCodeCollision {
                operation,
                code,
                kept,
                dropped,
            } => write!(
                f,
                "operation '{operation}' status {code}: kept '{kept}', dropped '{dropped}'"
            ),
            BuildWarning::DuplicatePath {
                path,
                replaced_service,
                service,
            } => write!(
                f,
                "path '{path}' from service '{replaced_service}' replaced by service '{service}'"
            ),
        }
    }
}

/// Ordered collection of warnings for one build.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<BuildWarning>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: BuildWarning) {
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}
