//! Error target → HTTP status code table.

use crate::descriptor::{Descriptor, children_named, non_empty_attr};
use crate::diagnostics::{BuildWarning, Diagnostics};
use crate::error::Result;
use indexmap::IndexMap;

/// Status code used for undefined codes and undefined error targets.
pub const DEFAULT_STATUS: &str = "500";

#[derive(Debug, Clone, Default)]
pub struct ErrorCodeTable {
    codes: IndexMap<String, String>,
}

impl ErrorCodeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every `httperror` of an error descriptor.
    ///
    /// A target defined again (in this or an earlier descriptor) takes the new code.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is not well-formed XML.
    pub fn ingest(&mut self, source: &Descriptor, diagnostics: &mut Diagnostics) -> Result<()> {
        let doc = source.parse()?;
        for err in children_named(doc.root_element(), "httperror") {
            let Some(target) = non_empty_attr(err, "target") else {
                diagnostics.push(BuildWarning::MissingAttribute {
                    file: source.origin().display().to_string(),
                    element: "httperror".to_string(),
                    attribute: "target".to_string(),
                });
                continue;
            };

            let code = children_named(err, "httpresponsecode")
                .last()
                .and_then(|c| non_empty_attr(c, "value"))
                .unwrap_or(DEFAULT_STATUS);

            if let Some(previous) = self.codes.insert(target.to_string(), code.to_string()) {
                tracing::debug!("Error target '{}' redefined: {} -> {}", target, previous, code);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, target: &str) -> Option<&str> {
        self.codes.get(target).map(String::as_str)
    }

    /// Status code for an error target, or [`DEFAULT_STATUS`] if the target is undefined.
    #[must_use]
    pub fn resolve(&self, target: &str) -> &str {
        self.get(target).unwrap_or(DEFAULT_STATUS)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
