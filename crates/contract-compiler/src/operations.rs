//! Operation name → input/output schema references and error targets.

use crate::assembly::AssemblyTable;
use crate::descriptor::{Descriptor, children_named, non_empty_attr};
use crate::diagnostics::{BuildWarning, Diagnostics};
use crate::error::Result;
use indexmap::IndexMap;
use roxmltree::Node;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    /// Request body schema name.
    pub input: Option<String>,
    /// Success response schema name.
    pub output: Option<String>,
    /// Error targets in declaration order.
    pub errors: Vec<String>,
}

impl Operation {
    /// Read the `input`, `output` and `error` children of one `operation` element.
    ///
    /// Children without a `target` are skipped and reported against `file`.
    fn from_element(op: Node<'_, '_>, file: &str, diagnostics: &mut Diagnostics) -> Self {
        let mut operation = Self::default();
        for child in op.children().filter(|n| n.is_element()) {
            let tag = child.tag_name().name();
            if !matches!(tag, "input" | "output" | "error") {
                continue;
            }
            let Some(target) = non_empty_attr(child, "target") else {
                diagnostics.push(BuildWarning::MissingAttribute {
                    file: file.to_string(),
                    element: tag.to_string(),
                    attribute: "target".to_string(),
                });
                continue;
            };
            match tag {
                "input" => operation.input = Some(target.to_string()),
                "output" => operation.output = Some(target.to_string()),
                _ => operation.errors.push(target.to_string()),
            }
        }
        operation
    }
}

#[derive(Debug, Clone, Default)]
pub struct OperationTable {
    operations: IndexMap<String, Operation>,
}

impl OperationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every named `operation` of an operation descriptor.
    ///
    /// A name defined again replaces the earlier entry as a whole. The document `assembly` label,
    /// when present, is recorded against each operation name.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is not well-formed XML.
    pub fn ingest(
        &mut self,
        source: &Descriptor,
        assembly: &mut AssemblyTable,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let doc = source.parse()?;
        let root = doc.root_element();
        let assembly_name = non_empty_attr(root, "assembly");

        let file = source.origin().display().to_string();

        for op in children_named(root, "operation") {
            let Some(name) = non_empty_attr(op, "name") else {
                diagnostics.push(BuildWarning::MissingAttribute {
                    file: file.clone(),
                    element: "operation".to_string(),
                    attribute: "name".to_string(),
                });
                continue;
            };

            let operation = Operation::from_element(op, &file, diagnostics);
            if self.operations.insert(name.to_string(), operation).is_some() {
                tracing::debug!(
                    "Operation '{}' redefined in {}",
                    name,
                    source.origin().display()
                );
            }
            if let Some(label) = assembly_name {
                assembly.record(name, label);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
