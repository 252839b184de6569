//! Service name → ordered operations resolved against the [`OperationTable`].

use crate::assembly::AssemblyTable;
use crate::descriptor::{Descriptor, children_named, non_empty_attr};
use crate::diagnostics::{BuildWarning, Diagnostics};
use crate::error::Result;
use crate::operations::{Operation, OperationTable};
use indexmap::IndexMap;

/// Operations of one service, keyed by operation name in declaration order.
pub type ServiceOperations = IndexMap<String, Operation>;

#[derive(Debug, Clone, Default)]
pub struct ServiceTable {
    services: IndexMap<String, ServiceOperations>,
}

impl ServiceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every named `service` of a service descriptor.
    ///
    /// Must run after every operation descriptor has been ingested: each child `target` is
    /// resolved against `operations` at this point, and names it does not contain are left out of
    /// the service (one [`BuildWarning::UnknownOperation`] each).
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is not well-formed XML.
    pub fn ingest(
        &mut self,
        source: &Descriptor,
        operations: &OperationTable,
        assembly: &mut AssemblyTable,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let doc = source.parse()?;
        let root = doc.root_element();
        let assembly_name = non_empty_attr(root, "assembly");
        let file = source.origin().display().to_string();

        for service in children_named(root, "service") {
            let Some(name) = non_empty_attr(service, "name") else {
                diagnostics.push(BuildWarning::MissingAttribute {
                    file: file.clone(),
                    element: "service".to_string(),
                    attribute: "name".to_string(),
                });
                continue;
            };

            let mut resolved = ServiceOperations::new();
            for child in service.children().filter(roxmltree::Node::is_element) {
                let Some(target) = non_empty_attr(child, "target") else {
                    diagnostics.push(BuildWarning::MissingAttribute {
                        file: file.clone(),
                        element: child.tag_name().name().to_string(),
                        attribute: "target".to_string(),
                    });
                    continue;
                };

                match operations.get(target) {
                    Some(op) => {
                        resolved.insert(target.to_string(), op.clone());
                    }
                    None => diagnostics.push(BuildWarning::UnknownOperation {
                        service: name.to_string(),
                        operation: target.to_string(),
                    }),
                }
            }

            if self.services.insert(name.to_string(), resolved).is_some() {
                tracing::debug!("Service '{}' redefined in {}", name, file);
            }
            if let Some(label) = assembly_name {
                assembly.record(name, label);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ServiceOperations> {
        self.services.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceOperations)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
