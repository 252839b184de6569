//! Build context threaded through every build step and into the emitter.

use crate::assembly::AssemblyTable;
use crate::descriptor::{Descriptor, DescriptorKind};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::error_codes::ErrorCodeTable;
use crate::operations::OperationTable;
use crate::schemas::SchemaCatalog;
use crate::services::ServiceTable;

/// All tables of one compiler run.
///
/// Constructed by the caller, populated once from the inputs, then handed to
/// [`crate::emitter::emit`] by shared reference.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub error_codes: ErrorCodeTable,
    pub operations: OperationTable,
    pub services: ServiceTable,
    pub assembly: AssemblyTable,
    pub schemas: SchemaCatalog,
    pub diagnostics: Diagnostics,
}

impl BuildContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a single descriptor into the table matching its kind.
    ///
    /// Service descriptors resolve their members against the operations ingested so far; use
    /// [`Self::build`] to get the required ordering for a whole input set.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is not well-formed XML.
    pub fn ingest(&mut self, source: &Descriptor) -> Result<()> {
        match source.kind() {
            DescriptorKind::Errors => self.error_codes.ingest(source, &mut self.diagnostics),
            DescriptorKind::Operations => {
                self.operations
                    .ingest(source, &mut self.assembly, &mut self.diagnostics)
            }
            DescriptorKind::Services => self.services.ingest(
                source,
                &self.operations,
                &mut self.assembly,
                &mut self.diagnostics,
            ),
        }
    }

    /// Ingest a whole input set: error and operation descriptors first, in the given order, then
    /// service descriptors.
    ///
    /// # Errors
    ///
    /// Stops at the first descriptor that is not well-formed XML.
    pub fn build(&mut self, sources: &[Descriptor]) -> Result<()> {
        for source in sources
            .iter()
            .filter(|s| s.kind() != DescriptorKind::Services)
        {
            self.ingest(source)?;
        }
        for source in sources
            .iter()
            .filter(|s| s.kind() == DescriptorKind::Services)
        {
            self.ingest(source)?;
        }
        Ok(())
    }
}
