use std::collections::HashMap;

/// Qualifier used when neither the service nor the operation carries an assembly label.
pub const DEFAULT_QUALIFIER: &str = "default";

/// Entity name (operation or service) → assembly qualifier.
///
/// Operation and service descriptors write into the same table; the last write for a name wins.
#[derive(Debug, Clone, Default)]
pub struct AssemblyTable {
    qualifiers: HashMap<String, String>,
}

impl AssemblyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entity: &str, qualifier: &str) {
        self.qualifiers
            .insert(entity.to_string(), qualifier.to_string());
    }

    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&str> {
        self.qualifiers.get(entity).map(String::as_str)
    }

    /// Qualifier for an operation emitted under a service: service label, then operation label,
    /// then [`DEFAULT_QUALIFIER`].
    #[must_use]
    pub fn qualifier_for(&self, service: &str, operation: &str) -> &str {
        self.get(service)
            .or_else(|| self.get(operation))
            .unwrap_or(DEFAULT_QUALIFIER)
    }
}
