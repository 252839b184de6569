//! Schema catalog built from externally maintained `OpenAPI` documents.
//!
//! The compiler never generates schemas; it only references them by name. When the caller hands
//! in the documents that define those names, references can be checked and, for the `openapi`
//! layout, the definitions embedded.

use crate::error::{ContractError, Result};
use openapiv3::{Components, OpenAPI};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    components: Option<Components>,
    sources: usize,
}

impl SchemaCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an `OpenAPI` document (YAML or JSON) and merge its components into the catalog.
    ///
    /// Schemas with a name already present are replaced by the later document's definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid `OpenAPI` document.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ContractError::SchemaReadFile {
                path: path.display().to_string(),
                source,
            })?;
        self.add_document(path, &content)
    }

    /// Merge an already-read `OpenAPI` document; `origin` is used for error context only.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a valid `OpenAPI` document.
    pub fn add_document(&mut self, origin: &Path, content: &str) -> Result<()> {
        // JSON is a valid subset of YAML, so serde_yaml alone is enough.
        let spec: OpenAPI =
            serde_yaml::from_str(content).map_err(|source| ContractError::SchemaParse {
                path: origin.display().to_string(),
                source,
            })?;
        self.sources += 1;

        let Some(incoming) = spec.components else {
            tracing::info!("Schema document {} has no components", origin.display());
            return Ok(());
        };
        tracing::info!(
            "Loaded {} schema(s) from {}",
            incoming.schemas.len(),
            origin.display()
        );

        match &mut self.components {
            None => self.components = Some(incoming),
            Some(existing) => {
                existing.schemas.extend(incoming.schemas);
                existing.responses.extend(incoming.responses);
                existing.parameters.extend(incoming.parameters);
                existing.examples.extend(incoming.examples);
                existing.request_bodies.extend(incoming.request_bodies);
                existing.headers.extend(incoming.headers);
                existing.security_schemes.extend(incoming.security_schemes);
            }
        }
        Ok(())
    }

    /// Whether any schema document was supplied. Without one, references cannot be checked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sources > 0
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components
            .as_ref()
            .is_some_and(|c| c.schemas.contains_key(name))
    }

    #[must_use]
    pub fn components(&self) -> Option<&Components> {
        self.components.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unrelated_test_support::FixtureDir;

    const PETS: &str = r"
openapi: 3.0.3
info:
  title: pets
  version: '1'
paths: {}
components:
  schemas:
    Pet:
      type: object
    PetList:
      type: array
      items:
        $ref: '#/components/schemas/Pet'
";

    #[test]
    fn test_inactive_until_a_document_is_loaded() {
        let catalog = SchemaCatalog::new();
        assert!(!catalog.is_active());
        assert!(!catalog.contains("Pet"));
    }

    #[test]
    fn test_load_yaml_and_json_documents() {
        let dir = FixtureDir::new().unwrap();
        let yaml = dir.write("pets.yaml", PETS).unwrap();
        let json = dir
            .write(
                "orders.json",
                r#"{"openapi":"3.0.3","info":{"title":"orders","version":"1"},"paths":{},
                    "components":{"schemas":{"Order":{"type":"object"},"Pet":{"type":"string"}}}}"#,
            )
            .unwrap();

        let mut catalog = SchemaCatalog::new();
        catalog.load(&yaml).unwrap();
        catalog.load(&json).unwrap();

        assert!(catalog.is_active());
        assert!(catalog.contains("Pet"));
        assert!(catalog.contains("PetList"));
        assert!(catalog.contains("Order"));
        assert!(!catalog.contains("Missing"));
        // A redefined schema replaces the earlier one instead of adding a second entry.
        assert_eq!(catalog.components().map(|c| c.schemas.len()), Some(3));
    }

    #[test]
    fn test_document_without_components_still_activates() {
        let mut catalog = SchemaCatalog::new();
        catalog
            .add_document(
                Path::new("bare.yaml"),
                "openapi: 3.0.3\ninfo: {title: t, version: '1'}\npaths: {}\n",
            )
            .unwrap();
        assert!(catalog.is_active());
        assert!(!catalog.contains("Pet"));
    }

    #[test]
    fn test_invalid_document_is_parse_error() {
        let mut catalog = SchemaCatalog::new();
        let err = catalog
            .add_document(Path::new("broken.yaml"), "paths: [")
            .unwrap_err();
        assert!(matches!(err, ContractError::SchemaParse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }
}
