use anyhow::Context as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Error descriptor: `ErrorA` → 404.
pub const SCENARIO_ERRORS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<httperrors>
  <httperror target="ErrorA">
    <httpresponsecode value="404"/>
  </httperror>
</httperrors>
"#;

/// Operation descriptor: `OpX` reads `SchemaIn`, returns `SchemaOut`, may fail with `ErrorA`.
pub const SCENARIO_OPERATIONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<operations>
  <operation name="OpX">
    <input target="SchemaIn"/>
    <output target="SchemaOut"/>
    <error target="ErrorA"/>
  </operation>
</operations>
"#;

/// Service descriptor: `Svc1` (assembly `com.example`) exposes `OpX`.
pub const SCENARIO_SERVICES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<services assembly="com.example">
  <service name="Svc1">
    <operation target="OpX"/>
  </service>
</services>
"#;

/// Temporary directory for descriptor fixtures, removed on drop.
pub struct FixtureDir(TempDir);

impl FixtureDir {
    /// Create an empty fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self(tempfile::tempdir().context("create fixture dir")?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Write `contents` to `name` inside the fixture directory and return the full path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.0.path().join(name);
        std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
