use anyhow::Context as _;
use std::path::Path;
use unrelated_contract_compiler::CompileConfig;
use unrelated_contract_compiler::config::{DocumentLayout, DuplicateStatusPolicy, WarningPolicy};

use crate::Cli;

/// Load a build config file. `.json` files are read as JSON, anything else as YAML.
pub fn load_config(path: &Path) -> anyhow::Result<CompileConfig> {
    let bytes = std::fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let cfg: CompileConfig = if is_json {
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?
    } else {
        serde_yaml::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?
    };
    Ok(cfg)
}

/// Combine the optional config file with command-line flags.
///
/// Input lists from the command line are appended after the file's lists; scalar flags override.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<CompileConfig> {
    let mut cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => CompileConfig::default(),
    };

    cfg.errors.extend(cli.errors.iter().cloned());
    cfg.operations.extend(cli.operations.iter().cloned());
    cfg.services.extend(cli.services.iter().cloned());
    cfg.schemas.extend(cli.schemas.iter().cloned());

    if let Some(output) = &cli.output {
        cfg.output.clone_from(output);
    }
    if let Some(policy) = cli.warnings {
        cfg.warnings = policy.into();
    }
    if cli.deny_warnings {
        cfg.warnings = WarningPolicy::Fail;
    }
    if let Some(policy) = cli.duplicate_status {
        cfg.duplicate_status = policy.into();
    }
    if let Some(layout) = cli.layout {
        cfg.layout = layout.into();
    }
    if let Some(title) = &cli.title {
        cfg.info.title.clone_from(title);
    }
    if let Some(version) = &cli.api_version {
        cfg.info.version.clone_from(version);
    }

    Ok(cfg)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WarningsArg {
    Warn,
    Fail,
    Ignore,
}

impl From<WarningsArg> for WarningPolicy {
    fn from(v: WarningsArg) -> Self {
        match v {
            WarningsArg::Warn => WarningPolicy::Warn,
            WarningsArg::Fail => WarningPolicy::Fail,
            WarningsArg::Ignore => WarningPolicy::Ignore,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DuplicateStatusArg {
    KeepFirst,
    KeepLast,
}

impl From<DuplicateStatusArg> for DuplicateStatusPolicy {
    fn from(v: DuplicateStatusArg) -> Self {
        match v {
            DuplicateStatusArg::KeepFirst => DuplicateStatusPolicy::KeepFirst,
            DuplicateStatusArg::KeepLast => DuplicateStatusPolicy::KeepLast,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutArg {
    Paths,
    Openapi,
}

impl From<LayoutArg> for DocumentLayout {
    fn from(v: LayoutArg) -> Self {
        match v {
            LayoutArg::Paths => DocumentLayout::Paths,
            LayoutArg::Openapi => DocumentLayout::OpenApi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;
    use std::path::PathBuf;
    use unrelated_test_support::FixtureDir;

    #[test]
    fn test_flags_only() {
        let cli = Cli::parse_from([
            "unrelated-contract-compiler",
            "--errors",
            "e.xml",
            "--operations",
            "o1.xml",
            "--operations",
            "o2.xml",
            "--services",
            "s.xml",
            "--deny-warnings",
            "--layout",
            "openapi",
        ]);
        let cfg = resolve_config(&cli).unwrap();
        assert_eq!(cfg.errors, vec![PathBuf::from("e.xml")]);
        assert_eq!(
            cfg.operations,
            vec![PathBuf::from("o1.xml"), PathBuf::from("o2.xml")]
        );
        assert_eq!(cfg.services, vec![PathBuf::from("s.xml")]);
        assert_eq!(cfg.output, PathBuf::from("coral-operations.json"));
        assert_eq!(cfg.warnings, WarningPolicy::Fail);
        assert_eq!(cfg.layout, DocumentLayout::OpenApi);
    }

    #[test]
    fn test_flags_extend_and_override_config_file() {
        let dir = FixtureDir::new().unwrap();
        let path = dir
            .write(
                "build.yaml",
                "operations: [base-ops.xml]\nservices: [base-services.xml]\noutput: file.json\nwarnings: ignore\n",
            )
            .unwrap();

        let cli = Cli::parse_from([
            "unrelated-contract-compiler",
            "--config",
            path.to_str().unwrap(),
            "--operations",
            "extra-ops.xml",
            "--output",
            "flag.json",
            "--duplicate-status",
            "keep-last",
            "--title",
            "Billing",
        ]);
        let cfg = resolve_config(&cli).unwrap();
        assert_eq!(
            cfg.operations,
            vec![PathBuf::from("base-ops.xml"), PathBuf::from("extra-ops.xml")]
        );
        assert_eq!(cfg.output, PathBuf::from("flag.json"));
        assert_eq!(cfg.warnings, WarningPolicy::Ignore);
        assert_eq!(cfg.duplicate_status, DuplicateStatusPolicy::KeepLast);
        assert_eq!(cfg.info.title, "Billing");
    }

    #[test]
    fn test_json_config_file() {
        let dir = FixtureDir::new().unwrap();
        let path = dir
            .write(
                "build.json",
                r#"{"services": ["s.xml"], "duplicateStatus": "keep-last"}"#,
            )
            .unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.services, vec![PathBuf::from("s.xml")]);
        assert_eq!(cfg.duplicate_status, DuplicateStatusPolicy::KeepLast);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let err = load_config(Path::new("/nonexistent/build.yaml")).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }
}
