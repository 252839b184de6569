mod common;

use anyhow::Context as _;
use serde_json::{Value, json};

use common::{FixtureDir, SCENARIO_ERRORS, SCENARIO_OPERATIONS, SCENARIO_SERVICES, run_compiler};

fn scenario(dir: &FixtureDir) -> anyhow::Result<Vec<String>> {
    let errors = dir.write("exceptions.xml", SCENARIO_ERRORS)?;
    let operations = dir.write("operations.xml", SCENARIO_OPERATIONS)?;
    let services = dir.write("services.xml", SCENARIO_SERVICES)?;
    Ok(vec![
        "--errors".to_string(),
        errors.display().to_string(),
        "--operations".to_string(),
        operations.display().to_string(),
        "--services".to_string(),
        services.display().to_string(),
    ])
}

fn read_json(path: &std::path::Path) -> anyhow::Result<Value> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).context("parse contract json")
}

#[test]
fn compiles_scenario_to_contract_file() -> anyhow::Result<()> {
    let dir = FixtureDir::new()?;
    let out = dir.path().join("coral-operations.json");

    let mut args = scenario(&dir)?;
    args.extend(["--output".to_string(), out.display().to_string()]);
    let result = run_compiler(&args)?;

    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("1 path(s)"), "stdout: {stdout}");

    let doc = read_json(&out)?;
    let post = &doc["/OpX"]["post"];
    assert_eq!(post["operationId"], json!("OpX"));
    assert_eq!(
        post["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        json!("#/components/schemas/SchemaIn")
    );
    assert_eq!(
        post["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
        json!("#/components/schemas/SchemaOut")
    );
    assert_eq!(
        post["responses"]["404"]["description"],
        json!("404 response")
    );
    assert_eq!(
        post["parameters"][1]["schema"]["pattern"],
        json!("com.example.Svc1.OpX")
    );
    Ok(())
}

#[test]
fn malformed_input_fails_without_output() -> anyhow::Result<()> {
    let dir = FixtureDir::new()?;
    let out = dir.path().join("coral-operations.json");
    let broken = dir.write("bad-operations.xml", "<operations><operation name=\"X\">")?;

    let mut args = scenario(&dir)?;
    args.extend([
        "--operations".to_string(),
        broken.display().to_string(),
        "--output".to_string(),
        out.display().to_string(),
    ]);
    let result = run_compiler(&args)?;

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("bad-operations.xml"), "stderr: {stderr}");
    assert!(!out.exists());
    Ok(())
}

#[test]
fn warnings_exit_zero_unless_denied() -> anyhow::Result<()> {
    let dir = FixtureDir::new()?;
    let out = dir.path().join("contract.json");
    let services = dir.write(
        "more-services.xml",
        r#"<services><service name="Svc2"><operation target="Nope"/></service></services>"#,
    )?;

    let mut args = scenario(&dir)?;
    args.extend([
        "--services".to_string(),
        services.display().to_string(),
        "--output".to_string(),
        out.display().to_string(),
    ]);

    let result = run_compiler(&args)?;
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("unknown operation 'Nope'"), "stdout: {stdout}");
    assert!(out.exists());

    std::fs::remove_file(&out)?;
    args.push("--deny-warnings".to_string());
    let result = run_compiler(&args)?;
    assert_eq!(result.status.code(), Some(1));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn config_file_drives_openapi_layout() -> anyhow::Result<()> {
    let dir = FixtureDir::new()?;
    dir.write("exceptions.xml", SCENARIO_ERRORS)?;
    dir.write("operations.xml", SCENARIO_OPERATIONS)?;
    dir.write("services.xml", SCENARIO_SERVICES)?;
    dir.write(
        "schemas.yaml",
        r"
openapi: 3.0.3
info: {title: schemas, version: '1'}
paths: {}
components:
  schemas:
    SchemaIn: {type: object}
    SchemaOut: {type: object}
",
    )?;
    let root = dir.path().display().to_string();
    let out = dir.path().join("contract.json");
    let cfg = dir.write(
        "build.yaml",
        &format!(
            r"errors: [{root}/exceptions.xml]
operations: [{root}/operations.xml]
services: [{root}/services.xml]
schemas: [{root}/schemas.yaml]
output: {out}
layout: openapi
warnings: fail
info:
  title: Mock contract
",
            out = out.display()
        ),
    )?;

    let result = run_compiler(["--config", cfg.to_str().context("utf-8 path")?])?;
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let doc = read_json(&out)?;
    assert_eq!(doc["openapi"], json!("3.0.3"));
    assert_eq!(doc["info"]["title"], json!("Mock contract"));
    assert_eq!(doc["paths"]["/OpX"]["post"]["operationId"], json!("OpX"));
    assert!(doc["components"]["schemas"]["SchemaOut"].is_object());
    Ok(())
}

#[test]
fn missing_services_is_usage_error() -> anyhow::Result<()> {
    let dir = FixtureDir::new()?;
    let ops = dir.write("operations.xml", SCENARIO_OPERATIONS)?;
    let result = run_compiler(["--operations", ops.to_str().context("utf-8 path")?])?;
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("service descriptor"));
    Ok(())
}

#[test]
fn doctype_descriptors_compile() -> anyhow::Result<()> {
    let dir = FixtureDir::new()?;
    let out = dir.path().join("contract.json");
    let with_doctype = |root: &str, body: &str| {
        body.replacen("?>\n", &format!("?>\n<!DOCTYPE {root} SYSTEM \"{root}.dtd\">\n"), 1)
    };
    let errors = dir.write("exceptions.xml", &with_doctype("httperrors", SCENARIO_ERRORS))?;
    let operations = dir.write(
        "operations.xml",
        &with_doctype("operations", SCENARIO_OPERATIONS),
    )?;
    let services = dir.write("services.xml", &with_doctype("services", SCENARIO_SERVICES))?;

    let result = run_compiler([
        "--errors".to_string(),
        errors.display().to_string(),
        "--operations".to_string(),
        operations.display().to_string(),
        "--services".to_string(),
        services.display().to_string(),
        "--output".to_string(),
        out.display().to_string(),
        "--deny-warnings".to_string(),
    ])?;
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let doc = read_json(&out)?;
    assert_eq!(doc["/OpX"]["post"]["operationId"], json!("OpX"));
    assert_eq!(
        doc["/OpX"]["post"]["responses"]["404"]["description"],
        json!("404 response")
    );
    Ok(())
}

#[test]
fn debug_log_shows_resolved_config() -> anyhow::Result<()> {
    let dir = FixtureDir::new()?;
    let out = dir.path().join("contract.json");

    let mut args = scenario(&dir)?;
    args.extend([
        "--output".to_string(),
        out.display().to_string(),
        "--log-level".to_string(),
        "debug".to_string(),
    ]);
    let result = run_compiler(&args)?;

    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Resolved build config"), "stderr: {stderr}");
    Ok(())
}
