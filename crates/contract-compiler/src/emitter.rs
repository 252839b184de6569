//! Contract document emission.
//!
//! Every (service, operation) pair becomes one `POST /<operation>` path item. The document is
//! assembled as an ordered `serde_json` tree, so key order follows table insertion order and the
//! encoder takes care of JSON syntax.

use crate::config::{DocumentLayout, DuplicateStatusPolicy, InfoConfig};
use crate::context::BuildContext;
use crate::diagnostics::{BuildWarning, SchemaRole};
use crate::error::Result;
use crate::operations::Operation;
use indexmap::IndexMap;
use serde_json::{Map, Value, json};

pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
pub const OPENAPI_VERSION: &str = "3.0.3";
pub const SUCCESS_STATUS: &str = "200";

pub const TRACE_HEADER: &str = "x-amz-requestsupertrace";
pub const TARGET_HEADER: &str = "X-Amz-Target";
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const DATE_HEADER: &str = "X-Amz-Date";

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub duplicate_status: DuplicateStatusPolicy,
    pub layout: DocumentLayout,
    pub info: InfoConfig,
}

#[derive(Debug, Clone)]
pub struct Emission {
    pub document: Value,
    pub paths: usize,
    pub warnings: Vec<BuildWarning>,
}

/// Routing string carried by the target header: `<qualifier>.<service>.<operation>`.
#[must_use]
pub fn routing_target(qualifier: &str, service: &str, operation: &str) -> String {
    format!("{qualifier}.{service}.{operation}")
}

/// Build the contract document from a fully populated context.
///
/// Emission only reads the context, so calling it twice on the same context yields the same
/// document.
///
/// # Errors
///
/// Returns an error if schema components cannot be converted to JSON for the `openapi` layout.
pub fn emit(ctx: &BuildContext, options: &EmitOptions) -> Result<Emission> {
    let mut paths = Map::new();
    let mut path_owner: IndexMap<String, &str> = IndexMap::new();
    let mut warnings = Vec::new();

    for (service, operations) in ctx.services.iter() {
        for (name, operation) in operations {
            let qualifier = ctx.assembly.qualifier_for(service, name);
            let target = routing_target(qualifier, service, name);

            let mut op_warnings = Vec::new();
            let item = path_item(ctx, options, service, name, operation, &target, &mut op_warnings);

            let path = format!("/{name}");
            match path_owner.insert(path.clone(), service) {
                Some(previous) => warnings.push(BuildWarning::DuplicatePath {
                    path: path.clone(),
                    replaced_service: previous.to_string(),
                    service: service.to_string(),
                }),
                None => warnings.extend(op_warnings),
            }
            paths.insert(path, item);
        }
    }

    let count = paths.len();
    let document = match options.layout {
        DocumentLayout::Paths => Value::Object(paths),
        DocumentLayout::OpenApi => {
            let mut doc = Map::new();
            doc.insert("openapi".to_string(), json!(OPENAPI_VERSION));
            doc.insert(
                "info".to_string(),
                json!({
                    "title": options.info.title,
                    "version": options.info.version,
                }),
            );
            doc.insert("paths".to_string(), Value::Object(paths));
            if let Some(components) = ctx.schemas.components() {
                doc.insert("components".to_string(), serde_json::to_value(components)?);
            }
            Value::Object(doc)
        }
    };

    Ok(Emission {
        document,
        paths: count,
        warnings,
    })
}

fn path_item(
    ctx: &BuildContext,
    options: &EmitOptions,
    service: &str,
    name: &str,
    operation: &Operation,
    target: &str,
    warnings: &mut Vec<BuildWarning>,
) -> Value {
    check_schema(ctx, name, operation.input.as_deref(), SchemaRole::Input, warnings);
    check_schema(ctx, name, operation.output.as_deref(), SchemaRole::Output, warnings);

    let input_schema = match &operation.input {
        Some(input) => schema_ref(input),
        None => {
            warnings.push(BuildWarning::MissingInput {
                operation: name.to_string(),
            });
            open_object()
        }
    };

    json!({
        "post": {
            "operationId": name,
            "parameters": header_parameters(target),
            "requestBody": {
                "description": format!("{service} - {name}"),
                "content": { "application/json": { "schema": input_schema } },
                "required": true,
            },
            "responses": responses(ctx, options, name, operation, warnings),
        }
    })
}

fn header_parameters(target: &str) -> Value {
    json!([
        header(TRACE_HEADER, json!({ "type": "string", "pattern": "false" })),
        header(
            TARGET_HEADER,
            json!({ "type": "string", "pattern": target, "example": target }),
        ),
        header(
            REQUESTED_WITH_HEADER,
            json!({ "type": "string", "pattern": "XMLHTTPRequest" }),
        ),
        header(DATE_HEADER, json!({ "type": "string" })),
    ])
}

fn header(name: &str, schema: Value) -> Value {
    json!({
        "name": name,
        "in": "header",
        "required": false,
        "schema": schema,
    })
}

fn responses(
    ctx: &BuildContext,
    options: &EmitOptions,
    name: &str,
    operation: &Operation,
    warnings: &mut Vec<BuildWarning>,
) -> Value {
    let mut responses = Map::new();
    // status code -> what produced the response currently stored under it
    let mut origins: IndexMap<String, String> = IndexMap::new();

    responses.insert(SUCCESS_STATUS.to_string(), success_response(operation));
    origins.insert(
        SUCCESS_STATUS.to_string(),
        operation
            .output
            .clone()
            .unwrap_or_else(|| "success response".to_string()),
    );

    for error in &operation.errors {
        let code = match ctx.error_codes.get(error) {
            Some(code) => code,
            None => {
                warnings.push(BuildWarning::DefaultedErrorCode {
                    operation: name.to_string(),
                    error: error.clone(),
                });
                ctx.error_codes.resolve(error)
            }
        };

        if let Some(existing) = origins.get(code).cloned() {
            let (kept, dropped) = match options.duplicate_status {
                DuplicateStatusPolicy::KeepFirst => (existing, error.clone()),
                DuplicateStatusPolicy::KeepLast => (error.clone(), existing),
            };
            warnings.push(BuildWarning::StatusCodeCollision {
                operation: name.to_string(),
                code: code.to_string(),
                kept,
                dropped,
            });
            if options.duplicate_status == DuplicateStatusPolicy::KeepFirst {
                continue;
            }
        }

        responses.insert(code.to_string(), error_response(code));
        origins.insert(code.to_string(), error.clone());
    }

    Value::Object(responses)
}

fn success_response(operation: &Operation) -> Value {
    match &operation.output {
        Some(output) => json!({
            "description": output,
            "content": { "application/json": { "schema": schema_ref(output) } },
        }),
        None => json!({
            "content": { "application/json": { "schema": open_object() } },
        }),
    }
}

fn error_response(code: &str) -> Value {
    json!({
        "description": format!("{code} response"),
        "content": { "application/json": { "schema": open_object() } },
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("{SCHEMA_REF_PREFIX}{name}") })
}

fn open_object() -> Value {
    json!({ "type": "object" })
}

fn check_schema(
    ctx: &BuildContext,
    operation: &str,
    schema: Option<&str>,
    role: SchemaRole,
    warnings: &mut Vec<BuildWarning>,
) {
    let Some(schema) = schema else { return };
    if ctx.schemas.is_active() && !ctx.schemas.contains(schema) {
        warnings.push(BuildWarning::UnknownSchema {
            operation: operation.to_string(),
            schema: schema.to_string(),
            role,
        });
    }
}
