//! XML descriptor → JSON API contract compiler.
//!
//! Three descriptor kinds feed the build:
//! - error definitions (`httperror` target → status code)
//! - operation definitions (input/output schema names, error targets)
//! - service definitions (which operations each service exposes)
//!
//! The result is one JSON document mapping `/<operation>` paths to `POST` path items, read by the
//! mock server to recognize requests and simulate responses. This crate performs no network I/O.

pub mod assembly;
pub mod compiler;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod error_codes;
pub mod operations;
pub mod output;
pub mod schemas;
pub mod services;

pub use compiler::{BuildReport, Compiled, build, compile};
pub use config::CompileConfig;
pub use context::BuildContext;
pub use diagnostics::BuildWarning;
pub use error::{ContractError, Result};
