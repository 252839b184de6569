use anyhow::Context as _;
use std::ffi::OsStr;
use std::process::{Command, Output};

pub use unrelated_test_support::{
    FixtureDir, SCENARIO_ERRORS, SCENARIO_OPERATIONS, SCENARIO_SERVICES,
};

pub fn run_compiler<I, S>(args: I) -> anyhow::Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_unrelated-contract-compiler");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CONTRACT_COMPILER_CONFIG")
        .env_remove("CONTRACT_COMPILER_OUTPUT")
        .output()
        .context("run contract compiler")
}
