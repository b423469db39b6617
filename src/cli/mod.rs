//! Command line interface.
//!
//! Parses arguments, resolves them into a build configuration and runs
//! the pipeline against the real process runner.

mod args;

pub use args::Args;

use clap::Parser;

use crate::error::Result;
use crate::pipeline::config::{self, ResolveRequest};
use crate::pipeline::orchestrator;
use crate::pipeline::process::SystemRunner;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse();

    // Canonicalize early so every later path in logs is absolute.
    let root_dir = tokio::fs::canonicalize(&args.root).await?;

    let config = config::resolve(ResolveRequest {
        arch: args.arch,
        compiler: args.compiler,
        sign: args.sign,
        cert_thumbprint: args.cert_thumbprint,
        root_dir,
        host_arch: std::env::consts::ARCH.to_string(),
        delphi_dir: args.delphi_dir,
        fpc_dir: args.fpc_dir,
        iscc_path: args.iscc,
    })?;

    let runner = SystemRunner;
    orchestrator::execute(&config, &runner).await?;

    Ok(0)
}
