//! Native library compilation.
//!
//! Two backends build the sensor library from the same Pascal sources:
//! the Delphi command-line compiler (primary) and Free Pascal (fallback).
//! Under the `auto` preference the fallback runs only after the primary
//! has failed; an explicit preference pins a single backend with no
//! fallback.

mod delphi;
mod fpc;

use super::config::{BuildConfig, CompilerPreference};
use super::process::{ProcessRequest, ProcessRunner};

/// Compiles the native library, honoring the configured backend selection.
///
/// Returns true when some permitted backend produced the library. All
/// failure detail is logged; the boolean is the stage contract.
pub async fn compile(config: &BuildConfig, runner: &dyn ProcessRunner) -> bool {
    match config.compiler() {
        CompilerPreference::Delphi => delphi::compile(config, runner).await,
        CompilerPreference::Fpc => fpc::compile(config, runner).await,
        CompilerPreference::Auto => {
            if delphi::compile(config, runner).await {
                return true;
            }
            log::warn!("primary compiler failed, retrying with Free Pascal");
            fpc::compile(config, runner).await
        }
    }
}

/// Executable name with the platform suffix attached.
fn exe_name(base: &str) -> String {
    format!("{base}{}", std::env::consts::EXE_SUFFIX)
}

/// Runs one backend invocation and folds the outcome into a boolean.
///
/// A nonzero exit and an unstartable compiler are logged as different
/// problems but both count as a failed attempt.
async fn run_backend(name: &str, request: &ProcessRequest, runner: &dyn ProcessRunner) -> bool {
    log::info!("compiling with {name}: {}", request.display_line());
    match runner.run(request).await {
        Ok(output) if output.success() => {
            log::info!("✓ {name} build succeeded");
            true
        }
        Ok(output) => {
            log::warn!(
                "{name} exited with {:?}:\n{}",
                output.exit_code,
                output.combined.trim()
            );
            false
        }
        Err(err) => {
            log::warn!("{name} could not be started ({err})");
            false
        }
    }
}
