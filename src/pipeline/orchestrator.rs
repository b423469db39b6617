//! Pipeline sequencing.
//!
//! Stage order is fixed: compile, assemble, sign, package. Compilation
//! failure is the only stage failure that aborts the run; everything
//! after it degrades the distribution and is surfaced through logs and
//! the returned report.

use std::path::PathBuf;

use super::config::{BuildConfig, PRODUCT_NAME};
use super::error::{Context, Error, Result};
use super::fsutil;
use super::process::ProcessRunner;
use super::signing::SigningSummary;
use super::{assemble, checksum, compiler, installer, signing};

/// Everything a finished run produced.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Files placed in the output directory, in assembly order.
    pub artifacts: Vec<PathBuf>,
    /// Signing totals, when signing was enabled.
    pub signing: Option<SigningSummary>,
    /// Final installer path, when packaging succeeded.
    pub installer: Option<PathBuf>,
    /// SHA-256 of the final installer.
    pub installer_sha256: Option<String>,
}

/// Runs the full release pipeline against the resolved configuration.
pub async fn execute(config: &BuildConfig, runner: &dyn ProcessRunner) -> Result<PipelineReport> {
    log::info!(
        "{PRODUCT_NAME} release build: {} (compiler: {}, signing: {})",
        config.arch(),
        config.compiler(),
        if config.signing().enabled() { "on" } else { "off" }
    );

    // 1. Fresh output directory. Even an aborted run leaves no stale
    //    artifacts behind.
    fsutil::recreate_dir(&config.output_dir())
        .await
        .context("preparing output directory")?;

    // 2. Compile the native library. Failure here is fatal.
    if !compiler::compile(config, runner).await {
        return Err(Error::CompileFailed {
            arch: config.arch().as_str(),
            preference: config.compiler().as_str(),
        });
    }

    // 3. Assemble the distribution.
    let artifacts = assemble::assemble(config, runner)
        .await
        .context("assembling distribution")?;
    let mut report = PipelineReport {
        artifacts,
        ..Default::default()
    };

    // 4. Sign everything assembled so far.
    if config.signing().enabled() {
        let summary = signing::sign_directory(config, runner, &config.output_dir()).await;
        report.signing = Some(summary);
    }

    // 5. Package the installer, sign it, then hash the final bytes.
    if let Some(installer_path) = installer::build(config, runner).await {
        if config.signing().enabled() {
            let outcome = signing::sign_file(config, runner, &installer_path).await;
            if let Some(summary) = report.signing.as_mut() {
                summary.record(outcome);
            }
        }
        match checksum::sha256_file(&installer_path).await {
            Ok(digest) => {
                log::info!("installer sha256: {digest}");
                report.installer_sha256 = Some(digest);
            }
            Err(err) => log::warn!("could not hash installer ({err})"),
        }
        report.artifacts.push(installer_path.clone());
        report.installer = Some(installer_path);
    }

    log::info!(
        "✓ release complete: {} artifact(s) in {}",
        report.artifacts.len(),
        config.output_dir().display()
    );
    Ok(report)
}
