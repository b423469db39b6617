//! Distribution assembly.
//!
//! Fills the freshly recreated `bin/` directory: the compiled native
//! library is moved in, the vendor drivers for the target architecture
//! are copied, and both managed front-ends are published and collected.
//! Only the native library is mandatory.

use std::path::{Path, PathBuf};

use super::config::{BuildConfig, NATIVE_ARTIFACT, SHARED_VENDOR_RUNTIME};
use super::error::{ErrorExt, Result};
use super::fsutil;
use super::process::ProcessRunner;
use super::publish::{self, FrontEnd};

/// Assembles the distribution in the output directory.
///
/// Precondition: the output directory exists and is empty; the pipeline
/// recreates it at the start of every run. Returns the assembled files;
/// front-end failures and missing vendor files shrink the set with a
/// warning instead of failing the run.
pub async fn assemble(config: &BuildConfig, runner: &dyn ProcessRunner) -> Result<Vec<PathBuf>> {
    let out_dir = config.output_dir();
    log::info!("assembling distribution in {}", out_dir.display());

    let mut artifacts = Vec::new();

    // The native library is the one artifact the run cannot do without.
    let native_src = config.native_artifact();
    let native_dst = out_dir.join(NATIVE_ARTIFACT);
    tokio::fs::rename(&native_src, &native_dst)
        .await
        .fs_context("moving compiled library", &native_src)?;
    artifacts.push(native_dst);

    copy_driver_files(config, &out_dir, &mut artifacts).await?;

    for front_end in [FrontEnd::Gui, FrontEnd::Cli] {
        if publish::publish(config, runner, front_end).await? {
            let copied = publish::collect(config, front_end).await?;
            artifacts.extend(copied);
        } else {
            log::warn!(
                "distribution will ship without the {} front-end",
                front_end.label()
            );
        }
    }

    log::info!("✓ assembled {} file(s)", artifacts.len());
    Ok(artifacts)
}

/// Copies the architecture's vendor drivers plus the shared interop
/// assembly. Missing files are warnings; the vendor drop is maintained
/// out of band.
async fn copy_driver_files(
    config: &BuildConfig,
    out_dir: &Path,
    artifacts: &mut Vec<PathBuf>,
) -> Result<()> {
    let driver_dir = config.driver_dir();
    let names = config
        .toolchain()
        .driver_files
        .iter()
        .copied()
        .chain([SHARED_VENDOR_RUNTIME]);

    for name in names {
        let src = driver_dir.join(name);
        if !src.is_file() {
            log::warn!("vendor file {} not found, skipping", src.display());
            continue;
        }
        let dst = out_dir.join(name);
        fsutil::copy_file(&src, &dst).await?;
        artifacts.push(dst);
    }
    Ok(())
}
