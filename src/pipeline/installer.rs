//! Installer packaging.
//!
//! Wraps the assembled distribution in an Inno Setup installer. The
//! packager writes a fixed file name; the pipeline qualifies it with the
//! target architecture and moves it into the output directory. A missing
//! packager, a packager failure or a missing output file all leave the
//! run without an installer but otherwise successful.

use std::path::PathBuf;

use super::config::{Arch, BuildConfig};
use super::process::{ProcessRequest, ProcessRunner};

/// File name the installer script emits, before qualification.
const RAW_INSTALLER_NAME: &str = "coilwatch-setup.exe";

/// Builds the installer and moves it into the output directory.
///
/// Returns the final installer path, or `None` when any step of the
/// packaging could not be completed.
pub async fn build(config: &BuildConfig, runner: &dyn ProcessRunner) -> Option<PathBuf> {
    let Some(iscc) = config.iscc_path() else {
        log::warn!("Inno Setup compiler not found, skipping installer");
        return None;
    };
    if !iscc.is_file() {
        log::warn!(
            "Inno Setup compiler {} does not exist, skipping installer",
            iscc.display()
        );
        return None;
    }

    let script = config.installer_script();
    let request = ProcessRequest::new(
        iscc,
        [
            format!("/DAppArch={}", config.arch()),
            script.display().to_string(),
        ],
    )
    .in_dir(config.root_dir());

    log::info!("building installer: {}", request.display_line());
    match runner.run(&request).await {
        Ok(output) if output.success() => {}
        Ok(output) => {
            log::warn!(
                "installer build exited with {:?}:\n{}",
                output.exit_code,
                output.combined.trim()
            );
            return None;
        }
        Err(err) => {
            log::warn!("installer build failed to start ({err})");
            return None;
        }
    }

    let raw = config.installer_output_dir().join(RAW_INSTALLER_NAME);
    if !raw.is_file() {
        log::warn!(
            "packager reported success but {} is missing",
            raw.display()
        );
        return None;
    }

    let target = config.output_dir().join(qualified_name(config.arch()));
    if let Err(err) = tokio::fs::rename(&raw, &target).await {
        log::warn!("could not move installer to {} ({err})", target.display());
        return None;
    }

    log::info!("✓ installer ready: {}", target.display());
    Some(target)
}

/// Architecture-qualified installer file name.
fn qualified_name(arch: Arch) -> String {
    format!("coilwatch-setup-{arch}.exe")
}
