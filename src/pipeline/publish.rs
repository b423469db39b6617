//! Managed front-end publishing.
//!
//! The GUI and the control CLI are .NET projects published per
//! architecture into staging directories, then copied flat into the
//! output directory. A failed publish degrades the distribution instead
//! of aborting the run, and the front-ends fail independently.

use std::path::PathBuf;

use walkdir::WalkDir;

use super::config::BuildConfig;
use super::error::{Context, Result};
use super::fsutil;
use super::process::{ProcessRequest, ProcessRunner};

/// The two managed front-ends shipped with the distribution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrontEnd {
    /// Desktop telemetry viewer.
    Gui,
    /// Headless control tool.
    Cli,
}

impl FrontEnd {
    /// Short name for log lines.
    pub fn label(self) -> &'static str {
        match self {
            FrontEnd::Gui => "GUI",
            FrontEnd::Cli => "CLI",
        }
    }

    /// Name of the published executable.
    pub fn executable(self) -> &'static str {
        match self {
            FrontEnd::Gui => "CoilwatchUI.exe",
            FrontEnd::Cli => "coilwatchctl.exe",
        }
    }

    /// Project file relative to the repo root.
    fn project(self) -> &'static str {
        match self {
            FrontEnd::Gui => "ui/CoilwatchUI.csproj",
            FrontEnd::Cli => "cli/coilwatchctl.csproj",
        }
    }

    /// Staging directory name under `publish/`.
    fn staging(self) -> &'static str {
        match self {
            FrontEnd::Gui => "gui",
            FrontEnd::Cli => "cli",
        }
    }

    /// The GUI ships its dependency libraries; the CLI is a single file.
    fn bundles_dependencies(self) -> bool {
        matches!(self, FrontEnd::Gui)
    }
}

/// Publishes one front-end into its staging directory.
///
/// Returns false when `dotnet` exits nonzero or cannot be started. The
/// staging directory is wiped first so stale outputs never leak into the
/// collection sweep.
pub async fn publish(
    config: &BuildConfig,
    runner: &dyn ProcessRunner,
    front_end: FrontEnd,
) -> Result<bool> {
    let staging = config.publish_dir(front_end.staging());
    fsutil::remove_dir_all(&staging).await?;

    let rid = config.toolchain().runtime_identifier;
    let request = ProcessRequest::new(
        "dotnet",
        [
            "publish".to_string(),
            front_end.project().to_string(),
            "-c".to_string(),
            "Release".to_string(),
            "-r".to_string(),
            rid.to_string(),
            "-o".to_string(),
            staging.display().to_string(),
            "--nologo".to_string(),
        ],
    )
    .in_dir(config.root_dir());

    log::info!("publishing {} front-end for {rid}", front_end.label());
    match runner.run(&request).await {
        Ok(output) if output.success() => {
            log::info!("✓ {} published", front_end.label());
            Ok(true)
        }
        Ok(output) => {
            log::warn!(
                "{} publish exited with {:?}:\n{}",
                front_end.label(),
                output.exit_code,
                output.combined.trim()
            );
            Ok(false)
        }
        Err(err) => {
            log::warn!("{} publish failed to start ({err})", front_end.label());
            Ok(false)
        }
    }
}

/// Copies a successfully published front-end into the output directory.
///
/// Returns the copied files. A missing executable after a reported
/// success is a warning and yields an empty set.
pub async fn collect(config: &BuildConfig, front_end: FrontEnd) -> Result<Vec<PathBuf>> {
    let staging = config.publish_dir(front_end.staging());
    let out_dir = config.output_dir();
    let mut copied = Vec::new();

    let exe_src = staging.join(front_end.executable());
    if !exe_src.is_file() {
        log::warn!(
            "{} publish succeeded but {} is missing",
            front_end.label(),
            exe_src.display()
        );
        return Ok(copied);
    }
    let exe_dst = out_dir.join(front_end.executable());
    fsutil::copy_file(&exe_src, &exe_dst).await?;
    copied.push(exe_dst);

    if front_end.bundles_dependencies() {
        // Flatten every dependency library in the publish tree next to
        // the executable, in a stable order.
        let mut libraries: Vec<PathBuf> = WalkDir::new(&staging)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("dll"))
            })
            .collect();
        libraries.sort();

        for src in libraries {
            let name = src
                .file_name()
                .context("publish output has no file name")?
                .to_owned();
            let dst = out_dir.join(name);
            fsutil::copy_file(&src, &dst).await?;
            copied.push(dst);
        }
    }

    log::info!(
        "✓ collected {} {} file(s)",
        copied.len(),
        front_end.label()
    );
    Ok(copied)
}
