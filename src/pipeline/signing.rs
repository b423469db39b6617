//! Code signing.
//!
//! Signs assembled binaries with `signtool`. Vendor drivers arrive
//! already signed by the hardware vendor and re-signing would break their
//! kernel-mode signatures, so files carrying the vendor prefix are
//! skipped before `signtool` is ever invoked. Signing problems never
//! abort the run.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::config::{BuildConfig, VENDOR_DRIVER_PREFIX};
use super::process::{ProcessRequest, ProcessRunner};

/// Timestamp authority embedded in every signature.
const TIMESTAMP_URL: &str = "http://timestamp.digicert.com";

/// Per-file signing outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignOutcome {
    /// The file was signed.
    Signed,
    /// Vendor-prefixed file, left untouched.
    Skipped,
    /// The signing tool failed or the file was missing.
    Failed,
}

/// Aggregate of a signing pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SigningSummary {
    /// Files signed.
    pub signed: usize,
    /// Vendor files skipped.
    pub skipped: usize,
    /// Files that could not be signed.
    pub failed: usize,
}

impl SigningSummary {
    /// Folds one outcome into the totals.
    pub fn record(&mut self, outcome: SignOutcome) {
        match outcome {
            SignOutcome::Signed => self.signed += 1,
            SignOutcome::Skipped => self.skipped += 1,
            SignOutcome::Failed => self.failed += 1,
        }
    }
}

/// True for vendor-shipped binaries that must keep their original
/// signature. The prefix match is case sensitive.
pub fn is_vendor_signed(file_name: &str) -> bool {
    file_name.starts_with(VENDOR_DRIVER_PREFIX)
}

/// Signs a single file.
///
/// Vendor-prefixed files are skipped before any tool invocation. A
/// missing file or a `signtool` failure is reported in the outcome.
pub async fn sign_file(
    config: &BuildConfig,
    runner: &dyn ProcessRunner,
    path: &Path,
) -> SignOutcome {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    if is_vendor_signed(name) {
        log::debug!("skipping pre-signed vendor file {name}");
        return SignOutcome::Skipped;
    }
    if !path.is_file() {
        log::warn!("cannot sign {}: file not found", path.display());
        return SignOutcome::Failed;
    }

    let request = sign_request(config.signing().cert_thumbprint(), path);
    match runner.run(&request).await {
        Ok(output) if output.success() => {
            log::debug!("✓ signed {name}");
            SignOutcome::Signed
        }
        Ok(output) => {
            log::warn!(
                "signtool failed on {name} (exit {:?}):\n{}",
                output.exit_code,
                output.combined.trim()
            );
            SignOutcome::Failed
        }
        Err(err) => {
            log::warn!("signtool could not be started for {name} ({err})");
            SignOutcome::Failed
        }
    }
}

/// Signs every executable, library and driver image under `dir`.
///
/// Files are visited in a stable sorted order so repeated runs sign the
/// same set the same way.
pub async fn sign_directory(
    config: &BuildConfig,
    runner: &dyn ProcessRunner,
    dir: &Path,
) -> SigningSummary {
    let mut targets: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_signable(path))
        .collect();
    targets.sort();

    let mut summary = SigningSummary::default();
    for target in &targets {
        summary.record(sign_file(config, runner, target).await);
    }
    log::info!(
        "✓ signing pass: {} signed, {} skipped, {} failed",
        summary.signed,
        summary.skipped,
        summary.failed
    );
    summary
}

/// Builds the `signtool` invocation. `/sha1` pins the configured
/// certificate; without a thumbprint `/a` lets the tool pick one.
fn sign_request(thumbprint: Option<&str>, path: &Path) -> ProcessRequest {
    let mut args: Vec<String> = vec!["sign".to_string()];
    match thumbprint {
        Some(thumb) => {
            args.push("/sha1".to_string());
            args.push(thumb.to_string());
        }
        None => args.push("/a".to_string()),
    }
    args.extend([
        "/fd".to_string(),
        "SHA256".to_string(),
        "/tr".to_string(),
        TIMESTAMP_URL.to_string(),
        "/td".to_string(),
        "SHA256".to_string(),
        path.display().to_string(),
    ]);
    ProcessRequest::new("signtool", args)
}

fn is_signable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ext.eq_ignore_ascii_case("exe")
                || ext.eq_ignore_ascii_case("dll")
                || ext.eq_ignore_ascii_case("sys")
        })
}
