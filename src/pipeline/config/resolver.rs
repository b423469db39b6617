//! Configuration resolution.
//!
//! Collapses invocation parameters and host state into a [`BuildConfig`].
//! This is the only place the pipeline inspects the environment; later
//! stages work purely off the resolved configuration.

use std::path::{Path, PathBuf};

use super::arch::Arch;
use super::core::{BuildConfig, CompilerPreference, SdkPaths, SigningConfig};
use super::toolchain;
use crate::pipeline::error::{Error, Result};

/// Raw invocation parameters before resolution.
#[derive(Clone, Debug)]
pub struct ResolveRequest {
    /// Explicit target architecture, or detect from `host_arch`.
    pub arch: Option<Arch>,
    /// Requested compiler backend selection.
    pub compiler: CompilerPreference,
    /// Whether to sign assembled binaries and the installer.
    pub sign: bool,
    /// Pinned signing certificate thumbprint.
    pub cert_thumbprint: Option<String>,
    /// Project root directory.
    pub root_dir: PathBuf,
    /// Architecture string reported by the host.
    pub host_arch: String,
    /// Delphi installation root override.
    pub delphi_dir: Option<PathBuf>,
    /// Free Pascal installation root override.
    pub fpc_dir: Option<PathBuf>,
    /// Installer packager executable override.
    pub iscc_path: Option<PathBuf>,
}

/// Conventional Delphi install locations probed when no override is given.
const DELPHI_SEARCH: &[&str] = &[
    r"C:\Program Files (x86)\Embarcadero\Studio\23.0",
    r"C:\Program Files (x86)\Embarcadero\Studio\22.0",
];

/// Conventional Free Pascal install locations.
const FPC_SEARCH: &[&str] = &[r"C:\fpc\3.2.2", r"C:\FPC\3.2.2"];

/// Conventional Inno Setup compiler locations.
const ISCC_SEARCH: &[&str] = &[
    r"C:\Program Files (x86)\Inno Setup 6\ISCC.exe",
    r"C:\Program Files\Inno Setup 6\ISCC.exe",
];

/// Resolves invocation parameters into an immutable [`BuildConfig`].
///
/// Fails only when no toolchain usable under the compiler preference can
/// be found; every other discovery miss is deferred to the stage that
/// needs the tool.
pub fn resolve(request: ResolveRequest) -> Result<BuildConfig> {
    // Explicit architecture wins; otherwise detect once from the host.
    let arch = match request.arch {
        Some(arch) => arch,
        None => {
            let detected = Arch::from_host(&request.host_arch);
            log::info!("detected host architecture: {detected}");
            detected
        }
    };

    let descriptor = toolchain::descriptor(arch);

    // Delphi cannot target arm64; such runs must use Free Pascal.
    let compiler = if !descriptor.supports_delphi()
        && request.compiler != CompilerPreference::Fpc
    {
        log::warn!(
            "Delphi cannot target {arch}; overriding --compiler {} with fpc",
            request.compiler
        );
        CompilerPreference::Fpc
    } else {
        request.compiler
    };

    let sdk = SdkPaths::new(
        locate_sdk_root(
            "Delphi",
            request.delphi_dir.as_deref(),
            descriptor.delphi_compiler,
            DELPHI_SEARCH,
        ),
        locate_sdk_root(
            "Free Pascal",
            request.fpc_dir.as_deref(),
            Some(descriptor.fpc_compiler),
            FPC_SEARCH,
        ),
    );
    ensure_sdk(compiler, &sdk)?;

    let iscc_path = locate_packager(request.iscc_path);
    if iscc_path.is_none() {
        log::warn!("Inno Setup compiler not found; the run will skip the installer");
    }

    let signing = SigningConfig::new(request.sign, request.cert_thumbprint);

    Ok(BuildConfig::new(
        arch,
        compiler,
        signing,
        request.root_dir,
        sdk,
        iscc_path,
    ))
}

/// Finds a toolchain installation root.
///
/// Precedence: explicit override, then the compiler binary on `PATH`
/// (its root is two levels up, `<root>/bin/<compiler>`), then a list of
/// conventional install directories.
fn locate_sdk_root(
    label: &str,
    override_dir: Option<&Path>,
    compiler: Option<&str>,
    search: &[&str],
) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            return Some(dir.to_path_buf());
        }
        log::warn!(
            "{label} directory {} does not exist, probing defaults",
            dir.display()
        );
    }

    if let Some(name) = compiler {
        if let Ok(path) = which::which(name) {
            if let Some(root) = path.parent().and_then(Path::parent) {
                log::debug!("found {label} via PATH: {}", root.display());
                return Some(root.to_path_buf());
            }
        }
    }

    search
        .iter()
        .map(Path::new)
        .find(|dir| dir.is_dir())
        .map(Path::to_path_buf)
}

/// Verifies that at least one backend permitted by `compiler` has an
/// installation to run.
fn ensure_sdk(compiler: CompilerPreference, sdk: &SdkPaths) -> Result<()> {
    let found = match compiler {
        CompilerPreference::Auto => sdk.delphi_root().is_some() || sdk.fpc_root().is_some(),
        CompilerPreference::Delphi => sdk.delphi_root().is_some(),
        CompilerPreference::Fpc => sdk.fpc_root().is_some(),
    };
    if found {
        return Ok(());
    }
    let detail = match compiler {
        CompilerPreference::Auto => {
            "no Delphi or Free Pascal installation found (use --delphi-dir or --fpc-dir)"
        }
        CompilerPreference::Delphi => "no Delphi installation found (use --delphi-dir)",
        CompilerPreference::Fpc => "no Free Pascal installation found (use --fpc-dir)",
    };
    Err(Error::SdkNotFound {
        detail: detail.to_string(),
    })
}

/// Finds the installer packager. An explicit override is kept even when the
/// file is missing so the installer stage can report the miss.
fn locate_packager(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Ok(path) = which::which("ISCC") {
        return Some(path);
    }
    search_packager()
}

fn search_packager() -> Option<PathBuf> {
    ISCC_SEARCH
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}
