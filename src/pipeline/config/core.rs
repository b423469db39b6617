//! Resolved build configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::arch::Arch;
use super::toolchain::{self, ToolchainDescriptor};

/// Product name used in log lines.
pub const PRODUCT_NAME: &str = "Coilwatch";

/// Vendor prefix marking pre-signed driver binaries. Files carrying it are
/// never passed to the signing tool. The match is case sensitive.
pub const VENDOR_DRIVER_PREFIX: &str = "RingBus";

/// Vendor interop assembly shipped for every architecture.
pub const SHARED_VENDOR_RUNTIME: &str = "RingBusNet.dll";

/// Compiled native sensor library, produced next to its project file.
pub const NATIVE_ARTIFACT: &str = "coilsense.dll";

/// Pascal project for the native sensor library.
pub const NATIVE_PROJECT: &str = "coilsense.dpr";

const OUTPUT_DIR: &str = "bin";
const NATIVE_DIR: &str = "native";
const DRIVER_DIR: &str = "drivers";
const PUBLISH_DIR: &str = "publish";
const INSTALLER_SCRIPT: &str = "installer/coilwatch.iss";
const INSTALLER_OUTPUT_DIR: &str = "installer/output";

/// Which native compiler backends a run may attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompilerPreference {
    /// Try Delphi first, fall back to Free Pascal on failure.
    Auto,
    /// Delphi only, no fallback.
    Delphi,
    /// Free Pascal only.
    Fpc,
}

impl CompilerPreference {
    /// Name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            CompilerPreference::Auto => "auto",
            CompilerPreference::Delphi => "delphi",
            CompilerPreference::Fpc => "fpc",
        }
    }
}

impl fmt::Display for CompilerPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code-signing settings for the run.
#[derive(Clone, Debug, Default)]
pub struct SigningConfig {
    enabled: bool,
    cert_thumbprint: Option<String>,
}

impl SigningConfig {
    /// Creates signing settings.
    pub fn new(enabled: bool, cert_thumbprint: Option<String>) -> Self {
        Self {
            enabled,
            cert_thumbprint,
        }
    }

    /// True when binaries should be signed after assembly.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// SHA-1 thumbprint of the signing certificate, if one was pinned.
    /// Without it the signing tool selects a certificate automatically.
    pub fn cert_thumbprint(&self) -> Option<&str> {
        self.cert_thumbprint.as_deref()
    }
}

/// Toolchain installation roots discovered during resolution.
#[derive(Clone, Debug, Default)]
pub struct SdkPaths {
    delphi_root: Option<PathBuf>,
    fpc_root: Option<PathBuf>,
}

impl SdkPaths {
    /// Creates the path set from discovered roots.
    pub fn new(delphi_root: Option<PathBuf>, fpc_root: Option<PathBuf>) -> Self {
        Self {
            delphi_root,
            fpc_root,
        }
    }

    /// Delphi installation root (`<root>/bin/dcc64.exe`).
    pub fn delphi_root(&self) -> Option<&Path> {
        self.delphi_root.as_deref()
    }

    /// Free Pascal installation root (`<root>/bin/ppcx64.exe`).
    pub fn fpc_root(&self) -> Option<&Path> {
        self.fpc_root.as_deref()
    }
}

/// Immutable configuration for one release run.
///
/// Built once by [`super::resolve`]; every later stage reads from it and
/// nothing else. Environment state is consulted only during resolution.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    arch: Arch,
    compiler: CompilerPreference,
    signing: SigningConfig,
    root_dir: PathBuf,
    sdk: SdkPaths,
    iscc_path: Option<PathBuf>,
}

impl BuildConfig {
    pub(super) fn new(
        arch: Arch,
        compiler: CompilerPreference,
        signing: SigningConfig,
        root_dir: PathBuf,
        sdk: SdkPaths,
        iscc_path: Option<PathBuf>,
    ) -> Self {
        Self {
            arch,
            compiler,
            signing,
            root_dir,
            sdk,
            iscc_path,
        }
    }

    /// Target architecture of this run.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Compiler backend selection, already adjusted for the architecture.
    pub fn compiler(&self) -> CompilerPreference {
        self.compiler
    }

    /// Code-signing settings.
    pub fn signing(&self) -> &SigningConfig {
        &self.signing
    }

    /// Project root containing `native/`, `ui/`, `cli/`, `drivers/` and
    /// `installer/`.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Discovered toolchain roots.
    pub fn sdk(&self) -> &SdkPaths {
        &self.sdk
    }

    /// Installer packager executable, if one was found.
    pub fn iscc_path(&self) -> Option<&Path> {
        self.iscc_path.as_deref()
    }

    /// Toolchain table row for the target architecture.
    pub fn toolchain(&self) -> &'static ToolchainDescriptor {
        toolchain::descriptor(self.arch)
    }

    /// Directory the distribution is assembled into. Recreated on every run.
    pub fn output_dir(&self) -> PathBuf {
        self.root_dir.join(OUTPUT_DIR)
    }

    /// Directory holding the native Pascal sources.
    pub fn native_dir(&self) -> PathBuf {
        self.root_dir.join(NATIVE_DIR)
    }

    /// Pascal project file for the native library.
    pub fn native_project(&self) -> PathBuf {
        self.native_dir().join(NATIVE_PROJECT)
    }

    /// Where the compilers leave the native library.
    pub fn native_artifact(&self) -> PathBuf {
        self.native_dir().join(NATIVE_ARTIFACT)
    }

    /// Directory holding the pre-signed vendor drivers.
    pub fn driver_dir(&self) -> PathBuf {
        self.root_dir.join(DRIVER_DIR)
    }

    /// Staging directory for one published front-end.
    pub fn publish_dir(&self, name: &str) -> PathBuf {
        self.root_dir.join(PUBLISH_DIR).join(name)
    }

    /// Installer script consumed by the packager.
    pub fn installer_script(&self) -> PathBuf {
        self.root_dir.join(INSTALLER_SCRIPT)
    }

    /// Directory the packager writes the raw installer into.
    pub fn installer_output_dir(&self) -> PathBuf {
        self.root_dir.join(INSTALLER_OUTPUT_DIR)
    }
}
