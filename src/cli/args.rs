//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::config::{Arch, CompilerPreference};

/// Release builder for the Coilwatch hardware telemetry suite
#[derive(Parser, Debug)]
#[command(
    name = "coilwatch-release",
    version,
    about = "Release builder for the Coilwatch hardware telemetry suite",
    long_about = "Builds a per-architecture Windows distribution: compiles the native
sensor library (Delphi, with Free Pascal fallback), publishes the .NET
front-ends, bundles the pre-signed vendor drivers, signs the result and
packages an Inno Setup installer into bin/.

Usage:
  coilwatch-release
  coilwatch-release --arch x86 --compiler fpc
  coilwatch-release --arch x64 --sign --cert-thumbprint <SHA1>

Exit code 0 = the distribution exists in bin/, possibly degraded (a
missing front-end or installer is reported as a warning). Exit code 1 =
no usable toolchain or the native library failed to compile."
)]
pub struct Args {
    /// Target architecture; detected from the host when omitted
    #[arg(long, value_enum, value_name = "ARCH")]
    pub arch: Option<Arch>,

    /// Native compiler backend selection
    #[arg(long, value_enum, default_value_t = CompilerPreference::Auto, value_name = "BACKEND")]
    pub compiler: CompilerPreference,

    /// Sign assembled binaries and the installer
    #[arg(long)]
    pub sign: bool,

    /// SHA-1 thumbprint of the signing certificate; signtool picks one when omitted
    #[arg(long, value_name = "SHA1", env = "COILWATCH_CERT_THUMBPRINT")]
    pub cert_thumbprint: Option<String>,

    /// Project root containing native/, ui/, cli/, drivers/ and installer/
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Delphi installation root
    #[arg(long, value_name = "DIR", env = "COILWATCH_DELPHI_DIR")]
    pub delphi_dir: Option<PathBuf>,

    /// Free Pascal installation root
    #[arg(long, value_name = "DIR", env = "COILWATCH_FPC_DIR")]
    pub fpc_dir: Option<PathBuf>,

    /// Inno Setup compiler executable
    #[arg(long, value_name = "PATH", env = "COILWATCH_ISCC")]
    pub iscc: Option<PathBuf>,
}
