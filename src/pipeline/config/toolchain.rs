//! Per-architecture toolchain data.
//!
//! Everything that varies only with the target architecture lives in one
//! table: compiler binaries, library layouts, the .NET runtime identifier
//! and the vendor driver set. Stages look the values up instead of
//! branching on the architecture themselves.

use super::arch::Arch;

/// Architecture-dependent tool and file names.
#[derive(Debug)]
pub struct ToolchainDescriptor {
    /// Architecture this row describes.
    pub arch: Arch,
    /// Delphi command-line compiler, absent where Delphi cannot target the
    /// architecture.
    pub delphi_compiler: Option<&'static str>,
    /// Library subdirectory under the Delphi root (`lib/<dir>/release`).
    pub delphi_lib_dir: Option<&'static str>,
    /// Free Pascal compiler binary for this target.
    pub fpc_compiler: &'static str,
    /// Value for the Free Pascal `-T` target switch.
    pub fpc_target: &'static str,
    /// Unit subdirectory under the Free Pascal root (`units/<dir>`).
    pub fpc_unit_dir: &'static str,
    /// Runtime identifier passed to `dotnet publish -r`.
    pub runtime_identifier: &'static str,
    /// Vendor driver binaries bundled for this architecture.
    pub driver_files: &'static [&'static str],
}

impl ToolchainDescriptor {
    /// True when Delphi can produce binaries for this architecture.
    pub fn supports_delphi(&self) -> bool {
        self.delphi_compiler.is_some()
    }
}

static TOOLCHAINS: [ToolchainDescriptor; 3] = [
    ToolchainDescriptor {
        arch: Arch::X64,
        delphi_compiler: Some("dcc64"),
        delphi_lib_dir: Some("win64"),
        fpc_compiler: "ppcx64",
        fpc_target: "win64",
        fpc_unit_dir: "x86_64-win64",
        runtime_identifier: "win-x64",
        // 64-bit hosts keep the 32-bit driver for legacy sensor buses.
        driver_files: &["RingBus64.sys", "RingBus32.sys"],
    },
    ToolchainDescriptor {
        arch: Arch::X86,
        delphi_compiler: Some("dcc32"),
        delphi_lib_dir: Some("win32"),
        fpc_compiler: "ppc386",
        fpc_target: "win32",
        fpc_unit_dir: "i386-win32",
        runtime_identifier: "win-x86",
        driver_files: &["RingBus32.sys"],
    },
    ToolchainDescriptor {
        arch: Arch::Arm64,
        delphi_compiler: None,
        delphi_lib_dir: None,
        fpc_compiler: "ppca64",
        fpc_target: "win64",
        fpc_unit_dir: "aarch64-win64",
        runtime_identifier: "win-arm64",
        driver_files: &["RingBusA64.sys"],
    },
];

/// Looks up the descriptor for an architecture.
pub fn descriptor(arch: Arch) -> &'static ToolchainDescriptor {
    match arch {
        Arch::X64 => &TOOLCHAINS[0],
        Arch::X86 => &TOOLCHAINS[1],
        Arch::Arm64 => &TOOLCHAINS[2],
    }
}
