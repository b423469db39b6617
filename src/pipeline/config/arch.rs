//! Target architecture handling.

use std::fmt;

use clap::ValueEnum;

/// CPU architecture of the distribution being built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Arch {
    /// 64-bit x86.
    X64,
    /// 32-bit x86.
    X86,
    /// 64-bit ARM.
    Arm64,
}

impl Arch {
    /// Maps a host-reported architecture string to a build target.
    ///
    /// Unknown strings fall back to [`Arch::X64`] with a warning so the
    /// pipeline keeps working on hosts that report exotic names.
    pub fn from_host(host: &str) -> Self {
        match host.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Arch::X64,
            "x86" | "i386" | "i586" | "i686" => Arch::X86,
            "aarch64" | "arm64" => Arch::Arm64,
            other => {
                log::warn!("unrecognized host architecture {other:?}, defaulting to x64");
                Arch::X64
            }
        }
    }

    /// Canonical short name, used in log lines and artifact names.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::X86 => "x86",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_host_names() {
        assert_eq!(Arch::from_host("x86_64"), Arch::X64);
        assert_eq!(Arch::from_host("AMD64"), Arch::X64);
        assert_eq!(Arch::from_host("i686"), Arch::X86);
        assert_eq!(Arch::from_host("x86"), Arch::X86);
        assert_eq!(Arch::from_host("aarch64"), Arch::Arm64);
        assert_eq!(Arch::from_host("arm64"), Arch::Arm64);
    }

    #[test]
    fn unknown_host_defaults_to_x64() {
        assert_eq!(Arch::from_host("mips64"), Arch::X64);
        assert_eq!(Arch::from_host(""), Arch::X64);
        assert_eq!(Arch::from_host("riscv64"), Arch::X64);
    }

    #[test]
    fn display_matches_artifact_naming() {
        assert_eq!(Arch::X64.to_string(), "x64");
        assert_eq!(Arch::X86.to_string(), "x86");
        assert_eq!(Arch::Arm64.to_string(), "arm64");
    }
}
