//! Architecture naming as used by Debian package archives.

use crate::error::{Error, Result};

/// CPU architecture types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86,
    X86_64,
    ARM,
    ARM64,
    PPC64LE,
    RISCV64,
    S390X,
}

impl Arch {
    /// Architecture of the running build target.
    pub fn detect() -> Result<Self> { Self::from_rust(std::env::consts::ARCH) }

    /// Map a Rust `target_arch` / `uname -m` style name.
    pub fn from_rust(name: &str) -> Result<Self> {
        match name {
            "x86" | "i386" | "i686" => Ok(Self::X86),
            "x86_64" => Ok(Self::X86_64),
            "arm" | "armv7l" => Ok(Self::ARM),
            "aarch64" | "arm64" => Ok(Self::ARM64),
            "powerpc64" | "ppc64le" => Ok(Self::PPC64LE),
            "riscv64" => Ok(Self::RISCV64),
            "s390x" => Ok(Self::S390X),
            other => Err(Error::UnknownArch(other.to_string())),
        }
    }

    /// Debian architecture name, e.g. `amd64`.
    pub fn dpkg_name(self) -> &'static str {
        match self {
            Self::X86 => "i386",
            Self::X86_64 => "amd64",
            Self::ARM => "armhf",
            Self::ARM64 => "arm64",
            Self::PPC64LE => "ppc64el",
            Self::RISCV64 => "riscv64",
            Self::S390X => "s390x",
        }
    }
}

/// Debian name of the native architecture, `amd64` when it cannot be mapped.
pub fn native_dpkg_arch() -> &'static str {
    Arch::detect().map(Arch::dpkg_name).unwrap_or("amd64")
}
