//! Free-space queries for download destinations.

use crate::{Error, Result};
use std::path::Path;

/// Block accounting for the filesystem that holds a directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FsStats {
    pub block_size:       u64,
    /// Free blocks, including the ones reserved for the superuser.
    pub free_blocks:      u64,
    /// Free blocks an unprivileged user may allocate.
    pub available_blocks: u64,
}

impl FsStats {
    /// Whole blocks needed to hold `bytes`, rounded down.
    pub fn blocks_for(&self, bytes: u64) -> u64 {
        bytes.checked_div(self.block_size).unwrap_or(0)
    }
}

/// Source of filesystem statistics.
pub trait SpaceProbe {
    fn stats(&self, dir: &Path) -> Result<FsStats>;

    /// Whether the directory lives on a memory-backed filesystem (ramfs).
    fn is_memory_backed(&self, dir: &Path) -> Result<bool>;
}

/// `f_type` reported by `statfs(2)` for ramfs.
#[cfg(any(target_os = "linux", target_os = "android"))]
const RAMFS_MAGIC: nix::sys::statfs::FsType = nix::sys::statfs::FsType(0x8584_58f6_u32 as _);

/// Probe backed by `statvfs(2)` and `statfs(2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProbe;

#[cfg(unix)]
impl SpaceProbe for SystemProbe {
    fn stats(&self, dir: &Path) -> Result<FsStats> {
        let buf = nix::sys::statvfs::statvfs(dir).map_err(|errno| stat_error(dir, errno))?;

        Ok(FsStats {
            block_size:       u64::from(buf.block_size()),
            free_blocks:      u64::from(buf.blocks_free()),
            available_blocks: u64::from(buf.blocks_available()),
        })
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn is_memory_backed(&self, dir: &Path) -> Result<bool> {
        let stat = nix::sys::statfs::statfs(dir).map_err(|errno| stat_error(dir, errno))?;
        Ok(stat.filesystem_type() == RAMFS_MAGIC)
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn is_memory_backed(&self, _dir: &Path) -> Result<bool> { Ok(false) }
}

#[cfg(not(unix))]
impl SpaceProbe for SystemProbe {
    fn stats(&self, _dir: &Path) -> Result<FsStats> { Err(Error::Unsupported) }

    fn is_memory_backed(&self, _dir: &Path) -> Result<bool> { Err(Error::Unsupported) }
}

#[cfg(unix)]
fn stat_error(dir: &Path, errno: nix::errno::Errno) -> Error {
    if errno == nix::errno::Errno::EOVERFLOW {
        Error::Overflow {
            path: dir.to_path_buf(),
        }
    } else {
        Error::Stat {
            path:   dir.to_path_buf(),
            source: errno.into(),
        }
    }
}
