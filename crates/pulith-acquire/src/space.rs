//! Free-space preflight before a download.

use crate::config::AcquireConfig;
use crate::console::Console;
use crate::error::{AcquireError, Result};
use pulith_fs::SpaceProbe;
use std::path::Path;

/// Check that `fetch_bytes` fit into the filesystem holding `dir`.
///
/// Skipped entirely when only printing URIs or when downloading is
/// disabled. A stat overflow is reported as a warning and treated as
/// enough space. Memory-backed filesystems are exempt from the limit.
pub fn check_free_space(
    dir: &Path,
    fetch_bytes: u64,
    config: &AcquireConfig,
    probe: &dyn SpaceProbe,
    console: &dyn Console,
) -> Result<()> {
    if config.print_uris || !config.download {
        return Ok(());
    }

    let stats = match probe.stats(dir) {
        Ok(stats) => stats,
        Err(e) if e.is_overflow() => {
            console.warning(&format!("Couldn't determine free space in {}", dir.display()));
            tracing::debug!(dir = %dir.display(), "statvfs overflow: {e}");
            return Ok(());
        }
        Err(e) => {
            return Err(AcquireError::FreeSpaceUnknown {
                dir:    dir.to_path_buf(),
                source: e,
            });
        }
    };

    let free_blocks = if config.sandbox_user.as_deref().is_none_or(str::is_empty) {
        stats.free_blocks
    } else {
        stats.available_blocks
    };
    let needed_blocks = stats.blocks_for(fetch_bytes);
    tracing::debug!(dir = %dir.display(), needed_blocks, free_blocks, "free space check");

    if free_blocks >= needed_blocks {
        return Ok(());
    }

    match probe.is_memory_backed(dir) {
        Ok(true) => {
            tracing::debug!(dir = %dir.display(), "memory-backed filesystem, ignoring space limit");
            Ok(())
        }
        _ => Err(AcquireError::InsufficientSpace { dir: dir.to_path_buf() }),
    }
}
