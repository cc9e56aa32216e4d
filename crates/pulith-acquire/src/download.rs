//! `download`: fetch archives into a target directory.

use crate::context::Context;
use crate::error::{AcquireError, Result};
use crate::gate::{check_auth, check_reproducible};
use crate::item::{FetchEngine, ItemStatus, file_name};
use crate::run::{RunOutcome, acquire_run};
use crate::space::check_free_space;
use pulith_fs::{CopyOptions, PermissionMode, copy_file};
use std::path::Path;

const ARCHIVE_MODE: u32 = 0o644;

/// Download the queued archives into `target`.
///
/// With `print-uris` only the URI listing is printed. Otherwise both gates
/// run without prompting, then the space check, then the fetch. Items served
/// from a local source are copied into `target` afterwards since the engine
/// leaves them where they are.
pub fn download<E: FetchEngine + ?Sized>(engine: &mut E, target: &Path, ctx: &Context<'_>) -> Result<()> {
    let config = ctx.config;

    if config.print_uris {
        for entry in engine.uris() {
            ctx.console.print(&entry.listing());
        }
        return Ok(());
    }

    check_auth(engine.items(), false, config, ctx.console)?;
    check_reproducible(engine.items(), false, config, ctx.console, ctx.feed, ctx.lookup)?;
    check_free_space(target, engine.fetch_needed(), config, ctx.probe, ctx.console)?;

    let mut outcome = RunOutcome::new();
    acquire_run(engine, None, &mut outcome, ctx.console)?;

    let options = CopyOptions::new().permissions(PermissionMode::Custom(ARCHIVE_MODE));
    for item in engine.items() {
        let dest = target.join(file_name(&item.dest_file));
        if item.local && dest != item.dest_file && item.status == ItemStatus::Done {
            let bytes = copy_file(&item.dest_file, &dest, options)?;
            tracing::debug!(from = %item.dest_file.display(), to = %dest.display(), bytes, "copied local archive");
        }
    }

    if outcome.failed {
        return Err(AcquireError::FetchFailed {
            count: outcome.failures.len(),
        });
    }
    Ok(())
}
