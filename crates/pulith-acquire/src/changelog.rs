//! `changelog`: fetch and show package changelogs.

use crate::config::AcquireConfig;
use crate::console::Console;
use crate::error::{AcquireError, Result};
use crate::item::{FetchEngine, file_name};
use crate::run::{RunOutcome, acquire_run};

/// Fetch the queued changelogs and page them.
///
/// `print-uris` skips the fetch and prints `'<uri>' <file>` per item
/// instead; items that already carry an error are reported and fail the
/// command. `download-only` fetches without paging.
pub fn changelog<E: FetchEngine + ?Sized>(engine: &mut E, config: &AcquireConfig, console: &dyn Console) -> Result<()> {
    let print_only = config.print_uris;

    if !print_only {
        let mut outcome = RunOutcome::new();
        acquire_run(engine, None, &mut outcome, console)?;
        if outcome.failed {
            return Err(AcquireError::FetchFailed {
                count: outcome.failures.len(),
            });
        }
        if config.download_only {
            return Ok(());
        }
    }

    let mut failed = 0;
    for item in engine.items() {
        if !print_only {
            console.page(&item.dest_file)?;
        } else if !item.error_text.is_empty() {
            console.error(&item.error_text);
            failed += 1;
        } else {
            console.print(&format!("'{}' {}", item.desc_uri, file_name(&item.dest_file)));
        }
    }

    if failed > 0 {
        return Err(AcquireError::FetchFailed { count: failed });
    }
    Ok(())
}
