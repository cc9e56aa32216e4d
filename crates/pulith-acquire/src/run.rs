//! Executes the fetch run and sorts every item into success, transient
//! failure or hard failure.

use crate::console::Console;
use crate::error::{AcquireError, Result};
use crate::item::{FetchEngine, ItemStatus, RunResult};
use crate::uri::strip_credentials;
use std::fmt;
use std::time::Duration;

/// A hard per-item failure, with credentials already stripped from the URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFailure {
    pub uri:        String,
    pub error_text: String,
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to fetch {}  {}", self.uri, self.error_text)
    }
}

/// Aggregate per-item results of a run.
///
/// Idle items only count as transient failures when the caller asked for
/// them to be tracked; otherwise they are hard failures like any other.
#[derive(Clone, Debug, Default)]
pub struct RunOutcome {
    track_transient:       bool,
    pub failed:            bool,
    pub transient_failure: bool,
    pub failures:          Vec<ItemFailure>,
}

impl RunOutcome {
    pub fn new() -> Self { Self::default() }

    /// Outcome that records Idle items as transient failures.
    pub fn tracking_transient() -> Self {
        Self {
            track_transient: true,
            ..Self::default()
        }
    }

    pub fn tracks_transient(&self) -> bool { self.track_transient }
}

/// Run the engine and classify every item into `outcome`.
///
/// Returns `Err(RunFailed)` only when the run mechanism itself failed; item
/// failures are reported through `outcome` and on `console`.
pub fn acquire_run<E: FetchEngine + ?Sized>(
    engine: &mut E,
    pulse: Option<Duration>,
    outcome: &mut RunOutcome,
    console: &dyn Console,
) -> Result<()> {
    let pulse = pulse.filter(|d| !d.is_zero());
    if engine.run(pulse) == RunResult::Failed {
        return Err(AcquireError::RunFailed);
    }

    for item in engine.items() {
        if item.is_success() {
            continue;
        }

        if outcome.track_transient && item.status == ItemStatus::Idle {
            tracing::debug!(item = %item.short_desc, "left idle after run");
            outcome.transient_failure = true;
            continue;
        }

        let failure = ItemFailure {
            uri:        strip_credentials(&item.desc_uri),
            error_text: item.error_text.clone(),
        };
        console.error(&failure.to_string());
        outcome.failed = true;
        outcome.failures.push(failure);
    }

    tracing::info!(
        items = engine.items().len(),
        failed = outcome.failures.len(),
        transient = outcome.transient_failure,
        "fetch run finished"
    );
    Ok(())
}
