//! Policy core around a package fetch run.
//!
//! Before a run, [`gate::check_auth`] and [`gate::check_reproducible`] decide
//! whether the queued items may be fetched at all and
//! [`space::check_free_space`] whether they fit. [`run::acquire_run`] drives
//! the [`FetchEngine`] and classifies what happened to every item.
//! [`clean::auto_clean`] removes archives the package cache can no longer
//! provide.
//!
//! The transfer engine, the package cache, the terminal, the filesystem and
//! the reproducibility feed are all reached through traits so that callers
//! can plug in their own.

pub mod changelog;
pub mod clean;
pub mod config;
pub mod console;
mod context;
pub mod download;
mod error;
pub mod gate;
pub mod item;
pub mod run;
pub mod space;
pub mod uri;

#[cfg(test)]
mod testing;

pub use changelog::changelog;
pub use clean::{ArchiveCleaner, CacheVersion, CleanupCandidate, Eraser, PackageCache, VersionOrigin, auto_clean, clean};
pub use config::AcquireConfig;
pub use self::console::{Console, Level, TermConsole};
pub use context::Context;
pub use download::download;
pub use error::{AcquireError, Result};
pub use gate::{AptCacheLookup, CurlFeed, SourceLookup, StatusFeed, check_auth, check_reproducible};
pub use item::{FetchEngine, FetchItem, ItemStatus, RunResult, UriEntry};
pub use run::{ItemFailure, RunOutcome, acquire_run};
pub use space::check_free_space;
