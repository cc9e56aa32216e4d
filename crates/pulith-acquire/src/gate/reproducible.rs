use super::feed::{SourceLookup, StatusFeed};
use super::{GateKind, confirm_list};
use crate::config::AcquireConfig;
use crate::console::Console;
use crate::error::Result;
use crate::item::FetchItem;

/// Refuse the run if the source package of any item is not known to build
/// reproducibly for the configured release and architecture.
///
/// The feed is refreshed once, then each item's source package is looked
/// up by its short description. An empty lookup result falls back to the
/// binary name.
pub fn check_reproducible(
    items: &[FetchItem],
    prompt_user: bool,
    config: &AcquireConfig,
    console: &dyn Console,
    feed: &dyn StatusFeed,
    lookup: &dyn SourceLookup,
) -> Result<()> {
    if config.allow_unreproducible {
        return Ok(());
    }

    let settings = &config.reproducible;
    feed.refresh(&settings.status_url, &settings.cache_file)?;
    if items.is_empty() {
        return Ok(());
    }
    let snapshot = feed.load(&settings.cache_file)?;

    let mut unreproducible = Vec::new();
    for item in items {
        let binary = &item.short_desc;
        if settings.debug {
            console.print(&format!("Checking reproducibility of {binary}"));
        }
        let source = lookup
            .source_package(binary)?
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| binary.clone());

        let reproducible =
            snapshot.is_reproducible(&settings.default_release, &source, &settings.architecture);
        tracing::debug!(%binary, %source, reproducible, "checked reproducibility");
        if !reproducible {
            unreproducible.push(binary.clone());
        }
    }

    if unreproducible.is_empty() {
        return Ok(());
    }
    reproducible_prompt(&unreproducible, prompt_user, config, console)
}

pub fn reproducible_prompt(
    unreproducible: &[String],
    prompt_user: bool,
    config: &AcquireConfig,
    console: &dyn Console,
) -> Result<()> {
    confirm_list(GateKind::Reproducibility, unreproducible, prompt_user, config, console)
}
