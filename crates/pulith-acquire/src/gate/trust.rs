use super::{GateKind, confirm_list};
use crate::config::AcquireConfig;
use crate::console::Console;
use crate::error::Result;
use crate::item::FetchItem;

/// Short descriptions of the items that lack a trusted signature.
pub fn untrusted(items: &[FetchItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !item.trusted)
        .map(|item| item.short_desc.clone())
        .collect()
}

/// Refuse the run if any item cannot be authenticated, unless overridden
/// by configuration or, when `prompt_user` is set, by the user.
pub fn check_auth(
    items: &[FetchItem],
    prompt_user: bool,
    config: &AcquireConfig,
    console: &dyn Console,
) -> Result<()> {
    let untrusted = untrusted(items);
    if untrusted.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = untrusted.len(), "unauthenticated items queued");
    auth_prompt(&untrusted, prompt_user, config, console)
}

pub fn auth_prompt(
    untrusted: &[String],
    prompt_user: bool,
    config: &AcquireConfig,
    console: &dyn Console,
) -> Result<()> {
    confirm_list(GateKind::Authentication, untrusted, prompt_user, config, console)
}
