//! Trust and reproducibility gates.
//!
//! Both gates collect the offending items first and then run the same
//! policy over the list:
//!
//! 1. the matching `allow-*` override accepts with a notice,
//! 2. without permission to prompt the run is denied,
//! 3. below quiet level 2 and without `assume-yes` the user is asked,
//!    defaulting to "no",
//! 4. the deprecated `force-yes` accepts with a warning,
//! 5. anything else is denied.

mod feed;
mod reproducible;
mod trust;

pub use feed::{
    AptCacheLookup, CurlFeed, SourceLookup, StatusFeed, StatusRecord, StatusSnapshot, parse_source_field,
    validate_package_name,
};
pub use reproducible::{check_reproducible, reproducible_prompt};
pub use trust::{auth_prompt, check_auth, untrusted};

use crate::config::AcquireConfig;
use crate::console::{Console, Level, show_list};
use crate::error::{AcquireError, Result};

pub const FORCE_YES_DEPRECATED: &str =
    "--force-yes is deprecated, use one of the options starting with --allow instead.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GateKind {
    Authentication,
    Reproducibility,
}

impl GateKind {
    fn header(self) -> &'static str {
        match self {
            Self::Authentication => "WARNING: The following packages cannot be authenticated!",
            Self::Reproducibility => "WARNING: The following packages are not reproducible!",
        }
    }

    fn overridden(self) -> &'static str {
        match self {
            Self::Authentication => "Authentication warning overridden.",
            Self::Reproducibility => "Unreproducible warning overridden.",
        }
    }

    fn question(self) -> &'static str {
        match self {
            Self::Authentication => "Install these packages without verification?",
            Self::Reproducibility => "Install these packages anyway?",
        }
    }

    fn allowed(self, config: &AcquireConfig) -> bool {
        match self {
            Self::Authentication => config.allow_unauthenticated,
            Self::Reproducibility => config.allow_unreproducible,
        }
    }

    fn denied(self) -> AcquireError {
        match self {
            Self::Authentication => AcquireError::Unauthenticated,
            Self::Reproducibility => AcquireError::Unreproducible,
        }
    }

    fn denied_assume_yes(self) -> AcquireError {
        match self {
            Self::Authentication => AcquireError::UnauthenticatedAssumeYes,
            Self::Reproducibility => AcquireError::UnreproducibleAssumeYes,
        }
    }
}

pub(crate) fn confirm_list(
    kind: GateKind,
    list: &[String],
    prompt_user: bool,
    config: &AcquireConfig,
    console: &dyn Console,
) -> Result<()> {
    show_list(console, Level::Notice, kind.header(), list);

    if kind.allowed(config) {
        console.status(Level::Notice, kind.overridden());
        return Ok(());
    }

    if !prompt_user {
        return Err(kind.denied());
    }

    if config.may_prompt() {
        if !console.confirm(kind.question(), false) {
            return Err(kind.denied());
        }
        return Ok(());
    }

    if config.force_yes {
        console.warning(FORCE_YES_DEPRECATED);
        return Ok(());
    }

    Err(kind.denied_assume_yes())
}
