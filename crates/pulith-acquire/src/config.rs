//! Configuration snapshot consulted by the gates, the orchestrator and the
//! cleaners.
//!
//! The snapshot is assembled once per invocation and passed by reference;
//! nothing in this crate reads configuration from global state.

use crate::error::Result;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Quiet level from which interactive prompts are no longer offered.
pub const QUIET_PROMPT_THRESHOLD: u8 = 2;

pub const ENV_PREFIX: &str = "PULITH_ACQUIRE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AcquireConfig {
    pub quiet:                 u8,
    pub assume_yes:            bool,
    /// Deprecated; accepted with a warning.
    pub force_yes:             bool,
    pub allow_unauthenticated: bool,
    pub allow_unreproducible:  bool,
    pub print_uris:            bool,
    pub download:              bool,
    pub download_only:         bool,
    pub simulate:              bool,
    /// User the download workers drop privileges to, if any.
    pub sandbox_user:          Option<String>,
    pub no_locking:            bool,
    /// Only repository copies make a version fetchable; the installed
    /// status entry does not.
    pub clean_installed:       bool,
    /// Foreign architectures in addition to the native one.
    pub foreign_architectures: Vec<String>,
    pub dirs:                  DirConfig,
    pub reproducible:          ReproducibleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DirConfig {
    pub archives:    PathBuf,
    pub lists:       PathBuf,
    pub pkgcache:    PathBuf,
    pub srcpkgcache: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReproducibleConfig {
    pub status_url:      String,
    pub cache_file:      PathBuf,
    pub default_release: String,
    pub architecture:    String,
    /// Let the feed download report progress and announce every package
    /// as it is checked. Pass it on to [`crate::gate::CurlFeed::new`].
    pub debug:           bool,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            quiet:                 0,
            assume_yes:            false,
            force_yes:             false,
            allow_unauthenticated: false,
            allow_unreproducible:  false,
            print_uris:            false,
            download:              true,
            download_only:         false,
            simulate:              false,
            sandbox_user:          None,
            no_locking:            false,
            clean_installed:       true,
            foreign_architectures: Vec::new(),
            dirs:                  DirConfig::default(),
            reproducible:          ReproducibleConfig::default(),
        }
    }
}

impl Default for DirConfig {
    fn default() -> Self {
        Self {
            archives:    PathBuf::from("/var/cache/apt/archives"),
            lists:       PathBuf::from("/var/lib/apt/lists"),
            pkgcache:    PathBuf::from("/var/cache/apt/pkgcache.bin"),
            srcpkgcache: PathBuf::from("/var/cache/apt/srcpkgcache.bin"),
        }
    }
}

impl Default for ReproducibleConfig {
    fn default() -> Self {
        Self {
            status_url:      "https://tests.reproducible-builds.org/reproducible.json.bz2".to_string(),
            cache_file:      PathBuf::from("/var/cache/apt/reproducible.json.bz2"),
            default_release: "unstable".to_string(),
            architecture:    pulith_platform::arch::native_dpkg_arch().to_string(),
            debug:           false,
        }
    }
}

impl AcquireConfig {
    /// Defaults, then the TOML file (if any), then `PULITH_ACQUIRE_*`
    /// environment variables. Nested keys use `__`, e.g.
    /// `PULITH_ACQUIRE_REPRODUCIBLE__DEFAULT_RELEASE`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut fig = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            fig = fig.merge(Toml::file(path));
        }
        fig = fig.merge(
            Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replace("__", ".").replace('_', "-").into()),
        );
        Ok(fig.extract()?)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()?)
    }

    /// Whether a yes/no question may be put to the user.
    pub fn may_prompt(&self) -> bool {
        self.quiet < QUIET_PROMPT_THRESHOLD && !self.assume_yes
    }

    /// Architectures whose archives the cleaner considers: native plus
    /// foreign ones. `all` is always accepted by the cleaner itself.
    pub fn architectures(&self) -> Vec<String> {
        let mut archs = vec![self.reproducible.architecture.clone()];
        for arch in &self.foreign_architectures {
            if !archs.contains(arch) {
                archs.push(arch.clone());
            }
        }
        archs
    }
}
