//! Reproducible-builds status feed and binary-to-source name lookup.

use crate::error::{AcquireError, Result};
use once_cell::sync::Lazy;
use pulith_platform::command::Command;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::process::Output;

/// Debian package name, optionally qualified with `:arch`.
static PACKAGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9+.\-]*(:[a-z0-9\-]+)?$").unwrap()
});

pub const REPRODUCIBLE: &str = "reproducible";

/// Reject anything that is not a well-formed package name before it is
/// handed to a subprocess.
pub fn validate_package_name(name: &str) -> Result<()> {
    if PACKAGE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(AcquireError::InvalidPackageName(name.to_string()))
    }
}

/// One entry of the feed. Fields the feed omits read as empty and never
/// match.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatusRecord {
    pub package:      String,
    pub version:      String,
    pub suite:        String,
    pub architecture: String,
    pub status:       String,
}

/// Reproducible `(suite, source package, architecture)` triples.
#[derive(Clone, Debug, Default)]
pub struct StatusSnapshot {
    reproducible: HashSet<(String, String, String)>,
}

impl StatusSnapshot {
    pub fn from_records(records: impl IntoIterator<Item = StatusRecord>) -> Self {
        let reproducible = records
            .into_iter()
            .filter(|r| r.status == REPRODUCIBLE)
            .map(|r| (r.suite, r.package, r.architecture))
            .collect();
        Self { reproducible }
    }

    /// Decode the feed's top-level JSON array.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        let records: Vec<StatusRecord> = serde_json::from_slice(bytes)?;
        Ok(Self::from_records(records))
    }

    pub fn is_reproducible(&self, suite: &str, package: &str, architecture: &str) -> bool {
        self.reproducible
            .contains(&(suite.to_string(), package.to_string(), architecture.to_string()))
    }

    pub fn len(&self) -> usize { self.reproducible.len() }

    pub fn is_empty(&self) -> bool { self.reproducible.is_empty() }
}

pub trait StatusFeed {
    /// Bring the local copy at `cache_file` up to date with `url`.
    fn refresh(&self, url: &str, cache_file: &Path) -> Result<()>;

    fn load(&self, cache_file: &Path) -> Result<StatusSnapshot>;
}

/// Feed backed by `curl` for conditional download and `bunzip2` for
/// decompression.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurlFeed {
    verbose: bool,
}

impl CurlFeed {
    pub fn new(verbose: bool) -> Self { Self { verbose } }
}

impl StatusFeed for CurlFeed {
    fn refresh(&self, url: &str, cache_file: &Path) -> Result<()> {
        let mut cmd = Command::new("curl");
        if !self.verbose {
            cmd = cmd.arg("--silent");
        }
        let cmd = cmd
            .arg("--location")
            .arg("-z")
            .arg(cache_file)
            .arg("-o")
            .arg(cache_file)
            .arg(url);

        tracing::debug!(command = %cmd, "refreshing reproducible status cache");
        cmd.capture().map_err(AcquireError::FeedRefresh)?;
        Ok(())
    }

    fn load(&self, cache_file: &Path) -> Result<StatusSnapshot> {
        let cmd = Command::new("bunzip2").arg("-c").arg(cache_file);
        tracing::debug!(command = %cmd, "decoding reproducible status cache");

        let output = cmd
            .capture()
            .map_err(|e| AcquireError::StatusFilter(Box::new(e)))?;
        let snapshot =
            StatusSnapshot::from_json(&output.stdout).map_err(|e| AcquireError::StatusFilter(Box::new(e)))?;

        tracing::debug!(entries = snapshot.len(), "loaded reproducible status");
        Ok(snapshot)
    }
}

pub trait SourceLookup {
    /// Source package that builds `binary`, if the lookup knows one.
    fn source_package(&self, binary: &str) -> Result<Option<String>>;
}

/// Lookup through `apt-cache show`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AptCacheLookup;

impl SourceLookup for AptCacheLookup {
    fn source_package(&self, binary: &str) -> Result<Option<String>> {
        validate_package_name(binary)?;

        let result = Command::new("apt-cache")
            .env("LC_ALL", "C")
            .arg("show")
            .arg(binary)
            .capture();
        lookup_output(result)
    }
}

/// A lookup that ran but failed, e.g. apt-cache exiting 100 for an unknown
/// package, knows no source name. Only failing to run it at all is fatal.
fn lookup_output(result: pulith_platform::Result<Output>) -> Result<Option<String>> {
    match result {
        Ok(output) => Ok(parse_source_field(&String::from_utf8_lossy(&output.stdout))),
        Err(pulith_platform::Error::ExitStatus { cmd, status }) => {
            tracing::debug!(%cmd, %status, "source lookup found nothing");
            Ok(None)
        }
        Err(e) => Err(AcquireError::SourceLookup(e)),
    }
}

/// Package name from the first `Source:` field of a control record. A
/// trailing `(version)` is dropped.
pub fn parse_source_field(record: &str) -> Option<String> {
    record
        .lines()
        .find_map(|line| line.strip_prefix("Source:"))
        .and_then(|value| value.split_whitespace().next())
        .map(str::to_string)
}
