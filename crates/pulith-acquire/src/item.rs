//! The seam to the transfer engine: queued items and the run entry point.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemStatus {
    /// Never started, or left undecided by the run.
    #[default]
    Idle,
    Fetching,
    Done,
    Error,
    AuthError,
    TransientNetworkError,
}

/// One queued download as reported by the engine.
#[derive(Clone, Debug, Default)]
pub struct FetchItem {
    /// Source URI; may embed `user:password@`.
    pub desc_uri:   String,
    /// Usually the package name.
    pub short_desc: String,
    pub trusted:    bool,
    pub status:     ItemStatus,
    pub complete:   bool,
    /// Fetched from the local filesystem rather than the network.
    pub local:      bool,
    pub dest_file:  PathBuf,
    pub error_text: String,
    pub file_size:  u64,
    /// Expected hash in `ALGO:hex` form.
    pub hash_sum:   Option<String>,
}

impl FetchItem {
    pub fn new(desc_uri: impl Into<String>, short_desc: impl Into<String>) -> Self {
        Self {
            desc_uri: desc_uri.into(),
            short_desc: short_desc.into(),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool { self.status == ItemStatus::Done && self.complete }
}

/// Outcome of the run mechanism itself, independent of item results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunResult {
    Continue,
    Failed,
    Cancelled,
}

/// One URI the engine would fetch, for `print-uris` listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UriEntry {
    pub uri:       String,
    pub dest_file: PathBuf,
    pub file_size: u64,
    pub hash_sum:  Option<String>,
}

impl From<&FetchItem> for UriEntry {
    fn from(item: &FetchItem) -> Self {
        Self {
            uri:       item.desc_uri.clone(),
            dest_file: item.dest_file.clone(),
            file_size: item.file_size,
            hash_sum:  item.hash_sum.clone(),
        }
    }
}

impl UriEntry {
    /// `'<uri>' <filename> <size> <hash>`
    pub fn listing(&self) -> String {
        format!(
            "'{}' {} {} {}",
            self.uri,
            file_name(&self.dest_file),
            self.file_size,
            self.hash_sum.as_deref().unwrap_or_default()
        )
    }
}

pub(crate) fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Transfer engine owning the item queue.
pub trait FetchEngine {
    /// Run the queue to completion, pulsing progress at `pulse` if given.
    fn run(&mut self, pulse: Option<Duration>) -> RunResult;

    fn items(&self) -> &[FetchItem];

    /// URIs the queue would fetch.
    fn uris(&self) -> Vec<UriEntry> { self.items().iter().map(UriEntry::from).collect() }

    /// Bytes still to be downloaded.
    fn fetch_needed(&self) -> u64 {
        self.items()
            .iter()
            .filter(|item| !item.local && !item.is_success())
            .map(|item| item.file_size)
            .sum()
    }
}
