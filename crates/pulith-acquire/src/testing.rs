//! In-memory stand-ins for the collaborators of the acquire checks.

use crate::clean::{CacheVersion, PackageCache, VersionOrigin};
use crate::console::Console;
use crate::error::{AcquireError, Result};
use crate::gate::{SourceLookup, StatusFeed, StatusRecord, StatusSnapshot};
use crate::item::{FetchEngine, FetchItem, ItemStatus, RunResult};
use pulith_fs::{FsStats, SpaceProbe};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A trusted, completely downloaded archive for package `name`.
pub fn done(name: &str) -> FetchItem {
    let file = format!("{name}_1.0_amd64.deb");
    let mut item = FetchItem::new(format!("http://deb.example/pool/main/{file}"), name);
    item.trusted = true;
    item.status = ItemStatus::Done;
    item.complete = true;
    item.dest_file = PathBuf::from("/var/cache/apt/archives").join(file);
    item.file_size = 1000;
    item
}

#[derive(Default)]
pub struct RecordingConsole {
    quiet:     u8,
    width:     usize,
    answers:   RefCell<VecDeque<bool>>,
    lines:     RefCell<Vec<String>>,
    warnings:  RefCell<Vec<String>>,
    errors:    RefCell<Vec<String>>,
    questions: RefCell<Vec<(String, bool)>>,
    paged:     RefCell<Vec<PathBuf>>,
}

impl RecordingConsole {
    pub fn new(quiet: u8) -> Self {
        Self {
            quiet,
            width: 80,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Replies to the next questions, in order. Unscripted questions get
    /// their default.
    pub fn answering(self, answers: &[bool]) -> Self {
        self.answers.borrow_mut().extend(answers);
        self
    }

    pub fn lines(&self) -> Vec<String> { self.lines.borrow().clone() }

    pub fn warnings(&self) -> Vec<String> { self.warnings.borrow().clone() }

    pub fn errors(&self) -> Vec<String> { self.errors.borrow().clone() }

    pub fn prompts(&self) -> usize { self.questions.borrow().len() }

    pub fn questions(&self) -> Vec<String> { self.questions.borrow().iter().map(|(q, _)| q.clone()).collect() }

    pub fn defaults(&self) -> Vec<bool> { self.questions.borrow().iter().map(|(_, d)| *d).collect() }

    pub fn paged(&self) -> Vec<PathBuf> { self.paged.borrow().clone() }
}

impl Console for RecordingConsole {
    fn quiet(&self) -> u8 { self.quiet }

    fn print(&self, line: &str) { self.lines.borrow_mut().push(line.to_string()); }

    fn warning(&self, message: &str) { self.warnings.borrow_mut().push(message.to_string()); }

    fn error(&self, message: &str) { self.errors.borrow_mut().push(message.to_string()); }

    fn confirm(&self, question: &str, default: bool) -> bool {
        self.questions.borrow_mut().push((question.to_string(), default));
        self.answers.borrow_mut().pop_front().unwrap_or(default)
    }

    fn page(&self, path: &Path) -> Result<()> {
        self.paged.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn width(&self) -> usize { self.width }
}

pub struct FakeEngine {
    items:  Vec<FetchItem>,
    result: RunResult,
    pulses: Vec<Option<Duration>>,
}

impl FakeEngine {
    pub fn new(items: Vec<FetchItem>) -> Self {
        Self {
            items,
            result: RunResult::Continue,
            pulses: Vec::new(),
        }
    }

    pub fn with_result(mut self, result: RunResult) -> Self {
        self.result = result;
        self
    }

    /// Pulse argument of every `run` call so far.
    pub fn pulses(&self) -> Vec<Option<Duration>> { self.pulses.clone() }
}

impl FetchEngine for FakeEngine {
    fn run(&mut self, pulse: Option<Duration>) -> RunResult {
        self.pulses.push(pulse);
        self.result
    }

    fn items(&self) -> &[FetchItem] { &self.items }
}

#[derive(Clone, Copy)]
enum StatOutcome {
    Stats(FsStats),
    Fail,
    Overflow,
}

#[derive(Clone, Copy)]
enum FsType {
    Ordinary,
    Memory,
    Unknown,
}

pub struct FakeProbe {
    stat:       StatOutcome,
    fs_type:    FsType,
    stat_calls: Cell<usize>,
}

impl FakeProbe {
    pub fn new(block_size: u64, free_blocks: u64, available_blocks: u64) -> Self {
        Self::with(StatOutcome::Stats(FsStats {
            block_size,
            free_blocks,
            available_blocks,
        }))
    }

    fn with(stat: StatOutcome) -> Self {
        Self {
            stat,
            fs_type: FsType::Ordinary,
            stat_calls: Cell::new(0),
        }
    }

    pub fn failing_stat() -> Self { Self::with(StatOutcome::Fail) }

    pub fn overflowing() -> Self { Self::with(StatOutcome::Overflow) }

    pub fn memory_backed(mut self) -> Self {
        self.fs_type = FsType::Memory;
        self
    }

    pub fn fs_type_unknown(mut self) -> Self {
        self.fs_type = FsType::Unknown;
        self
    }

    pub fn stat_calls(&self) -> usize { self.stat_calls.get() }
}

fn stat_failure(path: &Path) -> pulith_fs::Error {
    pulith_fs::Error::Stat {
        path:   path.to_path_buf(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    }
}

impl SpaceProbe for FakeProbe {
    fn stats(&self, path: &Path) -> pulith_fs::Result<FsStats> {
        self.stat_calls.set(self.stat_calls.get() + 1);
        match self.stat {
            StatOutcome::Stats(stats) => Ok(stats),
            StatOutcome::Fail => Err(stat_failure(path)),
            StatOutcome::Overflow => Err(pulith_fs::Error::Overflow {
                path: path.to_path_buf(),
            }),
        }
    }

    fn is_memory_backed(&self, path: &Path) -> pulith_fs::Result<bool> {
        match self.fs_type {
            FsType::Ordinary => Ok(false),
            FsType::Memory => Ok(true),
            FsType::Unknown => Err(stat_failure(path)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FeedMode {
    Ok,
    RefreshFails,
    Undecodable,
}

pub struct FakeFeed {
    records:   Vec<StatusRecord>,
    mode:      FeedMode,
    refreshes: Cell<usize>,
}

impl FakeFeed {
    /// A feed reporting every `(suite, package, architecture)` as reproducible.
    pub fn with(reproducible: &[(&str, &str, &str)]) -> Self {
        let records = reproducible
            .iter()
            .map(|(suite, package, architecture)| StatusRecord {
                package: package.to_string(),
                version: "1.0".to_string(),
                suite: suite.to_string(),
                architecture: architecture.to_string(),
                status: "reproducible".to_string(),
            })
            .collect();
        Self::new(records, FeedMode::Ok)
    }

    fn new(records: Vec<StatusRecord>, mode: FeedMode) -> Self {
        Self {
            records,
            mode,
            refreshes: Cell::new(0),
        }
    }

    pub fn failing_refresh() -> Self { Self::new(Vec::new(), FeedMode::RefreshFails) }

    pub fn undecodable() -> Self { Self::new(Vec::new(), FeedMode::Undecodable) }

    pub fn refreshes(&self) -> usize { self.refreshes.get() }
}

impl StatusFeed for FakeFeed {
    fn refresh(&self, _url: &str, _cache_file: &Path) -> Result<()> {
        self.refreshes.set(self.refreshes.get() + 1);
        if self.mode == FeedMode::RefreshFails {
            return Err(AcquireError::FeedRefresh(pulith_platform::Error::CommandNotFound {
                cmd: "curl".to_string(),
            }));
        }
        Ok(())
    }

    fn load(&self, _cache_file: &Path) -> Result<StatusSnapshot> {
        if self.mode == FeedMode::Undecodable {
            return StatusSnapshot::from_json(b"<html>").map_err(|e| AcquireError::StatusFilter(Box::new(e)));
        }
        Ok(StatusSnapshot::from_records(self.records.clone()))
    }
}

#[derive(Default)]
pub struct FakeLookup {
    sources: HashMap<String, String>,
    failing: bool,
    calls:   Cell<usize>,
}

impl FakeLookup {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn source(mut self, binary: &str, source: &str) -> Self {
        self.sources.insert(binary.to_string(), source.to_string());
        self
    }

    pub fn calls(&self) -> usize { self.calls.get() }
}

impl SourceLookup for FakeLookup {
    fn source_package(&self, binary: &str) -> Result<Option<String>> {
        self.calls.set(self.calls.get() + 1);
        if self.failing {
            return Err(AcquireError::SourceLookup(pulith_platform::Error::CommandNotFound {
                cmd: "apt-cache".to_string(),
            }));
        }
        Ok(self.sources.get(binary).cloned())
    }
}

/// Package cache keyed by package name only; every architecture sees the
/// same versions.
#[derive(Default)]
pub struct FakeCache {
    packages: HashMap<String, Vec<CacheVersion>>,
}

impl FakeCache {
    pub fn version(mut self, package: &str, version: &str, origins: &[VersionOrigin]) -> Self {
        self.packages
            .entry(package.to_string())
            .or_default()
            .push(CacheVersion::new(version, origins));
        self
    }
}

impl PackageCache for FakeCache {
    fn versions(&self, package: &str, _architecture: &str) -> Option<Vec<CacheVersion>> {
        self.packages.get(package).cloned()
    }
}
