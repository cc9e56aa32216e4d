#![allow(dead_code)]

use pulith_acquire::gate::{StatusRecord, StatusSnapshot};
use pulith_acquire::{
    CacheVersion, Console, FetchEngine, FetchItem, ItemStatus, PackageCache, Result, RunResult, SourceLookup,
    StatusFeed,
};
use pulith_fs::{FsStats, SpaceProbe};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn archive(name: &str, dir: &Path) -> FetchItem {
    let file = format!("{name}_1.0_amd64.deb");
    let mut item = FetchItem::new(format!("http://deb.example/pool/main/{file}"), name);
    item.trusted = true;
    item.dest_file = dir.join(file);
    item.file_size = 20_000;
    item
}

#[derive(Default)]
pub struct Screen {
    pub quiet:   u8,
    pub answers: RefCell<VecDeque<bool>>,
    pub out:     RefCell<Vec<String>>,
    pub asked:   RefCell<Vec<String>>,
}

impl Screen {
    pub fn answering(answers: &[bool]) -> Self {
        let screen = Self::default();
        screen.answers.borrow_mut().extend(answers);
        screen
    }

    pub fn out(&self) -> Vec<String> { self.out.borrow().clone() }

    pub fn asked(&self) -> usize { self.asked.borrow().len() }
}

impl Console for Screen {
    fn quiet(&self) -> u8 { self.quiet }

    fn print(&self, line: &str) { self.out.borrow_mut().push(line.to_string()); }

    fn warning(&self, message: &str) { self.out.borrow_mut().push(format!("W: {message}")); }

    fn error(&self, message: &str) { self.out.borrow_mut().push(format!("E: {message}")); }

    fn confirm(&self, question: &str, default: bool) -> bool {
        self.asked.borrow_mut().push(question.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(default)
    }

    fn page(&self, path: &Path) -> Result<()> {
        self.out.borrow_mut().push(format!("page {}", path.display()));
        Ok(())
    }
}

/// Engine whose run marks every item done, except those named in `fail`
/// which end up in error and those in `stall` which stay idle.
pub struct ScriptedEngine {
    pub items: Vec<FetchItem>,
    pub fail:  Vec<String>,
    pub stall: Vec<String>,
    pub runs:  usize,
}

impl ScriptedEngine {
    pub fn new(items: Vec<FetchItem>) -> Self {
        Self {
            items,
            fail: Vec::new(),
            stall: Vec::new(),
            runs: 0,
        }
    }
}

impl FetchEngine for ScriptedEngine {
    fn run(&mut self, _pulse: Option<Duration>) -> RunResult {
        self.runs += 1;
        for item in &mut self.items {
            if self.stall.contains(&item.short_desc) {
                continue;
            }
            if self.fail.contains(&item.short_desc) {
                item.status = ItemStatus::Error;
                item.error_text = "404  Not Found".to_string();
                continue;
            }
            item.status = ItemStatus::Done;
            item.complete = true;
        }
        RunResult::Continue
    }

    fn items(&self) -> &[FetchItem] { &self.items }
}

pub struct Disk {
    pub stats:  FsStats,
    pub memory: bool,
}

impl Disk {
    pub fn blocks(free: u64) -> Self {
        Self {
            stats:  FsStats {
                block_size:       512,
                free_blocks:      free,
                available_blocks: free,
            },
            memory: false,
        }
    }
}

impl SpaceProbe for Disk {
    fn stats(&self, _path: &Path) -> pulith_fs::Result<FsStats> { Ok(self.stats) }

    fn is_memory_backed(&self, _path: &Path) -> pulith_fs::Result<bool> { Ok(self.memory) }
}

/// Feed listing the given source packages as reproducible on
/// `unstable`/`amd64`.
pub struct Feed(pub Vec<&'static str>);

impl StatusFeed for Feed {
    fn refresh(&self, _url: &str, _cache_file: &Path) -> Result<()> { Ok(()) }

    fn load(&self, _cache_file: &Path) -> Result<StatusSnapshot> {
        Ok(StatusSnapshot::from_records(self.0.iter().map(|package| StatusRecord {
            package:      package.to_string(),
            version:      "1.0".to_string(),
            suite:        "unstable".to_string(),
            architecture: "amd64".to_string(),
            status:       "reproducible".to_string(),
        })))
    }
}

#[derive(Default)]
pub struct Sources(pub HashMap<String, String>);

impl SourceLookup for Sources {
    fn source_package(&self, binary: &str) -> Result<Option<String>> { Ok(self.0.get(binary).cloned()) }
}

#[derive(Default)]
pub struct Cache(pub HashMap<String, Vec<CacheVersion>>);

impl PackageCache for Cache {
    fn versions(&self, package: &str, _architecture: &str) -> Option<Vec<CacheVersion>> {
        self.0.get(package).cloned()
    }
}

pub fn write(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![b'x'; len]).unwrap();
    path
}
