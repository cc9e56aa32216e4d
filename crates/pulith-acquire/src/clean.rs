//! Removal of downloaded archives: `clean` empties the download caches,
//! `auto_clean` only drops archives that can no longer be re-fetched.

use crate::config::AcquireConfig;
use crate::console::{Console, Level, size_to_str};
use crate::error::{AcquireError, Result};
use percent_encoding::percent_decode_str;
use pulith_fs::DirLock;
use std::path::{Path, PathBuf};

const PARTIAL: &str = "partial";
const LOST_FOUND: &str = "lost+found";

/// Where a cached version can be obtained from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionOrigin {
    /// A configured repository index.
    Repository,
    /// Only the installed-package status database.
    Status,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheVersion {
    pub version: String,
    pub origins: Vec<VersionOrigin>,
}

impl CacheVersion {
    pub fn new(version: impl Into<String>, origins: &[VersionOrigin]) -> Self {
        Self {
            version: version.into(),
            origins: origins.to_vec(),
        }
    }

    /// Whether this version can still be downloaded. Installed-only
    /// versions count unless `clean_installed` is set.
    pub fn is_fetchable(&self, clean_installed: bool) -> bool {
        self.origins
            .iter()
            .any(|origin| *origin == VersionOrigin::Repository || !clean_installed)
    }
}

/// Read access to the package cache.
pub trait PackageCache {
    /// Versions of `package` for `architecture`, or `None` if the cache has
    /// no such package.
    fn versions(&self, package: &str, architecture: &str) -> Option<Vec<CacheVersion>>;
}

/// An archive on disk and what its file name says it contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanupCandidate {
    pub path:         PathBuf,
    pub package:      String,
    pub version:      String,
    pub architecture: String,
    pub size:         u64,
}

/// Deletion hook called for every obsolete archive.
pub trait Eraser {
    fn erase(&mut self, candidate: &CleanupCandidate) -> Result<()>;
}

impl<F> Eraser for F
where
    F: FnMut(&CleanupCandidate) -> Result<()>,
{
    fn erase(&mut self, candidate: &CleanupCandidate) -> Result<()> { self(candidate) }
}

/// Split `pkg_version_arch.ext` into its percent-decoded fields.
pub fn parse_archive_name(name: &str) -> Option<(String, String, String)> {
    let (package, rest) = name.split_once('_')?;
    let (version, rest) = rest.split_once('_')?;
    let (architecture, _ext) = rest.split_once('.')?;

    let decode = |s: &str| percent_decode_str(s).decode_utf8_lossy().into_owned();
    Some((decode(package), decode(version), decode(architecture)))
}

/// Matches archive files against the package cache.
pub struct ArchiveCleaner<'a> {
    cache:           &'a dyn PackageCache,
    architectures:   Vec<String>,
    clean_installed: bool,
}

impl<'a> ArchiveCleaner<'a> {
    pub fn new(cache: &'a dyn PackageCache, config: &AcquireConfig) -> Self {
        Self {
            cache,
            architectures: config.architectures(),
            clean_installed: config.clean_installed,
        }
    }

    fn wants_architecture(&self, architecture: &str) -> bool {
        architecture == "all" || self.architectures.iter().any(|a| a == architecture)
    }

    /// An archive is obsolete unless the cache has a fetchable version with
    /// exactly the same version string.
    pub fn is_obsolete(&self, package: &str, version: &str, architecture: &str) -> bool {
        let Some(versions) = self.cache.versions(package, architecture) else {
            return true;
        };
        !versions
            .iter()
            .any(|v| v.version == version && v.is_fetchable(self.clean_installed))
    }

    fn candidate(&self, path: PathBuf) -> Option<CleanupCandidate> {
        let name = path.file_name()?.to_str()?;
        if matches!(name, DirLock::FILE_NAME | PARTIAL | LOST_FOUND) {
            return None;
        }

        let meta = std::fs::metadata(&path).ok()?;
        if !meta.is_file() {
            return None;
        }

        let (package, version, architecture) = parse_archive_name(name)?;
        if !self.wants_architecture(&architecture) {
            return None;
        }

        Some(CleanupCandidate {
            path,
            package,
            version,
            architecture,
            size: meta.len(),
        })
    }

    /// Scan the files directly inside `dir` and hand every obsolete archive
    /// to `eraser`, in file name order. A missing directory has nothing to
    /// clean.
    pub fn go<E: Eraser + ?Sized>(&self, dir: &Path, eraser: &mut E) -> Result<()> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(pulith_fs::Error::Read {
                    path:   dir.to_path_buf(),
                    source: e,
                }
                .into());
            }
        };

        let mut paths = entries
            .map(|entry| {
                entry.map(|e| e.path()).map_err(|e| pulith_fs::Error::Read {
                    path:   dir.to_path_buf(),
                    source: e,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        paths.sort();

        for path in paths {
            let Some(candidate) = self.candidate(path) else {
                continue;
            };
            if self.is_obsolete(&candidate.package, &candidate.version, &candidate.architecture) {
                tracing::debug!(path = %candidate.path.display(), "obsolete archive");
                eraser.erase(&candidate)?;
            }
        }
        Ok(())
    }
}

/// Reports each obsolete archive and removes it unless simulating.
pub struct LogEraser<'a> {
    console:  &'a dyn Console,
    simulate: bool,
}

impl<'a> LogEraser<'a> {
    pub fn new(console: &'a dyn Console, simulate: bool) -> Self { Self { console, simulate } }
}

impl Eraser for LogEraser<'_> {
    fn erase(&mut self, candidate: &CleanupCandidate) -> Result<()> {
        self.console.status(
            Level::Info,
            &format!("Del {} {} [{}B]", candidate.package, candidate.version, size_to_str(candidate.size)),
        );
        if !self.simulate {
            pulith_fs::remove_file(&candidate.path)?;
        }
        Ok(())
    }
}

fn lock(config: &AcquireConfig, dir: &Path) -> Result<Option<DirLock>> {
    if config.no_locking {
        return Ok(None);
    }
    DirLock::acquire(dir).map(Some).map_err(AcquireError::Lock)
}

/// Delete archives in the download directory and its `partial/` that the
/// cache can no longer provide.
pub fn auto_clean(config: &AcquireConfig, console: &dyn Console, cache: &dyn PackageCache) -> Result<()> {
    let archives = &config.dirs.archives;
    if !archives.exists() {
        return Ok(());
    }

    let _lock = lock(config, archives)?;
    let cleaner = ArchiveCleaner::new(cache, config);
    let mut eraser = LogEraser::new(console, config.simulate);

    cleaner.go(archives, &mut eraser)?;
    cleaner.go(&archives.join(PARTIAL), &mut eraser)
}

/// Empty the download caches and drop the binary package caches.
pub fn clean(config: &AcquireConfig, console: &dyn Console) -> Result<()> {
    let dirs = &config.dirs;
    if config.simulate {
        console.print(&format!(
            "Del {} {}",
            dirs.archives.join("*").display(),
            dirs.archives.join(PARTIAL).join("*").display()
        ));
        console.print(&format!("Del {}", dirs.lists.join(PARTIAL).join("*").display()));
        console.print(&format!("Del {} {}", dirs.pkgcache.display(), dirs.srcpkgcache.display()));
        return Ok(());
    }

    let keep = [DirLock::FILE_NAME, PARTIAL, LOST_FOUND];
    if dirs.archives.is_dir() {
        let _lock = lock(config, &dirs.archives)?;
        let mut removed = pulith_fs::clear_dir(&dirs.archives, &keep)?;
        removed.extend(clear_if_present(&dirs.archives.join(PARTIAL), &keep)?);
        tracing::info!(count = removed.len(), dir = %dirs.archives.display(), "cleaned archives");
    }

    if dirs.lists.is_dir() {
        let _lock = lock(config, &dirs.lists)?;
        let removed = clear_if_present(&dirs.lists.join(PARTIAL), &keep)?;
        tracing::info!(count = removed.len(), dir = %dirs.lists.display(), "cleaned partial lists");
    }

    for cache in [&dirs.pkgcache, &dirs.srcpkgcache] {
        if cache.is_file() {
            pulith_fs::remove_file(cache)?;
        }
    }
    Ok(())
}

fn clear_if_present(dir: &Path, keep: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    Ok(pulith_fs::clear_dir(dir, keep)?)
}
