use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove {}: {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("could not get lock {}: {source}", .path.display())]
    Lock { path: PathBuf, source: io::Error },

    #[error("couldn't determine free space in {}: {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },

    /// The filesystem counts do not fit the stat structure (`EOVERFLOW`).
    #[error("couldn't determine free space in {}: value too large", .path.display())]
    Overflow { path: PathBuf },

    #[error("filesystem statistics are not supported on this platform")]
    Unsupported,
}

impl Error {
    pub fn is_overflow(&self) -> bool { matches!(self, Self::Overflow { .. }) }
}

pub type Result<T> = std::result::Result<T, Error>;
