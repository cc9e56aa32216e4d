//! Error types for pulith-acquire.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AcquireError>;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("Some packages could not be authenticated")]
    Unauthenticated,

    #[error("There were unauthenticated packages and -y was used without --allow-unauthenticated")]
    UnauthenticatedAssumeYes,

    #[error("Some packages are not reproducible")]
    Unreproducible,

    #[error("There were unreproducible packages and -y was used without --allow-unreproducible")]
    UnreproducibleAssumeYes,

    #[error("Could not update reproducible cache")]
    FeedRefresh(#[source] pulith_platform::Error),

    #[error("Could not check source package name")]
    SourceLookup(#[source] pulith_platform::Error),

    #[error("Could not filter reproducible status")]
    StatusFilter(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid package name: {0:?}")]
    InvalidPackageName(String),

    #[error("Couldn't determine free space in {}", .dir.display())]
    FreeSpaceUnknown {
        dir:    PathBuf,
        #[source]
        source: pulith_fs::Error,
    },

    #[error("You don't have enough free space in {}.", .dir.display())]
    InsufficientSpace { dir: PathBuf },

    #[error("Unable to lock the download directory")]
    Lock(#[source] pulith_fs::Error),

    #[error("fetch run failed")]
    RunFailed,

    #[error("failed to fetch {count} item(s)")]
    FetchFailed { count: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error(transparent)]
    Fs(#[from] pulith_fs::Error),

    #[error(transparent)]
    Platform(#[from] pulith_platform::Error),
}

impl AcquireError {
    /// Whether this is a gate refusing to proceed rather than a failure of
    /// the machinery.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated
                | Self::UnauthenticatedAssumeYes
                | Self::Unreproducible
                | Self::UnreproducibleAssumeYes
        )
    }
}

impl From<figment::Error> for AcquireError {
    fn from(e: figment::Error) -> Self { Self::Config(Box::new(e)) }
}
