//! Filesystem primitives for the acquire workflow: free-space probing,
//! directory locking and file placement.

mod error;
mod lock;
pub mod permissions;
pub mod primitives;
pub mod space;

pub use error::{Error, Result};
pub use lock::DirLock;
pub use permissions::PermissionMode;
pub use primitives::{CopyOptions, clear_dir, copy_file, remove_file};
pub use space::{FsStats, SpaceProbe, SystemProbe};
