use crate::permissions::PermissionMode;
use crate::{Error, Result};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default)]
pub struct CopyOptions {
    permissions: PermissionMode,
}

impl CopyOptions {
    pub fn new() -> Self { Self::default() }

    pub fn permissions(mut self, mode: PermissionMode) -> Self {
        self.permissions = mode;
        self
    }
}

/// Copy a single file, then apply the requested permissions to the copy.
///
/// Returns the number of bytes copied.
pub fn copy_file(src: impl AsRef<Path>, dest: impl AsRef<Path>, options: CopyOptions) -> Result<u64> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if !src.is_file() {
        return Err(Error::Read {
            path:   src.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    let copied = std::fs::copy(src, dest).map_err(|e| Error::Write {
        path:   dest.to_path_buf(),
        source: e,
    })?;

    options.permissions.apply_to_path(dest)?;

    Ok(copied)
}
