use crate::{Error, Result};
use std::path::Path;

/// File permission modes applied after placing a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionMode {
    /// Keep whatever the process umask produced.
    #[default]
    Inherit,

    /// On Unix: `0o444`. On Windows: the `readonly` attribute.
    ReadOnly,

    /// On Unix: `0o644`. On Windows: clears `readonly`.
    ReadWrite,

    /// Raw Unix mode bits; on Windows only the write bits are honoured.
    Custom(u32),
}

impl PermissionMode {
    pub fn to_unix_mode(self) -> Option<u32> {
        match self {
            Self::Inherit => None,
            Self::ReadOnly => Some(0o444),
            Self::ReadWrite => Some(0o644),
            Self::Custom(mode) => Some(mode),
        }
    }

    /// Apply the mode to an existing path.
    pub fn apply_to_path(self, path: &Path) -> Result<()> {
        let Some(mode) = self.to_unix_mode() else {
            return Ok(());
        };

        #[cfg(unix)]
        let perms = {
            use std::os::unix::fs::PermissionsExt;
            std::fs::Permissions::from_mode(mode)
        };

        #[cfg(not(unix))]
        let perms = {
            let mut perms = std::fs::metadata(path)
                .map_err(|e| Error::Write {
                    path:   path.to_path_buf(),
                    source: e,
                })?
                .permissions();
            perms.set_readonly(mode & 0o222 == 0);
            perms
        };

        std::fs::set_permissions(path, perms).map_err(|e| Error::Write {
            path:   path.to_path_buf(),
            source: e,
        })
    }
}
