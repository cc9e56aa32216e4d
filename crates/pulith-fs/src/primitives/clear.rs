use crate::{Error, Result};
use std::path::{Path, PathBuf};

pub fn remove_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::remove_file(path).map_err(|e| Error::Remove {
        path:   path.to_path_buf(),
        source: e,
    })
}

/// Remove every regular file directly inside `dir` whose name is not in `keep`.
///
/// Subdirectories are left alone. Returns the removed paths.
pub fn clear_dir(dir: impl AsRef<Path>, keep: &[&str]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| Error::Read {
        path:   dir.to_path_buf(),
        source: e,
    })?;

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::Read {
            path:   dir.to_path_buf(),
            source: e,
        })?;

        let name = entry.file_name();
        if keep.iter().any(|k| name == **k) {
            continue;
        }

        let path = entry.path();
        let ty = entry.file_type().map_err(|e| Error::Read {
            path:   path.clone(),
            source: e,
        })?;
        if ty.is_dir() {
            continue;
        }

        remove_file(&path)?;
        removed.push(path);
    }

    removed.sort();
    Ok(removed)
}
