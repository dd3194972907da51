use crate::error::{FetchError, Result};
use std::path::Path;

/// Fails if `path` already exists, without touching it.
pub fn ensure_absent(path: &Path) -> Result<()> {
    // symlink_metadata so a dangling link still counts as occupied
    if path.symlink_metadata().is_ok() {
        return Err(FetchError::filesystem(path, "destination already exists"));
    }
    Ok(())
}

/// Renames a directory, refusing to replace anything at `to`.
pub fn rename_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(FetchError::filesystem(from, "no such directory"));
    }
    ensure_absent(to)?;

    std::fs::rename(from, to).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => FetchError::filesystem(to, "permission denied"),
        _ => FetchError::filesystem(to, e.to_string()),
    })
}
