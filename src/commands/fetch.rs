use crate::core::{config::FetchConfig, download::ArchiveSource, extract, version};
use crate::error::{FetchError, Result};
use crate::utils::fs;
use std::path::PathBuf;

/// Downloads the configured release, unpacks it into the working directory
/// and renames it to `mercurial-devel`. Returns the final directory.
///
/// Nothing is cleaned up on failure: a partially unpacked
/// `mercurial-devel-{version}` is left behind for inspection.
pub fn fetch(config: &FetchConfig, source: &dyn ArchiveSource) -> Result<PathBuf> {
    version::validate_version(&config.version)?;

    let url = config.url();
    let source_dir = config.source_dir();
    let dest_dir = config.dest_dir();

    // Refuse before downloading anything
    fs::ensure_absent(&dest_dir)?;

    tracing::info!("Fetching mercurial-devel {}", config.version);
    source.stream(&url, &mut |reader| {
        extract::extract_tar_gz(reader, config.work_dir()).map(|_| ())
    })?;

    if !source_dir.is_dir() {
        return Err(FetchError::archive_format(format!(
            "archive did not contain {}",
            version::source_dir_name(&config.version)
        )));
    }

    fs::rename_dir(&source_dir, &dest_dir)?;
    tracing::info!("Unpacked into {}", dest_dir.display());

    Ok(dest_dir)
}
