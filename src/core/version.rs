use crate::error::{FetchError, Result};

/// Release fetched when no override is given.
pub const DEFAULT_VERSION: &str = "6.7.2";

const ARCHIVE_HOST: &str = "https://foss.heptapod.net";
const PROJECT_PATH: &str = "mercurial/mercurial-devel";
const PROJECT_NAME: &str = "mercurial-devel";

/// Directory name the archive unpacks to, e.g. `mercurial-devel-6.7.2`.
pub fn source_dir_name(version: &str) -> String {
    format!("{PROJECT_NAME}-{version}")
}

/// Canonical directory name after the rename.
pub fn dest_dir_name() -> &'static str {
    PROJECT_NAME
}

pub fn archive_url(version: &str) -> String {
    format!(
        "{ARCHIVE_HOST}/{PROJECT_PATH}/-/archive/{version}/{}.tar.gz",
        source_dir_name(version)
    )
}

/// The version is spliced verbatim into a URL path segment and a directory
/// name, so only characters that need no escaping in either are accepted.
pub fn validate_version(version: &str) -> Result<()> {
    let invalid = || FetchError::InvalidVersion {
        version: version.to_string(),
    };

    if version.is_empty() || version.contains("..") {
        return Err(invalid());
    }

    if !version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
    {
        return Err(invalid());
    }

    Ok(())
}
