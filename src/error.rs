use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid version: '{version}'")]
    InvalidVersion { version: String },

    #[error("Download failed: {url} (curl exited with status {code})")]
    Network { url: String, code: i32 },

    #[error("Server returned an error status for {url}")]
    HttpStatus { url: String },

    #[error("Extraction failed: {message}")]
    ArchiveFormat { message: String },

    #[error("Filesystem error at {path}: {message}")]
    Filesystem { path: PathBuf, message: String },

    #[error("Binary not found: {name}")]
    ToolNotFound { name: String },
}

impl FetchError {
    pub fn archive_format<S: Into<String>>(message: S) -> Self {
        FetchError::ArchiveFormat {
            message: message.into(),
        }
    }

    pub fn filesystem<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        FetchError::Filesystem {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Process exit status for this failure, mirroring the tool that would
    /// have failed in a plain `curl | tar && mv` pipeline.
    pub fn exit_code(&self) -> i32 {
        match self {
            FetchError::Network { code, .. } => *code,
            // curl -f
            FetchError::HttpStatus { .. } => 22,
            // GNU tar fatal error
            FetchError::ArchiveFormat { .. } => 2,
            FetchError::Filesystem { .. } | FetchError::Io(_) => 1,
            FetchError::ToolNotFound { .. } => 127,
            // EX_USAGE
            FetchError::InvalidVersion { .. } => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let network = FetchError::Network {
            url: "https://example.invalid/a.tar.gz".to_string(),
            code: 6,
        };
        assert_eq!(network.exit_code(), 6);
        assert_eq!(
            FetchError::HttpStatus {
                url: "https://example.invalid/a.tar.gz".to_string()
            }
            .exit_code(),
            22
        );
        assert_eq!(FetchError::archive_format("bad header").exit_code(), 2);
        assert_eq!(
            FetchError::InvalidVersion {
                version: "../x".to_string()
            }
            .exit_code(),
            64
        );
        assert_eq!(
            FetchError::filesystem("mercurial-devel", "already exists").exit_code(),
            1
        );
        assert_eq!(
            FetchError::ToolNotFound {
                name: "curl".to_string()
            }
            .exit_code(),
            127
        );
    }

    #[test]
    fn test_display_mentions_path() {
        let err = FetchError::filesystem("/tmp/x/mercurial-devel", "destination already exists");
        let text = err.to_string();
        assert!(text.contains("/tmp/x/mercurial-devel"));
        assert!(text.contains("already exists"));
    }
}
