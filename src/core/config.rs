use crate::core::version::{self, DEFAULT_VERSION};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub version: String,
    pub work_dir: PathBuf,
    pub curl: PathBuf,
    pub user_agent: String,
    /// Fail on non-2xx responses instead of handing the body to the extractor.
    pub strict_status: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

impl FetchConfig {
    pub fn new<S: Into<String>>(version: S) -> Self {
        FetchConfig {
            version: version.into(),
            work_dir: PathBuf::from("."),
            curl: PathBuf::from("curl"),
            user_agent: format!("hgfetch/{}", env!("CARGO_PKG_VERSION")),
            strict_status: false,
        }
    }

    pub fn with_work_dir<P: Into<PathBuf>>(mut self, work_dir: P) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn with_curl<P: Into<PathBuf>>(mut self, curl: P) -> Self {
        self.curl = curl.into();
        self
    }

    pub fn with_strict_status(mut self, strict_status: bool) -> Self {
        self.strict_status = strict_status;
        self
    }

    pub fn url(&self) -> String {
        version::archive_url(&self.version)
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn source_dir(&self) -> PathBuf {
        self.work_dir.join(version::source_dir_name(&self.version))
    }

    pub fn dest_dir(&self) -> PathBuf {
        self.work_dir.join(version::dest_dir_name())
    }
}
