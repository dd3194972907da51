use crate::core::config::FetchConfig;
use crate::error::{FetchError, Result};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// curl's "failed writing received data" status, raised when the reader
/// stops consuming before the transfer ends.
const CURL_WRITE_ERROR: i32 = 23;
/// curl's status for `--fail` on an HTTP error response.
const CURL_HTTP_ERROR: i32 = 22;

/// Something that can stream a remote resource into a consumer.
pub trait ArchiveSource {
    fn stream(
        &self,
        url: &str,
        consume: &mut dyn FnMut(&mut dyn Read) -> Result<()>,
    ) -> Result<()>;
}

/// Streams a URL through a child `curl` process.
pub struct CurlSource {
    program: PathBuf,
    user_agent: String,
    strict_status: bool,
}

impl CurlSource {
    pub fn new<P: Into<PathBuf>>(program: P, user_agent: &str, strict_status: bool) -> Self {
        Self {
            program: program.into(),
            user_agent: user_agent.to_string(),
            strict_status,
        }
    }

    /// Resolves the configured curl executable on `PATH`.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let program = which::which(&config.curl).map_err(|_| FetchError::ToolNotFound {
            name: config.curl.display().to_string(),
        })?;
        tracing::debug!(curl = %program.display(), "resolved curl");
        Ok(Self::new(program, &config.user_agent, config.strict_status))
    }

    fn command(&self, url: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-L") // Follow redirects
            .arg("-s") // Silent
            .arg("-S") // ...but still report errors
            .arg("-H")
            .arg(format!("User-Agent: {}", self.user_agent));
        if self.strict_status {
            command.arg("-f");
        }
        command
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        command
    }
}

impl ArchiveSource for CurlSource {
    fn stream(
        &self,
        url: &str,
        consume: &mut dyn FnMut(&mut dyn Read) -> Result<()>,
    ) -> Result<()> {
        tracing::info!("Downloading from {url}");

        let mut child = self.command(url).spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FetchError::ToolNotFound {
                name: self.program.display().to_string(),
            },
            _ => FetchError::from(e),
        })?;

        let consumed = match child.stdout.take() {
            Some(mut stdout) => consume(&mut stdout),
            None => Err(FetchError::archive_format("curl produced no output stream")),
        };
        // stdout is dropped here, so an early-stopping consumer unblocks curl.
        let status = child.wait()?;

        let curl_error = match status.code() {
            Some(0) => None,
            Some(CURL_HTTP_ERROR) if self.strict_status => Some(FetchError::HttpStatus {
                url: url.to_string(),
            }),
            Some(CURL_WRITE_ERROR) if consumed.is_err() => None,
            Some(code) => Some(FetchError::Network {
                url: url.to_string(),
                code,
            }),
            None => Some(FetchError::Network {
                url: url.to_string(),
                code: signal_exit_code(&status),
            }),
        };

        match (curl_error, consumed) {
            (Some(err), Err(consume_err)) => {
                tracing::debug!("extraction also failed: {consume_err}");
                Err(err)
            }
            (Some(err), Ok(())) => Err(err),
            (None, result) => result,
        }
    }
}

/// Shell-style status for a child killed by a signal: 128 + signal number.
#[cfg(unix)]
fn signal_exit_code(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal).unwrap_or(1)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: &std::process::ExitStatus) -> i32 {
    1
}
