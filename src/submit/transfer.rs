//! Single-file upload with bounded retry

use crate::error::{Error, Result};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Body, Client};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Retry schedule for uploads
///
/// The first attempt runs immediately. Before attempt `n` (n >= 2) the policy
/// waits `initial_delay * backoff^(n - 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait before the second attempt
    pub initial_delay: Duration,
    /// Multiplier applied to the wait after every retry
    pub backoff: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(10),
            backoff: 5,
        }
    }
}

/// Returned when every attempt failed
#[derive(Debug)]
pub struct Exhausted {
    /// Attempts made
    pub attempts: u32,
    /// Error from the final attempt
    pub last_error: Error,
}

impl RetryPolicy {
    /// Policy that never waits, for tests and scripted runs
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            backoff: 1,
        }
    }

    /// Wait before `attempt` (1-based); zero for the first attempt
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        self.initial_delay
            .saturating_mul(self.backoff.saturating_pow(attempt - 2))
    }

    /// Every wait the policy may perform, in order
    pub fn schedule(&self) -> Vec<Duration> {
        (2..=self.attempts()).map(|a| self.delay_before(a)).collect()
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Run `operation` until it succeeds or attempts run out
    ///
    /// The closure receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> std::result::Result<T, Exhausted>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.attempts();
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => {
                    return Err(Exhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }
                Err(e) => {
                    let delay = self.delay_before(attempt + 1);
                    warn!(attempt, max_attempts = attempts, error = %e, ?delay, "attempt failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// `base` joined with `file_name`, using URL join rules
pub fn destination_url(base: &str, file_name: &str) -> Result<Url> {
    let base = Url::parse(base).map_err(|e| Error::Config(format!("invalid upload URL '{base}': {e}")))?;
    base.join(file_name)
        .map_err(|e| Error::Config(format!("cannot address '{file_name}' under {base}: {e}")))
}

/// Base name of `path` as UTF-8
pub fn base_name(path: &Path) -> Result<&str> {
    path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{}' has no usable file name", path.display()),
        ))
    })
}

/// Base name of `path` for messages, lossy when it is not UTF-8
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Uploads local files with HTTP PUT
#[derive(Debug, Clone)]
pub struct FileUploader {
    client: Client,
    policy: RetryPolicy,
}

impl FileUploader {
    /// Create an uploader
    pub const fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Upload `path` to `base_url` + its base name
    ///
    /// Each attempt re-opens the file and streams all of it.
    /// A name that cannot be sent is a `Transfer` error with zero attempts.
    pub async fn upload(&self, base_url: &str, path: &Path) -> Result<()> {
        let name = base_name(path).map_err(|e| Error::Transfer {
            file: display_name(path),
            attempts: 0,
            source: Box::new(e),
        })?;
        let url = destination_url(base_url, name)?;

        info!("Transfer {name} to EVA FTP");
        self.policy
            .run(|attempt| self.put_once(&url, path, attempt))
            .await
            .map_err(|exhausted| Error::Transfer {
                file: name.to_string(),
                attempts: exhausted.attempts,
                source: Box::new(exhausted.last_error),
            })?;
        info!("Upload of {name} completed");
        Ok(())
    }

    async fn put_once(&self, url: &Url, path: &Path, attempt: u32) -> Result<()> {
        let file = tokio::fs::File::open(path).await?;
        let len = file.metadata().await?.len();
        debug!(%url, bytes = len, attempt, "PUT");
        let response = self
            .client
            .put(url.clone())
            .header(CONTENT_LENGTH, len)
            .body(Body::from(file))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UploadStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }
}
