//! Progress callback trait for interface-agnostic updates
//!
//! The submitter reports state changes and per-file transfer events here so
//! the CLI (or anything else) can render them.

use async_trait::async_trait;

/// Submission lifecycle state
///
/// A fresh submission walks the states in declaration order. Resuming an
/// upload jumps from `NotStarted` straight to `Uploading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing done yet
    NotStarted,
    /// Submission directory exists and is writable
    DirectoryVerified,
    /// Bearer token obtained
    Authenticated,
    /// Submission service assigned an id and upload URL
    Initiated,
    /// Id and upload URL written to the submission directory
    ConfigPersisted,
    /// Files are being transferred
    Uploading,
    /// All files transferred
    Done,
}

impl SubmissionState {
    /// Name of the step that runs after this state, for failure reports
    pub const fn next_step(self) -> &'static str {
        match self {
            Self::NotStarted => "submission directory check",
            Self::DirectoryVerified => "authentication",
            Self::Authenticated => "submission initiate",
            Self::Initiated => "saving submission config",
            Self::ConfigPersisted | Self::Uploading => "upload",
            Self::Done => "finish",
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "Not started"),
            Self::DirectoryVerified => write!(f, "Submission directory verified"),
            Self::Authenticated => write!(f, "Authenticated"),
            Self::Initiated => write!(f, "Submission initiated"),
            Self::ConfigPersisted => write!(f, "Submission config saved"),
            Self::Uploading => write!(f, "Uploading"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// Transfer status of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus {
    /// Upload started
    Started,
    /// Upload finished successfully
    Completed,
    /// Upload failed after all retries
    Failed(String),
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Completed => write!(f, "completed"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called on every state transition
    async fn on_state(&self, state: SubmissionState);

    /// Called when the service assigns a submission id
    async fn on_submission_id(&self, submission_id: &str);

    /// Called around each file transfer
    async fn on_transfer(&self, file: &str, status: TransferStatus);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_state(&self, _state: SubmissionState) {}
    async fn on_submission_id(&self, _submission_id: &str) {}
    async fn on_transfer(&self, _file: &str, _status: TransferStatus) {}
}
