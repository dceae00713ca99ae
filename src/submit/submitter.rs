//! End-to-end submission: verify directory, authenticate, initiate, persist, upload

use crate::auth::AuthSession;
use crate::error::{Error, Result};
use crate::submit::progress::{NoopProgress, ProgressCallback, SubmissionState, TransferStatus};
use crate::submit::store::SubmissionConfig;
use crate::submit::transfer::{FileUploader, RetryPolicy, display_name};
use reqwest::Client;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitiateResponse {
    submission_id: String,
    upload_url: String,
}

/// Files making up one submission
///
/// Upload order is fixed: every VCF file in the given order, then the
/// metadata file, so a submission never looks complete before its data is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFiles {
    /// VCF payloads
    pub vcf_files: Vec<PathBuf>,
    /// Metadata spreadsheet or JSON
    pub metadata_file: PathBuf,
}

impl SubmissionFiles {
    /// Files in upload order
    pub fn upload_order(&self) -> impl Iterator<Item = &Path> {
        self.vcf_files
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.metadata_file.as_path()))
    }
}

/// Drives a study submission against the EVA submission service
pub struct StudySubmitter<'a> {
    session: &'a AuthSession,
    client: Client,
    initiate_url: String,
    uploader: FileUploader,
    files: SubmissionFiles,
    progress: &'a dyn ProgressCallback,
    state: SubmissionState,
}

impl<'a> StudySubmitter<'a> {
    /// Create a submitter using the default retry policy
    pub fn new(
        session: &'a AuthSession,
        client: Client,
        initiate_url: impl Into<String>,
        files: SubmissionFiles,
    ) -> Self {
        Self {
            session,
            uploader: FileUploader::new(client.clone(), RetryPolicy::default()),
            client,
            initiate_url: initiate_url.into(),
            files,
            progress: &NoopProgress,
            state: SubmissionState::NotStarted,
        }
    }

    /// Use `policy` for file uploads
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.uploader = FileUploader::new(self.client.clone(), policy);
        self
    }

    /// Report progress to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: &'a dyn ProgressCallback) -> Self {
        self.progress = progress;
        self
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    async fn advance(&mut self, state: SubmissionState) {
        debug!(from = %self.state, to = %state, "submission state change");
        self.state = state;
        self.progress.on_state(state).await;
    }

    /// Create `dir` if needed and check that it is writable
    ///
    /// Runs before any network call so local mistakes fail fast.
    pub fn verify_submission_dir(dir: &Path) -> Result<()> {
        if !dir.exists() {
            debug!(dir = %dir.display(), "creating submission directory");
            std::fs::create_dir_all(dir)?;
        }
        if std::fs::metadata(dir)?.permissions().readonly() {
            return Err(Error::Permission(dir.to_path_buf()));
        }

        let check_file = dir.join(format!(".eva-sub-cli-write-check-{}", std::process::id()));
        match OpenOptions::new().write(true).create_new(true).open(&check_file) {
            Ok(_) => {
                std::fs::remove_file(&check_file)?;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Err(Error::Permission(dir.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run a full submission in `dir`
    ///
    /// Nothing is written to `dir` unless the initiate call succeeds.
    pub async fn submit(&mut self, dir: &Path) -> Result<SubmissionConfig> {
        Self::verify_submission_dir(dir)?;
        self.advance(SubmissionState::DirectoryVerified).await;

        let token = self.session.token().await?;
        self.advance(SubmissionState::Authenticated).await;

        let initiated = self.initiate(&token).await?;
        info!("Submission ID {} received!!", initiated.submission_id);
        self.progress.on_submission_id(&initiated.submission_id).await;
        self.advance(SubmissionState::Initiated).await;

        let config = SubmissionConfig::save(dir, &initiated.submission_id, &initiated.upload_url)?;
        self.advance(SubmissionState::ConfigPersisted).await;

        self.upload_submission(dir, Some(&config.submission_upload_url))
            .await?;
        Ok(config)
    }

    /// Upload every file, recovering the upload URL from `dir` if not given
    ///
    /// Resuming this way neither authenticates nor initiates, so the
    /// submission keeps its id.
    pub async fn upload_submission(&mut self, dir: &Path, upload_url: Option<&str>) -> Result<()> {
        let upload_url = match upload_url {
            Some(url) => url.to_string(),
            None => {
                let config = SubmissionConfig::load(dir)?;
                info!(submission_id = %config.submission_id, "resuming upload");
                config.submission_upload_url
            }
        };

        self.advance(SubmissionState::Uploading).await;
        let files = self.files.clone();
        for path in files.upload_order() {
            self.upload_file(&upload_url, path).await?;
        }
        self.advance(SubmissionState::Done).await;
        Ok(())
    }

    async fn upload_file(&self, upload_url: &str, path: &Path) -> Result<()> {
        let display = display_name(path);
        let name = display.as_str();
        self.progress.on_transfer(name, TransferStatus::Started).await;
        match self.uploader.upload(upload_url, path).await {
            Ok(()) => {
                self.progress
                    .on_transfer(name, TransferStatus::Completed)
                    .await;
                Ok(())
            }
            Err(e) => {
                self.progress
                    .on_transfer(name, TransferStatus::Failed(e.to_string()))
                    .await;
                Err(e)
            }
        }
    }

    async fn initiate(&self, token: &str) -> Result<InitiateResponse> {
        debug!(url = %self.initiate_url, "initiating submission");
        let response = self
            .client
            .post(&self.initiate_url)
            .header("Accept", "application/hal+json")
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Initiate(format!(
                "initiate endpoint returned {status}: {}",
                body.trim()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Initiate(format!("malformed initiate response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_order_puts_metadata_last() {
        let files = SubmissionFiles {
            vcf_files: vec![PathBuf::from("b.vcf"), PathBuf::from("a.vcf")],
            metadata_file: PathBuf::from("metadata.xlsx"),
        };
        let order: Vec<&Path> = files.upload_order().collect();
        assert_eq!(
            order,
            vec![
                Path::new("b.vcf"),
                Path::new("a.vcf"),
                Path::new("metadata.xlsx")
            ]
        );
    }

    #[test]
    fn test_verify_creates_missing_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("submission");
        StudySubmitter::verify_submission_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // write-check file is cleaned up
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_verify_read_only_dir() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("locked");
        std::fs::create_dir(&dir).unwrap();
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();

        let result = StudySubmitter::verify_submission_dir(&dir);
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(Error::Permission(p)) if p == dir));
    }
}
