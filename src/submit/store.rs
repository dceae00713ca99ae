//! Submission config persisted in the working directory
//!
//! One YAML file per submission directory records the submission id and the
//! upload URL handed out by the initiate call, so an interrupted upload can be
//! resumed without initiating a new submission.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the submission config inside a submission directory
pub const SUBMISSION_CONFIG_FILE: &str = ".eva-sub-cli-config.yml";

/// Identity of an initiated submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Identifier assigned by the submission service
    pub submission_id: String,
    /// Base URL that files are PUT under
    pub submission_upload_url: String,
}

impl SubmissionConfig {
    /// Config file path for `dir`
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(SUBMISSION_CONFIG_FILE)
    }

    /// Write (or overwrite) the config for `dir`
    pub fn save(dir: &Path, submission_id: &str, upload_url: &str) -> Result<Self> {
        let config = Self {
            submission_id: submission_id.to_string(),
            submission_upload_url: upload_url.to_string(),
        };
        config.write(dir)?;
        Ok(config)
    }

    /// Write this config into `dir`
    pub fn write(&self, dir: &Path) -> Result<()> {
        let path = Self::path(dir);
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("cannot serialize submission config: {e}")))?;
        std::fs::write(&path, yaml)?;
        debug!(path = %path.display(), submission_id = %self.submission_id, "saved submission config");
        Ok(())
    }

    /// Read the config for `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path(dir);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound(dir.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_yaml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}
