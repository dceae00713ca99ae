//! Test fixtures: endpoints, input files, recording progress

#![allow(dead_code)]

use async_trait::async_trait;
use eva_sub_cli::config::Endpoints;
use eva_sub_cli::submit::{ProgressCallback, SubmissionFiles, SubmissionState, TransferStatus};
use std::path::Path;
use std::sync::Mutex;

/// Endpoints pointing at a mock server
pub fn mock_endpoints(base: &str) -> Endpoints {
    Endpoints {
        webin_auth_url: format!("{base}/webin/auth/token"),
        lsri_auth_url: format!("{base}/eva/auth/lsri"),
        device_auth_url: format!("{base}/oidc/devicecode"),
        lsri_client_id: Some("test-client".to_string()),
        initiate_url: format!("{base}/eva/submission/initiate"),
    }
}

/// Two VCF files and a metadata file with distinct contents
pub fn write_inputs(dir: &Path) -> SubmissionFiles {
    let inputs = dir.join("inputs");
    std::fs::create_dir_all(&inputs).unwrap();
    let vcf1 = inputs.join("first.vcf");
    let vcf2 = inputs.join("second.vcf.gz");
    let metadata = inputs.join("metadata.xlsx");
    std::fs::write(&vcf1, "##fileformat=VCFv4.3\nfirst\n").unwrap();
    std::fs::write(&vcf2, "##fileformat=VCFv4.3\nsecond\n").unwrap();
    std::fs::write(&metadata, "metadata").unwrap();
    SubmissionFiles {
        vcf_files: vec![vcf1, vcf2],
        metadata_file: metadata,
    }
}

/// Event seen by [`RecordingProgress`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    State(SubmissionState),
    SubmissionId(String),
    Transfer(String, TransferStatus),
}

/// Progress callback that records every event in order
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn states(&self) -> Vec<SubmissionState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::State(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Files whose upload started, in order
    pub fn started_files(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Transfer(file, TransferStatus::Started) => Some(file),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_state(&self, state: SubmissionState) {
        self.events.lock().unwrap().push(Event::State(state));
    }

    async fn on_submission_id(&self, submission_id: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::SubmissionId(submission_id.to_string()));
    }

    async fn on_transfer(&self, file: &str, status: TransferStatus) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Transfer(file.to_string(), status));
    }
}
