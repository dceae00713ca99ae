//! Submission lifecycle
//!
//! A submission moves through:
//! 1. Directory check - the working directory exists and is writable
//! 2. Authentication - a bearer token from the chosen provider
//! 3. Initiate - the service assigns a submission id and upload URL
//! 4. Persist - both are saved in the working directory
//! 5. Upload - VCF files, then the metadata file, each with bounded retry
//!
//! An interrupted upload resumes from step 5 using the persisted config.

mod progress;
mod store;
mod submitter;
mod transfer;

pub use progress::{NoopProgress, ProgressCallback, SubmissionState, TransferStatus};
pub use store::{SUBMISSION_CONFIG_FILE, SubmissionConfig};
pub use submitter::{StudySubmitter, SubmissionFiles};
pub use transfer::{Exhausted, FileUploader, RetryPolicy, base_name, destination_url, display_name};
