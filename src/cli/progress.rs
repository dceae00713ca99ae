//! Shared CLI progress callback

use crate::cli::style::{Stylize, check, cross, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use eva_sub_cli::submit::{ProgressCallback, SubmissionState, TransferStatus};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress callback that prints to stdout
///
/// Shows one line per completed step and a spinner while a file uploads.
#[derive(Default)]
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    fn finish_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_state(&self, state: SubmissionState) {
        match state {
            SubmissionState::NotStarted | SubmissionState::Done => {}
            SubmissionState::Uploading => println!("{state}..."),
            _ => println!("{} {state}", check()),
        }
    }

    async fn on_submission_id(&self, submission_id: &str) {
        println!("  {} {}", "Submission ID:".muted(), submission_id.accent());
    }

    async fn on_transfer(&self, file: &str, status: TransferStatus) {
        match status {
            TransferStatus::Started => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(spinner_style());
                spinner.set_message(format!("Uploading {file}..."));
                spinner.enable_steady_tick(Duration::from_millis(80));
                if let Ok(mut slot) = self.spinner.lock() {
                    *slot = Some(spinner);
                }
            }
            TransferStatus::Completed => {
                self.finish_spinner();
                println!("  {} {}", check(), file.accent());
            }
            TransferStatus::Failed(msg) => {
                self.finish_spinner();
                eprintln!("  {} {file}: {msg}", cross());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_spinner_clears_slot() {
        let progress = CliProgress::default();
        *progress.spinner.lock().unwrap() = Some(ProgressBar::hidden());

        progress.finish_spinner();
        assert!(progress.spinner.lock().unwrap().is_none());

        // nothing to finish
        progress.finish_spinner();
        assert!(progress.spinner.lock().unwrap().is_none());
    }
}
