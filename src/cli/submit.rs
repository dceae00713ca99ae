//! Submit and upload commands

use crate::cli::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::println;
use anyhow::{Context, Result, bail};
use eva_sub_cli::auth::AuthSession;
use eva_sub_cli::submit::{RetryPolicy, StudySubmitter, SubmissionFiles};
use reqwest::Client;
use std::path::Path;

/// Everything a submit/upload run needs
pub struct SubmitContext<'a> {
    /// Authentication for this run
    pub session: &'a AuthSession,
    /// Shared HTTP client
    pub client: Client,
    /// Submission initiate endpoint
    pub initiate_url: &'a str,
    /// Upload retry schedule
    pub retry: RetryPolicy,
}

/// Fail before any network call if an input file is missing
fn check_inputs(files: &SubmissionFiles) -> Result<()> {
    for path in files.upload_order() {
        if !path.is_file() {
            bail!("Input file not found: {}", path.display());
        }
    }
    Ok(())
}

/// Run the submit command
pub async fn run_submit(ctx: &SubmitContext<'_>, dir: &Path, files: SubmissionFiles) -> Result<()> {
    check_inputs(&files)?;
    let count = files.vcf_files.len() + 1;

    let progress = CliProgress::default();
    let mut submitter = StudySubmitter::new(ctx.session, ctx.client.clone(), ctx.initiate_url, files)
        .with_retry_policy(ctx.retry)
        .with_progress(&progress);

    let result = submitter.submit(dir).await;
    let config = result.with_context(|| {
        format!(
            "Submission failed during {}",
            submitter.state().next_step()
        )
    })?;

    println!();
    println!(
        "{} Submitted {} as {}",
        check(),
        plural(count, "file"),
        config.submission_id.accent()
    );
    Ok(())
}

/// Run the upload command (resume an initiated submission)
pub async fn run_upload(
    ctx: &SubmitContext<'_>,
    dir: &Path,
    files: SubmissionFiles,
    upload_url: Option<&str>,
) -> Result<()> {
    check_inputs(&files)?;
    let count = files.vcf_files.len() + 1;

    let progress = CliProgress::default();
    let mut submitter = StudySubmitter::new(ctx.session, ctx.client.clone(), ctx.initiate_url, files)
        .with_retry_policy(ctx.retry)
        .with_progress(&progress);

    submitter
        .upload_submission(dir, upload_url)
        .await
        .context("Upload failed")?;

    println!();
    println!("{} Uploaded {}", check(), plural(count, "file"));
    Ok(())
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
