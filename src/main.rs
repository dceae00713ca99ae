//! eva-sub - submit VCF studies to the European Variation Archive
//!
//! CLI binary for authenticating, initiating submissions and uploading files.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use eva_sub_cli::auth::{AuthMethod, AuthSession};
use eva_sub_cli::config::Endpoints;
use eva_sub_cli::http::build_client;
use eva_sub_cli::submit::{RetryPolicy, SubmissionFiles};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "eva-sub")]
#[command(about = "Submit VCF studies to the European Variation Archive")]
#[command(version)]
struct Cli {
    /// Endpoint config file (defaults to <config dir>/eva-sub-cli/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Authentication method (asked interactively when omitted)
    #[arg(long, global = true, value_enum)]
    auth: Option<AuthChoice>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initiate a new submission and upload its files
    Submit {
        #[command(flatten)]
        files: FileArgs,
    },

    /// Upload files of an already initiated submission
    Upload {
        #[command(flatten)]
        files: FileArgs,

        /// Upload URL (read from the submission directory when omitted)
        #[arg(long)]
        upload_url: Option<String>,
    },

    /// Check that authentication works
    Auth,
}

#[derive(clap::Args)]
struct FileArgs {
    /// Working directory holding the submission config
    #[arg(long, short = 'd')]
    submission_dir: PathBuf,

    /// Metadata file, uploaded after all VCF files
    #[arg(long, short = 'm')]
    metadata_file: PathBuf,

    /// VCF files to upload
    #[arg(required = true)]
    vcf_files: Vec<PathBuf>,
}

impl FileArgs {
    fn split(self) -> (PathBuf, SubmissionFiles) {
        (
            self.submission_dir,
            SubmissionFiles {
                vcf_files: self.vcf_files,
                metadata_file: self.metadata_file,
            },
        )
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AuthChoice {
    /// ENA Webin username and password
    Webin,
    /// LS-RI device-code login
    Lsri,
}

impl From<AuthChoice> for AuthMethod {
    fn from(choice: AuthChoice) -> Self {
        match choice {
            AuthChoice::Webin => Self::Webin,
            AuthChoice::Lsri => Self::Lsri,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "eva_sub_cli=debug"
    } else {
        "eva_sub_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let endpoints = Endpoints::load(cli.config.as_deref())?;
    let client = build_client()?;

    let mut session = AuthSession::new(
        client.clone(),
        endpoints.clone(),
        Arc::new(cli::TerminalPrompter),
    );
    if let Some(choice) = cli.auth {
        session = session.with_method(choice.into());
    }

    let ctx = cli::SubmitContext {
        session: &session,
        client,
        initiate_url: &endpoints.initiate_url,
        retry: RetryPolicy::default(),
    };

    match cli.command {
        Commands::Submit { files } => {
            let (dir, files) = files.split();
            cli::run_submit(&ctx, &dir, files).await?;
        }
        Commands::Upload { files, upload_url } => {
            let (dir, files) = files.split();
            cli::run_upload(&ctx, &dir, files, upload_url.as_deref()).await?;
        }
        Commands::Auth => cli::run_auth(&session).await?,
    }

    Ok(())
}
