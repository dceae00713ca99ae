//! Auth command - check credentials without starting a submission

use crate::cli::style::{Stylize, check};
use anstream::println;
use eva_sub_cli::auth::AuthSession;
use eva_sub_cli::error::Result;

/// Authenticate once and report which provider succeeded
pub async fn run_auth(session: &AuthSession) -> Result<()> {
    let provider = session.provider().await?;
    provider.token().await?;
    println!("{} Authenticated with {}", check(), provider.name().accent());
    Ok(())
}
