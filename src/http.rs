//! Shared HTTP client construction

use crate::error::{Error, Result};
use reqwest::Client;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("eva-sub-cli/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by auth, initiate and upload calls
///
/// No global timeout: uploads of large VCF files can take a long time, and
/// the device-code exchange sets its own per-request timeout.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))
}
