//! LS-RI device-code authentication
//!
//! The client only runs the first half of the OIDC device flow. The token
//! exchange, which needs the LS-RI client secret, is delegated to the EVA
//! submission web service: it blocks until the operator has authorized the
//! device or the device code expires.

use crate::auth::{CredentialProvider, Prompter};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const PROVIDER: &str = "LSRI";

/// Device authorization response (RFC 8628 section 3.2)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceAuthorization {
    /// Code the exchange endpoint trades for a token
    pub device_code: String,
    /// Code the operator types at the verification URI
    pub user_code: String,
    /// Where the operator authorizes the device
    pub verification_uri: String,
    /// Lifetime of the device code in seconds
    pub expires_in: u64,
}

/// Device-code login through Life Science Research Infrastructure
pub struct LsriAuth {
    client: Client,
    client_id: String,
    device_authorization_url: String,
    auth_url: String,
    prompter: Arc<dyn Prompter>,
    token: OnceCell<String>,
}

impl LsriAuth {
    /// Create a provider
    ///
    /// `auth_url` is the EVA endpoint that performs the device-code exchange.
    pub fn new(
        client: Client,
        client_id: impl Into<String>,
        device_authorization_url: impl Into<String>,
        auth_url: impl Into<String>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            client,
            client_id: client_id.into(),
            device_authorization_url: device_authorization_url.into(),
            auth_url: auth_url.into(),
            prompter,
            token: OnceCell::new(),
        }
    }

    /// Step 1: obtain a device code
    pub async fn request_device_code(&self) -> Result<DeviceAuthorization> {
        debug!(url = %self.device_authorization_url, "requesting device code");
        let response = self
            .client
            .post(&self.device_authorization_url)
            .form(&[("client_id", self.client_id.as_str()), ("scope", "openid")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::auth(
                PROVIDER,
                format!("device authorization endpoint returned {status}"),
            ));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::auth(
                PROVIDER,
                format!("malformed device authorization response: {e}"),
            )
        })
    }

    /// Step 3: let the EVA web service exchange the device code for a token
    ///
    /// The request is bounded by the device code lifetime.
    pub async fn exchange(&self, authorization: &DeviceAuthorization) -> Result<String> {
        let expires_in = authorization.expires_in.to_string();
        debug!(url = %self.auth_url, expires_in = authorization.expires_in, "waiting for device authorization");
        let response = self
            .client
            .post(&self.auth_url)
            .timeout(Duration::from_secs(authorization.expires_in))
            .header("Accept", "application/hal+json")
            .query(&[
                ("deviceCode", authorization.device_code.as_str()),
                ("expiresIn", expires_in.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::auth(PROVIDER, format!("token exchange returned {status}")));
        }
        Ok(response.text().await?)
    }

    async fn authenticate(&self) -> Result<String> {
        info!("Proceeding with LSRI authentication...");
        let authorization = self.request_device_code().await?;
        self.prompter
            .device_code(&authorization.verification_uri, &authorization.user_code);

        let token = self.exchange(&authorization).await?;
        info!("LSRI authentication successful!");
        Ok(token)
    }
}

#[async_trait]
impl CredentialProvider for LsriAuth {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn token(&self) -> Result<String> {
        self.token
            .get_or_try_init(|| self.authenticate())
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_authorization_parses_extra_fields() {
        let auth: DeviceAuthorization = serde_json::from_str(
            r#"{"device_code":"dc","user_code":"UC-1","verification_uri":"https://login/device","expires_in":600,"interval":5}"#,
        )
        .unwrap();
        assert_eq!(auth.user_code, "UC-1");
        assert_eq!(auth.expires_in, 600);
    }

    #[test]
    fn test_device_authorization_missing_key_is_named() {
        let err = serde_json::from_str::<DeviceAuthorization>(
            r#"{"device_code":"dc","verification_uri":"https://login/device","expires_in":600}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("user_code"));
    }
}
