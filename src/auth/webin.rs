//! ENA Webin password authentication

use crate::auth::{CredentialProvider, Prompter};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const PROVIDER: &str = "ENA Webin";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WebinTokenRequest<'a> {
    auth_realms: [&'a str; 1],
    username: &'a str,
    password: &'a str,
}

/// Username/password login against the ENA Webin token endpoint
pub struct WebinAuth {
    client: Client,
    auth_url: String,
    prompter: Arc<dyn Prompter>,
    token: OnceCell<String>,
}

impl WebinAuth {
    /// Create a provider for `auth_url`
    pub fn new(client: Client, auth_url: impl Into<String>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            client,
            auth_url: auth_url.into(),
            prompter,
            token: OnceCell::new(),
        }
    }

    /// Whether a token has already been obtained
    pub fn is_authenticated(&self) -> bool {
        self.token.initialized()
    }

    async fn authenticate(&self) -> Result<String> {
        info!("Proceeding with ENA Webin authentication...");
        let username = self.prompter.input("Enter your ENA Webin username")?;
        let password = self.prompter.password("Enter your ENA Webin password")?;

        let body = WebinTokenRequest {
            auth_realms: ["ENA"],
            username: username.trim(),
            password: &password,
        };

        debug!(url = %self.auth_url, "requesting Webin token");
        let response = self
            .client
            .post(&self.auth_url)
            .header("accept", "*/*")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, "Webin token request rejected");
            return Err(Error::auth(PROVIDER, format!("token endpoint returned {status}")));
        }

        let token = response.text().await?;
        info!("Webin authentication successful!");
        Ok(token)
    }
}

#[async_trait]
impl CredentialProvider for WebinAuth {
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
