//! Per-run choice of authentication method
//!
//! One [`AuthSession`] is built at process start and passed to whatever needs
//! a token. The first token request asks the operator which method to use;
//! the resulting provider (and its cached token) is kept for the rest of the
//! run and cannot be switched.
//!
//! The session assumes a single task drives it. Concurrent first use is
//! serialised by the inner cell but would still prompt from whichever task
//! wins.

use crate::auth::{AuthMethod, CredentialProvider, LsriAuth, Prompter, WebinAuth};
use crate::config::Endpoints;
use crate::error::{Error, Result};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Invalid menu answers tolerated before giving up
pub const MAX_SELECTION_ATTEMPTS: u32 = 3;

/// Authentication context for one process run
pub struct AuthSession {
    client: Client,
    endpoints: Endpoints,
    prompter: Arc<dyn Prompter>,
    method: Option<AuthMethod>,
    provider: OnceCell<Box<dyn CredentialProvider>>,
}

impl AuthSession {
    /// Create a session that asks the operator for a method on first use
    pub fn new(client: Client, endpoints: Endpoints, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            client,
            endpoints,
            prompter,
            method: None,
            provider: OnceCell::new(),
        }
    }

    /// Skip the menu and use `method`
    #[must_use]
    pub fn with_method(mut self, method: AuthMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Whether a provider has been chosen yet
    pub fn is_selected(&self) -> bool {
        self.provider.initialized()
    }

    /// The provider for this run, choosing one on first call
    pub async fn provider(&self) -> Result<&dyn CredentialProvider> {
        let provider = self
            .provider
            .get_or_try_init(|| async {
                let method = match self.method {
                    Some(method) => method,
                    None => self.choose_method()?,
                };
                self.build(method)
            })
            .await?;
        Ok(provider.as_ref())
    }

    /// Bearer token from the chosen provider
    pub async fn token(&self) -> Result<String> {
        self.provider().await?.token().await
    }

    fn choose_method(&self) -> Result<AuthMethod> {
        self.prompter.message("Choose an authentication method:");
        for (i, method) in AuthMethod::ALL.iter().enumerate() {
            self.prompter.message(&format!("{}. {method}", i + 1));
        }

        for attempt in 1..=MAX_SELECTION_ATTEMPTS {
            let answer = self
                .prompter
                .input("Enter the number corresponding to your choice")?;
            if let Some(method) = AuthMethod::from_choice(&answer) {
                debug!(%method, "authentication method selected");
                return Ok(method);
            }
            warn!(answer = answer.trim(), attempt, "invalid authentication choice");
            if attempt < MAX_SELECTION_ATTEMPTS {
                self.prompter.message("Invalid choice! Try again!");
            }
        }

        Err(Error::InvalidSelection(format!(
            "no valid authentication method chosen after {MAX_SELECTION_ATTEMPTS} attempts (expected 1 or 2)"
        )))
    }

    fn build(&self, method: AuthMethod) -> Result<Box<dyn CredentialProvider>> {
        let provider: Box<dyn CredentialProvider> = match method {
            AuthMethod::Webin => Box::new(WebinAuth::new(
                self.client.clone(),
                &self.endpoints.webin_auth_url,
                Arc::clone(&self.prompter),
            )),
            AuthMethod::Lsri => Box::new(LsriAuth::new(
                self.client.clone(),
                self.endpoints.require_lsri_client_id()?,
                &self.endpoints.device_auth_url,
                &self.endpoints.lsri_auth_url,
                Arc::clone(&self.prompter),
            )),
        };
        Ok(provider)
    }
}
