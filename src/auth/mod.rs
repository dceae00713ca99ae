//! Authentication for the EVA submission service
//!
//! Two strategies produce a bearer token:
//! - ENA Webin: username/password exchanged for a token
//! - LS-RI: OIDC device-code flow, exchange delegated to the EVA web service
//!
//! [`AuthSession`] picks one strategy per process run and keeps it.

mod lsri;
mod session;
mod webin;

pub use lsri::{DeviceAuthorization, LsriAuth};
pub use session::{AuthSession, MAX_SELECTION_ATTEMPTS};
pub use webin::WebinAuth;

use crate::error::Result;
use async_trait::async_trait;

/// Source of a bearer token
///
/// Implementations cache the token: the first successful call talks to the
/// identity provider, later calls return the same value without I/O.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Human-readable provider name used in messages and errors
    fn name(&self) -> &'static str;

    /// Get a bearer token, authenticating on first use
    async fn token(&self) -> Result<String>;
}

/// Supported authentication methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// ENA Webin username/password
    Webin,
    /// Life Science Research Infrastructure device-code login
    Lsri,
}

impl AuthMethod {
    /// Menu order shown to the operator (1-based on screen)
    pub const ALL: [Self; 2] = [Self::Webin, Self::Lsri];

    /// Parse a menu answer ("1" or "2")
    pub fn from_choice(choice: &str) -> Option<Self> {
        let index: usize = choice.trim().parse().ok()?;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Webin => write!(f, "ENA Webin"),
            Self::Lsri => write!(f, "LSRI"),
        }
    }
}

/// Operator interaction needed during authentication
///
/// The CLI implements this with terminal prompts; tests script the answers.
pub trait Prompter: Send + Sync {
    /// Ask for a visible line of input
    fn input(&self, prompt: &str) -> Result<String>;

    /// Ask for a hidden line of input
    fn password(&self, prompt: &str) -> Result<String>;

    /// Show a message to the operator
    fn message(&self, message: &str);

    /// Tell the operator where to authorize this device
    fn device_code(&self, verification_uri: &str, user_code: &str);
}
