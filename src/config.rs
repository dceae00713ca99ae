//! Endpoint configuration
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. TOML file (`--config` or `<config_dir>/eva-sub-cli/config.toml`)
//! 3. `EVA_SUB_*` environment variables

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// ENA Webin token endpoint
pub const DEFAULT_WEBIN_AUTH_URL: &str = "https://www.ebi.ac.uk/ena/submit/webin/auth/token";
/// Delegated LS-RI device-code exchange endpoint
pub const DEFAULT_LSRI_AUTH_URL: &str = "http://www.ebi.ac.uk/eva/v1/submission/auth/lsri";
/// LS-RI device authorization endpoint
pub const DEFAULT_DEVICE_AUTH_URL: &str = "https://login.elixir-czech.org/oidc/devicecode";
/// Submission initiate endpoint
pub const DEFAULT_INITIATE_URL: &str = "http://www.ebi.ac.uk/eva/v1/submission/initiate";

/// Remote endpoints used by the client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    /// ENA Webin password auth endpoint
    pub webin_auth_url: String,
    /// LS-RI exchange endpoint (server side of the device-code flow)
    pub lsri_auth_url: String,
    /// OIDC device authorization endpoint
    pub device_auth_url: String,
    /// OIDC client id registered for LS-RI
    pub lsri_client_id: Option<String>,
    /// Submission initiate endpoint
    pub initiate_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            webin_auth_url: DEFAULT_WEBIN_AUTH_URL.to_string(),
            lsri_auth_url: DEFAULT_LSRI_AUTH_URL.to_string(),
            device_auth_url: DEFAULT_DEVICE_AUTH_URL.to_string(),
            lsri_client_id: None,
            initiate_url: DEFAULT_INITIATE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Resolve endpoints from defaults, an optional config file and the environment
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut endpoints = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        endpoints.apply_env();
        Ok(endpoints)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading endpoint config");
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&raw).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse endpoints from TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Override fields from `EVA_SUB_*` environment variables
    pub fn apply_env(&mut self) {
        let overrides: [(&str, &mut String); 4] = [
            ("EVA_SUB_WEBIN_AUTH_URL", &mut self.webin_auth_url),
            ("EVA_SUB_LSRI_AUTH_URL", &mut self.lsri_auth_url),
            ("EVA_SUB_DEVICE_AUTH_URL", &mut self.device_auth_url),
            ("EVA_SUB_INITIATE_URL", &mut self.initiate_url),
        ];
        for (var, field) in overrides {
            if let Ok(value) = env::var(var) {
                debug!(var, "endpoint overridden from environment");
                *field = value.trim().to_string();
            }
        }
        if let Ok(id) = env::var("EVA_SUB_LSRI_CLIENT_ID") {
            debug!("LS-RI client id taken from EVA_SUB_LSRI_CLIENT_ID");
            self.lsri_client_id = Some(id.trim().to_string());
        }
    }

    /// LS-RI client id, or a config error telling the operator how to set it
    pub fn require_lsri_client_id(&self) -> Result<&str> {
        self.lsri_client_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "no LS-RI client id configured; set EVA_SUB_LSRI_CLIENT_ID or `lsri_client_id` in the config file"
                        .to_string(),
                )
            })
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("eva-sub-cli").join("config.toml"))
}
