use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::auth::DEFAULT_AUTHORITY;
use crate::client::graph::{
    GraphSettings, DEFAULT_GRAPH_URL, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS,
};
use crate::client::Credentials;
use crate::core::report::{ReportProfile, ThresholdConfig};
use crate::error::ProbeError;

/// Probe settings. Loaded from an optional JSON file, then overridden by
/// environment variables and command line flags.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Pre-acquired bearer token; wins over client credentials
    pub access_token: Option<String>,
    /// SKU id namespace when the directory does not report one
    pub tenant_name: Option<String>,
    pub graph_url: Option<String>,
    pub authority_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub include_skus: Vec<String>,
    pub exclude_skus: Vec<String>,
    pub profile: ReportProfile,
    pub thresholds: ThresholdConfig,
    /// Exit non-zero when the error document is emitted
    pub strict_exit: bool,
}

impl Config {
    /// Loads `path`, or the default location when `path` is `None`.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => {
                let default_path = match Self::get_config_path() {
                    Some(p) => p,
                    None => return Ok(Config::default()),
                };
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                Self::load_from(&default_path)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// `<config dir>/licprobe/config.json`
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("licprobe").join("config.json"))
    }

    /// Credential for the directory client.
    pub fn credentials(&self) -> std::result::Result<Credentials, ProbeError> {
        if let Some(token) = non_empty(&self.access_token) {
            return Ok(Credentials::AccessToken(token.to_string()));
        }

        match (
            non_empty(&self.tenant_id),
            non_empty(&self.client_id),
            non_empty(&self.client_secret),
        ) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => {
                Ok(Credentials::ClientSecret {
                    tenant_id: tenant_id.to_string(),
                    client_id: client_id.to_string(),
                    client_secret: client_secret.to_string(),
                })
            }
            _ => Err(ProbeError::config(
                "No credentials: set an access token or tenant id, client id and client secret",
            )),
        }
    }

    pub fn graph_settings(&self) -> GraphSettings {
        GraphSettings {
            graph_url: non_empty(&self.graph_url)
                .unwrap_or(DEFAULT_GRAPH_URL)
                .to_string(),
            authority_url: non_empty(&self.authority_url)
                .unwrap_or(DEFAULT_AUTHORITY)
                .to_string(),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1)),
            tenant_label: non_empty(&self.tenant_name)
                .unwrap_or("tenant")
                .to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Appends ids given on the command line. Entries may be comma separated.
    pub fn add_include_skus<'a, I: IntoIterator<Item = &'a String>>(&mut self, ids: I) {
        self.include_skus.extend(split_ids(ids));
    }

    pub fn add_exclude_skus<'a, I: IntoIterator<Item = &'a String>>(&mut self, ids: I) {
        self.exclude_skus.extend(split_ids(ids));
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn split_ids<'a, I: IntoIterator<Item = &'a String>>(ids: I) -> Vec<String> {
    ids.into_iter()
        .flat_map(|raw| raw.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
