//! Microsoft Graph implementation of [`DirectoryClient`].

use chrono::{DateTime, Utc};
use once_cell::unsync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::auth::{self, Credentials};
use super::DirectoryClient;
use crate::core::types::{CompanyInfo, ProvisioningError, SkuRecord};
use crate::error::{ProbeError, Result};

pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Guards against a server that keeps handing out `@odata.nextLink`
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Connection settings for [`GraphClient::connect`]
#[derive(Debug, Clone)]
pub struct GraphSettings {
    pub graph_url: String,
    pub authority_url: String,
    pub timeout: Duration,
    /// Namespace used for SKU ids when Graph does not report an account name
    pub tenant_label: String,
    pub max_pages: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            graph_url: DEFAULT_GRAPH_URL.to_string(),
            authority_url: auth::DEFAULT_AUTHORITY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tenant_label: "tenant".to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscribedSku {
    sku_part_number: String,
    account_name: Option<String>,
    #[serde(default)]
    consumed_units: u64,
    #[serde(default)]
    prepaid_units: PrepaidUnits,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PrepaidUnits {
    enabled: u64,
    warning: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Organization {
    on_premises_sync_enabled: Option<bool>,
    on_premises_last_sync_date_time: Option<DateTime<Utc>>,
    on_premises_last_password_sync_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    display_name: Option<String>,
    user_principal_name: Option<String>,
    on_premises_provisioning_errors: Option<Vec<serde_json::Value>>,
}

// ── Conversions ─────────────────────────────────────────────────────

fn sku_record(sku: SubscribedSku, tenant_label: &str) -> SkuRecord {
    let namespace = sku
        .account_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(tenant_label);

    SkuRecord {
        id: format!("{}:{}", namespace, sku.sku_part_number),
        active_units: sku.prepaid_units.enabled,
        consumed_units: sku.consumed_units,
        warning_units: sku.prepaid_units.warning,
    }
}

fn company_info(org: Organization) -> CompanyInfo {
    let dir_sync_enabled = org.on_premises_sync_enabled.unwrap_or(false);
    CompanyInfo {
        dir_sync_enabled,
        last_dir_sync_time: org.on_premises_last_sync_date_time,
        // Graph has no separate flag; a recorded password sync implies it is on
        password_sync_enabled: dir_sync_enabled
            && org.on_premises_last_password_sync_date_time.is_some(),
        last_password_sync_time: org.on_premises_last_password_sync_date_time,
    }
}

fn provisioning_error(user: User) -> Option<ProvisioningError> {
    if user.on_premises_provisioning_errors.map_or(true, |e| e.is_empty()) {
        return None;
    }
    let display_name = user
        .display_name
        .filter(|n| !n.is_empty())
        .or(user.user_principal_name)
        .unwrap_or_else(|| "(unnamed object)".to_string());
    Some(ProvisioningError { display_name })
}

fn status_error(status: u16, body: &str) -> ProbeError {
    let snippet: String = body.chars().take(200).collect();
    match status {
        401 | 403 => ProbeError::authentication(format!("Graph returned {}: {}", status, snippet)),
        _ => ProbeError::upstream(format!("Graph returned {}: {}", status, snippet)),
    }
}

// ── Client ──────────────────────────────────────────────────────────

/// Blocking Graph client holding one bearer token for the whole run
pub struct GraphClient {
    http: Client,
    headers: HeaderMap,
    settings: GraphSettings,
    provisioning_errors: OnceCell<Vec<ProvisioningError>>,
}

impl GraphClient {
    /// Builds the HTTP client and resolves the credential into a token.
    pub fn connect(credentials: &Credentials, settings: GraphSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("licprobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::module_unavailable(format!("HTTP client: {}", e)))?;

        let token = auth::acquire_token(&http, &settings.authority_url, credentials)?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ProbeError::authentication(format!("Invalid token: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        log::info!("Connected to {}", settings.graph_url);

        Ok(Self {
            http,
            headers,
            settings,
            provisioning_errors: OnceCell::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.graph_url.trim_end_matches('/'), path)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);

        let response = self.http.get(url).headers(self.headers.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .map_err(|e| ProbeError::upstream(format!("Invalid Graph response: {}", e)))
    }

    /// Follows `@odata.nextLink` until the collection is exhausted.
    fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(self.url(path));
        let mut pages = 0;

        while let Some(url) = next {
            pages += 1;
            if pages > self.settings.max_pages {
                return Err(ProbeError::upstream(format!(
                    "Gave up paging {} after {} pages",
                    path, self.settings.max_pages
                )));
            }
            let page: Page<T> = self.get_json(&url)?;
            items.extend(page.value);
            next = page.next_link;
        }

        Ok(items)
    }
}

impl DirectoryClient for GraphClient {
    fn list_account_skus(&self) -> Result<Vec<SkuRecord>> {
        let skus: Vec<SubscribedSku> = self.get_all("/v1.0/subscribedSkus")?;
        log::info!("Fetched {} SKUs", skus.len());

        Ok(skus
            .into_iter()
            .map(|s| sku_record(s, &self.settings.tenant_label))
            .collect())
    }

    fn get_company_info(&self) -> Result<CompanyInfo> {
        let orgs: Page<Organization> = self.get_json(&self.url(
            "/v1.0/organization?$select=onPremisesSyncEnabled,onPremisesLastSyncDateTime,onPremisesLastPasswordSyncDateTime",
        ))?;

        orgs.value
            .into_iter()
            .next()
            .map(company_info)
            .ok_or_else(|| ProbeError::company_info("No organization returned"))
    }

    /// Cached, so `has_provisioning_errors` and this share one scan
    fn list_provisioning_errors(&self) -> Result<Vec<ProvisioningError>> {
        let errors = self.provisioning_errors.get_or_try_init(|| -> Result<_> {
            let users: Vec<User> = self.get_all(
                "/v1.0/users?$select=displayName,userPrincipalName,onPremisesProvisioningErrors&$top=999",
            )?;
            Ok(users.into_iter().filter_map(provisioning_error).collect())
        })?;
        Ok(errors.clone())
    }
}
