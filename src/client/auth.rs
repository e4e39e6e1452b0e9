//! Bearer token acquisition.
//!
//! Either a pre-acquired access token is passed through, or a
//! client-credentials grant is run against the Microsoft identity platform
//! v2.0 token endpoint.

use serde::Deserialize;

use crate::error::{ProbeError, Result};

pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Opaque tenant credential
#[derive(Clone)]
pub enum Credentials {
    AccessToken(String),
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
            Credentials::ClientSecret {
                tenant_id,
                client_id,
                ..
            } => f
                .debug_struct("ClientSecret")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Token endpoint URL for a given tenant
pub fn token_url(authority: &str, tenant_id: &str) -> String {
    format!(
        "{}/{}/oauth2/v2.0/token",
        authority.trim_end_matches('/'),
        tenant_id
    )
}

/// Resolves `credentials` into a bearer token.
pub fn acquire_token(
    http: &reqwest::blocking::Client,
    authority: &str,
    credentials: &Credentials,
) -> Result<String> {
    let (tenant_id, client_id, client_secret) = match credentials {
        Credentials::AccessToken(token) => {
            if token.trim().is_empty() {
                return Err(ProbeError::authentication("Access token is empty"));
            }
            return Ok(token.trim().to_string());
        }
        Credentials::ClientSecret {
            tenant_id,
            client_id,
            client_secret,
        } => (tenant_id, client_id, client_secret),
    };

    if tenant_id.is_empty() || client_id.is_empty() || client_secret.is_empty() {
        return Err(ProbeError::authentication(
            "tenant id, client id and client secret are all required",
        ));
    }

    let url = token_url(authority, tenant_id);
    log::debug!("Token request -> {}", url);

    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id.as_str()),
        ("client_secret", client_secret.as_str()),
        ("scope", GRAPH_SCOPE),
    ];

    let response = http.post(&url).form(&form).send()?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(token_error(status.as_u16(), &body));
    }

    let token: TokenResponse = response
        .json()
        .map_err(|e| ProbeError::authentication(format!("Invalid token response: {}", e)))?;

    Ok(token.access_token)
}

/// Maps a failed token request. Client-side rejections mean the credential
/// was refused; anything else is an upstream fault.
fn token_error(status: u16, body: &str) -> ProbeError {
    let detail = match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(e) if !e.error.is_empty() => {
            // error_description carries trace ids after the first line
            let first_line = e.error_description.lines().next().unwrap_or_default();
            format!("{}: {}", e.error, first_line)
        }
        _ => format!("HTTP {}", status),
    };

    match status {
        400 | 401 | 403 => ProbeError::authentication(detail),
        _ => ProbeError::upstream(format!("Token endpoint returned {}", detail)),
    }
}
