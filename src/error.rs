use thiserror::Error;

/// Fatal conditions of a probe run.
///
/// Every variant ends the pipeline and is rendered through the error form
/// of the XML report.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Directory client unavailable: {0}")]
    ModuleUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    #[error("Could not read company information: {0}")]
    CompanyInfoUnavailable(String),

    #[error("{0}")]
    NoMatchingSkus(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

impl ProbeError {
    pub fn module_unavailable<S: Into<String>>(msg: S) -> Self {
        ProbeError::ModuleUnavailable(msg.into())
    }

    pub fn authentication<S: Into<String>>(msg: S) -> Self {
        ProbeError::AuthenticationFailure(msg.into())
    }

    pub fn company_info<S: Into<String>>(msg: S) -> Self {
        ProbeError::CompanyInfoUnavailable(msg.into())
    }

    pub fn no_matching_skus<S: Into<String>>(msg: S) -> Self {
        ProbeError::NoMatchingSkus(msg.into())
    }

    pub fn upstream<S: Into<String>>(msg: S) -> Self {
        ProbeError::UpstreamError(msg.into())
    }

    pub fn upstream_unavailable<S: Into<String>>(msg: S) -> Self {
        ProbeError::UpstreamUnavailable(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        ProbeError::Config(msg.into())
    }

    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        ProbeError::Serialization(msg.into())
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            return ProbeError::UpstreamUnavailable(e.to_string());
        }
        match e.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => ProbeError::AuthenticationFailure(e.to_string()),
            _ => ProbeError::UpstreamError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(e: serde_json::Error) -> Self {
        ProbeError::Serialization(e.to_string())
    }
}
