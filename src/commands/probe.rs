use chrono::{DateTime, Utc};
use clap::ArgMatches;

use crate::client::{DirectoryClient, GraphClient};
use crate::core::config::Config;
use crate::core::filter::SkuFilter;
use crate::core::probe::{self, ProbeOptions};
use crate::core::report::Report;
use crate::error::Result;
use crate::ui::prtg_xml;

/// The single document written to stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutput {
    pub document: String,
    pub is_error: bool,
}

impl ProbeOutput {
    /// Legacy hosts expect 0 for both shapes.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.is_error {
            1
        } else {
            0
        }
    }
}

pub fn options_from_config(config: &Config) -> ProbeOptions {
    ProbeOptions {
        filter: SkuFilter::from_lists(&config.include_skus, &config.exclude_skus),
        profile: config.profile,
        thresholds: config.thresholds,
    }
}

/// Turns the pipeline outcome into exactly one of the two document shapes.
pub fn render(result: Result<Report>) -> ProbeOutput {
    let serialized = result.and_then(|report| prtg_xml::serialize(&report));
    match serialized {
        Ok(document) => ProbeOutput {
            document,
            is_error: false,
        },
        Err(e) => {
            log::error!("{}", e);
            ProbeOutput {
                document: prtg_xml::serialize_error(&e.to_string()),
                is_error: true,
            }
        }
    }
}

/// Runs the pipeline against an already connected client.
pub fn run_with_client(
    client: &dyn DirectoryClient,
    config: &Config,
    now: DateTime<Utc>,
) -> ProbeOutput {
    render(probe::run(client, &options_from_config(config), now))
}

fn run_with_config(config: &Config, now: DateTime<Utc>) -> ProbeOutput {
    let client = config
        .credentials()
        .and_then(|credentials| GraphClient::connect(&credentials, config.graph_settings()));

    match client {
        Ok(client) => run_with_client(&client, config, now),
        Err(e) => render(Err(e)),
    }
}

/// Full probe invocation. Always prints a document; returns the exit code.
pub fn execute(matches: &ArgMatches, now: DateTime<Utc>) -> i32 {
    let (output, strict) = match super::config_from_matches(matches) {
        Ok(config) => (run_with_config(&config, now), config.strict_exit),
        Err(e) => (render(Err(e)), matches.get_flag("strict-exit")),
    };

    println!("{}", output.document);
    output.exit_code(strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;

    #[test]
    fn test_render_error_has_no_channels() {
        let output = render(Err(ProbeError::authentication("invalid_client")));
        assert!(output.is_error);
        assert!(output.document.contains("<error>1</error>"));
        assert!(output.document.contains("Authentication failed: invalid_client"));
        assert!(!output.document.contains("<result>"));
    }

    #[test]
    fn test_render_success() {
        let output = render(Ok(Report::default()));
        assert!(!output.is_error);
        assert!(!output.document.contains("<error>"));
    }

    #[test]
    fn test_exit_codes() {
        let err = render(Err(ProbeError::no_matching_skus("No Skus found")));
        assert_eq!(err.exit_code(false), 0);
        assert_eq!(err.exit_code(true), 1);
        assert_eq!(render(Ok(Report::default())).exit_code(true), 0);
    }

    #[test]
    fn test_missing_credentials_render_error_document() {
        let output = run_with_config(&Config::default(), Utc::now());
        assert!(output.is_error);
        assert!(output.document.contains("No credentials"));
    }
}
