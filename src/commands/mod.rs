// Command handlers module
pub mod list_skus;
pub mod probe;
pub mod version;

use anyhow::Context;
use chrono::Utc;
use clap::ArgMatches;
use std::path::Path;

use crate::core::config::Config;
use crate::core::report::ReportProfile;
use crate::error::{ProbeError, Result};

// Re-exports for cleaner imports
pub use version::execute as version;

/// Config file layered with environment variables and flags
pub fn config_from_matches(matches: &ArgMatches) -> Result<Config> {
    let path = matches.get_one::<String>("config").map(Path::new);
    let mut config = Config::load(path)
        .context("Could not load configuration")
        .map_err(|e| ProbeError::config(format!("{:#}", e)))?;

    apply_overrides(&mut config, matches)?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    let strings = [
        ("access-token", &mut config.access_token),
        ("tenant-id", &mut config.tenant_id),
        ("client-id", &mut config.client_id),
        ("client-secret", &mut config.client_secret),
        ("tenant-name", &mut config.tenant_name),
        ("graph-url", &mut config.graph_url),
    ];
    for (name, slot) in strings {
        if let Some(value) = matches.get_one::<String>(name) {
            *slot = Some(value.clone());
        }
    }

    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout_secs = Some(*timeout);
    }

    if let Some(ids) = matches.get_many::<String>("include-sku") {
        config.include_skus.clear();
        config.add_include_skus(ids);
    }
    if let Some(ids) = matches.get_many::<String>("exclude-sku") {
        config.exclude_skus.clear();
        config.add_exclude_skus(ids);
    }

    if let Some(profile) = matches.get_one::<String>("profile") {
        config.profile = profile
            .parse::<ReportProfile>()
            .map_err(ProbeError::config)?;
    }

    if matches.get_flag("strict-exit") {
        config.strict_exit = true;
    }

    Ok(())
}

/// Dispatches the top-level invocation and returns the process exit code.
pub fn execute(matches: &ArgMatches) -> anyhow::Result<i32> {
    match matches.subcommand() {
        Some(("version", _)) => {
            version::execute()?;
            Ok(0)
        }
        _ if matches.get_flag("list-skus") => {
            let config = config_from_matches(matches)?;
            list_skus::execute(&config, matches.get_flag("json"))?;
            Ok(0)
        }
        _ => Ok(probe::execute(matches, Utc::now())),
    }
}
