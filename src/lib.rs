// licprobe library - public API

pub mod error;
pub use error::{ProbeError, Result};

pub mod cli;
pub mod client;
pub mod commands;
pub mod core;
pub mod ui;

pub use crate::core::config::Config;

/// Initialize logging on stderr. Stdout carries the report document.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
