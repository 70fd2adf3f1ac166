use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub fn init_logging() -> Result<()> {
    let log_level = env::var("LOG_LEVEL")
        .map(|level| match level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    Ok(())
}

/// Chrome-family profile roots worth probing when none are given explicitly.
/// Covers the Linux config-dir layouts, the macOS application-support name,
/// and the throwaway profile used with a debugging-enabled browser.
pub fn default_candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(config) = dirs::config_dir() {
        roots.push(config.join("google-chrome"));
        roots.push(config.join("chromium"));
        roots.push(config.join("Google").join("Chrome"));
    }
    roots.push(PathBuf::from("/tmp/chrome-debug"));
    roots
}
