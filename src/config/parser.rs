use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Read and validate a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// invalid values.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
}

/// Parse and validate configuration text.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or holds invalid values.
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if config.performance.parallel_threads == 0 {
        anyhow::bail!("Parallel threads must be at least 1");
    }

    if let Some(dir) = &config.core.default_project
        && dir.as_os_str().is_empty()
    {
        anyhow::bail!("core.default_project cannot be empty");
    }

    Ok(())
}
