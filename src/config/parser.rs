use crate::config::types::{Config, JsonSearchDocument};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Files ending in `.json` are read as a flat search document
/// (`keywords`, `proxies`, `type`) with default crawler and HTTP settings;
/// everything else is parsed as TOML.
///
/// # Arguments
///
/// * `path` - Path to the configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use hubcrawl::config::load_config;
///
/// let config = load_config(Path::new("search.toml")).unwrap();
/// println!("Keywords: {:?}", config.search.keywords);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        parse_json(&content)?
    } else {
        parse_toml(&content)?
    };

    validate(&config)?;

    Ok(config)
}

/// Parses a TOML configuration without validating it
pub fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Parses a flat JSON search document without validating it
pub fn parse_json(content: &str) -> Result<Config, ConfigError> {
    let doc: JsonSearchDocument = serde_json::from_str(content)?;
    Ok(doc.into())
}
