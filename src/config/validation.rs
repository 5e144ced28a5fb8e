use crate::config::types::{Config, ContentType, CrawlerConfig, HttpConfig, SearchConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates keywords, proxies and the content type
pub fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    // An empty pattern set would match every page
    if config.keywords.is_empty() {
        return Err(ConfigError::Validation(
            "keywords must contain at least one entry".to_string(),
        ));
    }

    if config.keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "keywords cannot contain blank entries".to_string(),
        ));
    }

    config.content_type.parse::<ContentType>()?;

    for proxy in &config.proxies {
        validate_proxy(proxy)?;
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_user_tasks < 1 || config.max_user_tasks > 64 {
        return Err(ConfigError::Validation(format!(
            "max_user_tasks must be between 1 and 64, got {}",
            config.max_user_tasks
        )));
    }

    if config.max_nested_fetches < 1 || config.max_nested_fetches > 1024 {
        return Err(ConfigError::Validation(format!(
            "max_nested_fetches must be between 1 and 1024, got {}",
            config.max_nested_fetches
        )));
    }

    if config.max_username_length > crate::username::MAX_USERNAME_LENGTH {
        return Err(ConfigError::Validation(format!(
            "max_username_length must be <= {}, got {}",
            crate::username::MAX_USERNAME_LENGTH,
            config.max_username_length
        )));
    }

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Normalizes a proxy entry to a URL, adding `http://` when no scheme is given
pub fn proxy_url(entry: &str) -> Result<Url, ConfigError> {
    let entry = entry.trim();
    let candidate = if entry.contains("://") {
        entry.to_string()
    } else {
        format!("http://{}", entry)
    };

    let url = Url::parse(&candidate).map_err(|_| ConfigError::InvalidProxy(entry.to_string()))?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidProxy(entry.to_string()));
    }

    Ok(url)
}

/// Validates a single proxy entry
fn validate_proxy(entry: &str) -> Result<(), ConfigError> {
    if entry.trim().is_empty() {
        return Err(ConfigError::InvalidProxy(entry.to_string()));
    }
    proxy_url(entry).map(|_| ())
}
