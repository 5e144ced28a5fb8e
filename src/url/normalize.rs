use crate::ConfigError;
use url::Url;

/// Normalizes the site root so page paths can be appended to it
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an http or https scheme
/// 3. Drop query string and fragment
/// 4. Ensure the path ends with `/`
///
/// # Examples
///
/// ```
/// use hubcrawl::url::normalize_base_url;
///
/// let url = normalize_base_url("https://github.com").unwrap();
/// assert_eq!(url.as_str(), "https://github.com/");
/// ```
pub fn normalize_base_url(base: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(base.trim())
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base
        )));
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
