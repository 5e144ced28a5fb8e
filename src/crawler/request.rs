use crate::config::{validate_search_config, Config, ContentType, SearchConfig};
use crate::CrawlError;

/// Immutable description of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Keywords matched case-insensitively, in configured order
    pub keywords: Vec<String>,

    /// Proxy pool as `host:port` entries
    pub proxies: Vec<String>,

    /// Which content to traverse for every user
    pub content_type: ContentType,

    /// Minimum number of results wanted; `None` scans every username
    pub quota: Option<usize>,
}

impl SearchRequest {
    /// Creates a request without proxies or quota
    pub fn new<I, S>(keywords: I, content_type: ContentType) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            proxies: Vec::new(),
            content_type,
            quota: None,
        }
    }

    /// Builds a request from raw values, parsing the content type by name
    ///
    /// # Example
    ///
    /// ```
    /// use hubcrawl::crawler::SearchRequest;
    ///
    /// let no_proxies: Vec<String> = Vec::new();
    /// assert!(SearchRequest::parse(["html"], no_proxies.clone(), "Wikis").is_ok());
    /// assert!(SearchRequest::parse(["html"], no_proxies, "gists").is_err());
    /// ```
    pub fn parse<K, P>(keywords: K, proxies: P, content_type: &str) -> Result<Self, CrawlError>
    where
        K: IntoIterator,
        K::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let search = SearchConfig {
            keywords: keywords.into_iter().map(Into::into).collect(),
            proxies: proxies.into_iter().map(Into::into).collect(),
            content_type: content_type.to_string(),
        };
        Self::from_search_config(&search, None)
    }

    /// Builds a request from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        Self::from_search_config(&config.search, config.quota)
    }

    fn from_search_config(search: &SearchConfig, quota: Option<usize>) -> Result<Self, CrawlError> {
        validate_search_config(search)?;
        Ok(Self {
            keywords: search.keywords.clone(),
            proxies: search.proxies.clone(),
            content_type: search.content_type.parse()?,
            quota,
        })
    }

    pub fn with_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies = proxies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    /// Checks keywords and proxies
    pub fn validate(&self) -> Result<(), CrawlError> {
        let search = SearchConfig {
            keywords: self.keywords.clone(),
            proxies: self.proxies.clone(),
            content_type: self.content_type.to_string(),
        };
        validate_search_config(&search)?;
        Ok(())
    }
}
