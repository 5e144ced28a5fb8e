use url::Url;

/// Query parameter selecting the repositories tab of a profile page
pub const REPOSITORIES_TAB: (&str, &str) = ("tab", "repositories");

/// Builds page URLs relative to the site root
///
/// The root always ends in `/`, so paths are appended by concatenation.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    base: Url,
}

impl SiteLinks {
    /// Creates a link builder from an already normalized root
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// The site root
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Profile page of a user; also the repository listing with [`REPOSITORIES_TAB`]
    pub fn profile(&self, username: &str) -> String {
        format!("{}{}", self.base(), username)
    }

    /// Wiki index of a repository
    pub fn wiki_index(&self, username: &str, repo: &str) -> String {
        format!("{}{}/{}/wiki/", self.base(), username, repo)
    }

    /// A single wiki page
    pub fn wiki_page(&self, username: &str, repo: &str, title: &str) -> String {
        format!("{}{}/{}/wiki/{}", self.base(), username, repo, title)
    }

    /// First page of the issue listing of a repository
    pub fn issue_index(&self, username: &str, repo: &str) -> String {
        format!("{}{}/{}/issues/", self.base(), username, repo)
    }

    /// Resolves an href scraped from a page against the site root
    ///
    /// Falls back to plain concatenation when the href cannot be joined.
    pub fn resolve(&self, href: &str) -> String {
        match self.base.join(href.trim()) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base(), href.trim_start_matches('/')),
        }
    }
}
