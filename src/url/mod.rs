//! URL handling module for Hubcrawl
//!
//! This module builds every page address the crawler visits from one
//! configured site root and resolves hrefs scraped from listing pages.

mod links;
mod normalize;

pub use links::{SiteLinks, REPOSITORIES_TAB};
pub use normalize::normalize_base_url;
