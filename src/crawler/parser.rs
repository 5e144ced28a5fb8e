//! HTML extraction for the upstream page layout
//!
//! This module pulls the pieces the traversal needs out of fetched pages:
//! - Repository names from a profile's repositories tab
//! - Wiki page titles and wiki page text
//! - Issue permalinks and the next-page link of an issue listing
//! - Issue title and first paragraph of each comment
//!
//! Absent elements yield empty lists or `None`, never an error.

use crate::crawler::Document;
use scraper::{ElementRef, Selector};

const REPOSITORY_NAME: &str = r#"a[itemprop="name codeRepository"]"#;
const WIKI_TITLE: &str = "a.flex-1.py-1.text-bold";
const WIKI_CONTENT: &str = "div.markdown-body";
const WIKI_TEXT: &str = "a, p, span, h1, h2, h3, h4, h5, h6";
const ISSUE_LINK: &str = "a.d-block.d-md-none.position-absolute.top-0.bottom-0.left-0.right-0";
const NEXT_PAGE: &str = "a.next_page";
const ISSUE_TITLE: &str = "span.js-issue-title.markdown-title";
const COMMENT_BODY: &str = ".comment-body";
const PARAGRAPH: &str = "p";

/// One page of an issue listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueListing {
    /// Issue permalinks (raw hrefs) in page order
    pub links: Vec<String>,

    /// Href of the following listing page, if any
    pub next_page: Option<String>,
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::error!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Extracts repository names, with all whitespace removed
///
/// # Example
///
/// ```
/// use hubcrawl::crawler::{repository_names, Document};
///
/// let doc = Document::new(r#"<a itemprop="name codeRepository">
///     dotfiles</a>"#);
/// assert_eq!(repository_names(&doc), vec!["dotfiles"]);
/// ```
pub fn repository_names(document: &Document) -> Vec<String> {
    let Some(name_selector) = selector(REPOSITORY_NAME) else {
        return Vec::new();
    };

    let html = document.html();
    html.select(&name_selector)
        .map(|element| {
            element_text(element)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Extracts the page titles listed on a wiki index
pub fn wiki_titles(document: &Document) -> Vec<String> {
    let Some(title_selector) = selector(WIKI_TITLE) else {
        return Vec::new();
    };

    let html = document.html();
    html.select(&title_selector)
        .map(|element| element_text(element).trim().to_string())
        .filter(|title| !title.is_empty())
        .collect()
}

/// Extracts the text of anchors, paragraphs, spans and headings inside the
/// wiki content container
pub fn wiki_texts(document: &Document) -> Vec<String> {
    let (Some(content_selector), Some(text_selector)) = (selector(WIKI_CONTENT), selector(WIKI_TEXT))
    else {
        return Vec::new();
    };

    let html = document.html();
    let Some(content) = html.select(&content_selector).next() else {
        return Vec::new();
    };

    content.select(&text_selector).map(element_text).collect()
}

/// Extracts issue permalinks and the next-page link from an issue listing
pub fn issue_listing(document: &Document) -> IssueListing {
    let (Some(link_selector), Some(next_selector)) = (selector(ISSUE_LINK), selector(NEXT_PAGE))
    else {
        return IssueListing::default();
    };

    let html = document.html();

    let links = html
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    let next_page = html
        .select(&next_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string);

    IssueListing { links, next_page }
}

/// Extracts the issue title and the first paragraph of every comment body
///
/// A missing title or a comment without a paragraph contributes nothing.
pub fn issue_texts(document: &Document) -> Vec<String> {
    let (Some(title_selector), Some(comment_selector), Some(paragraph_selector)) = (
        selector(ISSUE_TITLE),
        selector(COMMENT_BODY),
        selector(PARAGRAPH),
    ) else {
        return Vec::new();
    };

    let html = document.html();

    let title = html.select(&title_selector).next().map(element_text);

    let comments = html.select(&comment_selector).filter_map(|comment| {
        comment
            .select(&paragraph_selector)
            .next()
            .map(element_text)
    });

    title.into_iter().chain(comments).collect()
}
