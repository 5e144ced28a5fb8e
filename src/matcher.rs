//! Case-insensitive keyword matching over extracted page text

/// Matches text against a fixed set of keywords
///
/// A list of strings matches when any string contains any keyword as a
/// substring, ignoring case.
///
/// # Examples
///
/// ```
/// use hubcrawl::matcher::KeywordMatcher;
///
/// let matcher = KeywordMatcher::new(["html"]);
/// assert!(matcher.matches(["HTML", "code"]));
/// assert!(!matcher.matches(["python"]));
/// ```
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Builds a matcher, case-folding every keyword once
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The case-folded keywords
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns true if any text contains any keyword; stops at the first hit
    pub fn matches<I, S>(&self, texts: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().any(|text| self.matches_text(text.as_ref()))
    }

    /// Returns true if a single text contains any keyword
    pub fn matches_text(&self, text: &str) -> bool {
        let folded = text.to_lowercase();
        self.keywords.iter().any(|k| folded.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_any_keyword() {
        let matcher = KeywordMatcher::new(["css", "html"]);
        assert!(matcher.matches(["html", "css", "code"]));
        assert!(!matcher.matches(["python"]));
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = KeywordMatcher::new(["html"]);
        assert!(matcher.matches(["HTML", "code"]));

        let upper = KeywordMatcher::new(["HTML"]);
        assert!(upper.matches(["cool-html-project"]));
        assert_eq!(upper.keywords().to_vec(), vec!["html".to_string()]);
    }

    #[test]
    fn test_substring_match() {
        let matcher = KeywordMatcher::new(["html"]);
        assert!(matcher.matches_text("my-xhtml5-notes"));
        assert!(matcher.matches_text("intro\nwritten in html"));
        assert!(!matcher.matches_text("htm"));
    }

    #[test]
    fn test_empty_text_list() {
        let matcher = KeywordMatcher::new(["html"]);
        assert!(!matcher.matches(Vec::<String>::new()));
    }

    #[test]
    fn test_no_keywords_never_match() {
        let matcher = KeywordMatcher::new(Vec::<String>::new());
        assert!(!matcher.matches(["anything"]));
    }
}
