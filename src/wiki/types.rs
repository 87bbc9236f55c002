use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub pages: Vec<SearchPage>,
}

#[derive(Debug, Deserialize)]
pub struct SearchPage {
    pub title: String,
    pub excerpt: Option<String>,
}

/// One candidate from a keyword search, in the rank order the service returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    /// Plain text; search-match highlighting is stripped.
    pub excerpt: String,
}

#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub title: String,
    pub html: String,
}
