use std::time::Duration;

use dom_query::Document;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::Lang;
use super::types::{ArticlePage, SearchHit, SearchResponse};

const SEARCH_PATH: &str = "/w/rest.php/v1/search/page";
const SEARCH_LIMIT: &str = "10";
const MAX_RESPONSE_BYTES: usize = 10_000_000;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 5;

/// Characters to percent-encode in a page title used as a single path segment.
const TITLE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'+');

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream request failed: status {0}")]
    Status(u16),

    #[error("upstream response too large (>{} bytes)", MAX_RESPONSE_BYTES)]
    TooLarge,

    #[error("upstream response is not valid UTF-8 text")]
    Decode,

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unexpected search response shape: {0}")]
    Format(#[from] serde_json::Error),
}

impl SourceError {
    /// True when a response arrived but could not be parsed into the expected shape.
    pub fn is_format(&self) -> bool {
        matches!(self, SourceError::Format(_))
    }
}

/// The two read operations the resolution pipeline needs from the encyclopedia.
/// Implemented by `WikiClient` for production; mock implementations used in tests.
pub trait WikiSource {
    async fn search(&self, query: &str, lang: Lang) -> Result<Vec<SearchHit>, SourceError>;

    async fn fetch_page(&self, title: &str, lang: Lang) -> Result<ArticlePage, SourceError>;

    /// Public article URL for `title`.
    fn article_url(&self, title: &str, lang: Lang) -> String;
}

#[derive(Clone)]
pub struct WikiClient {
    http: Client,
    base_url: Option<String>,
}

impl WikiClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(HTTP_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self {
            http,
            base_url: None,
        })
    }

    /// Route every language edition to one host.
    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: Some(base_url.trim_end_matches('/').to_string()),
        }
    }

    fn base(&self, lang: Lang) -> &str {
        self.base_url.as_deref().unwrap_or(lang.base_url())
    }

    async fn get_text(&self, url: Url) -> Result<String, SourceError> {
        let response = self
            .http
            .get(url.clone())
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "upstream returned non-success status");
            return Err(SourceError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length()
            && len as usize > MAX_RESPONSE_BYTES
        {
            return Err(SourceError::TooLarge);
        }

        let mut body = Vec::new();
        let mut stream = response;
        while let Some(chunk) = stream.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > MAX_RESPONSE_BYTES {
                return Err(SourceError::TooLarge);
            }
        }

        String::from_utf8(body).map_err(|_| SourceError::Decode)
    }
}

impl WikiSource for WikiClient {
    async fn search(&self, query: &str, lang: Lang) -> Result<Vec<SearchHit>, SourceError> {
        let mut url = Url::parse(&format!("{}{SEARCH_PATH}", self.base(lang)))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", SEARCH_LIMIT);

        let body = self.get_text(url).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        let hits: Vec<SearchHit> = response
            .pages
            .into_iter()
            .map(|page| SearchHit {
                title: page.title,
                excerpt: page.excerpt.as_deref().map(plain_text).unwrap_or_default(),
            })
            .collect();

        debug!(query, %lang, hits = hits.len(), "search complete");
        Ok(hits)
    }

    async fn fetch_page(&self, title: &str, lang: Lang) -> Result<ArticlePage, SourceError> {
        let url = Url::parse(&format!(
            "{}/w/rest.php/v1/page/{}/html",
            self.base(lang),
            encode_title(title)
        ))?;

        let html = self.get_text(url).await?;
        debug!(title, %lang, bytes = html.len(), "page fetched");
        Ok(ArticlePage {
            title: title.to_string(),
            html,
        })
    }

    fn article_url(&self, title: &str, lang: Lang) -> String {
        format!("{}/wiki/{}", self.base(lang), encode_title(title))
    }
}

/// Titles are addressed with underscores in place of spaces.
fn encode_title(title: &str) -> String {
    utf8_percent_encode(&title.trim().replace(' ', "_"), TITLE_ENCODE_SET).to_string()
}

/// Excerpts carry `<span class="searchmatch">` highlighting and HTML entities.
fn plain_text(excerpt: &str) -> String {
    Document::from(excerpt).select("body").text().to_string()
}
