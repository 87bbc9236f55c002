//! Name resolution: search -> pick hit -> fetch -> (disambiguate once -> refetch) -> sanitize.

mod classify;
mod listing;
mod relevance;
mod sanitize;

pub use classify::is_listing_page;
pub use listing::resolve_from_listing;
pub use relevance::select_relevant;
pub use sanitize::sanitize;

use serde::Serialize;
use tracing::{debug, info};

use crate::wiki::{ArticlePage, Lang, SourceError, WikiSource};

/// An article ready to embed. Only constructed from sanitized HTML.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedArticle {
    title: String,
    link: String,
    html: String,
}

impl ResolvedArticle {
    fn from_page(page: ArticlePage, link: String) -> Self {
        Self {
            title: page.title.replace('_', " "),
            link,
            html: sanitize(&page.html),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Resolves `target` (disambiguated by `parent`) to one article.
///
/// `Ok(None)` covers every "nothing found" outcome; only upstream failures are errors.
/// A listing page reached after the disambiguation refetch is returned as-is.
pub async fn resolve(
    source: &impl WikiSource,
    target: &str,
    parent: &str,
    lang: Lang,
) -> Result<Option<ResolvedArticle>, ResolveError> {
    let hits = source.search(target, lang).await?;

    let Some(hit) = select_relevant(&hits, target, lang) else {
        info!(name = target, %lang, candidates = hits.len(), "no relevant search hit");
        return Ok(None);
    };
    debug!(name = target, title = %hit.title, "search hit selected");

    let page = source.fetch_page(&hit.title, lang).await?;

    let page = if is_listing_page(&page.html, lang) {
        let title = resolve_from_listing(&page.html, &target.to_lowercase(), &parent.to_lowercase());
        if title.is_empty() {
            info!(name = target, parent, listing = %page.title, "listing has no matching entry");
            return Ok(None);
        }
        debug!(listing = %page.title, title = %title, "resolved from listing");
        source.fetch_page(&title, lang).await?
    } else {
        page
    };

    let link = source.article_url(&page.title, lang);
    info!(name = target, title = %page.title, "article resolved");
    Ok(Some(ResolvedArticle::from_page(page, link)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use crate::wiki::SearchHit;

    struct MockSource {
        search: Mutex<VecDeque<Result<Vec<SearchHit>, SourceError>>>,
        pages: HashMap<String, String>,
        fetched: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn new(hits: Vec<SearchHit>) -> Self {
            Self {
                search: Mutex::new(VecDeque::from([Ok(hits)])),
                pages: HashMap::new(),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: SourceError) -> Self {
            Self {
                search: Mutex::new(VecDeque::from([Err(error)])),
                pages: HashMap::new(),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn with_page(mut self, title: &str, html: &str) -> Self {
            self.pages.insert(title.to_string(), html.to_string());
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    impl WikiSource for MockSource {
        async fn search(&self, _query: &str, _lang: Lang) -> Result<Vec<SearchHit>, SourceError> {
            self.search
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Vec::new()))
        }

        async fn fetch_page(&self, title: &str, _lang: Lang) -> Result<ArticlePage, SourceError> {
            self.fetched.lock().unwrap().push(title.to_string());
            self.pages
                .get(title)
                .map(|html| ArticlePage {
                    title: title.to_string(),
                    html: html.clone(),
                })
                .ok_or(SourceError::Status(404))
        }

        fn article_url(&self, title: &str, lang: Lang) -> String {
            format!("https://{lang}.example.org/wiki/{title}")
        }
    }

    fn hit(title: &str, excerpt: &str) -> SearchHit {
        SearchHit {
            title: title.into(),
            excerpt: excerpt.into(),
        }
    }

    const GURO_ARTICLE: &str = r#"<html><head><title>Guro District</title><base href="//en.wikipedia.org/wiki/"></head>
<body><section><p>Guro District is one of the 25 districts of Seoul.</p></section>
<section><h2>External links</h2><ul><li><a href="https://www.guro.go.kr">Official site</a></li></ul></section></body></html>"#;

    const SONGPA_LISTING: &str = r#"<html><body><section><p>Songpa has other uses:</p>
<ul>
<li><a href="./Songpa_(band)">Songpa</a>, a band</li>
<li><a href="./Songpa-gu">Songpa-gu</a>, a district of <a href="./Seoul">Seoul</a></li>
</ul></section></body></html>"#;

    const SONGPA_ARTICLE: &str =
        "<html><body><section><p>Songpa-gu is a district in south-east Seoul.</p></section></body></html>";

    #[tokio::test]
    async fn direct_article_is_sanitized_and_returned() {
        let source = MockSource::new(vec![hit("Guro District", "Guro District is a district of Seoul")])
            .with_page("Guro District", GURO_ARTICLE);

        let article = resolve(&source, "Guro-gu", "Seoul", Lang::En)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(article.title(), "Guro District");
        assert_eq!(article.link(), "https://en.example.org/wiki/Guro District");
        assert!(article.html().contains("25 districts"));
        assert!(!article.html().contains("<title"));
        assert!(!article.html().contains("Official site"));
        assert_eq!(source.fetched(), vec!["Guro District"]);
    }

    #[tokio::test]
    async fn no_relevant_hit_returns_none_without_fetching() {
        let source = MockSource::new(vec![
            hit("Guro (film)", "a 1998 drama film"),
            hit("Guro", "a surname"),
        ]);

        let result = resolve(&source, "Guro-gu", "Seoul", Lang::En).await.unwrap();

        assert!(result.is_none());
        assert!(source.fetched().is_empty());
    }

    #[tokio::test]
    async fn listing_page_is_resolved_and_refetched() {
        let source = MockSource::new(vec![hit("Songpa", "Songpa may refer to a district or town")])
            .with_page("Songpa", SONGPA_LISTING)
            .with_page("Songpa-gu", SONGPA_ARTICLE);

        let article = resolve(&source, "Songpa", "Seoul", Lang::En)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(article.title(), "Songpa-gu");
        assert!(article.html().contains("south-east Seoul"));
        assert_eq!(source.fetched(), vec!["Songpa", "Songpa-gu"]);
    }

    #[tokio::test]
    async fn listing_without_matching_entry_returns_none() {
        let source = MockSource::new(vec![hit("Songpa", "Songpa may refer to a district")])
            .with_page("Songpa", SONGPA_LISTING);

        let result = resolve(&source, "Songpa", "Busan", Lang::En).await.unwrap();

        assert!(result.is_none());
        assert_eq!(source.fetched(), vec!["Songpa"]);
    }

    #[tokio::test]
    async fn second_listing_is_not_resolved_again() {
        let second_listing = r#"<html><body><section><p>Songpa-gu has other uses:</p>
<ul><li><a href="./Songpa-gu_(Seoul)">Songpa-gu</a>, Seoul</li></ul></section></body></html>"#;
        let source = MockSource::new(vec![hit("Songpa", "Songpa may refer to a district")])
            .with_page("Songpa", SONGPA_LISTING)
            .with_page("Songpa-gu", second_listing);

        let article = resolve(&source, "Songpa", "Seoul", Lang::En)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(article.title(), "Songpa-gu");
        assert!(article.html().contains("has other uses"));
        assert_eq!(source.fetched().len(), 2);
    }

    #[tokio::test]
    async fn search_failure_propagates() {
        let source = MockSource::failing(SourceError::Status(503));

        let err = resolve(&source, "Guro-gu", "Seoul", Lang::En)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Source(SourceError::Status(503))));
        assert!(source.fetched().is_empty());
    }

    #[tokio::test]
    async fn refetch_failure_propagates() {
        let source = MockSource::new(vec![hit("Songpa", "Songpa may refer to a district")])
            .with_page("Songpa", SONGPA_LISTING);

        let err = resolve(&source, "Songpa", "Seoul", Lang::En)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Source(SourceError::Status(404))));
    }

    #[test]
    fn resolved_article_serializes_title_link_html() {
        let page = ArticlePage {
            title: "Guro_District".into(),
            html: "<html><head><title>x</title></head><body><p>Guro</p></body></html>".into(),
        };
        let article = ResolvedArticle::from_page(page, "https://en.wikipedia.org/wiki/Guro_District".into());

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["title"], "Guro District");
        assert_eq!(json["link"], "https://en.wikipedia.org/wiki/Guro_District");
        assert!(json["html"].as_str().unwrap().contains("<p>Guro</p>"));
        assert!(!json["html"].as_str().unwrap().contains("<title>"));
    }
}
