use crate::wiki::{Lang, SearchHit};

/// Picks the first hit, in source rank order, whose excerpt reads like an administrative
/// division and whose title mentions the query's base name. Hits are never re-ranked.
pub fn select_relevant<'a>(
    hits: &'a [SearchHit],
    target: &str,
    lang: Lang,
) -> Option<&'a SearchHit> {
    let base = base_name(target);
    hits.iter().find(|hit| {
        let excerpt = hit.excerpt.to_lowercase();
        lang.keywords().iter().any(|kw| excerpt.contains(kw))
            && hit.title.to_lowercase().contains(&base)
    })
}

/// `"Guro-gu"` -> `"guro"`: the part before the first hyphen, lower-cased.
fn base_name(target: &str) -> String {
    target
        .split_once('-')
        .map_or(target, |(base, _)| base)
        .trim()
        .to_lowercase()
}
