use dom_query::{Document, Selection};
use percent_encoding::percent_decode_str;
use tracing::debug;

/// Finds the article title a disambiguation page points to for `target` inside `parent`.
///
/// Both disambiguators must already be lower-cased. Only the first list item mentioning both
/// is considered; if that item carries no usable link the result is empty even when a later
/// item would have matched.
pub fn resolve_from_listing(html: &str, target: &str, parent: &str) -> String {
    let doc = Document::from(html);

    let matched = doc
        .select("li")
        .iter()
        .filter(|li| li.select("a").exists())
        .find(|li| {
            let inner = li.inner_html().to_lowercase();
            inner.contains(target) && inner.contains(parent)
        });

    let Some(item) = matched else {
        debug!(name = target, parent, "no list item mentions both names");
        return String::new();
    };

    match pick_link(&item, target, parent) {
        Some(href) => title_from_href(&href),
        None => {
            debug!(name = target, parent, "matching list item has no usable link");
            String::new()
        }
    }
}

/// A target-named link wins unless it is an edit link; otherwise the parent-named link is used.
fn pick_link(item: &Selection, target: &str, parent: &str) -> Option<String> {
    let anchors: Vec<Selection> = item.select("a").iter().collect();
    let text_contains = |a: &Selection, needle: &str| a.text().to_lowercase().contains(needle);

    let by_target = anchors
        .iter()
        .find(|a| text_contains(*a, target))
        .and_then(|a| a.attr("href"))
        .filter(|href| !is_edit_link(href));
    if let Some(href) = by_target {
        return Some(href.to_string());
    }

    anchors
        .iter()
        .find(|a| text_contains(*a, parent))
        .and_then(|a| a.attr("href"))
        .map(|href| href.to_string())
}

fn is_edit_link(href: &str) -> bool {
    href.contains("action=edit")
}

/// `"./Songpa_District?foo#bar"` -> `"Songpa_District"`, percent-decoded.
fn title_from_href(href: &str) -> String {
    let segment = href.rsplit('/').next().unwrap_or(href);
    let segment = segment.split(['?', '#']).next().unwrap_or(segment);
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
