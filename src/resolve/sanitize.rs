use dom_query::{Document, Selection};
use tracing::debug;

/// Section headings that only point back to the source site.
const EXTERNAL_LINK_HEADINGS: &[&str] = &["external links", "외부 링크"];

/// Turns a fetched article into a fragment that can be embedded in another page.
///
/// Metadata, `<base>` and `<title>` are dropped, root-relative stylesheets are pinned to the
/// article's host over https, and top-level "External links" sections are removed. The output is
/// the head's stylesheet links followed by the body content; running it through again yields the
/// same bytes.
pub fn sanitize(html: &str) -> String {
    let doc = Document::from(html);

    let host = doc
        .select("base[href]")
        .first()
        .attr("href")
        .and_then(|href| base_host(&href));

    doc.select("meta, base, title").remove();

    if let Some(host) = host {
        for link in doc.select(r#"link[rel~="stylesheet"][href]"#).iter() {
            if let Some(absolute) = link.attr("href").and_then(|href| absolutize(&href, &host)) {
                link.set_attr("href", &absolute);
            }
        }
    }

    for section in doc.select("body > section").iter() {
        if is_external_links(&section) {
            debug!("removing external links section");
            section.remove();
        }
    }

    let mut out = String::new();
    for link in doc.select(r#"head link[rel~="stylesheet"]"#).iter() {
        out.push_str(&link.html());
    }
    // Leading whitespace would be absorbed into <head> when the output is parsed again.
    out.push_str(doc.select("body").inner_html().trim_start());
    out
}

/// `"//en.wikipedia.org/wiki/"` -> `"en.wikipedia.org"`.
fn base_host(href: &str) -> Option<String> {
    let rest = href.split_once("//").map_or(href, |(_, rest)| rest);
    let host = rest.split('/').next()?.trim();
    (!host.is_empty()).then(|| host.to_string())
}

/// Only root-relative paths are rewritten; absolute and protocol-relative ones stay as they are.
fn absolutize(href: &str, host: &str) -> Option<String> {
    (href.starts_with('/') && !href.starts_with("//")).then(|| format!("https://{host}{href}"))
}

fn is_external_links(section: &Selection) -> bool {
    let heading = section
        .select("h1, h2, h3, h4, h5, h6")
        .first()
        .text()
        .to_lowercase();
    EXTERNAL_LINK_HEADINGS
        .iter()
        .any(|phrase| heading.contains(phrase))
}
