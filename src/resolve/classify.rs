use dom_query::Document;

use crate::wiki::Lang;

/// True when the page's lead block reads like a disambiguation page
/// (e.g. "Songpa may refer to several places").
pub fn is_listing_page(html: &str, lang: Lang) -> bool {
    let doc = Document::from(html);

    // Parsoid output wraps the lead in a <section>; other markup falls back to the first paragraph.
    let mut lead = doc.select("section").first();
    if !lead.exists() {
        lead = doc.select("p").first();
    }

    let text = lead.text().to_lowercase();
    lang.listing_hints().iter().any(|hint| text.contains(hint))
}
