//! Flattens the small HTML fragments used in card bodies into plain
//! paragraphs that the egui front-end can lay out.

use scraper::{Html, Selector};

/// Collapse runs of whitespace into single spaces.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split an HTML fragment into the text of its `<p>` elements.
///
/// A fragment with no `<p>` yields its full text as a single paragraph.
/// Blank fragments yield nothing.
pub fn paragraphs(html: &str) -> Vec<String> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(html);

    let found: Vec<String> = Selector::parse("p")
        .ok()
        .map(|sel| {
            fragment
                .select(&sel)
                .map(|p| normalize(&p.text().collect::<String>()))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !found.is_empty() {
        return found;
    }

    let whole = normalize(&fragment.root_element().text().collect::<String>());
    if whole.is_empty() {
        Vec::new()
    } else {
        vec![whole]
    }
}
