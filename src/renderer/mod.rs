//! Plain-text rendering of fetched documents
//!
//! Strips `<...>` markup and substitutes the few entities the renderer
//! understands. `view-source:` responses pass through untouched.

use crate::network::Response;

/// Render a response body for terminal output
pub fn render(response: &Response) -> String {
    if response.view_source() {
        return response.body_text().into_owned();
    }
    strip_tags(response.body())
}

/// Drop everything between `<` and `>`, then decode entities
fn strip_tags(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    substitute_entities(&out)
}

fn substitute_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
