//! Link Renderer

use crate::models::{CodeSet, ShortCode};

/// Label shown before every code
pub const LINK_LABEL: &str = "Trello Link";

/// Base URL for Trello cards addressed by short code
pub const TRELLO_CARD_BASE_URL: &str = "https://trello.com/c/";

/// Render one markdown link line for a code
pub fn render_link(code: &ShortCode) -> String {
    format!("[{}: {}]({}{})", LINK_LABEL, code, TRELLO_CARD_BASE_URL, code)
}

/// Render every code as a link line, joined by newlines without a trailing one
pub fn render_links(codes: &CodeSet) -> String {
    codes.iter().map(render_link).collect::<Vec<_>>().join("\n")
}
