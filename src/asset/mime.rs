//! Content-type detection for baked assets.
//!
//! One canonical table shared by the generator, the development resolver,
//! the pack loader and generated modules.

/// MIME constants for the closed content-type set.
pub mod types {
    pub const PNG: &str = "image/png";
    pub const SVG: &str = "image/svg";
    pub const JPG: &str = "image/jpg";
    pub const CSS: &str = "text/css";
    pub const JAVASCRIPT: &str = "application/js";
    pub const EOT: &str = "font/eot";
    pub const TTF: &str = "font/ttf";
    pub const WOFF: &str = "application/font-woff";
    pub const HTML: &str = "text/html";
    /// Server-generated status pages; never derived from a file suffix.
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    /// Unmatched suffix.
    pub const NONE: &str = "";
}

/// Ordered suffix table, first match wins.
const SUFFIXES: &[(&str, &str)] = &[
    (".png", types::PNG),
    (".svg", types::SVG),
    (".jpg", types::JPG),
    (".css", types::CSS),
    (".js", types::JAVASCRIPT),
    (".eot", types::EOT),
    (".ttf", types::TTF),
    (".woff", types::WOFF),
    (".woff2", types::WOFF),
    (".html", types::HTML),
];

/// Guess the content type of `path` from its suffix.
///
/// Returns an empty string when no suffix matches.
pub fn content_type(path: &str) -> &'static str {
    SUFFIXES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map_or(types::NONE, |(_, mime)| mime)
}
