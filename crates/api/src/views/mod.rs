//! Server-rendered HTML.
//!
//! Views are plain functions from display models to markup. Every piece of
//! text that came from outside (catalog data, query strings, profile names)
//! goes through [`escape`] before it is written.

pub mod auth;
pub mod detail;
pub mod errors;
pub mod home;
pub mod layout;
pub mod movies;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
