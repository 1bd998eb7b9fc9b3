//! Server-rendered HTML pages.
//!
//! Pages are plain strings assembled with `format!`. Every piece of user
//! data goes through [`escape`] before it is embedded.

pub mod resource;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Resources listed in the navigation bar, as (route segment, label).
const NAV: &[(&str, &str)] = &[("Books", "Books"), ("News", "News"), ("Notes", "Notes")];

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared layout.
pub fn layout(title: &str, content: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(segment, label)| format!(r#"<li><a href="/{segment}">{label}</a></li>"#))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Dunno</title>
</head>
<body>
<header><nav><a href="/">Dunno</a><ul>{nav}</ul></nav></header>
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Render a page with the given status.
pub fn page(status: StatusCode, title: &str, content: &str) -> Response {
    (status, Html(layout(title, content))).into_response()
}

/// Render an error page.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        "<h1>{}</h1>\n<p class=\"error\">{}</p>",
        escape(title),
        escape(message)
    );
    page(status, title, &content)
}

/// Landing page linking each resource list.
pub fn home() -> String {
    let links: String = NAV
        .iter()
        .map(|(segment, label)| format!(r#"<li><a href="/{segment}">{label}</a></li>"#))
        .collect();
    layout("Home", &format!("<h1>Dunno</h1>\n<ul>{links}</ul>"))
}
