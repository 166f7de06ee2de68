//! Landing page: server-rendered HTML with an inline stylesheet.
//!
//! The page is static apart from the demo widget section, which is rendered
//! from a `WidgetSnapshot` of the visitor's session.

pub mod sections;
pub mod widget_view;

use chrono::{Datelike, Utc};

use crate::widget::WidgetSnapshot;

pub const BRAND: &str = "CareerFlow";

/// Renders the full landing page around the given widget state.
pub fn render_page(widget: &WidgetSnapshot) -> String {
    let mut html = String::with_capacity(16384);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>");
    html.push_str(BRAND);
    html.push_str(" | Land your next role faster</title>\n");
    html.push_str(sections::STYLESHEET);
    html.push_str("</head>\n<body>\n");
    html.push_str(sections::NAV);
    html.push_str(sections::HERO);
    html.push_str(&sections::features());
    html.push_str("<section id=\"get-started\" class=\"get-started\">\n<div class=\"narrow\">\n");
    html.push_str("<h2>Try the core workflow</h2>\n");
    html.push_str(
        "<p class=\"lead\">Upload a resume to get job suggestions and your ATS score.</p>\n",
    );
    html.push_str(&widget_view::render(widget));
    html.push_str("</div>\n</section>\n");
    html.push_str(&sections::footer(Utc::now().year()));
    html.push_str("</body>\n</html>\n");
    html
}

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> WidgetSnapshot {
        WidgetSnapshot {
            content: String::new(),
            resume_id: None,
            jobs: vec![],
            selected_job_id: None,
            score: None,
            loading: false,
            error: None,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_contains_all_sections_in_order() {
        let html = render_page(&empty_snapshot());

        let nav = html.find("<nav").unwrap();
        let hero = html.find("Land your next role faster</h1>").unwrap();
        let features = html.find("id=\"features\"").unwrap();
        let get_started = html.find("id=\"get-started\"").unwrap();
        let footer = html.find("<footer").unwrap();
        assert!(nav < hero && hero < features && features < get_started && get_started < footer);
    }

    #[test]
    fn test_title_uses_plain_separator() {
        let html = render_page(&empty_snapshot());
        assert!(html.contains("<title>CareerFlow | Land your next role faster</title>"));
        assert!(!html.contains('\u{2014}'));
    }

    #[test]
    fn test_footer_shows_current_year() {
        let html = render_page(&empty_snapshot());
        let expected = format!("© {} CareerFlow", Utc::now().year());
        assert!(html.contains(&expected));
    }
}
