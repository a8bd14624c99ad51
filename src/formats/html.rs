//! Self-contained HTML documentation page.
//!
//! Each top-level group becomes a section; each token a row with a visual
//! preview chosen by type. Values that cannot be previewed get an empty
//! preview instead of failing the render.

use crate::models::{TokenType, TransformedToken};
use crate::units::magnitude;

use super::{capitalize, group_by_top_segment, Format, FormatOptions, Result};

const DEFAULT_TITLE: &str = "Design Tokens";
const MAX_BAR_WIDTH: f64 = 100.0;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#1a1a1a}\
table{border-collapse:collapse;width:100%;margin-bottom:2rem}\
th,td{text-align:left;padding:.5rem;border-bottom:1px solid #e5e5e5;vertical-align:middle}\
code{font-size:.875rem}\
.swatch{width:32px;height:32px;border-radius:4px;border:1px solid #ccc}\
.bar{height:8px;background:#4f46e5}\
.shadow{width:48px;height:32px;background:#fff}";

/// `html/docs`
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlDocs;

impl Format for HtmlDocs {
    fn name(&self) -> &'static str {
        "html/docs"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let title = escape_html(options.title_or(DEFAULT_TITLE));

        let mut content = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        content.push_str(&format!("<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n", title, STYLE));
        content.push_str(&format!("<h1>{}</h1>\n", title));
        if options.file_header {
            if let Some(timestamp) = &options.timestamp {
                content.push_str(&format!("<p>Generated on {}</p>\n", escape_html(timestamp)));
            }
        }

        for (group, members) in group_by_top_segment(tokens) {
            content.push_str(&format!(
                "<section id=\"{}\">\n<h2>{}</h2>\n<table>\n",
                escape_html(group),
                escape_html(&capitalize(group))
            ));
            content.push_str("<tr><th>Preview</th><th>Name</th><th>Value</th><th>Description</th></tr>\n");
            for token in members {
                let value = token.output_value(options.output_references);
                let preview_value = token.resolved_value.as_deref().unwrap_or(value);
                content.push_str(&format!(
                    "<tr><td>{}</td><td><code>{}</code></td><td><code>{}</code></td><td>{}</td></tr>\n",
                    preview(token.token_type, preview_value),
                    escape_html(&token.name),
                    escape_html(value),
                    escape_html(token.description.as_deref().unwrap_or("")),
                ));
            }
            content.push_str("</table>\n</section>\n");
        }

        content.push_str("</body>\n</html>\n");
        Ok(content)
    }
}

/// Width in px of the size bar for a dimension value.
pub fn bar_width(value: &str) -> f64 {
    magnitude(value).map(|m| (m * 2.0).clamp(0.0, MAX_BAR_WIDTH)).unwrap_or(0.0)
}

fn preview(token_type: TokenType, value: &str) -> String {
    let value = escape_html(value);
    match token_type {
        TokenType::Color => format!("<div class=\"swatch\" style=\"background:{}\"></div>", value),
        TokenType::Dimension | TokenType::FontSize => {
            format!("<div class=\"bar\" style=\"width:{}px\"></div>", bar_width(&value))
        }
        TokenType::Shadow => format!("<div class=\"shadow\" style=\"box-shadow:{}\"></div>", value),
        TokenType::FontFamily => format!("<span style=\"font-family:{}\">Aa Bb Cc</span>", value),
        TokenType::FontWeight => format!("<span style=\"font-weight:{}\">Aa Bb Cc</span>", value),
        _ => String::new(),
    }
}

/// Escape `& < > " '` for HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
