//! Markdown documentation table.

use crate::models::{TokenType, TransformedToken};

use super::{capitalize, group_by_top_segment, Format, FormatOptions, Result};

const DEFAULT_TITLE: &str = "Design Tokens";

/// `markdown/table`: one table per top-level group.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownTable;

impl Format for MarkdownTable {
    fn name(&self) -> &'static str {
        "markdown/table"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let mut content = format!("# {}\n", escape_cell(options.title_or(DEFAULT_TITLE)));
        if options.file_header {
            if let Some(timestamp) = &options.timestamp {
                content.push_str(&format!("\n_Generated on {}_\n", timestamp));
            }
        }

        for (group, members) in group_by_top_segment(tokens) {
            content.push_str(&format!("\n## {}\n\n", escape_cell(&capitalize(group))));
            content.push_str("| Name | Value | Type | Description |\n");
            content.push_str("|------|-------|------|-------------|\n");
            for token in members {
                let value = token.output_value(options.output_references);
                let preview_value = token.resolved_value.as_deref().unwrap_or(value);
                content.push_str(&format!(
                    "| `{}` | {}`{}` | {} | {} |\n",
                    escape_cell(&token.name),
                    swatch(token, preview_value),
                    escape_cell(value),
                    token.token_type,
                    escape_cell(token.description.as_deref().unwrap_or("")),
                ));
            }
        }
        Ok(content)
    }
}

/// Inline color marker shown before color values. Aliases pass their
/// resolved value so a `var(...)` cell still gets a swatch.
fn swatch(token: &TransformedToken, value: &str) -> String {
    if token.token_type != TokenType::Color || value.starts_with("var(") {
        return String::new();
    }
    format!(
        "<span style=\"display:inline-block;width:12px;height:12px;background:{};\"></span> ",
        value.replace('"', "'")
    )
}

/// Escape pipes and flatten newlines so a value stays inside its cell.
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
