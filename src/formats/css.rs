//! Stylesheet variable formats.
//!
//! # Example Output
//!
//! ```css
//! /**
//!  * Do not edit directly
//!  */
//!
//! :root {
//!   --colors-primary-500: #FF0000; /* Brand red */
//!   --button-bg: var(--colors-primary-500);
//! }
//! ```

use crate::models::TransformedToken;

use super::{block_header, Format, FormatOptions, Result};

/// `css/variables`: custom properties inside a selector block.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssVariables;

impl Format for CssVariables {
    fn name(&self) -> &'static str {
        "css/variables"
    }

    fn extension(&self) -> &'static str {
        "css"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let mut content = block_header(options);
        content.push_str(&format!("{} {{\n", options.selector));
        for token in tokens {
            content.push_str(&format!("  --{}: {};", options.prefixed(&token.name, "-"), css_value(token, options)));
            push_comment(&mut content, token);
            content.push('\n');
        }
        content.push_str("}\n");
        Ok(content)
    }
}

/// `scss/variables`: one `$name: value;` line per token.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScssVariables;

impl Format for ScssVariables {
    fn name(&self) -> &'static str {
        "scss/variables"
    }

    fn extension(&self) -> &'static str {
        "scss"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let mut content = block_header(options);
        for token in tokens {
            content.push_str(&format!(
                "${}: {};",
                options.prefixed(&token.name, "-"),
                token.output_value(options.output_references)
            ));
            push_comment(&mut content, token);
            content.push('\n');
        }
        Ok(content)
    }
}

/// Output value with the prefix carried into `var(--...)` references, so
/// they point at the prefixed declarations.
fn css_value(token: &TransformedToken, options: &FormatOptions) -> String {
    let value = token.output_value(options.output_references);
    match value.strip_prefix("var(--").and_then(|rest| rest.strip_suffix(')')) {
        Some(name) => format!("var(--{})", options.prefixed(name, "-")),
        None => value.to_string(),
    }
}

fn push_comment(content: &mut String, token: &TransformedToken) {
    if let Some(description) = token.description.as_deref() {
        content.push_str(&format!(" /* {} */", escape_comment(description)));
    }
}

/// Keep a description from closing the comment early.
pub fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::test_support::sample;

    #[test]
    fn test_css_variables() {
        let out = CssVariables.render(&sample("css"), &FormatOptions::default()).unwrap();
        assert_eq!(
            out,
            "/**\n * Do not edit directly\n */\n\n\
             :root {\n  \
             --colors-primary-500: #FF0000; /* Brand red */\n  \
             --colors-overlay: rgba(0, 0, 0, 0.5);\n  \
             --spacing-md: 1.000rem;\n  \
             --button-bg: var(--colors-primary-500);\n\
             }\n"
        );
    }

    #[test]
    fn test_css_resolved_values_and_options() {
        let options = FormatOptions::default()
            .with_selector(".theme-dark")
            .with_prefix("acme")
            .with_output_references(false);
        let out = CssVariables.render(&sample("css"), &options).unwrap();
        assert!(out.contains(".theme-dark {\n"));
        assert!(out.contains("  --acme-button-bg: #FF0000;\n"));
    }

    #[test]
    fn test_css_prefix_applies_to_references() {
        let options = FormatOptions::default().with_prefix("acme");
        let out = CssVariables.render(&sample("css"), &options).unwrap();
        assert!(out.contains("  --acme-colors-primary-500: #FF0000;"));
        assert!(out.contains("  --acme-button-bg: var(--acme-colors-primary-500);\n"));
    }

    #[test]
    fn test_scss_variables() {
        let options = FormatOptions { file_header: false, ..Default::default() };
        let out = ScssVariables.render(&sample("scss"), &options).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "$colors-primary-500: #FF0000; /* Brand red */");
        assert_eq!(lines[2], "$spacing-md: 1.000rem;");
        assert_eq!(lines[3], "$button-bg: #FF0000;");
    }

    #[test]
    fn test_comment_cannot_break_out() {
        assert_eq!(escape_comment("a */ b"), "a *\\/ b");
    }

    #[test]
    fn test_empty_token_list() {
        let options = FormatOptions { file_header: false, ..Default::default() };
        assert_eq!(CssVariables.render(&[], &options).unwrap(), ":root {\n}\n");
    }
}
