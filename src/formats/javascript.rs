//! JavaScript and TypeScript constant formats.

use crate::models::TransformedToken;

use super::{block_header, Format, FormatOptions, Result};

/// `javascript/es6`: `export const NAME = "value";`
#[derive(Debug, Default, Clone, Copy)]
pub struct JavascriptEs6;

impl Format for JavascriptEs6 {
    fn name(&self) -> &'static str {
        "javascript/es6"
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let mut content = block_header(options);
        for token in tokens {
            let value = serde_json::to_string(token.output_value(options.output_references))?;
            content.push_str(&format!("export const {} = {};", options.prefixed(&token.name, "_"), value));
            if let Some(description) = token.description.as_deref() {
                content.push_str(&format!(" // {}", single_line(description)));
            }
            content.push('\n');
        }
        Ok(content)
    }
}

/// `typescript/es6-declarations`: type declarations matching `javascript/es6`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypescriptDeclarations;

impl Format for TypescriptDeclarations {
    fn name(&self) -> &'static str {
        "typescript/es6-declarations"
    }

    fn extension(&self) -> &'static str {
        "d.ts"
    }

    fn render(&self, tokens: &[TransformedToken], options: &FormatOptions) -> Result<String> {
        let mut content = block_header(options);
        for token in tokens {
            if let Some(description) = token.description.as_deref() {
                content.push_str(&format!("/** {} */\n", single_line(description).replace("*/", "*\\/")));
            }
            content.push_str(&format!("export const {}: string;\n", options.prefixed(&token.name, "_")));
        }
        Ok(content)
    }
}

fn single_line(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}
