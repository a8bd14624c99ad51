//! Text style conversion.
//!
//! A text style fans out into up to four sibling tokens under its leaf name:
//! `fontFamily`, `fontSize`, `fontWeight` and `lineHeight`.

use crate::models::{TextStyle, Token, TokenType};
use crate::units::format_number;

/// Unitless line-height ratio, two decimal places.
///
/// ```
/// use tokenforge::adapter::line_height_ratio;
///
/// assert_eq!(line_height_ratio(24.0, 16.0), Some("1.50".to_string()));
/// assert_eq!(line_height_ratio(24.0, 0.0), None);
/// ```
pub fn line_height_ratio(line_height_px: f64, font_size_px: f64) -> Option<String> {
    if font_size_px <= 0.0 {
        return None;
    }
    Some(format!("{:.2}", line_height_px / font_size_px))
}

fn child(path: &[String], leaf: &str) -> Vec<String> {
    let mut child = path.to_vec();
    child.push(leaf.to_string());
    child
}

/// Convert a text style into its sibling tokens below `path`.
///
/// Missing properties produce no token; an empty result means the style had
/// nothing usable.
pub fn typography_tokens(style: &TextStyle, path: &[String]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(4);

    if let Some(family) = style.font_family.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        tokens.push(Token::new(child(path, "fontFamily"), TokenType::FontFamily, family));
    }

    if let Some(size) = style.font_size {
        tokens.push(Token::new(
            child(path, "fontSize"),
            TokenType::FontSize,
            format!("{}px", format_number(size)),
        ));
    }

    if let Some(weight) = style.font_weight {
        tokens.push(Token::new(child(path, "fontWeight"), TokenType::FontWeight, format_number(weight)));
    }

    if let Some(line_height) = style.line_height_px {
        let value = style
            .font_size
            .and_then(|size| line_height_ratio(line_height, size))
            .unwrap_or_else(|| format_number(line_height));
        tokens.push(Token::new(child(path, "lineHeight"), TokenType::LineHeight, value));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Vec<String> {
        vec!["heading".to_string(), "h1".to_string()]
    }

    fn style() -> TextStyle {
        TextStyle { name: "heading/h1".to_string(), ..Default::default() }
    }

    #[test]
    fn test_full_style_yields_four_tokens() {
        let s = TextStyle {
            font_family: Some("Inter".to_string()),
            font_size: Some(32.0),
            font_weight: Some(700.0),
            line_height_px: Some(40.0),
            ..style()
        };
        let tokens = typography_tokens(&s, &path());

        let summary: Vec<(String, TokenType, &str)> =
            tokens.iter().map(|t| (t.path_key(), t.token_type, t.value.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                ("heading.h1.fontFamily".to_string(), TokenType::FontFamily, "Inter"),
                ("heading.h1.fontSize".to_string(), TokenType::FontSize, "32px"),
                ("heading.h1.fontWeight".to_string(), TokenType::FontWeight, "700"),
                ("heading.h1.lineHeight".to_string(), TokenType::LineHeight, "1.25"),
            ]
        );
    }

    #[test]
    fn test_font_size_only() {
        let s = TextStyle { font_size: Some(24.0), ..style() };
        let tokens = typography_tokens(&s, &path());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::FontSize);
        assert_eq!(tokens[0].value, "24px");
    }

    #[test]
    fn test_line_height_ratio_from_pixels() {
        let s = TextStyle { font_size: Some(16.0), line_height_px: Some(24.0), ..style() };
        let tokens = typography_tokens(&s, &path());
        let line_height = tokens.iter().find(|t| t.token_type == TokenType::LineHeight).unwrap();
        assert_eq!(line_height.value, "1.50");
    }

    #[test]
    fn test_line_height_without_font_size_stays_raw() {
        let s = TextStyle { line_height_px: Some(24.0), ..style() };
        let tokens = typography_tokens(&s, &path());
        assert_eq!(tokens[0].value, "24");
    }

    #[test]
    fn test_line_height_with_zero_font_size_stays_raw() {
        let s = TextStyle { font_size: Some(0.0), line_height_px: Some(18.5), ..style() };
        let tokens = typography_tokens(&s, &path());
        let line_height = tokens.iter().find(|t| t.token_type == TokenType::LineHeight).unwrap();
        assert_eq!(line_height.value, "18.5");
    }

    #[test]
    fn test_fractional_font_size() {
        let s = TextStyle { font_size: Some(13.5), ..style() };
        assert_eq!(typography_tokens(&s, &path())[0].value, "13.5px");
    }

    #[test]
    fn test_blank_family_skipped() {
        let s = TextStyle { font_family: Some("  ".to_string()), ..style() };
        assert!(typography_tokens(&s, &path()).is_empty());
    }
}
