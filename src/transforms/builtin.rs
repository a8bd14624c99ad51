//! Built-in transforms.
//!
//! Naming and attribute transforms derive everything from the token's path,
//! type and provenance, never from the current `name`, so running them again
//! changes nothing. Unit conversion only matches bare `px` values and
//! so becomes a no-op once it has run.

use crate::color::{format_alpha, hex_to_rgb, parse_color};
use crate::models::{
    reference_target, Attributes, TokenType, TransformedToken, ATTR_CATEGORY, ATTR_COMMENT,
    ATTR_PROVENANCE, ATTR_STATE, ATTR_SUBCATEGORY,
};
use crate::units::{parse_dimension, px_to_rem};

use super::types::Transform;

pub const ATTRIBUTE_CATEGORY: &str = "attribute/category";
pub const ATTRIBUTE_PROVENANCE: &str = "attribute/provenance";
pub const ATTRIBUTE_COMMENT: &str = "attribute/comment";
pub const NAME_SEMANTIC: &str = "name/semantic";
pub const NAME_KEBAB: &str = "name/kebab";
pub const NAME_CAMEL: &str = "name/camel";
pub const NAME_CONSTANT: &str = "name/constant";
pub const VALUE_REFERENCE: &str = "value/reference";
pub const SIZE_PX_TO_REM: &str = "size/pxToRem";
pub const SIZE_PX: &str = "size/px";
pub const COLOR_RGBA: &str = "color/rgba";
pub const COLOR_HEX: &str = "color/hex";

/// Trailing path segments recognised as interaction states.
pub const STATES: [&str; 6] = ["hover", "active", "focus", "disabled", "selected", "pressed"];

/// Every built-in transform, in registration order.
pub fn builtin_transforms() -> Vec<Transform> {
    vec![
        Transform::attribute(ATTRIBUTE_CATEGORY, |t, _| category_attributes(&t.path)),
        Transform::attribute(ATTRIBUTE_PROVENANCE, |t, _| {
            single(ATTR_PROVENANCE, t.source_key.as_deref().or(t.source_name.as_deref()).unwrap_or(""))
        })
        .with_filter(|t, _| t.source_key.is_some() || t.source_name.is_some()),
        Transform::attribute(ATTRIBUTE_COMMENT, |t, _| single(ATTR_COMMENT, t.description.as_deref().unwrap_or("")))
            .with_filter(|t, _| t.description.is_some()),
        Transform::name(NAME_SEMANTIC, |t, _| semantic_name(&t.path, t.original_type)),
        Transform::name(NAME_KEBAB, |t, _| kebab_case(t.path.iter().map(String::as_str))),
        Transform::name(NAME_CAMEL, |t, _| camel_case(&t.path)),
        Transform::name(NAME_CONSTANT, |t, _| constant_case(&t.path)),
        Transform::value(VALUE_REFERENCE, |t, _| reference_to_var(&t.value))
            .with_filter(|t, options| options.output_references && t.is_reference())
            .transitive(),
        Transform::value(SIZE_PX_TO_REM, |t, options| {
            match parse_dimension(&t.value) {
                Some((px, "px")) => px_to_rem(px, options.base_font_size),
                _ => t.value.clone(),
            }
        })
        .with_filter(|t, _| t.token_type.is_size() && matches!(parse_dimension(&t.value), Some((_, "px")))),
        Transform::value(SIZE_PX, |t, _| format!("{}px", t.value.trim()))
            .with_filter(|t, _| t.token_type.is_size() && matches!(parse_dimension(&t.value), Some((_, "")))),
        Transform::value(COLOR_RGBA, |t, _| hex_with_alpha(&t.value, t.alpha.unwrap_or(1.0)))
            .with_filter(|t, _| t.token_type == TokenType::Color && t.alpha.is_some() && hex_to_rgb(&t.value).is_ok()),
        Transform::value(COLOR_HEX, |t, _| match parse_color(&t.value) {
            Ok(rgba) => rgba.to_hex(),
            Err(_) => t.value.clone(),
        })
        .with_filter(|t, _| t.token_type == TokenType::Color && !t.value.trim_start().starts_with('#')),
    ]
}

fn single(key: &str, value: &str) -> Attributes {
    Attributes::from([(key.to_string(), value.to_string())])
}

/// Category for a top-level path segment.
pub fn category_for(segment: &str) -> &str {
    match segment {
        "colors" | "color" => "color",
        "spacing" | "space" => "space",
        "typography" => "typography",
        "effects" | "shadows" => "effect",
        "borderRadius" | "radius" => "radius",
        other => other,
    }
}

/// `category`, `subcategory` and `state` attributes derived from a path.
pub fn category_attributes(path: &[String]) -> Attributes {
    let mut attributes = Attributes::new();
    let Some(top) = path.first() else {
        return attributes;
    };

    attributes.insert(ATTR_CATEGORY.to_string(), category_for(top).to_string());
    if let Some(sub) = path.get(1) {
        attributes.insert(ATTR_SUBCATEGORY.to_string(), sub.clone());
    }
    if let Some(last) = path.last() {
        let lower = last.to_ascii_lowercase();
        if STATES.contains(&lower.as_str()) {
            attributes.insert(ATTR_STATE.to_string(), lower);
        }
    }
    attributes
}

/// Name prefix for a token type, if the type has one.
pub fn type_prefix(token_type: TokenType) -> Option<&'static str> {
    match token_type {
        TokenType::Color => Some("color"),
        TokenType::Dimension => Some("size"),
        TokenType::FontFamily => Some("font"),
        TokenType::FontSize => Some("font-size"),
        TokenType::FontWeight => Some("font-weight"),
        TokenType::LineHeight => Some("line-height"),
        TokenType::Shadow => Some("shadow"),
        TokenType::Number => Some("number"),
        TokenType::String | TokenType::Unknown => None,
    }
}

/// Type-prefixed kebab name.
///
/// ```
/// use tokenforge::models::TokenType;
/// use tokenforge::transforms::semantic_name;
///
/// let path = vec!["primary".to_string(), "500".to_string()];
/// assert_eq!(semantic_name(&path, TokenType::Color), "color-primary-500");
/// ```
pub fn semantic_name(path: &[String], token_type: TokenType) -> String {
    let prefix = type_prefix(token_type)
        .filter(|prefix| path.first().map(String::as_str) != Some(*prefix));
    kebab_case(prefix.into_iter().chain(path.iter().map(String::as_str)))
}

/// Join with `-`, lower-case, map anything outside `[a-z0-9-]` to `-`,
/// collapse runs of `-` and trim them from both ends.
pub fn kebab_case<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let joined = segments.into_iter().collect::<Vec<_>>().join("-").to_lowercase();

    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Alphanumeric words of every segment, splitting on any other character.
fn words(path: &[String]) -> Vec<String> {
    path.iter()
        .flat_map(|segment| segment.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn camel_case(path: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words(path).iter().enumerate() {
        let mut chars = word.chars();
        let Some(first) = chars.next() else { continue };
        if i == 0 {
            out.push(first.to_ascii_lowercase());
        } else {
            out.push(first.to_ascii_uppercase());
        }
        out.push_str(chars.as_str());
    }
    out
}

pub fn constant_case(path: &[String]) -> String {
    let name = words(path).join("_").to_ascii_uppercase();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// `{a.b.c}` to `var(--a-b-c)`; anything else unchanged.
pub fn reference_to_var(value: &str) -> String {
    match reference_target(value) {
        Some(target) => format!("var(--{})", kebab_case(target.split('.'))),
        None => value.to_string(),
    }
}

/// `#RRGGBB` plus alpha to `rgba(r, g, b, a)`.
pub fn hex_with_alpha(hex: &str, alpha: f64) -> String {
    match hex_to_rgb(hex) {
        Ok((r, g, b)) => format!("rgba({}, {}, {}, {})", r, g, b, format_alpha(alpha)),
        Err(_) => hex.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;
    use crate::transforms::TransformOptions;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn transform(name: &str) -> Transform {
        builtin_transforms().into_iter().find(|t| t.name == name).unwrap()
    }

    fn run(name: &str, token: &Token, options: &TransformOptions) -> TransformedToken {
        let mut t = TransformedToken::from_token(token);
        transform(name).apply(&mut t, options);
        t
    }

    #[test]
    fn test_semantic_name_scenario() {
        assert_eq!(semantic_name(&path(&["primary", "500"]), TokenType::Color), "color-primary-500");
    }

    #[test]
    fn test_semantic_name_prefix_not_doubled() {
        assert_eq!(semantic_name(&path(&["color", "brand"]), TokenType::Color), "color-brand");
        assert_eq!(
            semantic_name(&path(&["heading", "h1", "fontSize"]), TokenType::FontSize),
            "font-size-heading-h1-fontsize"
        );
        assert_eq!(semantic_name(&path(&["misc"]), TokenType::String), "misc");
    }

    #[test]
    fn test_kebab_normalization() {
        assert_eq!(kebab_case(["Brand Blue", "--Hover--"]), "brand-blue-hover");
        assert_eq!(kebab_case(["a__b"]), "a-b");
        assert_eq!(kebab_case(["", "x"]), "x");
    }

    #[test]
    fn test_camel_and_constant() {
        let p = path(&["colors", "primary-500", "hover"]);
        assert_eq!(camel_case(&p), "colorsPrimary500Hover");
        assert_eq!(constant_case(&p), "COLORS_PRIMARY_500_HOVER");
        assert_eq!(constant_case(&path(&["500"])), "_500");
    }

    #[test]
    fn test_category_attributes() {
        let attrs = category_attributes(&path(&["colors", "button", "Hover"]));
        assert_eq!(attrs.get(ATTR_CATEGORY).map(String::as_str), Some("color"));
        assert_eq!(attrs.get(ATTR_SUBCATEGORY).map(String::as_str), Some("button"));
        assert_eq!(attrs.get(ATTR_STATE).map(String::as_str), Some("hover"));

        let attrs = category_attributes(&path(&["brand"]));
        assert_eq!(attrs.get(ATTR_CATEGORY).map(String::as_str), Some("brand"));
        assert!(attrs.get(ATTR_SUBCATEGORY).is_none());
        assert_eq!(category_for("shadows"), "effect");
        assert_eq!(category_for("borderRadius"), "radius");
    }

    #[test]
    fn test_reference_scenario() {
        let token = Token::new(path(&["alias"]), TokenType::Color, "{colors.primary.500}");
        let t = run(VALUE_REFERENCE, &token, &TransformOptions::default());
        assert_eq!(t.value, "var(--colors-primary-500)");
    }

    #[test]
    fn test_reference_matches_kebab_name() {
        let target = Token::new(path(&["typography", "body", "fontSize"]), TokenType::FontSize, "16px");
        let alias = Token::new(path(&["text", "size"]), TokenType::FontSize, "{typography.body.fontSize}");
        let options = TransformOptions::default();

        let name = run(NAME_KEBAB, &target, &options).name;
        assert_eq!(name, "typography-body-fontsize");
        assert_eq!(run(VALUE_REFERENCE, &alias, &options).value, format!("var(--{})", name));
    }

    #[test]
    fn test_reference_inactive_without_output_references() {
        let token = Token::new(path(&["alias"]), TokenType::Color, "{colors.primary.500}");
        let options = TransformOptions::default().with_output_references(false);
        let t = run(VALUE_REFERENCE, &token, &options);
        assert_eq!(t.value, "{colors.primary.500}");
    }

    #[test]
    fn test_px_to_rem_scenario() {
        let token = Token::new(path(&["heading", "fontSize"]), TokenType::FontSize, "24px");
        let t = run(SIZE_PX_TO_REM, &token, &TransformOptions::default());
        assert_eq!(t.value, "1.500rem");
    }

    #[test]
    fn test_px_to_rem_custom_base_and_skips() {
        let options = TransformOptions::default().with_base_font_size(10.0);
        let token = Token::new(path(&["space", "md"]), TokenType::Dimension, "15px");
        assert_eq!(run(SIZE_PX_TO_REM, &token, &options).value, "1.500rem");

        let rem = Token::new(path(&["space", "md"]), TokenType::Dimension, "1.500rem");
        assert_eq!(run(SIZE_PX_TO_REM, &rem, &options).value, "1.500rem");

        let color = Token::new(path(&["c"]), TokenType::Color, "24px");
        assert_eq!(run(SIZE_PX_TO_REM, &color, &options).value, "24px");
    }

    #[test]
    fn test_px_appends_unit_to_bare_numbers() {
        let token = Token::new(path(&["space", "sm"]), TokenType::Dimension, "8");
        assert_eq!(run(SIZE_PX, &token, &TransformOptions::default()).value, "8px");
        let token = Token::new(path(&["space", "sm"]), TokenType::Dimension, "8px");
        assert_eq!(run(SIZE_PX, &token, &TransformOptions::default()).value, "8px");
    }

    #[test]
    fn test_color_rgba_only_with_alpha() {
        let token = Token::new(path(&["overlay"]), TokenType::Color, "#000000").with_alpha(0.5);
        assert_eq!(run(COLOR_RGBA, &token, &TransformOptions::default()).value, "rgba(0, 0, 0, 0.5)");

        let opaque = Token::new(path(&["solid"]), TokenType::Color, "#FF0000");
        assert_eq!(run(COLOR_RGBA, &opaque, &TransformOptions::default()).value, "#FF0000");
    }

    #[test]
    fn test_color_rgba_keeps_alpha_precision() {
        let token = Token::new(path(&["scrim"]), TokenType::Color, "#000000").with_alpha(0.125);
        assert_eq!(run(COLOR_RGBA, &token, &TransformOptions::default()).value, "rgba(0, 0, 0, 0.125)");
    }

    #[test]
    fn test_color_hex_normalizes_css_colors() {
        let token = Token::new(path(&["c"]), TokenType::Color, "rgb(255, 0, 0)");
        assert_eq!(run(COLOR_HEX, &token, &TransformOptions::default()).value, "#FF0000");
        let named = Token::new(path(&["c"]), TokenType::Color, "white");
        assert_eq!(run(COLOR_HEX, &named, &TransformOptions::default()).value, "#FFFFFF");
        let junk = Token::new(path(&["c"]), TokenType::Color, "not-a-color");
        assert_eq!(run(COLOR_HEX, &junk, &TransformOptions::default()).value, "not-a-color");
    }

    #[test]
    fn test_provenance_and_comment() {
        let token = Token::new(path(&["a"]), TokenType::Color, "#FFFFFF")
            .with_source(Some("S:1".into()), Some("a".into()))
            .with_description(Some("White".into()));
        let t = run(ATTRIBUTE_PROVENANCE, &token, &TransformOptions::default());
        assert_eq!(t.attribute(ATTR_PROVENANCE), Some("S:1"));
        let t = run(ATTRIBUTE_COMMENT, &token, &TransformOptions::default());
        assert_eq!(t.attribute(ATTR_COMMENT), Some("White"));

        let bare = Token::new(path(&["a"]), TokenType::Color, "#FFFFFF");
        let t = run(ATTRIBUTE_COMMENT, &bare, &TransformOptions::default());
        assert!(t.attribute(ATTR_COMMENT).is_none());
    }

    #[test]
    fn test_naming_is_idempotent() {
        let token = Token::new(path(&["Primary", "500"]), TokenType::Color, "#FF0000");
        let options = TransformOptions::default();
        let mut t = TransformedToken::from_token(&token);
        for name in [ATTRIBUTE_CATEGORY, NAME_SEMANTIC] {
            transform(name).apply(&mut t, &options);
        }
        let once = t.clone();
        for name in [ATTRIBUTE_CATEGORY, NAME_SEMANTIC] {
            transform(name).apply(&mut t, &options);
        }
        assert_eq!(t, once);
    }
}
