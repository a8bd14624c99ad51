//! Style name parsing.

/// Separator between hierarchy levels in provider style names.
pub const NAME_SEPARATOR: char = '/';

/// Parse a hierarchical style name into path segments.
///
/// Segments are split on `/`, trimmed, have every character outside
/// `[a-zA-Z0-9_-]` replaced with `-`, and empty segments are dropped.
///
/// ```
/// use tokenforge::adapter::parse_style_name;
///
/// assert_eq!(parse_style_name("primary/500"), vec!["primary", "500"]);
/// assert_eq!(parse_style_name(" Brand Blue / hover "), vec!["Brand-Blue", "hover"]);
/// assert!(parse_style_name(" / ").is_empty());
/// ```
pub fn parse_style_name(name: &str) -> Vec<String> {
    name.split(NAME_SEPARATOR)
        .map(|segment| sanitize_segment(segment.trim()))
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
        .collect()
}
