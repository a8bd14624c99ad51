//! Built-in transform groups.
//!
//! Attribute transforms come first so that later name and value transforms
//! can filter on the category they set.

use super::builtin::*;

pub const GROUP_CSS: &str = "css";
pub const GROUP_SCSS: &str = "scss";
pub const GROUP_JS: &str = "js";
pub const GROUP_JSON: &str = "json";
pub const GROUP_DOCS: &str = "docs";

/// Every built-in group with its ordered transform names.
pub fn builtin_groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            GROUP_CSS,
            vec![ATTRIBUTE_CATEGORY, ATTRIBUTE_COMMENT, NAME_KEBAB, VALUE_REFERENCE, SIZE_PX_TO_REM, COLOR_RGBA],
        ),
        (GROUP_SCSS, vec![ATTRIBUTE_CATEGORY, NAME_KEBAB, SIZE_PX_TO_REM, COLOR_RGBA]),
        (GROUP_JS, vec![ATTRIBUTE_CATEGORY, NAME_CONSTANT, COLOR_RGBA]),
        (
            GROUP_JSON,
            vec![ATTRIBUTE_CATEGORY, ATTRIBUTE_PROVENANCE, ATTRIBUTE_COMMENT, NAME_SEMANTIC, COLOR_RGBA],
        ),
        (
            GROUP_DOCS,
            vec![ATTRIBUTE_CATEGORY, ATTRIBUTE_PROVENANCE, ATTRIBUTE_COMMENT, NAME_SEMANTIC, COLOR_RGBA],
        ),
    ]
}
