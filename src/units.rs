//! Dimension parsing and number formatting shared by the adapter, transforms
//! and formats.

/// Split a dimension string like `"24px"` or `"1.5rem"` into its magnitude
/// and unit suffix. A bare number has an empty unit.
///
/// ```
/// use tokenforge::units::parse_dimension;
///
/// assert_eq!(parse_dimension("24px"), Some((24.0, "px")));
/// assert_eq!(parse_dimension("-0.5rem"), Some((-0.5, "rem")));
/// assert_eq!(parse_dimension("12"), Some((12.0, "")));
/// assert_eq!(parse_dimension("auto"), None);
/// ```
pub fn parse_dimension(value: &str) -> Option<(f64, &str)> {
    let value = value.trim();
    let split = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());

    let (number, unit) = value.split_at(split);
    let magnitude = number.parse::<f64>().ok()?;
    if !magnitude.is_finite() {
        return None;
    }
    Some((magnitude, unit.trim()))
}

/// Leading numeric magnitude of a value, ignoring any unit.
pub fn magnitude(value: &str) -> Option<f64> {
    parse_dimension(value).map(|(n, _)| n)
}

/// Format a number without a trailing `.0` for whole values.
///
/// ```
/// use tokenforge::units::format_number;
///
/// assert_eq!(format_number(24.0), "24");
/// assert_eq!(format_number(1.25), "1.25");
/// ```
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", n)
}

/// Convert a pixel magnitude to rem against `base`, three decimal places.
pub fn px_to_rem(px: f64, base: f64) -> String {
    let base = if base > 0.0 { base } else { 16.0 };
    format!("{:.3}rem", px / base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension_units() {
        assert_eq!(parse_dimension("16px"), Some((16.0, "px")));
        assert_eq!(parse_dimension("1.500rem"), Some((1.5, "rem")));
        assert_eq!(parse_dimension(" 8 px "), Some((8.0, "px")));
        assert_eq!(parse_dimension("50%"), Some((50.0, "%")));
    }

    #[test]
    fn test_parse_dimension_rejects_non_numeric() {
        assert_eq!(parse_dimension(""), None);
        assert_eq!(parse_dimension("px"), None);
        assert_eq!(parse_dimension("#FF0000"), None);
        assert_eq!(parse_dimension("var(--x)"), None);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude("24px"), Some(24.0));
        assert_eq!(magnitude("nope"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(700.0), "700");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-2.0), "-2");
    }

    #[test]
    fn test_px_to_rem() {
        assert_eq!(px_to_rem(24.0, 16.0), "1.500rem");
        assert_eq!(px_to_rem(14.0, 16.0), "0.875rem");
        assert_eq!(px_to_rem(20.0, 10.0), "2.000rem");
        assert_eq!(px_to_rem(16.0, 0.0), "1.000rem");
    }
}
