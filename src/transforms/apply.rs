//! Transform application over a flattened token list.
//!
//! Tokens are independent during the per-token pass, which runs on the rayon
//! pool. Alias chains are unwound afterwards, once every token's final value
//! is known.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::models::{reference_target, Token, TransformedToken};

use super::registry::ResolvedGroup;
use super::types::{TransformError, TransformOptions};

/// Apply `group` to every token, in order, and unwind aliases.
///
/// Output order matches input order.
pub fn apply_transforms(
    tokens: &[&Token],
    group: &ResolvedGroup,
    options: &TransformOptions,
) -> Result<Vec<TransformedToken>, TransformError> {
    let mut transformed: Vec<TransformedToken> = tokens.iter().map(|t| TransformedToken::from_token(t)).collect();

    transformed.par_iter_mut().for_each(|token| {
        for transform in &group.transforms {
            transform.apply(token, options);
        }
    });

    resolve_aliases(&mut transformed)?;
    Ok(transformed)
}

/// Fill `resolved_value` for every alias and replace any value that is still
/// a raw reference.
pub fn resolve_aliases(tokens: &mut [TransformedToken]) -> Result<(), TransformError> {
    let index: HashMap<String, usize> = tokens.iter().enumerate().map(|(i, t)| (t.path_key(), i)).collect();

    let mut resolved = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.is_alias() {
            resolved.push((i, resolve_chain(tokens, &index, i)?));
        }
    }

    for (i, value) in resolved {
        let token = &mut tokens[i];
        if token.is_reference() {
            token.value = value.clone();
        }
        token.resolved_value = Some(value);
    }
    Ok(())
}

/// Follow original values from token `start` to a non-alias token and return
/// that token's final value.
fn resolve_chain(
    tokens: &[TransformedToken],
    index: &HashMap<String, usize>,
    start: usize,
) -> Result<String, TransformError> {
    let mut chain = vec![tokens[start].path_key()];
    let mut current = start;

    while let Some(target) = reference_target(&tokens[current].original_value) {
        let next = *index.get(target).ok_or_else(|| TransformError::UnresolvedReference {
            token: tokens[current].path_key(),
            target: target.to_string(),
        })?;

        if chain.iter().any(|seen| seen == target) {
            chain.push(target.to_string());
            return Err(TransformError::CircularReference { chain });
        }
        chain.push(target.to_string());
        current = next;
    }

    Ok(tokens[current].value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenType;
    use crate::transforms::TransformRegistry;

    fn token(path: &str, token_type: TokenType, value: &str) -> Token {
        Token::new(path.split('.').map(String::from).collect(), token_type, value)
    }

    fn css() -> ResolvedGroup {
        TransformRegistry::with_builtins().resolve_group("css").unwrap()
    }

    #[test]
    fn test_css_group_end_to_end() {
        let tokens = vec![
            token("colors.primary.500", TokenType::Color, "#FF0000"),
            token("heading.fontSize", TokenType::FontSize, "24px"),
            token("colors.overlay", TokenType::Color, "#000000").with_alpha(0.5),
        ];
        let refs: Vec<&Token> = tokens.iter().collect();
        let out = apply_transforms(&refs, &css(), &TransformOptions::default()).unwrap();

        assert_eq!(out[0].name, "color-colors-primary-500");
        assert_eq!(out[0].value, "#FF0000");
        assert_eq!(out[0].attribute("category"), Some("color"));
        assert_eq!(out[1].name, "font-size-heading-fontsize");
        assert_eq!(out[1].value, "1.500rem");
        assert_eq!(out[1].original_value, "24px");
        assert_eq!(out[2].value, "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_order_preserved() {
        let tokens: Vec<Token> =
            (0..200).map(|i| token(&format!("space.s{}", i), TokenType::Dimension, &format!("{}px", i))).collect();
        let refs: Vec<&Token> = tokens.iter().collect();
        let out = apply_transforms(&refs, &css(), &TransformOptions::default()).unwrap();
        for (i, t) in out.iter().enumerate() {
            assert_eq!(t.path_key(), format!("space.s{}", i));
        }
    }

    #[test]
    fn test_alias_keeps_var_and_records_resolved_value() {
        let tokens = vec![
            token("colors.primary.500", TokenType::Color, "#FF0000"),
            token("button.bg", TokenType::Color, "{colors.primary.500}"),
        ];
        let refs: Vec<&Token> = tokens.iter().collect();
        let out = apply_transforms(&refs, &css(), &TransformOptions::default()).unwrap();

        assert_eq!(out[1].value, "var(--colors-primary-500)");
        assert_eq!(out[1].resolved_value.as_deref(), Some("#FF0000"));
        assert_eq!(out[1].output_value(false), "#FF0000");
    }

    #[test]
    fn test_alias_inlined_without_output_references() {
        let tokens = vec![
            token("space.base", TokenType::Dimension, "16px"),
            token("space.gap", TokenType::Dimension, "{space.base}"),
            token("space.gutter", TokenType::Dimension, "{space.gap}"),
        ];
        let refs: Vec<&Token> = tokens.iter().collect();
        let options = TransformOptions::default().with_output_references(false);
        let out = apply_transforms(&refs, &css(), &options).unwrap();

        assert_eq!(out[1].value, "1.000rem");
        assert_eq!(out[2].value, "1.000rem");
        assert_eq!(out[2].resolved_value.as_deref(), Some("1.000rem"));
    }

    #[test]
    fn test_unresolved_reference() {
        let tokens = vec![token("a", TokenType::Color, "{missing.token}")];
        let refs: Vec<&Token> = tokens.iter().collect();
        let err = apply_transforms(&refs, &css(), &TransformOptions::default()).unwrap_err();
        assert_eq!(
            err,
            TransformError::UnresolvedReference { token: "a".to_string(), target: "missing.token".to_string() }
        );
    }

    #[test]
    fn test_circular_reference() {
        let tokens = vec![token("a", TokenType::Color, "{b}"), token("b", TokenType::Color, "{a}")];
        let refs: Vec<&Token> = tokens.iter().collect();
        let err = apply_transforms(&refs, &css(), &TransformOptions::default()).unwrap_err();
        assert_eq!(err, TransformError::CircularReference { chain: vec!["a".into(), "b".into(), "a".into()] });
    }

    #[test]
    fn test_empty_input() {
        let out = apply_transforms(&[], &css(), &TransformOptions::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_second_pass_leaves_names_and_units_alone() {
        let tokens = vec![token("heading.fontSize", TokenType::FontSize, "24px")];
        let refs: Vec<&Token> = tokens.iter().collect();
        let group = css();
        let options = TransformOptions::default();
        let once = apply_transforms(&refs, &group, &options).unwrap();

        let mut again = once.clone();
        again.par_iter_mut().for_each(|t| {
            for transform in &group.transforms {
                transform.apply(t, &options);
            }
        });
        assert_eq!(again, once);
    }
}
