use serde_json::Value as JsonValue;

use crate::{Child, Token, Tree};

/// Anything that may or may not carry token text.
pub trait TokenValue {
    /// Returns the token text, or `None` when the value is not a token.
    fn token_value(&self) -> Option<&str>;
}

impl TokenValue for Token {
    fn token_value(&self) -> Option<&str> {
        Some(&self.value)
    }
}

impl TokenValue for Child {
    fn token_value(&self) -> Option<&str> {
        self.as_token().map(|token| token.value.as_str())
    }
}

impl TokenValue for Tree {
    fn token_value(&self) -> Option<&str> {
        None
    }
}

impl TokenValue for JsonValue {
    fn token_value(&self) -> Option<&str> {
        None
    }
}

impl<T: TokenValue + ?Sized> TokenValue for &T {
    fn token_value(&self) -> Option<&str> {
        (**self).token_value()
    }
}

/// Checks whether `item` is the control word `codeword` followed by a
/// numeric argument, e.g. `\fs24` for codeword `\fs`.
///
/// Values that are not tokens never match.
///
/// ```
/// # use rtfde_core::{is_numeric_codeword, Child, Token};
/// assert!(is_numeric_codeword(&Token::new("CONTROLWORD", "\\uc1 "), "\\uc"));
/// assert!(!is_numeric_codeword(&Token::new("CONTROLWORD", "\\uc"), "\\uc"));
/// assert!(!is_numeric_codeword(&Child::Scalar(1.into()), "\\uc"));
/// ```
pub fn is_numeric_codeword<T>(item: &T, codeword: &str) -> bool
where
    T: TokenValue + ?Sized,
{
    let Some(value) = item.token_value() else {
        return false;
    };
    value
        .trim()
        .strip_prefix(codeword)
        .is_some_and(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Token {
        Token::new("CONTROLWORD", value)
    }

    #[test]
    fn matches_codeword_with_digits() {
        assert!(is_numeric_codeword(&text("foo123"), "foo"));
        assert!(is_numeric_codeword(&text("  \\htmlrtf0\r\n"), "\\htmlrtf"));
    }

    #[test]
    fn empty_suffix_is_not_numeric() {
        assert!(!is_numeric_codeword(&text("foo"), "foo"));
    }

    #[test]
    fn non_digit_suffix_is_rejected() {
        assert!(!is_numeric_codeword(&text("foox"), "foo"));
        assert!(!is_numeric_codeword(&text("foo12x"), "foo"));
        assert!(!is_numeric_codeword(&text("foo-1"), "foo"));
    }

    #[test]
    fn prefix_must_match() {
        assert!(!is_numeric_codeword(&text("bar1"), "foo"));
        assert!(!is_numeric_codeword(&text("fo1"), "foo"));
    }

    #[test]
    fn non_tokens_never_match() {
        let tree = Tree::new("group", vec![text("foo1").into()]);
        assert!(!is_numeric_codeword(&tree, "foo"));
        assert!(!is_numeric_codeword(&Child::Tree(tree), "foo"));
        assert!(!is_numeric_codeword(&JsonValue::from("foo1"), "foo"));
        assert!(is_numeric_codeword(&Child::Token(text("foo1")), "foo"));
    }
}
