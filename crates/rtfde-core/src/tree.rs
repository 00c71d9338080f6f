use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A lexical unit produced by the RTF parser.
///
/// Tokens are never mutated by this crate; the positional fields are kept so
/// that structural diffs can detect metadata drift as well as value drift.
///
/// ```
/// # use rtfde_core::Token;
/// let token = Token::new("CONTROLWORD", "\\fs24").with_position(3, 3, 40, 45);
/// assert_eq!(
///     token.repr(),
///     "Token('CONTROLWORD', '\\\\fs24', line=3, end_line=3, start_pos=40, end_pos=45)"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Terminal name assigned by the grammar (`TEXT`, `CONTROLWORD`, ...).
    pub kind: String,
    /// Source text of the token.
    pub value: String,
    /// Line the token starts on.
    #[serde(default)]
    pub line: usize,
    /// Line the token ends on.
    #[serde(default)]
    pub end_line: usize,
    /// Byte offset of the first character.
    #[serde(default)]
    pub start_pos: usize,
    /// Byte offset one past the last character.
    #[serde(default)]
    pub end_pos: usize,
}

impl Token {
    /// Creates a token with zeroed positions.
    #[must_use]
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self { kind: kind.into(), value: value.into(), ..Self::default() }
    }

    /// Sets the positional metadata.
    #[must_use]
    pub fn with_position(
        mut self,
        line: usize,
        end_line: usize,
        start_pos: usize,
        end_pos: usize,
    ) -> Self {
        self.line = line;
        self.end_line = end_line;
        self.start_pos = start_pos;
        self.end_pos = end_pos;
        self
    }

    /// Returns the single-line debug form used when flattening trees.
    #[must_use]
    pub fn repr(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({}, {}, line={}, end_line={}, start_pos={}, end_pos={})",
            quote(&self.kind),
            quote(&self.value),
            self.line,
            self.end_line,
            self.start_pos,
            self.end_pos
        )
    }
}

/// A parse tree node: a rule tag plus an ordered list of children.
///
/// ```
/// # use rtfde_core::{Child, Token, Tree};
/// let tree = Tree::new("group", vec![Token::new("TEXT", "x").into()]);
/// assert_eq!(tree.label(), "Tree('group')");
/// assert_eq!(tree.children.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Name of the grammar rule that produced this node.
    pub tag: String,
    /// Children in source order.
    #[serde(default)]
    pub children: Vec<Child>,
}

impl Tree {
    /// Creates a tree node.
    #[must_use]
    pub fn new(tag: impl Into<String>, children: Vec<Child>) -> Self {
        Self { tag: tag.into(), children }
    }

    /// Returns the marker emitted for this node by the full flattener.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Tree('{}')", self.tag)
    }
}

/// A child of a [`Tree`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Child {
    /// A nested subtree.
    Tree(Tree),
    /// A lexical leaf.
    Token(Token),
    /// Any other value a transformation left in the tree.
    Scalar(JsonValue),
}

impl Child {
    /// Returns the token if this child is one.
    #[must_use]
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Returns the subtree if this child is one.
    #[must_use]
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Child::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

impl From<Tree> for Child {
    fn from(tree: Tree) -> Self {
        Child::Tree(tree)
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Child::Token(token)
    }
}

impl From<JsonValue> for Child {
    fn from(value: JsonValue) -> Self {
        Child::Scalar(value)
    }
}

/// Single-quotes `text`, escaping anything that would break the line.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.extend(c.escape_default()),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_escapes_quotes_and_newlines() {
        let token = Token::new("TEXT", "it's\r\n");
        assert_eq!(
            token.repr(),
            "Token('TEXT', 'it\\'s\\r\\n', line=0, end_line=0, start_pos=0, end_pos=0)"
        );
    }

    #[test]
    fn repr_escapes_other_control_characters() {
        let token = Token::new("TEXT", "a\u{1}b");
        assert!(token.repr().contains("'a\\u{1}b'"));
    }

    #[test]
    fn child_deserializes_from_tagged_json() {
        let json = r#"{"tag":"doc","children":[
            {"token":{"kind":"TEXT","value":"hi","line":1,"end_line":1,"start_pos":0,"end_pos":2}},
            {"tree":{"tag":"sub"}},
            {"scalar":7}
        ]}"#;
        let tree: Tree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].as_token().unwrap().end_pos, 2);
        assert_eq!(tree.children[1].as_tree().unwrap().tag, "sub");
        assert_eq!(tree.children[2], Child::Scalar(serde_json::json!(7)));
    }
}
