//! Deterministic pre-order linearisation of parse trees.

use std::fmt;
use std::slice;

use serde_json::Value as JsonValue;

use crate::{Child, Tree};

/// Flattens `tree` into one string per visited node.
///
/// Subtrees contribute a `Tree('<tag>')` marker followed by their own
/// entries, tokens contribute their [`Token::repr`](crate::Token::repr), and
/// scalars their JSON text.
///
/// ```
/// # use rtfde_core::{flatten, Token, Tree};
/// let tree = Tree::new("doc", vec![Token::new("TEXT", "hi").into()]);
/// let flat: Vec<String> = flatten(&tree).collect();
/// assert_eq!(flat[0], "Tree('doc')");
/// assert!(flat[1].starts_with("Token('TEXT', 'hi'"));
/// ```
#[must_use]
pub fn flatten(tree: &Tree) -> Flatten<'_> {
    Flatten { stack: vec![Frame::Label(tree)] }
}

/// Flattens `tree` into its leaf payloads only, without tree markers.
///
/// ```
/// # use rtfde_core::{flatten_values, Child, Token, Tree};
/// let inner = Tree::new("sub", vec![Token::new("TEXT", "b").into()]);
/// let tree = Tree::new("doc", vec![Token::new("TEXT", "a").into(), inner.into()]);
/// let values: Vec<String> = flatten_values(&tree).map(|leaf| leaf.to_string()).collect();
/// assert_eq!(values, ["a", "b"]);
/// ```
#[must_use]
pub fn flatten_values(tree: &Tree) -> FlattenValues<'_> {
    FlattenValues { stack: vec![tree.children.iter()] }
}

enum Frame<'a> {
    Label(&'a Tree),
    Children(slice::Iter<'a, Child>),
}

/// Iterator returned by [`flatten`].
pub struct Flatten<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let frame = self.stack.last_mut()?;
            let child = match frame {
                Frame::Label(tree) => {
                    let tree = *tree;
                    *frame = Frame::Children(tree.children.iter());
                    return Some(tree.label());
                }
                Frame::Children(children) => children.next(),
            };
            match child {
                None => {
                    self.stack.pop();
                }
                Some(Child::Tree(subtree)) => self.stack.push(Frame::Label(subtree)),
                Some(Child::Token(token)) => return Some(token.repr()),
                Some(Child::Scalar(value)) => return Some(value.to_string()),
            }
        }
    }
}

/// A leaf payload yielded by [`flatten_values`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Leaf<'a> {
    /// The value of a token.
    Text(&'a str),
    /// A non-token leaf.
    Scalar(&'a JsonValue),
}

impl fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Text(text) => f.write_str(text),
            Leaf::Scalar(JsonValue::String(text)) => f.write_str(text),
            Leaf::Scalar(value) => write!(f, "{value}"),
        }
    }
}

/// Iterator returned by [`flatten_values`].
pub struct FlattenValues<'a> {
    stack: Vec<slice::Iter<'a, Child>>,
}

impl<'a> Iterator for FlattenValues<'a> {
    type Item = Leaf<'a>;

    fn next(&mut self) -> Option<Leaf<'a>> {
        loop {
            let child = self.stack.last_mut()?.next();
            match child {
                None => {
                    self.stack.pop();
                }
                Some(Child::Tree(subtree)) => self.stack.push(subtree.children.iter()),
                Some(Child::Token(token)) => return Some(Leaf::Text(&token.value)),
                Some(Child::Scalar(value)) => return Some(Leaf::Scalar(value)),
            }
        }
    }
}
