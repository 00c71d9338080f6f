//! Context diffs over strings and parse trees.
//!
//! Everything here reads its inputs and allocates fresh output; nothing is
//! mutated. The rendering follows the classic context-diff layout with three
//! elements of surrounding context, and two inputs that compare equal
//! always render as the empty string.

mod context;
mod matcher;

pub use context::{context_diff, ContextDiffConfig};
pub use matcher::{Match, Opcode, SequenceMatcher, Tag};

use std::hash::Hash;

use regex::Regex;

use crate::{flatten, flatten_values, Tree};

/// Line terminators recognised by [`split_lines_keep_ends`]. `\r\n` is
/// handled separately as a single terminator.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Diffs two strings.
///
/// Without a separator both strings are split into lines that keep their
/// terminators, so line-ending changes show up in the output. With a
/// separator, newlines are removed first, both strings are split on the
/// pattern, and empty pieces are dropped before diffing.
///
/// ```
/// # use rtfde_core::string_diff;
/// let diff = string_diff("a\nb\n", "a\nc\n", None);
/// assert!(diff.contains("  a\n"));
/// assert!(diff.contains("! b\n"));
/// assert!(diff.contains("! c\n"));
///
/// let comma = regex::Regex::new(",").unwrap();
/// assert_eq!(string_diff("a,b,,c", "a,b,c", Some(&comma)), "");
/// ```
#[must_use]
pub fn string_diff(original: &str, revised: &str, separator: Option<&Regex>) -> String {
    match separator {
        None => render(&split_lines_keep_ends(original), &split_lines_keep_ends(revised)),
        Some(separator) => {
            let original = original.replace('\n', "");
            let revised = revised.replace('\n', "");
            render(&split_units(&original, separator), &split_units(&revised, separator))
        }
    }
}

/// Diffs the full flattenings of two trees, so tag, value, and position
/// changes are all reported.
///
/// ```
/// # use rtfde_core::{tree_diff, Token, Tree};
/// let tree = Tree::new("doc", vec![Token::new("TEXT", "x").into()]);
/// assert_eq!(tree_diff(&tree, &tree), "");
/// ```
#[must_use]
pub fn tree_diff(original: &Tree, revised: &Tree) -> String {
    let original: Vec<String> = flatten(original).collect();
    let revised: Vec<String> = flatten(revised).collect();
    render(&original, &revised)
}

/// Diffs only the leaf payloads of two trees, ignoring shape and positions.
///
/// ```
/// # use rtfde_core::{tree_value_diff, Token, Tree};
/// let a = Tree::new("doc", vec![Token::new("TEXT", "x").with_position(1, 1, 0, 1).into()]);
/// let b = Tree::new("body", vec![Token::new("TEXT", "x").into()]);
/// assert_eq!(tree_value_diff(&a, &b), "");
/// ```
#[must_use]
pub fn tree_value_diff(original: &Tree, revised: &Tree) -> String {
    let original: Vec<String> = flatten_values(original).map(|leaf| leaf.to_string()).collect();
    let revised: Vec<String> = flatten_values(revised).map(|leaf| leaf.to_string()).collect();
    render(&original, &revised)
}

fn render<T>(original: &[T], revised: &[T]) -> String
where
    T: AsRef<str> + Eq + Hash,
{
    context_diff(original, revised, &ContextDiffConfig::default()).join("\n")
}

/// Splits `text` into lines, each keeping its terminator.
///
/// ```
/// # use rtfde_core::diff::split_lines_keep_ends;
/// assert_eq!(split_lines_keep_ends("a\r\nb\rc"), ["a\r\n", "b\r", "c"]);
/// assert!(split_lines_keep_ends("").is_empty());
/// ```
#[must_use]
pub fn split_lines_keep_ends(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if !LINE_BREAKS.contains(&ch) {
            continue;
        }
        let mut end = index + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
                end += 1;
            }
        }
        lines.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Splits `text` on `separator`, keeping the text of any capture groups as
/// units of their own and dropping empty units.
///
/// ```
/// # use rtfde_core::diff::split_units;
/// let sep = regex::Regex::new(r"(\\par)|\s+").unwrap();
/// assert_eq!(split_units(r"a \par b", &sep), ["a", r"\par", "b"]);
/// ```
#[must_use]
pub fn split_units<'t>(text: &'t str, separator: &Regex) -> Vec<&'t str> {
    let mut units = Vec::new();
    let mut last = 0;
    for captures in separator.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        units.push(&text[last..whole.start()]);
        units.extend(captures.iter().skip(1).flatten().map(|group| group.as_str()));
        last = whole.end();
    }
    units.push(&text[last..]);
    units.retain(|unit| !unit.is_empty());
    units
}
