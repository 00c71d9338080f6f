//! Fuzzing harnesses for `rtfde-core`.
//!
//! Each public function accepts raw bytes, builds inputs from them with
//! [`arbitrary::Unstructured`], and checks an invariant that must hold for
//! every input. Violations panic so `cargo fuzz` records the case; running out
//! of bytes simply ends the run.
//!
//! # Examples
//!
//! ```
//! rtfde_fuzz::fuzz_tree_diff(b"seed bytes for two trees");
//! rtfde_fuzz::fuzz_encoding(b"{\\}");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use regex::Regex;
use rtfde_core::{
    encode_control_parameter, encode_escaped_control_chars, flatten, is_numeric_codeword,
    string_diff, tree_diff, tree_value_diff, Child, Token, Tree,
};

const MAX_DEPTH: usize = 4;
const MAX_CHILDREN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;
const KINDS: [&str; 4] = ["TEXT", "CONTROLWORD", "CONTROLSYMBOL", "STRING"];
const SEPARATORS: [&str; 4] = [",", r"\s+", r"(\\par)", r"\\"];

/// Diffs randomly generated trees and checks that a tree never differs from
/// itself and that flattening is deterministic.
///
/// ```
/// rtfde_fuzz::fuzz_tree_diff(&[3, 1, 4, 1, 5, 9, 2, 6]);
/// ```
pub fn fuzz_tree_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(original) = random_tree(&mut unstructured, 0) else {
        return;
    };
    let Ok(revised) = random_tree(&mut unstructured, 0) else {
        return;
    };

    assert_eq!(tree_diff(&original, &original), "");
    assert_eq!(tree_value_diff(&original, &original), "");
    assert!(flatten(&original).eq(flatten(&original)));

    let forward = tree_diff(&original, &revised);
    assert_eq!(forward, tree_diff(&original, &revised));
    if original == revised {
        assert!(forward.is_empty());
    }
}

/// Diffs arbitrary strings, with and without a separator pattern.
///
/// ```
/// rtfde_fuzz::fuzz_string_diff(b"a\nb\n\x00a\nc\n");
/// ```
pub fn fuzz_string_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let (Ok(original), Ok(revised)) =
        (unstructured.arbitrary::<String>(), unstructured.arbitrary::<String>())
    else {
        return;
    };
    let separator = unstructured
        .choose(&SEPARATORS)
        .ok()
        .and_then(|pattern| Regex::new(pattern).ok());

    assert_eq!(string_diff(&original, &original, None), "");
    assert_eq!(string_diff(&original, &original, separator.as_ref()), "");
    let diff = string_diff(&original, &revised, None);
    assert_eq!(diff.is_empty(), original == revised);
    let _ = string_diff(&original, &revised, separator.as_ref());
}

/// Exercises the parameter encoder, the escape encoder, and the codeword
/// classifier on arbitrary text.
///
/// ```
/// rtfde_fuzz::fuzz_encoding(b"-42");
/// ```
pub fn fuzz_encoding(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(encoded) = encode_control_parameter(text) {
        let digits = encoded.trim_start_matches('-');
        assert!(digits.starts_with("0x"));
        assert!(encoded.len() >= 6);
    }

    let escaped = encode_escaped_control_chars(text);
    assert!(!escaped.contains(['{', '}']));
    let reserved = text.chars().filter(|ch| matches!(ch, '\\' | '{' | '}')).count();
    assert_eq!(escaped.matches("\\'").count(), reserved);

    let token = Token::new("CONTROLWORD", text);
    if let Some((codeword, _)) = text.split_once(|ch: char| ch.is_ascii_digit()) {
        let _ = is_numeric_codeword(&token, codeword);
    }
}

fn random_tree(unstructured: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Tree> {
    let tag = random_string(unstructured)?;
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_CHILDREN)?);
    let mut children = Vec::with_capacity(len);
    for _ in 0..len {
        children.push(random_child(unstructured, depth + 1)?);
    }
    Ok(Tree::new(tag, children))
}

fn random_child(unstructured: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Child> {
    let upper = if depth >= MAX_DEPTH { 1 } else { 2 };
    match unstructured.int_in_range::<u8>(0..=upper)? {
        0 => {
            let kind = *unstructured.choose(&KINDS)?;
            let value = random_string(unstructured)?;
            let line = usize::from(unstructured.arbitrary::<u8>()?);
            let start = usize::from(unstructured.arbitrary::<u16>()?);
            Ok(Token::new(kind, value)
                .with_position(line, line, start, start + usize::from(MAX_STRING_LEN))
                .into())
        }
        1 => Ok(Child::Scalar(unstructured.arbitrary::<i64>()?.into())),
        _ => Ok(random_tree(unstructured, depth)?.into()),
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> arbitrary::Result<String> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_diff_harness_runs() {
        fuzz_tree_diff(b"tree diff harness input with enough bytes");
    }

    #[test]
    fn string_diff_harness_runs() {
        fuzz_string_diff(b"\x04a\nb\n\x04a\nc\n\x01");
    }

    #[test]
    fn encoding_harness_runs() {
        fuzz_encoding(b"{\\rtf1 \\fs24}");
        fuzz_encoding(b"-1234");
        fuzz_encoding(&[0xff, 0xfe]);
    }

    #[test]
    fn random_trees_are_bounded() {
        let data: Vec<u8> = (0..=255).cycle().take(4096).collect();
        let mut unstructured = Unstructured::new(&data);
        let tree = random_tree(&mut unstructured, 0).expect("enough bytes for a tree");
        assert!(flatten(&tree).count() >= 1);
    }
}
