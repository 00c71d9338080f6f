//! Comparison and canonical-encoding primitives for the RTF
//! de-encapsulation pipeline.
//!
//! `rtfde-core` does not parse RTF and does not decide which rewrites to
//! apply. It consumes an already-parsed [`Tree`] of [`Token`]s and offers the
//! transformation layer a small set of helpers: control-parameter and
//! reserved-character encoding, control-word classification, deterministic
//! tree flattening, context diffs, and channel-gated diagnostics.
//!
//! ```
//! use rtfde_core::{tree_diff, Child, Token, Tree};
//!
//! let before = Tree::new("doc", vec![Child::from(Token::new("TEXT", "hi"))]);
//! let mut after = before.clone();
//! after.children.push(Child::from(Token::new("TEXT", "there")));
//!
//! assert!(tree_diff(&before, &before).is_empty());
//! assert!(tree_diff(&before, &after).contains("+ Token('TEXT', 'there'"));
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codeword;
pub mod diagnostics;
pub mod diff;
mod encode;
mod error;
mod flatten;
mod tree;

pub use codeword::{is_numeric_codeword, TokenValue};
pub use diagnostics::{Channel, DiagnosticConfig, Diagnostics, Payload};
pub use diff::{
    context_diff, string_diff, tree_diff, tree_value_diff, ContextDiffConfig, Opcode,
    SequenceMatcher, Tag,
};
pub use encode::{encode_control_parameter, encode_escaped_control_chars, ControlParameter};
pub use error::{ConfigError, DiagnosticError, EncodeError};
pub use flatten::{flatten, flatten_values, Flatten, FlattenValues, Leaf};
pub use tree::{Child, Token, Tree};

/// Returns the semantic version of the `rtfde-core` crate.
///
/// ```
/// assert!(!rtfde_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
