//! Synthetic corpora for benchmarking `rtfde-core`.
//!
//! Each corpus describes a pair of parse trees shaped like a de-encapsulation
//! pass: the revised tree is the original with its `\htmlrtf` suppressed
//! regions removed. Trees are generated on demand so no fixtures ship with
//! the crate.
//!
//! # Examples
//!
//! ```
//! let corpus = rtfde_benches::available_corpora()
//!     .iter()
//!     .find(|corpus| corpus.name() == "paragraphs")
//!     .expect("registered corpus");
//! let dataset = corpus.load();
//! assert!(dataset.original().children.len() > dataset.revised().children.len());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rtfde_core::{Child, Token, Tree};

/// Shape parameters for one generated tree pair.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    paragraphs: usize,
    words_per_paragraph: usize,
    nesting: usize,
}

const CORPORA: [Corpus; 3] = [
    Corpus { name: "paragraphs", paragraphs: 40, words_per_paragraph: 12, nesting: 1 },
    Corpus { name: "long-document", paragraphs: 400, words_per_paragraph: 24, nesting: 1 },
    Corpus { name: "nested-groups", paragraphs: 20, words_per_paragraph: 8, nesting: 64 },
];

/// Lists the registered corpora.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

impl Corpus {
    /// Stable identifier used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Upper bound on the tokens in the original tree, for throughput reporting.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.paragraphs * (self.words_per_paragraph + 3)
    }

    /// Generates the original and stripped trees.
    #[must_use]
    pub fn load(&self) -> Dataset {
        let mut original = Vec::with_capacity(self.paragraphs);
        let mut revised = Vec::with_capacity(self.paragraphs);
        let mut offset = 0;
        for index in 0..self.paragraphs {
            let paragraph = self.paragraph(index, &mut offset);
            if index % 4 != 3 {
                revised.push(Child::from(paragraph.clone()));
            }
            original.push(Child::from(paragraph));
        }
        Dataset {
            original: Tree::new("document", original),
            revised: Tree::new("document", revised),
        }
    }

    fn paragraph(&self, index: usize, offset: &mut usize) -> Tree {
        let mut children = Vec::with_capacity(self.words_per_paragraph + 3);
        if index % 4 == 3 {
            children.push(token(*offset, "CONTROLWORD", "\\htmlrtf".to_string()));
            *offset += 9;
        }
        for word in 0..self.words_per_paragraph {
            let value = format!("w{index}_{word} ");
            let len = value.len();
            children.push(token(*offset, "TEXT", value));
            *offset += len;
        }
        children.push(token(*offset, "CONTROLWORD", "\\par".to_string()));
        *offset += 4;

        let mut group = Tree::new("group", children);
        for _ in 1..self.nesting {
            group = Tree::new("group", vec![group.into()]);
        }
        group
    }
}

fn token(offset: usize, kind: &str, value: String) -> Child {
    let end = offset + value.len();
    Token::new(kind, value).with_position(1, 1, offset, end).into()
}

/// A generated original/revised tree pair.
#[derive(Clone, Debug)]
pub struct Dataset {
    original: Tree,
    revised: Tree,
}

impl Dataset {
    /// The tree before stripping.
    #[must_use]
    pub fn original(&self) -> &Tree {
        &self.original
    }

    /// The tree after stripping.
    #[must_use]
    pub fn revised(&self) -> &Tree {
        &self.revised
    }
}
