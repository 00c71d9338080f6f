use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// Sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Classification of an [`Opcode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Both slices hold the same elements.
    Equal,
    /// The `a` slice is replaced by the `b` slice.
    Replace,
    /// The `a` slice is deleted; the `b` range is empty.
    Delete,
    /// The `b` slice is inserted; the `a` range is empty.
    Insert,
}

/// One step of the edit script that turns `a` into `b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opcode {
    /// What the step does.
    pub tag: Tag,
    /// Affected slice of `a`.
    pub a: Range<usize>,
    /// Affected slice of `b`.
    pub b: Range<usize>,
}

impl Opcode {
    fn new(tag: Tag, a: Range<usize>, b: Range<usize>) -> Self {
        Self { tag, a, b }
    }
}

/// A maximal run where `a[a..a + size] == b[b..b + size]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    /// Start in `a`.
    pub a: usize,
    /// Start in `b`.
    pub b: usize,
    /// Length of the run.
    pub size: usize,
}

/// Ratcliff/Obershelp sequence matcher.
///
/// Finds the longest contiguous matching run, then recurses into the pieces
/// on either side of it. In sequences of 200 or more elements, elements of
/// `b` that make up more than one percent of it are not used to seed
/// matches, which keeps very repetitive inputs (blank lines, closing
/// braces) from dominating the alignment.
///
/// ```
/// # use rtfde_core::{SequenceMatcher, Tag};
/// let a = ["a", "b", "c", "d"];
/// let b = ["a", "x", "c", "d", "e"];
/// let tags: Vec<Tag> =
///     SequenceMatcher::new(&a, &b).opcodes().into_iter().map(|op| op.tag).collect();
/// assert_eq!(tags, [Tag::Equal, Tag::Replace, Tag::Equal, Tag::Insert]);
/// ```
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T> SequenceMatcher<'a, T>
where
    T: Eq + Hash,
{
    /// Indexes `b` and prepares to compare it against `a`.
    #[must_use]
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= threshold);
        }
        Self { a, b, b2j }
    }

    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut best = Match { a: alo, b: blo, size: 0 };
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_runs = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let previous = j.checked_sub(1).and_then(|prev| run_ending_at.get(&prev));
                    let size = previous.copied().unwrap_or(0) + 1;
                    next_runs.insert(j, size);
                    if size > best.size {
                        best = Match { a: i + 1 - size, b: j + 1 - size, size };
                    }
                }
            }
            run_ending_at = next_runs;
        }

        // Popular elements never seed a match but may still extend one.
        while best.a > alo && best.b > blo && self.a[best.a - 1] == self.b[best.b - 1] {
            best.a -= 1;
            best.b -= 1;
            best.size += 1;
        }
        while best.a + best.size < ahi
            && best.b + best.size < bhi
            && self.a[best.a + best.size] == self.b[best.b + best.size]
        {
            best.size += 1;
        }
        best
    }

    /// Returns the matching runs in ascending order, adjacent runs merged,
    /// terminated by a zero-sized sentinel at `(a.len(), b.len())`.
    #[must_use]
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let found = self.find_longest_match(alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }
            blocks.push(found);
            if alo < found.a && blo < found.b {
                queue.push((alo, found.a, blo, found.b));
            }
            if found.a + found.size < ahi && found.b + found.size < bhi {
                queue.push((found.a + found.size, ahi, found.b + found.size, bhi));
            }
        }
        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match { a: self.a.len(), b: self.b.len(), size: 0 });
        merged
    }

    /// Returns the edit script turning `a` into `b`.
    #[must_use]
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut i = 0;
        let mut j = 0;
        let mut codes = Vec::new();
        for block in self.matching_blocks() {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(Tag::Replace),
                (true, false) => Some(Tag::Delete),
                (false, true) => Some(Tag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                codes.push(Opcode::new(tag, i..block.a, j..block.b));
            }
            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                codes.push(Opcode::new(Tag::Equal, block.a..i, block.b..j));
            }
        }
        codes
    }

    /// Groups the edit script into hunks with up to `context` equal
    /// elements on each side of every change.
    ///
    /// Identical inputs yield no groups.
    #[must_use]
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes();
        if codes.is_empty() {
            return Vec::new();
        }

        if let Some(first) = codes.first_mut() {
            if first.tag == Tag::Equal {
                first.a.start = first.a.start.max(first.a.end.saturating_sub(context));
                first.b.start = first.b.start.max(first.b.end.saturating_sub(context));
            }
        }
        if let Some(last) = codes.last_mut() {
            if last.tag == Tag::Equal {
                last.a.end = last.a.end.min(last.a.start.saturating_add(context));
                last.b.end = last.b.end.min(last.b.start.saturating_add(context));
            }
        }

        let mut groups = Vec::new();
        let mut group = Vec::new();
        for mut code in codes {
            if code.tag == Tag::Equal && code.a.len() > context.saturating_mul(2) {
                group.push(Opcode::new(
                    Tag::Equal,
                    code.a.start..code.a.end.min(code.a.start.saturating_add(context)),
                    code.b.start..code.b.end.min(code.b.start.saturating_add(context)),
                ));
                groups.push(std::mem::take(&mut group));
                code.a.start = code.a.start.max(code.a.end.saturating_sub(context));
                code.b.start = code.b.start.max(code.b.end.saturating_sub(context));
            }
            group.push(code);
        }
        if !(group.is_empty() || (group.len() == 1 && group[0].tag == Tag::Equal)) {
            groups.push(group);
        }
        groups
    }
}
