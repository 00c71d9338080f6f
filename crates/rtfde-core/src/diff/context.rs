use std::hash::Hash;

use super::matcher::{SequenceMatcher, Tag};

/// Rendering options for [`context_diff`].
///
/// ```
/// # use rtfde_core::ContextDiffConfig;
/// let config = ContextDiffConfig::new().with_labels("before", "after").with_context(1);
/// assert_eq!(config.context(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ContextDiffConfig {
    from_file: String,
    to_file: String,
    context: usize,
    line_terminator: String,
}

impl Default for ContextDiffConfig {
    fn default() -> Self {
        Self {
            from_file: String::new(),
            to_file: String::new(),
            context: 3,
            line_terminator: "\n".to_string(),
        }
    }
}

impl ContextDiffConfig {
    /// Constructs a configuration with three elements of context and no
    /// file labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the labels printed in the `***` and `---` header lines.
    #[must_use]
    pub fn with_labels(
        mut self,
        from_file: impl Into<String>,
        to_file: impl Into<String>,
    ) -> Self {
        self.from_file = from_file.into();
        self.to_file = to_file.into();
        self
    }

    /// Sets how many unchanged elements surround each change.
    #[must_use]
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Sets the terminator appended to header, separator and range lines.
    #[must_use]
    pub fn with_line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Returns the number of context elements.
    #[must_use]
    pub fn context(&self) -> usize {
        self.context
    }
}

/// Produces a context diff of `a` against `b`.
///
/// Elements are emitted verbatim after their two-character marker
/// (`"  "`, `"- "`, `"+ "`, `"! "`), so line inputs that keep their
/// terminators render one element per line. Identical inputs produce no
/// lines at all.
///
/// ```
/// # use rtfde_core::{context_diff, ContextDiffConfig};
/// let lines = context_diff(&["one", "two"], &["one", "2"], &ContextDiffConfig::default());
/// assert_eq!(
///     lines,
///     ["*** \n", "--- \n", "***************\n", "*** 1,2 ****\n", "  one", "! two",
///      "--- 1,2 ----\n", "  one", "! 2"]
/// );
/// ```
pub fn context_diff<T>(a: &[T], b: &[T], config: &ContextDiffConfig) -> Vec<String>
where
    T: AsRef<str> + Eq + Hash,
{
    let term = config.line_terminator.as_str();
    let matcher = SequenceMatcher::new(a, b);
    let mut lines = Vec::new();

    for group in matcher.grouped_opcodes(config.context) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        if lines.is_empty() {
            lines.push(format!("*** {}{term}", config.from_file));
            lines.push(format!("--- {}{term}", config.to_file));
        }
        lines.push(format!("***************{term}"));

        lines.push(format!("*** {} ****{term}", format_range(first.a.start, last.a.end)));
        if group.iter().any(|op| matches!(op.tag, Tag::Replace | Tag::Delete)) {
            for op in group.iter().filter(|op| op.tag != Tag::Insert) {
                for item in &a[op.a.clone()] {
                    lines.push(format!("{}{}", marker(op.tag), item.as_ref()));
                }
            }
        }

        lines.push(format!("--- {} ----{term}", format_range(first.b.start, last.b.end)));
        if group.iter().any(|op| matches!(op.tag, Tag::Replace | Tag::Insert)) {
            for op in group.iter().filter(|op| op.tag != Tag::Delete) {
                for item in &b[op.b.clone()] {
                    lines.push(format!("{}{}", marker(op.tag), item.as_ref()));
                }
            }
        }
    }
    lines
}

fn marker(tag: Tag) -> &'static str {
    match tag {
        Tag::Equal => "  ",
        Tag::Replace => "! ",
        Tag::Delete => "- ",
        Tag::Insert => "+ ",
    }
}

/// Formats a half-open element range as 1-based `start,end`, a single
/// line number, or the line before an empty range.
fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    let beginning = if length == 0 { start } else { start + 1 };
    if length <= 1 {
        beginning.to_string()
    } else {
        format!("{beginning},{}", beginning + length - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_follow_context_format() {
        assert_eq!(format_range(0, 0), "0");
        assert_eq!(format_range(3, 3), "3");
        assert_eq!(format_range(0, 1), "1");
        assert_eq!(format_range(2, 5), "3,5");
    }

    #[test]
    fn pure_insertion_omits_original_body() {
        let lines = context_diff(&["a"], &["a", "b"], &ContextDiffConfig::default());
        assert_eq!(
            lines,
            [
                "*** \n",
                "--- \n",
                "***************\n",
                "*** 1 ****\n",
                "--- 1,2 ----\n",
                "  a",
                "+ b",
            ]
        );
    }

    #[test]
    fn pure_deletion_omits_revised_body() {
        let lines = context_diff(&["a", "b"], &["a"], &ContextDiffConfig::default());
        assert_eq!(
            lines,
            [
                "*** \n",
                "--- \n",
                "***************\n",
                "*** 1,2 ****\n",
                "  a",
                "- b",
                "--- 1 ----\n",
            ]
        );
    }

    #[test]
    fn unbounded_context_keeps_every_line() {
        let config = ContextDiffConfig::new().with_context(usize::MAX);
        let lines = context_diff(&["x", "a"], &["x", "b"], &config);
        assert_eq!(
            lines,
            [
                "*** \n",
                "--- \n",
                "***************\n",
                "*** 1,2 ****\n",
                "  x",
                "! a",
                "--- 1,2 ----\n",
                "  x",
                "! b",
            ]
        );
    }

    #[test]
    fn labels_and_terminator_are_configurable() {
        let config = ContextDiffConfig::new()
            .with_labels("old.rtf", "new.rtf")
            .with_line_terminator("");
        let lines = context_diff(&["x"], &["y"], &config);
        assert_eq!(&lines[..3], ["*** old.rtf", "--- new.rtf", "***************"]);
    }

    #[test]
    fn context_window_is_trimmed() {
        let a: Vec<String> = (0..10).map(|n| n.to_string()).collect();
        let mut b = a.clone();
        b[9] = "nine".to_string();
        let lines = context_diff(&a, &b, &ContextDiffConfig::new().with_context(1));
        assert_eq!(lines[3], "*** 9,10 ****\n");
        assert_eq!(lines[4], "  8");
        assert_eq!(lines[5], "! 9");
    }
}
