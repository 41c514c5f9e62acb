use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Staged changes, bounded to a maximum number of diff lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSet {
    pub changed_paths: Vec<String>,
    pub diff_text: String,
    /// Line count of the diff before truncation.
    pub line_count: usize,
    pub truncated: bool,
}

impl ChangeSet {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Builds a [`ChangeSet`], keeping at most `max_lines` lines of `diff_text`.
///
/// Lines are separated by `\n` only; a terminating newline does not start a
/// new line. A diff at or under the cap is kept verbatim.
pub fn summarize(diff_text: &str, changed_paths: Vec<String>, max_lines: NonZeroUsize) -> ChangeSet {
    let lines: Vec<&str> = diff_text.split_terminator('\n').collect();
    let line_count = lines.len();
    let max_lines = max_lines.get();

    let (diff_text, truncated) = if line_count > max_lines {
        (lines[..max_lines].join("\n"), true)
    } else {
        (diff_text.to_string(), false)
    };

    ChangeSet {
        changed_paths,
        diff_text,
        line_count,
        truncated,
    }
}

/// Parses `git diff --name-only` style output: one path per line, blanks
/// dropped, first occurrence wins.
pub fn parse_changed_paths(output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}
