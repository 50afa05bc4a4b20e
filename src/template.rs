/// Single-file-component region handling.
///
/// A `.vue` file is split into a markup region (`<template>` ... `</template>`)
/// and a logic region (`<script>` ... `</script>`).  This module finds those
/// regions with plain line and substring scanning, extracts the word under
/// the cursor, and applies the stricter trigger rule used inside markup.
use std::sync::LazyLock;

use regex::Regex;

use crate::types::TextPosition;

/// Word pattern used for word-boundary lookup.  Hyphen-joined tokens such
/// as `my-button` count as a single word.
pub const WORD_PATTERN: &str = r"(\w+((-\w+)+)?)";

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(WORD_PATTERN).expect("WORD_PATTERN is a valid regex")
});

const TEMPLATE_OPEN: &str = "<template";
const TEMPLATE_CLOSE: &str = "</template>";
const SCRIPT_OPEN: &str = "<script";
const SCRIPT_CLOSE: &str = "</script>";

/// The character that must directly precede a component name in markup.
const TAG_OPEN: char = '<';

/// A word found at a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAtPosition {
    /// The matched token text, e.g. `"my-button"`.
    pub text: String,
    /// Column (in chars) where the token starts on its line.
    pub start_column: usize,
}

/// Return the word under `position`, using [`WORD_PATTERN`].
///
/// A cursor sitting directly after the last character of a word still
/// selects that word.
pub fn word_at_position(content: &str, position: TextPosition) -> Option<WordAtPosition> {
    let line = content.lines().nth(position.line)?;
    let cursor = line
        .char_indices()
        .nth(position.column)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());

    WORD_REGEX
        .find_iter(line)
        .find(|m| m.start() <= cursor && cursor <= m.end())
        .map(|m| WordAtPosition {
            text: m.as_str().to_string(),
            start_column: line[..m.start()].chars().count(),
        })
}

/// Locate the markup root as `(start_line, end_line)`.
///
/// `start_line` is the last line whose trimmed content starts with
/// `<template`; `end_line` is the last line containing `</template>`.
pub fn template_bounds<S: AsRef<str>>(lines: &[S]) -> Option<(usize, usize)> {
    let start = lines
        .iter()
        .rposition(|line| line.as_ref().trim_start().starts_with(TEMPLATE_OPEN))?;
    let end = lines
        .iter()
        .rposition(|line| line.as_ref().contains(TEMPLATE_CLOSE))?;
    Some((start, end))
}

/// Whether `cursor_line` lies strictly between the markup root's open and
/// close lines.  The boundary lines themselves are outside.
pub fn is_in_template<S: AsRef<str>>(lines: &[S], cursor_line: usize) -> bool {
    match template_bounds(lines) {
        Some((start, end)) => start < cursor_line && cursor_line < end,
        None => false,
    }
}

/// Apply the markup trigger rule.
///
/// Inside the markup region a word only counts when it is immediately
/// preceded by `<` (an opening tag name).  Outside the markup region the
/// rule does not apply and this always returns `true`.
pub fn passes_trigger_gate(content: &str, position: TextPosition, word: &WordAtPosition) -> bool {
    let lines: Vec<&str> = content.lines().collect();
    if !is_in_template(&lines, position.line) {
        return true;
    }

    let Some(line) = lines.get(position.line) else {
        return false;
    };
    word.start_column > 0 && line.chars().nth(word.start_column - 1) == Some(TAG_OPEN)
}

/// Extract the logic region: the text between the first `<script ...>`
/// opening tag and the last `</script>` after it.
pub fn extract_script_content(content: &str) -> Option<&str> {
    // `<scripts>` or `<script-editor>` are not script tags.
    let after_name = content
        .match_indices(SCRIPT_OPEN)
        .map(|(open, _)| open + SCRIPT_OPEN.len())
        .find(|&after_name| {
            content[after_name..]
                .chars()
                .next()
                .is_some_and(|c| c == '>' || c.is_whitespace())
        })?;

    let body_start = after_name + content[after_name..].find('>')? + 1;
    let body_end = body_start + content[body_start..].rfind(SCRIPT_CLOSE)?;
    Some(&content[body_start..body_end])
}
