//! Input sanitizing and response tidying.

use regex::Regex;
use std::sync::LazyLock;

/// Longest user input passed on to a prompt, in characters.
pub const MAX_INPUT_CHARS: usize = 1000;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-run pattern is valid"));

/// Cleans free-form user text before it is embedded in a prompt.
///
/// Markup tags are removed, then any remaining `<`, `>`, `"` and `'`. The result is
/// trimmed and cut to [`MAX_INPUT_CHARS`] characters.
#[must_use]
pub fn sanitize_input(text: &str) -> String {
    let stripped = TAG_RE.replace_all(text, "");
    let cleaned: String = stripped
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .collect();
    cleaned.trim().chars().take(MAX_INPUT_CHARS).collect()
}

/// Collapses runs of three or more newlines into one blank line and trims the ends.
#[must_use]
pub fn tidy_response(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").trim().to_string()
}
