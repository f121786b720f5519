//! Body canonicalization
//!
//! Derives the comment-free, docstring-free variant of a function body.
//! Two textual passes, always in this order:
//! 1. comment stripping, line by line
//! 2. removal of the first leading triple-quoted literal
//!
//! Neither pass ever adds text, so the result is never longer than its input.

use regex::Regex;
use std::sync::OnceLock;

/// Remove `#` comments from every line
///
/// On each line the first `#`, everything after it up to the line break, and
/// any run of spaces or tabs directly before it are deleted. The line break
/// itself is kept, so a comment-only line becomes an empty line. Lines
/// without `#` are untouched.
///
/// This is a textual rule: a `#` inside a string literal is treated as a
/// comment too.
pub fn strip_comments(text: &str) -> String {
    static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
    let re = COMMENT_RE.get_or_init(|| Regex::new(r"[ \t]*#.*").unwrap());
    re.replace_all(text, "").into_owned()
}

/// Remove one leading docstring literal
///
/// If `text`, after leading whitespace, opens with `"""` or `'''`, everything
/// from the start of `text` through the nearest closing delimiter of the same
/// style is removed (the match spans line breaks). Only the first literal is
/// removed. Text that does not open with a triple quote, or whose opening
/// quote is never closed, is returned unchanged.
pub fn strip_leading_docstring(text: &str) -> String {
    static DOCSTRING_RE: OnceLock<Regex> = OnceLock::new();
    let re = DOCSTRING_RE
        .get_or_init(|| Regex::new(r#"(?s)\A\s*(?:""".*?"""|'''.*?''')"#).unwrap());
    re.replacen(text, 1, "").into_owned()
}

/// Comment-free, docstring-free body derived from an untrimmed body span
pub fn body_without_comments(raw_body: &str) -> String {
    let uncommented = strip_comments(raw_body);
    strip_leading_docstring(&uncommented).trim().to_string()
}
