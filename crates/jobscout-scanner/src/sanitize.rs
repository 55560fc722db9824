//! Cleanup of text read out of page snapshots.
//!
//! The site injects HTML comments (framework render markers) into several
//! text blocks. They are removed before a value is stored.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"))
}

/// Remove every `<!-- ... -->` comment, including ones spanning lines.
///
/// Idempotent: stripping an already stripped string returns it unchanged.
/// Removal repeats until nothing matches, so a comment that only forms once
/// an inner one is gone (`<!<!--x-->-- y -->`) is removed too.
pub fn strip_html_comments(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        match comment_pattern().replace_all(&current, "") {
            Cow::Borrowed(_) => return current,
            Cow::Owned(next) => current = next,
        }
    }
}

/// Strip comments and surrounding whitespace; empty results become `None`.
pub fn clean_text(raw: &str) -> Option<String> {
    let stripped = strip_html_comments(raw);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
