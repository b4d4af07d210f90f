//! Helpers that turn free-text cell contents into record fields.

use lazy_regex::{regex, regex_captures};

/// Removes a trailing `(...)` annotation. Everything before the opening
/// parenthesis is kept as is, whitespace included.
pub fn strip_parenthetical(text: &str) -> String {
    regex!(r"(.*)\(.*\)").replace_all(text, "$1").into_owned()
}

/// Returns the first run of at least `min_len` ASCII digits, cut to
/// `max_len` digits. Same result as searching for `[0-9]{min,max}`.
pub fn extract_digits(text: &str, min_len: usize, max_len: usize) -> Option<u32> {
    regex!(r"[0-9]+")
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|run| run.len() >= min_len)
        .and_then(|run| run[..run.len().min(max_len)].parse().ok())
}

/// Parses prices written as `1 250 Ft`. The digits in front of `Ft` go
/// through [`extract_digits`], so a five-digit amount keeps its leading four.
pub fn strip_currency_suffix(text: &str) -> Option<u32> {
    let compacted = compact(text);
    regex_captures!(r"([0-9]+)Ft", &compacted)
        .and_then(|(_, digits)| extract_digits(digits, 3, 4))
}

/// Drops every whitespace character, non-breaking spaces included.
pub fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Collapses whitespace runs to one space and trims; `None` when nothing is left.
pub fn clean_name(text: &str) -> Option<String> {
    let name = regex!(r"\s+").replace_all(text, " ");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
