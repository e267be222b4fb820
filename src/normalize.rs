use once_cell::sync::Lazy;
use regex::Regex;

// Pre-compiled regexes for snippet normalization (compile once, use many times)
static CURLY_QUOTES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}]").expect("Invalid quote regex pattern")
});

static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9\s\-'&]").expect("Invalid character class regex pattern")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex pattern")
});

/// Canonicalize text for fuzzy comparison.
///
/// Lowercases, folds curly quotes to a plain apostrophe, replaces any
/// character outside `[a-z0-9 \-'&]` with a space, collapses whitespace
/// runs, and trims. Total: never fails on any input, including empty.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let quoted = CURLY_QUOTES_RE.replace_all(&lower, "'");
    let cleaned = DISALLOWED_RE.replace_all(&quoted, " ");
    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}
