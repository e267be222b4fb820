//! Shared utility functions

/// Callers only seed the search with the start of a transcript; the rest
/// adds noise without making the query more distinctive.
pub const SNIPPET_SEED_CHARS: usize = 350;

/// Unified duration parser - supports "30s", "5m", "2h" or plain seconds
pub fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    // Try to parse as pure number (seconds)
    if let Ok(secs) = s.parse::<u64>() {
        return Some(secs);
    }

    let (num_str, unit) = if s.ends_with('s') {
        (&s[..s.len() - 1], 1u64)
    } else if s.ends_with('m') {
        (&s[..s.len() - 1], 60u64)
    } else if s.ends_with('h') {
        (&s[..s.len() - 1], 3600u64)
    } else {
        return None;
    };

    num_str.parse::<u64>().ok().map(|n| n * unit)
}

/// Take the first `max_chars` characters of a transcript as the search
/// seed, on a char boundary. Safe for non-ASCII content.
pub fn seed_snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Truncate a string to max_len characters (not bytes), adding "..." if
/// truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars[..max_len].iter().collect()
    } else {
        format!("{}...", chars[..max_len - 3].iter().collect::<String>())
    }
}
