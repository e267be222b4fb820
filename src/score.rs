//! Fuzzy similarity scoring between a lyrics snippet and extracted page text.
//!
//! All ratios are difflib-style (2M/T) character similarities on a 0-100
//! scale, computed with the `similar` crate. The blended score weights
//! overall lexical overlap (token-set ratio) over substring containment
//! (partial ratio) at 0.6/0.4.

use std::collections::BTreeSet;

use similar::{DiffOp, TextDiff};

use crate::normalize::normalize;

/// Weight for the token-set component of the blended score
const TOKEN_SET_WEIGHT: f64 = 0.6;

/// Weight for the partial-ratio component of the blended score
const PARTIAL_WEIGHT: f64 = 0.4;

/// Minimum partial-ratio score for a lyrics line to be exposed as the
/// matched fragment
const FRAGMENT_THRESHOLD: f64 = 50.0;

/// Blended similarity between a snippet and a block of lyrics, in [0, 100].
///
/// Both inputs are normalized before comparison. Deterministic and pure.
pub fn score_match(snippet: &str, lyrics: &str) -> f64 {
    let s_norm = normalize(snippet);
    let l_norm = normalize(lyrics);
    let r1 = token_set_ratio(&s_norm, &l_norm);
    let r2 = partial_ratio(&s_norm, &l_norm);
    TOKEN_SET_WEIGHT * r1 + PARTIAL_WEIGHT * r2
}

/// Pick the single lyrics line most similar to the snippet, as evidence
/// the caller can eyeball. Returns `None` when no line clears the
/// threshold.
pub fn best_matching_line(snippet: &str, lyrics: &str) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;
    for line in lyrics.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let score = partial_ratio(snippet, line);
        match best {
            Some((top, _)) if score <= top => {}
            _ => best = Some((score, line)),
        }
    }
    best.filter(|(score, _)| *score > FRAGMENT_THRESHOLD)
        .map(|(_, line)| line.to_string())
}

/// Plain character-level similarity ratio in [0, 100].
fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    f64::from(TextDiff::from_chars(a, b).ratio()) * 100.0
}

/// Token-set ratio: insensitive to word order and duplicate words.
///
/// Both strings are split into sorted unique token sets; the score is the
/// best pairwise ratio among the intersection and the two
/// intersection-plus-remainder strings (the fuzzywuzzy construction).
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let base = intersection.join(" ");
    let combined_a = join_nonempty(&base, &only_a.join(" "));
    let combined_b = join_nonempty(&base, &only_b.join(" "));

    ratio(&base, &combined_a)
        .max(ratio(&base, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

/// Partial ratio: best-aligned substring similarity in [0, 100].
///
/// Slides a window the length of the shorter string across the longer one,
/// but only at alignments suggested by the matching blocks of a character
/// diff, which is how fuzzywuzzy picks candidate windows without scanning
/// every offset.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let chars_a: Vec<char> = a.chars().collect();
    let chars_b: Vec<char> = b.chars().collect();

    let (shorter, longer) = if chars_a.len() <= chars_b.len() {
        (&chars_a, &chars_b)
    } else {
        (&chars_b, &chars_a)
    };

    if shorter.is_empty() {
        return if longer.is_empty() { 100.0 } else { 0.0 };
    }
    if shorter.len() == longer.len() {
        let s: String = shorter.iter().collect();
        let l: String = longer.iter().collect();
        return ratio(&s, &l);
    }

    let short_str: String = shorter.iter().collect();
    let long_str: String = longer.iter().collect();
    let diff = TextDiff::from_chars(short_str.as_str(), long_str.as_str());

    // Candidate window starts: one per matching block, aligned so the block
    // lines up with its position in the shorter string.
    let mut starts: BTreeSet<usize> = BTreeSet::new();
    starts.insert(0);
    for op in diff.ops() {
        if let DiffOp::Equal {
            old_index,
            new_index,
            ..
        } = op
        {
            let start = new_index.saturating_sub(*old_index);
            starts.insert(start.min(longer.len() - shorter.len()));
        }
    }

    let mut best = 0.0f64;
    for start in starts {
        let window: String = longer[start..start + shorter.len()].iter().collect();
        let score = ratio(&short_str, &window);
        if score > best {
            best = score;
        }
        if best >= 100.0 {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical() {
        assert_eq!(ratio("hello world", "hello world"), 100.0);
    }

    #[test]
    fn test_partial_ratio_contained_phrase() {
        let lyrics = "and i was thinking we were only getting older baby and it hurts";
        assert_eq!(partial_ratio("we were only getting older baby", lyrics), 100.0);
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(partial_ratio("", "something"), 0.0);
        assert_eq!(partial_ratio("", ""), 100.0);
    }

    #[test]
    fn test_token_set_ignores_order_and_duplicates() {
        assert_eq!(token_set_ratio("older getting baby", "baby getting older"), 100.0);
        assert_eq!(token_set_ratio("baby baby baby", "baby"), 100.0);
    }

    #[test]
    fn test_token_set_subset_is_full_score() {
        // Every snippet token present in the lyrics: intersection equals
        // the snippet side, so the best pairwise ratio is 100.
        let score = token_set_ratio(
            "we were only getting older baby",
            "i was thinking we were only getting older baby tonight",
        );
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_token_set_empty_side() {
        assert_eq!(token_set_ratio("", "words here"), 0.0);
    }

    #[test]
    fn test_score_bounds() {
        let pairs = [
            ("we were only getting older", "completely unrelated text block"),
            ("same thing", "same thing"),
            ("", ""),
            ("short", "a much longer body of lyrics that goes on and on"),
        ];
        for (a, b) in pairs {
            let s = score_match(a, b);
            assert!((0.0..=100.0).contains(&s), "score {} out of range", s);
        }
    }

    #[test]
    fn test_identical_beats_unrelated() {
        let snippet = "we were only getting older baby";
        let exact = score_match(snippet, snippet);
        let unrelated = score_match(snippet, "completely different words entirely");
        assert!(exact >= unrelated);
        assert_eq!(exact, 100.0);
    }

    #[test]
    fn test_best_matching_line_finds_phrase() {
        let lyrics = "first verse line here\nwe were only getting older baby\nlast line";
        let frag = best_matching_line("we were only getting older baby", lyrics);
        assert_eq!(frag.as_deref(), Some("we were only getting older baby"));
    }

    #[test]
    fn test_best_matching_line_below_threshold() {
        let lyrics = "zzz qqq xxx\nvvv www yyy";
        assert_eq!(best_matching_line("completely different snippet", lyrics), None);
    }

    #[test]
    fn test_best_matching_line_skips_blank_lines() {
        let lyrics = "\n\nhello darkness my old friend\n\n";
        let frag = best_matching_line("hello darkness my old friend", lyrics);
        assert_eq!(frag.as_deref(), Some("hello darkness my old friend"));
    }
}
