//! Page-title parsing: turn "Artist - Song Lyrics | Genius" into a
//! (song, artist) guess.
//!
//! Lyrics sites use both "Artist - Song Lyrics" and "Song - Artist Lyrics"
//! conventions inconsistently, so this stays a best-effort heuristic. Its
//! misclassification modes are known and deliberately kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;

static SITE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\|.*$").expect("Invalid site suffix regex")
});

static LYRICS_PAREN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*\(.*lyrics.*\)$").expect("Invalid lyrics parenthetical regex")
});

static LYRICS_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*lyrics\s*$").expect("Invalid lyrics suffix regex")
});

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+-\s+|:\s+").expect("Invalid separator regex")
});

// The dot-terminated markers must not end in `\b`: a word boundary after
// the literal dot would need a word character next, which rules out the
// usual "feat. Name" shape.
static FEATURE_CREDIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\bfeat\.|\bft\.|\bwith\b)").expect("Invalid feature credit regex")
});

static LYRICS_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)lyrics").expect("Invalid lyrics word regex")
});

/// Infer (song, artist) from a page title string.
///
/// Strips the site-name suffix, trailing "lyrics" markers, then splits on
/// " - " or ": ". With fewer than two parts the whole cleaned string is the
/// song. A feature credit in the second part means the first part is the
/// song and the artist stays unknown.
pub fn infer_title_artist(title_text: &str) -> (String, Option<String>) {
    let t = SITE_SUFFIX_RE.replace(title_text, "");
    let t = LYRICS_PAREN_RE.replace(&t, "");
    let t = LYRICS_SUFFIX_RE.replace(&t, "");

    let parts: Vec<&str> = SEPARATOR_RE
        .split(&t)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() >= 2 {
        let (left, right) = (parts[0], parts[1]);
        if FEATURE_CREDIT_RE.is_match(right) {
            // Song on the left, feature credits on the right; the primary
            // artist is not recoverable from this shape.
            return (left.to_string(), None);
        }
        if !LYRICS_WORD_RE.is_match(left) {
            // "Artist - Song" convention
            return (right.to_string(), Some(left.to_string()));
        }
        // "Song Lyrics - Artist" convention
        return (left.to_string(), Some(right.to_string()));
    }

    (t.trim().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_song_genius_convention() {
        let (song, artist) = infer_title_artist("Artist Name - Song Title Lyrics | Genius");
        assert_eq!(song, "Song Title");
        assert_eq!(artist.as_deref(), Some("Artist Name"));
    }

    #[test]
    fn test_parenthetical_lyrics_video() {
        let (song, artist) = infer_title_artist("Some Title (Official Lyrics Video)");
        assert_eq!(song, "Some Title");
        assert_eq!(artist, None);
    }

    #[test]
    fn test_feature_credit_drops_artist() {
        let (song, artist) = infer_title_artist("Song Title - feat. Other Person Lyrics");
        assert_eq!(song, "Song Title");
        assert_eq!(artist, None);
    }

    #[test]
    fn test_all_feature_credit_markers_match() {
        for second_part in ["feat. Other Person", "ft. Other Person", "with Other Person"] {
            let title = format!("Song Title - {} Lyrics", second_part);
            let (song, artist) = infer_title_artist(&title);
            assert_eq!(song, "Song Title", "marker not detected in {:?}", title);
            assert_eq!(artist, None);
        }
    }

    #[test]
    fn test_feature_marker_not_matched_inside_words() {
        // "Without" starts with "with" but carries no credit
        let (song, artist) = infer_title_artist("Artist Name - Without You Lyrics");
        assert_eq!(song, "Without You");
        assert_eq!(artist.as_deref(), Some("Artist Name"));
    }

    #[test]
    fn test_lyrics_on_left_keeps_order() {
        let (song, artist) = infer_title_artist("Song Title Lyrics - Artist Name | AZLyrics");
        assert_eq!(song, "Song Title Lyrics");
        assert_eq!(artist.as_deref(), Some("Artist Name"));
    }

    #[test]
    fn test_colon_separator() {
        let (song, artist) = infer_title_artist("Artist: Song Title");
        assert_eq!(song, "Song Title");
        assert_eq!(artist.as_deref(), Some("Artist"));
    }

    #[test]
    fn test_single_part_title() {
        let (song, artist) = infer_title_artist("Bohemian Rhapsody Lyrics");
        assert_eq!(song, "Bohemian Rhapsody");
        assert_eq!(artist, None);
    }

    #[test]
    fn test_empty_title() {
        let (song, artist) = infer_title_artist("");
        assert_eq!(song, "");
        assert_eq!(artist, None);
    }
}
