//! Heuristic lyrics extraction from arbitrary page HTML.
//!
//! A priority-ordered chain of strategies, each returning zero or more
//! candidate text blocks. The first layer that yields anything wins; within
//! a layer the longest block (by characters) is chosen, since short blocks
//! are usually navigation or ad boilerplate rather than lyrics.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Word-count floor for the generic layers. The site-marker layer is
/// exempt: a page that explicitly tags its lyrics container is trusted.
const MIN_WORDS: usize = 20;

/// Attribute marker used by the largest lyrics host for its containers
const LYRICS_CONTAINER_SELECTOR: &str = r#"[data-lyrics-container="true"]"#;

/// Generic selectors associated with lyric content, tried after the
/// site-specific and article layers
const LYRIC_SELECTORS: &[&str] = &[
    ".lyrics",
    ".lyric",
    "#lyrics",
    "[class*='lyric']",
    "[id*='lyric']",
    "main",
];

static SECTION_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(chorus|verse|bridge|intro|outro):\s*")
        .expect("Invalid section label regex")
});

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n{3,}").expect("Invalid blank run regex")
});

/// Extract the lyrics text block from raw HTML, if the page has one.
///
/// Layers, in priority order: explicit lyrics-container marker, `article`
/// semantic block, generic lyric selectors, all-paragraphs fallback. Every
/// layer except the first requires more than [`MIN_WORDS`] words.
pub fn extract_lyrics(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let layers: [fn(&Html) -> Vec<String>; 4] = [
        marked_containers,
        article_block,
        lyric_selectors,
        paragraph_fallback,
    ];

    for layer in layers {
        let candidates = layer(&document);
        if let Some(best) = candidates.into_iter().max_by_key(String::len) {
            return Some(postprocess(&best));
        }
    }

    None
}

/// Layer 1: elements explicitly marked as lyrics containers. No word floor.
fn marked_containers(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(LYRICS_CONTAINER_SELECTOR) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Layer 2: the page's primary article block, if it carries enough words.
fn article_block(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("article") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| element_text(el))
        .filter(|t| word_count(t) > MIN_WORDS)
        .into_iter()
        .collect()
}

/// Layer 3: generic lyric-ish selectors and the main landmark.
fn lyric_selectors(document: &Html) -> Vec<String> {
    let mut candidates = Vec::new();
    for sel in LYRIC_SELECTORS {
        let Ok(selector) = Selector::parse(sel) else {
            continue;
        };
        for node in document.select(&selector) {
            let text = element_text(node);
            if word_count(&text) > MIN_WORDS {
                candidates.push(text);
            }
        }
    }
    candidates
}

/// Layer 4: concatenate every paragraph on the page.
fn paragraph_fallback(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };
    let text = document
        .select(&selector)
        .map(|p| {
            p.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if word_count(&text) > MIN_WORDS {
        vec![text]
    } else {
        Vec::new()
    }
}

/// Collect an element's text nodes, one per line, trimmed and de-blanked.
/// This keeps `<br>`-separated lyrics lines as separate lines.
fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Strip structural labels ("chorus:", "verse:", ...) and collapse runs of
/// blank lines left behind.
fn postprocess(block: &str) -> String {
    let stripped = SECTION_LABEL_RE.replace_all(block, "");
    BLANK_RUN_RE.replace_all(&stripped, "\n\n").trim().to_string()
}
