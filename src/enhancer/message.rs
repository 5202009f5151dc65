//! Message enhancer - rewrites an informal contact message in a more
//! professional register.
//!
//! The rewrite is an ordered list of pure steps. Each step takes the output of
//! the previous one; order matters (the closing check must see the phrases the
//! substitution step introduced).

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Sentence prepended when the message does not open with a greeting
pub const LEAD_IN: &str = "I'm reaching out regarding a design project. ";

/// Sentence appended when no closing phrase is present
pub const CLOSING: &str = "I look forward to hearing from you.";

pub const BULLET: &str = "• ";

static GREETING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(hi|hello|hey|good|greetings)").unwrap());

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-•]\s+").unwrap());

static CLOSING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)thanks|regards|appreciate|looking forward").unwrap());

/// Informal phrase -> formal replacement, applied in this order
pub const PHRASE_REPLACEMENTS: &[(&str, &str)] = &[
    ("i want", "I'm interested in"),
    ("can you", "Would you be able to"),
    ("you should", "I'd appreciate if you could"),
    ("really good", "exceptional"),
    ("nice", "professional"),
    ("cool", "impressive"),
    ("soon", "at your earliest convenience"),
];

static PHRASE_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PHRASE_REPLACEMENTS
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(pattern))).unwrap();
            (re, *replacement)
        })
        .collect()
});

/// A single rewrite step
pub type Step = fn(&str) -> String;

/// The rewrite pipeline, in application order
pub const PIPELINE: &[(&str, Step)] = &[
    ("greeting", ensure_greeting),
    ("punctuation", ensure_terminal_punctuation),
    ("bullets", normalize_bullets),
    ("phrases", formalize_phrases),
    ("closing", ensure_closing),
];

/// Enhance a message for submission.
///
/// Whitespace-only input is returned unchanged. Never fails.
pub fn enhance(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    PIPELINE
        .iter()
        .fold(text.to_string(), |acc, (_, step)| step(&acc))
}

/// Enhance text typed into the contact form. Surrounding whitespace is
/// dropped before the pipeline runs, so a trailing newline or leading
/// indentation cannot hide the greeting or push the closing down.
pub fn enhance_submission(text: &str) -> String {
    enhance(text.trim())
}

/// Prepend the lead-in unless the text opens with a greeting word
pub fn ensure_greeting(text: &str) -> String {
    if GREETING_RE.is_match(text) {
        text.to_string()
    } else {
        format!("{}{}", LEAD_IN, text)
    }
}

/// Put a period after the last non-whitespace character unless it is
/// already `.`, `!` or `?`. Trailing whitespace is kept after the period.
pub fn ensure_terminal_punctuation(text: &str) -> String {
    let content = text.trim_end();
    match content.chars().last() {
        Some('.' | '!' | '?') | None => text.to_string(),
        Some(_) => {
            let (head, tail) = text.split_at(content.len());
            format!("{}.{}", head, tail)
        }
    }
}

/// Collapse `-`/`•` followed by whitespace into a single bullet glyph
pub fn normalize_bullets(text: &str) -> String {
    BULLET_RE.replace_all(text, NoExpand(BULLET)).into_owned()
}

pub fn formalize_phrases(text: &str) -> String {
    PHRASE_RES
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, NoExpand(replacement)).into_owned()
        })
}

/// Append the closing sentence unless a closing or gratitude phrase exists
pub fn ensure_closing(text: &str) -> String {
    if CLOSING_RE.is_match(text) {
        text.to_string()
    } else {
        format!("{}\n\n{}", text, CLOSING)
    }
}
