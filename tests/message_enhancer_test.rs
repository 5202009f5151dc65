//! Tests for the contact message enhancer

use folio_studio::enhancer::message::{
    ensure_closing, ensure_greeting, enhance, enhance_submission, formalize_phrases, CLOSING,
    LEAD_IN,
};

// ========================================================================
// No-op Tests
// ========================================================================

#[test]
fn test_enhance_empty_is_noop() {
    assert_eq!(enhance(""), "");
}

#[test]
fn test_enhance_whitespace_is_noop() {
    assert_eq!(enhance("   \n\t "), "   \n\t ");
}

// ========================================================================
// Greeting Tests
// ========================================================================

#[test]
fn test_enhance_prepends_lead_in_without_greeting() {
    for input in ["I need a poster", "yo, poster please", "Poster?"] {
        let out = enhance(input);
        assert!(out.starts_with(LEAD_IN), "missing lead-in for {:?}", input);
    }
}

#[test]
fn test_enhance_keeps_existing_greeting() {
    for input in ["Hello there", "hey team", "Good morning", "GREETINGS friend"] {
        assert!(!enhance(input).starts_with(LEAD_IN));
    }
}

#[test]
fn test_greeting_is_case_insensitive() {
    assert_eq!(ensure_greeting("HI"), "HI");
}

// ========================================================================
// Punctuation Tests
// ========================================================================

#[test]
fn test_enhance_last_line_gets_terminal_punctuation() {
    let out = enhance("hello\nwe need a logo\nby friday");
    assert!(out.contains("by friday."));
}

#[test]
fn test_enhance_existing_punctuation_untouched() {
    let out = enhance("hello, ready?");
    assert!(out.contains("ready?"));
    assert!(!out.contains("ready?."));
}

#[test]
fn test_enhance_preserves_trailing_whitespace_after_period() {
    let out = enhance("hi there  ");
    assert!(out.starts_with("hi there.  "));
}

// ========================================================================
// Full Pipeline Tests
// ========================================================================

#[test]
fn test_enhance_greeting_with_informal_phrase() {
    let out = enhance("hi, i want a logo");
    assert!(out.starts_with("hi"));
    assert!(!out.starts_with(LEAD_IN));
    assert!(out.contains("I'm interested in a logo"));
    assert_eq!(
        out,
        "hi, I'm interested in a logo.\n\nI look forward to hearing from you."
    );
}

#[test]
fn test_enhance_existing_thanks_skips_closing() {
    let out = enhance("Thanks, can you help? ");
    assert!(!out.ends_with(CLOSING));
    assert!(out.contains("Would you be able to help?"));
    assert!(!out.contains("can you"));
}

#[test]
fn test_enhance_normalizes_bullets() {
    let out = enhance("- item one\n- item two");
    assert!(out.contains("• item one\n• item two."));
    assert!(!out.contains("- item"));
}

#[test]
fn test_ensure_closing_appends_after_blank_line() {
    assert_eq!(ensure_closing("hi."), format!("hi.\n\n{}", CLOSING));
}

#[test]
fn test_enhance_closing_detection_is_case_insensitive() {
    let out = enhance("hello, Best REGARDS");
    assert!(!out.ends_with(CLOSING));
}

#[test]
fn test_enhance_substitution_can_introduce_closing_phrase() {
    // "you should" becomes "I'd appreciate if you could", which counts as a closing
    let out = enhance("hey, you should call");
    assert!(out.contains("I'd appreciate if you could call."));
    assert!(!out.ends_with(CLOSING));
}

#[test]
fn test_formalize_phrases_all_entries() {
    let out = formalize_phrases("i want, can you, you should, really good, nice, cool, soon");
    assert_eq!(
        out,
        "I'm interested in, Would you be able to, I'd appreciate if you could, exceptional, professional, impressive, at your earliest convenience"
    );
}

#[test]
fn test_enhance_is_not_guaranteed_idempotent() {
    // Running twice must not panic; the output may differ
    let once = enhance("need a flyer");
    let twice = enhance(&once);
    assert!(twice.starts_with(LEAD_IN));
}

// ========================================================================
// Submission Tests
// ========================================================================

#[test]
fn test_enhance_submission_piped_text_has_single_blank_line() {
    // Text read from stdin ends with a newline
    let out = enhance_submission("hey, can you make a poster\n");
    assert_eq!(
        out,
        "hey, Would you be able to make a poster.\n\nI look forward to hearing from you."
    );
}

#[test]
fn test_enhance_submission_leading_space_keeps_greeting() {
    let out = enhance_submission("   hello, i want a logo");
    assert!(!out.starts_with(LEAD_IN));
    assert!(out.starts_with("hello, I'm interested in a logo."));
}

#[test]
fn test_enhance_keeps_trailing_whitespace_untrimmed() {
    // The raw pipeline still preserves whitespace after the period
    assert!(enhance("hi there\n").starts_with("hi there.\n"));
}
