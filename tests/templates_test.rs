//! Tests for provider prompt templates

use folio_studio::enhancer::templates::{
    render_brief_prompt, render_ideas_prompt, BRIEF_PROMPT_TEMPLATE, IDEAS_PROMPT_TEMPLATE,
};

// ========================================================================
// BRIEF_PROMPT_TEMPLATE Tests
// ========================================================================

#[test]
fn test_brief_template_placeholder_appears_once() {
    assert_eq!(BRIEF_PROMPT_TEMPLATE.matches("{query}").count(), 1);
}

#[test]
fn test_brief_template_asks_for_short_brief() {
    assert!(BRIEF_PROMPT_TEMPLATE.contains("Creative Director"));
    assert!(BRIEF_PROMPT_TEMPLATE.contains("3-4 sentence"));
}

#[test]
fn test_render_brief_prompt() {
    let prompt = render_brief_prompt("an artisan coffee roastery in Lisbon");
    assert!(prompt.contains("design brief for: an artisan coffee roastery in Lisbon"));
    assert!(!prompt.contains("{query}"));
}

// ========================================================================
// IDEAS_PROMPT_TEMPLATE Tests
// ========================================================================

#[test]
fn test_ideas_template_placeholder_appears_once() {
    assert_eq!(IDEAS_PROMPT_TEMPLATE.matches("{project_type}").count(), 1);
}

#[test]
fn test_render_ideas_prompt() {
    let prompt = render_ideas_prompt("Packaging");
    assert!(prompt.starts_with(
        "As a professional graphic design assistant, generate creative ideas for: Packaging"
    ));
    assert!(prompt.contains("Color palette suggestions"));
}

#[test]
fn test_render_keeps_special_characters() {
    let prompt = render_ideas_prompt("$1 logos & \"quotes\"");
    assert!(prompt.contains("$1 logos & \"quotes\""));
}
