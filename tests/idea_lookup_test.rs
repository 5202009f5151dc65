//! Tests for the design idea template lookup

use folio_studio::enhancer::ideas::{fallback_template, lookup, IDEA_TEMPLATES};

fn template_for(key: &str) -> &'static str {
    IDEA_TEMPLATES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, t)| *t)
        .unwrap()
}

#[test]
fn test_lookup_exact_match_case_insensitive() {
    assert_eq!(lookup("Logo Design"), template_for("logo design"));
    assert_eq!(lookup("PRINT MATERIALS"), template_for("print materials"));
}

#[test]
fn test_lookup_substring_match() {
    assert_eq!(lookup("I need branding help"), template_for("branding"));
}

#[test]
fn test_lookup_fallback_names_category_verbatim() {
    let out = lookup("xylophone tuning");
    assert!(out.contains("xylophone tuning"));
    assert_eq!(out, fallback_template("xylophone tuning"));
}

#[test]
fn test_lookup_fallback_keeps_input_case() {
    let out = lookup("Web App UI");
    assert!(out.contains("\"Web App UI\""));
}

#[test]
fn test_lookup_first_declared_key_wins() {
    assert_eq!(
        lookup("logo design and branding"),
        template_for("logo design")
    );
    assert_eq!(
        lookup("branding with logo design"),
        template_for("logo design")
    );
}

#[test]
fn test_lookup_table_order() {
    let keys: Vec<_> = IDEA_TEMPLATES.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        ["logo design", "branding", "social media", "packaging", "print materials"]
    );
}

#[test]
fn test_templates_are_distinct() {
    for (i, (_, a)) in IDEA_TEMPLATES.iter().enumerate() {
        for (_, b) in IDEA_TEMPLATES.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
