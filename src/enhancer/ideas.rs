//! Canned design-idea templates keyed by project category.
//!
//! Used by the "Generate Ideas" flow as an offline alternative to a live
//! provider call.

/// Ordered (key, template) table. Lookup is first-match-wins in this order.
pub const IDEA_TEMPLATES: &[(&str, &str)] = &[
    ("logo design", LOGO_DESIGN),
    ("branding", BRANDING),
    ("social media", SOCIAL_MEDIA),
    ("packaging", PACKAGING),
    ("print materials", PRINT_MATERIALS),
];

const LOGO_DESIGN: &str = r#"Design Concepts for Logo:

1. MINIMALIST MARK
   - Clean, geometric shape representing your initials
   - Single color (prefer navy or violet)
   - Scalable across all mediums

2. ABSTRACT ICON
   - Modern symbol reflecting design philosophy
   - Versatile for web & print
   - Memorable and distinctive

3. WORDMARK
   - Custom typography with your name
   - Integrated with a subtle icon
   - Bold, professional presence

Color Palette: Midnight Navy (#0B0F1A), Royal Violet (#8F00FF), Sky Teal (#00E0C6)
Typography: DM Sans or Poppins for modern feel
Style: Contemporary, premium, minimalist"#;

const BRANDING: &str = r#"Complete Branding Strategy:

1. BRAND IDENTITY
   - Core values and mission statement
   - Visual language and design principles
   - Target audience analysis

2. VISUAL SYSTEM
   - Primary logo and variations
   - Color palette with specifications
   - Typography system (headings, body, accents)

3. APPLICATION GUIDELINES
   - Brand positioning and messaging
   - Marketing collateral design
   - Digital & print touchpoints

Recommended Approach: Premium, modern aesthetic with violet and teal accents. Focus on clean, minimalist design reflecting professionalism."#;

const SOCIAL_MEDIA: &str = r#"Social Media Content Strategy:

1. VISUAL STYLE
   - Consistent color palette (violet/teal theme)
   - Square and vertical formats
   - High-quality photography & graphics

2. CONTENT PILLARS
   - Portfolio showcases (60%)
   - Design tips & process (20%)
   - Behind-the-scenes content (20%)

3. POSTING SCHEDULE
   - 3-4 posts per week
   - Stories for engagement
   - Reels for reach and discovery

Platforms: Instagram, Pinterest, LinkedIn
Format: Grid-friendly designs with strong visual hierarchy"#;

const PACKAGING: &str = r#"Packaging Design Concepts:

1. STRUCTURAL DESIGN
   - Custom box/container shape
   - Eco-friendly materials option
   - Unboxing experience focus

2. VISUAL DESIGN
   - Brand logo prominently displayed
   - Consistent color scheme
   - Typography hierarchy

3. FUNCTIONAL ELEMENTS
   - QR codes for product info
   - Sustainability messaging
   - Brand story integration

Materials: Premium cardboard, matte finish with spot UV
Design: Modern, luxury feel with your brand colors"#;

const PRINT_MATERIALS: &str = r#"Print Design Package:

1. BUSINESS CARDS
   - Double-sided design
   - Premium stock (300gsm minimum)
   - Spot UV or foil accents

2. LETTERHEAD & ENVELOPES
   - Consistent brand identity
   - Professional layout
   - Quality paper stock

3. BROCHURES & FLYERS
   - Compelling layout with hierarchy
   - High-resolution images
   - Clear call-to-action

Specifications: CMYK color mode, 300 DPI minimum, bleed requirements
Printing: Professional offset or digital printing"#;

/// Return the template for `category`.
///
/// The lowercased category matches a key when either contains the other.
/// Unknown categories get a generic template naming the category verbatim.
pub fn lookup(category: &str) -> String {
    let lowered = category.to_lowercase();

    IDEA_TEMPLATES
        .iter()
        .find(|(key, _)| lowered.contains(key) || key.contains(lowered.as_str()))
        .map(|(_, template)| template.to_string())
        .unwrap_or_else(|| fallback_template(category))
}

/// Generic template for categories outside the table
pub fn fallback_template(category: &str) -> String {
    format!(
        r#"Design Ideas for "{}":

1. CONCEPT EXPLORATION
   - 3-5 unique design directions
   - Modern and professional approach
   - Aligned with current trends

2. CREATIVE EXECUTION
   - Color palette with primary and accent colors
   - Typography recommendations
   - Visual style and mood

3. DELIVERABLES
   - High-resolution files
   - Multiple format exports
   - Brand guidelines documentation

Next Steps: Let's discuss your specific vision and requirements to create something exceptional!"#,
        category
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_contained_in_input() {
        assert_eq!(lookup("premium PACKAGING for tea"), PACKAGING);
    }

    #[test]
    fn test_input_contained_in_key() {
        // "social" is a substring of "social media"
        assert_eq!(lookup("Social"), SOCIAL_MEDIA);
    }

    #[test]
    fn test_empty_category_hits_first_key() {
        assert_eq!(lookup(""), LOGO_DESIGN);
    }
}
