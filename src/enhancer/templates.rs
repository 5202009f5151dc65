//! Prompt templates sent to the generative-text provider

/// Design brief prompt. Contains the `{query}` placeholder only.
pub const BRIEF_PROMPT_TEMPLATE: &str = r#"As a world-class Creative Director, generate a concise, inspiring, 3-4 sentence design brief for: {query}

Focus on:
- Core visual challenge
- Target audience insights
- Creative direction and style
- Key design principles

Be specific, actionable, and professional."#;

/// Design ideas prompt. Contains the `{project_type}` placeholder only.
pub const IDEAS_PROMPT_TEMPLATE: &str = r#"As a professional graphic design assistant, generate creative ideas for: {project_type}

Provide:
- 3-5 unique design concepts
- Color palette suggestions
- Typography recommendations
- Style inspirations
- Key considerations

Format concisely for a client presentation. Keep it professional and actionable."#;

pub fn render_brief_prompt(query: &str) -> String {
    render(BRIEF_PROMPT_TEMPLATE, "{query}", query)
}

pub fn render_ideas_prompt(project_type: &str) -> String {
    render(IDEAS_PROMPT_TEMPLATE, "{project_type}", project_type)
}

/// Substitute the first placeholder occurrence by split+concat, so a
/// placeholder typed by the user is left untouched
fn render(template: &str, placeholder: &str, value: &str) -> String {
    match template.split_once(placeholder) {
        Some((before, after)) => {
            let mut rendered = String::with_capacity(before.len() + value.len() + after.len());
            rendered.push_str(before);
            rendered.push_str(value);
            rendered.push_str(after);
            rendered
        }
        None => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_placeholders() {
        assert!(BRIEF_PROMPT_TEMPLATE.contains("{query}"));
        assert!(IDEAS_PROMPT_TEMPLATE.contains("{project_type}"));
    }

    #[test]
    fn test_render_does_not_resubstitute_user_text() {
        let rendered = render_brief_prompt("a bakery called {query}");
        assert!(rendered.contains("design brief for: a bakery called {query}"));
        assert_eq!(rendered.matches("{query}").count(), 1);
    }
}
