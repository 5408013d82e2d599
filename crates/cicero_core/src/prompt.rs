//! Prompt shaping templates.
//!
//! Template text is fixed; changing it changes response style for every
//! client at once.

use crate::RequestKind;

/// Wrap a code request in the instruction template.
pub fn code_prompt(prompt: &str) -> String {
    format!(
        "\nYou are an expert programmer. Generate clean, well-documented, and efficient code for the following request:\n\n{prompt}\n\nRequirements:\n- Include proper error handling\n- Add meaningful comments\n- Follow best practices\n- Provide working, production-ready code\n- Include usage examples if applicable\n\nCode:"
    )
}

/// Wrap a search query in the structured-answer template.
pub fn search_prompt(query: &str) -> String {
    format!(
        "\nProvide a comprehensive answer for the search query: \"{query}\"\n\nInclude:\n- Direct answer to the question\n- Key facts and details\n- Relevant context and background\n- Multiple perspectives if applicable\n- Recent developments if relevant\n\nAnswer:"
    )
}

/// Ground a query in retrieved search context.
pub fn grounded_prompt(query: &str, context: &str) -> String {
    format!(
        "Based on the following search results, provide a comprehensive answer to: \"{query}\"\n\nSearch Results:\n{context}"
    )
}

/// Shape a prompt according to the request kind.
///
/// Text and image prompts pass through unchanged.
pub fn shape(prompt: &str, kind: RequestKind) -> String {
    match kind {
        RequestKind::Code => code_prompt(prompt),
        RequestKind::Search => search_prompt(prompt),
        RequestKind::Text | RequestKind::Image => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_template_embeds_prompt() {
        let shaped = shape("reverse a list", RequestKind::Code);
        assert!(shaped.contains("reverse a list"));
        assert!(shaped.contains("expert programmer"));
        assert!(shaped.contains("usage examples"));
    }

    #[test]
    fn search_template_embeds_query() {
        let shaped = shape("rust borrow checker", RequestKind::Search);
        assert!(shaped.contains("rust borrow checker"));
        assert!(shaped.contains("Multiple perspectives"));
    }

    #[test]
    fn text_passes_through() {
        assert_eq!(shape("hello", RequestKind::Text), "hello");
    }
}
