//! Web search result types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SearchResult {
    /// Page title
    title: String,
    /// Page URL
    link: String,
    /// Result snippet
    snippet: String,
}

/// Search results plus a flattened context string for prompt grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SearchOutcome {
    /// Ordered results
    results: Vec<SearchResult>,
    /// Concatenated titles and snippets for the grounding prompt
    context: String,
}

impl SearchOutcome {
    /// Build an outcome, deriving the context string from the results.
    pub fn new(results: Vec<SearchResult>) -> Self {
        let mut context = String::new();
        for result in &results {
            context.push_str(&format!(
                "Title: {}\nSnippet: {}\n\n",
                result.title(),
                result.snippet()
            ));
        }
        Self { results, context }
    }

    /// Degraded outcome used when the search backend is unavailable.
    ///
    /// Search failures never propagate; callers receive an empty result
    /// list with a placeholder context instead.
    pub fn unavailable(query: &str) -> Self {
        Self {
            results: Vec::new(),
            context: format!(
                "Search functionality is currently unavailable for query: {}",
                query
            ),
        }
    }
}
