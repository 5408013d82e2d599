//! Model candidate configuration.

use crate::RequestKind;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Ordered model candidates for generation.
///
/// Each request kind has a primary model; the candidate list for one
/// attempt is the primary followed by the configured alternatives and the
/// fallback, in that fixed order. Duplicates are not removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ModelCandidates {
    /// Primary model for text generation
    text: String,
    /// Vision-capable model for image analysis
    vision: String,
    /// Primary model for code generation
    code: String,
    /// Last-resort model, always the final candidate
    fallback: String,
    /// Alternative identifiers tried between the primary and the fallback
    alternatives: Vec<String>,
}

impl Default for ModelCandidates {
    fn default() -> Self {
        Self {
            text: "gemini-2.0-flash-exp".into(),
            vision: "gemini-2.0-flash-exp".into(),
            code: "gemini-2.0-flash-exp".into(),
            fallback: "gemini-1.5-flash".into(),
            alternatives: vec![
                "gemini-2.0-flash-exp".into(),
                "gemini-2.0-flash".into(),
                "models/gemini-2.0-flash-exp".into(),
                "models/gemini-2.0-flash".into(),
            ],
        }
    }
}

impl ModelCandidates {
    /// Primary model for the given request kind.
    pub fn primary_for(&self, kind: RequestKind) -> &str {
        match kind {
            RequestKind::Text | RequestKind::Search => &self.text,
            RequestKind::Code => &self.code,
            RequestKind::Image => &self.vision,
        }
    }

    /// Full candidate list for one attempt: primary, alternatives, fallback.
    pub fn candidates_for(&self, kind: RequestKind) -> Vec<String> {
        let mut models = Vec::with_capacity(self.alternatives.len() + 2);
        models.push(self.primary_for(kind).to_string());
        models.extend(self.alternatives.iter().cloned());
        models.push(self.fallback.clone());
        models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_order_is_primary_alternatives_fallback() {
        let candidates = ModelCandidates::default();
        let list = candidates.candidates_for(RequestKind::Text);
        assert_eq!(list.first().map(String::as_str), Some("gemini-2.0-flash-exp"));
        assert_eq!(list.last().map(String::as_str), Some("gemini-1.5-flash"));
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn duplicates_are_preserved() {
        // The default primary also appears in the alternatives list.
        let candidates = ModelCandidates::default();
        let list = candidates.candidates_for(RequestKind::Code);
        let primary_count = list
            .iter()
            .filter(|m| m.as_str() == "gemini-2.0-flash-exp")
            .count();
        assert_eq!(primary_count, 2);
    }
}
