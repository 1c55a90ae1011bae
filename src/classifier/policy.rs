use ndarray::Array1;

use super::rules::KeywordMatcher;
use crate::corpus::Category;

/// The outcome of reconciling the model's distribution with the keyword
/// matcher for one query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Decision {
    pub category: Category,
    pub confidence: f32,
    pub low_confidence: bool,
    pub fallback: Option<Category>,
}

/// Combines the classifier's probability distribution with the keyword
/// matcher using a confidence threshold.
///
/// At or above the threshold the model's answer stands on its own and the
/// matcher is never consulted (the boundary is inclusive). Below it, a
/// disagreeing keyword match becomes an advisory fallback suggestion, an
/// agreeing match corroborates the model and clears the low-confidence flag,
/// and a miss leaves a bare low-confidence answer.
#[derive(Debug, Clone)]
pub(crate) struct DecisionPolicy {
    threshold: f32,
}

impl DecisionPolicy {
    pub(crate) fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub(crate) fn decide(
        &self,
        probs: &Array1<f32>,
        text: &str,
        matcher: &KeywordMatcher,
    ) -> Decision {
        let category = argmax(probs);
        let confidence = probs[category.index()];

        if confidence >= self.threshold {
            return Decision {
                category,
                confidence,
                low_confidence: false,
                fallback: None,
            };
        }

        match matcher.match_text(text) {
            Some(guess) if guess == category => Decision {
                category,
                confidence,
                low_confidence: false,
                fallback: None,
            },
            Some(guess) => Decision {
                category,
                confidence,
                low_confidence: true,
                fallback: Some(guess),
            },
            None => Decision {
                category,
                confidence,
                low_confidence: true,
                fallback: None,
            },
        }
    }
}

/// Highest-probability category; equal maxima resolve to the category that
/// appears earlier in the canonical order.
fn argmax(probs: &Array1<f32>) -> Category {
    let mut best = 0;
    for c in 1..probs.len() {
        if probs[c] > probs[best] {
            best = c;
        }
    }
    Category::ALL[best]
}
