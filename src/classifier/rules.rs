use serde::{Deserialize, Serialize};

use crate::corpus::Category;

/// A deterministic keyword-containment classifier.
///
/// Categories are tried in a fixed priority order, keywords within each
/// category in a fixed order; the first keyword found as a substring of the
/// lowercased text wins. A miss is a normal outcome, not a failure.
///
/// The matcher never consults the trained model or the corpus, which makes
/// it a useful second opinion when the model is unsure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMatcher {
    rules: Vec<(Category, Vec<String>)>,
}

impl KeywordMatcher {
    /// Creates a matcher from an ordered keyword table. Both the category
    /// order and the per-category keyword order are preserved.
    pub fn new(rules: Vec<(Category, Vec<String>)>) -> Self {
        Self { rules }
    }

    /// The hand-curated built-in keyword table, covering common household
    /// waste items per category.
    pub fn builtin() -> Self {
        let table: &[(Category, &[&str])] = &[
            (
                Category::Dry,
                &[
                    "plastic bottle",
                    "plastic bag",
                    "newspaper",
                    "magazine",
                    "cardboard",
                    "glass bottle",
                    "metal can",
                    "aluminium foil",
                    "tin can",
                    "paper",
                    "carton",
                    "thermocol",
                    "rubber",
                    "old clothes",
                    "shoes",
                    "toys",
                    "packaging material",
                    "polythene bag",
                    "milk packet",
                ],
            ),
            (
                Category::Wet,
                &[
                    "banana peel",
                    "fruit",
                    "vegetable",
                    "cooked food",
                    "leftover rice",
                    "tea leaves",
                    "coffee grounds",
                    "egg shell",
                    "garden waste",
                    "dry leaves",
                    "green grass",
                    "chapati",
                    "flowers",
                    "coconut shell",
                    "onion peel",
                    "potato peel",
                    "fish waste",
                    "meat waste",
                ],
            ),
            (
                Category::Hazardous,
                &[
                    "used battery",
                    "battery",
                    "expired medicine",
                    "paint can",
                    "chemical bottle",
                    "syringe",
                    "injection needle",
                    "mask",
                    "sanitizer bottle",
                    "e-waste",
                    "old mobile",
                    "tube light",
                    "cfl bulb",
                    "mercury thermometer",
                    "pesticide bottle",
                    "nail polish",
                    "blade",
                    "razor",
                ],
            ),
        ];
        Self {
            rules: table
                .iter()
                .map(|&(category, keywords)| {
                    (category, keywords.iter().map(|&k| k.to_owned()).collect())
                })
                .collect(),
        }
    }

    /// Returns the first category whose keyword list contains a substring of
    /// the lowercased text, or `None` if nothing matches.
    pub fn match_text(&self, text: &str) -> Option<Category> {
        let haystack = text.to_lowercase();
        for (category, keywords) in &self.rules {
            if keywords.iter().any(|keyword| haystack.contains(keyword)) {
                return Some(*category);
            }
        }
        None
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}
