use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierError;

/// The closed set of waste categories.
///
/// The variant order is canonical: it fixes the index layout of probability
/// distributions and breaks argmax ties (earlier variant wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Recyclable dry waste (paper, plastic, glass, metal)
    Dry,
    /// Biodegradable wet waste (food scraps, garden waste)
    Wet,
    /// Hazardous waste requiring special disposal
    Hazardous,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 3] = [Category::Dry, Category::Wet, Category::Hazardous];

    /// Position of this category in the canonical order.
    pub fn index(self) -> usize {
        match self {
            Category::Dry => 0,
            Category::Wet => 1,
            Category::Hazardous => 2,
        }
    }

    /// Human-readable label, as shown to end users.
    pub fn label(self) -> &'static str {
        match self {
            Category::Dry => "Dry Waste",
            Category::Wet => "Wet Waste",
            Category::Hazardous => "Hazardous Waste",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ClassifierError;

    /// Parses a category from its label, case-insensitively. The trailing
    /// " waste" suffix is optional, so both "dry" and "Dry Waste" work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let name = normalized.strip_suffix(" waste").unwrap_or(&normalized);
        match name {
            "dry" => Ok(Category::Dry),
            "wet" => Ok(Category::Wet),
            "hazardous" => Ok(Category::Hazardous),
            _ => Err(ClassifierError::Validation(format!(
                "unknown category: '{}'",
                s
            ))),
        }
    }
}

/// A single labeled training item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Short free-text item description, e.g. "banana peel"
    pub text: String,
    /// The category the item belongs to
    pub category: Category,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// An immutable, ordered set of labeled training examples.
///
/// Order matters only for deterministic tie-breaking when ranking nearest
/// neighbors; the classifier itself is order-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    examples: Vec<TrainingExample>,
}

impl Corpus {
    /// Creates a corpus from a sequence of labeled examples.
    pub fn new(examples: Vec<TrainingExample>) -> Self {
        Self { examples }
    }

    /// The built-in seed dataset: common household waste items across the
    /// three categories. Callers may substitute their own corpus instead.
    pub fn builtin() -> Self {
        let seed: &[(&str, Category)] = &[
            // Dry waste
            ("plastic bottle", Category::Dry),
            ("plastic bag", Category::Dry),
            ("newspaper", Category::Dry),
            ("magazine", Category::Dry),
            ("cardboard box", Category::Dry),
            ("glass bottle", Category::Dry),
            ("aluminium can", Category::Dry),
            ("paper", Category::Dry),
            ("tin can", Category::Dry),
            ("polythene", Category::Dry),
            ("thermocol", Category::Dry),
            ("old clothes", Category::Dry),
            ("shoe", Category::Dry),
            ("toy", Category::Dry),
            // Wet waste
            ("banana peel", Category::Wet),
            ("fruit waste", Category::Wet),
            ("vegetable peels", Category::Wet),
            ("cooked food", Category::Wet),
            ("leftover rice", Category::Wet),
            ("tea leaves", Category::Wet),
            ("coffee grounds", Category::Wet),
            ("egg shell", Category::Wet),
            ("garden leaves", Category::Wet),
            // Hazardous waste
            ("used battery", Category::Hazardous),
            ("expired medicine", Category::Hazardous),
            ("paint can", Category::Hazardous),
            ("chemical bottle", Category::Hazardous),
            ("syringe", Category::Hazardous),
            ("injection needle", Category::Hazardous),
            ("cfl bulb", Category::Hazardous),
            ("tube light", Category::Hazardous),
        ];
        Self {
            examples: seed
                .iter()
                .map(|&(text, category)| TrainingExample::new(text, category))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// The examples in insertion order.
    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    /// Number of distinct categories present in the corpus.
    pub fn distinct_categories(&self) -> usize {
        Category::ALL
            .iter()
            .filter(|&&c| self.examples.iter().any(|e| e.category == c))
            .count()
    }

    /// Sorted, de-duplicated item texts, useful for presenting a pick list.
    pub fn item_catalog(&self) -> Vec<&str> {
        let mut items: Vec<&str> = self.examples.iter().map(|e| e.text.as_str()).collect();
        items.sort_unstable();
        items.dedup();
        items
    }
}

impl FromIterator<TrainingExample> for Corpus {
    fn from_iter<I: IntoIterator<Item = TrainingExample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
