use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::builder::{ClassifierBuilder, ClassifierConfig};
use super::explain::{rank_neighbors, Neighbor};
use super::model::LinearModel;
use super::policy::DecisionPolicy;
use super::rules::KeywordMatcher;
use super::vectorizer::{FeatureVector, Vocabulary};
use crate::corpus::{Category, Corpus};

/// Everything the classifier reports about one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// The reported category (the model's argmax)
    pub category: Category,
    /// Probability mass assigned to `category`
    pub confidence: f32,
    /// Full probability distribution; non-negative, sums to 1
    pub distribution: HashMap<Category, f32>,
    /// Set when the confidence fell below the threshold and the keyword
    /// matcher could not corroborate the model
    pub low_confidence: bool,
    /// Advisory suggestion from the keyword matcher when it disagrees with a
    /// low-confidence model answer
    pub fallback: Option<Category>,
    /// Most similar corpus entries, sorted by similarity descending
    pub neighbors: Vec<Neighbor>,
}

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Number of training examples the model was fitted on
    pub num_examples: usize,
    /// Number of distinct terms in the vocabulary
    pub num_terms: usize,
    /// The closed category set, in canonical order
    pub categories: Vec<Category>,
    /// The configured confidence threshold
    pub confidence_threshold: f32,
}

/// A thread-safe hybrid text classifier over a small labeled corpus.
///
/// Combines a TF-IDF + logistic-regression model with a deterministic
/// keyword fallback and a nearest-neighbor explainer. All state is built
/// once by [`ClassifierBuilder::build`] and is immutable afterwards, so the
/// handle is `Send + Sync` and can be shared across threads with `Arc`
/// without locking.
#[derive(Debug, Clone)]
pub struct Classifier {
    pub(crate) vocabulary: Arc<Vocabulary>,
    pub(crate) model: Arc<LinearModel>,
    pub(crate) corpus: Arc<Corpus>,
    pub(crate) corpus_vectors: Arc<Vec<FeatureVector>>,
    pub(crate) matcher: Arc<KeywordMatcher>,
    pub(crate) policy: DecisionPolicy,
    pub(crate) config: ClassifierConfig,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            num_examples: self.corpus.len(),
            num_terms: self.vocabulary.len(),
            categories: Category::ALL.to_vec(),
            confidence_threshold: self.config.confidence_threshold,
        }
    }

    /// The configuration the classifier was built with.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The training corpus the classifier was built from.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The fitted vocabulary (term indexing and idf weights).
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The trained linear model.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Classifies a waste-item description.
    ///
    /// Returns `None` for empty or whitespace-only input (the "no input"
    /// sentinel); the model is not consulted in that case. For any other
    /// input classification always succeeds: a query with no known terms
    /// simply comes back low-confidence with no neighbors.
    ///
    /// The call is a pure function of the (immutable) classifier state and
    /// the text, so identical inputs yield identical results.
    ///
    /// # Example
    /// ```rust
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use binsight::{Classifier, Corpus};
    ///
    /// let classifier = Classifier::builder()
    ///     .with_corpus(Corpus::builtin())
    ///     .build()?;
    ///
    /// let result = classifier.classify("banana peel").expect("non-blank query");
    /// println!("{} ({:.0}%)", result.category, result.confidence * 100.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn classify(&self, text: &str) -> Option<ClassificationResult> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        let vector = self.vocabulary.vectorize(query);
        let probs = self.model.predict_proba(&vector);
        let decision = self.policy.decide(&probs, query, &self.matcher);
        let neighbors = rank_neighbors(
            &vector,
            &self.corpus,
            &self.corpus_vectors,
            self.config.neighbor_count,
        );

        let distribution = Category::ALL
            .iter()
            .map(|&category| (category, probs[category.index()]))
            .collect();

        Some(ClassificationResult {
            category: decision.category,
            confidence: decision.confidence,
            distribution,
            low_confidence: decision.low_confidence,
            fallback: decision.fallback,
            neighbors,
        })
    }

    /// Ranks the `k` corpus entries most similar to the query, independently
    /// of classification. Blank input yields no neighbors.
    pub fn nearest_neighbors(&self, text: &str, k: usize) -> Vec<Neighbor> {
        let query = text.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let vector = self.vocabulary.vectorize(query);
        rank_neighbors(&vector, &self.corpus, &self.corpus_vectors, k)
    }
}
