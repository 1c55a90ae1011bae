use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use super::classifier::Classifier;
use super::error::ClassifierError;
use super::model::{LinearModel, TrainParams};
use super::policy::DecisionPolicy;
use super::rules::KeywordMatcher;
use super::vectorizer::Vocabulary;
use crate::corpus::{Category, Corpus, TrainingExample};

/// Tunable constants of the classification pipeline.
///
/// Every threshold and hyperparameter lives here; none of the values is
/// hard-coded at a use site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Confidence at or above which the model's answer stands on its own,
    /// without consulting the keyword matcher (the boundary is inclusive)
    pub confidence_threshold: f32,
    /// How many nearest corpus entries to attach to a result
    pub neighbor_count: usize,
    /// Training hyperparameters
    pub training: TrainParams,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            neighbor_count: 5,
            training: TrainParams::default(),
        }
    }
}

/// A builder for constructing a trained [`Classifier`] with a fluent
/// interface.
///
/// `build()` is the one-time initialization step: it validates the corpus,
/// fits the vocabulary, vectorizes every example and trains the model.
/// Callers are expected to build once per process and reuse the resulting
/// handle across queries.
#[derive(Debug, Default)]
pub struct ClassifierBuilder {
    examples: Vec<TrainingExample>,
    matcher: Option<KeywordMatcher>,
    config: ClassifierConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty builder with the default configuration.
    pub fn new() -> Self {
        Self {
            examples: Vec::new(),
            matcher: None,
            config: ClassifierConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends all examples of a corpus, keeping their order.
    pub fn with_corpus(mut self, corpus: Corpus) -> Self {
        self.examples.extend(corpus.examples().iter().cloned());
        self
    }

    /// Appends a single labeled example.
    ///
    /// # Errors
    /// Returns `ClassifierError::Validation` if the text is blank.
    pub fn add_example(
        mut self,
        text: impl Into<String>,
        category: Category,
    ) -> Result<Self, ClassifierError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ClassifierError::Validation(
                "example text cannot be blank".into(),
            ));
        }
        self.examples.push(TrainingExample::new(text, category));
        Ok(self)
    }

    /// Replaces the built-in keyword matcher used for the low-confidence
    /// fallback path.
    pub fn with_keyword_matcher(mut self, matcher: KeywordMatcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if !(0.0..=1.0).contains(&self.config.confidence_threshold) {
            return Err(ClassifierError::Validation(format!(
                "confidence threshold must be within [0, 1], got {}",
                self.config.confidence_threshold
            )));
        }
        if self.config.training.learning_rate <= 0.0 {
            return Err(ClassifierError::Validation(
                "learning rate must be positive".into(),
            ));
        }
        if let Some(example) = self.examples.iter().find(|e| e.text.trim().is_empty()) {
            return Err(ClassifierError::Validation(format!(
                "corpus contains a blank example labeled {}",
                example.category
            )));
        }

        if self.examples.is_empty() {
            return Err(ClassifierError::Configuration(
                "corpus is empty; nothing to train on".into(),
            ));
        }
        let distinct = Category::ALL
            .iter()
            .filter(|&&c| self.examples.iter().any(|e| e.category == c))
            .count();
        if distinct < 2 {
            return Err(ClassifierError::Configuration(format!(
                "corpus must cover at least 2 distinct categories, found {}",
                distinct
            )));
        }
        Ok(())
    }

    /// Fits the vocabulary, trains the model and returns the immutable
    /// classifier handle.
    ///
    /// Training is deterministic for a fixed corpus, so repeated builds over
    /// unchanged inputs reproduce the same model. A failed build leaves no
    /// observable state behind.
    ///
    /// # Errors
    /// * `ClassifierError::Configuration` if the corpus is empty or covers
    ///   fewer than 2 distinct categories
    /// * `ClassifierError::Validation` if the configuration or an example is
    ///   invalid
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        self.validate()?;

        let corpus = Corpus::new(self.examples);
        let vocabulary = Vocabulary::fit(corpus.examples().iter().map(|e| e.text.as_str()));
        info!(
            "fitted vocabulary: {} terms over {} examples",
            vocabulary.len(),
            corpus.len()
        );

        let corpus_vectors: Vec<_> = corpus
            .examples()
            .iter()
            .map(|e| vocabulary.vectorize(&e.text))
            .collect();
        let labels: Vec<Category> = corpus.examples().iter().map(|e| e.category).collect();

        let model = LinearModel::train(
            &corpus_vectors,
            &labels,
            vocabulary.len(),
            &self.config.training,
        );
        info!("model trained over {} categories", Category::ALL.len());

        let policy = DecisionPolicy::new(self.config.confidence_threshold);
        let matcher = self.matcher.unwrap_or_default();

        Ok(Classifier {
            vocabulary: Arc::new(vocabulary),
            model: Arc::new(model),
            corpus: Arc::new(corpus),
            corpus_vectors: Arc::new(corpus_vectors),
            matcher: Arc::new(matcher),
            policy,
            config: self.config,
        })
    }
}
