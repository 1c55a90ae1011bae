//! A thread-safe hybrid text classifier for waste segregation.
//!
//! A statistical TF-IDF + logistic-regression model is trained once from a
//! small labeled corpus; per query it is combined with a deterministic
//! keyword fallback (consulted only when the model is unsure) and a
//! nearest-neighbor explainer that surfaces the most similar training
//! examples as evidence.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use binsight::{Classifier, Corpus};
//!
//! let classifier = Classifier::builder()
//!     .with_corpus(Corpus::builtin())
//!     .build()?;
//!
//! let result = classifier.classify("used tea leaves").expect("non-blank query");
//! println!("{} ({:.0}% confident)", result.category, result.confidence * 100.0);
//! for neighbor in &result.neighbors {
//!     println!("  similar: {} -> {}", neighbor.text, neighbor.category);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is immutable after building and can be shared across
//! threads using `Arc`:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use binsight::{Classifier, Corpus};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let classifier = Arc::new(Classifier::builder()
//!     .with_corpus(Corpus::builtin())
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let classifier = Arc::clone(&classifier);
//!     handles.push(thread::spawn(move || {
//!         classifier.classify("banana peel").unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod corpus;

pub use classifier::{
    ClassificationResult, Classifier, ClassifierBuilder, ClassifierConfig, ClassifierError,
    ClassifierInfo, FeatureVector, KeywordMatcher, LinearModel, Neighbor, TrainParams, Vocabulary,
};
pub use corpus::{Category, Corpus, TrainingExample};

pub fn init_logger() {
    env_logger::init();
}
