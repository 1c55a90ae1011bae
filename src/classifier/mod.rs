mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod error;
mod explain;
mod model;
mod policy;
mod rules;
mod vectorizer;

pub use builder::{ClassifierBuilder, ClassifierConfig};
pub use classifier::{ClassificationResult, Classifier, ClassifierInfo};
pub use error::ClassifierError;
pub use explain::Neighbor;
pub use model::{LinearModel, TrainParams};
pub use rules::KeywordMatcher;
pub use vectorizer::{FeatureVector, Vocabulary};
