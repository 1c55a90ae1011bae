use thiserror::Error;

/// Represents the different types of errors that can occur in the classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The corpus or configuration cannot support training a meaningful model
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Invalid input parameters were supplied
    #[error("Validation error: {0}")]
    Validation(String),
}
