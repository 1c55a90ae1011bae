use log::debug;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::vectorizer::FeatureVector;
use crate::corpus::Category;

/// Hyperparameters for training the linear model.
///
/// Training is full-batch gradient descent from a zero initialization, so it
/// is deterministic without a random seed: retraining over an unchanged
/// corpus reproduces the model bit for bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainParams {
    /// Gradient descent step size
    pub learning_rate: f32,
    /// L2 regularization strength applied to the weights (not the bias)
    pub l2_penalty: f32,
    /// Upper bound on gradient descent iterations
    pub max_iterations: usize,
    /// Stop once the loss improves by less than this between iterations
    pub tolerance: f32,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            l2_penalty: 1e-3,
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

/// A multiclass linear model: one weight row and bias per category.
///
/// Immutable after training; `predict_proba` is a pure function of
/// `(model, vector)` and is safe to call concurrently.
#[derive(Debug, Clone)]
pub struct LinearModel {
    /// Per-category weight rows, `[num_categories, num_features]`
    weights: Array2<f32>,
    /// Per-category bias, `[num_categories]`
    bias: Array1<f32>,
}

impl LinearModel {
    /// Trains a multinomial logistic regression model on the corpus vectors.
    ///
    /// Minimizes the mean softmax cross-entropy plus an L2 penalty over the
    /// weights, stopping at `max_iterations` or once the loss improvement
    /// drops below `tolerance`.
    pub(crate) fn train(
        vectors: &[FeatureVector],
        labels: &[Category],
        num_features: usize,
        params: &TrainParams,
    ) -> LinearModel {
        let num_categories = Category::ALL.len();
        let mut model = LinearModel {
            weights: Array2::zeros((num_categories, num_features)),
            bias: Array1::zeros(num_categories),
        };

        let n = vectors.len() as f32;
        let mut prev_loss = f32::INFINITY;

        for iteration in 0..params.max_iterations {
            let mut grad_w: Array2<f32> = Array2::zeros((num_categories, num_features));
            let mut grad_b: Array1<f32> = Array1::zeros(num_categories);
            let mut loss = 0.0f32;

            for (vector, &label) in vectors.iter().zip(labels) {
                let probs = model.predict_proba(vector);
                loss -= probs[label.index()].max(1e-12).ln();

                for c in 0..num_categories {
                    let delta = probs[c] - if c == label.index() { 1.0 } else { 0.0 };
                    grad_b[c] += delta;
                    for (idx, weight) in vector.iter() {
                        grad_w[[c, idx]] += delta * weight;
                    }
                }
            }

            loss /= n;
            loss += 0.5 * params.l2_penalty * model.weights.iter().map(|w| w * w).sum::<f32>();

            grad_w = grad_w / n + &model.weights * params.l2_penalty;
            grad_b /= n;
            model.weights -= &(grad_w * params.learning_rate);
            model.bias -= &(grad_b * params.learning_rate);

            if (prev_loss - loss).abs() < params.tolerance {
                debug!(
                    "training converged after {} iterations (loss {:.6})",
                    iteration + 1,
                    loss
                );
                return model;
            }
            prev_loss = loss;
        }

        debug!(
            "training stopped at the iteration cap of {} (loss {:.6})",
            params.max_iterations, prev_loss
        );
        model
    }

    /// Probability distribution over categories for a query vector, in
    /// canonical category order. Probabilities are non-negative and sum to 1.
    ///
    /// An all-zero vector degrades to a softmax over the biases alone.
    pub fn predict_proba(&self, vector: &FeatureVector) -> Array1<f32> {
        let mut scores = self.bias.clone();
        for (idx, weight) in vector.iter() {
            for c in 0..scores.len() {
                scores[c] += self.weights[[c, idx]] * weight;
            }
        }
        softmax(scores)
    }
}

/// Numerically stable softmax (max-subtracted before exponentiation).
fn softmax(scores: Array1<f32>) -> Array1<f32> {
    let max = scores.fold(f32::NEG_INFINITY, |acc, &s| acc.max(s));
    let exp = scores.mapv(|s| (s - max).exp());
    let sum = exp.sum();
    exp / sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::vectorizer::Vocabulary;

    fn toy_training_data() -> (Vec<FeatureVector>, Vec<Category>, usize) {
        let texts = ["plastic bottle", "banana peel", "used battery"];
        let labels = vec![Category::Dry, Category::Wet, Category::Hazardous];
        let vocab = Vocabulary::fit(texts);
        let vectors = texts.iter().map(|t| vocab.vectorize(t)).collect();
        (vectors, labels, vocab.len())
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(Array1::from(vec![2.0, -1.0, 0.5]));
        assert!((probs.sum() - 1.0).abs() < 1e-6);
        assert!(probs.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_softmax_is_stable_for_large_scores() {
        let probs = softmax(Array1::from(vec![1000.0, 999.0, 998.0]));
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_training_separates_disjoint_classes() {
        let (vectors, labels, num_features) = toy_training_data();
        let model = LinearModel::train(&vectors, &labels, num_features, &TrainParams::default());

        for (vector, &label) in vectors.iter().zip(&labels) {
            let probs = model.predict_proba(vector);
            let argmax = (0..probs.len())
                .max_by(|&a, &b| probs[a].total_cmp(&probs[b]))
                .unwrap();
            assert_eq!(argmax, label.index());
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let (vectors, labels, num_features) = toy_training_data();
        let params = TrainParams::default();
        let a = LinearModel::train(&vectors, &labels, num_features, &params);
        let b = LinearModel::train(&vectors, &labels, num_features, &params);

        let probs_a = a.predict_proba(&vectors[0]);
        let probs_b = b.predict_proba(&vectors[0]);
        assert_eq!(probs_a, probs_b);
    }

    #[test]
    fn test_zero_vector_scores_from_bias_only() {
        let (vectors, labels, num_features) = toy_training_data();
        let model = LinearModel::train(&vectors, &labels, num_features, &TrainParams::default());

        let vocab = Vocabulary::fit(["plastic bottle", "banana peel", "used battery"]);
        let empty = vocab.vectorize("xyzzy unknown junk");
        assert!(empty.is_empty());

        let probs = model.predict_proba(&empty);
        assert!((probs.sum() - 1.0).abs() < 1e-6);
        // Balanced corpus keeps the bias-only distribution near uniform
        assert!(probs.iter().all(|&p| p < 0.6));
    }
}
