use std::cmp::Ordering;

use serde::Serialize;

use super::vectorizer::FeatureVector;
use crate::corpus::{Category, Corpus};

/// A corpus entry ranked as supporting evidence for a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    /// The training example's text
    pub text: String,
    /// The training example's category
    pub category: Category,
    /// Cosine similarity to the query, in (0, 1]
    pub similarity: f32,
}

/// Ranks corpus entries by similarity to the query vector and returns the
/// top `k`.
///
/// Entries with similarity <= 0 carry no meaningful overlap and are dropped.
/// The sort is stable, so equal similarities keep corpus insertion order.
pub(crate) fn rank_neighbors(
    query: &FeatureVector,
    corpus: &Corpus,
    corpus_vectors: &[FeatureVector],
    k: usize,
) -> Vec<Neighbor> {
    let mut ranked: Vec<Neighbor> = corpus
        .examples()
        .iter()
        .zip(corpus_vectors)
        .filter_map(|(example, vector)| {
            let similarity = query.dot(vector);
            (similarity > 0.0).then(|| Neighbor {
                text: example.text.clone(),
                category: example.category,
                similarity,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::vectorizer::Vocabulary;
    use crate::corpus::TrainingExample;

    fn fixture() -> (Vocabulary, Corpus, Vec<FeatureVector>) {
        let corpus = Corpus::new(vec![
            TrainingExample::new("plastic bottle", Category::Dry),
            TrainingExample::new("glass bottle", Category::Dry),
            TrainingExample::new("banana peel", Category::Wet),
            TrainingExample::new("used battery", Category::Hazardous),
        ]);
        let vocab = Vocabulary::fit(corpus.examples().iter().map(|e| e.text.as_str()));
        let vectors = corpus
            .examples()
            .iter()
            .map(|e| vocab.vectorize(&e.text))
            .collect();
        (vocab, corpus, vectors)
    }

    #[test]
    fn test_exact_match_ranks_first_with_unit_similarity() {
        let (vocab, corpus, vectors) = fixture();
        let query = vocab.vectorize("banana peel");
        let neighbors = rank_neighbors(&query, &corpus, &vectors, 5);

        assert_eq!(neighbors[0].text, "banana peel");
        assert_eq!(neighbors[0].category, Category::Wet);
        assert!((neighbors[0].similarity - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_neighbors_are_positive_and_descending() {
        let (vocab, corpus, vectors) = fixture();
        let query = vocab.vectorize("plastic bottle");
        let neighbors = rank_neighbors(&query, &corpus, &vectors, 5);

        assert!(neighbors.iter().all(|n| n.similarity > 0.0));
        assert!(neighbors
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
        // "banana peel" and "used battery" share no terms with the query
        assert!(neighbors.iter().all(|n| n.text.contains("bottle")));
    }

    #[test]
    fn test_k_truncation() {
        let (vocab, corpus, vectors) = fixture();
        let query = vocab.vectorize("plastic bottle");
        let neighbors = rank_neighbors(&query, &corpus, &vectors, 1);
        assert_eq!(neighbors.len(), 1);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let (vocab, corpus, vectors) = fixture();
        // "bottle" alone is equally similar to both bottle entries
        let query = vocab.vectorize("bottle");
        let neighbors = rank_neighbors(&query, &corpus, &vectors, 5);

        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].text, "plastic bottle");
        assert_eq!(neighbors[1].text, "glass bottle");
    }

    #[test]
    fn test_no_overlap_yields_no_neighbors() {
        let (vocab, corpus, vectors) = fixture();
        let query = vocab.vectorize("xyzzy unknown junk");
        assert!(rank_neighbors(&query, &corpus, &vectors, 5).is_empty());
    }
}
