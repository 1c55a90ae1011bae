use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A sparse, L2-normalized term-weight vector representing one text.
///
/// Entries are `(vocabulary index, tf-idf weight)` pairs, sorted by index so
/// that the dot product is a linear merge. Because every vector is
/// L2-normalized at construction, the dot product of two vectors equals
/// their cosine similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(usize, f32)>,
}

impl FeatureVector {
    /// True if the text contained no in-vocabulary terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product of two sparse vectors; cosine similarity given the
    /// normalization invariant.
    pub fn dot(&self, other: &FeatureVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            match self.entries[i].0.cmp(&other.entries[j].0) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += self.entries[i].1 * other.entries[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalize(&mut self) {
        let norm: f32 = self
            .entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f32>()
            .sqrt();
        if norm > 1e-10 {
            for entry in &mut self.entries {
                entry.1 /= norm;
            }
        }
    }
}

/// The fixed mapping from text terms (word unigrams and bigrams) to feature
/// indices and smoothed inverse-document-frequency weights.
///
/// Built exactly once by [`Vocabulary::fit`] over the corpus texts and
/// immutable afterwards; every [`FeatureVector`] produced by
/// [`Vocabulary::vectorize`] shares this indexing.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// Builds the vocabulary from the corpus texts.
    ///
    /// Term indices are assigned in first-seen order, which makes fitting
    /// deterministic for a fixed corpus. The idf is smoothed as
    /// `ln((1 + N) / (1 + df)) + 1`, so no term ever has zero weight.
    pub(crate) fn fit<'a, I>(texts: I) -> Vocabulary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut terms: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();
        let mut num_docs = 0usize;

        for text in texts {
            num_docs += 1;
            let mut seen = HashSet::new();
            for term in extract_terms(text) {
                let next = terms.len();
                let idx = *terms.entry(term).or_insert(next);
                if idx == df.len() {
                    df.push(0);
                }
                if seen.insert(idx) {
                    df[idx] += 1;
                }
            }
        }

        let n = num_docs as f32;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        Vocabulary { terms, idf }
    }

    /// Number of distinct terms (the feature-space dimensionality).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Converts a text into its sparse tf-idf vector.
    ///
    /// Out-of-vocabulary terms are silently dropped; a text with no known
    /// terms yields an empty (all-zero) vector, never an error.
    pub fn vectorize(&self, text: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in extract_terms(text) {
            if let Some(&idx) = self.terms.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        entries.sort_unstable_by_key(|&(idx, _)| idx);

        let mut vector = FeatureVector { entries };
        vector.l2_normalize();
        vector
    }
}

/// Lowercases and splits on word boundaries (runs of non-alphanumerics).
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// All unigrams plus contiguous bigrams (joined with a space) of a text.
fn extract_terms(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let bigrams: Vec<String> = tokens.windows(2).map(|pair| pair.join(" ")).collect();
    let mut terms = tokens;
    terms.extend(bigrams);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vocabulary {
        Vocabulary::fit(["plastic bottle", "banana peel", "used battery"])
    }

    #[test]
    fn test_tokenization_normalizes_case_and_punctuation() {
        assert_eq!(tokenize("Used  Battery!"), vec!["used", "battery"]);
        assert_eq!(tokenize("  "), Vec::<String>::new());
    }

    #[test]
    fn test_terms_include_bigrams() {
        let terms = extract_terms("banana peel");
        assert!(terms.contains(&"banana".to_string()));
        assert!(terms.contains(&"peel".to_string()));
        assert!(terms.contains(&"banana peel".to_string()));
    }

    #[test]
    fn test_vocabulary_size() {
        // 6 unigrams + 3 bigrams across the three two-word texts
        assert_eq!(fixture().len(), 9);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let vocab = fixture();
        let vector = vocab.vectorize("banana peel");
        assert!((vector.dot(&vector) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_vocabulary_terms_are_dropped() {
        let vocab = fixture();
        let vector = vocab.vectorize("xyzzy unknown junk");
        assert!(vector.is_empty());

        // Mixed known/unknown keeps only the known part
        let mixed = vocab.vectorize("banana spaceship");
        assert_eq!(mixed.len(), 1);
    }

    #[test]
    fn test_identical_texts_have_unit_similarity() {
        let vocab = fixture();
        let a = vocab.vectorize("used battery");
        let b = vocab.vectorize("used battery");
        assert!((a.dot(&b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_disjoint_texts_have_zero_similarity() {
        let vocab = fixture();
        let a = vocab.vectorize("plastic bottle");
        let b = vocab.vectorize("banana peel");
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_fitting_is_deterministic() {
        let a = fixture();
        let b = fixture();
        assert_eq!(a.vectorize("plastic bottle"), b.vectorize("plastic bottle"));
    }
}
