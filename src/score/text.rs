//! Minimal text vectorization for the similarity strategy: lowercase
//! alphanumeric tokenization, English stop-word removal, a capped TF-IDF
//! vocabulary, and cosine similarity over the resulting dense vectors.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Common English stop words excluded from the TF-IDF vocabulary.
const STOP_WORDS: [&str; 64] = [
    "a", "about", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "but", "by", "can", "could", "did", "do", "for", "from", "had", "has",
    "have", "he", "her", "his", "i", "if", "in", "is", "it", "its", "me", "my", "no", "not", "of",
    "on", "or", "our", "she", "so", "some", "than", "that", "the", "their", "them", "there",
    "they", "this", "to", "very", "was", "we", "were", "what", "when", "which", "with", "would",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Lowercase a text and split it into alphanumeric tokens, dropping stop
/// words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !STOP_WORD_SET.contains(t))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// TF-IDF vectorizer
// ---------------------------------------------------------------------------

/// Term-frequency / inverse-document-frequency vectorizer.
///
/// `tfidf(t, d) = tf(t, d) × ln(N / df(t))` with the vocabulary capped at
/// `max_features` terms, most frequent first (ties broken alphabetically so
/// the vocabulary is deterministic).
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Learn the vocabulary and document frequencies from a corpus.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        let n_docs = documents.len();
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let mut seen: HashSet<&str> = HashSet::new();
            for token in &tokens {
                *term_freq.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token) {
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        // Most frequent terms first, alphabetical among equals.
        let mut sorted: Vec<(String, usize)> = term_freq.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted.truncate(self.max_features);

        self.vocabulary = sorted
            .into_iter()
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();

        self.idf = vec![0.0; self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            let df = doc_freq.get(term).copied().unwrap_or(0).max(1);
            self.idf[idx] = (n_docs as f64 / df as f64).ln();
        }
    }

    /// Vectorize a single text against the learned vocabulary.
    ///
    /// Out-of-vocabulary tokens are ignored; an all-unknown text yields the
    /// zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vec = vec![0.0; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                vec[idx] += 1.0;
            }
        }
        for (idx, value) in vec.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }
        vec
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Cosine similarity between two equal-length vectors.
///
/// A zero vector is orthogonal to everything, giving similarity 0.0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_drops_stop_words() {
        assert_eq!(
            tokenize("The food WAS great, and the crew friendly!"),
            vec!["food", "great", "crew", "friendly"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("the and of").is_empty());
    }

    #[test]
    fn vocabulary_is_capped_and_deterministic() {
        let docs = ["apple banana cherry", "apple banana", "apple"];
        let mut v1 = TfidfVectorizer::new(2);
        v1.fit(&docs);
        let mut v2 = TfidfVectorizer::new(2);
        v2.fit(&docs);
        assert_eq!(v1.vocabulary_size(), 2);
        assert_eq!(v1.transform("apple cherry"), v2.transform("apple cherry"));
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let docs = ["wifi seat seat", "seat food", "seat crew"];
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&docs);
        let query = vectorizer.transform("wifi seat");
        let wifi_doc = vectorizer.transform("wifi");
        let seat_doc = vectorizer.transform("seat");
        // "seat" appears in every document so its idf is ln(1) = 0.
        assert!(cosine_similarity(&query, &wifi_doc) > cosine_similarity(&query, &seat_doc));
    }

    #[test]
    fn cosine_handles_zero_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        let sim = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_tokens_vectorize_to_zero() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&["wifi was fast"]);
        let vec = vectorizer.transform("zzz qqq");
        assert!(vec.iter().all(|&v| v == 0.0));
    }
}
