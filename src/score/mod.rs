//! Scoring strategies: rank filtered reviews per airline.
//!
//! Two interchangeable strategies implement [`Scorer`]:
//! * [`RatingScorer`] — arithmetic mean of overall ratings per airline.
//! * [`SimilarityScorer`] — TF-IDF cosine similarity of each review against
//!   the traveller's free-text preference, averaged per airline.
//!
//! Both are pure functions of the dataset and the filtered index set, and
//! both produce deterministic orderings: descending score, ties kept in
//! first-seen input order.

pub mod text;

use crate::data::model::ReviewDataset;
use crate::error::Error;

use text::{cosine_similarity, TfidfVectorizer};

/// Vocabulary cap for the similarity strategy.
pub const MAX_VOCABULARY: usize = 5000;

/// One airline surviving scoring, with the rows that contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAirline {
    pub airline: String,
    pub score: f64,
    /// Dataset indices of the contributing reviews, in input order.
    pub supporting: Vec<usize>,
}

/// A scoring strategy over the filtered subset of the dataset.
///
/// `indices` are the rows surviving the filter, in input order. `top_n` is a
/// strict upper bound; fewer qualifying airlines is success, not an error.
pub trait Scorer {
    fn rank(
        &self,
        dataset: &ReviewDataset,
        indices: &[usize],
        top_n: usize,
    ) -> Result<Vec<RankedAirline>, Error>;
}

/// Group filtered rows by airline, preserving first-seen order.
fn group_by_airline(dataset: &ReviewDataset, indices: &[usize]) -> Vec<(String, Vec<usize>)> {
    let mut order: Vec<(String, Vec<usize>)> = Vec::new();
    for &idx in indices {
        let airline = &dataset.records()[idx].record.airline;
        match order.iter_mut().find(|(name, _)| name == airline) {
            Some((_, rows)) => rows.push(idx),
            None => order.push((airline.clone(), vec![idx])),
        }
    }
    order
}

/// Sort descending by score, keeping first-seen order among equals, then cut
/// to `top_n`.
fn finish_ranking(mut ranked: Vec<RankedAirline>, top_n: usize) -> Vec<RankedAirline> {
    // Stable sort: equal scores keep their first-seen placement.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);
    ranked
}

// ---------------------------------------------------------------------------
// Rating strategy
// ---------------------------------------------------------------------------

/// Rank airlines by the arithmetic mean of their overall ratings.
///
/// Rows with a missing rating are ignored; an airline with no valid ratings
/// at all is excluded from the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingScorer;

impl Scorer for RatingScorer {
    fn rank(
        &self,
        dataset: &ReviewDataset,
        indices: &[usize],
        top_n: usize,
    ) -> Result<Vec<RankedAirline>, Error> {
        let ranked = group_by_airline(dataset, indices)
            .into_iter()
            .filter_map(|(airline, rows)| {
                let ratings: Vec<f64> = rows
                    .iter()
                    .filter_map(|&i| dataset.records()[i].record.overall_rating)
                    .collect();
                if ratings.is_empty() {
                    return None;
                }
                let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
                Some(RankedAirline {
                    airline,
                    score: mean,
                    supporting: rows,
                })
            })
            .collect();
        Ok(finish_ranking(ranked, top_n))
    }
}

// ---------------------------------------------------------------------------
// Similarity strategy
// ---------------------------------------------------------------------------

/// Rank airlines by textual closeness of their reviews to a free-text
/// preference statement.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    query: String,
}

impl SimilarityScorer {
    /// Rejects empty/whitespace-only preference text up front, before any
    /// vector computation happens.
    pub fn new(query: impl Into<String>) -> Result<Self, Error> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(Self { query })
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Scorer for SimilarityScorer {
    fn rank(
        &self,
        dataset: &ReviewDataset,
        indices: &[usize],
        top_n: usize,
    ) -> Result<Vec<RankedAirline>, Error> {
        // Guard again in case the scorer was deserialized or constructed
        // through a path that skipped `new`.
        if self.query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        if indices.is_empty() {
            return Ok(Vec::new());
        }

        let reviews: Vec<&str> = indices
            .iter()
            .map(|&i| dataset.records()[i].record.review_text.as_str())
            .collect();

        let mut vectorizer = TfidfVectorizer::new(MAX_VOCABULARY);
        vectorizer.fit(&reviews);
        let query_vec = vectorizer.transform(&self.query);

        // Per-row similarity, addressed by dataset index.
        let similarities: std::collections::HashMap<usize, f64> = indices
            .iter()
            .zip(&reviews)
            .map(|(&idx, review)| {
                let review_vec = vectorizer.transform(review);
                (idx, cosine_similarity(&query_vec, &review_vec))
            })
            .collect();

        let ranked = group_by_airline(dataset, indices)
            .into_iter()
            .map(|(airline, rows)| {
                let total: f64 = rows
                    .iter()
                    .map(|i| similarities.get(i).copied().unwrap_or(0.0))
                    .sum();
                let mean = total / rows.len() as f64;
                RankedAirline {
                    airline,
                    score: mean,
                    supporting: rows,
                }
            })
            .collect();
        Ok(finish_ranking(ranked, top_n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::enrich::{enrich, EnrichConfig};
    use crate::data::model::ReviewRecord;

    fn dataset(rows: &[(&str, &str, Option<f64>)]) -> ReviewDataset {
        let config = EnrichConfig::default();
        let mut warnings = Vec::new();
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, (airline, review, rating))| {
                enrich(
                    i,
                    ReviewRecord {
                        airline: airline.to_string(),
                        route_raw: "London to Paris".to_string(),
                        class: "Economy".to_string(),
                        traveller_type: "Solo Leisure".to_string(),
                        review_text: review.to_string(),
                        overall_rating: *rating,
                    },
                    &config,
                    &mut warnings,
                )
            })
            .collect();
        ReviewDataset::from_records(records)
    }

    #[test]
    fn rating_strategy_ranks_by_mean_descending() {
        let ds = dataset(&[
            ("Alpha Air", "", Some(6.0)),
            ("Beta Air", "", Some(9.0)),
            ("Alpha Air", "", Some(8.0)),
            ("Gamma Air", "", Some(5.0)),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let ranked = RatingScorer.rank(&ds, &indices, 10).unwrap();
        let names: Vec<&str> = ranked.iter().map(|r| r.airline.as_str()).collect();
        assert_eq!(names, ["Beta Air", "Alpha Air", "Gamma Air"]);
        assert!((ranked[1].score - 7.0).abs() < 1e-12);
        assert_eq!(ranked[1].supporting, vec![0, 2]);
    }

    #[test]
    fn airline_without_valid_ratings_is_excluded() {
        let ds = dataset(&[
            ("Alpha Air", "", None),
            ("Beta Air", "", Some(4.0)),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let ranked = RatingScorer.rank(&ds, &indices, 10).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].airline, "Beta Air");
    }

    #[test]
    fn rating_ties_keep_first_seen_order() {
        let ds = dataset(&[
            ("Zulu Air", "", Some(7.0)),
            ("Alpha Air", "", Some(7.0)),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let first = RatingScorer.rank(&ds, &indices, 10).unwrap();
        let second = RatingScorer.rank(&ds, &indices, 10).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].airline, "Zulu Air");
    }

    #[test]
    fn top_n_is_a_strict_upper_bound() {
        let ds = dataset(&[
            ("A", "", Some(1.0)),
            ("B", "", Some(2.0)),
            ("C", "", Some(3.0)),
            ("D", "", Some(4.0)),
            ("E", "", Some(5.0)),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let ranked = RatingScorer.rank(&ds, &indices, 3).unwrap();
        assert_eq!(ranked.len(), 3);
        assert!(ranked.windows(2).all(|w| w[0].score > w[1].score));

        // Fewer qualifying airlines than top_n is fine.
        let ranked = RatingScorer.rank(&ds, &indices[..2], 3).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn empty_query_is_rejected_before_scoring() {
        assert_eq!(SimilarityScorer::new("").unwrap_err(), Error::EmptyQuery);
        assert_eq!(
            SimilarityScorer::new("   \t ").unwrap_err(),
            Error::EmptyQuery
        );
    }

    #[test]
    fn similarity_prefers_matching_reviews() {
        let ds = dataset(&[
            ("Comfort Air", "spacious seat and great food on this airline", None),
            ("Noisy Air", "delayed departure, lost baggage, rude staff", None),
            ("Comfort Air", "excellent food, comfortable seat", None),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let scorer = SimilarityScorer::new("comfortable seat and good food").unwrap();
        let ranked = scorer.rank(&ds, &indices, 5).unwrap();
        assert_eq!(ranked[0].airline, "Comfort Air");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn similarity_over_empty_subset_yields_nothing() {
        let ds = dataset(&[("A", "fine", Some(5.0))]);
        let scorer = SimilarityScorer::new("anything").unwrap();
        assert!(scorer.rank(&ds, &[], 5).unwrap().is_empty());
    }

    #[test]
    fn similarity_ranking_is_deterministic() {
        let ds = dataset(&[
            ("A", "wifi worked well", None),
            ("B", "wifi worked well", None),
            ("C", "no connectivity at all", None),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let scorer = SimilarityScorer::new("reliable wifi").unwrap();
        let first = scorer.rank(&ds, &indices, 3).unwrap();
        let second = scorer.rank(&ds, &indices, 3).unwrap();
        assert_eq!(first, second);
        // A and B tie exactly; first-seen order breaks the tie.
        assert_eq!(first[0].airline, "A");
        assert_eq!(first[1].airline, "B");
    }
}
