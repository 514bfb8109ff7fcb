use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::Result;
use log::warn;

use crate::data::enrich::{enrich, DataWarning, EnrichConfig};
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader;
use crate::data::model::{Amenity, ReviewDataset, ReviewRecord};
use crate::error::Error;
use crate::score::{RankedAirline, Scorer};

/// How many recommendations a single request may ask for.
pub const DEFAULT_TOP_N_RANGE: RangeInclusive<usize> = 1..=10;

/// At most this many data-quality warnings are retained per kind of issue;
/// the rest are counted but dropped (they are a sample, not an audit log).
const WARNING_SAMPLE_CAP: usize = 10;

// ---------------------------------------------------------------------------
// Request outcome types
// ---------------------------------------------------------------------------

/// One presentation-ready row per recommended airline.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub airline: String,
    pub score: f64,
    pub departure: String,
    pub destination: String,
    pub class: String,
    pub amenities: BTreeSet<Amenity>,
    /// Review text of the first record that contributed to the score.
    pub sample_review: String,
}

/// Successful outcome of a recommendation request.
///
/// `NoMatches` is deliberately distinct from [`Error`]: filters eliminating
/// every row is a normal, reportable result, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Ranked(Vec<DisplayRow>),
    NoMatches,
}

// ---------------------------------------------------------------------------
// Recommender – the load-once pipeline owner
// ---------------------------------------------------------------------------

/// Read-only handle over the enriched dataset, threaded through every
/// request.
///
/// Construction enriches the raw records exactly once (enrichment is pure,
/// so caching it is an optimization with no behavioral consequence). After
/// that the recommender is immutable: requests run `&self` and own their
/// own [`FilterSelection`] and results, so sharing the handle read-only
/// across concurrent callers is safe.
#[derive(Debug, Clone)]
pub struct Recommender {
    dataset: ReviewDataset,
    warnings: Vec<DataWarning>,
    top_n_range: RangeInclusive<usize>,
}

impl Recommender {
    /// Enrich raw records and build the dataset index.
    pub fn new(records: Vec<ReviewRecord>, config: &EnrichConfig) -> Self {
        let mut all_warnings = Vec::new();
        let enriched = records
            .into_iter()
            .enumerate()
            .map(|(row, record)| enrich(row, record, config, &mut all_warnings))
            .collect();

        for warning in &all_warnings {
            warn!("{warning}");
        }
        let warnings = sample_warnings(all_warnings);

        Recommender {
            dataset: ReviewDataset::from_records(enriched),
            warnings,
            top_n_range: DEFAULT_TOP_N_RANGE,
        }
    }

    /// Load a dataset file and enrich it. Loader errors are fatal
    /// configuration problems; nothing is served from a partial dataset.
    pub fn from_path(path: &Path, config: &EnrichConfig) -> Result<Self> {
        let records = loader::load_file(path)?;
        Ok(Self::new(records, config))
    }

    /// Override the allowed `top_n` range (defaults to 1..=10).
    pub fn with_top_n_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.top_n_range = range;
        self
    }

    pub fn dataset(&self) -> &ReviewDataset {
        &self.dataset
    }

    /// Sampled data-quality notices collected during enrichment. Never
    /// blocks a response; the presentation collaborator may show them
    /// alongside results.
    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }

    /// Run one full request: filter → score → assemble.
    ///
    /// Returns `Err` only for request validation failures; zero surviving
    /// rows or fewer than `top_n` airlines are success cases.
    pub fn recommend(
        &self,
        selection: &FilterSelection,
        scorer: &dyn Scorer,
        top_n: usize,
    ) -> Result<Recommendation, Error> {
        if !self.top_n_range.contains(&top_n) {
            return Err(Error::TopNOutOfRange {
                requested: top_n,
                min: *self.top_n_range.start(),
                max: *self.top_n_range.end(),
            });
        }

        let indices = filtered_indices(&self.dataset, selection);
        if indices.is_empty() {
            return Ok(Recommendation::NoMatches);
        }

        let ranked = scorer.rank(&self.dataset, &indices, top_n)?;
        if ranked.is_empty() {
            return Ok(Recommendation::NoMatches);
        }
        Ok(Recommendation::Ranked(self.assemble(&ranked)))
    }

    /// One display row per ranked airline, in score order, populated from
    /// the first contributing record.
    fn assemble(&self, ranked: &[RankedAirline]) -> Vec<DisplayRow> {
        ranked
            .iter()
            .filter_map(|entry| {
                let first = *entry.supporting.first()?;
                let rec = &self.dataset.records()[first];
                Some(DisplayRow {
                    airline: entry.airline.clone(),
                    score: entry.score,
                    departure: rec.departure.clone(),
                    destination: rec.destination.clone(),
                    class: rec.class.clone(),
                    amenities: rec.amenities.clone(),
                    sample_review: rec.record.review_text.clone(),
                })
            })
            .collect()
    }
}

/// Keep at most [`WARNING_SAMPLE_CAP`] warnings per kind, in input order.
fn sample_warnings(all: Vec<DataWarning>) -> Vec<DataWarning> {
    let mut routes = 0usize;
    let mut classes = 0usize;
    all.into_iter()
        .filter(|w| {
            let count = match w {
                DataWarning::UnparseableRoute { .. } => &mut routes,
                DataWarning::UnrecognizedClass { .. } => &mut classes,
            };
            *count += 1;
            *count <= WARNING_SAMPLE_CAP
        })
        .collect()
}
