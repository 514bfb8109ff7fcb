//! Skyward: airline recommendation engine.
//!
//! Filters a dataset of airline reviews by the traveller's declared
//! preferences and ranks the surviving airlines, either by aggregate rating
//! or by text similarity against a free-form preference statement.
//!
//! The crate is the pipeline only; interactive widgets and table rendering
//! belong to the presentation collaborator (see `src/main.rs` for a minimal
//! CLI one). Pipeline stages:
//!
//! ```text
//! raw records → normalized/enriched records → filtered subset
//!             → scored & ranked airlines → deduplicated display rows
//! ```
//!
//! # Quick start
//!
//! ```
//! use skyward::{EnrichConfig, FilterSelection, RatingScorer, Recommender, ReviewRecord};
//!
//! let records = vec![ReviewRecord {
//!     airline: "Qantas".to_string(),
//!     route_raw: "Sydney to Singapore".to_string(),
//!     class: "Economy".to_string(),
//!     traveller_type: "Solo Leisure".to_string(),
//!     review_text: "Friendly crew, decent wifi.".to_string(),
//!     overall_rating: Some(8.0),
//! }];
//! let recommender = Recommender::new(records, &EnrichConfig::default());
//! let outcome = recommender
//!     .recommend(&FilterSelection::default(), &RatingScorer, 5)
//!     .unwrap();
//! # let _ = outcome;
//! ```

pub mod data;
pub mod engine;
pub mod error;
pub mod score;

pub use data::enrich::{DataWarning, EnrichConfig};
pub use data::filter::FilterSelection;
pub use data::model::{
    Alliance, Amenity, BudgetTier, DurationBucket, EnrichedRecord, ReviewDataset, ReviewRecord,
};
pub use engine::{DisplayRow, Recommendation, Recommender};
pub use error::Error;
pub use score::{RankedAirline, RatingScorer, Scorer, SimilarityScorer};
