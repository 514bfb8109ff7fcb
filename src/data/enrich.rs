use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::model::{Alliance, Amenity, BudgetTier, DurationBucket, EnrichedRecord, ReviewRecord};
use super::route::{self, title_case};

// ---------------------------------------------------------------------------
// EnrichConfig – lookup tables as data, not code
// ---------------------------------------------------------------------------

/// Mapping data driving synthetic-attribute derivation.
///
/// Every table can be overridden from a JSON file; [`EnrichConfig::default`]
/// carries the stock tables. Extending a keyword set or adding an airline
/// never requires touching the derivation algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Normalized cabin class → budget tier.
    pub class_budget: BTreeMap<String, BudgetTier>,
    /// Airline name → alliance membership.
    pub airline_alliance: BTreeMap<String, Alliance>,
    /// Endpoint keywords marking a route as short-haul.
    pub short_haul_hubs: Vec<String>,
    /// Endpoint keywords marking a route as long-haul.
    pub long_haul_hubs: Vec<String>,
    /// Common cabin-class misspellings → corrected spelling.
    pub class_typos: BTreeMap<String, String>,
    /// Review-text substring (lowercase) → amenity it implies.
    pub amenity_keywords: Vec<(String, Amenity)>,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        let class_budget = BTreeMap::from([
            ("Economy".to_string(), BudgetTier::Cheap),
            ("Premium Economy".to_string(), BudgetTier::Mid),
            ("Business".to_string(), BudgetTier::Luxury),
            ("First".to_string(), BudgetTier::Luxury),
        ]);
        let airline_alliance = BTreeMap::from([
            ("Lufthansa".to_string(), Alliance::StarAlliance),
            ("Singapore Airlines".to_string(), Alliance::StarAlliance),
            ("United Airlines".to_string(), Alliance::StarAlliance),
            ("Turkish Airlines".to_string(), Alliance::StarAlliance),
            ("Air Canada".to_string(), Alliance::StarAlliance),
            ("British Airways".to_string(), Alliance::Oneworld),
            ("Qantas".to_string(), Alliance::Oneworld),
            ("American Airlines".to_string(), Alliance::Oneworld),
            ("Cathay Pacific".to_string(), Alliance::Oneworld),
            ("Qatar Airways".to_string(), Alliance::Oneworld),
            ("Air France".to_string(), Alliance::SkyTeam),
            ("KLM".to_string(), Alliance::SkyTeam),
            ("Delta Air Lines".to_string(), Alliance::SkyTeam),
            ("Korean Air".to_string(), Alliance::SkyTeam),
            ("Emirates".to_string(), Alliance::None),
            ("Ryanair".to_string(), Alliance::None),
        ]);
        let short_haul_hubs = ["London", "Paris", "Rome", "Amsterdam", "Madrid"]
            .map(String::from)
            .to_vec();
        let long_haul_hubs = ["New York", "Dubai", "Singapore", "Sydney", "Tokyo", "Los Angeles"]
            .map(String::from)
            .to_vec();
        let class_typos = BTreeMap::from([
            ("Economyy".to_string(), "Economy".to_string()),
            ("Eco".to_string(), "Economy".to_string()),
            ("Busines".to_string(), "Business".to_string()),
        ]);
        let amenity_keywords = vec![
            ("wifi".to_string(), Amenity::WiFi),
            ("legroom".to_string(), Amenity::ExtraLegroom),
            ("lounge".to_string(), Amenity::LoungeAccess),
        ];
        EnrichConfig {
            class_budget,
            airline_alliance,
            short_haul_hubs,
            long_haul_hubs,
            class_typos,
            amenity_keywords,
        }
    }
}

impl EnrichConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading enrichment config")?;
        serde_json::from_str(&text).context("parsing enrichment config")
    }
}

// ---------------------------------------------------------------------------
// Enrichment – pure derivation of synthetic attributes
// ---------------------------------------------------------------------------

/// Non-fatal data-quality notice emitted while enriching a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataWarning {
    /// Route text that could not be split into departure/destination.
    UnparseableRoute { row: usize, route_raw: String },
    /// Cabin class missing from the budget table; budget fell back to Cheap.
    UnrecognizedClass { row: usize, class: String },
}

impl std::fmt::Display for DataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataWarning::UnparseableRoute { row, route_raw } => {
                write!(f, "row {row}: unparseable route '{route_raw}'")
            }
            DataWarning::UnrecognizedClass { row, class } => {
                write!(f, "row {row}: unrecognized class '{class}', assuming Cheap")
            }
        }
    }
}

/// Derive all synthetic attributes for one review.
///
/// Pure and deterministic; a bad row degrades to documented fallbacks
/// (reported through `warnings`) and never fails.
pub fn enrich(
    row: usize,
    record: ReviewRecord,
    config: &EnrichConfig,
    warnings: &mut Vec<DataWarning>,
) -> EnrichedRecord {
    let (departure, destination) = route::normalize(&record.route_raw);
    if route::is_unparsed(&departure, &destination) {
        warnings.push(DataWarning::UnparseableRoute {
            row,
            route_raw: record.route_raw.clone(),
        });
    }

    let class = normalize_class(&record.class, config);
    let budget_tier = match config.class_budget.get(&class) {
        Some(tier) => *tier,
        None => {
            warnings.push(DataWarning::UnrecognizedClass {
                row,
                class: class.clone(),
            });
            BudgetTier::Cheap
        }
    };

    let alliance = config
        .airline_alliance
        .get(record.airline.trim())
        .copied()
        .unwrap_or(Alliance::None);

    let duration_bucket = duration_bucket(&departure, &destination, config);
    let amenities = amenities(&record.review_text, config);

    EnrichedRecord {
        record,
        departure,
        destination,
        class,
        budget_tier,
        alliance,
        duration_bucket,
        amenities,
    }
}

/// Trim, title-case, and fix known typos in a cabin-class label.
pub fn normalize_class(raw: &str, config: &EnrichConfig) -> String {
    let cased = title_case(raw);
    match config.class_typos.get(&cased) {
        Some(fixed) => fixed.clone(),
        None => cased,
    }
}

fn duration_bucket(departure: &str, destination: &str, config: &EnrichConfig) -> DurationBucket {
    let endpoints = format!("{departure} {destination}").to_lowercase();
    let mentions = |hubs: &[String]| {
        hubs.iter()
            .any(|hub| endpoints.contains(&hub.to_lowercase()))
    };
    if mentions(&config.short_haul_hubs) {
        DurationBucket::ShortHaul
    } else if mentions(&config.long_haul_hubs) {
        DurationBucket::LongHaul
    } else {
        DurationBucket::MediumHaul
    }
}

fn amenities(review_text: &str, config: &EnrichConfig) -> BTreeSet<Amenity> {
    let text = review_text.to_lowercase();
    let mut found: BTreeSet<Amenity> = config
        .amenity_keywords
        .iter()
        .filter(|(keyword, _)| text.contains(keyword.as_str()))
        .map(|(_, amenity)| *amenity)
        .collect();
    // Legacy behavior carried over from the source dataset tooling: every
    // record is tagged with Entertainment regardless of review content.
    found.insert(Amenity::Entertainment);
    found
}
