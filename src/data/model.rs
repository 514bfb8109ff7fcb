use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Derived-attribute enums
// ---------------------------------------------------------------------------

/// Coarse price category derived from cabin class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    Cheap,
    Mid,
    Luxury,
}

/// Airline grouping used as a filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Alliance {
    StarAlliance,
    Oneworld,
    SkyTeam,
    /// Not affiliated with any alliance (also the fallback for airlines
    /// missing from the lookup table).
    None,
}

/// Coarse flight-length category inferred from route keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    ShortHaul,
    MediumHaul,
    LongHaul,
}

/// Cabin amenity detected in (or defaulted onto) a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Amenity {
    WiFi,
    Entertainment,
    ExtraLegroom,
    LoungeAccess,
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BudgetTier::Cheap => "Cheap",
            BudgetTier::Mid => "Mid",
            BudgetTier::Luxury => "Luxury",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Alliance::StarAlliance => "Star Alliance",
            Alliance::Oneworld => "Oneworld",
            Alliance::SkyTeam => "SkyTeam",
            Alliance::None => "None",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DurationBucket::ShortHaul => "Short-Haul",
            DurationBucket::MediumHaul => "Medium-Haul",
            DurationBucket::LongHaul => "Long-Haul",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Amenity::WiFi => "WiFi",
            Amenity::Entertainment => "Entertainment",
            Amenity::ExtraLegroom => "Extra Legroom",
            Amenity::LoungeAccess => "Lounge Access",
        };
        write!(f, "{s}")
    }
}

/// Lowercase and strip everything but ASCII alphanumerics, so that
/// "Star Alliance", "star-alliance" and "StarAlliance" all parse alike.
fn parse_key(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

impl FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_key(s).as_str() {
            "cheap" => Ok(BudgetTier::Cheap),
            "mid" => Ok(BudgetTier::Mid),
            "luxury" => Ok(BudgetTier::Luxury),
            other => Err(format!("unknown budget tier: '{other}'")),
        }
    }
}

impl FromStr for Alliance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_key(s).as_str() {
            "staralliance" => Ok(Alliance::StarAlliance),
            "oneworld" => Ok(Alliance::Oneworld),
            "skyteam" => Ok(Alliance::SkyTeam),
            "none" => Ok(Alliance::None),
            other => Err(format!("unknown alliance: '{other}'")),
        }
    }
}

impl FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_key(s).as_str() {
            "shorthaul" | "short" => Ok(DurationBucket::ShortHaul),
            "mediumhaul" | "medium" => Ok(DurationBucket::MediumHaul),
            "longhaul" | "long" => Ok(DurationBucket::LongHaul),
            other => Err(format!("unknown duration bucket: '{other}'")),
        }
    }
}

impl FromStr for Amenity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_key(s).as_str() {
            "wifi" => Ok(Amenity::WiFi),
            "entertainment" => Ok(Amenity::Entertainment),
            "extralegroom" | "legroom" => Ok(Amenity::ExtraLegroom),
            "loungeaccess" | "lounge" => Ok(Amenity::LoungeAccess),
            other => Err(format!("unknown amenity: '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// ReviewRecord – one raw input row
// ---------------------------------------------------------------------------

/// A single airline review as loaded from the dataset, before enrichment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewRecord {
    pub airline: String,
    /// Raw route text, e.g. "London to Paris via Amsterdam".
    pub route_raw: String,
    pub class: String,
    pub traveller_type: String,
    pub review_text: String,
    /// Overall rating; `None` when the cell was empty or not a finite number.
    pub overall_rating: Option<f64>,
}

// ---------------------------------------------------------------------------
// EnrichedRecord – review plus derived attributes
// ---------------------------------------------------------------------------

/// A review record with normalized route and synthetic attributes attached.
///
/// Derivation is pure: enriching the same [`ReviewRecord`] twice always
/// yields an identical `EnrichedRecord`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: ReviewRecord,
    /// `"Unknown"` when the route could not be parsed.
    pub departure: String,
    /// `"Unknown"` when the route had no recognizable separator.
    pub destination: String,
    /// Cabin class after trimming, title-casing and typo correction.
    pub class: String,
    pub budget_tier: BudgetTier,
    pub alliance: Alliance,
    pub duration_bucket: DurationBucket,
    pub amenities: BTreeSet<Amenity>,
}

// ---------------------------------------------------------------------------
// ReviewDataset – the complete enriched dataset
// ---------------------------------------------------------------------------

/// Filterable text fields exposed through [`ReviewDataset::unique_values`].
pub const TEXT_FIELDS: [&str; 5] = [
    "airline",
    "departure",
    "destination",
    "class",
    "traveller_type",
];

/// The full enriched dataset with pre-computed unique-value indices.
///
/// Logically immutable after construction: requests borrow it read-only and
/// the engine never mutates it between requests.
#[derive(Debug, Clone)]
pub struct ReviewDataset {
    /// All enriched reviews, in input order.
    records: Vec<EnrichedRecord>,
    /// Sorted unique values per filterable text field, for the presentation
    /// collaborator's select boxes.
    unique_values: BTreeMap<&'static str, BTreeSet<String>>,
}

impl ReviewDataset {
    /// Build the unique-value indices from enriched records.
    pub fn from_records(records: Vec<EnrichedRecord>) -> Self {
        let mut unique_values: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
        for rec in &records {
            for (field, value) in [
                ("airline", &rec.record.airline),
                ("departure", &rec.departure),
                ("destination", &rec.destination),
                ("class", &rec.class),
                ("traveller_type", &rec.record.traveller_type),
            ] {
                if !value.is_empty() {
                    unique_values
                        .entry(field)
                        .or_default()
                        .insert(value.clone());
                }
            }
        }
        ReviewDataset {
            records,
            unique_values,
        }
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    /// Sorted unique values observed for one of [`TEXT_FIELDS`].
    pub fn unique_values(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.unique_values.get(field)
    }

    /// Number of reviews.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched(airline: &str, departure: &str, class: &str) -> EnrichedRecord {
        EnrichedRecord {
            record: ReviewRecord {
                airline: airline.to_string(),
                class: class.to_string(),
                traveller_type: "Solo Leisure".to_string(),
                ..ReviewRecord::default()
            },
            departure: departure.to_string(),
            destination: "Unknown".to_string(),
            class: class.to_string(),
            budget_tier: BudgetTier::Cheap,
            alliance: Alliance::None,
            duration_bucket: DurationBucket::MediumHaul,
            amenities: BTreeSet::new(),
        }
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let ds = ReviewDataset::from_records(vec![
            enriched("Qantas", "Sydney", "Economy"),
            enriched("Emirates", "Dubai", "Economy"),
            enriched("Qantas", "Sydney", "Business"),
        ]);
        let airlines: Vec<_> = ds.unique_values("airline").unwrap().iter().collect();
        assert_eq!(airlines, ["Emirates", "Qantas"]);
        let classes: Vec<_> = ds.unique_values("class").unwrap().iter().collect();
        assert_eq!(classes, ["Business", "Economy"]);
    }

    #[test]
    fn enum_parsing_accepts_loose_spellings() {
        assert_eq!("luxury".parse::<BudgetTier>().unwrap(), BudgetTier::Luxury);
        assert_eq!(
            "Star Alliance".parse::<Alliance>().unwrap(),
            Alliance::StarAlliance
        );
        assert_eq!(
            "short-haul".parse::<DurationBucket>().unwrap(),
            DurationBucket::ShortHaul
        );
        assert_eq!("lounge".parse::<Amenity>().unwrap(), Amenity::LoungeAccess);
        assert!("first-class".parse::<BudgetTier>().is_err());
    }
}
