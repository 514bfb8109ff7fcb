use std::collections::BTreeSet;

use super::model::{Alliance, Amenity, BudgetTier, DurationBucket, EnrichedRecord, ReviewDataset};

// ---------------------------------------------------------------------------
// FilterSelection – the user's chosen predicate values
// ---------------------------------------------------------------------------

/// One recommendation request's constraints.
///
/// `None` means "Any" (no constraint on that field). A plain value object:
/// built once per request, never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub departure: Option<String>,
    pub destination: Option<String>,
    pub class: Option<String>,
    pub traveller_type: Option<String>,
    pub budget_tier: Option<BudgetTier>,
    pub alliance: Option<Alliance>,
    pub duration_bucket: Option<DurationBucket>,
    /// Record must offer *all* requested amenities (superset match).
    /// Empty set means no amenity constraint.
    pub amenities: BTreeSet<Amenity>,
}

impl FilterSelection {
    /// Whether a record satisfies every non-wildcard predicate.
    ///
    /// Predicates are commutative; evaluation order never changes the
    /// outcome and the whole check is side-effect-free.
    pub fn matches(&self, rec: &EnrichedRecord) -> bool {
        let text_match = |want: &Option<String>, have: &str| match want {
            Some(v) => v == have,
            None => true,
        };

        text_match(&self.departure, &rec.departure)
            && text_match(&self.destination, &rec.destination)
            && text_match(&self.class, &rec.class)
            && text_match(&self.traveller_type, &rec.record.traveller_type)
            && self.budget_tier.map_or(true, |b| b == rec.budget_tier)
            && self.alliance.map_or(true, |a| a == rec.alliance)
            && self
                .duration_bucket
                .map_or(true, |d| d == rec.duration_bucket)
            && self.amenities.is_subset(&rec.amenities)
    }
}

/// Return indices of records that pass all active predicates, in input order.
///
/// An empty result is a normal outcome ("no matches"), never an error.
pub fn filtered_indices(dataset: &ReviewDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
