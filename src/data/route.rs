use std::sync::LazyLock;

use regex::Regex;

/// Sentinel used when a route (or one of its endpoints) cannot be parsed.
pub const UNKNOWN: &str = "Unknown";

// "London TO Paris", "London nto Paris" → "London to Paris".
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+n?to\s+").expect("separator regex"));

// First "via <stop>" clause and everything after it.
static VIA_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\bvia\b.*$").expect("via regex"));

// Glued separator before an uppercase airport token: "toCPT" → "to CPT".
static GLUED_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bto([A-Z])").expect("glued-to regex"));

/// Normalize a noisy route string into a `(departure, destination)` pair.
///
/// Known limitations, kept deliberately: only the *first* "via" clause is
/// stripped, and the split uses the *first* " to " occurrence, so place
/// names containing " to " confuse the destination. Callers treat a
/// [`UNKNOWN`] destination as a data-quality warning, not a failure.
pub fn normalize(route_raw: &str) -> (String, String) {
    let trimmed = route_raw.trim();
    if trimmed.is_empty() {
        return (UNKNOWN.to_string(), UNKNOWN.to_string());
    }

    let canonical = SEPARATOR.replace_all(trimmed, " to ");
    let without_via = VIA_CLAUSE.replace(&canonical, "");
    let spaced = GLUED_TO.replace_all(&without_via, "to $1");

    match spaced.split_once(" to ") {
        Some((dep, dest)) => {
            let dep = title_case(dep);
            let dest = title_case(dest);
            let dep = if dep.is_empty() { UNKNOWN.to_string() } else { dep };
            let dest = if dest.is_empty() { UNKNOWN.to_string() } else { dest };
            (dep, dest)
        }
        None => (title_case(&spaced), UNKNOWN.to_string()),
    }
}

/// Whether the normalized pair still carries an unparseable endpoint.
pub fn is_unparsed(departure: &str, destination: &str) -> bool {
    departure == UNKNOWN || destination == UNKNOWN
}

/// Title-case each whitespace-separated word: "new YORK" → "New York".
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_route_splits_on_to() {
        assert_eq!(
            normalize("London to Paris"),
            ("London".to_string(), "Paris".to_string())
        );
    }

    #[test]
    fn separator_case_and_typo_variants_collapse() {
        assert_eq!(
            normalize("London TO Paris"),
            ("London".to_string(), "Paris".to_string())
        );
        assert_eq!(
            normalize("london nto paris"),
            ("London".to_string(), "Paris".to_string())
        );
        assert_eq!(
            normalize("  London   to   Paris  "),
            ("London".to_string(), "Paris".to_string())
        );
    }

    #[test]
    fn via_clause_is_stripped() {
        assert_eq!(
            normalize("London to Paris via Amsterdam"),
            ("London".to_string(), "Paris".to_string())
        );
        assert_eq!(
            normalize("London to Paris VIA Amsterdam via Brussels"),
            ("London".to_string(), "Paris".to_string())
        );
    }

    #[test]
    fn glued_uppercase_code_gets_a_space() {
        assert_eq!(
            normalize("Johannesburg toCPT"),
            ("Johannesburg".to_string(), "Cpt".to_string())
        );
    }

    #[test]
    fn fully_glued_route_falls_back_to_unknown_destination() {
        // "LondontoParis" has no word boundary before "to", so the spacing
        // fix cannot recover a separator.
        let (_, dest) = normalize("LondontoParis");
        assert_eq!(dest, UNKNOWN);
    }

    #[test]
    fn empty_and_separatorless_routes_are_unknown() {
        assert_eq!(normalize(""), (UNKNOWN.to_string(), UNKNOWN.to_string()));
        assert_eq!(normalize("   "), (UNKNOWN.to_string(), UNKNOWN.to_string()));
        assert_eq!(
            normalize("Tokyo"),
            ("Tokyo".to_string(), UNKNOWN.to_string())
        );
    }

    #[test]
    fn first_to_occurrence_wins() {
        // Documented limitation: a destination containing " to " is cut at
        // the first separator.
        assert_eq!(
            normalize("Rome to Path to Somewhere"),
            ("Rome".to_string(), "Path To Somewhere".to_string())
        );
    }

    #[test]
    fn round_trip_modulo_casing() {
        let (dep, dest) = normalize("new york to dubai");
        assert_eq!(dep, "New York");
        assert_eq!(dest, "Dubai");
    }
}
