/// Data layer: core types, loading, normalization, enrichment, filtering.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<ReviewRecord>
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ route + enrich     │  normalize routes, derive synthetic attributes
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ReviewDataset │  Vec<EnrichedRecord>, unique-value index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSelection predicates → matching indices
///   └──────────┘
/// ```

pub mod enrich;
pub mod filter;
pub mod loader;
pub mod model;
pub mod route;
