/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  AirQualityUCI.csv  (Date;Time;CO(GT);...;AH)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean (-200 → missing) → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, year index, immutable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rows of one year → Subset
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
