/// Data layer: core types, LAS parsing, loading, filtering and export.
///
/// Architecture:
/// ```text
///        .las
///          │
///          ▼
///   ┌────────────┐
///   │    las     │  parse sections → LasFile (raw columns)
///   └────────────┘
///          │
///          ▼
///   ┌────────────┐
///   │   loader   │  pick depth + tracks, mask nulls → LogDataset
///   └────────────┘
///          │
///          ▼
///   ┌────────────┐
///   │   filter   │  depth range + validity mask → IntervalSummary
///   └────────────┘
///          │
///          ▼
///   ┌────────────┐
///   │   export   │  IntervalSummary → CSV
///   └────────────┘
/// ```

pub mod export;
pub mod filter;
pub mod las;
pub mod loader;
pub mod model;
