/// Data layer: split types, file IO, distribution check and singleton filter.
///
/// Architecture:
/// ```text
///  .jsonl / .json / .parquet / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawSplit (grouped)
///   └──────────┘
///        │
///        ├──────────────► distribution   advisory label diagnostics
///        ▼
///   ┌──────────┐
///   │  filter   │  validate shape → flatten → drop singleton labels
///   └──────────┘
///        │
///        ▼
///   CleanedSplit ──► writer   .json / .jsonl / .parquet
/// ```

pub mod distribution;
pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
