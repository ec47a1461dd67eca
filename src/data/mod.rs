/// Data layer: core types, loading, region grouping and statistics.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table (schema fixed by first data row)
///   └──────────┘
///          │
///          ▼
///   ┌──────────┐
///   │  filter  │  region column → RegionRegistry, rows per region
///   └──────────┘
///          │
///          ▼
///   ┌──────────┐
///   │ metrics  │  sorted column values → Metrics
///   └──────────┘
/// ```
///
/// [`engine::Engine`] ties the three together and owns the loaded dataset.

pub mod engine;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
