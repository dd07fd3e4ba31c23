/// Data layer: artifact types, loading, and feature encoding.
///
/// Architecture:
/// ```text
///  model.json   columns.(json|csv|parquet)   addresses.(json|csv|parquet)
///        │                 │                          │
///        └─────────────────┼──────────────────────────┘
///                          ▼
///                   ┌──────────┐
///                   │  loader   │  read + validate → Artifacts
///                   └──────────┘
///                          │
///                          ▼
///                   ┌──────────┐
///                   │ encoder   │  HouseInputs → FeatureVector (schema order)
///                   └──────────┘
/// ```

pub mod encoder;
pub mod loader;
pub mod model;
