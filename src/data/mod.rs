/// Data layer: the log table pipeline.
///
/// Architecture:
/// ```text
///   Haraz_5_clustered_with_Vshale_Porosity.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate schema → LogTable (cached per path)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  depth interval AND cluster set → new LogTable
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌──────────┐       ┌──────────┐
///   │  stats    │       │ classify  │  Porosity / Vshale threshold → HcZone
///   └──────────┘       └──────────┘
///   per-cluster describe()
/// ```

pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
