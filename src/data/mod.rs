//! Data layer: input records, loading, and summary statistics.
//!
//! Architecture:
//! ```text
//!  .csv / whitespace .txt
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → rows / typed records
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model    │  HeatSample, TrajectoryPoint, RootIteration, …
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  summary  │  mean / std / histogram / grouping
//!   └──────────┘
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod summary;

pub use error::DataError;
