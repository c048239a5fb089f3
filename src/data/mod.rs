//! Data layer: core types, parsing, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  cronoprogramma.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read file (or fallback) → parser → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Record>, first-seen years / categories
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  selected years ∩ selected categories → Vec<Record>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate │  category counts, year × category matrix
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
