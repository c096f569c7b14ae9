/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  embedded CSV / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse text → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  Vec<Row>, source order
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter  │ → Table  │ aggregate │ → distribution, statistics
///   └──────────┘          └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
