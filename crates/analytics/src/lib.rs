//! `salesgrid-analytics`: sales aggregation engine.
//!
//! Pure engine crate: receives validated transactions, returns grouped,
//! ranked and rounded summaries. No CLI, network or filesystem dependencies.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod model;
pub mod money;
pub mod rank;
pub mod summary;

pub use config::AnalyticsConfig;
pub use engine::analyze;
pub use error::AnalyticsError;
pub use model::{
    AnalyticsReport, CustomerStat, DayStat, LineItem, PeakDay, ProductStat, RegionKey, RegionStat,
    Transaction,
};
