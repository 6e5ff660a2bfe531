//! databarn runner — aggregation, report assembly, dashboard configuration.
//!
//! This crate builds on `databarn-core` to provide:
//! - Aggregator: fact validation, descending sort, per-slice ranking
//! - Per-party reports covering every catalog slice
//! - Dashboards across party types, with races indexed
//! - TOML dashboard configuration

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod report;

pub use aggregator::{aggregate, aggregate_all, validate_rows, AggregateError, AggregateOptions};
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{compute_dashboard, compute_report, Dashboard, DashboardError};
pub use report::{Report, SliceRanking};
