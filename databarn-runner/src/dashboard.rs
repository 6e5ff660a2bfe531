//! Dashboard assembly — one report per requested party type.
//!
//! Two entry points:
//! - `compute_report()`: every catalog slice for one party type
//! - `compute_dashboard()`: reports for each configured party type, plus the
//!   number of runnings indexed, queried from the source on demand
//!
//! Both are all-or-nothing: any slice failure means no report is returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use databarn_core::{FactSource, PartitionCatalog, PartyType, SourceError};

use crate::aggregator::{aggregate_all, AggregateError, AggregateOptions};
use crate::config::{ConfigError, DashboardConfig};
use crate::report::Report;

/// Errors from dashboard assembly.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("count runnings: {0}")]
    RunningCount(#[source] SourceError),
}

/// Reports for every requested party type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Total runnings in the source when the dashboard was computed.
    pub races_indexed: u64,
    pub reports: Vec<Report>,
}

impl Dashboard {
    pub fn report(&self, party: PartyType) -> Option<&Report> {
        self.reports.iter().find(|r| r.party() == party)
    }
}

/// Report for one party type. Depends only on the source's current contents.
pub fn compute_report<S>(
    source: &S,
    catalog: &PartitionCatalog,
    party: PartyType,
    opts: AggregateOptions,
) -> Result<Report, AggregateError>
where
    S: FactSource + ?Sized,
{
    let report = aggregate_all(source, catalog, party, opts)?;
    match report.fingerprint() {
        Ok(fingerprint) => info!(
            %party,
            source = source.name(),
            slices = report.len(),
            %fingerprint,
            "report computed"
        ),
        Err(e) => warn!(%party, error = %e, "report computed without fingerprint"),
    }
    Ok(report)
}

/// Reports for each party type in `config`, in config order.
pub fn compute_dashboard<S>(
    source: &S,
    catalog: &PartitionCatalog,
    config: &DashboardConfig,
) -> Result<Dashboard, DashboardError>
where
    S: FactSource + ?Sized,
{
    config.validate()?;
    let races_indexed = source
        .count_runnings()
        .map_err(DashboardError::RunningCount)?;

    let reports = config
        .parties
        .iter()
        .map(|&party| compute_report(source, catalog, party, config.aggregate_options()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dashboard {
        races_indexed,
        reports,
    })
}
