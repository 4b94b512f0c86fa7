//! # Workload Estimator
//!
//! Derives query and alert volumes from rule count and data volume.
//!
//! ## Growth Models
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  detection queries/day = rules × queries_per_rule_per_day (schedule)    │
//! │                                                                         │
//! │  dashboard queries/day                                                  │
//! │     ▲                                     ___-------  log regime        │
//! │     │                          ____----‾‾‾                              │
//! │     │                 ___---‾‾‾                                         │
//! │     │          __--‾‾  sqrt regime                                      │
//! │     │    __--‾‾                                                         │
//! │     └────────────────────────┬─────────────────────────► vol            │
//! │                          breakpoint (1,000 GB, ≈2,674 queries/day)      │
//! │                                                                         │
//! │  alerts/day = detection queries × trigger rate                          │
//! │  consolidation runs/day = ceil(alerts / avg alerts per run), ≥ 1        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::config::{DashboardModel, WorkloadConfig};
use crate::error::PricingResult;
use crate::money::Dollars;
use crate::validation::validate_volume;
use crate::DAYS_PER_YEAR;

/// Derived query and alert volumes for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WorkloadEstimate {
    pub detection_queries_per_day: u64,
    pub dashboard_queries_per_day: u64,
    pub queries_per_day: u64,
    pub annual_queries: u64,
    pub alerts_per_day: u64,
    pub consolidation_runs_per_day: u64,
    pub annual_consolidation_cost: Dollars,
}

/// Dashboard queries/day at `vol`, rounded.
///
/// Continuous at the breakpoint to within ±1 query: the config validator
/// refuses a [`DashboardModel`] whose stored `log_base` drifts from the
/// square-root branch.
pub fn dashboard_queries_per_day(model: &DashboardModel, vol: f64) -> u64 {
    let raw = if vol <= model.breakpoint_gb {
        model.sqrt_regime(vol)
    } else {
        model.log_regime(vol)
    };
    raw.round().max(0.0) as u64
}

/// Estimates workload for `vol` GB/day running `rules` detection rules.
pub fn estimate_workload(
    config: &WorkloadConfig,
    vol: f64,
    rules: u32,
) -> PricingResult<WorkloadEstimate> {
    let vol = validate_volume(vol)?;

    let detection_queries_per_day =
        (f64::from(rules) * config.queries_per_rule_per_day).round() as u64;
    let dashboard_queries_per_day = dashboard_queries_per_day(&config.dashboard, vol);

    let queries_per_day = detection_queries_per_day + dashboard_queries_per_day;
    let annual_queries = queries_per_day * DAYS_PER_YEAR as u64;

    let c = &config.consolidation;
    let alerts_per_day = (detection_queries_per_day as f64 * c.trigger_rate).round() as u64;
    let consolidation_runs_per_day =
        ((alerts_per_day as f64 / c.avg_alerts_per_run).ceil() as u64).max(1);
    let alerts_per_run = (alerts_per_day as f64).min(c.avg_alerts_per_run);
    let annual_consolidation_cost = Dollars::from_f64_rounded(
        consolidation_runs_per_day as f64
            * DAYS_PER_YEAR
            * (c.base_cost_per_run + alerts_per_run * c.cost_per_alert),
    );

    debug!(
        vol,
        rules,
        queries_per_day,
        alerts_per_day,
        consolidation_runs_per_day,
        "Workload estimated"
    );

    Ok(WorkloadEstimate {
        detection_queries_per_day,
        dashboard_queries_per_day,
        queries_per_day,
        annual_queries,
        alerts_per_day,
        consolidation_runs_per_day,
        annual_consolidation_cost,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
