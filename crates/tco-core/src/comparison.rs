//! # TCO Comparison
//!
//! Side-by-side rows pairing legacy cost buckets with their usage-based
//! counterparts.
//!
//! ```text
//! ┌──────────────────────────────────────────┬──────────────────┬──────────────────────┐
//! │ label                                    │ legacy           │ candidate            │
//! ├──────────────────────────────────────────┼──────────────────┼──────────────────────┤
//! │ Data Infrastructure                      │ infra            │ BYODB cost           │
//! │ Operations & Maintenance                 │ admin + trainPS  │ governance           │
//! │ Software License vs. Detection Platform  │ license + detect │ platform + support   │
//! └──────────────────────────────────────────┴──────────────────┴──────────────────────┘
//! ```
//!
//! The row set is fixed. Both sides are priced at the same `(vol, rules)`.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::config::PricingConfig;
use crate::error::PricingResult;
use crate::legacy::legacy_scenario;
use crate::money::Dollars;
use crate::platform::platform_cost;
use crate::provider::Provider;
use crate::validation::validate_volume;

pub const INFRASTRUCTURE_LABEL: &str = "Data Infrastructure";
pub const OPERATIONS_LABEL: &str = "Operations & Maintenance";
pub const LICENSING_LABEL: &str = "Software License vs. Detection Platform";

/// One cost bucket of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComparisonRow {
    pub label: String,
    pub legacy_cost: Dollars,
    pub candidate_cost: Dollars,
    pub explanation: String,
}

/// Rule count assumed when the caller does not give one: one rule per 10 GB/day.
pub fn default_rule_count(vol: f64) -> u32 {
    (vol / 10.0).round().clamp(0.0, u32::MAX as f64) as u32
}

/// Builds the three comparison rows at `vol` GB/day.
///
/// `rules` defaults to [`default_rule_count`]; `provider` to the configured
/// default provider.
pub fn compare_scenarios(
    config: &PricingConfig,
    vol: f64,
    rules: Option<u32>,
    provider: Option<Provider>,
) -> PricingResult<Vec<ComparisonRow>> {
    let vol = validate_volume(vol)?;
    let rules = rules.unwrap_or_else(|| default_rule_count(vol));

    let legacy = legacy_scenario(config, vol, None, Some(rules))?;
    let platform = platform_cost(config, vol, rules, provider)?;

    let rows = vec![
        ComparisonRow {
            label: INFRASTRUCTURE_LABEL.to_string(),
            legacy_cost: legacy.infra,
            candidate_cost: platform.byodb_cost,
            explanation: format!(
                "Legacy: provisioned indexers, forwarders, storage. \
                 Platform: {} storage + ingestion pipeline (pass-through).",
                platform.provider_label
            ),
        },
        ComparisonRow {
            label: OPERATIONS_LABEL.to_string(),
            legacy_cost: legacy.admin_cost + legacy.training_ps,
            candidate_cost: platform.admin_cost,
            explanation: format!(
                "Legacy: {} admin FTEs (${}K) + training/PS (${}K). Platform: {} FTE ({}).",
                legacy.admins,
                legacy.admin_cost.thousands(),
                legacy.training_ps.thousands(),
                platform.governance_fte,
                platform.governance_desc
            ),
        },
        ComparisonRow {
            label: LICENSING_LABEL.to_string(),
            legacy_cost: legacy.license + legacy.det_compute,
            candidate_cost: platform.platform_cost,
            explanation: "Legacy: per-GB ingestion license + detection compute. \
                          Platform: usage-based platform fee + support. \
                          Add AI SOC Analyst for investigation & response."
                .to_string(),
        },
    ];

    debug!(
        vol,
        rules,
        legacy_total = %legacy.total,
        platform_total = %platform.total,
        "Comparison built"
    );

    Ok(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================
