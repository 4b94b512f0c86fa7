//! # Usage-Based Platform Model
//!
//! Cost-plus pricing of the usage-based detection platform, plus the
//! customer's bring-your-own-database (BYODB) pass-through and governance
//! overhead.
//!
//! ## Cost Stack
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   platform_cost(vol, rules, provider?)                  │
//! │                                                                         │
//! │  COST OF SERVICE                                                        │
//! │  ├── base COGS            (platform tier lookup on vol)                 │
//! │  ├── query COGS           (queries beyond tier allowance × unit cost    │
//! │  │                          × volume multiplier)                        │
//! │  └── consolidation COGS   (workload estimator)                          │
//! │                 │                                                       │
//! │                 ▼ × (1 + tier margin)                                   │
//! │  platform price ──────────────┐                                         │
//! │  support (tier lookup) ───────┴──► platform cost                        │
//! │                                                                         │
//! │  PASS-THROUGH (zero margin)                                             │
//! │  ├── storage    (provider's cumulative tiers × 365)                     │
//! │  └── ingestion  (cumulative tiers × 365)            ──► BYODB cost      │
//! │                                                                         │
//! │  GOVERNANCE (customer admin overhead, tier lookup)                      │
//! │                                                                         │
//! │  total = platform cost + BYODB cost + governance                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::config::{PricingConfig, VolumeMultiplier};
use crate::error::PricingResult;
use crate::money::Dollars;
use crate::provider::Provider;
use crate::validation::validate_volume;
use crate::workload::{estimate_workload, WorkloadEstimate};
use crate::DAYS_PER_YEAR;

// =============================================================================
// Platform Scenario
// =============================================================================

/// Itemized annual cost of the usage-based platform at one volume.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlatformScenario {
    pub platform_tier: String,
    pub max_queries_per_hour: u64,

    // --- cost of service ---
    #[serde(rename = "baseCOGS")]
    pub base_cogs: Dollars,
    pub base_queries: u64,
    pub marginal_queries: u64,
    #[serde(rename = "queryCOGS")]
    pub query_cogs: Dollars,
    #[serde(rename = "consolidationCOGS")]
    pub consolidation_cogs: Dollars,
    #[serde(rename = "totalCOGS")]
    pub total_cogs: Dollars,
    pub margin: f64,

    // --- platform-facing ---
    pub platform_price: Dollars,
    pub support_cost: Dollars,
    /// Price plus support.
    pub platform_cost: Dollars,

    // --- pass-through ---
    pub provider_label: String,
    pub byodb_storage: Dollars,
    pub data_ingestion: Dollars,
    pub byodb_cost: Dollars,
    /// Pass-through $/GB/day, to three decimals. 0 at zero volume.
    pub byodb_effective_per_gb_day: f64,

    // --- governance ---
    pub admin_cost: Dollars,
    pub governance_fte: f64,
    pub governance_desc: String,

    pub total: Dollars,
    pub workload: WorkloadEstimate,
}

// =============================================================================
// Stand-alone Cost Functions
// =============================================================================

fn resolve(config: &PricingConfig, provider: Option<Provider>) -> Provider {
    provider.unwrap_or(config.default_provider)
}

/// Annual storage pass-through for `provider` (configured default if `None`).
pub fn byodb_storage_cost(
    config: &PricingConfig,
    vol: f64,
    provider: Option<Provider>,
) -> PricingResult<Dollars> {
    let vol = validate_volume(vol)?;
    let rates = config.provider_rates(resolve(config, provider))?;
    Ok(Dollars::from_f64_rounded(
        rates.tiers.tiered_cost(vol, |t| t.rate, DAYS_PER_YEAR),
    ))
}

/// Annual ingestion pipeline pass-through.
pub fn data_ingestion_cost(config: &PricingConfig, vol: f64) -> PricingResult<Dollars> {
    let vol = validate_volume(vol)?;
    Ok(Dollars::from_f64_rounded(
        config.data_ingestion.tiered_cost(vol, |t| t.rate, DAYS_PER_YEAR),
    ))
}

/// Storage plus ingestion.
pub fn byodb_cost(
    config: &PricingConfig,
    vol: f64,
    provider: Option<Provider>,
) -> PricingResult<Dollars> {
    Ok(byodb_storage_cost(config, vol, provider)? + data_ingestion_cost(config, vol)?)
}

/// Annual support fee at `vol`.
pub fn support_cost(config: &PricingConfig, vol: f64) -> PricingResult<Dollars> {
    let vol = validate_volume(vol)?;
    Ok(config.support.lookup(vol, "support")?.value)
}

/// Display label of `provider` (configured default if `None`).
pub fn provider_label(config: &PricingConfig, provider: Option<Provider>) -> PricingResult<&str> {
    Ok(config.provider_rates(resolve(config, provider))?.label.as_str())
}

/// Multiplier applied to marginal query cost.
///
/// `1.0` up to the breakpoint, `1 + log10(vol / breakpoint) × log_coefficient`
/// above it.
pub fn volume_multiplier(model: &VolumeMultiplier, vol: f64) -> f64 {
    if vol <= model.breakpoint_gb {
        1.0
    } else {
        1.0 + (vol / model.breakpoint_gb).log10() * model.log_coefficient
    }
}

// =============================================================================
// Scenario
// =============================================================================

/// Prices the platform at `vol` GB/day running `rules` detection rules.
///
/// ## Errors
/// - `InvalidInput` for a negative or non-finite volume
/// - `ProviderNotConfigured` when the provider has no rate table
pub fn platform_cost(
    config: &PricingConfig,
    vol: f64,
    rules: u32,
    provider: Option<Provider>,
) -> PricingResult<PlatformScenario> {
    let vol = validate_volume(vol)?;
    let provider = resolve(config, provider);
    let platform = &config.platform;

    let workload = estimate_workload(&config.workload, vol, rules)?;

    // --- Cost of service -----------------------------------------------------
    let tier = &platform.tiers.lookup(vol, "platform.tiers")?.value;

    let multiplier = volume_multiplier(&platform.volume_multiplier, vol);
    let marginal_queries = workload.annual_queries.saturating_sub(tier.base_queries);
    let query_cogs = Dollars::from_f64_rounded(
        marginal_queries as f64 * platform.query_unit_cost * multiplier,
    );
    let consolidation_cogs = workload.annual_consolidation_cost;
    let total_cogs = tier.base_cogs + query_cogs + consolidation_cogs;

    let platform_price = Dollars::from_f64_rounded(total_cogs.as_f64() * (1.0 + tier.margin));

    // --- Platform-facing total -----------------------------------------------
    let support_cost = support_cost(config, vol)?;
    let platform_cost = platform_price + support_cost;

    // --- Pass-through --------------------------------------------------------
    let byodb_storage = byodb_storage_cost(config, vol, Some(provider))?;
    let data_ingestion = data_ingestion_cost(config, vol)?;
    let byodb_cost = byodb_storage + data_ingestion;
    let byodb_effective_per_gb_day = if vol > 0.0 {
        (byodb_cost.as_f64() / vol / DAYS_PER_YEAR * 1000.0).round() / 1000.0
    } else {
        0.0
    };

    // --- Governance ----------------------------------------------------------
    let governance = &config.governance.lookup(vol, "governance")?.value;

    let total = platform_cost + byodb_cost + governance.annual;

    debug!(
        vol,
        rules,
        provider = %provider,
        tier = %tier.name,
        total_cogs = %total_cogs,
        platform_price = %platform_price,
        total = %total,
        "Platform scenario computed"
    );

    Ok(PlatformScenario {
        platform_tier: tier.name.clone(),
        max_queries_per_hour: tier.max_queries_per_hour,
        base_cogs: tier.base_cogs,
        base_queries: tier.base_queries,
        marginal_queries,
        query_cogs,
        consolidation_cogs,
        total_cogs,
        margin: tier.margin,
        platform_price,
        support_cost,
        platform_cost,
        provider_label: provider_label(config, Some(provider))?.to_string(),
        byodb_storage,
        data_ingestion,
        byodb_cost,
        byodb_effective_per_gb_day,
        admin_cost: governance.annual,
        governance_fte: governance.fte,
        governance_desc: governance.desc.clone(),
        total,
        workload,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PricingError, ValidationError};
    use crate::validation::MAX_DAILY_VOLUME_GB;
    use proptest::prelude::*;

    #[test]
    fn test_platform_at_500_gb() {
        let config = PricingConfig::default();
        let s = platform_cost(&config, 500.0, 45, None).unwrap();

        assert_eq!(s.platform_tier, "Business+");
        assert_eq!(s.max_queries_per_hour, 60_000);
        assert_eq!(s.base_cogs, Dollars::new(28_000));
        // 2,615 queries/day × 365 is well inside the 3.5M allowance
        assert_eq!(s.workload.annual_queries, 954_475);
        assert_eq!(s.marginal_queries, 0);
        assert_eq!(s.query_cogs, Dollars::zero());
        // 22 alerts/day: 365 × (1.50 + 22 × 0.05)
        assert_eq!(s.consolidation_cogs, Dollars::new(949));
        assert_eq!(s.total_cogs, Dollars::new(28_949));
        assert_eq!(s.platform_price, Dollars::new(62_240));
        assert_eq!(s.support_cost, Dollars::new(12_000));
        assert_eq!(s.platform_cost, Dollars::new(74_240));

        assert_eq!(s.provider_label, "Amazon Security Lake (S3 + Athena)");
        assert_eq!(s.byodb_storage, Dollars::new(16_425));
        assert_eq!(s.data_ingestion, Dollars::new(3_285));
        assert_eq!(s.byodb_cost, Dollars::new(19_710));
        assert_eq!(s.byodb_effective_per_gb_day, 0.108);

        assert_eq!(s.admin_cost, Dollars::new(18_000));
        assert_eq!(s.governance_fte, 0.12);
        assert_eq!(s.governance_desc, "~5 hrs/wk");

        assert_eq!(s.total, Dollars::new(111_950));
    }

    #[test]
    fn test_queries_beyond_allowance_are_billed() {
        let config = PricingConfig::default();
        let s = platform_cost(&config, 10.0, 1_000, None).unwrap();

        assert_eq!(s.platform_tier, "Lite+");
        assert_eq!(
            s.marginal_queries,
            s.workload.annual_queries - s.base_queries
        );
        assert!(s.marginal_queries > 0);
        assert_eq!(
            s.query_cogs,
            Dollars::from_f64_rounded(s.marginal_queries as f64 * 0.012)
        );
    }

    #[test]
    fn test_volume_multiplier() {
        let model = VolumeMultiplier::default();
        assert_eq!(volume_multiplier(&model, 0.0), 1.0);
        assert_eq!(volume_multiplier(&model, 1000.0), 1.0);
        assert!((volume_multiplier(&model, 10_000.0) - 1.1).abs() < 1e-12);
        assert!((volume_multiplier(&model, 100_000.0) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_provider_changes_storage_only() {
        let config = PricingConfig::default();
        let lake = platform_cost(&config, 2_000.0, 200, None).unwrap();
        let elastic = platform_cost(&config, 2_000.0, 200, Some(Provider::Elasticsearch)).unwrap();

        assert!(elastic.byodb_storage > lake.byodb_storage);
        assert_eq!(elastic.data_ingestion, lake.data_ingestion);
        assert_eq!(elastic.platform_cost, lake.platform_cost);
        assert_eq!(elastic.provider_label, "Elastic Cloud (Elasticsearch)");
    }

    #[test]
    fn test_standalone_costs() {
        let config = PricingConfig::default();
        // 500 × 0.09 + 1500 × 0.06 + 500 × 0.04 = 155 per day
        assert_eq!(
            byodb_storage_cost(&config, 2_500.0, None).unwrap(),
            Dollars::new(56_575)
        );
        // 500 × 0.018 = 9 per day
        assert_eq!(data_ingestion_cost(&config, 500.0).unwrap(), Dollars::new(3_285));
        assert_eq!(
            byodb_cost(&config, 500.0, Some(Provider::SecurityLake)).unwrap(),
            Dollars::new(19_710)
        );
        assert_eq!(support_cost(&config, 10.0).unwrap(), Dollars::new(2_400));
        assert_eq!(support_cost(&config, 1e6).unwrap(), Dollars::new(360_000));
        assert_eq!(
            provider_label(&config, Some(Provider::BigQuery)).unwrap(),
            "Google BigQuery"
        );
    }

    #[test]
    fn test_zero_volume() {
        let config = PricingConfig::default();
        let s = platform_cost(&config, 0.0, 0, None).unwrap();

        assert_eq!(s.platform_tier, "Lite");
        assert_eq!(s.byodb_cost, Dollars::zero());
        assert_eq!(s.byodb_effective_per_gb_day, 0.0);
        assert!(s.total > Dollars::zero());
    }

    #[test]
    fn test_unconfigured_provider_is_an_error() {
        let mut config = PricingConfig::default();
        config
            .providers
            .retain(|p| p.provider == Provider::SecurityLake);

        let err = platform_cost(&config, 100.0, 10, Some(Provider::BigQuery)).unwrap_err();
        assert!(matches!(
            err,
            PricingError::ProviderNotConfigured(Provider::BigQuery)
        ));
    }

    #[test]
    fn test_invalid_volume_rejected() {
        let config = PricingConfig::default();
        assert!(matches!(
            platform_cost(&config, f64::NAN, 10, None),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            platform_cost(&config, 1e18, 10, None),
            Err(PricingError::InvalidInput(ValidationError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_maximum_volume_stays_in_range() {
        let config = PricingConfig::default();
        for provider in Provider::ALL {
            let s = platform_cost(&config, MAX_DAILY_VOLUME_GB, u32::MAX, Some(provider)).unwrap();
            assert!(s.total > Dollars::zero());
            assert_eq!(s.byodb_cost, s.byodb_storage + s.data_ingestion);
        }
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_components(
            vol in 0.0f64..300_000.0,
            rules in 0u32..5_000,
            provider_index in 0usize..7,
        ) {
            let config = PricingConfig::default();
            let provider = Provider::ALL[provider_index];
            let s = platform_cost(&config, vol, rules, Some(provider)).unwrap();

            prop_assert_eq!(s.total_cogs, s.base_cogs + s.query_cogs + s.consolidation_cogs);
            prop_assert_eq!(s.platform_cost, s.platform_price + s.support_cost);
            prop_assert_eq!(s.byodb_cost, s.byodb_storage + s.data_ingestion);
            prop_assert_eq!(
                s.total,
                s.platform_price
                    + s.support_cost
                    + s.byodb_storage
                    + s.data_ingestion
                    + s.admin_cost
            );
        }

        #[test]
        fn prop_marginal_queries_never_exceed_annual(
            vol in 0.0f64..300_000.0,
            rules in 0u32..5_000,
        ) {
            let s = platform_cost(&PricingConfig::default(), vol, rules, None).unwrap();
            prop_assert!(s.marginal_queries <= s.workload.annual_queries);
            prop_assert!(s.query_cogs >= Dollars::zero());
        }
    }
}
