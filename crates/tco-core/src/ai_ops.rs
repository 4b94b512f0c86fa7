//! # AI Operations Costs
//!
//! Auxiliary cost functions for the AI SOC analyst add-on: platform fee by
//! alert load, per-investigation compute, staffing headcounts, the bundle
//! discount, and the dedicated-infrastructure add-on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  daily alerts ──► SOC platform tier (flat)                              │
//! │               ──► detection engineers / IR leads (flat)                 │
//! │  investigations/yr ──► compute (cumulative, $/investigation)            │
//! │  platform total + AI total ──► bundle price (discounted)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::config::AiOpsConfig;
use crate::error::PricingResult;
use crate::money::Dollars;
use crate::validation::validate_count;

/// AI SOC platform fee and the tier name it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AiSocPlatformCost {
    pub annual: Dollars,
    pub tier: String,
}

/// Platform fee for a SOC handling `daily_alerts` alerts per day.
pub fn ai_soc_platform_cost(
    config: &AiOpsConfig,
    daily_alerts: f64,
) -> PricingResult<AiSocPlatformCost> {
    let daily_alerts = validate_count("daily_alerts", daily_alerts)?;
    let tier = &config
        .soc_platform
        .lookup(daily_alerts, "ai_ops.soc_platform")?
        .value;

    Ok(AiSocPlatformCost {
        annual: tier.annual,
        tier: tier.tier.clone(),
    })
}

/// Annual compute for `investigations` AI investigations, billed cumulatively.
///
/// ## Example
/// ```rust
/// use tco_core::ai_ops::ai_compute_cost;
/// use tco_core::config::AiOpsConfig;
///
/// let config = AiOpsConfig::default();
/// // 250,000 × $2.00 + 50,000 × $1.40
/// assert_eq!(ai_compute_cost(&config, 300_000.0).unwrap().amount(), 570_000);
/// ```
pub fn ai_compute_cost(config: &AiOpsConfig, investigations: f64) -> PricingResult<Dollars> {
    let investigations = validate_count("investigations", investigations)?;
    Ok(Dollars::from_f64_rounded(
        config
            .investigation_tiers
            .tiered_cost(investigations, |t| t.rate, 1.0),
    ))
}

pub fn detection_engineer_count(config: &AiOpsConfig, daily_alerts: f64) -> PricingResult<u32> {
    let daily_alerts = validate_count("daily_alerts", daily_alerts)?;
    Ok(config
        .detection_engineers
        .lookup(daily_alerts, "ai_ops.detection_engineers")?
        .value)
}

pub fn ir_lead_count(config: &AiOpsConfig, daily_alerts: f64) -> PricingResult<u32> {
    let daily_alerts = validate_count("daily_alerts", daily_alerts)?;
    Ok(config.ir_leads.lookup(daily_alerts, "ai_ops.ir_leads")?.value)
}

/// Platform and AI SOC bought together, with the bundle discount applied.
///
/// Summed in f64 so caller-supplied totals never overflow.
pub fn bundle_price(config: &AiOpsConfig, platform_total: Dollars, ai_total: Dollars) -> Dollars {
    let combined = platform_total.as_f64() + ai_total.as_f64();
    Dollars::from_f64_rounded(combined * (1.0 - config.bundle_discount))
}

/// Dedicated alert-engine add-on for `workers` workers.
///
/// `None` when `platform_tier` is not eligible for the add-on.
pub fn dedicated_infra_cost(
    config: &AiOpsConfig,
    platform_tier: &str,
    workers: u32,
) -> Option<Dollars> {
    let infra = &config.dedicated_infra;
    if !infra.eligible_tiers.iter().any(|tier| tier == platform_tier) {
        debug!(platform_tier, "Tier not eligible for dedicated infrastructure");
        return None;
    }

    Some(infra.annual_base + Dollars::new(infra.per_worker.amount() * i64::from(workers)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soc_platform_tiers() {
        let config = AiOpsConfig::default();

        let small = ai_soc_platform_cost(&config, 800.0).unwrap();
        assert_eq!(small.annual, Dollars::new(60_000));
        assert_eq!(small.tier, "Starter");

        let edge = ai_soc_platform_cost(&config, 5_000.0).unwrap();
        assert_eq!(edge.tier, "Professional");

        let huge = ai_soc_platform_cost(&config, 1e7).unwrap();
        assert_eq!(huge.annual, Dollars::new(600_000));
        assert_eq!(huge.tier, "Scale");
    }

    #[test]
    fn test_ai_compute_cost() {
        let config = AiOpsConfig::default();
        assert_eq!(ai_compute_cost(&config, 0.0).unwrap(), Dollars::zero());
        assert_eq!(ai_compute_cost(&config, 100.0).unwrap(), Dollars::new(200));
        // 500,000 + 1,050,000 + 200,000
        assert_eq!(
            ai_compute_cost(&config, 1_200_000.0).unwrap(),
            Dollars::new(1_750_000)
        );
    }

    #[test]
    fn test_staffing_counts() {
        let config = AiOpsConfig::default();
        assert_eq!(detection_engineer_count(&config, 500.0).unwrap(), 1);
        assert_eq!(detection_engineer_count(&config, 20_000.0).unwrap(), 2);
        assert_eq!(detection_engineer_count(&config, 90_000.0).unwrap(), 3);

        assert_eq!(ir_lead_count(&config, 500.0).unwrap(), 0);
        assert_eq!(ir_lead_count(&config, 5_001.0).unwrap(), 1);
        assert_eq!(ir_lead_count(&config, 30_001.0).unwrap(), 2);
    }

    #[test]
    fn test_bundle_price_applies_discount() {
        let config = AiOpsConfig::default();
        let bundle = bundle_price(&config, Dollars::new(100_000), Dollars::new(60_000));
        assert_eq!(bundle, Dollars::new(136_000));

        let huge = bundle_price(&config, Dollars::new(i64::MAX), Dollars::new(i64::MAX));
        assert!(huge > Dollars::zero());
    }

    #[test]
    fn test_dedicated_infra_only_for_eligible_tiers() {
        let config = AiOpsConfig::default();
        assert_eq!(
            dedicated_infra_cost(&config, "Enterprise", 2),
            Some(Dollars::new(84_000))
        );
        assert_eq!(
            dedicated_infra_cost(&config, "Scale", 0),
            Some(Dollars::new(48_000))
        );
        assert_eq!(dedicated_infra_cost(&config, "Growth", 4), None);
    }

    #[test]
    fn test_negative_counts_rejected() {
        let config = AiOpsConfig::default();
        assert!(ai_soc_platform_cost(&config, -1.0).is_err());
        assert!(ai_compute_cost(&config, f64::NAN).is_err());
        assert!(ir_lead_count(&config, -5.0).is_err());
    }
}
