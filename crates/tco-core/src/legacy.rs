//! # Legacy Scenario Model
//!
//! Total cost of ownership of the legacy per-GB licensed reference product.
//!
//! ## Cost Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     legacy_scenario(vol, rate?, rules?)                 │
//! │                                                                         │
//! │  rate curve ──► rate-based license ──┐                                  │
//! │  license caps ───────────────────────┤                                  │
//! │  unlimited band ─────────────────────┴──► license                       │
//! │                                              │                          │
//! │                       infra_percent(vol) ────┴──► infra (capped)        │
//! │                                                                         │
//! │  gb_per_admin × efficiency(vol) ──► admins ──► admin_cost               │
//! │  detection tier + scale-up × rule multiplier ──► det_compute            │
//! │  training/PS tier ──► training_ps                                       │
//! │                                                                         │
//! │  total = license + infra + admin_cost + det_compute + training_ps      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unlimited-License Blend
//! ```text
//!   license
//!     │                         ┌──────────── unlimited annual cost
//!     │                    ____/
//!     │               ____/   linear blend on t = (vol - start)/(end - start)
//!     │          ____/
//!     │     ____/ rate-based
//!     └────────────┬─────────┬──────────► vol
//!              blend_start  blend_end
//! ```

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::config::{BaselineRules, InfraPercentModel, LegacyConfig, LicenseCap, PricingConfig};
use crate::error::PricingResult;
use crate::money::Dollars;
use crate::validation::{validate_rate_override, validate_volume};

// =============================================================================
// Legacy Scenario
// =============================================================================

/// Itemized annual cost of the legacy product at one volume.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LegacyScenario {
    pub license: Dollars,
    /// True when the license hit a cap or the unlimited band took over.
    pub license_capped: bool,
    pub infra: Dollars,
    /// Share of license applied as infrastructure cost.
    pub infra_percent: f64,
    pub admins: f64,
    pub admin_fte: f64,
    pub admin_cost: Dollars,
    pub det_compute: Dollars,
    #[serde(rename = "trainingPS")]
    pub training_ps: Dollars,
    pub total: Dollars,
    /// Effective $/GB/yr.
    pub rate: f64,
}

// =============================================================================
// Curve Helpers
// =============================================================================

/// Floored, unrounded curve value at `gb`. The last segment is a catch-all.
fn curve_rate(legacy: &LegacyConfig, gb: f64) -> f64 {
    let segment = legacy
        .rate_curve
        .iter()
        .find(|s| s.up_to.map_or(true, |up_to| gb <= up_to))
        .or_else(|| legacy.rate_curve.last());

    match segment {
        Some(segment) => segment.rate_at(gb).max(legacy.min_rate),
        None => legacy.min_rate,
    }
}

/// List $/GB/yr at `gb`: curve value floored at the minimum rate, rounded to
/// the nearest dollar.
///
/// ## Example
/// ```rust
/// use tco_core::config::LegacyConfig;
/// use tco_core::legacy::legacy_rate;
///
/// let legacy = LegacyConfig::default();
/// assert_eq!(legacy_rate(&legacy, 0.0), 1600.0);
/// assert_eq!(legacy_rate(&legacy, 500.0), 1350.0);
/// ```
pub fn legacy_rate(legacy: &LegacyConfig, gb: f64) -> f64 {
    curve_rate(legacy, gb).round().max(legacy.min_rate)
}

/// Infrastructure cost as a fraction of license, shrinking with scale.
///
/// `clamp(max - log10(vol) / log_divisor, min, max)`. At `vol = 0` the log is
/// `-inf`, which clamps to `max`.
pub fn infra_percent(model: &InfraPercentModel, vol: f64) -> f64 {
    (model.max - vol.log10() / model.log_divisor).clamp(model.min, model.max)
}

/// Lowest cap whose threshold `vol` exceeds. `None` is uncapped.
///
/// Caps are configured highest threshold first, so the first hit wins.
pub fn license_cap(caps: &[LicenseCap], vol: f64) -> Option<Dollars> {
    caps.iter()
        .find(|cap| vol > cap.min_volume_gb)
        .map(|cap| cap.cap)
}

/// Rule count a deployment of `vol` GB/day is assumed to run.
pub fn baseline_rules(model: &BaselineRules, vol: f64) -> f64 {
    (model.rules_per_step * vol / model.step_gb)
        .round()
        .clamp(model.min, model.max)
}

// =============================================================================
// Scenario
// =============================================================================

/// Prices the legacy product at `vol` GB/day.
///
/// `rate_override` replaces the curve (must be positive). `rules` defaults to
/// [`baseline_rules`]; only rule counts above the baseline raise detection
/// compute.
pub fn legacy_scenario(
    config: &PricingConfig,
    vol: f64,
    rate_override: Option<f64>,
    rules: Option<u32>,
) -> PricingResult<LegacyScenario> {
    let vol = validate_volume(vol)?;
    let rate_override = rate_override.map(validate_rate_override).transpose()?;
    let legacy = &config.legacy;

    // --- License -------------------------------------------------------------
    // Priced off the unrounded curve so the license never steps down as the
    // rounded rate ticks over.
    let (pricing_rate, mut rate) = match rate_override {
        Some(rate) => (rate, rate),
        None => (curve_rate(legacy, vol), legacy_rate(legacy, vol)),
    };

    let cap = license_cap(&legacy.license_caps, vol);
    let mut rate_based = vol * pricing_rate * config.market_variance;
    if let Some(cap) = cap {
        rate_based = rate_based.min(cap.as_f64());
    }

    let band = &legacy.unlimited;
    let unlimited = band.annual_cost.as_f64();
    let (license_raw, license_capped) = if vol <= band.blend_start_gb {
        let capped = cap.map_or(false, |cap| rate_based >= cap.as_f64());
        (rate_based, capped)
    } else if vol >= band.blend_end_gb {
        (unlimited, true)
    } else {
        let t = (vol - band.blend_start_gb) / (band.blend_end_gb - band.blend_start_gb);
        (rate_based + (unlimited - rate_based) * t, true)
    };
    let license = Dollars::from_f64_rounded(license_raw);

    if vol > band.blend_start_gb && vol > 0.0 {
        rate = (license.as_f64() / vol).round();
    }
    if license_capped {
        debug!(vol, license = %license, "Legacy license capped");
    }

    // --- Infrastructure ------------------------------------------------------
    let infra_pct = infra_percent(&legacy.infra_percent, vol);
    let infra = Dollars::from_f64_rounded(license.as_f64() * infra_pct).min(legacy.infra_cap);

    // --- Admin staffing ------------------------------------------------------
    let admin = &legacy.admin;
    let efficiency = 1.0 + vol.max(1.0).log10() * admin.efficiency_coefficient;
    let raw_admins = vol / (admin.gb_per_admin * efficiency);

    let admin_fte = if vol < admin.fractional_below_gb {
        ((raw_admins * 100.0).round() / 100.0).max(admin.min_fraction)
    } else {
        let whole = raw_admins.ceil();
        if whole > admin.max_admins as f64 {
            debug!(vol, raw_admins, max = admin.max_admins, "Admin headcount clamped");
        }
        whole.clamp(1.0, admin.max_admins as f64)
    };
    let admins = admin_fte;
    let admin_cost = Dollars::from_f64_rounded(admin_fte * admin.salary.as_f64());

    // --- Detection compute ---------------------------------------------------
    let det_base = legacy
        .detection_compute
        .lookup(vol, "legacy.detection_compute")?
        .value;
    let scale = &legacy.detection_scale;
    let det_scale = if vol > scale.threshold_gb {
        Dollars::from_f64_rounded((vol - scale.threshold_gb) * scale.rate_per_gb)
    } else {
        Dollars::zero()
    };

    let baseline = baseline_rules(&legacy.baseline_rules, vol);
    let actual_rules = rules.map_or(baseline, f64::from);
    let rule_multiplier = (actual_rules / baseline).max(1.0);
    let det_compute = Dollars::from_f64_rounded((det_base + det_scale).as_f64() * rule_multiplier);

    // --- Training / professional services ------------------------------------
    let training_ps = legacy.training_ps.lookup(vol, "legacy.training_ps")?.value;

    let total = license + infra + admin_cost + det_compute + training_ps;

    debug!(
        vol,
        rate,
        license = %license,
        infra = %infra,
        admin_cost = %admin_cost,
        det_compute = %det_compute,
        total = %total,
        "Legacy scenario computed"
    );

    Ok(LegacyScenario {
        license,
        license_capped,
        infra,
        infra_percent: infra_pct,
        admins,
        admin_fte,
        admin_cost,
        det_compute,
        training_ps,
        total,
        rate,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PricingError, ValidationError};
    use crate::validation::{MAX_DAILY_VOLUME_GB, MAX_RATE_OVERRIDE};
    use proptest::prelude::*;

    fn config() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn test_rate_curve_segments() {
        let legacy = LegacyConfig::default();
        assert_eq!(legacy_rate(&legacy, 0.0), 1600.0);
        assert_eq!(legacy_rate(&legacy, 100.0), 1550.0);
        assert_eq!(legacy_rate(&legacy, 500.0), 1350.0);
        assert_eq!(legacy_rate(&legacy, 2_000.0), 930.0);
        assert_eq!(legacy_rate(&legacy, 10_000.0), 530.0);
        assert_eq!(legacy_rate(&legacy, 50_000.0), 370.0);
        assert_eq!(legacy_rate(&legacy, 1_000_000.0), 370.0);
    }

    #[test]
    fn test_rate_curve_is_continuous_at_boundaries() {
        let legacy = LegacyConfig::default();
        for segment in &legacy.rate_curve {
            if let Some(boundary) = segment.up_to {
                let below = legacy_rate(&legacy, boundary);
                let above = legacy_rate(&legacy, boundary + 1e-6);
                assert!((below - above).abs() <= 1.0, "jump at {}", boundary);
            }
        }
    }

    #[test]
    fn test_rate_is_floored_at_minimum() {
        let mut legacy = LegacyConfig::default();
        legacy.min_rate = 600.0;
        assert_eq!(legacy_rate(&legacy, 50_000.0), 600.0);
        assert_eq!(legacy_rate(&legacy, 100.0), 1550.0);
    }

    #[test]
    fn test_infra_percent_bounds() {
        let model = InfraPercentModel::default();
        assert_eq!(infra_percent(&model, 0.0), 0.20);
        assert_eq!(infra_percent(&model, 0.5), 0.20);
        assert!((infra_percent(&model, 10.0) - 0.15).abs() < 1e-12);
        assert!((infra_percent(&model, 100.0) - 0.10).abs() < 1e-12);
        assert_eq!(infra_percent(&model, 1_000_000.0), 0.09);
    }

    #[test]
    fn test_license_cap_checks_highest_threshold_first() {
        let caps = LegacyConfig::default().license_caps;
        assert_eq!(license_cap(&caps, 50_000.0), None);
        assert_eq!(license_cap(&caps, 80_000.0), None);
        assert_eq!(license_cap(&caps, 80_001.0), Some(Dollars::new(30_000_000)));
        assert_eq!(license_cap(&caps, 400_000.0), Some(Dollars::new(55_000_000)));
    }

    #[test]
    fn test_baseline_rules_clamped() {
        let model = BaselineRules::default();
        assert_eq!(baseline_rules(&model, 0.0), 50.0);
        assert_eq!(baseline_rules(&model, 500.0), 200.0);
        assert_eq!(baseline_rules(&model, 100_000.0), 1000.0);
    }

    #[test]
    fn test_scenario_at_500_gb() {
        let s = legacy_scenario(&config(), 500.0, None, Some(50)).unwrap();

        assert_eq!(s.rate, 1350.0);
        assert_eq!(s.license, Dollars::new(675_000));
        assert!(!s.license_capped);
        // infra percent clamps to 9% well below 500 GB
        assert_eq!(s.infra, Dollars::new(60_750));
        assert_eq!(s.admin_fte, 1.0);
        assert_eq!(s.admin_cost, Dollars::new(140_000));
        // 50 rules is under the 200 rule baseline: no multiplier
        assert_eq!(s.det_compute, Dollars::new(72_000));
        assert_eq!(s.training_ps, Dollars::new(12_000));
        assert_eq!(
            s.total,
            s.license + s.infra + s.admin_cost + s.det_compute + s.training_ps
        );
    }

    #[test]
    fn test_small_volume_uses_fractional_staffing() {
        let s = legacy_scenario(&config(), 20.0, None, None).unwrap();
        // 20 / (650 × (1 + log10(20) × 0.35)) ≈ 0.021 → floored at 0.05
        assert_eq!(s.admin_fte, 0.05);
        assert_eq!(s.admin_cost, Dollars::new(7_000));

        let s = legacy_scenario(&config(), 150.0, None, None).unwrap();
        assert!(s.admin_fte > 0.05 && s.admin_fte < 1.0);
    }

    #[test]
    fn test_large_volume_staffing_is_clamped() {
        let s = legacy_scenario(&config(), 1_000_000.0, None, None).unwrap();
        assert_eq!(s.admins, 18.0);
        assert_eq!(s.admin_cost, Dollars::new(18 * 140_000));
    }

    #[test]
    fn test_blend_band() {
        let cfg = config();

        let below = legacy_scenario(&cfg, 10_000.0, None, None).unwrap();
        assert!(!below.license_capped);
        assert_eq!(below.license, Dollars::new(5_300_000));

        let mid = legacy_scenario(&cfg, 12_500.0, None, None).unwrap();
        assert!(mid.license_capped);
        // rate-based 12,500 × 520 = 6.5M, halfway to 8.5M
        assert_eq!(mid.license, Dollars::new(7_500_000));
        assert_eq!(mid.rate, 600.0);

        let above = legacy_scenario(&cfg, 20_000.0, None, None).unwrap();
        assert!(above.license_capped);
        assert_eq!(above.license, Dollars::new(8_500_000));
        assert_eq!(above.rate, 425.0);
    }

    #[test]
    fn test_rate_override_replaces_curve() {
        let s = legacy_scenario(&config(), 100.0, Some(2_000.0), None).unwrap();
        assert_eq!(s.rate, 2_000.0);
        assert_eq!(s.license, Dollars::new(200_000));
    }

    #[test]
    fn test_extra_rules_scale_detection_compute() {
        let cfg = config();
        let base = legacy_scenario(&cfg, 500.0, None, Some(200)).unwrap();
        let doubled = legacy_scenario(&cfg, 500.0, None, Some(400)).unwrap();
        assert_eq!(base.det_compute, Dollars::new(72_000));
        assert_eq!(doubled.det_compute, Dollars::new(144_000));
    }

    #[test]
    fn test_detection_scale_past_threshold() {
        let s = legacy_scenario(&config(), 60_000.0, None, None).unwrap();
        // 900k tier + 10,000 GB × 3.50
        assert_eq!(s.det_compute, Dollars::new(935_000));
    }

    #[test]
    fn test_zero_volume_does_not_divide() {
        let s = legacy_scenario(&config(), 0.0, None, None).unwrap();
        assert_eq!(s.license, Dollars::zero());
        assert_eq!(s.infra, Dollars::zero());
        assert_eq!(s.rate, 1600.0);
        assert!(s.rate.is_finite());
        assert_eq!(s.admin_fte, 0.05);
        assert!(s.total.amount() > 0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let cfg = config();
        assert!(matches!(
            legacy_scenario(&cfg, -1.0, None, None),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            legacy_scenario(&cfg, f64::NAN, None, None),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            legacy_scenario(&cfg, 100.0, Some(0.0), None),
            Err(PricingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_volume_past_maximum_rejected() {
        let cfg = config();
        assert!(matches!(
            legacy_scenario(&cfg, 1e19, None, None),
            Err(PricingError::InvalidInput(ValidationError::TooLarge { .. }))
        ));
        assert!(matches!(
            legacy_scenario(&cfg, 100.0, Some(1e18), None),
            Err(PricingError::InvalidInput(ValidationError::TooLarge { .. }))
        ));

        let s = legacy_scenario(&cfg, MAX_DAILY_VOLUME_GB, None, Some(u32::MAX)).unwrap();
        assert!(s.total > Dollars::zero());

        let s = legacy_scenario(&cfg, 10_000.0, Some(MAX_RATE_OVERRIDE), None).unwrap();
        assert!(s.total > Dollars::zero());
    }

    #[test]
    fn test_infra_is_share_of_rounded_license() {
        let cfg = config();
        for vol in [0.4, 3.7, 87.3, 1_234.5, 14_999.9] {
            let s = legacy_scenario(&cfg, vol, None, None).unwrap();
            let expected = Dollars::from_f64_rounded(s.license.as_f64() * s.infra_percent)
                .min(cfg.legacy.infra_cap);
            assert_eq!(s.infra, expected, "vol = {}", vol);
        }
    }

    proptest! {
        #[test]
        fn prop_rate_never_below_minimum(gb in 0.0f64..2_000_000.0) {
            let legacy = LegacyConfig::default();
            prop_assert!(legacy_rate(&legacy, gb) >= legacy.min_rate);
        }

        #[test]
        fn prop_total_non_decreasing_in_volume(
            a in 0.0f64..400_000.0,
            b in 0.0f64..400_000.0,
            rules in prop::option::of(0u32..=50),
        ) {
            let cfg = config();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let t_lo = legacy_scenario(&cfg, lo, None, rules).unwrap().total;
            let t_hi = legacy_scenario(&cfg, hi, None, rules).unwrap().total;
            prop_assert!(t_lo <= t_hi, "total({}) = {} > total({}) = {}", lo, t_lo, hi, t_hi);
        }

        #[test]
        fn prop_all_outputs_non_negative(vol in 0.0f64..1_000_000.0, rules in 0u32..20_000) {
            let s = legacy_scenario(&config(), vol, None, Some(rules)).unwrap();
            prop_assert!(s.license.amount() >= 0);
            prop_assert!(s.infra.amount() >= 0);
            prop_assert!(s.admin_cost.amount() >= 0);
            prop_assert!(s.det_compute.amount() >= 0);
            prop_assert!(s.training_ps.amount() >= 0);
        }

        #[test]
        fn prop_scenario_is_pure(vol in 0.0f64..100_000.0) {
            let cfg = config();
            let first = legacy_scenario(&cfg, vol, None, None).unwrap();
            let second = legacy_scenario(&cfg, vol, None, None).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
