//! # Pricing Configuration
//!
//! Every number the engine prices with: tier boundaries, rates, salaries,
//! growth-model constants. The engine never hard-codes these; it is handed a
//! validated [`PricingConfig`] and reads it for the rest of its life.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. TOML / JSON document handed in by the host (highest priority)       │
//! │     Only the sections and fields it names are overridden                │
//! │                                                                         │
//! │  2. Default Values (lowest priority)                                    │
//! │     PricingConfig::default() - the published reference tables          │
//! │                                                                         │
//! │  Either way: validate() runs before an engine can be built              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! market_variance = 1.0
//! default_provider = "securityLake"
//!
//! [legacy]
//! min_rate = 180.0
//!
//! [[legacy.training_ps]]
//! ceiling = 50.0
//! value = 5000
//!
//! [[legacy.training_ps]]   # no ceiling = unbounded
//! value = 75000
//!
//! [workload.dashboard]
//! breakpoint_gb = 1000.0
//! log_base = 2674.0
//! ```
//!
//! This crate does no file I/O: hosts read the document themselves and pass
//! the string to [`PricingConfig::from_toml_str`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PricingError, PricingResult};
use crate::money::Dollars;
use crate::provider::Provider;
use crate::tiers::{CumulativeTier, FlatTier, TierTable};
use crate::validation::validate_config_number;

/// Rate curve boundaries disagreeing by more than this many $/GB/yr are logged.
const RATE_CURVE_CONTINUITY_TOLERANCE: f64 = 1.0;

/// Dashboard growth branches may disagree by at most this many queries/day.
const DASHBOARD_CONTINUITY_TOLERANCE: f64 = 1.0;

// =============================================================================
// Legacy Reference Product
// =============================================================================

/// One linear piece of the legacy $/GB/yr rate curve.
///
/// `rate(gb) = start_rate + (gb - from_gb) × slope` on `(from_gb, up_to]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateCurveSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,
    pub start_rate: f64,
    pub slope: f64,
    pub from_gb: f64,
}

impl RateCurveSegment {
    /// Unfloored, unrounded rate at `gb`.
    pub fn rate_at(&self, gb: f64) -> f64 {
        self.start_rate + (gb - self.from_gb) * self.slope
    }
}

/// Volume above which the legacy license is capped at `cap`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LicenseCap {
    pub min_volume_gb: f64,
    pub cap: Dollars,
}

/// Infrastructure cost as a share of license: `max - log10(vol) / log_divisor`,
/// clamped to `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfraPercentModel {
    pub max: f64,
    pub min: f64,
    pub log_divisor: f64,
}

impl Default for InfraPercentModel {
    fn default() -> Self {
        InfraPercentModel {
            max: 0.20,
            min: 0.09,
            log_divisor: 20.0,
        }
    }
}

/// Enterprise unlimited-license band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnlimitedLicense {
    pub blend_start_gb: f64,
    pub blend_end_gb: f64,
    pub annual_cost: Dollars,
}

impl Default for UnlimitedLicense {
    fn default() -> Self {
        UnlimitedLicense {
            blend_start_gb: 10_000.0,
            blend_end_gb: 15_000.0,
            annual_cost: Dollars::new(8_500_000),
        }
    }
}

/// Admin headcount model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminStaffing {
    pub salary: Dollars,
    pub gb_per_admin: f64,
    pub max_admins: u32,
    /// `efficiency = 1 + log10(max(1, vol)) × efficiency_coefficient`
    pub efficiency_coefficient: f64,
    /// Below this volume staffing is fractional FTE.
    pub fractional_below_gb: f64,
    pub min_fraction: f64,
}

impl Default for AdminStaffing {
    fn default() -> Self {
        AdminStaffing {
            salary: Dollars::new(140_000),
            gb_per_admin: 650.0,
            max_admins: 18,
            efficiency_coefficient: 0.35,
            fractional_below_gb: 200.0,
            min_fraction: 0.05,
        }
    }
}

/// Linear detection-compute scale-up past `threshold_gb`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionScale {
    pub threshold_gb: f64,
    pub rate_per_gb: f64,
}

impl Default for DetectionScale {
    fn default() -> Self {
        DetectionScale {
            threshold_gb: 50_000.0,
            rate_per_gb: 3.50,
        }
    }
}

/// Rule count a deployment of a given size is assumed to run.
///
/// `clamp(round(rules_per_step × vol / step_gb), min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineRules {
    pub rules_per_step: f64,
    pub step_gb: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for BaselineRules {
    fn default() -> Self {
        BaselineRules {
            rules_per_step: 200.0,
            step_gb: 500.0,
            min: 50.0,
            max: 1000.0,
        }
    }
}

/// Legacy SIEM reference pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    pub rate_curve: Vec<RateCurveSegment>,
    pub min_rate: f64,
    pub infra_cap: Dollars,
    pub infra_percent: InfraPercentModel,
    pub unlimited: UnlimitedLicense,
    /// Highest threshold first.
    pub license_caps: Vec<LicenseCap>,
    pub admin: AdminStaffing,
    pub training_ps: TierTable<FlatTier<Dollars>>,
    pub detection_compute: TierTable<FlatTier<Dollars>>,
    pub detection_scale: DetectionScale,
    pub baseline_rules: BaselineRules,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        LegacyConfig {
            rate_curve: vec![
                segment(Some(500.0), 1600.0, -0.5, 0.0),
                segment(Some(2000.0), 1350.0, -0.28, 500.0),
                segment(Some(10_000.0), 930.0, -0.05, 2000.0),
                segment(Some(50_000.0), 530.0, -0.004, 10_000.0),
                segment(None, 370.0, 0.0, 50_000.0),
            ],
            min_rate: 180.0,
            infra_cap: Dollars::new(10_000_000),
            infra_percent: InfraPercentModel::default(),
            unlimited: UnlimitedLicense::default(),
            license_caps: vec![
                LicenseCap {
                    min_volume_gb: 300_000.0,
                    cap: Dollars::new(55_000_000),
                },
                LicenseCap {
                    min_volume_gb: 80_000.0,
                    cap: Dollars::new(30_000_000),
                },
            ],
            admin: AdminStaffing::default(),
            training_ps: dollar_table(&[
                (Some(50.0), 5_000),
                (Some(500.0), 12_000),
                (Some(5_000.0), 25_000),
                (Some(50_000.0), 50_000),
                (None, 75_000),
            ]),
            detection_compute: dollar_table(&[
                (Some(10.0), 3_000),
                (Some(50.0), 12_000),
                (Some(200.0), 36_000),
                (Some(500.0), 72_000),
                (Some(2_000.0), 150_000),
                (Some(10_000.0), 320_000),
                (Some(50_000.0), 600_000),
                (None, 900_000),
            ]),
            detection_scale: DetectionScale::default(),
            baseline_rules: BaselineRules::default(),
        }
    }
}

// =============================================================================
// Workload Model
// =============================================================================

/// Dashboard query growth: square-root regime up to the breakpoint,
/// logarithmic regime above it.
///
/// ```text
/// vol ≤ breakpoint:  base + vol × per_gb + sqrt(vol) × sqrt_coefficient
/// vol > breakpoint:  log_base + log10(vol / breakpoint) × log_coefficient
/// ```
///
/// `log_base` is the first branch evaluated at the breakpoint (2674 for the
/// defaults). It is stored rather than derived; [`PricingConfig::validate`]
/// rejects a config where the two no longer agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardModel {
    pub breakpoint_gb: f64,
    pub base: f64,
    pub per_gb: f64,
    pub sqrt_coefficient: f64,
    pub log_base: f64,
    pub log_coefficient: f64,
}

impl DashboardModel {
    /// Unrounded square-root branch.
    pub fn sqrt_regime(&self, vol: f64) -> f64 {
        self.base + vol * self.per_gb + vol.sqrt() * self.sqrt_coefficient
    }

    /// Unrounded logarithmic branch.
    pub fn log_regime(&self, vol: f64) -> f64 {
        self.log_base + (vol / self.breakpoint_gb).log10() * self.log_coefficient
    }
}

impl Default for DashboardModel {
    fn default() -> Self {
        DashboardModel {
            breakpoint_gb: 1000.0,
            base: 200.0,
            per_gb: 2.0,
            sqrt_coefficient: 15.0,
            log_base: 2674.0,
            log_coefficient: 8000.0,
        }
    }
}

/// Alert consolidation (clustering) run costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Fraction of detection queries that raise an alert.
    pub trigger_rate: f64,
    pub avg_alerts_per_run: f64,
    pub base_cost_per_run: f64,
    pub cost_per_alert: f64,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        ConsolidationConfig {
            trigger_rate: 0.02,
            avg_alerts_per_run: 200.0,
            base_cost_per_run: 1.50,
            cost_per_alert: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    pub queries_per_rule_per_day: f64,
    pub dashboard: DashboardModel,
    pub consolidation: ConsolidationConfig,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            queries_per_rule_per_day: 24.0,
            dashboard: DashboardModel::default(),
            consolidation: ConsolidationConfig::default(),
        }
    }
}

// =============================================================================
// Usage-Based Platform
// =============================================================================

/// Platform tier: cost-of-service floor, included queries, and margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTier {
    pub name: String,
    pub base_cogs: Dollars,
    pub base_queries: u64,
    pub margin: f64,
    pub max_queries_per_hour: u64,
}

/// Marginal query cost multiplier: 1.0 up to the breakpoint, then
/// `1 + log10(vol / breakpoint) × log_coefficient`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeMultiplier {
    pub breakpoint_gb: f64,
    pub log_coefficient: f64,
}

impl Default for VolumeMultiplier {
    fn default() -> Self {
        VolumeMultiplier {
            breakpoint_gb: 1000.0,
            log_coefficient: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub tiers: TierTable<FlatTier<PlatformTier>>,
    /// Cost of one query beyond the tier allowance.
    pub query_unit_cost: f64,
    pub volume_multiplier: VolumeMultiplier,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        let rows: [(Option<f64>, &str, i64, u64, f64, u64); 13] = [
            (Some(5.0), "Lite", 3_500, 600_000, 0.30, 2_000),
            (Some(10.0), "Lite+", 3_500, 600_000, 0.40, 2_000),
            (Some(20.0), "Starter", 6_000, 800_000, 0.48, 3_500),
            (Some(50.0), "Starter+", 10_000, 1_000_000, 0.58, 5_000),
            (Some(100.0), "Growth", 15_000, 1_500_000, 0.70, 12_000),
            (Some(200.0), "Growth+", 20_000, 2_000_000, 0.90, 20_000),
            (Some(350.0), "Business", 25_000, 3_000_000, 1.02, 40_000),
            (Some(500.0), "Business+", 28_000, 3_500_000, 1.15, 60_000),
            (Some(1_000.0), "Professional", 32_000, 4_000_000, 1.40, 80_000),
            (Some(2_000.0), "Professional+", 36_000, 5_000_000, 1.70, 120_000),
            (Some(5_000.0), "Enterprise", 40_000, 6_000_000, 1.80, 200_000),
            (Some(50_000.0), "Enterprise+", 50_000, 8_000_000, 1.95, 500_000),
            (None, "Scale", 60_000, 10_000_000, 2.00, 1_000_000),
        ];

        let tiers = rows
            .into_iter()
            .map(|(ceiling, name, cogs, queries, margin, qph)| FlatTier {
                ceiling,
                value: PlatformTier {
                    name: name.to_string(),
                    base_cogs: Dollars::new(cogs),
                    base_queries: queries,
                    margin,
                    max_queries_per_hour: qph,
                },
            })
            .collect();

        PlatformConfig {
            tiers: TierTable::new(tiers),
            query_unit_cost: 0.012,
            volume_multiplier: VolumeMultiplier::default(),
        }
    }
}

/// Storage rates for one provider, in $/GB/day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRates {
    pub provider: Provider,
    pub label: String,
    pub category: String,
    pub tiers: TierTable<CumulativeTier>,
}

/// Customer-side admin overhead of running the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceTier {
    pub annual: Dollars,
    pub fte: f64,
    pub desc: String,
}

// =============================================================================
// AI Operations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSocTier {
    pub annual: Dollars,
    pub tier: String,
}

/// Dedicated alert-engine workers add-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedicatedInfra {
    /// Platform tier names the add-on can be bought with.
    pub eligible_tiers: Vec<String>,
    pub annual_base: Dollars,
    pub per_worker: Dollars,
    pub description: String,
}

impl Default for DedicatedInfra {
    fn default() -> Self {
        DedicatedInfra {
            eligible_tiers: vec!["Enterprise".to_string(), "Scale".to_string()],
            annual_base: Dollars::new(48_000),
            per_worker: Dollars::new(18_000),
            description: "Dedicated Alert Engine workers, guaranteed SLA, data residency"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiOpsConfig {
    /// Keyed by daily alert count.
    pub soc_platform: TierTable<FlatTier<AiSocTier>>,
    /// Cumulative per-investigation rates.
    pub investigation_tiers: TierTable<CumulativeTier>,
    pub detection_engineers: TierTable<FlatTier<u32>>,
    pub ir_leads: TierTable<FlatTier<u32>>,
    pub bundle_discount: f64,
    pub dedicated_infra: DedicatedInfra,
}

impl Default for AiOpsConfig {
    fn default() -> Self {
        let soc = [
            (Some(1_000.0), 60_000, "Starter"),
            (Some(5_000.0), 120_000, "Professional"),
            (Some(15_000.0), 240_000, "Business"),
            (Some(50_000.0), 420_000, "Enterprise"),
            (None, 600_000, "Scale"),
        ];

        AiOpsConfig {
            soc_platform: TierTable::new(
                soc.into_iter()
                    .map(|(ceiling, annual, tier)| FlatTier {
                        ceiling,
                        value: AiSocTier {
                            annual: Dollars::new(annual),
                            tier: tier.to_string(),
                        },
                    })
                    .collect(),
            ),
            investigation_tiers: rate_table(&[
                (Some(250_000.0), 2.00),
                (Some(1_000_000.0), 1.40),
                (Some(5_000_000.0), 1.00),
                (None, 0.80),
            ]),
            detection_engineers: TierTable::new(vec![
                FlatTier::bounded(2_000.0, 1),
                FlatTier::bounded(10_000.0, 1),
                FlatTier::bounded(30_000.0, 2),
                FlatTier::unbounded(3),
            ]),
            ir_leads: TierTable::new(vec![
                FlatTier::bounded(5_000.0, 0),
                FlatTier::bounded(30_000.0, 1),
                FlatTier::unbounded(2),
            ]),
            bundle_discount: 0.15,
            dedicated_infra: DedicatedInfra::default(),
        }
    }
}

// =============================================================================
// Main Pricing Configuration
// =============================================================================

/// Complete pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Multiplier on the rate-based legacy license (regional/market skew).
    pub market_variance: f64,
    pub legacy: LegacyConfig,
    pub workload: WorkloadConfig,
    pub platform: PlatformConfig,
    pub support: TierTable<FlatTier<Dollars>>,
    pub default_provider: Provider,
    pub providers: Vec<ProviderRates>,
    /// Ingestion pipeline, $/GB/day.
    pub data_ingestion: TierTable<CumulativeTier>,
    pub governance: TierTable<FlatTier<GovernanceTier>>,
    pub ai_ops: AiOpsConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            market_variance: 1.0,
            legacy: LegacyConfig::default(),
            workload: WorkloadConfig::default(),
            platform: PlatformConfig::default(),
            support: dollar_table(&[
                (Some(10.0), 2_400),
                (Some(50.0), 6_000),
                (Some(500.0), 12_000),
                (Some(2_000.0), 24_000),
                (Some(10_000.0), 60_000),
                (Some(50_000.0), 120_000),
                (Some(200_000.0), 240_000),
                (None, 360_000),
            ]),
            default_provider: Provider::SecurityLake,
            providers: default_providers(),
            data_ingestion: rate_table(&[
                (Some(500.0), 0.018),
                (Some(2_000.0), 0.014),
                (Some(10_000.0), 0.010),
                (Some(100_000.0), 0.007),
                (None, 0.005),
            ]),
            governance: TierTable::new(
                [
                    (Some(10.0), 3_600, 0.025, "~1 hr/wk"),
                    (Some(100.0), 9_000, 0.06, "~2 hrs/wk"),
                    (Some(500.0), 18_000, 0.12, "~5 hrs/wk"),
                    (Some(5_000.0), 30_000, 0.20, "~8 hrs/wk"),
                    (None, 36_000, 0.24, "~10 hrs/wk"),
                ]
                .into_iter()
                .map(|(ceiling, annual, fte, desc)| FlatTier {
                    ceiling,
                    value: GovernanceTier {
                        annual: Dollars::new(annual),
                        fte,
                        desc: desc.to_string(),
                    },
                })
                .collect(),
            ),
            ai_ops: AiOpsConfig::default(),
        }
    }
}

impl PricingConfig {
    /// Parses a TOML document and validates it.
    ///
    /// Sections and fields the document leaves out keep their defaults.
    pub fn from_toml_str(contents: &str) -> PricingResult<Self> {
        let config: PricingConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document and validates it.
    pub fn from_json_str(contents: &str) -> PricingResult<Self> {
        let config: PricingConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML (for exporting the defaults).
    pub fn to_toml_string(&self) -> PricingResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Storage rate table for `provider`.
    pub fn provider_rates(&self, provider: Provider) -> PricingResult<&ProviderRates> {
        self.providers
            .iter()
            .find(|rates| rates.provider == provider)
            .ok_or(PricingError::ProviderNotConfigured(provider))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> PricingResult<()> {
        validate_config_number("market_variance", "market_variance", self.market_variance)?;

        self.validate_legacy()?;
        self.validate_workload()?;
        self.validate_platform()?;
        self.validate_ai_ops()?;

        debug!(
            providers = self.providers.len(),
            platform_tiers = self.platform.tiers.tiers().len(),
            "Pricing config validated"
        );
        Ok(())
    }

    fn validate_legacy(&self) -> PricingResult<()> {
        let legacy = &self.legacy;

        validate_rate_curve(&legacy.rate_curve)?;
        validate_config_number("legacy", "min_rate", legacy.min_rate)?;

        let pct = &legacy.infra_percent;
        validate_config_number("legacy.infra_percent", "min", pct.min)?;
        validate_config_number("legacy.infra_percent", "max", pct.max)?;
        if pct.min > pct.max {
            return Err(PricingError::config(
                "legacy.infra_percent",
                "min must not exceed max",
            ));
        }
        if !(pct.log_divisor.is_finite() && pct.log_divisor > 0.0) {
            return Err(PricingError::config(
                "legacy.infra_percent",
                "log_divisor must be positive",
            ));
        }

        let band = &legacy.unlimited;
        validate_config_number("legacy.unlimited", "blend_start_gb", band.blend_start_gb)?;
        validate_config_number("legacy.unlimited", "blend_end_gb", band.blend_end_gb)?;
        if band.blend_start_gb >= band.blend_end_gb {
            return Err(PricingError::config(
                "legacy.unlimited",
                "blend_start_gb must be below blend_end_gb",
            ));
        }

        for pair in legacy.license_caps.windows(2) {
            if pair[1].min_volume_gb >= pair[0].min_volume_gb {
                return Err(PricingError::config(
                    "legacy.license_caps",
                    "thresholds must be listed highest first",
                ));
            }
        }

        let admin = &legacy.admin;
        if !(admin.gb_per_admin.is_finite() && admin.gb_per_admin > 0.0) {
            return Err(PricingError::config(
                "legacy.admin",
                "gb_per_admin must be positive",
            ));
        }
        if admin.max_admins == 0 {
            return Err(PricingError::config(
                "legacy.admin",
                "max_admins must be at least 1",
            ));
        }
        validate_config_number(
            "legacy.admin",
            "efficiency_coefficient",
            admin.efficiency_coefficient,
        )?;
        validate_config_number("legacy.admin", "min_fraction", admin.min_fraction)?;

        let baseline = &legacy.baseline_rules;
        let step_ok = baseline.step_gb.is_finite() && baseline.step_gb > 0.0;
        if !step_ok || baseline.min > baseline.max {
            return Err(PricingError::config(
                "legacy.baseline_rules",
                "step_gb must be positive and min must not exceed max",
            ));
        }
        if baseline.min <= 0.0 {
            return Err(PricingError::config(
                "legacy.baseline_rules",
                "min must be positive",
            ));
        }

        validate_config_number(
            "legacy.detection_scale",
            "rate_per_gb",
            legacy.detection_scale.rate_per_gb,
        )?;

        legacy.training_ps.validate("legacy.training_ps")?;
        legacy.detection_compute.validate("legacy.detection_compute")?;
        Ok(())
    }

    fn validate_workload(&self) -> PricingResult<()> {
        let workload = &self.workload;
        validate_config_number(
            "workload",
            "queries_per_rule_per_day",
            workload.queries_per_rule_per_day,
        )?;

        let dash = &workload.dashboard;
        if !(dash.breakpoint_gb.is_finite() && dash.breakpoint_gb > 0.0) {
            return Err(PricingError::config(
                "workload.dashboard",
                "breakpoint_gb must be positive",
            ));
        }
        let gap = (dash.sqrt_regime(dash.breakpoint_gb) - dash.log_base).abs();
        if !(gap <= DASHBOARD_CONTINUITY_TOLERANCE) {
            return Err(PricingError::config(
                "workload.dashboard",
                format!(
                    "growth branches disagree at breakpoint {} by {:.2} queries/day",
                    dash.breakpoint_gb, gap
                ),
            ));
        }

        let c = &workload.consolidation;
        validate_config_number("workload.consolidation", "trigger_rate", c.trigger_rate)?;
        validate_config_number("workload.consolidation", "base_cost_per_run", c.base_cost_per_run)?;
        validate_config_number("workload.consolidation", "cost_per_alert", c.cost_per_alert)?;
        if !(c.avg_alerts_per_run.is_finite() && c.avg_alerts_per_run > 0.0) {
            return Err(PricingError::config(
                "workload.consolidation",
                "avg_alerts_per_run must be positive",
            ));
        }
        Ok(())
    }

    fn validate_platform(&self) -> PricingResult<()> {
        let platform = &self.platform;
        platform.tiers.validate("platform.tiers")?;
        for tier in platform.tiers.tiers() {
            validate_config_number("platform.tiers", "margin", tier.value.margin)?;
        }
        validate_config_number("platform", "query_unit_cost", platform.query_unit_cost)?;
        if !(platform.volume_multiplier.breakpoint_gb > 0.0) {
            return Err(PricingError::config(
                "platform.volume_multiplier",
                "breakpoint_gb must be positive",
            ));
        }

        self.support.validate("support")?;
        self.data_ingestion.validate("data_ingestion")?;
        self.governance.validate("governance")?;

        for (index, rates) in self.providers.iter().enumerate() {
            if self.providers[..index]
                .iter()
                .any(|earlier| earlier.provider == rates.provider)
            {
                return Err(PricingError::config(
                    "providers",
                    format!("provider {} is listed more than once", rates.provider),
                ));
            }
            rates
                .tiers
                .validate(&format!("providers.{}", rates.provider))?;
        }

        if self.provider_rates(self.default_provider).is_err() {
            return Err(PricingError::config(
                "providers",
                format!("default provider {} has no rate table", self.default_provider),
            ));
        }
        Ok(())
    }

    fn validate_ai_ops(&self) -> PricingResult<()> {
        let ai = &self.ai_ops;
        ai.soc_platform.validate("ai_ops.soc_platform")?;
        ai.investigation_tiers.validate("ai_ops.investigation_tiers")?;
        ai.detection_engineers.validate("ai_ops.detection_engineers")?;
        ai.ir_leads.validate("ai_ops.ir_leads")?;
        if !(0.0..=1.0).contains(&ai.bundle_discount) {
            return Err(PricingError::config(
                "ai_ops",
                "bundle_discount must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Rate curve: starts at 0, contiguous, ends unbounded.
///
/// A rate jump at a boundary is accepted with a warning, so published
/// curves that step between segments still load.
fn validate_rate_curve(curve: &[RateCurveSegment]) -> PricingResult<()> {
    const TABLE: &str = "legacy.rate_curve";

    let ceilings: Vec<Option<f64>> = curve.iter().map(|s| s.up_to).collect();
    crate::validation::validate_ceilings(TABLE, &ceilings)?;

    if curve[0].from_gb != 0.0 {
        return Err(PricingError::config(TABLE, "first segment must start at 0 GB"));
    }

    for (index, pair) in curve.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        // validate_ceilings guarantees every segment but the last is bounded
        let boundary = prev.up_to.unwrap_or(f64::INFINITY);
        if next.from_gb != boundary {
            return Err(PricingError::config(
                TABLE,
                format!(
                    "segment {} starts at {} GB but segment {} ends at {} GB",
                    index + 1,
                    next.from_gb,
                    index,
                    boundary
                ),
            ));
        }

        let jump = (prev.rate_at(boundary) - next.rate_at(boundary)).abs();
        if !(jump <= RATE_CURVE_CONTINUITY_TOLERANCE) {
            warn!(
                table = TABLE,
                boundary_gb = boundary,
                jump,
                "Rate curve is discontinuous at segment boundary"
            );
        }
    }

    Ok(())
}

// =============================================================================
// Default Table Helpers
// =============================================================================

fn segment(up_to: Option<f64>, start_rate: f64, slope: f64, from_gb: f64) -> RateCurveSegment {
    RateCurveSegment {
        up_to,
        start_rate,
        slope,
        from_gb,
    }
}

fn dollar_table(rows: &[(Option<f64>, i64)]) -> TierTable<FlatTier<Dollars>> {
    TierTable::new(
        rows.iter()
            .map(|&(ceiling, annual)| FlatTier {
                ceiling,
                value: Dollars::new(annual),
            })
            .collect(),
    )
}

fn rate_table(rows: &[(Option<f64>, f64)]) -> TierTable<CumulativeTier> {
    TierTable::new(
        rows.iter()
            .map(|&(up_to, rate)| CumulativeTier { up_to, rate })
            .collect(),
    )
}

fn default_providers() -> Vec<ProviderRates> {
    const BOUNDS: [Option<f64>; 5] = [
        Some(500.0),
        Some(2_000.0),
        Some(10_000.0),
        Some(100_000.0),
        None,
    ];

    let rows: [(Provider, &str, &str, [f64; 5]); 7] = [
        (
            Provider::SecurityLake,
            "Amazon Security Lake (S3 + Athena)",
            "Lake / Warehouse",
            [0.09, 0.06, 0.04, 0.028, 0.022],
        ),
        (
            Provider::BigQuery,
            "Google BigQuery",
            "Lake / Warehouse",
            [0.14, 0.09, 0.06, 0.04, 0.03],
        ),
        (
            Provider::ClickHouse,
            "ClickHouse Cloud",
            "Columnar Analytics",
            [0.15, 0.10, 0.07, 0.045, 0.035],
        ),
        (
            Provider::Databricks,
            "Databricks Lakehouse",
            "Columnar Analytics",
            [0.18, 0.13, 0.09, 0.06, 0.045],
        ),
        (
            Provider::OpenSearch,
            "AWS OpenSearch",
            "Search / SIEM-Optimized",
            [0.28, 0.19, 0.12, 0.08, 0.065],
        ),
        (
            Provider::Snowflake,
            "Snowflake",
            "Search / SIEM-Optimized",
            [0.24, 0.16, 0.10, 0.07, 0.055],
        ),
        (
            Provider::Elasticsearch,
            "Elastic Cloud (Elasticsearch)",
            "Search / SIEM-Optimized",
            [0.35, 0.24, 0.15, 0.10, 0.08],
        ),
    ];

    rows.into_iter()
        .map(|(provider, label, category, rates)| ProviderRates {
            provider,
            label: label.to_string(),
            category: category.to_string(),
            tiers: TierTable::new(
                BOUNDS
                    .iter()
                    .zip(rates)
                    .map(|(&up_to, rate)| CumulativeTier { up_to, rate })
                    .collect(),
            ),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
