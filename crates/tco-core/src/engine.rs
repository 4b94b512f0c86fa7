//! # Pricing Engine
//!
//! Facade that owns one validated [`PricingConfig`] and exposes every
//! calculation against it.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  startup:   PricingConfig (defaults / TOML / JSON)                      │
//! │                  │                                                      │
//! │                  ▼  PricingEngine::new → validate()                     │
//! │             PricingEngine  (config now read-only)                       │
//! │                  │                                                      │
//! │  per call:       ├──► legacy(vol, rate?, rules?)                        │
//! │                  ├──► workload(vol, rules)                              │
//! │                  ├──► platform(vol, rules, provider?)                   │
//! │                  └──► compare(vol, rules?, provider?)                   │
//! │                                                                         │
//! │  No interior mutability: share `&PricingEngine` (or an Arc) across      │
//! │  threads freely.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use crate::ai_ops::{self, AiSocPlatformCost};
use crate::comparison::{compare_scenarios, ComparisonRow};
use crate::config::PricingConfig;
use crate::error::PricingResult;
use crate::legacy::{self, LegacyScenario};
use crate::money::Dollars;
use crate::platform::{self, PlatformScenario};
use crate::provider::Provider;
use crate::types::ScenarioRequest;
use crate::validation::validate_volume;
use crate::workload::{estimate_workload, WorkloadEstimate};

/// Pricing engine over an immutable configuration.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Validates `config` and takes ownership of it.
    pub fn new(config: PricingConfig) -> PricingResult<Self> {
        config.validate()?;

        info!(
            providers = config.providers.len(),
            default_provider = %config.default_provider,
            platform_tiers = config.platform.tiers.tiers().len(),
            market_variance = config.market_variance,
            "Pricing engine configured"
        );

        Ok(PricingEngine { config })
    }

    /// Engine over a TOML document (fields it omits keep their defaults).
    pub fn from_toml_str(contents: &str) -> PricingResult<Self> {
        PricingEngine::new(PricingConfig::from_toml_str(contents)?)
    }

    /// Engine over a JSON document (fields it omits keep their defaults).
    pub fn from_json_str(contents: &str) -> PricingResult<Self> {
        PricingEngine::new(PricingConfig::from_json_str(contents)?)
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// List $/GB/yr at `gb`.
    pub fn legacy_rate(&self, gb: f64) -> PricingResult<f64> {
        let gb = validate_volume(gb)?;
        Ok(legacy::legacy_rate(&self.config.legacy, gb))
    }

    pub fn legacy(
        &self,
        vol: f64,
        rate_override: Option<f64>,
        rules: Option<u32>,
    ) -> PricingResult<LegacyScenario> {
        legacy::legacy_scenario(&self.config, vol, rate_override, rules)
    }

    pub fn workload(&self, vol: f64, rules: u32) -> PricingResult<WorkloadEstimate> {
        estimate_workload(&self.config.workload, vol, rules)
    }

    pub fn platform(
        &self,
        vol: f64,
        rules: u32,
        provider: Option<Provider>,
    ) -> PricingResult<PlatformScenario> {
        platform::platform_cost(&self.config, vol, rules, provider)
    }

    pub fn compare(
        &self,
        vol: f64,
        rules: Option<u32>,
        provider: Option<Provider>,
    ) -> PricingResult<Vec<ComparisonRow>> {
        compare_scenarios(&self.config, vol, rules, provider)
    }

    /// Validates a calculator request and builds its comparison rows.
    pub fn compare_request(&self, request: &ScenarioRequest) -> PricingResult<Vec<ComparisonRow>> {
        let inputs = request.validate()?;
        self.compare(inputs.vol, inputs.rules, inputs.provider)
    }

    // =========================================================================
    // Pass-through and Support
    // =========================================================================

    pub fn byodb_cost(&self, vol: f64, provider: Option<Provider>) -> PricingResult<Dollars> {
        platform::byodb_cost(&self.config, vol, provider)
    }

    pub fn support_cost(&self, vol: f64) -> PricingResult<Dollars> {
        platform::support_cost(&self.config, vol)
    }

    pub fn provider_label(&self, provider: Option<Provider>) -> PricingResult<&str> {
        platform::provider_label(&self.config, provider)
    }

    // =========================================================================
    // AI Operations
    // =========================================================================

    pub fn ai_soc_platform_cost(&self, daily_alerts: f64) -> PricingResult<AiSocPlatformCost> {
        ai_ops::ai_soc_platform_cost(&self.config.ai_ops, daily_alerts)
    }

    pub fn ai_compute_cost(&self, investigations: f64) -> PricingResult<Dollars> {
        ai_ops::ai_compute_cost(&self.config.ai_ops, investigations)
    }

    pub fn detection_engineer_count(&self, daily_alerts: f64) -> PricingResult<u32> {
        ai_ops::detection_engineer_count(&self.config.ai_ops, daily_alerts)
    }

    pub fn ir_lead_count(&self, daily_alerts: f64) -> PricingResult<u32> {
        ai_ops::ir_lead_count(&self.config.ai_ops, daily_alerts)
    }

    pub fn bundle_price(&self, platform_total: Dollars, ai_total: Dollars) -> Dollars {
        ai_ops::bundle_price(&self.config.ai_ops, platform_total, ai_total)
    }

    pub fn dedicated_infra_cost(&self, platform_tier: &str, workers: u32) -> Option<Dollars> {
        ai_ops::dedicated_infra_cost(&self.config.ai_ops, platform_tier, workers)
    }
}

/// Engine over the reference tables.
impl Default for PricingEngine {
    fn default() -> Self {
        PricingEngine {
            config: PricingConfig::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
