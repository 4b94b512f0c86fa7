//! # Request Types
//!
//! What the calculator pages send, and the validated form the engine prices.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculator JSON                                                        │
//! │  { "dailyVolumeGb": 500, "ruleCount": 49.6, "provider": "bigquery" }    │
//! │           │                                                             │
//! │           ▼  serde                                                      │
//! │  ScenarioRequest   (raw numbers, free-form provider key)                │
//! │           │                                                             │
//! │           ▼  validate()                                                 │
//! │  ScenarioInputs    (vol ≥ 0, rules: u32, provider: Provider)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  PricingEngine::compare / legacy / platform                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PricingResult;
use crate::provider::Provider;
use crate::validation::{validate_rule_count, validate_volume};

// =============================================================================
// Scenario Request
// =============================================================================

/// Scenario parameters as received from a calculator page.
///
/// ## Fields
/// - `daily_volume_gb`: daily ingest, GB
/// - `rule_count`: detection rules; omitted means "derive from volume"
/// - `provider`: storage provider key; omitted means the configured default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScenarioRequest {
    pub daily_volume_gb: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl ScenarioRequest {
    pub fn new(daily_volume_gb: f64) -> Self {
        ScenarioRequest {
            daily_volume_gb,
            rule_count: None,
            provider: None,
        }
    }

    /// Checks every field and converts to engine inputs.
    ///
    /// ## Rules
    /// - Volume finite and non-negative
    /// - Rule count finite and non-negative, rounded to the nearest rule
    /// - Provider key one of [`Provider::ALL`]
    pub fn validate(&self) -> PricingResult<ScenarioInputs> {
        let vol = validate_volume(self.daily_volume_gb)?;
        let rules = self.rule_count.map(validate_rule_count).transpose()?;
        let provider = self
            .provider
            .as_deref()
            .map(str::parse::<Provider>)
            .transpose()?;

        Ok(ScenarioInputs {
            vol,
            rules,
            provider,
        })
    }
}

/// A validated [`ScenarioRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioInputs {
    pub vol: f64,
    pub rules: Option<u32>,
    pub provider: Option<Provider>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PricingError, ValidationError};

    #[test]
    fn test_deserializes_calculator_json() {
        let request: ScenarioRequest = serde_json::from_str(
            r#"{ "dailyVolumeGb": 500, "ruleCount": 49.6, "provider": "bigquery" }"#,
        )
        .unwrap();

        let inputs = request.validate().unwrap();
        assert_eq!(inputs.vol, 500.0);
        assert_eq!(inputs.rules, Some(50));
        assert_eq!(inputs.provider, Some(Provider::BigQuery));
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let request: ScenarioRequest =
            serde_json::from_str(r#"{ "dailyVolumeGb": 10000 }"#).unwrap();
        assert_eq!(request, ScenarioRequest::new(10_000.0));

        let inputs = request.validate().unwrap();
        assert_eq!(inputs.rules, None);
        assert_eq!(inputs.provider, None);
    }

    #[test]
    fn test_serializes_camel_case_without_empty_options() {
        let json = serde_json::to_string(&ScenarioRequest::new(250.0)).unwrap();
        assert_eq!(json, r#"{"dailyVolumeGb":250.0}"#);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let negative = ScenarioRequest::new(-1.0);
        assert!(matches!(
            negative.validate(),
            Err(PricingError::InvalidInput(ValidationError::Negative { .. }))
        ));

        let mut bad_rules = ScenarioRequest::new(100.0);
        bad_rules.rule_count = Some(f64::INFINITY);
        assert!(matches!(
            bad_rules.validate(),
            Err(PricingError::InvalidInput(ValidationError::NotFinite { .. }))
        ));
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let mut request = ScenarioRequest::new(100.0);
        request.provider = Some("oracle".to_string());
        assert!(matches!(
            request.validate(),
            Err(PricingError::InvalidConfiguration { ref table, ref reason })
                if table == "providers" && reason.contains("oracle")
        ));
    }
}
