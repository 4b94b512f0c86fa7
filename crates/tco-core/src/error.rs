//! # Error Types
//!
//! Domain-specific error types for tco-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  PricingError            - Everything a calculation can fail with       │
//! │  ├── InvalidInput        - wraps ValidationError (bad caller numbers)   │
//! │  ├── InvalidConfiguration- malformed table / constant, unknown provider │
//! │  ├── ProviderNotConfigured - known provider, no rate table loaded       │
//! │  └── ConfigParse         - TOML / JSON document could not be decoded    │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → calculator page                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Zero Volume Is Not An Error
//! A daily volume of 0 GB is a legitimate input. Tiered costs short-circuit
//! to zero and per-GB rates are never divided by it. Those guards live next
//! to the arithmetic they protect.

use thiserror::Error;

use crate::provider::Provider;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors surfaced by the pricing engine.
///
/// Every calculation is all-or-nothing: either a complete record is returned
/// or one of these variants is.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Caller supplied a number the engine refuses to price.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// A configuration table or constant breaks its invariants.
    ///
    /// ## When This Occurs
    /// - Tier ceilings out of order or duplicated
    /// - Missing (or misplaced) unbounded terminal tier
    /// - Rate curve segments with gaps between them
    /// - Dashboard growth model branches that no longer meet at the breakpoint
    /// - Provider key outside the enumerated set (`table` is `"providers"`)
    #[error("Invalid configuration in {table}: {reason}")]
    InvalidConfiguration { table: String, reason: String },

    /// Provider is known but the loaded configuration has no rate table for it.
    #[error("No storage rate table configured for provider {0}")]
    ProviderNotConfigured(Provider),

    /// Config document could not be decoded.
    #[error("Failed to parse pricing config: {0}")]
    ConfigParse(String),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidConfiguration`].
    pub(crate) fn config(table: &str, reason: impl Into<String>) -> Self {
        PricingError::InvalidConfiguration {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for PricingError {
    fn from(err: toml::de::Error) -> Self {
        PricingError::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for PricingError {
    fn from(err: toml::ser::Error) -> Self {
        PricingError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::ConfigParse(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any computation starts, so a rejected call never produces
/// a partial breakdown.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// NaN or infinite input.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value below zero.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: f64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value does not fit the integer range the engine counts in.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: u64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err =
            PricingError::config("legacy.training_ps", "ceilings must be strictly increasing");
        assert_eq!(
            err.to_string(),
            "Invalid configuration in legacy.training_ps: ceilings must be strictly increasing"
        );

        let err = PricingError::config("providers", "unknown provider 'azure'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration in providers: unknown provider 'azure'"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Negative {
            field: "daily_volume_gb".to_string(),
            value: -5.0,
        };
        assert_eq!(err.to_string(), "daily_volume_gb must not be negative (got -5)");

        let err = ValidationError::NotFinite {
            field: "rule_count".to_string(),
        };
        assert_eq!(err.to_string(), "rule_count must be a finite number");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "rate".to_string(),
        };
        let err: PricingError = validation_err.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_toml_error_converts_to_config_parse() {
        let parse_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err: PricingError = parse_err.into();
        assert!(matches!(err, PricingError::ConfigParse(_)));
    }
}
