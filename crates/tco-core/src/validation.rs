//! # Validation Module
//!
//! Input and configuration validation for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Calculator page (TypeScript)                                  │
//! │  ├── Slider / input bounds                                              │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine entry points (THIS MODULE)                             │
//! │  ├── Inputs: finite, non-negative → ValidationError                     │
//! │  └── Config: tier ordering, curve contiguity → InvalidConfiguration     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Models assume validated numbers                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tco_core::validation::{validate_volume, validate_rule_count};
//!
//! assert!(validate_volume(500.0).is_ok());
//! assert!(validate_volume(-1.0).is_err());
//! assert_eq!(validate_rule_count(49.6).unwrap(), 50);
//! ```

use crate::error::{PricingError, PricingResult, ValidationError};

/// Result type for input validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest daily volume the engine prices (10 PB/day).
///
/// Keeps every derived cost far inside `i64` whole dollars, even with
/// `u32::MAX` rules.
pub const MAX_DAILY_VOLUME_GB: f64 = 10_000_000.0;

/// Largest alert or investigation count accepted.
pub const MAX_COUNT: f64 = 1e12;

/// Largest $/GB/yr rate override accepted.
pub const MAX_RATE_OVERRIDE: f64 = 1_000_000.0;

// =============================================================================
// Input Validators
// =============================================================================

fn validate_non_negative(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    Ok(value)
}

fn validate_bounded(field: &str, value: f64, max: f64) -> ValidationResult<f64> {
    let value = validate_non_negative(field, value)?;
    if value > max {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: max as u64,
        });
    }
    Ok(value)
}

/// Validates a daily ingest volume in GB.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative; zero is allowed and prices to the minimum tiers
/// - Must not exceed [`MAX_DAILY_VOLUME_GB`]
pub fn validate_volume(gb: f64) -> ValidationResult<f64> {
    validate_bounded("daily_volume_gb", gb, MAX_DAILY_VOLUME_GB)
}

/// Validates a detection rule count and converts it to an integer.
///
/// ## Rules
/// - Must be finite and non-negative
/// - Fractional counts (slider interpolation) round to the nearest rule
/// - Must fit in u32
pub fn validate_rule_count(rules: f64) -> ValidationResult<u32> {
    let rules = validate_non_negative("rule_count", rules)?.round();
    if rules > u32::MAX as f64 {
        return Err(ValidationError::TooLarge {
            field: "rule_count".to_string(),
            max: u32::MAX as u64,
        });
    }
    Ok(rules as u32)
}

/// Validates a generic count input (daily alerts, investigations).
pub fn validate_count(field: &str, value: f64) -> ValidationResult<f64> {
    validate_bounded(field, value, MAX_COUNT)
}

/// Validates an explicit $/GB/yr rate override.
///
/// ## Rules
/// - Must be finite and strictly positive
/// - Must not exceed [`MAX_RATE_OVERRIDE`]
pub fn validate_rate_override(rate: f64) -> ValidationResult<f64> {
    let rate = validate_bounded("rate_override", rate, MAX_RATE_OVERRIDE)?;
    if rate == 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "rate_override".to_string(),
        });
    }
    Ok(rate)
}

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates the ceilings of a tier table.
///
/// ## Rules
/// - At least one tier
/// - Bounded ceilings finite, non-negative and strictly increasing
/// - Exactly one unbounded ceiling, and it is the last tier
pub fn validate_ceilings(table: &str, ceilings: &[Option<f64>]) -> PricingResult<()> {
    let Some((last, bounded)) = ceilings.split_last() else {
        return Err(PricingError::config(table, "tier table is empty"));
    };

    if last.is_some() {
        return Err(PricingError::config(
            table,
            "last tier must have an unbounded ceiling",
        ));
    }

    let mut previous: Option<f64> = None;
    for (index, ceiling) in bounded.iter().enumerate() {
        let Some(ceiling) = *ceiling else {
            return Err(PricingError::config(
                table,
                format!("tier {} is unbounded but is not the last tier", index),
            ));
        };

        if !ceiling.is_finite() || ceiling < 0.0 {
            return Err(PricingError::config(
                table,
                format!("tier {} has invalid ceiling {}", index, ceiling),
            ));
        }

        if let Some(prev) = previous {
            if ceiling <= prev {
                return Err(PricingError::config(
                    table,
                    format!(
                        "ceilings must be strictly increasing (tier {}: {} after {})",
                        index, ceiling, prev
                    ),
                ));
            }
        }
        previous = Some(ceiling);
    }

    Ok(())
}

/// Validates a configuration constant that must be finite and `>= 0`.
pub fn validate_config_number(table: &str, field: &str, value: f64) -> PricingResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::config(
            table,
            format!("{} must be a finite non-negative number (got {})", field, value),
        ));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_volume() {
        assert_eq!(validate_volume(0.0), Ok(0.0));
        assert_eq!(validate_volume(500.0), Ok(500.0));

        assert!(matches!(
            validate_volume(-0.5),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_volume(f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            validate_volume(f64::INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_validate_volume_upper_bound() {
        assert_eq!(validate_volume(MAX_DAILY_VOLUME_GB), Ok(MAX_DAILY_VOLUME_GB));
        assert!(matches!(
            validate_volume(MAX_DAILY_VOLUME_GB + 1.0),
            Err(ValidationError::TooLarge { max: 10_000_000, .. })
        ));
        assert!(matches!(
            validate_volume(1e19),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(validate_count("investigations", 1e13).is_err());
        assert!(validate_rate_override(1e7).is_err());
    }

    #[test]
    fn test_validate_rule_count() {
        assert_eq!(validate_rule_count(0.0), Ok(0));
        assert_eq!(validate_rule_count(250.0), Ok(250));
        assert_eq!(validate_rule_count(10.4), Ok(10));
        assert!(validate_rule_count(-1.0).is_err());
        assert!(validate_rule_count(1e12).is_err());
    }

    #[test]
    fn test_validate_rate_override() {
        assert!(validate_rate_override(1350.0).is_ok());
        assert!(validate_rate_override(0.0).is_err());
        assert!(validate_rate_override(-5.0).is_err());
    }

    #[test]
    fn test_validate_ceilings_accepts_well_formed_table() {
        assert!(validate_ceilings("t", &[Some(10.0), Some(50.0), None]).is_ok());
        assert!(validate_ceilings("t", &[None]).is_ok());
    }

    #[test]
    fn test_validate_ceilings_rejects_malformed_tables() {
        // empty
        assert!(validate_ceilings("t", &[]).is_err());
        // no unbounded terminal tier
        assert!(validate_ceilings("t", &[Some(10.0), Some(50.0)]).is_err());
        // unbounded in the middle
        assert!(validate_ceilings("t", &[Some(10.0), None, None]).is_err());
        // unsorted
        assert!(validate_ceilings("t", &[Some(50.0), Some(10.0), None]).is_err());
        // duplicate
        assert!(validate_ceilings("t", &[Some(10.0), Some(10.0), None]).is_err());
        // NaN ceiling
        assert!(validate_ceilings("t", &[Some(f64::NAN), None]).is_err());
    }

    #[test]
    fn test_error_names_the_table() {
        let err = validate_ceilings("support", &[Some(10.0)]).unwrap_err();
        assert!(err.to_string().contains("support"));
    }
}
