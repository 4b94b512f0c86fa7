//! # tco-core: Pricing Engine for SIEM Total Cost of Ownership
//!
//! This crate derives comparable annual cost breakdowns for a legacy per-GB
//! licensed SIEM and a usage-based detection platform. All pricing logic is
//! pure functions over an explicit configuration value, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TCO Calculator Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Calculator pages (TypeScript)                   │   │
//! │  │     Cost simulator ──► Comparison table ──► AI SOC add-on       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs generated types)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tco-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  legacy   │  │ workload  │  │ platform  │  │comparison │  │   │
//! │  │   │ rate curve│  │ queries   │  │ cost-plus │  │  3 rows   │  │   │
//! │  │   │ blend/cap │  │ alerts    │  │ BYODB     │  │           │  │   │
//! │  │   └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │         └──────────────┴──────┬───────┘                        │   │
//! │  │                       ┌───────▼───────┐                         │   │
//! │  │                       │    tiers      │  cumulative + flat      │   │
//! │  │                       └───────────────┘                         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │                     PricingConfig (defaults, TOML or JSON)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tiers`] - Cumulative and flat tier tables, and their resolvers
//! - [`config`] - Every rate, tier table and model constant, with defaults
//! - [`legacy`] - Legacy licensed-SIEM scenario
//! - [`workload`] - Query and alert volume estimation
//! - [`platform`] - Usage-based platform cost-plus scenario
//! - [`comparison`] - Side-by-side TCO rows
//! - [`ai_ops`] - AI SOC add-on cost functions
//! - [`engine`] - Facade owning a validated configuration
//! - [`money`] - Whole-dollar amounts
//! - [`error`] - Domain error types
//! - [`validation`] - Input and config validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same input and config = bit-identical output
//! 2. **No I/O**: Config arrives as a value or a string the host already read
//! 3. **Round Once**: Costs stay f64 while modeled and become `Dollars` once
//! 4. **Explicit Errors**: Bad input, bad tables and unknown providers are typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use tco_core::PricingEngine;
//!
//! let engine = PricingEngine::default();
//!
//! let legacy = engine.legacy(500.0, None, Some(50)).unwrap();
//! assert_eq!(legacy.license.amount(), 675_000);
//!
//! let rows = engine.compare(10_000.0, None, None).unwrap();
//! assert_eq!(rows.len(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod ai_ops;
pub mod comparison;
pub mod config;
pub mod engine;
pub mod error;
pub mod legacy;
pub mod money;
pub mod platform;
pub mod provider;
pub mod tiers;
pub mod types;
pub mod validation;
pub mod workload;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use comparison::ComparisonRow;
pub use config::PricingConfig;
pub use engine::PricingEngine;
pub use error::{PricingError, PricingResult, ValidationError};
pub use legacy::LegacyScenario;
pub use money::Dollars;
pub use platform::PlatformScenario;
pub use provider::Provider;
pub use types::{ScenarioInputs, ScenarioRequest};
pub use workload::WorkloadEstimate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Days used to annualize every per-day rate and count.
pub const DAYS_PER_YEAR: f64 = 365.0;
