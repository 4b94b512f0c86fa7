//! # Tier Tables and Resolvers
//!
//! The two primitives every cost model in this crate is built from.
//!
//! ## Cumulative vs. Flat
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CUMULATIVE (storage, ingestion, AI investigations)                     │
//! │                                                                         │
//! │    volume = 2,500 GB/day, tiers: ≤500 @0.09 │ ≤2000 @0.06 │ ≤10000 @0.04│
//! │                                                                         │
//! │      500 GB × 0.09  ──┐                                                 │
//! │    1,500 GB × 0.06  ──┼──► 45 + 90 + 20 = 155 $/day                     │
//! │      500 GB × 0.04  ──┘                                                 │
//! │                                                                         │
//! │  FLAT LOOKUP (support, training/PS, platform tier, governance)          │
//! │                                                                         │
//! │    value = 2,500 → first tier whose ceiling ≥ 2,500 → its whole value   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A ceiling of `None` means unbounded. Tables are validated once when the
//! configuration is loaded (see [`TierTable::validate`]); the resolvers
//! themselves assume a well-formed table.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::validation::validate_ceilings;

// =============================================================================
// Tier Trait
// =============================================================================

/// Anything that occupies a bracket of a tier table.
pub trait Tier {
    /// Upper bound of the bracket (inclusive). `None` is unbounded.
    fn ceiling(&self) -> Option<f64>;
}

/// Cumulative-billing tier: every unit inside the bracket pays `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,
    pub rate: f64,
}

impl CumulativeTier {
    pub const fn bounded(up_to: f64, rate: f64) -> Self {
        CumulativeTier {
            up_to: Some(up_to),
            rate,
        }
    }

    pub const fn unbounded(rate: f64) -> Self {
        CumulativeTier { up_to: None, rate }
    }
}

impl Tier for CumulativeTier {
    fn ceiling(&self) -> Option<f64> {
        self.up_to
    }
}

/// Flat-lookup tier: the whole input maps to `value` when it fits under
/// `ceiling`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatTier<V> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<f64>,
    pub value: V,
}

impl<V> FlatTier<V> {
    pub const fn bounded(ceiling: f64, value: V) -> Self {
        FlatTier {
            ceiling: Some(ceiling),
            value,
        }
    }

    pub const fn unbounded(value: V) -> Self {
        FlatTier {
            ceiling: None,
            value,
        }
    }
}

impl<V> Tier for FlatTier<V> {
    fn ceiling(&self) -> Option<f64> {
        self.ceiling
    }
}

// =============================================================================
// Resolvers
// =============================================================================

/// Splits `volume` across the tiers, lowest first.
///
/// Returns the units billed in each tier, in table order. Tiers past the one
/// that exhausted the volume get 0. For a finite volume and a table ending in
/// an unbounded tier the allocations sum exactly to `volume`.
pub fn tier_allocation<T: Tier>(volume: f64, tiers: &[T]) -> Vec<f64> {
    if volume <= 0.0 {
        return vec![0.0; tiers.len()];
    }

    let (allocation, _, _) = tiers.iter().fold(
        (Vec::with_capacity(tiers.len()), volume, 0.0_f64),
        |(mut allocation, remaining, floor), tier| {
            let width = match tier.ceiling() {
                Some(ceiling) => ceiling - floor,
                None => remaining,
            };
            let in_tier = remaining.min(width).max(0.0);
            allocation.push(in_tier);
            (
                allocation,
                remaining - in_tier,
                tier.ceiling().unwrap_or(f64::INFINITY),
            )
        },
    );

    allocation
}

/// Cumulative-tiered cost of `volume`.
///
/// Each unit is billed at the rate of the tier it falls into; `multiplier`
/// scales every per-unit rate (365.0 turns a daily rate into an annual one).
/// The result is unrounded.
///
/// ## Example
/// ```rust
/// use tco_core::tiers::{cumulative_tiered_cost, CumulativeTier};
///
/// let tiers = [
///     CumulativeTier::bounded(500.0, 0.09),
///     CumulativeTier::bounded(2000.0, 0.06),
///     CumulativeTier::unbounded(0.04),
/// ];
/// let daily = cumulative_tiered_cost(2500.0, &tiers, |t| t.rate, 1.0);
/// assert!((daily - 155.0).abs() < 1e-9);
/// ```
pub fn cumulative_tiered_cost<T: Tier>(
    volume: f64,
    tiers: &[T],
    rate: impl Fn(&T) -> f64,
    multiplier: f64,
) -> f64 {
    if volume <= 0.0 {
        return 0.0;
    }

    tier_allocation(volume, tiers)
        .into_iter()
        .zip(tiers)
        .map(|(units, tier)| units * rate(tier) * multiplier)
        .sum()
}

/// First tier whose ceiling is `>= value`, scanning in ascending order.
///
/// Falls back to the last tier if nothing matched, which only happens when a
/// table lacks its unbounded terminal tier. `None` only for an empty table.
pub fn flat_tier_lookup<T: Tier>(value: f64, tiers: &[T]) -> Option<&T> {
    tiers
        .iter()
        .find(|tier| tier.ceiling().map_or(true, |ceiling| value <= ceiling))
        .or_else(|| tiers.last())
}

// =============================================================================
// Tier Table
// =============================================================================

/// An ordered tier table as it appears in the pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable<T>(Vec<T>);

impl<T: Tier> TierTable<T> {
    pub fn new(tiers: Vec<T>) -> Self {
        TierTable(tiers)
    }

    pub fn tiers(&self) -> &[T] {
        &self.0
    }

    /// Checks the ordering invariants; `name` identifies the table in errors.
    pub fn validate(&self, name: &str) -> PricingResult<()> {
        let ceilings: Vec<Option<f64>> = self.0.iter().map(Tier::ceiling).collect();
        validate_ceilings(name, &ceilings)
    }

    /// Flat lookup that turns the empty-table case into a configuration error.
    pub fn lookup(&self, value: f64, name: &str) -> PricingResult<&T> {
        flat_tier_lookup(value, &self.0)
            .ok_or_else(|| PricingError::config(name, "tier table is empty"))
    }

    /// Cumulative cost over this table.
    pub fn tiered_cost(&self, volume: f64, rate: impl Fn(&T) -> f64, multiplier: f64) -> f64 {
        cumulative_tiered_cost(volume, &self.0, rate, multiplier)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
