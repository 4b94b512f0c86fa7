//! # Money Module
//!
//! Provides the `Dollars` type for annual cost figures.
//!
//! ## Why Whole Dollars?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  Rate curves, tier walks, log/sqrt growth models → f64 (unrounded)      │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │  Dollars::from_f64_rounded  ← the ONE place a cost is rounded           │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │  Breakdown fields, totals, comparison rows → Dollars (i64)              │
//! │                                                                         │
//! │  Totals are sums of already-rounded Dollars, so a breakdown always      │
//! │  adds up exactly to its total. No hidden fractional terms.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tco_core::money::Dollars;
//!
//! let license = Dollars::from_f64_rounded(675_000.4);
//! let infra = Dollars::new(97_500);
//! assert_eq!((license + infra).amount(), 772_500);
//! assert_eq!(format!("{}", license + infra), "$772,500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Dollars Type
// =============================================================================

/// An annual cost in whole US dollars.
///
/// ## Design Decisions
/// - **i64**: Largest modeled figures (license caps) are ~5.5e7, far inside range
/// - **Single field tuple struct**: Serializes as a bare JSON number
/// - **Round half away from zero**: Same as round-half-up for the non-negative
///   figures the engine produces
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Dollars(i64);

impl Dollars {
    /// Creates a value from whole dollars.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Dollars(amount)
    }

    /// Rounds an unrounded cost to the nearest dollar.
    ///
    /// ## Example
    /// ```rust
    /// use tco_core::money::Dollars;
    ///
    /// assert_eq!(Dollars::from_f64_rounded(1234.5).amount(), 1235);
    /// assert_eq!(Dollars::from_f64_rounded(1234.49).amount(), 1234);
    /// ```
    #[inline]
    pub fn from_f64_rounded(value: f64) -> Self {
        Dollars(value.round() as i64)
    }

    /// Returns zero dollars.
    #[inline]
    pub const fn zero() -> Self {
        Dollars(0)
    }

    /// Returns the amount in whole dollars.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns the amount as f64 for further modeling (blends, margins).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Rounded thousands, used in `$140K` style explanation text.
    ///
    /// ## Example
    /// ```rust
    /// use tco_core::money::Dollars;
    ///
    /// assert_eq!(Dollars::new(140_000).thousands(), 140);
    /// assert_eq!(Dollars::new(12_500).thousands(), 13);
    /// ```
    #[inline]
    pub fn thousands(&self) -> i64 {
        (self.0 as f64 / 1000.0).round() as i64
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Dollars) -> Dollars {
        Dollars(self.0.min(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display groups thousands: `$1,234,567`.
///
/// ## Note
/// This is for debugging and log output. The calculator pages do their own
/// locale-aware formatting.
impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}", sign, grouped)
    }
}

impl Add for Dollars {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Dollars(self.0 + other.0)
    }
}

impl AddAssign for Dollars {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Dollars {
    fn sum<I: Iterator<Item = Dollars>>(iter: I) -> Self {
        iter.fold(Dollars::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
