//! Numerical conventions shared by the pricer and the Greeks.

use serde::{Deserialize, Serialize};

/// Immutable numerical settings for the analytic pricer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Volatility used in place of any non-positive input.
    pub vol_floor: f64,
    /// Calendar days per year used to express theta per day.
    pub days_per_year: f64,
    /// Scale applied to vega and rho to express them per 1% move.
    pub percent_scale: f64,
}

impl PricingSettings {
    /// Default conventions: σ floor 1e-6, 365.25 days, 1% scaling.
    pub const DEFAULT: Self = Self {
        vol_floor: 1e-6,
        days_per_year: 365.25,
        percent_scale: 0.01,
    };

    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the volatility floor.
    #[must_use]
    pub fn with_vol_floor(mut self, vol_floor: f64) -> Self {
        self.vol_floor = vol_floor;
        self
    }

    /// Sets the day count used for theta.
    #[must_use]
    pub fn with_days_per_year(mut self, days_per_year: f64) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    /// Replaces a non-positive (or NaN) volatility by the floor.
    #[must_use]
    pub fn floor_volatility(&self, vol: f64) -> f64 {
        if vol > 0.0 { vol } else { self.vol_floor }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
