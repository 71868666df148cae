//! Types shared by the analytic pricer, the root finder and the lattice.

use super::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl OptionType {
    /// Payoff of the option if exercised at `spot`.
    #[must_use]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Parses the `type` column of curated option records. Only the exact
/// lowercase values `"call"` and `"put"` are accepted.
impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(PricingError::InvalidArgument {
                message: format!("option type must be 'call' or 'put', got '{other}'"),
            }),
        }
    }
}

/// Exercise style, only meaningful for the lattice pricer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseStyle {
    /// Exercise at expiry only.
    #[default]
    European,
    /// Exercise at any time up to expiry.
    American,
}

/// Contract and market inputs for pricing a vanilla option.
///
/// Values are immutable once built; use [`OptionParameters::with_volatility`]
/// to derive a copy at a different volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    /// Underlying spot price (S), must be positive.
    pub spot: f64,
    /// Option strike price (K), must be positive.
    pub strike: f64,
    /// Time to expiration in years (T). Zero means expiring now.
    pub time_to_expiry: f64,
    /// Continuously-compounded risk-free rate (r), e.g. 0.05 for 5%.
    pub risk_free_rate: f64,
    /// Annualized volatility (σ), e.g. 0.2 for 20%.
    pub volatility: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

impl OptionParameters {
    /// Creates new option parameters.
    ///
    /// # Arguments
    /// - `spot`: Underlying spot price
    /// - `strike`: Option strike price
    /// - `time_to_expiry`: Time to expiration in years
    /// - `risk_free_rate`: Risk-free interest rate (annualized, continuous)
    /// - `volatility`: Annualized volatility
    /// - `option_type`: Call or Put
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        }
    }

    /// Creates parameters for a call option.
    #[must_use]
    pub fn call(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option.
    #[must_use]
    pub fn put(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            OptionType::Put,
        )
    }

    /// Returns a copy of these parameters with a different volatility.
    #[must_use]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Returns a copy of these parameters with a different option type.
    #[must_use]
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Calculates the intrinsic value of the option at the current spot.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type.payoff(self.spot, self.strike)
    }

    /// Intrinsic value of the option if the underlying traded at `spot`.
    #[must_use]
    pub fn intrinsic_at(&self, spot: f64) -> f64 {
        self.option_type.payoff(spot, self.strike)
    }

    /// Returns true if the option is in-the-money.
    #[must_use]
    pub fn is_itm(&self) -> bool {
        self.intrinsic_value() > 0.0
    }

    /// Returns true if the option is at-the-money (within 0.1% of strike).
    #[must_use]
    pub fn is_atm(&self) -> bool {
        (self.spot - self.strike).abs() / self.strike < 0.001
    }

    /// Returns true if the option is out-of-the-money.
    #[must_use]
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm()
    }
}

/// First and second order sensitivities of a European option.
///
/// Unit conventions:
/// - `vega` is the price change for a 1 percentage point move in volatility
/// - `theta` is the price change per calendar day
/// - `rho` is the price change for a 1 percentage point move in the rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    /// ∂price/∂S.
    pub delta: f64,
    /// ∂²price/∂S².
    pub gamma: f64,
    /// ∂price/∂σ, scaled to 1%.
    pub vega: f64,
    /// ∂price/∂t, per day.
    pub theta: f64,
    /// ∂price/∂r, scaled to 1%.
    pub rho: f64,
}

impl GreeksResult {
    /// All sensitivities set to zero (expired option).
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}
