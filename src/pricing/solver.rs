//! Newton-Raphson solver for implied volatility calculation.
//!
//! This module provides a numerical solver to find the implied volatility
//! that makes the Black-Scholes price equal to the observed market price.
//! Failing to converge is an expected outcome for stale or mispriced quotes
//! and is reported as a value, never as a panic.

use super::black_scholes::BlackScholes;
use super::error::PricingError;
use super::types::OptionParameters;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance on |model price - market price|.
    pub tolerance: f64,
    /// Starting volatility (default: 0.5 = 50%).
    pub initial_guess: f64,
    /// Lower clamp applied after each Newton step (default: 0.001 = 0.1%).
    pub min_iv: f64,
    /// Upper clamp applied after each Newton step (default: 5.0 = 500%).
    pub max_iv: f64,
    /// Factor applied to the estimate when vega is exactly zero.
    pub zero_vega_shrink: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            initial_guess: 0.5,
            min_iv: 1e-3,
            max_iv: 5.0,
            zero_vega_shrink: 0.99,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the initial IV guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the IV bounds.
    #[must_use]
    pub fn with_bounds(mut self, min_iv: f64, max_iv: f64) -> Self {
        self.min_iv = min_iv;
        self.max_iv = max_iv;
        self
    }

    /// Checks that the settings describe a usable search.
    ///
    /// # Errors
    /// [`PricingError::InvalidParams`] when the bounds are not finite and
    /// positive with `min_iv <= max_iv`, or the tolerance is not positive.
    pub fn validate(&self) -> Result<(), PricingError> {
        let bounds_ok = self.min_iv.is_finite()
            && self.max_iv.is_finite()
            && self.min_iv > 0.0
            && self.min_iv <= self.max_iv;
        if !bounds_ok {
            return Err(PricingError::InvalidParams {
                message: format!(
                    "volatility bounds must satisfy 0 < min <= max, got [{}, {}]",
                    self.min_iv, self.max_iv
                ),
            });
        }
        if !(self.tolerance > 0.0) {
            return Err(PricingError::InvalidParams {
                message: format!("tolerance must be positive, got {}", self.tolerance),
            });
        }
        Ok(())
    }
}

/// A converged implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVSolution {
    /// Implied volatility (e.g. 0.25 = 25%).
    pub iv: f64,
    /// Number of pricer evaluations used, including the converging one.
    pub iterations: u32,
}

impl IVSolution {
    /// Returns the IV as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn iv_percent(&self) -> f64 {
        self.iv * 100.0
    }
}

/// Solves for implied volatility using the Newton-Raphson method.
///
/// Each iteration prices the option at the current estimate and compares it
/// to `market_price`:
/// - converged when |price - market_price| < tolerance
/// - when vega is exactly zero the estimate shrinks by 1% and no clamp is applied
/// - otherwise σ_{n+1} = σ_n - (BS(σ_n) - market_price) / vega(σ_n),
///   clamped to `[min_iv, max_iv]`
///
/// The volatility in `params` is ignored.
///
/// # Returns
/// - `Ok(IVSolution)`: converged IV and number of iterations
/// - `Err(PricingError::NonConvergence)`: budget exhausted, with
///   `iterations == config.max_iterations`
///
/// # Example
/// ```
/// use volsurface_rs::prelude::*;
///
/// let model = BlackScholes::new();
/// let params = OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2);
/// let market_price = model.price(&params);
///
/// let solution = solve_iv(&model, market_price, &params, &SolverConfig::default()).unwrap();
/// assert!((solution.iv - 0.2).abs() < 1e-4);
/// ```
pub fn solve_iv(
    model: &BlackScholes,
    market_price: f64,
    params: &OptionParameters,
    config: &SolverConfig,
) -> Result<IVSolution, PricingError> {
    let percent_scale = model.settings().percent_scale;
    let mut iv = config.initial_guess;
    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        iterations += 1;
        let trial = params.with_volatility(iv);
        let price_guess = model.price(&trial);
        let vega = model.vega(&trial) / percent_scale;
        let diff = price_guess - market_price;
        trace!("iteration {iterations}: iv={iv} price={price_guess} diff={diff} vega={vega}");

        if diff.abs() < config.tolerance {
            debug!("solver converged: iv={iv} after {iterations} iterations");
            return Ok(IVSolution { iv, iterations });
        }

        if vega == 0.0 {
            iv *= config.zero_vega_shrink;
            continue;
        }

        // Inverted bounds must not panic inside a worker.
        iv = (iv - diff / vega).max(config.min_iv).min(config.max_iv);
    }

    debug!("solver did not converge after {iterations} iterations, last iv={iv}");
    Err(PricingError::NonConvergence {
        iterations,
        last_iv: iv,
    })
}

/// Implied volatility for `market_price`, or `None` when the solver does
/// not converge within the iteration budget.
///
/// This is the contract used by the calibration driver: non-convergence is
/// a normal outcome for illiquid or stale quotes.
#[must_use]
pub fn implied_volatility(
    model: &BlackScholes,
    market_price: f64,
    params: &OptionParameters,
    config: &SolverConfig,
) -> Option<f64> {
    solve_iv(model, market_price, params, config)
        .ok()
        .map(|solution| solution.iv)
}
