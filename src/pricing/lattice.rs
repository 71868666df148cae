//! Cox-Ross-Rubinstein binomial lattice.
//!
//! Prices European and American vanilla options by backward induction over a
//! recombining tree. Cost is O(N²) in the number of steps with a single
//! N+1 buffer rewritten in place at every time slice.

use super::config::PricingSettings;
use super::error::PricingError;
use super::types::{ExerciseStyle, OptionParameters};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Per-step parameters of a CRR tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrStep {
    /// Length of one step in years.
    pub dt: f64,
    /// Up factor e^(σ√dt).
    pub up: f64,
    /// Down factor 1/u.
    pub down: f64,
    /// Risk-neutral probability of an up move.
    pub probability: f64,
    /// One-step discount factor e^(-r·dt).
    pub discount: f64,
}

impl CrrStep {
    /// Derives the tree parameters for `params` split into `steps` steps.
    #[must_use]
    pub fn new(params: &OptionParameters, steps: usize, vol_floor: f64) -> Self {
        let vol = if params.volatility > 0.0 {
            params.volatility
        } else {
            vol_floor
        };
        let dt = params.time_to_expiry / steps as f64;
        let up = (vol * dt.sqrt()).exp();
        let down = 1.0 / up;
        let probability = ((params.risk_free_rate * dt).exp() - down) / (up - down);
        let discount = (-params.risk_free_rate * dt).exp();

        Self {
            dt,
            up,
            down,
            probability,
            discount,
        }
    }
}

/// Cox-Ross-Rubinstein binomial tree pricer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinomialTree {
    /// Number of time steps (N).
    steps: usize,
}

impl BinomialTree {
    /// Creates a tree with the given number of steps.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Number of time steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Prices the option by backward induction.
    ///
    /// Terminal node `i` (number of down moves) carries the payoff at
    /// `S·u^(N−i)·d^i`. Each earlier node takes the discounted risk-neutral
    /// expectation of its two children; American nodes also compare against
    /// immediate exercise.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidParams`] when the tree has zero steps.
    pub fn price(
        &self,
        params: &OptionParameters,
        style: ExerciseStyle,
    ) -> Result<f64, PricingError> {
        if self.steps == 0 {
            return Err(PricingError::InvalidParams {
                message: "binomial steps must be > 0".to_string(),
            });
        }

        if params.time_to_expiry <= 0.0 {
            return Ok(params.intrinsic_value());
        }

        let n = self.steps;
        let step = CrrStep::new(params, n, PricingSettings::DEFAULT.vol_floor);
        let p = step.probability;
        let disc_p = step.discount * p;
        let disc_1mp = step.discount * (1.0 - p);
        // Moving one node down a slice multiplies the spot by d/u.
        let ratio = step.down / step.up;

        let mut values = vec![0.0_f64; n + 1];
        let mut spot = params.spot * step.up.powi(n as i32);
        for value in values.iter_mut() {
            *value = params.intrinsic_at(spot);
            spot *= ratio;
        }

        match style {
            ExerciseStyle::European => {
                for slice in (0..n).rev() {
                    for i in 0..=slice {
                        values[i] = disc_p * values[i] + disc_1mp * values[i + 1];
                    }
                }
            }
            ExerciseStyle::American => {
                for slice in (0..n).rev() {
                    let mut spot = params.spot * step.up.powi(slice as i32);
                    for i in 0..=slice {
                        let continuation = disc_p * values[i] + disc_1mp * values[i + 1];
                        values[i] = continuation.max(params.intrinsic_at(spot));
                        spot *= ratio;
                    }
                }
            }
        }

        trace!(
            "binomial {:?} {} N={} p={} -> {}",
            style, params.option_type, n, p, values[0]
        );
        Ok(values[0])
    }

    /// American price minus European price for the same contract.
    ///
    /// # Errors
    /// Same as [`BinomialTree::price`].
    pub fn early_exercise_premium(&self, params: &OptionParameters) -> Result<f64, PricingError> {
        let american = self.price(params, ExerciseStyle::American)?;
        let european = self.price(params, ExerciseStyle::European)?;
        Ok(american - european)
    }
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self::new(500)
    }
}
