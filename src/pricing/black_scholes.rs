//! Black-Scholes-Merton pricing model and Greeks calculation.
//!
//! Closed-form prices and sensitivities for European options under constant
//! volatility and risk-free rate, without a dividend yield.

use super::config::PricingSettings;
use super::types::{GreeksResult, OptionParameters, OptionType};
use std::f64::consts::PI;
use tracing::trace;

/// Square root of 2, precomputed for efficiency.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Quantities of the closed form shared by the price and every Greek.
#[derive(Debug, Clone, Copy)]
struct D1D2Terms {
    d1: f64,
    d2: f64,
    vol: f64,
    sqrt_time: f64,
    /// e^(-rT)
    discount: f64,
    cdf_d1: f64,
    cdf_d2: f64,
    pdf_d1: f64,
}

/// Black-Scholes-Merton pricing model implementation.
///
/// Provides methods for calculating option prices and Greeks
/// using the Black-Scholes-Merton formula. The model carries its
/// [`PricingSettings`] so the volatility floor and unit conventions
/// are explicit rather than process-wide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlackScholes {
    settings: PricingSettings,
}

impl BlackScholes {
    /// Model with the default conventions.
    pub const STANDARD: Self = Self {
        settings: PricingSettings::DEFAULT,
    };

    /// Creates a model with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model with custom settings.
    #[must_use]
    pub fn with_settings(settings: PricingSettings) -> Self {
        Self { settings }
    }

    /// Settings used by this model.
    #[must_use]
    pub fn settings(&self) -> &PricingSettings {
        &self.settings
    }

    /// Approximation of the error function (erf).
    ///
    /// Uses Abramowitz and Stegun approximation (formula 7.1.26)
    /// with maximum error of 1.5×10⁻⁷. The approximation is odd, so
    /// `norm_cdf(x) + norm_cdf(-x) == 1` up to rounding.
    ///
    /// # Arguments
    /// - `x`: Input value
    ///
    /// # Returns
    /// Approximation of erf(x)
    #[must_use]
    pub fn erf(x: f64) -> f64 {
        // Constants for the approximation
        const A1: f64 = 0.254829592;
        const A2: f64 = -0.284496736;
        const A3: f64 = 1.421413741;
        const A4: f64 = -1.453152027;
        const A5: f64 = 1.061405429;
        const P: f64 = 0.3275911;

        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        let x = x.abs();

        let t = 1.0 / (1.0 + P * x);
        let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

        sign * y
    }

    /// Standard normal cumulative distribution function (CDF).
    ///
    /// Calculates P(Z ≤ x) where Z is a standard normal random variable.
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + Self::erf(x / SQRT_2))
    }

    /// Standard normal probability density function (PDF).
    #[must_use]
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    ///
    /// # Arguments
    /// - `spot`: Current underlying price (S)
    /// - `strike`: Option strike price (K)
    /// - `rate`: Risk-free interest rate (r)
    /// - `time`: Time to expiration in years (T)
    /// - `vol`: Volatility (σ)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Computes d1, d2 and the distribution values once for a given input.
    ///
    /// Returns `None` at or past expiry, where the closed form does not apply.
    fn terms(&self, params: &OptionParameters) -> Option<D1D2Terms> {
        if params.time_to_expiry <= 0.0 {
            return None;
        }

        let vol = self.settings.floor_volatility(params.volatility);
        let time = params.time_to_expiry;
        let sqrt_time = time.sqrt();
        let d1 = Self::d1(params.spot, params.strike, params.risk_free_rate, time, vol);
        let d2 = d1 - vol * sqrt_time;

        Some(D1D2Terms {
            d1,
            d2,
            vol,
            sqrt_time,
            discount: (-params.risk_free_rate * time).exp(),
            cdf_d1: Self::norm_cdf(d1),
            cdf_d2: Self::norm_cdf(d2),
            pdf_d1: Self::norm_pdf(d1),
        })
    }

    /// Calculates the theoretical option price using Black-Scholes formula.
    ///
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// At or past expiry the price is the intrinsic value, independent of
    /// rate and volatility.
    #[must_use]
    pub fn price(&self, params: &OptionParameters) -> f64 {
        let Some(terms) = self.terms(params) else {
            return params.intrinsic_value();
        };

        let price = match params.option_type {
            OptionType::Call => {
                params.spot * terms.cdf_d1 - params.strike * terms.discount * terms.cdf_d2
            }
            OptionType::Put => {
                params.strike * terms.discount * Self::norm_cdf(-terms.d2)
                    - params.spot * Self::norm_cdf(-terms.d1)
            }
        };
        trace!(
            "price: {} S={} K={} T={} sigma={} -> {}",
            params.option_type, params.spot, params.strike, params.time_to_expiry, terms.vol, price
        );
        price
    }

    /// Calculates all five Greeks in one pass.
    ///
    /// All Greeks are zero at or past expiry.
    #[must_use]
    pub fn greeks(&self, params: &OptionParameters) -> GreeksResult {
        let Some(terms) = self.terms(params) else {
            return GreeksResult::zero();
        };

        let spot = params.spot;
        let strike = params.strike;
        let rate = params.risk_free_rate;
        let time = params.time_to_expiry;
        let scale = self.settings.percent_scale;

        let gamma = terms.pdf_d1 / (spot * terms.vol * terms.sqrt_time);
        let vega = spot * terms.pdf_d1 * terms.sqrt_time * scale;
        let decay = -(spot * terms.pdf_d1 * terms.vol) / (2.0 * terms.sqrt_time);

        let (delta, theta_annual, rho) = match params.option_type {
            OptionType::Call => (
                terms.cdf_d1,
                decay - rate * strike * terms.discount * terms.cdf_d2,
                strike * time * terms.discount * terms.cdf_d2 * scale,
            ),
            OptionType::Put => {
                let cdf_neg_d2 = Self::norm_cdf(-terms.d2);
                (
                    terms.cdf_d1 - 1.0,
                    decay + rate * strike * terms.discount * cdf_neg_d2,
                    -strike * time * terms.discount * cdf_neg_d2 * scale,
                )
            }
        };

        GreeksResult {
            delta,
            gamma,
            vega,
            theta: theta_annual / self.settings.days_per_year,
            rho,
        }
    }

    /// Delta (∂price/∂S). Calls: N(d1), puts: N(d1) - 1.
    #[must_use]
    pub fn delta(&self, params: &OptionParameters) -> f64 {
        self.greeks(params).delta
    }

    /// Gamma (∂²price/∂S²), identical for calls and puts.
    #[must_use]
    pub fn gamma(&self, params: &OptionParameters) -> f64 {
        self.greeks(params).gamma
    }

    /// Vega per 1% volatility move.
    ///
    /// Divide by [`PricingSettings::percent_scale`] for the raw ∂price/∂σ.
    #[must_use]
    pub fn vega(&self, params: &OptionParameters) -> f64 {
        self.greeks(params).vega
    }

    /// Theta per calendar day.
    #[must_use]
    pub fn theta(&self, params: &OptionParameters) -> f64 {
        self.greeks(params).theta
    }

    /// Rho per 1% rate move.
    #[must_use]
    pub fn rho(&self, params: &OptionParameters) -> f64 {
        self.greeks(params).rho
    }
}
