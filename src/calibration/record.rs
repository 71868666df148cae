//! Option records exchanged with the data and storage layers.

use crate::pricing::{GreeksResult, OptionParameters, OptionType, PricingError};
use serde::{Deserialize, Deserializer, Serialize};

/// Reads a JSON `null` as NaN.
///
/// serde_json writes non-finite floats as `null`, so a row whose quote fetch
/// failed must still load back from a persisted table.
fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// One row of the curated option table.
///
/// Only `spot`, `strike`, `time_to_expiry`, `risk_free_rate`, `option_type`
/// and `market_price` are read by the calibration; the remaining fields are
/// carried through untouched for persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// Underlying ticker (e.g. "SPY").
    pub ticker: String,
    /// Underlying spot price.
    #[serde(rename = "S", deserialize_with = "nan_if_null")]
    pub spot: f64,
    /// Strike price.
    #[serde(rename = "K", deserialize_with = "nan_if_null")]
    pub strike: f64,
    /// Time to expiration in years.
    #[serde(rename = "T", deserialize_with = "nan_if_null")]
    pub time_to_expiry: f64,
    /// Risk-free rate (decimal).
    #[serde(rename = "r", deserialize_with = "nan_if_null")]
    pub risk_free_rate: f64,
    /// Raw option type as delivered by the data layer ("call" / "put").
    #[serde(rename = "type")]
    pub option_type: String,
    /// Observed option price.
    #[serde(deserialize_with = "nan_if_null")]
    pub market_price: f64,
    /// Exchange contract symbol.
    #[serde(default)]
    pub contract_symbol: String,
    /// Traded volume, if reported. Kept as a float because the data layer
    /// stores gappy integer columns as floats.
    #[serde(default)]
    pub volume: Option<f64>,
    /// Open interest, if reported.
    #[serde(default)]
    pub open_interest: Option<f64>,
    /// Implied volatility published by the quote source.
    #[serde(default)]
    pub market_iv: Option<f64>,
    /// Expiration date, ISO-8601 (`YYYY-MM-DD`).
    #[serde(default)]
    pub expiration: String,
    /// Fetch timestamp (milliseconds since epoch).
    #[serde(default)]
    pub fetched_at: u64,
}

impl OptionRecord {
    /// Creates a record with the fields the calibration consumes.
    #[must_use]
    pub fn new(
        ticker: &str,
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: &str,
        market_price: f64,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type: option_type.to_string(),
            market_price,
            ..Self::default()
        }
    }

    /// Sets the expiration date.
    #[must_use]
    pub fn with_expiration(mut self, expiration: &str) -> Self {
        self.expiration = expiration.to_string();
        self
    }

    /// Sets the contract symbol.
    #[must_use]
    pub fn with_contract_symbol(mut self, contract_symbol: &str) -> Self {
        self.contract_symbol = contract_symbol.to_string();
        self
    }

    /// Parsed option type.
    ///
    /// # Errors
    /// [`PricingError::InvalidArgument`] when the type is neither call nor put.
    pub fn parsed_type(&self) -> Result<OptionType, PricingError> {
        self.option_type.parse()
    }

    /// Pricing parameters for this record, with volatility left at zero.
    ///
    /// # Errors
    /// - [`PricingError::InvalidArgument`] for an unrecognized option type
    /// - [`PricingError::InvalidParams`] for a non-positive or non-finite spot or strike
    pub fn parameters(&self) -> Result<OptionParameters, PricingError> {
        let option_type = self.parsed_type()?;

        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(PricingError::InvalidParams {
                message: format!("spot price must be positive, got {}", self.spot),
            });
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(PricingError::InvalidParams {
                message: format!("strike price must be positive, got {}", self.strike),
            });
        }

        Ok(OptionParameters::new(
            self.spot,
            self.strike,
            self.time_to_expiry,
            self.risk_free_rate,
            0.0,
            option_type,
        ))
    }
}

/// An [`OptionRecord`] augmented with its implied volatility and Greeks.
///
/// The analytics are either all present or all absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedRecord {
    /// The input row, unchanged.
    #[serde(flatten)]
    pub record: OptionRecord,
    /// Solved implied volatility.
    pub calc_iv: Option<f64>,
    /// Delta at `calc_iv`.
    pub delta: Option<f64>,
    /// Gamma at `calc_iv`.
    pub gamma: Option<f64>,
    /// Vega (per 1%) at `calc_iv`.
    pub vega: Option<f64>,
    /// Theta (per day) at `calc_iv`.
    pub theta: Option<f64>,
    /// Rho (per 1%) at `calc_iv`.
    pub rho: Option<f64>,
}

impl CalibratedRecord {
    /// A record whose volatility was solved.
    #[must_use]
    pub fn converged(record: OptionRecord, iv: f64, greeks: GreeksResult) -> Self {
        Self {
            record,
            calc_iv: Some(iv),
            delta: Some(greeks.delta),
            gamma: Some(greeks.gamma),
            vega: Some(greeks.vega),
            theta: Some(greeks.theta),
            rho: Some(greeks.rho),
        }
    }

    /// A record with no analytics.
    #[must_use]
    pub fn failed(record: OptionRecord) -> Self {
        Self {
            record,
            calc_iv: None,
            delta: None,
            gamma: None,
            vega: None,
            theta: None,
            rho: None,
        }
    }

    /// Returns true if analytics are present.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.calc_iv.is_some()
    }

    /// The Greeks, when present.
    #[must_use]
    pub fn greeks(&self) -> Option<GreeksResult> {
        Some(GreeksResult {
            delta: self.delta?,
            gamma: self.gamma?,
            vega: self.vega?,
            theta: self.theta?,
            rho: self.rho?,
        })
    }
}
