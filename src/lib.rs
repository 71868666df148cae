//! # volsurface-rs
//!
//! Option pricing and calibration engine behind volatility surface analytics.
//!
//! - [`pricing`]: Black-Scholes-Merton prices and Greeks, Newton-Raphson
//!   implied volatility, and a Cox-Ross-Rubinstein binomial lattice with
//!   European and American exercise.
//! - [`calibration`]: an order-preserving parallel driver that solves implied
//!   volatility and Greeks for batches of option records, plus the analytics
//!   snapshot and smile/term-structure views built from its output.
//!
//! All pricing functions are pure and safe to call from many threads. The
//! calibration driver owns a fixed worker pool and always returns results in
//! input order.
//!
//! ```
//! use volsurface_rs::prelude::*;
//!
//! let driver = CalibrationDriver::new(CalibrationConfig::default()).unwrap();
//! let records = vec![
//!     OptionRecord::new("SPY", 100.0, 100.0, 1.0, 0.05, "call", 10.4506),
//!     OptionRecord::new("SPY", 100.0, 100.0, 1.0, 0.05, "call", -1.0),
//! ];
//!
//! let calibrated = driver.calibrate(&records);
//! assert!((calibrated[0].calc_iv.unwrap() - 0.2).abs() < 1e-3);
//! assert!(calibrated[1].calc_iv.is_none());
//! ```

#![warn(missing_docs)]

pub mod calibration;
pub mod pricing;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::calibration::{
        AnalyticsSnapshot, AnalyticsSnapshotPackage, CalibratedRecord, CalibrationConfig,
        CalibrationDriver, CalibrationSummary, OptionRecord, term_structure, volatility_smile,
    };
    pub use crate::pricing::{
        BinomialTree, BlackScholes, ExerciseStyle, GreeksResult, IVSolution, OptionParameters,
        OptionType, PricingError, PricingSettings, SolverConfig, implied_volatility, solve_iv,
    };
}
