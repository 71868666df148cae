//! Option pricing and implied volatility.
//!
//! This module provides closed-form Black-Scholes-Merton prices and Greeks
//! for European options, a Newton-Raphson inversion from market price to
//! implied volatility, and a Cox-Ross-Rubinstein binomial lattice for
//! European and American exercise.
//!
//! # Overview
//!
//! Implied Volatility (IV) is the option's "price" translated into different units.
//! The price of an option in USD and the IV in % are the same information in different units.
//!
//! # Black-Scholes Inversion
//!
//! Since there's no analytical solution to invert Black-Scholes, we use
//! Newton-Raphson root finding starting from 50% volatility. Quotes the
//! model cannot reproduce (stale, below intrinsic, far out of the money)
//! simply yield no volatility.
//!
//! # Example
//!
//! ```
//! use volsurface_rs::pricing::{
//!     BinomialTree, BlackScholes, ExerciseStyle, OptionParameters, SolverConfig,
//!     implied_volatility,
//! };
//!
//! let model = BlackScholes::new();
//! let params = OptionParameters::put(100.0, 100.0, 1.0, 0.05, 0.2);
//!
//! let european = model.price(&params);
//! let american = BinomialTree::new(500)
//!     .price(&params, ExerciseStyle::American)
//!     .unwrap();
//! assert!(american > european);
//!
//! let iv = implied_volatility(&model, european, &params, &SolverConfig::default()).unwrap();
//! assert!((iv - 0.2).abs() < 1e-4);
//! ```

mod black_scholes;
mod config;
mod error;
mod lattice;
mod solver;
mod types;

pub use black_scholes::BlackScholes;
pub use config::PricingSettings;
pub use error::PricingError;
pub use lattice::{BinomialTree, CrrStep};
pub use solver::{IVSolution, SolverConfig, implied_volatility, solve_iv};
pub use types::{ExerciseStyle, GreeksResult, OptionParameters, OptionType};
