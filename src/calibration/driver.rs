/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Batch calibration of implied volatility and Greeks.
//!
//! This module provides the `CalibrationDriver` which runs the implied
//! volatility solver and the Greeks over a batch of option records on a
//! fixed worker pool. Output position `i` always holds the result for input
//! position `i`.

use super::record::{CalibratedRecord, OptionRecord};
use crate::pricing::{BlackScholes, PricingError, PricingSettings, SolverConfig, implied_volatility};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Configuration for batch calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Root finder settings applied to every record.
    pub solver: SolverConfig,
    /// Pricing conventions.
    pub settings: PricingSettings,
    /// Worker threads in the pool; 0 uses one per available core.
    pub workers: usize,
    /// Batches smaller than this are calibrated on the calling thread.
    pub parallel_threshold: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            settings: PricingSettings::default(),
            workers: 0,
            parallel_threshold: 64,
        }
    }
}

impl CalibrationConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the pricing conventions.
    #[must_use]
    pub fn with_settings(mut self, settings: PricingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the number of worker threads.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the minimum batch size for parallel calibration.
    #[must_use]
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

/// Counts of converged and failed rows in a calibrated batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationSummary {
    /// Rows in the batch.
    pub total: usize,
    /// Rows with an implied volatility.
    pub converged: usize,
    /// Rows without analytics.
    pub failed: usize,
}

impl CalibrationSummary {
    /// Tallies a calibrated batch.
    #[must_use]
    pub fn from_records(records: &[CalibratedRecord]) -> Self {
        let converged = records.iter().filter(|r| r.is_converged()).count();
        Self {
            total: records.len(),
            converged,
            failed: records.len() - converged,
        }
    }

    /// Fraction of rows that converged (0.0 for an empty batch).
    #[must_use]
    pub fn convergence_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.converged as f64 / self.total as f64
        }
    }
}

/// Runs implied volatility and Greeks over batches of option records.
#[derive(Debug)]
pub struct CalibrationDriver {
    config: CalibrationConfig,
    model: BlackScholes,
    pool: ThreadPool,
}

impl CalibrationDriver {
    /// Creates a driver and its worker pool.
    ///
    /// # Errors
    /// [`PricingError::InvalidParams`] if the solver settings are unusable or
    /// the worker pool cannot be built.
    pub fn new(config: CalibrationConfig) -> Result<Self, PricingError> {
        config.solver.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|index| format!("calibration-{index}"))
            .build()
            .map_err(|error| PricingError::InvalidParams {
                message: format!("failed to build calibration pool: {error}"),
            })?;

        info!(
            "Calibration driver started with {} workers",
            pool.current_num_threads()
        );

        Ok(Self {
            config,
            model: BlackScholes::with_settings(config.settings),
            pool,
        })
    }

    /// Driver configuration.
    #[must_use]
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Number of threads in the worker pool.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Calibrates a single record.
    ///
    /// A record with an unrecognized option type or an invalid spot/strike
    /// is returned without analytics, exactly like a record whose solver did
    /// not converge.
    #[must_use]
    pub fn calibrate_record(&self, record: &OptionRecord) -> CalibratedRecord {
        let params = match record.parameters() {
            Ok(params) => params,
            Err(error) => {
                warn!(
                    "Skipping record {} ({}): {}",
                    record.contract_symbol, record.ticker, error
                );
                return CalibratedRecord::failed(record.clone());
            }
        };

        match implied_volatility(&self.model, record.market_price, &params, &self.config.solver) {
            Some(iv) if iv > 0.0 => {
                let greeks = self.model.greeks(&params.with_volatility(iv));
                CalibratedRecord::converged(record.clone(), iv, greeks)
            }
            _ => {
                debug!(
                    "No implied volatility for {} at market price {}",
                    record.contract_symbol, record.market_price
                );
                CalibratedRecord::failed(record.clone())
            }
        }
    }

    /// Calibrates a batch, returning one record per input in input order.
    ///
    /// Never fails: an empty batch yields an empty result and per-row
    /// failures leave that row's analytics empty.
    #[must_use]
    pub fn calibrate(&self, records: &[OptionRecord]) -> Vec<CalibratedRecord> {
        if records.is_empty() {
            return Vec::new();
        }

        info!("Calculating analytics for {} options", records.len());

        let mut output = Vec::with_capacity(records.len());
        if records.len() < self.config.parallel_threshold {
            output.extend(records.iter().map(|record| self.calibrate_record(record)));
        } else {
            self.pool.install(|| {
                records
                    .par_iter()
                    .map(|record| self.calibrate_record(record))
                    .collect_into_vec(&mut output);
            });
        }

        let summary = CalibrationSummary::from_records(&output);
        info!(
            "Calibration complete: {} of {} converged",
            summary.converged, summary.total
        );
        output
    }

    /// Tallies a calibrated batch.
    #[must_use]
    pub fn summarize(records: &[CalibratedRecord]) -> CalibrationSummary {
        CalibrationSummary::from_records(records)
    }
}
