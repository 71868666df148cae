//! End-to-end walk through the pricing and calibration API.
//!
//! This example shows how to:
//! 1. Price an option and read its Greeks
//! 2. Recover the implied volatility from a market quote and reprice it
//! 3. Calibrate a small option chain in parallel, keeping row order
//! 4. Build smile and term-structure views and package an analytics snapshot

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use volsurface_rs::calibration::surface::{DEFAULT_ATM_BAND, DEFAULT_SMILE_EXPIRATIONS};
use volsurface_rs::prelude::*;

fn synthetic_chain(model: &BlackScholes) -> Vec<OptionRecord> {
    let expirations = [
        ("2026-11-20", 35.0 / 365.25),
        ("2026-12-18", 63.0 / 365.25),
        ("2027-03-19", 154.0 / 365.25),
    ];
    let mut records = Vec::new();
    for (expiration, time) in expirations {
        for strike in [170.0, 180.0, 185.0, 190.0, 195.0, 200.0, 210.0] {
            for option_type in [OptionType::Call, OptionType::Put] {
                let skew = (187.5 - strike) * 0.002;
                let vol = 0.24 + skew + time * 0.02;
                let params = OptionParameters::new(187.5, strike, time, 0.043, vol, option_type);
                records.push(
                    OptionRecord::new(
                        "AAPL",
                        187.5,
                        strike,
                        time,
                        0.043,
                        &option_type.to_string(),
                        model.price(&params),
                    )
                    .with_expiration(expiration),
                );
            }
        }
    }
    // A stale quote below intrinsic value cannot be matched by any volatility.
    records.push(
        OptionRecord::new("AAPL", 187.5, 150.0, 35.0 / 365.25, 0.043, "call", 20.0)
            .with_expiration("2026-11-20"),
    );
    records
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let model = BlackScholes::new();

    info!("=== Single option ===");
    let put = OptionParameters::put(187.5, 180.0, 45.0 / 365.25, 0.043, 0.0);
    let market_price = 3.85;
    let solution = solve_iv(&model, market_price, &put, &SolverConfig::default())?;
    let priced = put.with_volatility(solution.iv);
    info!(
        "IV {:.2}% after {} iterations, repriced at {:.6} (market {:.2})",
        solution.iv_percent(),
        solution.iterations,
        model.price(&priced),
        market_price
    );
    let greeks = model.greeks(&priced);
    info!(
        "delta {:.4} gamma {:.4} vega {:.4} theta {:.4} rho {:.4}",
        greeks.delta, greeks.gamma, greeks.vega, greeks.theta, greeks.rho
    );

    let tree = BinomialTree::default();
    let american = tree.price(&priced, ExerciseStyle::American)?;
    info!(
        "American value {:.6}, early-exercise premium {:.6}",
        american,
        american - model.price(&priced)
    );

    info!("=== Chain calibration ===");
    let records = synthetic_chain(&model);
    let driver = CalibrationDriver::new(CalibrationConfig::new().with_workers(4))?;
    info!("Driver config: {}", serde_json::to_string(driver.config())?);
    let calibrated = driver.calibrate(&records);
    let summary = CalibrationDriver::summarize(&calibrated);
    info!(
        "{} rows on {} workers: {} converged, {} failed ({:.1}%)",
        summary.total,
        driver.workers(),
        summary.converged,
        summary.failed,
        summary.convergence_rate() * 100.0
    );
    for row in calibrated.iter().filter(|row| !row.is_converged()) {
        warn!(
            "no IV for {} {} K={} at {:.2}",
            row.record.ticker, row.record.option_type, row.record.strike, row.record.market_price
        );
    }

    info!("=== Surface views ===");
    for slice in volatility_smile(&calibrated, "AAPL", DEFAULT_SMILE_EXPIRATIONS) {
        let ivs: Vec<String> = slice
            .points
            .iter()
            .filter(|point| point.option_type == OptionType::Call)
            .map(|point| format!("{}:{:.1}%", point.strike, point.iv * 100.0))
            .collect();
        info!("{} (T={:.3}) {}", slice.expiration, slice.time_to_expiry, ivs.join(" "));
    }
    if let Some(term) = term_structure(&calibrated, "AAPL", DEFAULT_ATM_BAND) {
        for (time, iv) in &term.average {
            info!("T={time:.3} average near-the-money IV {:.2}%", iv * 100.0);
        }
    }

    info!("=== Snapshot ===");
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let snapshot = AnalyticsSnapshot::new("analytics_data", timestamp, calibrated);
    let json = AnalyticsSnapshotPackage::new(snapshot)?.to_json()?;
    info!("Snapshot JSON is {} bytes", json.len());

    let restored = AnalyticsSnapshotPackage::from_json(&json)?.into_snapshot()?;
    info!(
        "Restored {} rows for tickers {:?}",
        restored.len(),
        restored.tickers()
    );

    Ok(())
}
