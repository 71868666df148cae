use volsurface_rs::calibration::surface::DEFAULT_ATM_BAND;
use volsurface_rs::prelude::*;

fn chain() -> Vec<OptionRecord> {
    let model = BlackScholes::new();
    let mut records = Vec::new();
    for (expiration, time) in [("2026-11-20", 35.0 / 365.25), ("2027-01-15", 91.0 / 365.25)] {
        for strike in [90.0, 95.0, 100.0, 105.0, 110.0] {
            for option_type in [OptionType::Call, OptionType::Put] {
                // Simple skew: lower strikes carry more volatility.
                let vol = 0.20 + (100.0 - strike) * 0.004;
                let params = OptionParameters::new(100.0, strike, time, 0.04, vol, option_type);
                let price = model.price(&params);
                records.push(
                    OptionRecord::new(
                        "SPY",
                        100.0,
                        strike,
                        time,
                        0.04,
                        &option_type.to_string(),
                        price,
                    )
                    .with_expiration(expiration)
                    .with_contract_symbol(&format!("SPY-{expiration}-{option_type}-{strike}")),
                );
            }
        }
    }
    records
}

fn driver() -> CalibrationDriver {
    CalibrationDriver::new(
        CalibrationConfig::new()
            .with_workers(2)
            .with_parallel_threshold(4),
    )
    .unwrap()
}

#[test]
fn test_chain_calibration_recovers_skew() {
    let records = chain();
    let output = driver().calibrate(&records);

    assert_eq!(output.len(), records.len());
    for (input, row) in records.iter().zip(&output) {
        assert_eq!(&row.record, input);
        let expected = 0.20 + (100.0 - input.strike) * 0.004;
        let iv = row.calc_iv.expect("synthetic quotes should converge");
        assert!((iv - expected).abs() < 1e-4);
        assert!(row.greeks().is_some());
    }
    assert_eq!(CalibrationDriver::summarize(&output).failed, 0);
}

#[test]
fn test_failed_rows_keep_position() {
    let mut records = chain();
    records[3].market_price = -2.0;
    records[7].option_type = "strangle".to_string();
    records[11].spot = 0.0;

    let output = driver().calibrate(&records);
    for (i, row) in output.iter().enumerate() {
        let should_fail = matches!(i, 3 | 7 | 11);
        assert_eq!(row.is_converged(), !should_fail, "row {i}");
        assert_eq!(row.record, records[i]);
        if should_fail {
            assert!(row.delta.is_none() && row.gamma.is_none() && row.vega.is_none());
            assert!(row.theta.is_none() && row.rho.is_none());
        }
    }
}

#[test]
fn test_empty_input_returns_empty_output() {
    assert!(driver().calibrate(&[]).is_empty());
}

#[test]
fn test_snapshot_and_views_from_calibrated_chain() {
    let output = driver().calibrate(&chain());
    let snapshot = AnalyticsSnapshot::new("analytics_data", 0, output);

    let package = AnalyticsSnapshotPackage::new(snapshot.clone()).unwrap();
    let restored = AnalyticsSnapshotPackage::from_json(&package.to_json().unwrap())
        .unwrap()
        .into_snapshot()
        .unwrap();
    assert_eq!(restored.len(), snapshot.len());
    assert_eq!(restored.tickers(), vec!["SPY".to_string()]);

    let smile = volatility_smile(&restored.records, "SPY", 4);
    assert_eq!(smile.len(), 2);
    assert_eq!(smile[0].points.len(), 10);
    // Skewed input: the lowest strike carries the highest IV.
    assert!(smile[0].points[0].iv > smile[0].points[9].iv);

    let term = term_structure(&restored.records, "SPY", DEFAULT_ATM_BAND).unwrap();
    assert_eq!(term.average.len(), 2);
    assert!(term.average[0].0 < term.average[1].0);
}

#[test]
fn test_snapshot_with_missing_spot_loads_back() {
    let mut records = chain();
    records[4].spot = f64::NAN;
    records[9].market_price = f64::NAN;

    let output = driver().calibrate(&records);
    assert!(!output[4].is_converged());
    assert!(!output[9].is_converged());

    let snapshot = AnalyticsSnapshot::new("analytics_data", 0, output);
    let package = AnalyticsSnapshotPackage::new(snapshot).unwrap();
    let restored = AnalyticsSnapshotPackage::from_json(&package.to_json().unwrap())
        .unwrap()
        .into_snapshot()
        .unwrap();

    assert_eq!(restored.len(), records.len());
    assert!(restored.records[4].record.spot.is_nan());
    assert!(restored.records[9].record.market_price.is_nan());
    assert_eq!(restored.records[0], package.snapshot.records[0]);
    assert_eq!(CalibrationDriver::summarize(&restored.records).failed, 2);
}
