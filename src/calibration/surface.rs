//! Volatility smile and term-structure series extracted from calibrated rows.
//!
//! These are the data behind the two dashboard views; rendering is left to
//! the caller.

use super::record::CalibratedRecord;
use crate::pricing::OptionType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of expirations shown in a smile view.
pub const DEFAULT_SMILE_EXPIRATIONS: usize = 4;

/// Relative strike band around spot treated as near-the-money.
pub const DEFAULT_ATM_BAND: f64 = 0.10;

/// One (strike, IV) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmilePoint {
    /// Strike price.
    pub strike: f64,
    /// Solved implied volatility.
    pub iv: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

/// Smile for a single expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmileSlice {
    /// Expiration date.
    pub expiration: String,
    /// Time to expiry of the first row of the slice.
    pub time_to_expiry: f64,
    /// Spot of the first row of the slice.
    pub spot: f64,
    /// Observations sorted by strike.
    pub points: Vec<SmilePoint>,
}

/// One (time to expiry, IV) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermPoint {
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Solved implied volatility.
    pub iv: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

/// Near-the-money IV across maturities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStructure {
    /// Spot used to select the strike band.
    pub spot: f64,
    /// Observations sorted by time to expiry.
    pub points: Vec<TermPoint>,
    /// Mean IV per distinct time to expiry, ascending.
    pub average: Vec<(f64, f64)>,
}

/// Converged rows of `ticker` with a recognized option type.
fn usable<'a>(
    records: &'a [CalibratedRecord],
    ticker: &'a str,
) -> impl Iterator<Item = (&'a CalibratedRecord, f64, OptionType)> {
    records.iter().filter_map(move |row| {
        if row.record.ticker != ticker {
            return None;
        }
        let iv = row.calc_iv?;
        let option_type = row.record.parsed_type().ok()?;
        Some((row, iv, option_type))
    })
}

/// Smile slices for the earliest `max_expirations` expirations of `ticker`.
#[must_use]
pub fn volatility_smile(
    records: &[CalibratedRecord],
    ticker: &str,
    max_expirations: usize,
) -> Vec<SmileSlice> {
    let rows: Vec<_> = usable(records, ticker).collect();
    if rows.is_empty() {
        debug!("No analytics data found for {ticker}");
        return Vec::new();
    }

    let mut expirations: Vec<&str> = rows
        .iter()
        .map(|(row, _, _)| row.record.expiration.as_str())
        .collect();
    expirations.sort_unstable();
    expirations.dedup();
    expirations.truncate(max_expirations);

    expirations
        .into_iter()
        .filter_map(|expiration| {
            let slice: Vec<_> = rows
                .iter()
                .filter(|(row, _, _)| row.record.expiration == expiration)
                .collect();
            let (first, _, _) = slice.first()?;

            let mut points: Vec<SmilePoint> = slice
                .iter()
                .map(|(row, iv, option_type)| SmilePoint {
                    strike: row.record.strike,
                    iv: *iv,
                    option_type: *option_type,
                })
                .collect();
            points.sort_by(|a, b| a.strike.total_cmp(&b.strike));

            Some(SmileSlice {
                expiration: expiration.to_string(),
                time_to_expiry: first.record.time_to_expiry,
                spot: first.record.spot,
                points,
            })
        })
        .collect()
}

/// Term structure of near-the-money IV for `ticker`.
///
/// Strikes strictly inside `spot · (1 ± band)` are kept, where spot is taken
/// from the first usable row. Returns `None` when nothing qualifies.
#[must_use]
pub fn term_structure(
    records: &[CalibratedRecord],
    ticker: &str,
    band: f64,
) -> Option<TermStructure> {
    let rows: Vec<_> = usable(records, ticker).collect();
    let Some((first, _, _)) = rows.first() else {
        debug!("No analytics data found for {ticker}");
        return None;
    };
    let spot = first.record.spot;
    let (low, high) = (spot * (1.0 - band), spot * (1.0 + band));

    let mut points: Vec<TermPoint> = rows
        .iter()
        .filter(|(row, _, _)| row.record.strike > low && row.record.strike < high)
        .map(|(row, iv, option_type)| TermPoint {
            time_to_expiry: row.record.time_to_expiry,
            iv: *iv,
            option_type: *option_type,
        })
        .collect();
    if points.is_empty() {
        debug!("No near-the-money options for {ticker}");
        return None;
    }
    points.sort_by(|a, b| a.time_to_expiry.total_cmp(&b.time_to_expiry));

    let mut average: Vec<(f64, f64)> = Vec::new();
    for group in points.chunk_by(|a, b| a.time_to_expiry == b.time_to_expiry) {
        let mean = group.iter().map(|p| p.iv).sum::<f64>() / group.len() as f64;
        average.push((group[0].time_to_expiry, mean));
    }

    Some(TermStructure {
        spot,
        points,
        average,
    })
}
