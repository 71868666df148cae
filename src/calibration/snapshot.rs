//! Analytics table snapshot handed to the storage layer.
//!
//! A snapshot is the full contents of an analytics table: persisting it
//! replaces whatever the table held before.

use super::record::CalibratedRecord;
use crate::pricing::PricingError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

/// Default name of the analytics table.
pub const ANALYTICS_TABLE: &str = "analytics_data";

/// Format version used for checksum-enabled analytics snapshots.
pub const ANALYTICS_SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// The calibrated contents of one analytics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Destination table name.
    pub table: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Calibrated rows, in calibration order.
    pub records: Vec<CalibratedRecord>,
}

impl AnalyticsSnapshot {
    /// Creates a snapshot for `table`.
    #[must_use]
    pub fn new(table: &str, timestamp: u64, records: Vec<CalibratedRecord>) -> Self {
        Self {
            table: table.to_string(),
            timestamp,
            records,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the snapshot holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows for a single ticker.
    pub fn for_ticker<'a>(&'a self, ticker: &'a str) -> impl Iterator<Item = &'a CalibratedRecord> {
        self.records.iter().filter(move |r| r.record.ticker == ticker)
    }

    /// Distinct tickers in first-seen order.
    #[must_use]
    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = Vec::new();
        for record in &self.records {
            if !tickers.contains(&record.record.ticker) {
                tickers.push(record.record.ticker.clone());
            }
        }
        trace!("tickers: {:?}", tickers);
        tickers
    }
}

/// Wrapper that provides checksum validation for `AnalyticsSnapshot` instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshotPackage {
    /// Version of the snapshot schema for forward compatibility.
    pub version: u32,
    /// Snapshot payload.
    pub snapshot: AnalyticsSnapshot,
    /// Hex-encoded checksum of the serialized snapshot.
    pub checksum: String,
}

impl AnalyticsSnapshotPackage {
    /// Creates a new snapshot package computing the checksum of the snapshot contents.
    pub fn new(snapshot: AnalyticsSnapshot) -> Result<Self, PricingError> {
        let checksum = Self::compute_checksum(&snapshot)?;

        Ok(Self {
            version: ANALYTICS_SNAPSHOT_FORMAT_VERSION,
            snapshot,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    pub fn to_json(&self) -> Result<String, PricingError> {
        serde_json::to_string(self).map_err(|error| PricingError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON.
    pub fn from_json(data: &str) -> Result<Self, PricingError> {
        serde_json::from_str(data).map_err(|error| PricingError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the checksum and version.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.version != ANALYTICS_SNAPSHOT_FORMAT_VERSION {
            return Err(PricingError::UnsupportedVersion {
                found: self.version,
                expected: ANALYTICS_SNAPSHOT_FORMAT_VERSION,
            });
        }

        let computed = Self::compute_checksum(&self.snapshot)?;
        if computed != self.checksum {
            return Err(PricingError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        Ok(())
    }

    /// Consumes the package and returns the validated snapshot.
    pub fn into_snapshot(self) -> Result<AnalyticsSnapshot, PricingError> {
        self.validate()?;
        Ok(self.snapshot)
    }

    fn compute_checksum(snapshot: &AnalyticsSnapshot) -> Result<String, PricingError> {
        let payload =
            serde_json::to_vec(snapshot).map_err(|error| PricingError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum_bytes = hasher.finalize();
        Ok(format!("{:x}", checksum_bytes))
    }
}
