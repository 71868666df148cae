//! Batch calibration of option records.
//!
//! Turns curated option rows into analytics rows: implied volatility solved
//! per contract, Greeks at that volatility, and the snapshot and surface views
//! consumed by storage and dashboards.

mod driver;
mod record;
mod snapshot;
/// Smile and term-structure series for the dashboard views.
pub mod surface;

pub use driver::{CalibrationConfig, CalibrationDriver, CalibrationSummary};
pub use record::{CalibratedRecord, OptionRecord};
pub use snapshot::{
    ANALYTICS_SNAPSHOT_FORMAT_VERSION, ANALYTICS_TABLE, AnalyticsSnapshot,
    AnalyticsSnapshotPackage,
};
pub use surface::{
    SmilePoint, SmileSlice, TermPoint, TermStructure, term_structure, volatility_smile,
};
