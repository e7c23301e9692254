//! AP–CPE Link Budget
//!
//! Per-CPE link budget for a fixed point-to-multipoint deployment: one
//! elevated 802.11ax access point at 5.9 GHz serving up to 16 CPEs.
//!
//! # Model
//!
//! ```text
//! L_total = FSPL(d_3d) + L_env + M_fade
//! RSSI_DL = EIRP_AP  + G_CPE - L_total
//! RSSI_UL = EIRP_CPE + G_AP  - L_total
//! SNR     = RSSI - N_floor
//! ```
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Path loss | [`path_loss`] | FSPL (dB) at the slant distance |
//! | Environment | [`environment`] | 0 / 8 / 15 dB excess loss |
//! | Budget | [`budget`] | RSSI (dBm), SNR (dB) |
//! | Rate | [`rate`] | MCS index, PHY rate (Mbps) |
//! | TDD | [`tdd`] | Effective throughput (Mbps) |
//! | Evaluator | [`evaluator`] | One [`CpeRecord`] per CPE |
//!
//! Every evaluation is a pure function of the [`CoverageConfig`] snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod budget;
pub mod config;
pub mod environment;
pub mod evaluator;
pub mod loader;
pub mod path_loss;
pub mod rate;
pub mod report;
pub mod tdd;

pub use budget::{compute_link_budget, SignalLevels};
pub use config::{ApConfig, CoverageConfig, CpeSite, LinkSettings};
pub use environment::Environment;
pub use evaluator::{
    evaluate, evaluate_all, evaluate_site, CpeRecord, DeploymentGeometry, DirectionResult,
};
pub use path_loss::free_space_path_loss_db;
pub use rate::{mcs_to_phy_rate_mbps, snr_to_mcs};
pub use report::{CoverageReport, ReportMetadata};
pub use tdd::TddSplit;

/// Carrier frequency of the 802.11ax channel plan (MHz)
pub const DEFAULT_FREQUENCY_MHZ: f64 = 5900.0;

/// CPE antenna height above ground, fixed for every site (m)
pub const CPE_HEIGHT_M: f64 = 7.0;

/// Farthest supported CPE placement from the AP (m)
pub const MAX_DISTANCE_M: f64 = 1500.0;

/// Closest supported CPE placement from the AP (m)
pub const MIN_DISTANCE_M: f64 = 100.0;

/// Maximum number of CPEs served by one AP
pub const MAX_CPES: usize = 16;

#[derive(Error, Debug)]
pub enum LinkBudgetError {
    #[error("Invalid environment: {0} (expected Rural, Suburban or Urban)")]
    InvalidEnvironment(String),
    #[error("Degenerate geometry: horizontal {horizontal_m} m, height delta {height_delta_m} m")]
    DegenerateGeometry { horizontal_m: f64, height_delta_m: f64 },
    #[error("Path distance must be positive and finite: {0} m")]
    InvalidDistance(f64),
    #[error("Invalid carrier frequency: {0} MHz")]
    InvalidFrequency(f64),
    #[error("{field} = {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Unsupported channel bandwidth: {0} MHz")]
    InvalidBandwidth(u32),
    #[error("Unsupported TDD downlink ratio: {0}%")]
    InvalidDutyCycle(u8),
    #[error("Unsupported AP height: {0} m")]
    InvalidApHeight(f64),
    #[error("Fade margin must be a whole number of dB: {0}")]
    InvalidFadeMargin(f64),
    #[error("CPE count {0} outside 1..={max}", max = MAX_CPES)]
    CpeCount(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinkBudgetError>;

/// Radio parameters of one endpoint (AP or CPE)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RfParameters {
    pub tx_power_dbm: f64,
    pub antenna_gain_dbi: f64,
    pub cable_loss_db: f64,
}

impl RfParameters {
    pub fn new(tx_power_dbm: f64, antenna_gain_dbi: f64, cable_loss_db: f64) -> Self {
        Self {
            tx_power_dbm,
            antenna_gain_dbi,
            cable_loss_db,
        }
    }

    /// Effective isotropic radiated power (dBm)
    pub fn eirp_dbm(&self) -> f64 {
        self.tx_power_dbm + self.antenna_gain_dbi - self.cable_loss_db
    }
}
