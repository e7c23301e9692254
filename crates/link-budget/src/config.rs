//! Parameter snapshot for one coverage run
//!
//! Replaces the interactive parameter form with one immutable value. Every
//! range the form enforces is checked in [`CoverageConfig::validate`] before
//! the snapshot reaches the evaluator.

use crate::{
    Environment, LinkBudgetError, Result, RfParameters, TddSplit, DEFAULT_FREQUENCY_MHZ,
    MAX_CPES, MAX_DISTANCE_M, MIN_DISTANCE_M,
};
use serde::{Deserialize, Serialize};

/// Selectable AP mounting heights (m)
pub const AP_HEIGHTS_M: [f64; 3] = [20.0, 25.0, 30.0];

/// Selectable channel widths (MHz)
pub const CHANNEL_BANDWIDTHS_MHZ: [u32; 4] = [20, 40, 80, 160];

/// Noise floor range accepted per CPE (dBm)
pub const NOISE_FLOOR_RANGE_DBM: (f64, f64) = (-80.0, -55.0);

/// Access point mounting and radio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApConfig {
    pub height_m: f64,
    /// Mechanical down-tilt, positive points the beam at the ground (deg)
    pub tilt_deg: f64,
    pub radio: RfParameters,
}

impl Default for ApConfig {
    fn default() -> Self {
        Self {
            height_m: 20.0,
            tilt_deg: 5.0,
            radio: RfParameters::new(23.0, 17.0, 0.0),
        }
    }
}

/// Channel and propagation settings shared by every CPE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    pub frequency_mhz: f64,
    pub bandwidth_mhz: u32,
    pub environment: Environment,
    pub fade_margin_db: f64,
    /// Downlink share of airtime, serialized as the percentage
    #[serde(rename = "tdd_dl_percent")]
    pub tdd: TddSplit,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            frequency_mhz: DEFAULT_FREQUENCY_MHZ,
            bandwidth_mhz: 20,
            environment: Environment::Rural,
            fade_margin_db: 10.0,
            tdd: TddSplit::default(),
        }
    }
}

/// One CPE placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpeSite {
    pub horizontal_distance_m: f64,
    pub noise_floor_dbm: f64,
}

impl CpeSite {
    pub fn new(horizontal_distance_m: f64, noise_floor_dbm: f64) -> Self {
        Self {
            horizontal_distance_m,
            noise_floor_dbm,
        }
    }
}

/// Complete input snapshot for one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    pub ap: ApConfig,
    pub cpe_radio: RfParameters,
    pub link: LinkSettings,
    pub cpes: Vec<CpeSite>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            ap: ApConfig::default(),
            cpe_radio: RfParameters::new(20.0, 12.0, 0.0),
            link: LinkSettings::default(),
            cpes: Self::default_sites(4),
        }
    }
}

impl CoverageConfig {
    /// Sites spaced 80 m apart starting at 250 m, all at -70 dBm noise
    pub fn default_sites(count: usize) -> Vec<CpeSite> {
        (0..count)
            .map(|i| CpeSite::new(250.0 + i as f64 * 80.0, -70.0))
            .collect()
    }

    /// Check every field against the ranges the input form allows
    pub fn validate(&self) -> Result<()> {
        if !AP_HEIGHTS_M.contains(&self.ap.height_m) {
            return Err(LinkBudgetError::InvalidApHeight(self.ap.height_m));
        }
        check_range("ap.tilt_deg", self.ap.tilt_deg, 0.0, 15.0)?;
        check_radio(AP_RADIO_FIELDS, &self.ap.radio, 40.0, 35.0)?;
        check_radio(CPE_RADIO_FIELDS, &self.cpe_radio, 30.0, 30.0)?;

        let link = &self.link;
        if !(link.frequency_mhz.is_finite() && link.frequency_mhz > 0.0) {
            return Err(LinkBudgetError::InvalidFrequency(link.frequency_mhz));
        }
        if !CHANNEL_BANDWIDTHS_MHZ.contains(&link.bandwidth_mhz) {
            return Err(LinkBudgetError::InvalidBandwidth(link.bandwidth_mhz));
        }
        check_range("link.fade_margin_db", link.fade_margin_db, 0.0, 30.0)?;
        if link.fade_margin_db.fract() != 0.0 {
            return Err(LinkBudgetError::InvalidFadeMargin(link.fade_margin_db));
        }
        TddSplit::new(link.tdd.downlink_percent())?;

        if self.cpes.is_empty() || self.cpes.len() > MAX_CPES {
            return Err(LinkBudgetError::CpeCount(self.cpes.len()));
        }
        for site in &self.cpes {
            check_range(
                "cpes.horizontal_distance_m",
                site.horizontal_distance_m,
                MIN_DISTANCE_M,
                MAX_DISTANCE_M,
            )?;
            check_range(
                "cpes.noise_floor_dbm",
                site.noise_floor_dbm,
                NOISE_FLOOR_RANGE_DBM.0,
                NOISE_FLOOR_RANGE_DBM.1,
            )?;
        }

        Ok(())
    }
}

const AP_RADIO_FIELDS: [&str; 3] = [
    "ap.radio.tx_power_dbm",
    "ap.radio.antenna_gain_dbi",
    "ap.radio.cable_loss_db",
];

const CPE_RADIO_FIELDS: [&str; 3] = [
    "cpe_radio.tx_power_dbm",
    "cpe_radio.antenna_gain_dbi",
    "cpe_radio.cable_loss_db",
];

fn check_radio(
    fields: [&'static str; 3],
    radio: &RfParameters,
    max_tx: f64,
    max_gain: f64,
) -> Result<()> {
    check_range(fields[0], radio.tx_power_dbm, 0.0, max_tx)?;
    check_range(fields[1], radio.antenna_gain_dbi, 0.0, max_gain)?;
    check_range(fields[2], radio.cable_loss_db, 0.0, 10.0)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LinkBudgetError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
