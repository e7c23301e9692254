//! RSSI / SNR for one link direction

use serde::{Deserialize, Serialize};

/// Received signal level and SNR at one end of the link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalLevels {
    pub rssi_dbm: f64,
    pub snr_db: f64,
}

/// Received signal for one direction of the link
///
/// Downlink passes AP EIRP and CPE antenna gain; uplink passes CPE EIRP and
/// AP antenna gain. `total_loss_db` is the sum of FSPL, environment loss and
/// fade margin.
pub fn compute_link_budget(
    tx_eirp_dbm: f64,
    rx_antenna_gain_dbi: f64,
    total_loss_db: f64,
    rx_noise_floor_dbm: f64,
) -> SignalLevels {
    let rssi_dbm = tx_eirp_dbm + rx_antenna_gain_dbi - total_loss_db;
    SignalLevels {
        rssi_dbm,
        snr_db: rssi_dbm - rx_noise_floor_dbm,
    }
}

/// Total link loss (dB), additive in the log domain
pub fn total_loss_db(fspl_db: f64, environment_loss_db: f64, fade_margin_db: f64) -> f64 {
    fspl_db + environment_loss_db + fade_margin_db
}
