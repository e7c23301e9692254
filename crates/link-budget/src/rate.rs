//! SNR → MCS → PHY rate
//!
//! Step thresholds and 20 MHz base rates for the subset of 802.11ax MCS
//! indices the coverage model uses. Indices 2, 4, 6, 8 and 10 are never
//! selected.

use tracing::warn;

/// Reference channel width for the base rate table (MHz)
pub const BASE_BANDWIDTH_MHZ: f64 = 20.0;

/// Upper SNR bound (exclusive, dB) → MCS index, checked in order
pub const MCS_THRESHOLDS: [(f64, u8); 6] = [
    (5.0, 0),
    (8.0, 1),
    (12.0, 3),
    (16.0, 5),
    (20.0, 7),
    (25.0, 9),
];

/// MCS selected when SNR clears every threshold
pub const MCS_MAX: u8 = 11;

/// PHY rate at 20 MHz per MCS index (Mbps)
pub const BASE_RATES_MBPS: [(u8, f64); 7] = [
    (0, 8.6),
    (1, 17.2),
    (3, 34.4),
    (5, 68.8),
    (7, 103.2),
    (9, 137.6),
    (11, 143.4),
];

/// Highest MCS whose threshold the SNR reaches
///
/// Comparisons are strict, so an SNR sitting exactly on a boundary gets the
/// higher tier.
pub fn snr_to_mcs(snr_db: f64) -> u8 {
    MCS_THRESHOLDS
        .iter()
        .find(|(bound, _)| snr_db < *bound)
        .map(|(_, mcs)| *mcs)
        .unwrap_or(MCS_MAX)
}

/// 20 MHz base rate for a modeled MCS index
pub fn base_rate_mbps(mcs: u8) -> Option<f64> {
    BASE_RATES_MBPS
        .iter()
        .find(|(index, _)| *index == mcs)
        .map(|(_, rate)| *rate)
}

/// PHY rate scaled linearly with channel width (Mbps)
///
/// An index outside the table yields 0 Mbps instead of an error.
pub fn mcs_to_phy_rate_mbps(mcs: u8, bandwidth_mhz: f64) -> f64 {
    let base = base_rate_mbps(mcs).unwrap_or_else(|| {
        warn!("MCS {} has no PHY rate entry, using 0 Mbps", mcs);
        0.0
    });
    base * (bandwidth_mhz / BASE_BANDWIDTH_MHZ)
}
