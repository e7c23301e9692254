//! Free-space path loss

use crate::{LinkBudgetError, Result};

/// FSPL constant for distance in km and frequency in MHz (dB)
const FSPL_CONSTANT_DB: f64 = 32.44;

/// Free-space path loss in dB
///
/// FSPL = 32.44 + 20·log10(d_km) + 20·log10(f_MHz)
///
/// The logarithm is undefined at zero range, so a non-positive distance is
/// rejected rather than clamped.
pub fn free_space_path_loss_db(distance_m: f64, frequency_mhz: f64) -> Result<f64> {
    if !(distance_m.is_finite() && distance_m > 0.0) {
        return Err(LinkBudgetError::InvalidDistance(distance_m));
    }
    if !(frequency_mhz.is_finite() && frequency_mhz > 0.0) {
        return Err(LinkBudgetError::InvalidFrequency(frequency_mhz));
    }

    let distance_km = distance_m / 1000.0;
    Ok(FSPL_CONSTANT_DB + 20.0 * distance_km.log10() + 20.0 * frequency_mhz.log10())
}
