//! Per-CPE link evaluation
//!
//! Composes path loss, environment loss, the per-direction budget, MCS
//! selection and TDD weighting into one [`CpeRecord`] per CPE. Nothing is
//! cached between calls.

use crate::budget::{compute_link_budget, total_loss_db};
use crate::rate::{mcs_to_phy_rate_mbps, snr_to_mcs};
use crate::tdd::effective_throughput_mbps;
use crate::{
    free_space_path_loss_db, ApConfig, CoverageConfig, CpeSite, LinkBudgetError, LinkSettings,
    Result, RfParameters, CPE_HEIGHT_M,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// AP/CPE placement for one link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeploymentGeometry {
    pub ap_height_m: f64,
    pub cpe_height_m: f64,
    pub horizontal_distance_m: f64,
}

impl DeploymentGeometry {
    /// Geometry for a CPE mounted at the standard 7 m
    pub fn new(ap_height_m: f64, horizontal_distance_m: f64) -> Self {
        Self {
            ap_height_m,
            cpe_height_m: CPE_HEIGHT_M,
            horizontal_distance_m,
        }
    }

    pub fn height_delta_m(&self) -> f64 {
        self.ap_height_m - self.cpe_height_m
    }

    /// Straight-line AP→CPE distance (m)
    pub fn slant_distance_m(&self) -> Result<f64> {
        let distance = self.horizontal_distance_m.hypot(self.height_delta_m());
        if distance.is_finite() && distance > 0.0 {
            Ok(distance)
        } else {
            Err(LinkBudgetError::DegenerateGeometry {
                horizontal_m: self.horizontal_distance_m,
                height_delta_m: self.height_delta_m(),
            })
        }
    }
}

/// Link budget outcome for one direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionResult {
    pub rssi_dbm: f64,
    pub snr_db: f64,
    pub mcs: u8,
    pub phy_rate_mbps: f64,
    pub throughput_mbps: f64,
}

impl DirectionResult {
    fn from_budget(
        tx: &RfParameters,
        rx_gain_dbi: f64,
        total_loss_db: f64,
        noise_floor_dbm: f64,
        bandwidth_mhz: f64,
        duty_percent: u8,
    ) -> Self {
        let levels = compute_link_budget(tx.eirp_dbm(), rx_gain_dbi, total_loss_db, noise_floor_dbm);
        let mcs = snr_to_mcs(levels.snr_db);
        let phy_rate_mbps = mcs_to_phy_rate_mbps(mcs, bandwidth_mhz);

        Self {
            rssi_dbm: levels.rssi_dbm,
            snr_db: levels.snr_db,
            mcs,
            phy_rate_mbps,
            throughput_mbps: effective_throughput_mbps(phy_rate_mbps, duty_percent),
        }
    }
}

/// Complete link budget for one CPE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpeRecord {
    /// 1-based position in the CPE list, assigned by [`evaluate_site`] and
    /// [`evaluate_all`]; 0 for a record from [`evaluate`] alone
    pub index: usize,
    pub horizontal_distance_m: f64,
    pub distance_3d_m: f64,
    pub fspl_db: f64,
    pub environment_loss_db: f64,
    pub fade_margin_db: f64,
    pub total_loss_db: f64,
    pub noise_floor_dbm: f64,
    pub downlink: DirectionResult,
    pub uplink: DirectionResult,
}

/// Evaluate one CPE against the AP
///
/// Downlink runs AP→CPE, uplink CPE→AP; both see the same total loss and
/// the CPE's noise floor. The record is unnumbered (`index` 0).
pub fn evaluate(
    ap: &ApConfig,
    cpe_radio: &RfParameters,
    geometry: &DeploymentGeometry,
    link: &LinkSettings,
    noise_floor_dbm: f64,
) -> Result<CpeRecord> {
    let distance_3d_m = geometry.slant_distance_m()?;
    let fspl_db = free_space_path_loss_db(distance_3d_m, link.frequency_mhz)?;
    let environment_loss_db = link.environment.excess_loss_db();
    let loss = total_loss_db(fspl_db, environment_loss_db, link.fade_margin_db);
    let bandwidth_mhz = f64::from(link.bandwidth_mhz);

    let downlink = DirectionResult::from_budget(
        &ap.radio,
        cpe_radio.antenna_gain_dbi,
        loss,
        noise_floor_dbm,
        bandwidth_mhz,
        link.tdd.downlink_percent(),
    );
    let uplink = DirectionResult::from_budget(
        cpe_radio,
        ap.radio.antenna_gain_dbi,
        loss,
        noise_floor_dbm,
        bandwidth_mhz,
        link.tdd.uplink_percent(),
    );

    Ok(CpeRecord {
        index: 0,
        horizontal_distance_m: geometry.horizontal_distance_m,
        distance_3d_m,
        fspl_db,
        environment_loss_db,
        fade_margin_db: link.fade_margin_db,
        total_loss_db: loss,
        noise_floor_dbm,
        downlink,
        uplink,
    })
}

/// Evaluate one configured site, numbering it from `index`
pub fn evaluate_site(config: &CoverageConfig, index: usize, site: &CpeSite) -> Result<CpeRecord> {
    let geometry = DeploymentGeometry::new(config.ap.height_m, site.horizontal_distance_m);
    let mut record = evaluate(
        &config.ap,
        &config.cpe_radio,
        &geometry,
        &config.link,
        site.noise_floor_dbm,
    )?;
    record.index = index;
    Ok(record)
}

/// Evaluate every CPE in the snapshot, in list order
pub fn evaluate_all(config: &CoverageConfig) -> Result<Vec<CpeRecord>> {
    info!(
        "Evaluating {} CPEs: {} MHz, {}, fade margin {:.0} dB, TDD {}/{}",
        config.cpes.len(),
        config.link.bandwidth_mhz,
        config.link.environment,
        config.link.fade_margin_db,
        config.link.tdd.downlink_percent(),
        config.link.tdd.uplink_percent()
    );

    config
        .cpes
        .iter()
        .enumerate()
        .map(|(i, site)| {
            let record = evaluate_site(config, i + 1, site)?;
            debug!(
                "CPE {}: d={:.1} m, FSPL={:.1} dB, DL {:.1} dBm MCS{} {:.1} Mbps, UL {:.1} dBm MCS{} {:.1} Mbps",
                record.index,
                record.distance_3d_m,
                record.fspl_db,
                record.downlink.rssi_dbm,
                record.downlink.mcs,
                record.downlink.throughput_mbps,
                record.uplink.rssi_dbm,
                record.uplink.mcs,
                record.uplink.throughput_mbps
            );
            Ok(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Environment, TddSplit};

    fn scenario_a() -> CoverageConfig {
        CoverageConfig {
            cpes: vec![CpeSite::new(250.0, -70.0)],
            ..CoverageConfig::default()
        }
    }

    #[test]
    fn test_slant_distance() {
        let geometry = DeploymentGeometry::new(20.0, 250.0);
        let d = geometry.slant_distance_m().unwrap();
        assert!((d - 250.337_77).abs() < 1e-4);
        assert_eq!(geometry.height_delta_m(), 13.0);
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let geometry = DeploymentGeometry {
            ap_height_m: 7.0,
            cpe_height_m: 7.0,
            horizontal_distance_m: 0.0,
        };
        assert!(matches!(
            geometry.slant_distance_m(),
            Err(LinkBudgetError::DegenerateGeometry { .. })
        ));

        let config = scenario_a();
        let result = evaluate(&config.ap, &config.cpe_radio, &geometry, &config.link, -70.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_only_site_evaluation_numbers_records() {
        let config = scenario_a();
        let site = config.cpes[0];
        let geometry = DeploymentGeometry::new(config.ap.height_m, site.horizontal_distance_m);

        let bare = evaluate(&config.ap, &config.cpe_radio, &geometry, &config.link, site.noise_floor_dbm)
            .unwrap();
        assert_eq!(bare.index, 0);

        let numbered = evaluate_site(&config, 3, &site).unwrap();
        assert_eq!(numbered.index, 3);
        assert_eq!(CpeRecord { index: 3, ..bare }, numbered);

        assert_eq!(evaluate_all(&config).unwrap()[0].index, 1);
    }

    #[test]
    fn test_scenario_a_downlink() {
        let records = evaluate_all(&scenario_a()).unwrap();
        let record = &records[0];

        assert_eq!(record.index, 1);
        assert!((record.distance_3d_m - 250.3378).abs() < 1e-3);
        assert!((record.fspl_db - 95.8276).abs() < 1e-3);
        assert_eq!(record.environment_loss_db, 0.0);
        assert_eq!(record.fade_margin_db, 10.0);
        assert!((record.total_loss_db - 105.8276).abs() < 1e-3);

        let dl = record.downlink;
        assert!((dl.rssi_dbm - -53.8276).abs() < 1e-3);
        assert!((dl.snr_db - 16.1724).abs() < 1e-3);
        assert_eq!(dl.mcs, 7);
        assert_eq!(dl.phy_rate_mbps, 103.2);
        assert!((dl.throughput_mbps - 72.24).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_a_uplink() {
        let records = evaluate_all(&scenario_a()).unwrap();
        let ul = records[0].uplink;

        // 20 dBm + 12 dBi CPE EIRP, 17 dBi AP gain
        assert!((ul.rssi_dbm - -56.8276).abs() < 1e-3);
        assert!((ul.snr_db - 13.1724).abs() < 1e-3);
        assert_eq!(ul.mcs, 5);
        assert_eq!(ul.phy_rate_mbps, 68.8);
        assert!((ul.throughput_mbps - 20.64).abs() < 1e-9);
    }

    #[test]
    fn test_bandwidth_scales_phy_rate() {
        let base = evaluate_all(&scenario_a()).unwrap()[0];

        let mut wide = scenario_a();
        wide.link.bandwidth_mhz = 80;
        let wide = evaluate_all(&wide).unwrap()[0];

        assert_eq!(wide.downlink.mcs, base.downlink.mcs);
        assert_eq!(wide.downlink.phy_rate_mbps, 4.0 * base.downlink.phy_rate_mbps);
        assert_eq!(wide.uplink.phy_rate_mbps, 4.0 * base.uplink.phy_rate_mbps);
        assert_eq!(wide.downlink.rssi_dbm, base.downlink.rssi_dbm);
    }

    #[test]
    fn test_urban_costs_exactly_15db() {
        let rural = evaluate_all(&scenario_a()).unwrap()[0];

        let mut config = scenario_a();
        config.link.environment = Environment::Urban;
        let urban = evaluate_all(&config).unwrap()[0];

        assert!((urban.total_loss_db - rural.total_loss_db - 15.0).abs() < 1e-9);
        assert!((rural.downlink.rssi_dbm - urban.downlink.rssi_dbm - 15.0).abs() < 1e-9);
        assert!((rural.downlink.snr_db - urban.downlink.snr_db - 15.0).abs() < 1e-9);
        assert!((rural.uplink.rssi_dbm - urban.uplink.rssi_dbm - 15.0).abs() < 1e-9);
        assert!((rural.uplink.snr_db - urban.uplink.snr_db - 15.0).abs() < 1e-9);
        assert_eq!(urban.downlink.mcs, 0);
    }

    #[test]
    fn test_tdd_split_applied_per_direction() {
        let mut config = scenario_a();
        config.link.tdd = TddSplit::new(50).unwrap();
        let record = evaluate_all(&config).unwrap()[0];

        assert!((record.downlink.throughput_mbps - record.downlink.phy_rate_mbps * 0.5).abs() < 1e-9);
        assert!((record.uplink.throughput_mbps - record.uplink.phy_rate_mbps * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_default_sites_degrade_with_distance() {
        let records = evaluate_all(&CoverageConfig::default()).unwrap();
        assert_eq!(records.len(), 4);

        let mcs: Vec<u8> = records.iter().map(|r| r.downlink.mcs).collect();
        assert_eq!(mcs, vec![7, 5, 3, 3]);
        for pair in records.windows(2) {
            assert!(pair[1].fspl_db > pair[0].fspl_db);
            assert_eq!(pair[1].index, pair[0].index + 1);
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let config = CoverageConfig::default();
        let first = evaluate_all(&config).unwrap();
        let second = evaluate_all(&config).unwrap();
        assert_eq!(first, second);

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.downlink.rssi_dbm.to_bits(), b.downlink.rssi_dbm.to_bits());
            assert_eq!(a.uplink.throughput_mbps.to_bits(), b.uplink.throughput_mbps.to_bits());
        }
    }
}
