//! Coverage report: per-CPE records plus run metadata

use crate::{evaluate_all, CoverageConfig, CpeRecord, Environment, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Result of one coverage run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub records: Vec<CpeRecord>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub cpe_count: usize,
    pub ap_height_m: f64,
    pub ap_tilt_deg: f64,
    pub ap_eirp_dbm: f64,
    pub cpe_eirp_dbm: f64,
    pub frequency_mhz: f64,
    pub bandwidth_mhz: u32,
    pub environment: Environment,
    pub fade_margin_db: f64,
    pub tdd_dl_percent: u8,
    pub tdd_ul_percent: u8,
    pub total_dl_throughput_mbps: f64,
    pub total_ul_throughput_mbps: f64,
    pub generated_at: String,
}

impl CoverageReport {
    /// Evaluate the snapshot and stamp the result
    pub fn generate(config: &CoverageConfig) -> Result<Self> {
        let records = evaluate_all(config)?;
        Ok(Self::from_records(config, records))
    }

    pub fn from_records(config: &CoverageConfig, records: Vec<CpeRecord>) -> Self {
        let metadata = ReportMetadata {
            cpe_count: records.len(),
            ap_height_m: config.ap.height_m,
            ap_tilt_deg: config.ap.tilt_deg,
            ap_eirp_dbm: config.ap.radio.eirp_dbm(),
            cpe_eirp_dbm: config.cpe_radio.eirp_dbm(),
            frequency_mhz: config.link.frequency_mhz,
            bandwidth_mhz: config.link.bandwidth_mhz,
            environment: config.link.environment,
            fade_margin_db: config.link.fade_margin_db,
            tdd_dl_percent: config.link.tdd.downlink_percent(),
            tdd_ul_percent: config.link.tdd.uplink_percent(),
            total_dl_throughput_mbps: records.iter().map(|r| r.downlink.throughput_mbps).sum(),
            total_ul_throughput_mbps: records.iter().map(|r| r.uplink.throughput_mbps).sum(),
            generated_at: Utc::now().to_rfc3339(),
        };

        Self { records, metadata }
    }

    /// Record with the weakest downlink SNR
    pub fn weakest_downlink(&self) -> Option<&CpeRecord> {
        self.records.iter().min_by(|a, b| {
            a.downlink
                .snr_db
                .partial_cmp(&b.downlink.snr_db)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
