//! Hover text for CPE markers

use link_budget::CpeRecord;

/// One line per link-budget field, numbers at one decimal
pub fn tooltip_lines(record: &CpeRecord) -> Vec<String> {
    vec![
        format!("CPE {}", record.index),
        format!("Distance: {:.1} m", record.distance_3d_m),
        format!("FSPL: {:.1} dB", record.fspl_db),
        format!("Env Loss: {:.1} dB", record.environment_loss_db),
        format!("Fade Margin: {:.1} dB", record.fade_margin_db),
        format!("RSSI DL: {:.1} dBm", record.downlink.rssi_dbm),
        format!("RSSI UL: {:.1} dBm", record.uplink.rssi_dbm),
        format!("MCS DL: {}", record.downlink.mcs),
        format!("MCS UL: {}", record.uplink.mcs),
        format!("DL PHY: {:.1} Mbps", record.downlink.phy_rate_mbps),
        format!("UL PHY: {:.1} Mbps", record.uplink.phy_rate_mbps),
        format!("Practical DL: {:.1} Mbps", record.downlink.throughput_mbps),
        format!("Practical UL: {:.1} Mbps", record.uplink.throughput_mbps),
    ]
}

pub fn tooltip_text(record: &CpeRecord) -> String {
    tooltip_lines(record).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use link_budget::{evaluate_all, CoverageConfig, CpeSite};

    #[test]
    fn test_tooltip_for_250m_site() {
        let config = CoverageConfig {
            cpes: vec![CpeSite::new(250.0, -70.0)],
            ..CoverageConfig::default()
        };
        let record = evaluate_all(&config).unwrap()[0];

        assert_eq!(
            tooltip_lines(&record),
            vec![
                "CPE 1",
                "Distance: 250.3 m",
                "FSPL: 95.8 dB",
                "Env Loss: 0.0 dB",
                "Fade Margin: 10.0 dB",
                "RSSI DL: -53.8 dBm",
                "RSSI UL: -56.8 dBm",
                "MCS DL: 7",
                "MCS UL: 5",
                "DL PHY: 103.2 Mbps",
                "UL PHY: 68.8 Mbps",
                "Practical DL: 72.2 Mbps",
                "Practical UL: 20.6 Mbps",
            ]
        );
    }

    #[test]
    fn test_tooltip_text_joins_lines() {
        let record = evaluate_all(&CoverageConfig::default()).unwrap()[2];
        let text = tooltip_text(&record);
        assert!(text.starts_with("CPE 3\nDistance: 410.2 m"));
        assert_eq!(text.lines().count(), 13);
    }
}
