//! TDD downlink/uplink airtime split

use crate::{LinkBudgetError, Result};
use serde::{Deserialize, Serialize};

/// Smallest configurable downlink share (%)
pub const TDD_DL_MIN_PERCENT: u8 = 50;
/// Largest configurable downlink share (%)
pub const TDD_DL_MAX_PERCENT: u8 = 90;
/// Downlink share granularity (%)
pub const TDD_DL_STEP_PERCENT: u8 = 5;

/// Airtime split between downlink and uplink
///
/// Only the downlink share is stored; the uplink share is always its
/// complement, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TddSplit {
    downlink_percent: u8,
}

impl TddSplit {
    /// Split with a validated downlink share (50-90 %, steps of 5)
    pub fn new(downlink_percent: u8) -> Result<Self> {
        if !(TDD_DL_MIN_PERCENT..=TDD_DL_MAX_PERCENT).contains(&downlink_percent)
            || downlink_percent % TDD_DL_STEP_PERCENT != 0
        {
            return Err(LinkBudgetError::InvalidDutyCycle(downlink_percent));
        }
        Ok(Self { downlink_percent })
    }

    pub fn downlink_percent(&self) -> u8 {
        self.downlink_percent
    }

    pub fn uplink_percent(&self) -> u8 {
        100 - self.downlink_percent
    }

    pub fn downlink_throughput_mbps(&self, phy_rate_mbps: f64) -> f64 {
        effective_throughput_mbps(phy_rate_mbps, self.downlink_percent())
    }

    pub fn uplink_throughput_mbps(&self, phy_rate_mbps: f64) -> f64 {
        effective_throughput_mbps(phy_rate_mbps, self.uplink_percent())
    }
}

impl Default for TddSplit {
    fn default() -> Self {
        Self {
            downlink_percent: 70,
        }
    }
}

impl TryFrom<u8> for TddSplit {
    type Error = LinkBudgetError;

    fn try_from(downlink_percent: u8) -> Result<Self> {
        Self::new(downlink_percent)
    }
}

impl From<TddSplit> for u8 {
    fn from(split: TddSplit) -> Self {
        split.downlink_percent
    }
}

/// PHY rate weighted by the direction's share of airtime (Mbps)
pub fn effective_throughput_mbps(phy_rate_mbps: f64, duty_percent: u8) -> f64 {
    phy_rate_mbps * (f64::from(duty_percent) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_split() {
        let split = TddSplit::default();
        assert_eq!(split.downlink_percent(), 70);
        assert_eq!(split.uplink_percent(), 30);
    }

    #[test]
    fn test_split_always_sums_to_100() {
        for dl in (TDD_DL_MIN_PERCENT..=TDD_DL_MAX_PERCENT).step_by(TDD_DL_STEP_PERCENT as usize) {
            let split = TddSplit::new(dl).unwrap();
            assert_eq!(split.downlink_percent() + split.uplink_percent(), 100);
        }
    }

    #[test]
    fn test_invalid_split_rejected() {
        for dl in [0, 45, 52, 95, 100] {
            assert!(matches!(
                TddSplit::new(dl),
                Err(LinkBudgetError::InvalidDutyCycle(v)) if v == dl
            ));
        }
    }

    #[test]
    fn test_effective_throughput() {
        let split = TddSplit::new(70).unwrap();
        assert!((split.downlink_throughput_mbps(8.6) - 6.02).abs() < 1e-9);
        assert!((split.uplink_throughput_mbps(68.8) - 20.64).abs() < 1e-9);
        assert_eq!(effective_throughput_mbps(0.0, 90), 0.0);
    }

    #[test]
    fn test_serde_is_plain_percentage() {
        let split = TddSplit::new(80).unwrap();
        assert_eq!(serde_json::to_string(&split).unwrap(), "80");

        let parsed: TddSplit = serde_json::from_str("60").unwrap();
        assert_eq!(parsed.uplink_percent(), 40);
        assert!(serde_json::from_str::<TddSplit>("97").is_err());
    }
}
