//! Snapshot loading from JSON files

use crate::{CoverageConfig, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Load and validate a coverage snapshot
///
/// Missing sections fall back to the defaults of [`CoverageConfig`].
pub fn load_config(path: impl AsRef<Path>) -> Result<CoverageConfig> {
    let path = path.as_ref();
    info!("Loading coverage parameters from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: CoverageConfig = serde_json::from_reader(reader)?;
    config.validate()?;

    info!(
        "Loaded {} CPE sites (AP {} m, tilt {:.1}°)",
        config.cpes.len(),
        config.ap.height_m,
        config.ap.tilt_deg
    );

    Ok(config)
}

/// Load a snapshot if a path is given, otherwise use the defaults
pub fn load_or_default(path: Option<&Path>) -> Result<CoverageConfig> {
    match path {
        Some(p) => load_config(p),
        None => {
            info!("No parameter file given, using default deployment");
            Ok(CoverageConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Environment, LinkBudgetError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let json = r#"{
            "ap": {"height_m": 30.0, "tilt_deg": 3.5,
                   "radio": {"tx_power_dbm": 25.0, "antenna_gain_dbi": 19.0, "cable_loss_db": 1.0}},
            "link": {"environment": "Suburban", "fade_margin_db": 12.0},
            "cpes": [
                {"horizontal_distance_m": 400.0, "noise_floor_dbm": -72.0},
                {"horizontal_distance_m": 1200.0, "noise_floor_dbm": -60.0}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.ap.height_m, 30.0);
        assert_eq!(config.ap.radio.eirp_dbm(), 43.0);
        assert_eq!(config.link.environment, Environment::Suburban);
        assert_eq!(config.cpes.len(), 2);
    }

    #[test]
    fn test_load_rejects_invalid_environment() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"link": {"environment": "Jungle"}}"#).unwrap();

        assert!(matches!(load_config(file.path()), Err(LinkBudgetError::Json(_))));
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"cpes": [{"horizontal_distance_m": 2000.0, "noise_floor_dbm": -70.0}]}"#)
            .unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(LinkBudgetError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/coverage.json");
        assert!(matches!(result, Err(LinkBudgetError::Io(_))));
    }

    #[test]
    fn test_default_when_no_path() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config, CoverageConfig::default());
    }
}
