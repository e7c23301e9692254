//! Scene assembly from a parameter snapshot and its link-budget records

use crate::beam::DEFAULT_SAMPLES;
use crate::terrain::plant_trees;
use crate::tooltip::tooltip_lines;
use crate::{BeamCone, House, Point, Result, Segment, Tower, Tree};
use link_budget::{evaluate_all, CoverageConfig, CpeRecord, CPE_HEIGHT_M, MAX_DISTANCE_M};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, warn};

/// Headroom above the AP in the plotted y range (m)
const Y_HEADROOM_M: f64 = 12.0;
const GROUND_WIDTH: f64 = 4.0;

/// CPE position with its coverage state and hover text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpeMarker {
    pub index: usize,
    pub position: Point,
    /// Radio sits between the beam edges
    pub in_beam: bool,
    pub tooltip: Vec<String>,
}

/// Everything needed to draw the side view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub ground: Segment,
    pub tower: Tower,
    pub beam: BeamCone,
    pub upper_edge: Vec<Point>,
    pub lower_edge: Vec<Point>,
    pub beam_outline: Vec<Point>,
    pub trees: Vec<Tree>,
    pub houses: Vec<House>,
    pub cpes: Vec<CpeMarker>,
}

impl Scene {
    /// Lay out the scene for already evaluated records
    pub fn build<R: Rng>(config: &CoverageConfig, records: &[CpeRecord], rng: &mut R) -> Self {
        let beam = BeamCone::new(config.ap.height_m, config.ap.tilt_deg);

        let cpes: Vec<CpeMarker> = records
            .iter()
            .map(|record| {
                let x = record.horizontal_distance_m;
                CpeMarker {
                    index: record.index,
                    position: Point::new(x, CPE_HEIGHT_M),
                    in_beam: beam.contains(x, CPE_HEIGHT_M),
                    tooltip: tooltip_lines(record),
                }
            })
            .collect();

        let covered = cpes.iter().filter(|m| m.in_beam).count();
        info!("{} of {} CPEs inside the vertical beam", covered, cpes.len());
        for marker in cpes.iter().filter(|m| !m.in_beam) {
            warn!(
                "CPE {} at {:.0} m is outside the {:.1}° down-tilted beam",
                marker.index, marker.position.x, config.ap.tilt_deg
            );
        }

        Self {
            title: format!(
                "AP–CPE Vertical Coverage ({}, fade margin {:.0} dB)",
                config.link.environment, config.link.fade_margin_db
            ),
            x_range: (0.0, MAX_DISTANCE_M),
            y_range: (0.0, config.ap.height_m + Y_HEADROOM_M),
            ground: Segment::new(Point::new(0.0, 0.0), Point::new(MAX_DISTANCE_M, 0.0), GROUND_WIDTH),
            tower: Tower::new(config.ap.height_m),
            beam,
            upper_edge: beam.upper_edge(DEFAULT_SAMPLES),
            lower_edge: beam.lower_edge(DEFAULT_SAMPLES),
            beam_outline: beam.polygon(DEFAULT_SAMPLES),
            trees: plant_trees(rng),
            houses: records
                .iter()
                .map(|r| House::at(r.horizontal_distance_m))
                .collect(),
            cpes,
        }
    }

    /// Evaluate the snapshot and lay out the scene in one step
    pub fn from_config<R: Rng>(config: &CoverageConfig, rng: &mut R) -> Result<Self> {
        let records = evaluate_all(config)?;
        Ok(Self::build(config, &records, rng))
    }

    pub fn covered_count(&self) -> usize {
        self.cpes.iter().filter(|m| m.in_beam).count()
    }

    /// Write the scene model as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}
