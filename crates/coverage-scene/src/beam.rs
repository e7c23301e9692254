//! Vertical beam cone of the AP sector antenna
//!
//! The antenna has a fixed 10° vertical beamwidth. Mechanical down-tilt
//! rotates both edges towards the ground:
//!
//! ```text
//! θ_upper = -(tilt - 5°)
//! θ_lower = -(tilt + 5°)
//! y(x)    = h_AP + x · tan(θ)
//! ```

use crate::Point;
use link_budget::MAX_DISTANCE_M;
use serde::{Deserialize, Serialize};

/// Full vertical beamwidth (deg)
pub const VERTICAL_BEAMWIDTH_DEG: f64 = 10.0;

/// Half of the vertical beamwidth (deg)
pub const HALF_BEAMWIDTH_DEG: f64 = VERTICAL_BEAMWIDTH_DEG / 2.0;

/// Nearest horizontal distance sampled along the beam edges (m)
const SAMPLE_START_M: f64 = 1.0;

/// Default number of samples per beam edge
pub const DEFAULT_SAMPLES: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamCone {
    pub ap_height_m: f64,
    pub tilt_deg: f64,
}

/// Horizontal span over which the beam covers a given height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Where the lower edge reaches the height (m)
    pub near_m: Option<f64>,
    /// Where the upper edge reaches the height; `None` if it never descends to it (m)
    pub far_m: Option<f64>,
}

impl BeamCone {
    pub fn new(ap_height_m: f64, tilt_deg: f64) -> Self {
        Self {
            ap_height_m,
            tilt_deg,
        }
    }

    /// Elevation of the upper edge, negative below horizontal (deg)
    pub fn upper_angle_deg(&self) -> f64 {
        -(self.tilt_deg - HALF_BEAMWIDTH_DEG)
    }

    /// Elevation of the lower edge, negative below horizontal (deg)
    pub fn lower_angle_deg(&self) -> f64 {
        -(self.tilt_deg + HALF_BEAMWIDTH_DEG)
    }

    pub fn upper_height_at(&self, x_m: f64) -> f64 {
        edge_height(self.ap_height_m, self.upper_angle_deg(), x_m)
    }

    pub fn lower_height_at(&self, x_m: f64) -> f64 {
        edge_height(self.ap_height_m, self.lower_angle_deg(), x_m)
    }

    /// Whether a point at (x, y) lies inside the cone, edges included
    pub fn contains(&self, x_m: f64, y_m: f64) -> bool {
        x_m >= 0.0 && y_m >= self.lower_height_at(x_m) && y_m <= self.upper_height_at(x_m)
    }

    pub fn footprint_at(&self, height_m: f64) -> Footprint {
        Footprint {
            near_m: edge_crossing(self.ap_height_m, self.lower_angle_deg(), height_m),
            far_m: edge_crossing(self.ap_height_m, self.upper_angle_deg(), height_m),
        }
    }

    /// Evenly spaced x positions from 1 m to the maximum CPE distance
    pub fn sample_distances(samples: usize) -> Vec<f64> {
        let n = samples.max(2);
        let step = (MAX_DISTANCE_M - SAMPLE_START_M) / (n - 1) as f64;
        (0..n).map(|i| SAMPLE_START_M + i as f64 * step).collect()
    }

    pub fn upper_edge(&self, samples: usize) -> Vec<Point> {
        Self::sample_distances(samples)
            .into_iter()
            .map(|x| Point::new(x, self.upper_height_at(x)))
            .collect()
    }

    pub fn lower_edge(&self, samples: usize) -> Vec<Point> {
        Self::sample_distances(samples)
            .into_iter()
            .map(|x| Point::new(x, self.lower_height_at(x)))
            .collect()
    }

    /// Closed outline: upper edge outwards, lower edge back towards the AP
    pub fn polygon(&self, samples: usize) -> Vec<Point> {
        let mut outline = self.upper_edge(samples);
        outline.extend(self.lower_edge(samples).into_iter().rev());
        outline
    }
}

fn edge_height(ap_height_m: f64, angle_deg: f64, x_m: f64) -> f64 {
    ap_height_m + x_m * angle_deg.to_radians().tan()
}

fn edge_crossing(ap_height_m: f64, angle_deg: f64, height_m: f64) -> Option<f64> {
    let slope = angle_deg.to_radians().tan();
    let drop = height_m - ap_height_m;
    if drop == 0.0 {
        return Some(0.0);
    }
    if slope == 0.0 {
        return None;
    }
    let x = drop / slope;
    (x >= 0.0).then_some(x)
}
