//! AP–CPE Vertical Coverage Scene
//!
//! Side view of one AP sector for visual coverage inspection:
//! - 10° vertical beam cone with mechanical down-tilt
//! - Tapered lattice tower, mast and AP panel
//! - Trees (≤ 5 m) along the path
//! - One house per CPE with the radio at 7 m
//! - CPE markers carrying the link-budget hover text
//!
//! The scene is a plain serializable model ([`Scene`]) plus an SVG renderer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod beam;
pub mod scene;
pub mod svg;
pub mod terrain;
pub mod tooltip;

pub use beam::{BeamCone, Footprint};
pub use scene::{CpeMarker, Scene};
pub use svg::{render_svg, write_svg};
pub use terrain::{House, Tower, Tree};
pub use tooltip::{tooltip_lines, tooltip_text};

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Link budget error: {0}")]
    Budget(#[from] link_budget::LinkBudgetError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// Position in the side view: x along the ground from the tower, y above ground (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Straight stroke with a line width in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub width: f64,
}

impl Segment {
    pub fn new(from: Point, to: Point, width: f64) -> Self {
        Self { from, to, width }
    }
}

/// Axis-aligned box in scene metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }
}
