//! Obstacles around the link: lattice tower, trees and CPE houses
//!
//! Purely decorative geometry. Tree sizes are random and never feed the
//! link budget.

use crate::{Point, Rect, Segment};
use link_budget::{CPE_HEIGHT_M, MAX_DISTANCE_M};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Tower
// ============================================================================

/// Lattice tower width at ground level (m)
pub const TOWER_BASE_WIDTH_M: f64 = 8.0;
/// Lattice tower width at the top (m)
pub const TOWER_TOP_WIDTH_M: f64 = 3.0;
/// Number of stacked lattice sections
pub const TOWER_SEGMENTS: usize = 12;
/// Mast between tower top and AP panel (m)
pub const AP_MAST_HEIGHT_M: f64 = 1.0;

const LEG_WIDTH: f64 = 3.0;
const BRACE_WIDTH: f64 = 1.5;
const MAST_WIDTH: f64 = 4.0;

/// Tapered lattice tower carrying the AP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub legs: Vec<Segment>,
    pub braces: Vec<Segment>,
    pub mast: Segment,
    pub panel: Rect,
}

impl Tower {
    pub fn new(ap_height_m: f64) -> Self {
        let width_at = |y: f64| {
            TOWER_BASE_WIDTH_M - (TOWER_BASE_WIDTH_M - TOWER_TOP_WIDTH_M) * (y / ap_height_m)
        };
        let section = ap_height_m / TOWER_SEGMENTS as f64;

        let mut legs = Vec::with_capacity(TOWER_SEGMENTS * 2);
        let mut braces = Vec::with_capacity(TOWER_SEGMENTS);

        for i in 0..TOWER_SEGMENTS {
            let y0 = i as f64 * section;
            let y1 = (i + 1) as f64 * section;
            let (w0, w1) = (width_at(y0) / 2.0, width_at(y1) / 2.0);

            legs.push(Segment::new(Point::new(-w0, y0), Point::new(-w1, y1), LEG_WIDTH));
            legs.push(Segment::new(Point::new(w0, y0), Point::new(w1, y1), LEG_WIDTH));

            // zig-zag: alternate the diagonal direction per section
            let brace = if i % 2 == 0 {
                Segment::new(Point::new(-w0, y0), Point::new(w1, y1), BRACE_WIDTH)
            } else {
                Segment::new(Point::new(w0, y0), Point::new(-w1, y1), BRACE_WIDTH)
            };
            braces.push(brace);
        }

        let mast_top = ap_height_m + AP_MAST_HEIGHT_M;
        Self {
            legs,
            braces,
            mast: Segment::new(Point::new(0.0, ap_height_m), Point::new(0.0, mast_top), MAST_WIDTH),
            panel: Rect::new(-1.1, 1.1, mast_top - 1.2, mast_top + 1.2),
        }
    }
}

// ============================================================================
// Trees
// ============================================================================

/// Tallest a tree may grow (m)
pub const TREE_MAX_HEIGHT_M: f64 = 5.0;
/// Number of trees along the path
pub const TREE_COUNT: usize = 7;
/// Keep trees this far from either end of the plot (m)
const TREE_MARGIN_M: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub x_m: f64,
    pub trunk_height_m: f64,
    pub canopy_height_m: f64,
}

impl Tree {
    /// Tree with random trunk (1.2-1.8 m) and canopy, capped at 5 m overall
    pub fn random<R: Rng>(x_m: f64, rng: &mut R) -> Self {
        let trunk_height_m = rng.gen_range(1.2..1.8);
        let canopy_height_m = rng.gen_range(2.0..TREE_MAX_HEIGHT_M - trunk_height_m);
        Self {
            x_m,
            trunk_height_m,
            canopy_height_m,
        }
    }

    pub fn height_m(&self) -> f64 {
        self.trunk_height_m + self.canopy_height_m
    }

    pub fn trunk(&self) -> Rect {
        Rect::new(self.x_m - 0.5, self.x_m + 0.5, 0.0, self.trunk_height_m)
    }

    /// Bounding box of the canopy ellipse
    pub fn canopy(&self) -> Rect {
        Rect::new(self.x_m - 2.0, self.x_m + 2.0, self.trunk_height_m, self.height_m())
    }
}

/// Trees evenly spaced between 180 m and 1320 m
pub fn plant_trees<R: Rng>(rng: &mut R) -> Vec<Tree> {
    let first = TREE_MARGIN_M;
    let last = MAX_DISTANCE_M - TREE_MARGIN_M;
    let step = (last - first) / (TREE_COUNT - 1) as f64;
    (0..TREE_COUNT)
        .map(|i| Tree::random(first + i as f64 * step, rng))
        .collect()
}

// ============================================================================
// Houses
// ============================================================================

/// Roof height of a CPE house (m)
pub const HOUSE_HEIGHT_M: f64 = 6.0;
const HOUSE_HALF_WIDTH_M: f64 = 14.0;
const ROOF_BAND_M: f64 = 0.4;

/// House with the CPE pole on its roof
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub x_m: f64,
    pub walls: Rect,
    pub roof: Rect,
    pub pole: Segment,
    pub radio: Rect,
}

impl House {
    pub fn at(x_m: f64) -> Self {
        Self {
            x_m,
            walls: Rect::new(x_m - HOUSE_HALF_WIDTH_M, x_m + HOUSE_HALF_WIDTH_M, 0.0, HOUSE_HEIGHT_M),
            roof: Rect::new(
                x_m - HOUSE_HALF_WIDTH_M,
                x_m + HOUSE_HALF_WIDTH_M,
                HOUSE_HEIGHT_M - ROOF_BAND_M,
                HOUSE_HEIGHT_M,
            ),
            pole: Segment::new(Point::new(x_m, HOUSE_HEIGHT_M), Point::new(x_m, CPE_HEIGHT_M), 3.0),
            radio: Rect::new(x_m - 1.4, x_m - 0.2, CPE_HEIGHT_M - 0.4, CPE_HEIGHT_M + 0.4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tower_tapers() {
        let tower = Tower::new(20.0);
        assert_eq!(tower.legs.len(), 2 * TOWER_SEGMENTS);
        assert_eq!(tower.braces.len(), TOWER_SEGMENTS);

        let base = tower.legs[1].from;
        let top = tower.legs[2 * TOWER_SEGMENTS - 1].to;
        assert!((base.x - TOWER_BASE_WIDTH_M / 2.0).abs() < 1e-9);
        assert!((top.x - TOWER_TOP_WIDTH_M / 2.0).abs() < 1e-9);
        assert!((top.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_braces_zig_zag() {
        let tower = Tower::new(25.0);
        assert!(tower.braces[0].from.x < 0.0 && tower.braces[0].to.x > 0.0);
        assert!(tower.braces[1].from.x > 0.0 && tower.braces[1].to.x < 0.0);
    }

    #[test]
    fn test_mast_and_panel() {
        let tower = Tower::new(30.0);
        assert_eq!(tower.mast.from.y, 30.0);
        assert_eq!(tower.mast.to.y, 31.0);
        assert!((tower.panel.y0 - 29.8).abs() < 1e-9);
        assert!((tower.panel.y1 - 32.2).abs() < 1e-9);
    }

    #[test]
    fn test_trees_never_exceed_max_height() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            for tree in plant_trees(&mut rng) {
                assert!(tree.height_m() <= TREE_MAX_HEIGHT_M + 1e-9);
                assert!((1.2..1.8).contains(&tree.trunk_height_m));
                assert!(tree.canopy_height_m >= 2.0);
            }
        }
    }

    #[test]
    fn test_tree_positions() {
        let mut rng = StdRng::seed_from_u64(1);
        let trees = plant_trees(&mut rng);
        assert_eq!(trees.len(), TREE_COUNT);
        assert_eq!(trees[0].x_m, 180.0);
        assert!((trees[TREE_COUNT - 1].x_m - 1320.0).abs() < 1e-9);
        assert!((trees[1].x_m - 370.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_trees_repeat() {
        let a = plant_trees(&mut StdRng::seed_from_u64(42));
        let b = plant_trees(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_house_layout() {
        let house = House::at(410.0);
        assert_eq!(house.walls.x0, 396.0);
        assert_eq!(house.walls.x1, 424.0);
        assert_eq!(house.walls.y1, HOUSE_HEIGHT_M);
        assert_eq!(house.pole.to.y, CPE_HEIGHT_M);
        assert!(house.radio.y0 < CPE_HEIGHT_M && house.radio.y1 > CPE_HEIGHT_M);
    }
}
