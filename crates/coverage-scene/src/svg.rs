//! SVG rendering of a [`Scene`]
//!
//! Scene metres are mapped linearly onto a fixed canvas. CPE markers carry
//! their tooltip as an SVG `<title>`, which browsers show on hover.

use crate::{Point, Rect, Result, Scene, Segment};
use std::fmt::Write;
use std::path::Path;
use tracing::info;

pub const CANVAS_WIDTH_PX: f64 = 1200.0;
pub const CANVAS_HEIGHT_PX: f64 = 520.0;
const MARGIN_LEFT_PX: f64 = 60.0;
const MARGIN_RIGHT_PX: f64 = 20.0;
const MARGIN_TOP_PX: f64 = 40.0;
const MARGIN_BOTTOM_PX: f64 = 50.0;

const X_TICK_M: f64 = 250.0;
const Y_TICK_M: f64 = 5.0;
const CPE_RADIUS_PX: f64 = 6.0;

/// Maps scene metres to canvas pixels (y grows downwards)
struct Canvas {
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Canvas {
    fn plot_width(&self) -> f64 {
        CANVAS_WIDTH_PX - MARGIN_LEFT_PX - MARGIN_RIGHT_PX
    }

    fn plot_height(&self) -> f64 {
        CANVAS_HEIGHT_PX - MARGIN_TOP_PX - MARGIN_BOTTOM_PX
    }

    fn px(&self, x: f64) -> f64 {
        let (x0, x1) = self.x_range;
        MARGIN_LEFT_PX + (x - x0) / (x1 - x0) * self.plot_width()
    }

    fn py(&self, y: f64) -> f64 {
        let (y0, y1) = self.y_range;
        MARGIN_TOP_PX + (1.0 - (y - y0) / (y1 - y0)) * self.plot_height()
    }

    fn points(&self, points: &[Point]) -> String {
        points
            .iter()
            .map(|p| format!("{:.1},{:.1}", self.px(p.x), self.py(p.y)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn line(&self, out: &mut String, seg: &Segment, stroke: &str) -> std::fmt::Result {
        writeln!(
            out,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"/>"#,
            self.px(seg.from.x),
            self.py(seg.from.y),
            self.px(seg.to.x),
            self.py(seg.to.y),
            stroke,
            seg.width
        )
    }

    fn rect(&self, out: &mut String, r: &Rect, fill: &str) -> std::fmt::Result {
        let x0 = self.px(r.x0);
        let x1 = self.px(r.x1);
        let top = self.py(r.y1);
        let bottom = self.py(r.y0);
        writeln!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x0,
            top,
            (x1 - x0).max(1.0),
            (bottom - top).max(1.0),
            fill
        )
    }

    fn ellipse(&self, out: &mut String, r: &Rect, fill: &str) -> std::fmt::Result {
        let cx = self.px((r.x0 + r.x1) / 2.0);
        let cy = self.py((r.y0 + r.y1) / 2.0);
        let rx = (self.px(r.x1) - self.px(r.x0)).abs() / 2.0;
        let ry = (self.py(r.y0) - self.py(r.y1)).abs() / 2.0;
        writeln!(
            out,
            r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{}"/>"#,
            cx,
            cy,
            rx.max(2.0),
            ry,
            fill
        )
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_svg(scene: &Scene) -> Result<String> {
    let canvas = Canvas {
        x_range: scene.x_range,
        y_range: scene.y_range,
    };
    let mut out = String::new();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = CANVAS_WIDTH_PX,
        h = CANVAS_HEIGHT_PX
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="24" text-anchor="middle" font-size="18" font-family="sans-serif">{}</text>"#,
        CANVAS_WIDTH_PX / 2.0,
        escape_xml(&scene.title)
    )?;

    axes(&mut out, &canvas, scene)?;

    writeln!(
        out,
        r#"<polygon points="{}" fill="orange" fill-opacity="0.15" stroke="none"/>"#,
        canvas.points(&scene.beam_outline)
    )?;
    for (edge, name) in [(&scene.upper_edge, "upper"), (&scene.lower_edge, "lower")] {
        writeln!(
            out,
            r#"<polyline class="beam-{}" points="{}" fill="none" stroke="orange" stroke-width="2" stroke-dasharray="8 4"/>"#,
            name,
            canvas.points(edge)
        )?;
    }

    canvas.line(&mut out, &scene.ground, "saddlebrown")?;

    for seg in scene.tower.legs.iter() {
        canvas.line(&mut out, seg, "dimgray")?;
    }
    for seg in scene.tower.braces.iter() {
        canvas.line(&mut out, seg, "gray")?;
    }
    canvas.line(&mut out, &scene.tower.mast, "black")?;
    canvas.rect(&mut out, &scene.tower.panel, "steelblue")?;

    for tree in scene.trees.iter() {
        canvas.rect(&mut out, &tree.trunk(), "sienna")?;
        canvas.ellipse(&mut out, &tree.canopy(), "forestgreen")?;
    }

    for house in scene.houses.iter() {
        canvas.rect(&mut out, &house.walls, "tan")?;
        canvas.rect(&mut out, &house.roof, "firebrick")?;
        canvas.line(&mut out, &house.pole, "black")?;
        canvas.rect(&mut out, &house.radio, "dimgray")?;
    }

    for marker in scene.cpes.iter() {
        let fill = if marker.in_beam { "seagreen" } else { "crimson" };
        writeln!(
            out,
            r#"<circle class="cpe" cx="{:.1}" cy="{:.1}" r="{}" fill="{}" stroke="black">"#,
            canvas.px(marker.position.x),
            canvas.py(marker.position.y),
            CPE_RADIUS_PX,
            fill
        )?;
        writeln!(out, "<title>{}</title>", escape_xml(&marker.tooltip.join("\n")))?;
        writeln!(out, "</circle>")?;
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}

fn axes(out: &mut String, canvas: &Canvas, scene: &Scene) -> std::fmt::Result {
    let (x0, x1) = scene.x_range;
    let (y0, y1) = scene.y_range;
    let left = canvas.px(x0);
    let bottom = canvas.py(y0);

    writeln!(
        out,
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        left,
        bottom,
        canvas.px(x1),
        bottom
    )?;
    writeln!(
        out,
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        left,
        bottom,
        left,
        canvas.py(y1)
    )?;

    let mut x = x0;
    while x <= x1 + 1e-9 {
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" font-family="sans-serif">{:.0}</text>"#,
            canvas.px(x),
            bottom + 16.0,
            x
        )?;
        x += X_TICK_M;
    }
    let mut y = y0;
    while y <= y1 + 1e-9 {
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" font-family="sans-serif">{:.0}</text>"#,
            left - 6.0,
            canvas.py(y) + 4.0,
            y
        )?;
        y += Y_TICK_M;
    }

    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13" font-family="sans-serif">Horizontal Distance (m)</text>"#,
        MARGIN_LEFT_PX + canvas.plot_width() / 2.0,
        CANVAS_HEIGHT_PX - 10.0
    )?;
    writeln!(
        out,
        r#"<text x="16" y="{:.1}" transform="rotate(-90 16 {:.1})" text-anchor="middle" font-size="13" font-family="sans-serif">Height (m)</text>"#,
        MARGIN_TOP_PX + canvas.plot_height() / 2.0,
        MARGIN_TOP_PX + canvas.plot_height() / 2.0
    )
}

pub fn write_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let svg = render_svg(scene)?;
    std::fs::write(path, svg)?;
    info!("Wrote coverage scene to {}", path.display());
    Ok(())
}
