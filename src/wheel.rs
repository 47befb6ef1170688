//! Wheel renderer.
//!
//! Draws the static wheel texture: `N` equal sectors starting at angle 0
//! ("3 o'clock") going clockwise, a word label along each bisector, pegs on the
//! segment boundaries and a two-tone hub. Spinning is a CSS rotation applied to
//! the whole canvas by the shell, so drawing depends only on the geometry and
//! the highlighted segment.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::catalog;

const PALETTE: [&str; 12] = [
    "#3b82f6", "#8b5cf6", "#ec4899", "#10b981", "#f97316", "#ef4444", "#fde047", "#6366f1",
    "#d946ef", "#0891b2", "#84cc16", "#f59e0b",
];
const HIGHLIGHT_FILL: &str = "#fbbf24";
const HIGHLIGHT_TEXT: &str = "#0c1445";
const LABEL_TEXT: &str = "#ffffff";
const SEPARATOR: &str = "#ffffff80";
const PEG_FILL: &str = "#d1d5db";
const PEG_STROKE: &str = "#4b5563";
const HUB_OUTER: &str = "#4b5563";
const HUB_INNER: &str = "#9ca3af";
const LABEL_FONT: &str = "bold 18px Montserrat, sans-serif";

const GLOW_BLUR: f64 = 30.0;
const LABEL_RADIUS_FRAC: f64 = 0.7;
const PEG_INSET: f64 = 15.0;
const PEG_RADIUS: f64 = 6.0;
const HUB_OUTER_RADIUS: f64 = 25.0;
const HUB_INNER_RADIUS: f64 = 18.0;

/// Sector layout on a square canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub segments: usize,
}

impl WheelGeometry {
    /// Wheel filling a `size`×`size` canvas.
    pub fn for_canvas(size: u32, segments: usize) -> Self {
        let half = size as f64 / 2.0;
        Self {
            cx: half,
            cy: half,
            radius: half,
            segments: segments.max(1),
        }
    }

    pub fn segment_angle(&self) -> f64 {
        TAU / self.segments as f64
    }

    /// Start and end angle (radians) of segment `i`.
    pub fn span(&self, i: usize) -> (f64, f64) {
        let a = self.segment_angle();
        let start = (i % self.segments) as f64 * a;
        (start, start + a)
    }

    /// Angle of the bisector of segment `i`, where its label is drawn.
    pub fn bisector(&self, i: usize) -> f64 {
        let (start, end) = self.span(i);
        (start + end) / 2.0
    }

    /// Peg centre on the boundary that starts segment `i`.
    pub fn peg(&self, i: usize) -> (f64, f64) {
        let (angle, _) = self.span(i);
        let r = self.radius - PEG_INSET;
        (self.cx + r * angle.cos(), self.cy + r * angle.sin())
    }
}

/// Word written on segment `i`.
pub fn label(i: usize) -> &'static str {
    catalog::get(i).correct
}

/// Fill colour for segment `i`.
pub fn segment_fill(i: usize, highlighted: Option<usize>) -> &'static str {
    if highlighted == Some(i) {
        HIGHLIGHT_FILL
    } else {
        PALETTE[i % PALETTE.len()]
    }
}

fn sector_path(ctx: &CanvasRenderingContext2d, g: &WheelGeometry, i: usize) {
    let (start, end) = g.span(i);
    ctx.begin_path();
    ctx.move_to(g.cx, g.cy);
    ctx.arc(g.cx, g.cy, g.radius, start, end).ok();
    ctx.line_to(g.cx, g.cy);
}

/// Draw the full wheel. `highlighted` is the segment shown with the glow, if any.
pub fn draw_wheel(ctx: &CanvasRenderingContext2d, g: &WheelGeometry, highlighted: Option<usize>) {
    let size = g.radius * 2.0;
    ctx.clear_rect(g.cx - g.radius, g.cy - g.radius, size, size);

    for i in 0..g.segments {
        let selected = highlighted == Some(i);

        ctx.set_fill_style_str(segment_fill(i, highlighted));
        sector_path(ctx, g, i);
        ctx.fill();

        if selected {
            // second pass with a blur gives the glow
            ctx.set_shadow_color(HIGHLIGHT_FILL);
            ctx.set_shadow_blur(GLOW_BLUR);
            sector_path(ctx, g, i);
            ctx.fill();
            ctx.set_shadow_blur(0.0);
        }

        ctx.save();
        ctx.set_stroke_style_str(SEPARATOR);
        ctx.set_line_width(3.0);
        sector_path(ctx, g, i);
        ctx.stroke();
        ctx.restore();

        ctx.save();
        ctx.set_fill_style_str(if selected { HIGHLIGHT_TEXT } else { LABEL_TEXT });
        ctx.set_font(LABEL_FONT);
        ctx.set_text_baseline("middle");
        ctx.set_text_align("center");
        ctx.translate(g.cx, g.cy).ok();
        ctx.rotate(g.bisector(i)).ok();
        ctx.fill_text(label(i), g.radius * LABEL_RADIUS_FRAC, 0.0).ok();
        ctx.restore();
    }

    // Pegs
    for i in 0..g.segments {
        let (px, py) = g.peg(i);
        ctx.begin_path();
        ctx.arc(px, py, PEG_RADIUS, 0.0, TAU).ok();
        ctx.set_fill_style_str(PEG_FILL);
        ctx.fill();
        ctx.set_stroke_style_str(PEG_STROKE);
        ctx.set_line_width(2.0);
        ctx.stroke();
    }

    // Hub
    ctx.begin_path();
    ctx.arc(g.cx, g.cy, HUB_OUTER_RADIUS, 0.0, TAU).ok();
    ctx.set_fill_style_str(HUB_OUTER);
    ctx.fill();
    ctx.begin_path();
    ctx.arc(g.cx, g.cy, HUB_INNER_RADIUS, 0.0, TAU).ok();
    ctx.set_fill_style_str(HUB_INNER);
    ctx.fill();
}
