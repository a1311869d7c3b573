// Parametric curve math and organic shape generation.
//
// Cubic Beziers model every stem and branch. Curve *generation* is
// seed-driven rather than drawing from a shared random source: the same
// seed always yields the same silhouette, which is what keeps a plant
// stable frame-to-frame while letting different plant instances differ.
// Curves are transient — created, sampled, and discarded within a single
// render call; nothing here persists.
//
// Coordinates are y-down logical pixels (see `types.rs`), so "up" is
// negative y: stems rise by subtracting height, branch lift subtracts
// from y.
//
// See also: `renderer.rs` for how stems/branches are composed,
// `scene.rs` for the command list `stroke_tapered_bezier` writes into,
// `podgrow_noise` for the seeded scalar source.

use crate::palette::Rgba;
use crate::scene::{DrawCmd, Scene};
use crate::types::Point;
use podgrow_noise::seeded_random;

/// A cubic Bezier: start/end interpolated through two control points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate the curve at parameter `t` via the Bernstein basis.
///
/// `t` is expected in [0, 1]; values outside extrapolate mathematically
/// rather than clamping — callers own parameter validity.
pub fn evaluate_bezier(curve: &BezierCurve, t: f32) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point::new(
        b0 * curve.start.x + b1 * curve.control1.x + b2 * curve.control2.x + b3 * curve.end.x,
        b0 * curve.start.y + b1 * curve.control1.y + b2 * curve.control2.y + b3 * curve.end.y,
    )
}

/// Direction of travel at parameter `t`, in radians, from the curve's
/// first derivative.
pub fn bezier_tangent(curve: &BezierCurve, t: f32) -> f32 {
    let u = 1.0 - t;
    let dx = 3.0 * u * u * (curve.control1.x - curve.start.x)
        + 6.0 * u * t * (curve.control2.x - curve.control1.x)
        + 3.0 * t * t * (curve.end.x - curve.control2.x);
    let dy = 3.0 * u * u * (curve.control1.y - curve.start.y)
        + 6.0 * u * t * (curve.control2.y - curve.control1.y)
        + 3.0 * t * t * (curve.end.y - curve.control2.y);
    dy.atan2(dx)
}

/// Sample the curve at `count + 1` evenly spaced parameter values.
pub fn bezier_points(curve: &BezierCurve, count: usize) -> Vec<Point> {
    let count = count.max(1);
    (0..=count)
        .map(|i| evaluate_bezier(curve, i as f32 / count as f32))
        .collect()
}

/// Polyline-approximated arc length.
pub fn bezier_length(curve: &BezierCurve, segments: usize) -> f32 {
    let points = bezier_points(curve, segments);
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Build a stem curve rising `height` units from `start`.
///
/// Control points wobble horizontally by a seeded offset proportional to
/// `wobble_amount * height`, giving each plant a unique but deterministic
/// silhouette for a given seed. The tip drifts half as far as the body so
/// stems lean rather than shear.
pub fn generate_stem_curve(start: Point, height: f32, wobble_amount: f32, seed: f32) -> BezierCurve {
    let wobble = wobble_amount * height;
    let w1 = (seeded_random(seed) - 0.5) * 2.0 * wobble;
    let w2 = (seeded_random(seed + 1.0) - 0.5) * 2.0 * wobble;
    let w3 = (seeded_random(seed + 2.0) - 0.5) * wobble;

    BezierCurve {
        start,
        control1: Point::new(start.x + w1, start.y - height * 0.33),
        control2: Point::new(start.x + w2, start.y - height * 0.66),
        end: Point::new(start.x + w3, start.y - height),
    }
}

/// Build a side-branch curve departing `start` at `angle` radians for
/// `length` units, with an upward lift proportional to
/// `length * curvature` — branches arc toward the light instead of
/// shooting out straight.
pub fn generate_branch_curve(start: Point, angle: f32, length: f32, curvature: f32) -> BezierCurve {
    let dx = angle.cos();
    let dy = angle.sin();
    let lift = length * curvature;

    BezierCurve {
        start,
        control1: Point::new(
            start.x + dx * length * 0.33,
            start.y + dy * length * 0.33 - lift * 0.25,
        ),
        control2: Point::new(
            start.x + dx * length * 0.66,
            start.y + dy * length * 0.66 - lift * 0.6,
        ),
        end: Point::new(start.x + dx * length, start.y + dy * length - lift),
    }
}

/// Emit the curve as a tapered stroke: `segments` straight sub-segments
/// whose width interpolates linearly from `start_thickness` to
/// `end_thickness`. The segment count is a quality/performance knob, not
/// semantics — the presenter lerps width along whatever it is given.
pub fn stroke_tapered_bezier(
    scene: &mut Scene,
    curve: &BezierCurve,
    start_thickness: f32,
    end_thickness: f32,
    color: Rgba,
    segments: usize,
) {
    scene.push(DrawCmd::TaperedStroke {
        points: bezier_points(curve, segments),
        start_width: start_thickness,
        end_width: end_thickness,
        color,
    });
}

// ---------------------------------------------------------------------------
// Elementary 2D helpers
// ---------------------------------------------------------------------------

pub fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

pub fn distance(a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Rotate `p` about `origin` by `angle` radians.
pub fn rotate_point(p: Point, origin: Point, angle: f32) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = p.x - origin.x;
    let dy = p.y - origin.y;
    Point::new(
        origin.x + dx * cos - dy * sin,
        origin.y + dx * sin + dy * cos,
    )
}
