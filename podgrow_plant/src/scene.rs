// Retained draw-command scene.
//
// The renderer does not touch a drawing surface. Like the tree mesher
// that emits geometry buffers for the presenter to upload, `render()`
// emits a flat, ordered list of primitive draw instructions; a
// backend-specific presenter (see `podgrow_canvas`) replays them. This
// keeps the data flow one-way — composition code cannot read pixels or
// leak hidden surface state between frames — and makes a frame a plain
// value: comparable in tests, serializable for snapshots.
//
// Commands are deliberately few and low-level. Everything a plant needs
// reduces to tapered/plain polyline strokes, filled circles and rotated
// ellipses, rounded rectangles (solid or vertical-gradient fill), and
// radial glows.
//
// See also: `renderer.rs` which produces scenes, `curve.rs` whose
// tapered-stroke emitter writes into a scene, `podgrow_canvas::raster`
// which consumes them.

use crate::palette::Rgba;
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Fill style for rectangle commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Rgba),
    /// Linear gradient from `top` at the rect's top edge to `bottom` at
    /// its bottom edge.
    VerticalGradient { top: Rgba, bottom: Rgba },
}

/// One primitive draw instruction, in paint order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// Polyline stroked at a constant width.
    Stroke {
        points: Vec<Point>,
        width: f32,
        color: Rgba,
    },
    /// Polyline whose stroke width interpolates linearly from
    /// `start_width` at the first point to `end_width` at the last.
    TaperedStroke {
        points: Vec<Point>,
        start_width: f32,
        end_width: f32,
        color: Rgba,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Rgba,
    },
    /// Ellipse rotated by `rotation` radians about its center.
    FillEllipse {
        center: Point,
        rx: f32,
        ry: f32,
        rotation: f32,
        color: Rgba,
    },
    FillRoundedRect {
        min: Point,
        max: Point,
        corner_radius: f32,
        fill: Fill,
    },
    /// Radial falloff from `inner` at the center to `outer` at `radius`.
    /// Used for LED light pools, harvest glows, and sparkle halos.
    RadialGlow {
        center: Point,
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    },
}

/// An ordered frame's worth of draw commands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub cmds: Vec<DrawCmd>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}
