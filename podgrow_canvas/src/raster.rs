// Software rasterizer for plant scenes.
//
// `Canvas` is a dense RGBA8 pixel buffer (row-major, top-to-bottom) that
// replays a `Scene`'s draw commands in order with source-over blending.
// It is the reference presenter: small, dependency-free, and exact
// enough for pixel-level tests. A GPU presenter would consume the same
// command list.
//
// Rasterization is deliberately simple — per-command bounding-box scans
// with analytic inside tests (distance-to-segment for strokes, rotated
// implicit form for ellipses, corner-disc tests for rounded rects).
// Scenes are a few hundred commands of small primitives, so the scan
// cost is far below a frame budget; no spatial acceleration is needed.
//
// See also: `podgrow_plant::scene` for the command list being replayed,
// `session.rs` for the host loop that produces scenes each frame.

use podgrow_plant::palette::Rgba;
use podgrow_plant::scene::{DrawCmd, Fill, Scene};
use podgrow_plant::types::Point;

/// A dense RGBA8 pixel buffer presenter.
pub struct Canvas {
    width: u32,
    height: u32,
    /// RGBA8, row-major, top-to-bottom. Length = width * height * 4.
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        };
        canvas.clear(Rgba::new(0, 0, 0, 1.0));
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 buffer, for upload or encoding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel as `[r, g, b, a]`. Panics out of bounds — this is
    /// a test/debug accessor, not a hot path.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Fill the whole buffer with `color`, ignoring blending.
    pub fn clear(&mut self, color: Rgba) {
        let a = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = a;
        }
    }

    /// Replay a scene at 1:1 scale.
    pub fn execute(&mut self, scene: &Scene) {
        self.execute_scaled(scene, 1.0);
    }

    /// Replay a scene with every coordinate, width, and radius
    /// multiplied by `scale` — the device-pixel-ratio hook. Command
    /// coordinates stay in logical units; only the presenter scales.
    pub fn execute_scaled(&mut self, scene: &Scene, scale: f32) {
        for cmd in &scene.cmds {
            match cmd {
                DrawCmd::Stroke {
                    points,
                    width,
                    color,
                } => {
                    for pair in points.windows(2) {
                        self.stroke_segment(
                            scaled(pair[0], scale),
                            scaled(pair[1], scale),
                            width * scale,
                            *color,
                        );
                    }
                }
                DrawCmd::TaperedStroke {
                    points,
                    start_width,
                    end_width,
                    color,
                } => {
                    let segments = points.len().saturating_sub(1);
                    for (i, pair) in points.windows(2).enumerate() {
                        let t = (i as f32 + 0.5) / segments.max(1) as f32;
                        let w = start_width + (end_width - start_width) * t;
                        self.stroke_segment(
                            scaled(pair[0], scale),
                            scaled(pair[1], scale),
                            w * scale,
                            *color,
                        );
                    }
                }
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    let r = radius * scale;
                    self.fill_ellipse(scaled(*center, scale), r, r, 0.0, *color);
                }
                DrawCmd::FillEllipse {
                    center,
                    rx,
                    ry,
                    rotation,
                    color,
                } => {
                    self.fill_ellipse(
                        scaled(*center, scale),
                        rx * scale,
                        ry * scale,
                        *rotation,
                        *color,
                    );
                }
                DrawCmd::FillRoundedRect {
                    min,
                    max,
                    corner_radius,
                    fill,
                } => {
                    self.fill_rounded_rect(
                        scaled(*min, scale),
                        scaled(*max, scale),
                        corner_radius * scale,
                        *fill,
                    );
                }
                DrawCmd::RadialGlow {
                    center,
                    radius,
                    inner,
                    outer,
                } => {
                    self.radial_glow(scaled(*center, scale), radius * scale, *inner, *outer);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Primitive scans
    // -----------------------------------------------------------------------

    /// Source-over blend one pixel. Off-buffer writes are dropped.
    fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let a = color.a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let inv = 1.0 - a;
        self.pixels[i] = (color.r as f32 * a + self.pixels[i] as f32 * inv).round() as u8;
        self.pixels[i + 1] = (color.g as f32 * a + self.pixels[i + 1] as f32 * inv).round() as u8;
        self.pixels[i + 2] = (color.b as f32 * a + self.pixels[i + 2] as f32 * inv).round() as u8;
        let da = self.pixels[i + 3] as f32 / 255.0;
        self.pixels[i + 3] = ((a + da * inv) * 255.0).round() as u8;
    }

    fn stroke_segment(&mut self, a: Point, b: Point, width: f32, color: Rgba) {
        let half = (width * 0.5).max(0.35);
        let min_x = (a.x.min(b.x) - half).floor() as i32;
        let max_x = (a.x.max(b.x) + half).ceil() as i32;
        let min_y = (a.y.min(b.y) - half).floor() as i32;
        let max_y = (a.y.max(b.y) + half).ceil() as i32;

        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                // Distance from the pixel center to the segment.
                let t = if len_sq > 0.0 {
                    (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let cx = a.x + dx * t;
                let cy = a.y + dy * t;
                let dist = ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt();
                if dist <= half {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn fill_ellipse(&mut self, center: Point, rx: f32, ry: f32, rotation: f32, color: Rgba) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let extent = rx.max(ry);
        let min_x = (center.x - extent).floor() as i32;
        let max_x = (center.x + extent).ceil() as i32;
        let min_y = (center.y - extent).floor() as i32;
        let max_y = (center.y + extent).ceil() as i32;
        let (sin, cos) = rotation.sin_cos();

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                // Into the ellipse's local frame.
                let lx = dx * cos + dy * sin;
                let ly = -dx * sin + dy * cos;
                let q = (lx / rx) * (lx / rx) + (ly / ry) * (ly / ry);
                if q <= 1.0 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn fill_rounded_rect(&mut self, min: Point, max: Point, corner_radius: f32, fill: Fill) {
        let r = corner_radius.max(0.0);
        let min_x = min.x.floor() as i32;
        let max_x = max.x.ceil() as i32;
        let min_y = min.y.floor() as i32;
        let max_y = max.y.ceil() as i32;
        let height = (max.y - min.y).max(1.0);

        for y in min_y..max_y {
            let py = y as f32 + 0.5;
            if py < min.y || py > max.y {
                continue;
            }
            let color = match fill {
                Fill::Solid(c) => c,
                Fill::VerticalGradient { top, bottom } => {
                    let t = ((py - min.y) / height).clamp(0.0, 1.0);
                    lerp_rgba(top, bottom, t)
                }
            };
            for x in min_x..max_x {
                let px = x as f32 + 0.5;
                if px < min.x || px > max.x {
                    continue;
                }
                // Corner discs: a pixel in a corner square must lie
                // within the corner's rounding circle.
                let cx = px.clamp(min.x + r, max.x - r);
                let cy = py.clamp(min.y + r, max.y - r);
                let dx = px - cx;
                let dy = py - cy;
                if dx * dx + dy * dy <= r * r || r == 0.0 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn radial_glow(&mut self, center: Point, radius: f32, inner: Rgba, outer: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist <= radius {
                    let t = dist / radius;
                    self.blend(x, y, lerp_rgba(inner, outer, t));
                }
            }
        }
    }
}

fn scaled(p: Point, scale: f32) -> Point {
    Point::new(p.x * scale, p.y * scale)
}

fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgba::new(
        ch(a.r, b.r),
        ch(a.g, b.g),
        ch(a.b, b.b),
        a.a + (b.a - a.a) * t,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear(Rgba::new(10, 20, 30, 1.0));
        assert_eq!(canvas.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(canvas.pixel(7, 7), [10, 20, 30, 255]);
    }

    #[test]
    fn fill_circle_paints_center_not_corners() {
        let mut canvas = Canvas::new(21, 21);
        let mut scene = Scene::new();
        scene.push(DrawCmd::FillCircle {
            center: Point::new(10.5, 10.5),
            radius: 5.0,
            color: Rgba::new(255, 0, 0, 1.0),
        });
        canvas.execute(&scene);
        assert_eq!(canvas.pixel(10, 10), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(20, 20), [0, 0, 0, 255]);
    }

    #[test]
    fn rotated_ellipse_follows_its_axis() {
        // A thin ellipse rotated 90° paints along y, not x.
        let mut canvas = Canvas::new(31, 31);
        let mut scene = Scene::new();
        scene.push(DrawCmd::FillEllipse {
            center: Point::new(15.5, 15.5),
            rx: 10.0,
            ry: 2.0,
            rotation: std::f32::consts::FRAC_PI_2,
            color: Rgba::new(0, 255, 0, 1.0),
        });
        canvas.execute(&scene);
        assert_eq!(canvas.pixel(15, 7), [0, 255, 0, 255]);
        assert_eq!(canvas.pixel(7, 15), [0, 0, 0, 255]);
    }

    #[test]
    fn stroke_connects_its_endpoints() {
        let mut canvas = Canvas::new(20, 20);
        let mut scene = Scene::new();
        scene.push(DrawCmd::Stroke {
            points: vec![Point::new(2.0, 10.0), Point::new(18.0, 10.0)],
            width: 2.0,
            color: Rgba::new(0, 0, 255, 1.0),
        });
        canvas.execute(&scene);
        for x in [3u32, 10, 16] {
            assert_eq!(canvas.pixel(x, 10)[2], 255, "x={x} should be stroked");
        }
        assert_eq!(canvas.pixel(10, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn tapered_stroke_narrows_toward_the_end() {
        let mut canvas = Canvas::new(40, 21);
        let mut scene = Scene::new();
        scene.push(DrawCmd::TaperedStroke {
            points: (0..=10)
                .map(|i| Point::new(2.0 + i as f32 * 3.6, 10.5))
                .collect(),
            start_width: 8.0,
            end_width: 1.0,
            color: Rgba::new(255, 255, 255, 1.0),
        });
        canvas.execute(&scene);
        let column_coverage = |x: u32| (0..21).filter(|&y| canvas.pixel(x, y)[0] > 0).count();
        assert!(
            column_coverage(4) > column_coverage(35),
            "stroke should be thicker near its start"
        );
    }

    #[test]
    fn gradient_rect_shades_top_to_bottom() {
        let mut canvas = Canvas::new(10, 20);
        let mut scene = Scene::new();
        scene.push(DrawCmd::FillRoundedRect {
            min: Point::new(0.0, 0.0),
            max: Point::new(10.0, 20.0),
            corner_radius: 0.0,
            fill: Fill::VerticalGradient {
                top: Rgba::new(200, 200, 200, 1.0),
                bottom: Rgba::new(20, 20, 20, 1.0),
            },
        });
        canvas.execute(&scene);
        assert!(canvas.pixel(5, 1)[0] > canvas.pixel(5, 18)[0]);
    }

    #[test]
    fn rounded_corners_stay_unpainted() {
        let mut canvas = Canvas::new(20, 20);
        let mut scene = Scene::new();
        scene.push(DrawCmd::FillRoundedRect {
            min: Point::new(0.0, 0.0),
            max: Point::new(20.0, 20.0),
            corner_radius: 8.0,
            fill: Fill::Solid(Rgba::new(255, 255, 255, 1.0)),
        });
        canvas.execute(&scene);
        // Extreme corner pixel is outside the rounding disc.
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(10, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn radial_glow_fades_outward() {
        let mut canvas = Canvas::new(41, 41);
        let mut scene = Scene::new();
        scene.push(DrawCmd::RadialGlow {
            center: Point::new(20.5, 20.5),
            radius: 18.0,
            inner: Rgba::new(255, 215, 106, 0.8),
            outer: Rgba::new(255, 215, 106, 0.0),
        });
        canvas.execute(&scene);
        let center = canvas.pixel(20, 20)[0];
        let edge = canvas.pixel(20, 4)[0];
        assert!(center > edge, "glow should be brightest at its center");
        assert_eq!(canvas.pixel(40, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn half_alpha_blends_toward_source() {
        let mut canvas = Canvas::new(4, 4);
        let mut scene = Scene::new();
        scene.push(DrawCmd::FillCircle {
            center: Point::new(2.0, 2.0),
            radius: 4.0,
            color: Rgba::new(255, 255, 255, 0.5),
        });
        canvas.execute(&scene);
        let [r, ..] = canvas.pixel(2, 2);
        assert!((120..=135).contains(&r), "half-alpha over black should be mid-gray, got {r}");
    }

    #[test]
    fn out_of_bounds_geometry_is_clipped_not_fatal() {
        let mut canvas = Canvas::new(10, 10);
        let mut scene = Scene::new();
        scene.push(DrawCmd::FillCircle {
            center: Point::new(-50.0, 200.0),
            radius: 30.0,
            color: Rgba::new(255, 0, 0, 1.0),
        });
        scene.push(DrawCmd::Stroke {
            points: vec![Point::new(-20.0, -20.0), Point::new(40.0, 40.0)],
            width: 3.0,
            color: Rgba::new(0, 255, 0, 1.0),
        });
        canvas.execute(&scene);
        // The diagonal stroke crosses the buffer; the far circle doesn't.
        assert_eq!(canvas.pixel(5, 5)[1], 255);
        assert_eq!(canvas.pixel(5, 5)[0], 0);
    }

    #[test]
    fn device_scale_magnifies_geometry() {
        let coverage = |scale: f32, size: u32| -> usize {
            let mut canvas = Canvas::new(size, size);
            let mut scene = Scene::new();
            scene.push(DrawCmd::FillCircle {
                center: Point::new(10.0, 10.0),
                radius: 4.0,
                color: Rgba::new(255, 0, 0, 1.0),
            });
            canvas.execute_scaled(&scene, scale);
            (0..size * size)
                .filter(|i| canvas.pixel(i % size, i / size)[0] > 0)
                .count()
        };
        let one_x = coverage(1.0, 40);
        let two_x = coverage(2.0, 40);
        // Area scales roughly with the square of the device ratio.
        assert!(two_x > one_x * 3, "2x scale should ~quadruple coverage");
    }
}
