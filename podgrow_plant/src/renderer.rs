// Plant renderer — stage-keyed frame composition.
//
// `PlantRenderer` turns one `(PlantState, AnimationState)` pair into one
// `Scene`: a flat list of draw commands for the presenter. Every frame
// composes the pod container first (the stage-independent underlay),
// then dispatches on the growth stage with an exhaustive `match` — there
// is no default arm because `GrowthStage` is a sum type and raw integer
// validation already happened at the host boundary.
//
// The renderer is stateless per call. The only things an instance owns
// are its derived palette and a seed fixed at construction; the seed is
// what keeps "random" layouts (stem wobble, calyx jitter, debris) stable
// across frames while letting two plants differ. All per-element
// variation routes through `podgrow_noise::element_offset` with indices,
// never through a stateful generator.
//
// Shared primitives (fan leaf, bud, cola, pistil fan, glow, sparkles)
// are parameterized and reused across stages rather than duplicated —
// the flowering stage literally re-renders the vegetative composition
// and decorates it.
//
// See also: `scene.rs` for the command list, `curve.rs` for stem/branch
// generation, `palette.rs` for the palette this consumes, `state.rs` for
// the inputs, `config.rs` for the visual tuning.
//
// **Critical constraint: determinism.** Identical `(state, anim, size)`
// input and an identical seed must produce an identical scene. No OS
// randomness, no hidden frame-to-frame state.

use crate::config::RenderTuning;
use crate::curve::{
    BezierCurve, bezier_points, bezier_tangent, evaluate_bezier, generate_branch_curve,
    generate_stem_curve, lerp_point, rotate_point, stroke_tapered_bezier,
};
use crate::palette::{Hex, PlantColors, adjust_brightness, blend_colors, health_adjusted_colors};
use crate::scene::{DrawCmd, Fill, Scene};
use crate::state::{AnimationState, PlantState};
use crate::types::{GrowthStage, Point, StrainType};
use podgrow_noise::{element_offset, seeded_random, simple_noise, smooth_sway};
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Everything a single `render` call needs. The drawing surface itself
/// is absent — the renderer emits commands, it does not paint.
pub struct RenderContext<'a> {
    /// Logical canvas size. The presenter multiplies by `device_scale`.
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio, passed through for the presenter; command
    /// coordinates are always in logical units.
    pub device_scale: f32,
    pub plant: &'a PlantState,
    pub anim: &'a AnimationState,
}

/// Composes plant frames. One instance per displayed pod.
pub struct PlantRenderer {
    colors: PlantColors,
    tuning: RenderTuning,
    /// Per-instance variation seed, fixed at construction. Hosts derive
    /// it from the pod id so a pod looks the same every time it mounts.
    seed: f32,
}

// Colors that are stage furniture rather than genetics: harvest glow
// gold and cleanup-stage browns.
const HARVEST_GOLD: Hex = Hex::new(0xff, 0xd7, 0x6a);
const WILT_BROWN: Hex = Hex::new(0x7a, 0x5a, 0x33);
const DEAD_LEAF: Hex = Hex::new(0x8a, 0x6a, 0x3e);

impl PlantRenderer {
    pub fn new(colors: PlantColors, seed: f32) -> Self {
        Self::with_tuning(colors, seed, RenderTuning::default())
    }

    pub fn with_tuning(colors: PlantColors, seed: f32, tuning: RenderTuning) -> Self {
        Self {
            colors,
            tuning,
            seed,
        }
    }

    pub fn colors(&self) -> &PlantColors {
        &self.colors
    }

    /// Compose one frame.
    pub fn render(&self, ctx: &RenderContext) -> Scene {
        let mut scene = Scene::new();
        self.draw_pod(&mut scene, ctx.width, ctx.height, ctx.anim.time);

        // Stress tint applies to the whole frame's palette; per-leaf
        // aging on top of it is handled inside fan_leaf.
        let palette = health_adjusted_colors(&self.colors, ctx.plant.condition.health_factor());

        match ctx.plant.stage {
            GrowthStage::Empty => self.draw_empty_indicator(&mut scene, &palette, ctx),
            GrowthStage::Seedling => self.draw_seedling(&mut scene, &palette, ctx),
            GrowthStage::Young => self.draw_young(&mut scene, &palette, ctx),
            GrowthStage::Vegetative => {
                self.draw_vegetative(&mut scene, &palette, ctx);
            }
            GrowthStage::Flowering => self.draw_flowering(&mut scene, &palette, ctx),
            GrowthStage::HarvestReady => self.draw_harvest_ready(&mut scene, &palette, ctx),
            GrowthStage::NeedsCleanup => self.draw_cleanup(&mut scene, &palette, ctx),
        }
        scene
    }

    /// The degraded frame for raw stage values this client doesn't know:
    /// just the pod container, nothing growing. See
    /// `RenderSession::render_pod` for the boundary that calls this.
    pub fn render_pod_only(&self, width: f32, height: f32, time: f32) -> Scene {
        let mut scene = Scene::new();
        self.draw_pod(&mut scene, width, height, time);
        scene
    }

    // -----------------------------------------------------------------------
    // Pod container (stage-independent underlay)
    // -----------------------------------------------------------------------

    fn draw_pod(&self, scene: &mut Scene, width: f32, height: f32, time: f32) {
        let pod = &self.tuning.pod;
        let pod_w = width * pod.width_frac;
        let pod_h = height * pod.height_frac;
        let bottom = height * 0.98;
        let min = Point::new((width - pod_w) * 0.5, bottom - pod_h);
        let max = Point::new((width + pod_w) * 0.5, bottom);

        scene.push(DrawCmd::FillRoundedRect {
            min,
            max,
            corner_radius: height * pod.corner_radius_frac,
            fill: Fill::VerticalGradient {
                top: pod.body_top.rgba(1.0),
                bottom: pod.body_bottom.rgba(1.0),
            },
        });

        // Rockwool growing medium seated in the pod mouth.
        let med_w = width * pod.medium_width_frac;
        let med_h = height * pod.medium_height_frac;
        let med_max_y = min.y + height * 0.01;
        let med_min = Point::new((width - med_w) * 0.5, med_max_y - med_h);
        let med_max = Point::new((width + med_w) * 0.5, med_max_y);
        scene.push(DrawCmd::FillRoundedRect {
            min: med_min,
            max: med_max,
            corner_radius: med_h * 0.25,
            fill: Fill::Solid(pod.medium_color.rgba(1.0)),
        });

        // Ruled fiber texture across the medium block.
        for i in 0..pod.medium_lines {
            let t = (i + 1) as f32 / (pod.medium_lines + 1) as f32;
            let jitter = simple_noise(i as f32, 0.0, self.seed) * med_h * 0.08;
            let y = med_min.y + med_h * t + jitter;
            scene.push(DrawCmd::Stroke {
                points: vec![
                    Point::new(med_min.x + med_w * 0.06, y),
                    Point::new(med_max.x - med_w * 0.06, y),
                ],
                width: 0.8,
                color: pod.medium_line_color.rgba(0.8),
            });
        }

        // Grow-light pool from above, breathing slowly.
        let pulse = 0.5 + 0.5 * (time * pod.glow_pulse_speed).sin();
        scene.push(DrawCmd::RadialGlow {
            center: Point::new(width * 0.5, height * 0.12),
            radius: width * 0.42,
            inner: pod.glow_color.rgba(pod.glow_alpha * (0.7 + 0.3 * pulse)),
            outer: pod.glow_color.rgba(0.0),
        });
    }

    /// Where the stem emerges: just inside the top of the medium block.
    fn plant_base(&self, width: f32, height: f32) -> Point {
        let pod = &self.tuning.pod;
        let pod_top = height * 0.98 - height * pod.height_frac;
        let med_top = pod_top + height * 0.01 - height * pod.medium_height_frac;
        Point::new(width * 0.5, med_top + height * pod.medium_height_frac * 0.2)
    }

    /// A stem curve with the frame's sway applied at the upper control
    /// points, so the base stays rooted while the tip moves.
    fn swayed_stem(
        &self,
        base: Point,
        stem_height: f32,
        wobble: f32,
        sway_scale: f32,
        ctx: &RenderContext,
    ) -> BezierCurve {
        let stem = &self.tuning.stem;
        let mut curve = generate_stem_curve(base, stem_height, wobble, self.seed);
        let sway = smooth_sway(ctx.anim.time, 0.0, stem.sway_speed)
            * ctx.height
            * stem.sway_amplitude_frac
            * sway_scale;
        curve.control2.x += sway * 0.6;
        curve.end.x += sway;
        curve
    }

    // -----------------------------------------------------------------------
    // Stage compositions
    // -----------------------------------------------------------------------

    fn draw_empty_indicator(&self, scene: &mut Scene, palette: &PlantColors, ctx: &RenderContext) {
        let base = self.plant_base(ctx.width, ctx.height);
        let center = Point::new(ctx.width * 0.5, base.y - ctx.height * 0.12);
        let pulse = 0.5 + 0.5 * (ctx.anim.time * self.tuning.effects.indicator_pulse_speed).sin();
        let alpha = 0.25 + 0.35 * pulse;
        let radius = ctx.height * 0.045;

        scene.push(DrawCmd::FillCircle {
            center,
            radius,
            color: palette.leaf_primary.rgba(alpha * 0.35),
        });

        // Plus sign: "ready to plant".
        let arm = radius * 0.55;
        scene.push(DrawCmd::Stroke {
            points: vec![
                Point::new(center.x - arm, center.y),
                Point::new(center.x + arm, center.y),
            ],
            width: 2.0,
            color: palette.leaf_primary.rgba(alpha),
        });
        scene.push(DrawCmd::Stroke {
            points: vec![
                Point::new(center.x, center.y - arm),
                Point::new(center.x, center.y + arm),
            ],
            width: 2.0,
            color: palette.leaf_primary.rgba(alpha),
        });
    }

    fn draw_seedling(&self, scene: &mut Scene, palette: &PlantColors, ctx: &RenderContext) {
        let base = self.plant_base(ctx.width, ctx.height);
        let progress = ctx.plant.stage_progress;
        let stem_h = ctx.height * 0.1 * (0.25 + 0.75 * progress);
        let curve = self.swayed_stem(base, stem_h, 0.05, 1.0, ctx);

        stroke_tapered_bezier(
            scene,
            &curve,
            ctx.height * 0.006,
            ctx.height * 0.003,
            palette.stem.rgba(1.0),
            self.tuning.stem.taper_segments as usize,
        );

        // Cotyledons unfold past 30% progress and grow with the rest.
        if progress > 0.3 {
            let unfold = (progress - 0.3) / 0.7;
            let size = ctx.height * 0.022 * (0.3 + 0.7 * unfold);
            let tip = curve.end;
            for side in [-1.0f32, 1.0] {
                let wiggle =
                    smooth_sway(ctx.anim.time, side * 2.0, self.tuning.stem.sway_speed) * 0.06;
                scene.push(DrawCmd::FillEllipse {
                    center: Point::new(tip.x + side * size * 0.9, tip.y - size * 0.1),
                    rx: size,
                    ry: size * 0.62,
                    rotation: side * 0.35 + wiggle,
                    color: palette.leaf_primary.rgba(1.0),
                });
            }
        }
    }

    fn draw_young(&self, scene: &mut Scene, palette: &PlantColors, ctx: &RenderContext) {
        let base = self.plant_base(ctx.width, ctx.height);
        let stem_h = ctx.height * 0.22;
        let curve = self.swayed_stem(base, stem_h, self.tuning.stem.wobble, 1.0, ctx);

        stroke_tapered_bezier(
            scene,
            &curve,
            ctx.height * 0.008,
            ctx.height * 0.0035,
            palette.stem.rgba(1.0),
            self.tuning.stem.taper_segments as usize,
        );

        let strain = ctx.plant.traits.strain;
        let leaf = ctx.height * self.tuning.leaves.size_frac;
        let tip = evaluate_bezier(&curve, 1.0);
        let mid = evaluate_bezier(&curve, 0.5);

        // First true leaves at the tip, a smaller pair at the midpoint.
        for side in [-1.0f32, 1.0] {
            self.fan_leaf(
                scene,
                palette,
                tip,
                leaf * 0.8,
                -FRAC_PI_2 + side * 0.55,
                strain,
                1.0,
                ctx.anim.time,
            );
        }
        for side in [-1.0f32, 1.0] {
            self.fan_leaf(
                scene,
                palette,
                mid,
                leaf * 0.5,
                -FRAC_PI_2 + side * 0.95,
                strain,
                1.0,
                ctx.anim.time,
            );
        }
    }

    /// Vegetative composition. Returns the stem curve so the flowering
    /// stage can decorate the same plant.
    fn draw_vegetative(
        &self,
        scene: &mut Scene,
        palette: &PlantColors,
        ctx: &RenderContext,
    ) -> BezierCurve {
        let base = self.plant_base(ctx.width, ctx.height);
        let strain = ctx.plant.traits.strain;
        let stem_h = ctx.height * 0.34 * strain.height_multiplier();
        let curve = self.swayed_stem(base, stem_h, self.tuning.stem.wobble, 1.0, ctx);

        stroke_tapered_bezier(
            scene,
            &curve,
            ctx.height * 0.009,
            ctx.height * 0.004,
            palette.stem.rgba(1.0),
            self.tuning.stem.taper_segments as usize,
        );

        let leaf = ctx.height * self.tuning.leaves.size_frac;

        // Leaf pairs at fixed parametric stations; lower leaves are
        // larger and sit flatter, upper ones reach up.
        const LEAF_STATIONS: [f32; 4] = [0.3, 0.5, 0.7, 0.9];
        for (i, lt) in LEAF_STATIONS.iter().enumerate() {
            let at = evaluate_bezier(&curve, *lt);
            let scale = 1.15 - lt * 0.55;
            let tilt = 0.5 + lt * 0.25 + 0.15 * (i % 2) as f32;
            for side in [-1.0f32, 1.0] {
                self.fan_leaf(
                    scene,
                    palette,
                    at,
                    leaf * scale,
                    -FRAC_PI_2 + side * tilt,
                    strain,
                    1.0,
                    ctx.anim.time,
                );
            }
        }

        // Two side branches, alternating sides, each tipped with a leaf.
        const BRANCH_STATIONS: [f32; 2] = [0.45, 0.65];
        for (k, bt) in BRANCH_STATIONS.iter().enumerate() {
            let side = if k % 2 == 0 { 1.0f32 } else { -1.0 };
            let origin = evaluate_bezier(&curve, *bt);
            let jitter = (seeded_random(self.seed + 40.0 + k as f32) - 0.5) * 0.3;
            let angle = if side > 0.0 {
                -0.35 + jitter
            } else {
                PI + 0.35 + jitter
            };
            let length = ctx.height * 0.12 * (1.0 - bt * 0.35);
            let branch = generate_branch_curve(origin, angle, length, 0.3);

            stroke_tapered_bezier(
                scene,
                &branch,
                ctx.height * 0.005,
                ctx.height * 0.002,
                palette.stem.rgba(1.0),
                self.tuning.stem.taper_segments as usize,
            );

            let branch_tip = evaluate_bezier(&branch, 1.0);
            let heading = bezier_tangent(&branch, 1.0);
            self.fan_leaf(
                scene,
                palette,
                branch_tip,
                leaf * 0.6,
                heading,
                strain,
                1.0,
                ctx.anim.time,
            );
        }

        curve
    }

    fn draw_flowering(&self, scene: &mut Scene, palette: &PlantColors, ctx: &RenderContext) {
        let curve = self.draw_vegetative(scene, palette, ctx);
        let bud_size = ctx.height * self.tuning.buds.size_frac;
        let progress = ctx.plant.stage_progress;

        // Buds climb the upper stem: larger and more mature toward the tip.
        const BUD_STATIONS: [f32; 3] = [0.72, 0.84, 0.96];
        for (i, bt) in BUD_STATIONS.iter().enumerate() {
            let at = evaluate_bezier(&curve, *bt);
            let size = bud_size * (0.55 + 0.225 * i as f32);
            let maturity = (0.35 + 0.55 * bt) * (0.4 + 0.6 * progress);
            self.bud(
                scene,
                palette,
                at,
                size,
                maturity,
                self.seed + 60.0 + i as f32 * 10.0,
                ctx.anim.time,
            );
        }

        // Pistil crown at the very top.
        let tip = evaluate_bezier(&curve, 1.0);
        self.pistils(
            scene,
            palette,
            tip,
            bud_size * 0.8,
            self.seed + 90.0,
            ctx.anim.time,
        );
    }

    fn draw_harvest_ready(&self, scene: &mut Scene, palette: &PlantColors, ctx: &RenderContext) {
        let base = self.plant_base(ctx.width, ctx.height);
        let strain = ctx.plant.traits.strain;
        let thc = ctx.plant.traits.thc_potential;
        let time = ctx.anim.time;
        let effects = &self.tuning.effects;

        // A heavier, settled stem: thicker stroke, half the wobble, and
        // well under half the sway of the vegetative stages.
        let stem_h = ctx.height * 0.36 * strain.height_multiplier();
        let curve = self.swayed_stem(base, stem_h, self.tuning.stem.wobble * 0.5, 0.4, ctx);
        stroke_tapered_bezier(
            scene,
            &curve,
            ctx.height * 0.012,
            ctx.height * 0.005,
            palette.stem.rgba(1.0),
            self.tuning.stem.taper_segments as usize,
        );

        // Fan leaves age from the bottom up: the oldest, lowest pair has
        // yellowed furthest.
        let leaf = ctx.height * self.tuning.leaves.size_frac;
        const LEAF_STATIONS: [f32; 3] = [0.3, 0.5, 0.7];
        const LEAF_HEALTH: [f32; 3] = [0.65, 0.8, 0.95];
        for (i, lt) in LEAF_STATIONS.iter().enumerate() {
            let at = evaluate_bezier(&curve, *lt);
            let scale = 1.05 - lt * 0.45;
            for side in [-1.0f32, 1.0] {
                self.fan_leaf(
                    scene,
                    palette,
                    at,
                    leaf * scale,
                    -FRAC_PI_2 + side * (0.6 + lt * 0.2),
                    strain,
                    LEAF_HEALTH[i],
                    time,
                );
            }
        }

        // Side colas on three short branches.
        let cola_size = ctx.height * 0.09;
        const BRANCH_STATIONS: [f32; 3] = [0.55, 0.7, 0.85];
        for (k, bt) in BRANCH_STATIONS.iter().enumerate() {
            let side = if k % 2 == 0 { 1.0f32 } else { -1.0 };
            let origin = evaluate_bezier(&curve, *bt);
            let angle = if side > 0.0 { -0.45 } else { PI + 0.45 };
            let length = ctx.height * 0.1 * (1.0 - bt * 0.3);
            let branch = generate_branch_curve(origin, angle, length, 0.35);
            stroke_tapered_bezier(
                scene,
                &branch,
                ctx.height * 0.006,
                ctx.height * 0.003,
                palette.stem.rgba(1.0),
                self.tuning.stem.taper_segments as usize,
            );
            self.cola(
                scene,
                palette,
                evaluate_bezier(&branch, 1.0),
                cola_size * 0.6,
                thc,
                self.seed + 150.0 + k as f32 * 11.0,
                time,
            );
        }

        // The main cola crowns the stem.
        let tip = evaluate_bezier(&curve, 1.0);
        self.cola(scene, palette, tip, cola_size, thc, self.seed + 200.0, time);

        // Pulsing golden ambient glow over the whole plant.
        let pulse = 0.5 + 0.5 * (time * effects.harvest_glow_pulse_speed).sin();
        let breathe = podgrow_noise::fbm(time * 0.3, 7.0, 3, 0.5) * 0.04;
        scene.push(DrawCmd::RadialGlow {
            center: Point::new(tip.x, tip.y + stem_h * 0.25),
            radius: ctx.height * 0.3 * (0.9 + 0.15 * pulse + breathe),
            inner: HARVEST_GOLD.rgba(effects.harvest_glow_alpha * (0.7 + 0.3 * pulse)),
            outer: HARVEST_GOLD.rgba(0.0),
        });

        // Trichome sparkles: the candidate pool scales with potency, and
        // each candidate flickers on its own phase of the shared sine.
        let candidates = (thc / 10.0).floor() as u32;
        for k in 0..candidates {
            let angle = element_offset(self.seed + 300.0, k) * TAU;
            let dist = element_offset(self.seed + 300.0, k + 32) * ctx.height * 0.12;
            let at = Point::new(
                tip.x + angle.cos() * dist,
                tip.y - ctx.height * 0.02 + angle.sin() * dist * 0.8,
            );
            let flicker = (time * effects.sparkle_flicker_speed + k as f32 * 1.7).sin();
            if flicker > effects.sparkle_threshold {
                let alpha = palette.trichome_alpha * (flicker - effects.sparkle_threshold)
                    / (1.0 - effects.sparkle_threshold);
                scene.push(DrawCmd::FillCircle {
                    center: at,
                    radius: ctx.height * 0.004,
                    color: palette.trichome.rgba(alpha),
                });
                scene.push(DrawCmd::RadialGlow {
                    center: at,
                    radius: ctx.height * 0.012,
                    inner: palette.trichome.rgba(alpha * 0.6),
                    outer: palette.trichome.rgba(0.0),
                });
            }
        }
    }

    fn draw_cleanup(&self, scene: &mut Scene, palette: &PlantColors, ctx: &RenderContext) {
        let base = self.plant_base(ctx.width, ctx.height);
        let height = ctx.height;

        // Wilted stem arcing over to one side.
        let wilt = blend_colors(palette.stem, WILT_BROWN, 0.65);
        let stem_h = height * 0.18;
        let droop_end = Point::new(base.x + height * 0.1, base.y - stem_h * 0.35);
        let apex = Point::new(base.x + height * 0.015, base.y - stem_h);
        let curve = BezierCurve {
            start: base,
            control1: lerp_point(base, apex, 0.8),
            control2: Point::new(apex.x + height * 0.045, apex.y + stem_h * 0.05),
            end: droop_end,
        };
        stroke_tapered_bezier(
            scene,
            &curve,
            height * 0.007,
            height * 0.002,
            wilt.rgba(1.0),
            self.tuning.stem.taper_segments as usize,
        );

        // Dead leaves scattered around the base. Seeded positions, so
        // the mess doesn't crawl between frames.
        for i in 0..4u32 {
            let off = element_offset(self.seed + 500.0, i);
            let center = Point::new(
                base.x + (off - 0.5) * ctx.width * 0.22,
                base.y - height * 0.012 + element_offset(self.seed + 500.0, i + 8) * height * 0.02,
            );
            scene.push(DrawCmd::FillEllipse {
                center,
                rx: height * 0.016,
                ry: height * 0.007,
                rotation: (off - 0.5) * 1.2,
                color: adjust_brightness(DEAD_LEAF, 0.8 + 0.4 * off).rgba(0.9),
            });
        }

        // Debris dots on the medium.
        for i in 0..6u32 {
            let off = element_offset(self.seed + 520.0, i);
            let center = Point::new(
                base.x + (element_offset(self.seed + 520.0, i + 16) - 0.5) * ctx.width * 0.26,
                base.y + off * height * 0.015,
            );
            scene.push(DrawCmd::FillCircle {
                center,
                radius: height * 0.003,
                color: adjust_brightness(WILT_BROWN, 0.7 + 0.5 * off).rgba(0.7),
            });
        }
    }

    // -----------------------------------------------------------------------
    // Shared primitives
    // -----------------------------------------------------------------------

    /// A fan leaf: strain-dependent finger count and width, each finger
    /// an independently-angled petal with a center vein. `leaf_health`
    /// below 1 blends this one leaf toward yellow (aging) on top of
    /// whatever condition tint the frame palette already carries.
    #[allow(clippy::too_many_arguments)]
    fn fan_leaf(
        &self,
        scene: &mut Scene,
        palette: &PlantColors,
        pos: Point,
        size: f32,
        rotation: f32,
        strain: StrainType,
        leaf_health: f32,
        time: f32,
    ) {
        let lp = &self.tuning.leaves;
        let fingers = strain.finger_count();
        let width_ratio = strain.finger_width();

        // Sway phase keyed by screen position, so leaves move out of
        // phase with one another.
        let sway = smooth_sway(time, pos.x * 0.05 + pos.y * 0.031, self.tuning.stem.sway_speed)
            * lp.sway_strength;
        let rot = rotation + sway;
        let leaf_palette = health_adjusted_colors(palette, leaf_health);

        let half = (fingers / 2) as i32;
        let mut angles: SmallVec<[f32; 7]> = SmallVec::new();
        for i in 0..fingers {
            angles.push(rot + (i as i32 - half) as f32 * lp.finger_spread);
        }

        for (i, angle) in angles.iter().enumerate() {
            let offset_norm = (i as i32 - half).abs() as f32 / half.max(1) as f32;
            let len = size * (1.0 - 0.3 * offset_norm);

            let petal_center = rotate_point(Point::new(pos.x + len * 0.5, pos.y), pos, *angle);
            let color = if i % 2 == 0 {
                leaf_palette.leaf_primary
            } else {
                leaf_palette.leaf_secondary
            };
            scene.push(DrawCmd::FillEllipse {
                center: petal_center,
                rx: len * 0.5,
                ry: len * width_ratio * 0.5,
                rotation: *angle,
                color: color.rgba(1.0),
            });

            let vein_end = rotate_point(Point::new(pos.x + len * 0.85, pos.y), pos, *angle);
            scene.push(DrawCmd::Stroke {
                points: vec![pos, vein_end],
                width: lp.vein_width,
                color: leaf_palette.leaf_vein.rgba(0.9),
            });
        }
    }

    /// A developing bud: a ring of calyx ellipses at seeded jittered
    /// angles/distances, denser as `maturity` rises, topped with pistils
    /// once past 0.3.
    #[allow(clippy::too_many_arguments)]
    fn bud(
        &self,
        scene: &mut Scene,
        palette: &PlantColors,
        center: Point,
        size: f32,
        maturity: f32,
        seed: f32,
        time: f32,
    ) {
        let calyx_count = 5 + (maturity * 4.0) as usize;
        for i in 0..calyx_count {
            let jitter = element_offset(seed, i as u32);
            let angle = i as f32 / calyx_count as f32 * TAU + (jitter - 0.5) * 0.5;
            let dist = size * 0.35 * (0.5 + 0.5 * element_offset(seed, i as u32 + 32));
            let at = Point::new(
                center.x + angle.cos() * dist,
                center.y + angle.sin() * dist,
            );
            let color = if i % 2 == 0 {
                palette.bud_primary
            } else {
                palette.bud_secondary
            };
            scene.push(DrawCmd::FillEllipse {
                center: at,
                rx: size * 0.42,
                ry: size * 0.3,
                rotation: angle,
                color: color.rgba(1.0),
            });
        }

        // Solid core over the ring.
        scene.push(DrawCmd::FillEllipse {
            center,
            rx: size * 0.45,
            ry: size * 0.38,
            rotation: 0.0,
            color: palette.bud_primary.rgba(1.0),
        });

        if maturity > 0.3 {
            self.pistils(
                scene,
                palette,
                Point::new(center.x, center.y - size * 0.35),
                size * 0.55,
                seed + 7.0,
                time,
            );
        }
    }

    /// A terminal cola: stacked calyx layers, each tier smaller and
    /// darker than the one below, crowned with pistils and — on potent
    /// plants — a frost overlay.
    #[allow(clippy::too_many_arguments)]
    fn cola(
        &self,
        scene: &mut Scene,
        palette: &PlantColors,
        center: Point,
        size: f32,
        thc: f32,
        seed: f32,
        time: f32,
    ) {
        let bp = &self.tuning.buds;

        for layer in 0..bp.cola_layers {
            let lf = layer as f32;
            let layer_size = size * (1.0 - 0.13 * lf);
            let layer_center = Point::new(center.x, center.y - size * 0.22 * lf);
            let darken = 1.0 - bp.layer_darkening * lf;
            let primary = adjust_brightness(palette.bud_primary, darken);
            let secondary = adjust_brightness(palette.bud_secondary, darken);

            let count = (8 - layer.min(4)) as usize;
            for i in 0..count {
                let jitter = element_offset(seed + lf * 3.7, i as u32);
                let angle = i as f32 / count as f32 * TAU + (jitter - 0.5) * 0.6;
                let dist = layer_size * 0.3 * (0.6 + 0.4 * element_offset(seed + lf * 3.7, i as u32 + 24));
                let at = Point::new(
                    layer_center.x + angle.cos() * dist,
                    layer_center.y + angle.sin() * dist,
                );
                let color = if i % 2 == 0 { primary } else { secondary };
                scene.push(DrawCmd::FillEllipse {
                    center: at,
                    rx: layer_size * 0.38,
                    ry: layer_size * 0.26,
                    rotation: angle,
                    color: color.rgba(1.0),
                });
            }
        }

        let crown = Point::new(center.x, center.y - size * 0.22 * bp.cola_layers as f32);
        self.pistils(scene, palette, crown, size * 0.5, seed + 5.0, time);

        // Frost: visible only past the potency threshold, scaling with
        // how far past it the plant sits.
        if thc > bp.frost_threshold {
            let intensity =
                ((thc - bp.frost_threshold) / (100.0 - bp.frost_threshold)).clamp(0.0, 1.0);
            scene.push(DrawCmd::RadialGlow {
                center: Point::new(center.x, center.y - size * 0.4),
                radius: size * 1.1,
                inner: palette
                    .trichome
                    .rgba(palette.trichome_alpha * intensity * 0.5),
                outer: palette.trichome.rgba(0.0),
            });
            let dots = 4 + (intensity * 6.0) as u32;
            for i in 0..dots {
                let angle = element_offset(seed, i + 64) * TAU;
                let dist = element_offset(seed, i + 80) * size * 0.8;
                scene.push(DrawCmd::FillCircle {
                    center: Point::new(
                        center.x + angle.cos() * dist,
                        center.y - size * 0.3 + angle.sin() * dist * 0.7,
                    ),
                    radius: size * 0.05,
                    color: palette.trichome.rgba(0.2 + 0.5 * intensity),
                });
            }
        }
    }

    /// A fan of curved pistil hairs radiating over a semicircle, each
    /// with seeded length and bow and a small independent sway.
    fn pistils(
        &self,
        scene: &mut Scene,
        palette: &PlantColors,
        origin: Point,
        size: f32,
        seed: f32,
        time: f32,
    ) {
        let count = self.tuning.buds.pistil_count;
        let mut lengths: SmallVec<[f32; 8]> = SmallVec::new();
        for i in 0..count {
            lengths.push(size * (0.55 + 0.45 * element_offset(seed, i)));
        }

        for (i, len) in lengths.iter().enumerate() {
            let frac = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.5
            };
            let angle = -PI * (0.15 + 0.7 * frac)
                + smooth_sway(time, seed + i as f32, 1.3) * 0.08;
            let (dx, dy) = (angle.cos(), angle.sin());
            let (px, py) = (-dy, dx);
            let bow = len * 0.2 * (element_offset(seed, i as u32 + 16) - 0.5) * 2.0;

            let strand = BezierCurve {
                start: origin,
                control1: Point::new(
                    origin.x + dx * len * 0.33 + px * bow * 0.6,
                    origin.y + dy * len * 0.33 + py * bow * 0.6,
                ),
                control2: Point::new(
                    origin.x + dx * len * 0.66 + px * bow,
                    origin.y + dy * len * 0.66 + py * bow,
                ),
                end: Point::new(origin.x + dx * len, origin.y + dy * len),
            };
            scene.push(DrawCmd::Stroke {
                points: bezier_points(&strand, 6),
                width: (size * 0.08).max(0.6),
                color: palette.pistil.rgba(0.95),
            });
        }
    }
}
