// podgrow_plant — pure Rust plant rendering library.
//
// This crate contains all domain logic for the PodGrow plant renderer:
// growth-stage state derivation, curve math, the genetics-driven
// palette, and the frame composer that turns plant state into a
// retained draw-command scene. It has zero presenter dependencies and
// can be tested, benchmarked, and run headless.
//
// Module overview:
// - `types.rs`:    GrowthStage, traits (strain/terpene/rarity), condition, Point.
// - `state.rs`:    Raw pod snapshot -> PlantState derivation, animation clock,
//                  on-chain threshold/weight mirrors.
// - `curve.rs`:    Cubic Bezier evaluation + seeded stem/branch generators.
// - `palette.rs`:  Hex color math + genetics-to-palette mapping.
// - `scene.rs`:    Retained draw-command list the presenter replays.
// - `renderer.rs`: PlantRenderer — pod underlay + exhaustive stage dispatch.
// - `config.rs`:   RenderTuning — data-driven visual parameters (JSON).
// - `noise`:       Re-exported from `podgrow_noise` — deterministic perlin/fbm
//                  and sine-hash seeded randomness.
//
// The companion crate `podgrow_canvas` consumes the scenes this library
// produces and owns the animation session and pixel output. That
// boundary is enforced at the compiler level — this crate cannot reach a
// drawing surface, frame timing, or the OS clock.
//
// **Critical constraint: determinism.** Rendering is a pure function:
// `(plant state, animation clock, canvas size, seed) -> scene`. All
// randomness comes from seeded sine-hash/perlin functions of explicit
// inputs. No OS entropy, no system time, no global mutable state.

pub mod config;
pub mod curve;
pub use podgrow_noise as noise;
pub mod palette;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod types;
