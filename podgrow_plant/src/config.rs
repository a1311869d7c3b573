// Data-driven render tuning.
//
// All tunable visual parameters live here in `RenderTuning`, loadable
// from JSON. The renderer never uses magic numbers for anything an
// artist might want to nudge — pod chrome colors, stroke quality, sway
// cadence, effect intensities all read from the tuning. This enables
// look iteration without recompilation.
//
// Parameters are grouped into nested sub-structs (`PodParams`,
// `StemParams`, `LeafParams`, `BudParams`, `EffectParams`), with
// `Default` producing the shipped look. Geometry ratios that are *trait*
// semantics (strain height multipliers, finger counts) are methods on
// `StrainType`, not tuning — genetics are not art-directable.
//
// Lengths are expressed as fractions of the canvas dimensions so one
// tuning file works at every resolution and device scale.
//
// See also: `renderer.rs` which reads every field here, `palette.rs`
// for the `Hex` JSON string form used by the color fields.

use crate::palette::Hex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failure to load a tuning file. The library never panics on malformed
/// tuning input.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Parameter groups
// ---------------------------------------------------------------------------

/// The hydroponic pod underlay drawn beneath every stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PodParams {
    /// Pod body width as a fraction of canvas width.
    pub width_frac: f32,
    /// Pod body height as a fraction of canvas height.
    pub height_frac: f32,
    /// Corner rounding as a fraction of canvas height.
    pub corner_radius_frac: f32,
    /// Gradient fill: `body_top` at the rim down to `body_bottom`.
    pub body_top: Hex,
    pub body_bottom: Hex,
    /// Rockwool growing-medium block sitting in the pod mouth.
    pub medium_color: Hex,
    pub medium_line_color: Hex,
    /// Number of ruled texture lines across the medium block.
    pub medium_lines: u32,
    pub medium_width_frac: f32,
    pub medium_height_frac: f32,
    /// Grow-light glow pooled above the pod.
    pub glow_color: Hex,
    pub glow_alpha: f32,
    pub glow_pulse_speed: f32,
}

/// Stem stroke generation and sway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StemParams {
    /// Sub-segment count for tapered strokes. Quality/performance knob.
    pub taper_segments: u32,
    /// Horizontal wobble of generated stems, as a fraction of height.
    pub wobble: f32,
    /// Sway amplitude at the stem tip, as a fraction of canvas height.
    pub sway_amplitude_frac: f32,
    pub sway_speed: f32,
}

/// Fan leaf rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeafParams {
    /// Full-size fan leaf length as a fraction of canvas height.
    pub size_frac: f32,
    /// Angle between adjacent fingers, radians.
    pub finger_spread: f32,
    pub vein_width: f32,
    /// How strongly per-leaf sway perturbs leaf rotation, radians.
    pub sway_strength: f32,
}

/// Bud / cola rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudParams {
    /// Base bud size as a fraction of canvas height.
    pub size_frac: f32,
    /// Concentric calyx layers in a terminal cola.
    pub cola_layers: u32,
    /// Brightness lost per cola layer (0.08 = 8% darker per layer).
    pub layer_darkening: f32,
    /// THC potential above which the frost overlay appears.
    pub frost_threshold: f32,
    /// Strands in a pistil fan.
    pub pistil_count: u32,
}

/// Time-driven effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    /// Pulse rate of the empty-pod "ready to plant" indicator.
    pub indicator_pulse_speed: f32,
    /// Sparkle flicker oscillator frequency.
    pub sparkle_flicker_speed: f32,
    /// Sine threshold above which a sparkle is visible this frame.
    pub sparkle_threshold: f32,
    /// Ambient golden glow on harvest-ready plants.
    pub harvest_glow_alpha: f32,
    pub harvest_glow_pulse_speed: f32,
}

// ---------------------------------------------------------------------------
// Top-level tuning
// ---------------------------------------------------------------------------

/// Complete render tuning — everything needed to style a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderTuning {
    pub pod: PodParams,
    pub stem: StemParams,
    pub leaves: LeafParams,
    pub buds: BudParams,
    pub effects: EffectParams,
}

impl Default for RenderTuning {
    fn default() -> Self {
        Self {
            pod: PodParams {
                width_frac: 0.56,
                height_frac: 0.2,
                corner_radius_frac: 0.03,
                body_top: Hex::new(0x3a, 0x42, 0x52),
                body_bottom: Hex::new(0x20, 0x24, 0x2f),
                medium_color: Hex::new(0x8a, 0x6d, 0x4a),
                medium_line_color: Hex::new(0x6b, 0x52, 0x36),
                medium_lines: 4,
                medium_width_frac: 0.34,
                medium_height_frac: 0.055,
                glow_color: Hex::new(0x9b, 0x5d, 0xe5),
                glow_alpha: 0.16,
                glow_pulse_speed: 2.2,
            },
            stem: StemParams {
                taper_segments: 20,
                wobble: 0.15,
                sway_amplitude_frac: 0.012,
                sway_speed: 1.0,
            },
            leaves: LeafParams {
                size_frac: 0.085,
                finger_spread: 0.38,
                vein_width: 0.8,
                sway_strength: 0.08,
            },
            buds: BudParams {
                size_frac: 0.055,
                cola_layers: 5,
                layer_darkening: 0.08,
                frost_threshold: 50.0,
                pistil_count: 8,
            },
            effects: EffectParams {
                indicator_pulse_speed: 3.0,
                sparkle_flicker_speed: 6.0,
                sparkle_threshold: 0.3,
                harvest_glow_alpha: 0.18,
                harvest_glow_pulse_speed: 2.0,
            },
        }
    }
}

impl RenderTuning {
    /// Parse a tuning from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a tuning from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
