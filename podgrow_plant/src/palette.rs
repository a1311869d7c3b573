// Color utilities and the genetics-to-palette mapping.
//
// Pure color-space transformations — no drawing, no state. The central
// product is `PlantColors`: the nine-entry palette derived once from a
// plant's genetic traits by blending a fixed base palette with the
// dominant terpene's primary/accent pair at organ-specific ratios.
// Different organs absorb the terpene tint to different degrees (stem
// 20%, leaves 30%, buds 35%), which is what keeps a limonene plant
// reading as "citrus-tinted" rather than uniformly recolored.
//
// `Hex` stores an RGB triple and is well-formed by construction; it
// parses and serializes as a 6-digit `#rrggbb` string (the same custom
// string-form serde treatment `SimUuid`-style ids get elsewhere), so
// palettes and tuning files stay human-editable JSON.
//
// See also: `types.rs` for `Terpene`/`Rarity`, `config.rs` which embeds
// `Hex` values in tuning files, `renderer.rs` which consumes
// `PlantColors`, `state.rs` for the health factor driving
// `health_adjusted_colors`.

use crate::types::{PlantVisualTraits, Rarity, Terpene};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Color types
// ---------------------------------------------------------------------------

/// An sRGB color, always a valid channel triple. The string form is a
/// 6-digit lowercase `#rrggbb`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Hex {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string (leading `#` optional). Returns `None`
    /// for anything that is not exactly 6 hex digits.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Attach an alpha channel for drawing.
    pub fn rgba(self, alpha: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hex({self})")
    }
}

// Serialize as the `#rrggbb` string so palettes read naturally in JSON.
impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hex::parse(&s).ok_or_else(|| serde::de::Error::custom("invalid #rrggbb color"))
    }
}

/// A color ready for the presenter: sRGB channels plus alpha in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

// ---------------------------------------------------------------------------
// Color math
// ---------------------------------------------------------------------------

/// Per-channel linear interpolation in sRGB space, rounded to nearest.
///
/// `ratio` is expected in [0, 1] and is deliberately not clamped — all
/// call sites in this crate pass values derived from bounded quantities,
/// and the unclamped behavior is kept for fidelity with the original
/// palette math (out-of-range ratios saturate per channel).
pub fn blend_colors(a: Hex, b: Hex, ratio: f32) -> Hex {
    let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * ratio).round() as u8;
    Hex::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
}

/// Multiplicative brightness scale, clamped to the channel range.
/// `factor` 1.0 is the identity; below darkens, above lightens.
pub fn adjust_brightness(color: Hex, factor: f32) -> Hex {
    let ch = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Hex::new(ch(color.r), ch(color.g), ch(color.b))
}

/// Convenience form matching the palette's CSS-era signature.
pub fn hex_to_rgba(color: Hex, alpha: f32) -> Rgba {
    color.rgba(alpha)
}

// ---------------------------------------------------------------------------
// Genetics → color themes
// ---------------------------------------------------------------------------

/// Primary and accent theme colors for a dominant terpene.
pub fn terpene_colors(terpene: Terpene) -> (Hex, Hex) {
    match terpene {
        // Earthy mango — muted olive with an amber accent.
        Terpene::Myrcene => (Hex::new(0x8f, 0xae, 0x52), Hex::new(0xc9, 0xa2, 0x27)),
        // Citrus — warm yellows.
        Terpene::Limonene => (Hex::new(0xd9, 0xc8, 0x3b), Hex::new(0xf1, 0xe0, 0x5a)),
        // Pine — deep forest green.
        Terpene::Pinene => (Hex::new(0x2f, 0x6f, 0x4f), Hex::new(0x7c, 0xae, 0x7a)),
        // Pepper spice — rusty red-browns.
        Terpene::Caryophyllene => (Hex::new(0xa4, 0x53, 0x3b), Hex::new(0xd0, 0x8a, 0x5a)),
        // Lavender — soft purples.
        Terpene::Linalool => (Hex::new(0x7e, 0x6b, 0xc4), Hex::new(0xb7, 0xa6, 0xe0)),
        // Fresh lime — bright greens.
        Terpene::Terpinolene => (Hex::new(0x6f, 0xbf, 0x4a), Hex::new(0xa4, 0xd9, 0x6c)),
    }
}

/// Glow color and intensity for a rarity tier. Consumed by the UI layer
/// (card frames, listing badges), not by plant geometry.
pub fn rarity_glow(rarity: Rarity) -> (Hex, f32) {
    match rarity {
        Rarity::Common => (Hex::new(0xff, 0xff, 0xff), 0.0),
        Rarity::Uncommon => (Hex::new(0x4a, 0xde, 0x80), 0.25),
        Rarity::Rare => (Hex::new(0x60, 0xa5, 0xfa), 0.45),
        Rarity::Epic => (Hex::new(0xc0, 0x84, 0xfc), 0.7),
        Rarity::Legendary => (Hex::new(0xfb, 0xbf, 0x24), 1.0),
    }
}

// ---------------------------------------------------------------------------
// Plant palette
// ---------------------------------------------------------------------------

/// The derived palette a renderer instance owns: nine named colors plus
/// the trichome alpha. Computed once per trait set (hosts memoize it) —
/// regenerating per frame would be wasted work since traits are fixed
/// for a plant's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantColors {
    pub stem: Hex,
    pub stem_dark: Hex,
    pub leaf_primary: Hex,
    pub leaf_secondary: Hex,
    pub leaf_vein: Hex,
    pub bud_primary: Hex,
    pub bud_secondary: Hex,
    pub pistil: Hex,
    pub trichome: Hex,
    /// Trichome/sparkle opacity, scaling linearly with THC potential.
    pub trichome_alpha: f32,
}

// Fixed base palette the terpene theme is blended into.
const BASE_STEM: Hex = Hex::new(0x5d, 0x8a, 0x4f);
const BASE_LEAF_PRIMARY: Hex = Hex::new(0x3e, 0x7d, 0x32);
const BASE_LEAF_SECONDARY: Hex = Hex::new(0x66, 0xa0, 0x5b);
const BASE_BUD_PRIMARY: Hex = Hex::new(0x7b, 0x9e, 0x54);
const BASE_BUD_SECONDARY: Hex = Hex::new(0x5c, 0x8a, 0x46);
const BASE_PISTIL: Hex = Hex::new(0xe8, 0xa3, 0x3d);
const TRICHOME: Hex = Hex::new(0xf4, 0xf6, 0xec);

/// Amber pistils on high-potency plants — a hard switch, not a blend.
const AMBER_PISTIL: Hex = Hex::new(0xff, 0xbf, 0x00);

/// Stress tint targets for `health_adjusted_colors`.
const STRESS_YELLOW: Hex = Hex::new(0xd4, 0xc0, 0x4b);
const STRESS_BROWN: Hex = Hex::new(0x9a, 0x7b, 0x4f);

/// The genetics-to-palette mapping. Each organ absorbs the terpene tint
/// at its own ratio; the pistil color switches to amber outright when
/// THC potential exceeds 80.
pub fn generate_plant_colors(traits: &PlantVisualTraits) -> PlantColors {
    let (primary, accent) = terpene_colors(traits.dominant_terpene);

    let stem = blend_colors(BASE_STEM, primary, 0.2);
    let leaf_primary = blend_colors(BASE_LEAF_PRIMARY, primary, 0.3);
    let pistil = if traits.thc_potential > 80.0 {
        AMBER_PISTIL
    } else {
        blend_colors(BASE_PISTIL, accent, 0.2)
    };

    PlantColors {
        stem,
        stem_dark: adjust_brightness(stem, 0.72),
        leaf_primary,
        leaf_secondary: blend_colors(BASE_LEAF_SECONDARY, accent, 0.25),
        leaf_vein: adjust_brightness(leaf_primary, 1.25),
        bud_primary: blend_colors(BASE_BUD_PRIMARY, primary, 0.35),
        bud_secondary: blend_colors(BASE_BUD_SECONDARY, accent, 0.3),
        pistil,
        trichome: TRICHOME,
        trichome_alpha: 0.3 + 0.5 * (traits.thc_potential / 100.0),
    }
}

/// Health-based stress tinting. At `health >= 0.9` the palette passes
/// through unchanged — healthy plants show no tint. Below that, leaf
/// colors shift toward yellow and bud colors toward brown proportional
/// to the health deficit.
pub fn health_adjusted_colors(colors: &PlantColors, health: f32) -> PlantColors {
    if health >= 0.9 {
        return *colors;
    }
    let deficit = 1.0 - health;
    PlantColors {
        leaf_primary: blend_colors(colors.leaf_primary, STRESS_YELLOW, deficit),
        leaf_secondary: blend_colors(colors.leaf_secondary, STRESS_YELLOW, deficit),
        bud_primary: blend_colors(colors.bud_primary, STRESS_BROWN, deficit),
        bud_secondary: blend_colors(colors.bud_secondary, STRESS_BROWN, deficit),
        ..*colors
    }
}
