// Core types shared across the renderer.
//
// Defines the growth-stage enumeration, genetic trait descriptors
// (strain, terpene, rarity), the derived plant condition, and the 2D
// `Point` used by all geometry code. All types derive `Serialize` and
// `Deserialize` — pod snapshots arrive from the game backend as JSON and
// scenes can be snapshotted for tests.
//
// Strain-dependent render parameters (stem height multiplier, fan-leaf
// finger count and width) live here as methods on `StrainType`, so the
// renderer never branches on strain names inline.
//
// See also: `state.rs` for the derivation of `PlantState` from raw pod
// snapshots, `palette.rs` for the terpene/rarity color mappings,
// `renderer.rs` which consumes all of this.
//
// **Critical constraint: determinism.** Trait values feed directly into
// seeded geometry generation. Identical traits must always produce
// identical render parameters.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in 2D drawing space. Units are logical pixels, y-down
/// (matching the presenter's pixel buffer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Growth stages
// ---------------------------------------------------------------------------

/// Discrete growth phase of a plant. The raw pod state stores this as an
/// integer 0–6; conversion happens once at the host boundary via
/// `from_raw`, after which stage dispatch is an exhaustive `match` — the
/// renderer can never see an out-of-range stage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum GrowthStage {
    Empty,
    Seedling,
    Young,
    Vegetative,
    Flowering,
    HarvestReady,
    NeedsCleanup,
}

impl GrowthStage {
    /// Convert a raw on-chain stage integer. Returns `None` for values
    /// outside 0–6; the caller decides how to degrade (see
    /// `RenderSession::render_pod`).
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Empty),
            1 => Some(Self::Seedling),
            2 => Some(Self::Young),
            3 => Some(Self::Vegetative),
            4 => Some(Self::Flowering),
            5 => Some(Self::HarvestReady),
            6 => Some(Self::NeedsCleanup),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Seedling => 1,
            Self::Young => 2,
            Self::Vegetative => 3,
            Self::Flowering => 4,
            Self::HarvestReady => 5,
            Self::NeedsCleanup => 6,
        }
    }

    /// Terminal stages have no care semantics: nothing is growing in an
    /// empty pod, and a spent plant no longer responds to water.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Empty | Self::NeedsCleanup)
    }
}

// ---------------------------------------------------------------------------
// Genetic traits
// ---------------------------------------------------------------------------

/// Strain morphology class. Drives stem height and fan-leaf shape.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StrainType {
    Indica,
    Sativa,
    Hybrid,
}

impl StrainType {
    /// Vegetative stem height multiplier: sativas stretch, indicas stay
    /// squat, hybrids sit in between.
    pub fn height_multiplier(self) -> f32 {
        match self {
            Self::Sativa => 1.2,
            Self::Indica => 0.85,
            Self::Hybrid => 1.0,
        }
    }

    /// Number of fingers on a fan leaf.
    pub fn finger_count(self) -> usize {
        match self {
            Self::Indica => 5,
            Self::Sativa | Self::Hybrid => 7,
        }
    }

    /// Finger width as a fraction of finger length. Indica leaves are
    /// noticeably broader.
    pub fn finger_width(self) -> f32 {
        match self {
            Self::Indica => 0.35,
            Self::Sativa | Self::Hybrid => 0.2,
        }
    }
}

/// Dominant terpene — selects the color theme that tints the whole
/// generated palette. Color pairs live in `palette.rs`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Terpene {
    Myrcene,
    Limonene,
    Pinene,
    Caryophyllene,
    Linalool,
    Terpinolene,
}

/// Rarity tier. Maps to a glow color/intensity used by the surrounding
/// UI (card frames, marketplace listings) — not by plant geometry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Immutable genetic descriptor for a plant. Fixed for the plant's
/// lifetime — only the stage and derived state change afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantVisualTraits {
    pub strain: StrainType,
    pub dominant_terpene: Terpene,
    /// THC potential 0–100. Drives trichome/sparkle density and the
    /// frost overlay intensity on harvest-ready colas.
    pub thc_potential: f32,
    /// Growth-rate modifier 0.8–1.5. Part of the trait contract (the
    /// game layer uses it for cooldown math); the renderer's geometry
    /// does not read it.
    pub growth_modifier: f32,
    pub rarity: Rarity,
}

impl Default for PlantVisualTraits {
    fn default() -> Self {
        Self {
            strain: StrainType::Hybrid,
            dominant_terpene: Terpene::Myrcene,
            thc_potential: 50.0,
            growth_modifier: 1.0,
            rarity: Rarity::Common,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived condition
// ---------------------------------------------------------------------------

/// Care-derived plant condition. `Overwatered` and `PestInfestation` are
/// never produced by the classifier in `state.rs` — they exist for host
/// overrides (e.g. a pest event rolled by the game backend).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PlantCondition {
    Healthy,
    NeedsWater,
    Overwatered,
    NutrientDeficiency,
    PestInfestation,
    Thriving,
}

impl PlantCondition {
    /// Scalar health in [0, 1] consumed by leaf/bud color tinting.
    /// Values at or above 0.9 render with no visible stress tint.
    pub fn health_factor(self) -> f32 {
        match self {
            Self::Thriving => 1.0,
            Self::Healthy => 0.95,
            Self::Overwatered => 0.7,
            Self::NeedsWater => 0.6,
            Self::NutrientDeficiency => 0.55,
            Self::PestInfestation => 0.45,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_raw_roundtrip() {
        for raw in 0u8..7 {
            let stage = GrowthStage::from_raw(raw).unwrap();
            assert_eq!(stage.as_u8(), raw);
        }
    }

    #[test]
    fn stage_rejects_out_of_range() {
        assert_eq!(GrowthStage::from_raw(7), None);
        assert_eq!(GrowthStage::from_raw(255), None);
    }

    #[test]
    fn terminal_stages() {
        assert!(GrowthStage::Empty.is_terminal());
        assert!(GrowthStage::NeedsCleanup.is_terminal());
        assert!(!GrowthStage::Seedling.is_terminal());
        assert!(!GrowthStage::HarvestReady.is_terminal());
    }

    #[test]
    fn strain_render_parameters() {
        assert_eq!(StrainType::Sativa.height_multiplier(), 1.2);
        assert_eq!(StrainType::Indica.height_multiplier(), 0.85);
        assert_eq!(StrainType::Hybrid.height_multiplier(), 1.0);
        assert_eq!(StrainType::Indica.finger_count(), 5);
        assert_eq!(StrainType::Sativa.finger_count(), 7);
        assert!(StrainType::Indica.finger_width() > StrainType::Hybrid.finger_width());
    }

    #[test]
    fn default_traits() {
        let traits = PlantVisualTraits::default();
        assert_eq!(traits.strain, StrainType::Hybrid);
        assert_eq!(traits.dominant_terpene, Terpene::Myrcene);
        assert_eq!(traits.thc_potential, 50.0);
        assert_eq!(traits.growth_modifier, 1.0);
        assert_eq!(traits.rarity, Rarity::Common);
    }

    #[test]
    fn traits_serialization_roundtrip() {
        let traits = PlantVisualTraits {
            strain: StrainType::Sativa,
            dominant_terpene: Terpene::Linalool,
            thc_potential: 88.0,
            growth_modifier: 1.3,
            rarity: Rarity::Legendary,
        };
        let json = serde_json::to_string(&traits).unwrap();
        let restored: PlantVisualTraits = serde_json::from_str(&json).unwrap();
        assert_eq!(traits, restored);
    }

    #[test]
    fn health_factor_ordering() {
        // Thriving is the only condition that renders fully unstressed;
        // every stressed condition falls below the 0.9 tint threshold.
        assert_eq!(PlantCondition::Thriving.health_factor(), 1.0);
        assert!(PlantCondition::Healthy.health_factor() >= 0.9);
        for c in [
            PlantCondition::NeedsWater,
            PlantCondition::Overwatered,
            PlantCondition::NutrientDeficiency,
            PlantCondition::PestInfestation,
        ] {
            assert!(c.health_factor() < 0.9, "{c:?} should tint");
        }
    }
}
