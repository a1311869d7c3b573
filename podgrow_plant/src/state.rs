// Plant state derivation — raw pod snapshots to the renderer contract.
//
// The game backend delivers pod state as it lives on chain: a raw stage
// integer plus cumulative water/nutrient counters, with optional trait
// and condition overrides. This module translates that into the
// renderer's `PlantState`: a validated stage, a derived care condition,
// and a continuous 0–1 progress value for intra-stage animation.
//
// The derivation is a pure function — `(snapshot) -> PlantState` — and
// is recomputed by the host whenever the underlying snapshot changes,
// never per frame.
//
// Stage-transition water thresholds (3/6/8/10) and the harvest weight
// formula mirror the on-chain contract so a host without a live chain
// connection shows the same numbers the contract would settle.
//
// See also: `types.rs` for the enums consumed here, `renderer.rs` which
// reads `PlantState` + `AnimationState` each frame,
// `podgrow_canvas::session` for the host-side animation loop that owns
// and advances the clock.
//
// **Critical constraint: determinism.** Identical snapshots must derive
// identical `PlantState`s. No randomness, no time, no I/O.

use crate::types::{GrowthStage, PlantCondition, PlantVisualTraits, Point};
use podgrow_noise::smooth_sway;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw snapshot (host boundary)
// ---------------------------------------------------------------------------

/// A pod snapshot as delivered by the game backend. `stage` is the raw
/// on-chain integer and may be out of range if the contract schema moves
/// ahead of this client — conversion is checked at this boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPodState {
    pub stage: u8,
    pub water_count: u32,
    pub nutrient_count: u32,
    /// Genetic traits; missing fields fall back to `Default` so the
    /// renderer never sees an incomplete trait set.
    #[serde(default)]
    pub traits: Option<PlantVisualTraits>,
    /// Host-forced condition (e.g. a pest event rolled by the backend).
    /// `None` means derive from the care counters.
    #[serde(default)]
    pub condition_override: Option<PlantCondition>,
}

// ---------------------------------------------------------------------------
// Derived renderer state
// ---------------------------------------------------------------------------

/// The renderer's primary input: everything a frame needs to know about
/// the plant, derived once per snapshot change. Read-only inside the
/// renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    pub stage: GrowthStage,
    pub water_count: u32,
    pub nutrient_count: u32,
    pub condition: PlantCondition,
    pub traits: PlantVisualTraits,
    /// Fraction of progress through the current stage, clamped to [0, 1].
    pub stage_progress: f32,
}

impl PlantState {
    /// Derive renderer state from a raw snapshot. Returns `None` when the
    /// raw stage integer is out of range — the session decides how to
    /// degrade (pod-only render; see `RenderSession::render_pod`).
    pub fn from_raw(raw: &RawPodState) -> Option<Self> {
        let stage = GrowthStage::from_raw(raw.stage)?;
        let condition = raw
            .condition_override
            .unwrap_or_else(|| determine_condition(raw.water_count, raw.nutrient_count, stage));
        Some(Self {
            stage,
            water_count: raw.water_count,
            nutrient_count: raw.nutrient_count,
            condition,
            traits: raw.traits.unwrap_or_default(),
            stage_progress: calculate_stage_progress(raw.water_count, stage),
        })
    }
}

// ---------------------------------------------------------------------------
// Classification rules
// ---------------------------------------------------------------------------

/// Classify care condition from the counters.
///
/// Terminal stages always read `Healthy` — no care semantics apply to an
/// empty pod or a spent plant. Otherwise the rules run in order and the
/// first match wins: `Thriving` (both ratios high), then `NeedsWater`,
/// then `NutrientDeficiency` (only past the young stage), else
/// `Healthy`. The ordering is significant: a plant can be simultaneously
/// under-fed and well-watered, and thriving outranks everything.
pub fn determine_condition(
    water_count: u32,
    nutrient_count: u32,
    stage: GrowthStage,
) -> PlantCondition {
    if stage.is_terminal() {
        return PlantCondition::Healthy;
    }

    let stage_num = stage.as_u8() as u32;
    let expected_waters = stage_num * 2;
    let water_ratio = water_count as f32 / expected_waters.max(1) as f32;
    let nutrient_ratio = nutrient_count as f32 / stage_num.max(1) as f32;

    if water_ratio >= 0.9 && nutrient_ratio >= 0.8 {
        PlantCondition::Thriving
    } else if water_ratio < 0.5 {
        PlantCondition::NeedsWater
    } else if nutrient_ratio < 0.3 && stage_num > 2 {
        PlantCondition::NutrientDeficiency
    } else {
        PlantCondition::Healthy
    }
}

/// Fraction of progress through the current stage, from the cumulative
/// water counter. Each stage internally spans exactly 2 waters,
/// independent of the cooldown timing the game layer runs on top.
/// Terminal and harvest-or-later stages always report 1 — there is no
/// partial rendering at the ends of the lifecycle.
pub fn calculate_stage_progress(water_count: u32, stage: GrowthStage) -> f32 {
    let stage_num = stage.as_u8();
    if stage_num == 0 || stage_num >= 5 {
        return 1.0;
    }
    let into_stage = water_count as f32 - (stage_num as f32 - 1.0) * 2.0;
    (into_stage / 2.0).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// On-chain mirrors
// ---------------------------------------------------------------------------

/// Cumulative water counts at which the contract advances to stages
/// 2, 3, 4 and 5 respectively.
pub const WATER_STAGE_THRESHOLDS: [u32; 4] = [3, 6, 8, 10];

/// The growth stage the contract would assign for a cumulative water
/// count, for a pod that has been planted (stage >= 1). Mirrors the
/// contract's stage-progression ladder so offline hosts agree with the
/// chain.
pub fn stage_for_water_count(water_count: u32) -> GrowthStage {
    if water_count >= WATER_STAGE_THRESHOLDS[3] {
        GrowthStage::HarvestReady
    } else if water_count >= WATER_STAGE_THRESHOLDS[2] {
        GrowthStage::Flowering
    } else if water_count >= WATER_STAGE_THRESHOLDS[1] {
        GrowthStage::Vegetative
    } else if water_count >= WATER_STAGE_THRESHOLDS[0] {
        GrowthStage::Young
    } else {
        GrowthStage::Seedling
    }
}

/// Projected harvest weight in grams, from care quality: 2.0 g base,
/// +2% per water beyond the 10 needed to ripen (capped at +20%), +3%
/// per nutrient application (capped at +30%), clamped to 0.5–3.5 g.
/// Matches the settlement math in the harvest contract.
pub fn estimate_harvest_weight(water_count: u32, nutrient_count: u32) -> f32 {
    const BASE_WEIGHT: f32 = 2.0;
    const MIN_WEIGHT: f32 = 0.5;
    const MAX_WEIGHT: f32 = 3.5;

    let extra_waters = water_count.saturating_sub(10).min(10);
    let mut weight = BASE_WEIGHT * (1.0 + extra_waters as f32 * 0.02);

    let nutrient_bonus = (nutrient_count as f32 * 0.03).min(0.3);
    weight *= 1.0 + nutrient_bonus;

    weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
}

// ---------------------------------------------------------------------------
// Animation clock
// ---------------------------------------------------------------------------

/// A particle tracked by the host (falling leaves, drifting motes).
/// Present in the animation contract; the plant renderer itself does not
/// consume these — hosts draw them in their own overlay pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    /// Remaining lifetime in seconds; the particle is dropped at 0.
    pub life: f32,
}

/// Per-session animation clock. Created once per rendering session,
/// advanced by the host every frame, and passed by reference into
/// `render()` — the renderer never mutates it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    /// Seconds since the session started, monotonically increasing
    /// while the session is running.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// Global sway phase, smoothed; convenience for hosts that animate
    /// chrome (pot tilt, UI accents) in sympathy with the plant.
    pub sway_offset: f32,
    /// Gentle global pulse around 1.0 for breathing-scale effects.
    pub pulse_scale: f32,
    pub particles: Vec<Particle>,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            pulse_scale: 1.0,
            ..Self::default()
        }
    }

    /// Advance the clock by `dt` seconds and tick host-owned particles.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        self.delta_time = dt;
        self.sway_offset = smooth_sway(self.time, 0.0, 1.0);
        self.pulse_scale = 1.0 + 0.05 * (self.time * 2.0).sin();

        for p in &mut self.particles {
            p.position.x += p.velocity.x * dt;
            p.position.y += p.velocity.y * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrainType;

    #[test]
    fn thriving_when_both_ratios_high() {
        // waterRatio = 20/10 = 2.0, nutrientRatio = 10/5 = 2.0.
        assert_eq!(
            determine_condition(20, 10, GrowthStage::HarvestReady),
            PlantCondition::Thriving
        );
    }

    #[test]
    fn needs_water_when_under_half() {
        // expectedWaters = 6, ratio 1/6 < 0.5.
        assert_eq!(
            determine_condition(1, 0, GrowthStage::Vegetative),
            PlantCondition::NeedsWater
        );
    }

    #[test]
    fn nutrient_deficiency_past_young_stage() {
        // waterRatio = 8/6 >= 0.5, nutrientRatio = 0 < 0.3, stage > 2.
        assert_eq!(
            determine_condition(8, 0, GrowthStage::Vegetative),
            PlantCondition::NutrientDeficiency
        );
    }

    #[test]
    fn no_nutrient_deficiency_at_young_stage() {
        // Same ratios but stage 2: the deficiency rule requires stage > 2.
        assert_eq!(
            determine_condition(3, 0, GrowthStage::Young),
            PlantCondition::Healthy
        );
    }

    #[test]
    fn terminal_stages_always_healthy() {
        assert_eq!(
            determine_condition(0, 0, GrowthStage::Empty),
            PlantCondition::Healthy
        );
        assert_eq!(
            determine_condition(999, 999, GrowthStage::NeedsCleanup),
            PlantCondition::Healthy
        );
    }

    #[test]
    fn thriving_outranks_everything() {
        // Rules run in order: a plant that satisfies the thriving check
        // never falls through to the deficiency checks.
        let condition = determine_condition(18, 8, GrowthStage::HarvestReady);
        assert_eq!(condition, PlantCondition::Thriving);
    }

    #[test]
    fn stage_progress_boundaries() {
        assert_eq!(calculate_stage_progress(0, GrowthStage::Empty), 1.0);
        assert_eq!(calculate_stage_progress(0, GrowthStage::Vegetative), 0.0);
        assert_eq!(calculate_stage_progress(100, GrowthStage::Vegetative), 1.0);
        assert_eq!(calculate_stage_progress(0, GrowthStage::HarvestReady), 1.0);
        assert_eq!(calculate_stage_progress(3, GrowthStage::HarvestReady), 1.0);
        assert_eq!(calculate_stage_progress(42, GrowthStage::NeedsCleanup), 1.0);
    }

    #[test]
    fn stage_progress_midpoint() {
        // Vegetative spans waters 4..6; water 5 is halfway through.
        assert_eq!(calculate_stage_progress(5, GrowthStage::Vegetative), 0.5);
        assert_eq!(calculate_stage_progress(4, GrowthStage::Vegetative), 0.0);
        assert_eq!(calculate_stage_progress(6, GrowthStage::Vegetative), 1.0);
    }

    #[test]
    fn from_raw_defaults_missing_traits() {
        let raw = RawPodState {
            stage: 3,
            water_count: 5,
            nutrient_count: 2,
            traits: None,
            condition_override: None,
        };
        let state = PlantState::from_raw(&raw).unwrap();
        assert_eq!(state.traits, PlantVisualTraits::default());
        assert_eq!(state.stage, GrowthStage::Vegetative);
        assert_eq!(state.stage_progress, 0.5);
    }

    #[test]
    fn from_raw_rejects_unknown_stage() {
        let raw = RawPodState {
            stage: 9,
            water_count: 0,
            nutrient_count: 0,
            traits: None,
            condition_override: None,
        };
        assert_eq!(PlantState::from_raw(&raw), None);
    }

    #[test]
    fn condition_override_wins() {
        let raw = RawPodState {
            stage: 3,
            water_count: 20,
            nutrient_count: 20,
            traits: None,
            condition_override: Some(PlantCondition::PestInfestation),
        };
        let state = PlantState::from_raw(&raw).unwrap();
        assert_eq!(state.condition, PlantCondition::PestInfestation);
    }

    #[test]
    fn raw_snapshot_deserializes_with_sparse_fields() {
        // The backend may omit traits/override entirely.
        let json = r#"{"stage": 2, "water_count": 4, "nutrient_count": 1}"#;
        let raw: RawPodState = serde_json::from_str(json).unwrap();
        assert_eq!(raw.traits, None);
        assert_eq!(raw.condition_override, None);
        let state = PlantState::from_raw(&raw).unwrap();
        assert_eq!(state.stage, GrowthStage::Young);
        assert_eq!(state.traits.strain, StrainType::Hybrid);
    }

    #[test]
    fn water_ladder_matches_contract() {
        assert_eq!(stage_for_water_count(0), GrowthStage::Seedling);
        assert_eq!(stage_for_water_count(2), GrowthStage::Seedling);
        assert_eq!(stage_for_water_count(3), GrowthStage::Young);
        assert_eq!(stage_for_water_count(6), GrowthStage::Vegetative);
        assert_eq!(stage_for_water_count(8), GrowthStage::Flowering);
        assert_eq!(stage_for_water_count(10), GrowthStage::HarvestReady);
        assert_eq!(stage_for_water_count(50), GrowthStage::HarvestReady);
    }

    #[test]
    fn harvest_weight_baseline_and_caps() {
        assert_eq!(estimate_harvest_weight(10, 0), 2.0);
        // +20% water cap, +30% nutrient cap: 2.0 * 1.2 * 1.3 = 3.12.
        let max_care = estimate_harvest_weight(30, 25);
        assert!((max_care - 3.12).abs() < 1e-5);
        // Clamped to the contract's bounds.
        assert!(estimate_harvest_weight(0, 0) >= 0.5);
        assert!(estimate_harvest_weight(1000, 1000) <= 3.5);
    }

    #[test]
    fn animation_clock_advances_monotonically() {
        let mut anim = AnimationState::new();
        let mut last = anim.time;
        for _ in 0..100 {
            anim.advance(1.0 / 60.0);
            assert!(anim.time > last);
            assert!((anim.delta_time - 1.0 / 60.0).abs() < 1e-6);
            assert!((-1.0..=1.0).contains(&anim.sway_offset));
            assert!((0.9..=1.1).contains(&anim.pulse_scale));
            last = anim.time;
        }
    }

    #[test]
    fn particles_expire() {
        let mut anim = AnimationState::new();
        anim.particles.push(Particle {
            position: Point::new(0.0, 0.0),
            velocity: Point::new(1.0, 2.0),
            life: 0.05,
        });
        anim.advance(0.1);
        assert!(anim.particles.is_empty());
    }

    #[test]
    fn plant_state_serialization_roundtrip() {
        let raw = RawPodState {
            stage: 4,
            water_count: 9,
            nutrient_count: 3,
            traits: Some(PlantVisualTraits::default()),
            condition_override: None,
        };
        let state = PlantState::from_raw(&raw).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: PlantState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
