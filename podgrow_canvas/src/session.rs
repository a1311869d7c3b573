// Render session — the host-side animation loop state.
//
// One `RenderSession` per displayed pod. It owns everything the old
// host kept as free-floating module state: the renderer instance, the
// animation clock, and the palette memo. The explicit `start()`/`stop()`
// lifecycle replaces implicit animation-frame bookkeeping — a stopped
// session simply ignores `advance()`, and there is no in-flight work to
// cancel because every render call completes synchronously.
//
// The session is also the raw-integer boundary: growth stages arrive
// from the chain as `u8`, and values this client doesn't know degrade
// gracefully to a pod-only frame with a logged warning rather than a
// panic — a newer contract schema must not brick older clients.
//
// See also: `raster.rs` for turning the produced scenes into pixels,
// `podgrow_plant::renderer` for the composition itself,
// `podgrow_plant::state` for snapshot derivation.

use podgrow_plant::config::RenderTuning;
use podgrow_plant::palette::generate_plant_colors;
use podgrow_plant::renderer::{PlantRenderer, RenderContext};
use podgrow_plant::scene::Scene;
use podgrow_plant::state::{AnimationState, PlantState, RawPodState};
use podgrow_plant::types::PlantVisualTraits;

/// Per-pod rendering session: renderer + clock + palette memo.
pub struct RenderSession {
    renderer: PlantRenderer,
    anim: AnimationState,
    traits: PlantVisualTraits,
    tuning: RenderTuning,
    seed: f32,
    running: bool,
}

impl RenderSession {
    /// Create a session for a pod. `seed` should be stable per pod
    /// (derive it from the pod id) so the plant's procedural variation
    /// survives unmount/remount.
    pub fn new(traits: PlantVisualTraits, seed: f32) -> Self {
        Self::with_tuning(traits, seed, RenderTuning::default())
    }

    pub fn with_tuning(traits: PlantVisualTraits, seed: f32, tuning: RenderTuning) -> Self {
        Self {
            renderer: PlantRenderer::with_tuning(
                generate_plant_colors(&traits),
                seed,
                tuning.clone(),
            ),
            anim: AnimationState::new(),
            traits,
            tuning,
            seed,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the animation clock. A stopped session holds its frame.
    pub fn advance(&mut self, dt: f32) {
        if self.running {
            self.anim.advance(dt);
        }
    }

    pub fn anim(&self) -> &AnimationState {
        &self.anim
    }

    pub fn time(&self) -> f32 {
        self.anim.time
    }

    /// Render one frame from a raw pod snapshot.
    ///
    /// The palette is memoized: it is regenerated only when the
    /// snapshot's traits differ from the last frame's, never per frame.
    /// An out-of-range stage integer renders the pod container only and
    /// logs a warning (graceful degradation for forward compatibility).
    pub fn render_pod(
        &mut self,
        raw: &RawPodState,
        width: f32,
        height: f32,
        device_scale: f32,
    ) -> Scene {
        self.ensure_palette(raw.traits.unwrap_or_default());

        match PlantState::from_raw(raw) {
            Some(plant) => self.renderer.render(&RenderContext {
                width,
                height,
                device_scale,
                plant: &plant,
                anim: &self.anim,
            }),
            None => {
                log::warn!(
                    "unknown growth stage {} in pod snapshot; rendering pod only",
                    raw.stage
                );
                self.renderer.render_pod_only(width, height, self.anim.time)
            }
        }
    }

    /// Rebuild the renderer's palette iff the traits changed.
    fn ensure_palette(&mut self, traits: PlantVisualTraits) {
        if traits != self.traits {
            self.traits = traits;
            self.renderer = PlantRenderer::with_tuning(
                generate_plant_colors(&traits),
                self.seed,
                self.tuning.clone(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podgrow_plant::types::Terpene;

    fn snapshot(stage: u8) -> RawPodState {
        RawPodState {
            stage,
            water_count: stage as u32 * 2,
            nutrient_count: 1,
            traits: None,
            condition_override: None,
        }
    }

    #[test]
    fn advance_only_runs_while_started() {
        let mut session = RenderSession::new(PlantVisualTraits::default(), 3.0);
        session.advance(1.0);
        assert_eq!(session.time(), 0.0, "stopped session must hold its clock");

        session.start();
        assert!(session.is_running());
        session.advance(0.5);
        assert_eq!(session.time(), 0.5);

        session.stop();
        session.advance(5.0);
        assert_eq!(session.time(), 0.5);
    }

    #[test]
    fn unknown_stage_degrades_to_pod_only() {
        let mut session = RenderSession::new(PlantVisualTraits::default(), 3.0);
        let normal = session.render_pod(&snapshot(3), 240.0, 320.0, 1.0);
        let degraded = session.render_pod(&snapshot(42), 240.0, 320.0, 1.0);

        assert!(!degraded.is_empty(), "the pod underlay must still draw");
        assert!(
            degraded.len() < normal.len(),
            "a degraded frame is just the pod container"
        );
        // The degraded frame is exactly the shared pod prefix.
        assert_eq!(&normal.cmds[..degraded.len()], &degraded.cmds[..]);
    }

    #[test]
    fn rendering_is_stable_while_the_clock_is_stopped() {
        let mut session = RenderSession::new(PlantVisualTraits::default(), 3.0);
        let a = session.render_pod(&snapshot(5), 240.0, 320.0, 1.0);
        let b = session.render_pod(&snapshot(5), 240.0, 320.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn clock_advancing_changes_the_frame() {
        let mut session = RenderSession::new(PlantVisualTraits::default(), 3.0);
        session.start();
        let before = session.render_pod(&snapshot(5), 240.0, 320.0, 1.0);
        session.advance(0.75);
        let after = session.render_pod(&snapshot(5), 240.0, 320.0, 1.0);
        assert_ne!(before, after);
    }

    #[test]
    fn trait_change_regenerates_the_palette() {
        let mut session = RenderSession::new(PlantVisualTraits::default(), 3.0);
        let base = session.render_pod(&snapshot(3), 240.0, 320.0, 1.0);

        let retinted = RawPodState {
            traits: Some(PlantVisualTraits {
                dominant_terpene: Terpene::Linalool,
                ..Default::default()
            }),
            ..snapshot(3)
        };
        let tinted = session.render_pod(&retinted, 240.0, 320.0, 1.0);
        assert_ne!(base, tinted, "a terpene change must retint the frame");

        // And the memo settles: same traits again, same frame.
        let tinted_again = session.render_pod(&retinted, 240.0, 320.0, 1.0);
        assert_eq!(tinted, tinted_again);
    }
}
