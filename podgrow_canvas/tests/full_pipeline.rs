// Full pipeline integration: raw JSON snapshot -> state derivation ->
// scene composition -> rasterized pixels.
//
// Exercises the whole stack the way an embedding host does: snapshots
// arrive as JSON from the backend, a session drives the clock, and the
// reference rasterizer turns frames into pixels.

use podgrow_canvas::{Canvas, RenderSession};
use podgrow_plant::state::RawPodState;
use podgrow_plant::types::PlantVisualTraits;

const W: u32 = 240;
const H: u32 = 320;

fn painted_pixels(canvas: &Canvas) -> usize {
    canvas
        .pixels()
        .chunks_exact(4)
        .filter(|px| px[0] > 0 || px[1] > 0 || px[2] > 0)
        .count()
}

#[test]
fn json_snapshot_renders_to_pixels() {
    let json = r#"{
        "stage": 5,
        "water_count": 12,
        "nutrient_count": 6,
        "traits": {
            "strain": "Sativa",
            "dominant_terpene": "Limonene",
            "thc_potential": 85.0,
            "growth_modifier": 1.2,
            "rarity": "Rare"
        }
    }"#;
    let raw: RawPodState = serde_json::from_str(json).unwrap();

    let mut session = RenderSession::new(raw.traits.unwrap(), 42.0);
    session.start();
    session.advance(0.4);

    let scene = session.render_pod(&raw, W as f32, H as f32, 1.0);
    assert!(!scene.is_empty());

    let mut canvas = Canvas::new(W, H);
    canvas.execute(&scene);
    let painted = painted_pixels(&canvas);
    assert!(
        painted > (W * H / 20) as usize,
        "a harvest-ready plant should paint a meaningful share of the canvas, got {painted}"
    );
}

#[test]
fn growth_paints_progressively_more() {
    // A mature plant covers more canvas than an empty pod's indicator.
    let mut session = RenderSession::new(PlantVisualTraits::default(), 7.0);
    session.start();
    session.advance(0.25);

    let coverage = |session: &mut RenderSession, stage: u8, water: u32| -> usize {
        let raw = RawPodState {
            stage,
            water_count: water,
            nutrient_count: 2,
            traits: None,
            condition_override: None,
        };
        let scene = session.render_pod(&raw, W as f32, H as f32, 1.0);
        let mut canvas = Canvas::new(W, H);
        canvas.execute(&scene);
        painted_pixels(&canvas)
    };

    let empty = coverage(&mut session, 0, 0);
    let vegetative = coverage(&mut session, 3, 6);
    let harvest = coverage(&mut session, 5, 10);
    assert!(vegetative > empty, "vegetative should out-paint the empty pod");
    assert!(harvest > empty, "harvest should out-paint the empty pod");
}

#[test]
fn identical_sessions_produce_identical_pixels() {
    let raw = RawPodState {
        stage: 4,
        water_count: 8,
        nutrient_count: 4,
        traits: None,
        condition_override: None,
    };

    let render = || {
        let mut session = RenderSession::new(PlantVisualTraits::default(), 11.0);
        session.start();
        // Same wall-clock path, frame by frame.
        for _ in 0..5 {
            session.advance(1.0 / 60.0);
        }
        let scene = session.render_pod(&raw, W as f32, H as f32, 1.0);
        let mut canvas = Canvas::new(W, H);
        canvas.execute(&scene);
        canvas.pixels().to_vec()
    };

    assert_eq!(render(), render());
}

#[test]
fn device_scale_renders_at_physical_resolution() {
    let raw = RawPodState {
        stage: 3,
        water_count: 6,
        nutrient_count: 2,
        traits: None,
        condition_override: None,
    };
    let mut session = RenderSession::new(PlantVisualTraits::default(), 7.0);
    let scene = session.render_pod(&raw, W as f32, H as f32, 2.0);

    // Logical commands replayed at 2x into a 2x buffer.
    let mut canvas = Canvas::new(W * 2, H * 2);
    canvas.execute_scaled(&scene, 2.0);
    let painted = painted_pixels(&canvas);

    let mut canvas_1x = Canvas::new(W, H);
    canvas_1x.execute(&scene);
    let painted_1x = painted_pixels(&canvas_1x);

    assert!(
        painted > painted_1x * 3,
        "2x device scale should roughly quadruple painted area"
    );
}
