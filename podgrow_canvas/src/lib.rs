// podgrow_canvas — presenter and host session for plant scenes.
//
// Consumes the retained draw-command scenes produced by
// `podgrow_plant` and owns the two host-side concerns the pure library
// deliberately cannot touch:
//
// - `session.rs`: the per-pod animation session (clock, start/stop
//   lifecycle, palette memoization, raw-stage boundary handling).
// - `raster.rs`:  a software RGBA8 rasterizer replaying scenes into a
//   pixel buffer — the reference presenter and the backend the
//   integration tests assert against.
//
// Hosts embedding a GPU or platform canvas implement their own replay
// of `DrawCmd`; the command list is the stable contract.

pub mod raster;
pub mod session;

pub use raster::Canvas;
pub use session::RenderSession;
