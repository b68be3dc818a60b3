//! Render pipeline entry point.
//!
//! Render jobs are decoded and dispatched, but the rendering itself is
//! not implemented in this worker yet. The entry point exists so the
//! dispatch match stays exhaustive and the pipeline can be filled in
//! without touching the loop.

pub fn render_step(x: i32, y: i32) {
    tracing::warn!(x, y, "Render job received, but the render pipeline is not implemented");
}
