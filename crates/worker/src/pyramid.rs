//! Pyramid pipeline entry point.
//!
//! Pyramid jobs are decoded and dispatched, but the zoom-level tile
//! generation is not implemented in this worker yet.

pub fn pyramid_step(x: i32, y: i32, z: i32) {
    tracing::warn!(
        x,
        y,
        z,
        "Pyramid job received, but the pyramid pipeline is not implemented",
    );
}
