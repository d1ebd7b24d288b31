//! Smoothing helpers (clamped linear interpolation)

use wisp_core::Vec2;

/// Clamp `v` into `[lo, hi]`
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Move `a` toward `b` by factor `t`, with `t` clamped to [0, 1]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + (b - a) * clamp(t, 0.0, 1.0)
}

/// Component-wise [`lerp`] for vectors
pub fn v2_lerp(t: f32, a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(lerp(t, a.x, b.x), lerp(t, a.y, b.y))
}
