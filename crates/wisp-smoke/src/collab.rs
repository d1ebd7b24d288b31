//! Interfaces of the systems the smoke pass reads from and draws into

use crate::particle::SmokeSprite;
use wisp_core::{Circle, Layer, Vec2};

/// World-to-screen projection
pub trait Camera {
    /// Project a world-space point to screen space
    fn point_to_screen(&self, pos: Vec2) -> Vec2;

    /// Convert a world-space length to screen pixels
    fn pixels(&self, len: f32) -> f32;

    /// Pixels per world unit at unit zoom
    fn ppu(&self) -> f32;
}

/// Spatial queries against map structures
pub trait StructureMap {
    /// Whether `circle` lies inside any structure's interior mask
    fn inside_structure_mask(&self, circle: &Circle) -> bool;
}

/// The player whose point of view is being rendered
pub trait Viewer {
    fn layer(&self) -> Layer;
}

/// Receives one sprite per active particle per frame
pub trait SmokeRenderer {
    /// Queue `sprite` for compositing. `z_order` is the depth bucket;
    /// `draw_order_key` breaks ties inside it.
    fn submit(&mut self, sprite: &SmokeSprite, layer: Layer, z_order: i32, draw_order_key: i32);
}

impl Viewer for Layer {
    fn layer(&self) -> Layer {
        *self
    }
}
