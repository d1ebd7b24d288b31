//! Wisp Smoke - pooled, network-smoothed smoke particles
//!
//! Turns authoritative smoke objects from the server into animated sprites:
//! - First-fit particle pool with generation-checked handles
//! - Exponential smoothing of position and radius toward network targets
//! - Timed fade-out when the server drops a smoke object
//! - Per-frame layer resolution against the viewer and structure interiors

pub mod barn;
pub mod collab;
pub mod config;
pub mod curves;
pub mod entity;
pub mod layer;
pub mod particle;
pub mod rand;

pub use barn::{FrameStats, SmokeBarn};
pub use collab::{Camera, SmokeRenderer, StructureMap, Viewer};
pub use config::SmokeConfig;
pub use entity::{SmokeData, SmokeEntity, SmokeFullData};
pub use layer::resolve_layer;
pub use particle::{ParticleHandle, ParticlePool, SmokeParticle, SmokeSprite};
