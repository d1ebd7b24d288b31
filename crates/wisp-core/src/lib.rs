//! Wisp Core - Foundational types for the Wisp smoke effects
//!
//! This crate provides the core types that the smoke subsystem depends on:
//! - `ObjectId` - Network object identifiers
//! - `Vec2`, `Circle` - 2D spatial types
//! - `Color` - RGBA color with HSV construction
//! - `Layer` - Visibility layer bitmask
//! - Error types and Result alias

mod error;
mod id;
mod layer;
mod types;

pub use error::{Result, WispError};
pub use id::ObjectId;
pub use layer::Layer;
pub use types::{Circle, Color, Vec2};
