//! Particle types: smoothed smoke state and the recycling pool that owns it

use crate::config::SmokeConfig;
use crate::curves::{clamp, lerp, v2_lerp};
use crate::rand::SmokeRng;
use std::f32::consts::PI;
use wisp_core::{Color, Layer, Result, Vec2, WispError};

/// Exponential approach rate toward network targets, per second
const SMOOTHING_RATE: f32 = 3.0;
/// Angular velocity damping coefficient, per second
const ROT_DAMPING: f32 = 0.1;

/// Retained render parameters for one pool slot
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeSprite {
    /// Texture name, fixed for the lifetime of the slot
    pub texture: String,
    /// Anchor is the sprite center
    pub position: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub tint: Color,
    pub alpha: f32,
    pub visible: bool,
}

impl SmokeSprite {
    fn hidden(texture: String) -> Self {
        Self {
            texture,
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            tint: Color::WHITE,
            alpha: 1.0,
            visible: false,
        }
    }
}

/// One smoke puff: current visual state plus the authoritative target it
/// is easing toward.
///
/// Only `active` is meaningful on an inactive particle; everything else is
/// left over from its previous use.
#[derive(Debug, Clone)]
pub struct SmokeParticle {
    pub active: bool,
    pub draw_order_key: i32,
    pub pos: Vec2,
    pub pos_target: Vec2,
    pub rad: f32,
    pub rad_target: f32,
    pub rot: f32,
    pub rot_vel: f32,
    pub fading: bool,
    pub fade_elapsed: f32,
    pub fade_duration: f32,
    pub tint: Color,
    pub layer: Layer,
    pub interior: bool,
    pub sprite: SmokeSprite,
}

impl SmokeParticle {
    fn dead(texture: String) -> Self {
        Self {
            active: false,
            draw_order_key: 0,
            pos: Vec2::ZERO,
            pos_target: Vec2::ZERO,
            rad: 0.0,
            rad_target: 0.0,
            rot: 0.0,
            rot_vel: 0.0,
            fading: false,
            fade_elapsed: 0.0,
            fade_duration: 1.0,
            tint: Color::WHITE,
            layer: Layer::default(),
            interior: false,
            sprite: SmokeSprite::hidden(texture),
        }
    }

    /// Re-initialize every simulated field for a fresh binding. Targets start
    /// equal to the current state, so the particle holds still until the
    /// next network update moves them.
    pub fn init(
        &mut self,
        pos: Vec2,
        rad: f32,
        layer: Layer,
        interior: bool,
        rng: &mut SmokeRng,
        config: &SmokeConfig,
    ) {
        self.pos = pos;
        self.pos_target = pos;
        self.rad = rad;
        self.rad_target = rad;
        self.rot = rng.range(0.0, PI * 2.0);
        self.rot_vel = PI * rng.range(config.rot_speed_min, config.rot_speed_max) * rng.sign();
        self.fading = false;
        self.fade_elapsed = 0.0;
        self.fade_duration = rng.range(config.fade_duration_min, config.fade_duration_max);
        self.tint = Color::from_hsv(
            0.0,
            0.0,
            rng.range(config.tint_value_min, config.tint_value_max),
        );
        self.layer = layer;
        self.interior = interior;
    }

    /// Start the fade-out. The particle stays active until it completes.
    pub fn fade_out(&mut self) {
        self.fading = true;
    }

    /// Advance smoothing, rotation and fade by `dt` seconds.
    /// Returns whether the particle is still active afterwards.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.rad = lerp(dt * SMOOTHING_RATE, self.rad, self.rad_target);
        self.pos = v2_lerp(dt * SMOOTHING_RATE, self.pos, self.pos_target);

        self.rot_vel /= 1.0 + dt * ROT_DAMPING;
        self.rot += self.rot_vel * dt;

        if self.fading {
            self.fade_elapsed += dt;
        }
        self.active = self.fade_elapsed < self.fade_duration;
        self.active
    }

    /// Opacity: linear fade to zero, capped at `max_alpha`
    pub fn alpha(&self, max_alpha: f32) -> f32 {
        clamp(1.0 - self.fade_elapsed / self.fade_duration, 0.0, 1.0) * max_alpha
    }
}

/// Generation-checked reference to a pool slot.
///
/// The generation changes every time the slot is handed out again, so a
/// handle kept past its particle's reuse no longer resolves.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct ParticleHandle {
    index: u32,
    generation: u32,
}

impl ParticleHandle {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

struct Slot {
    generation: u32,
    particle: SmokeParticle,
}

/// Growable store of smoke particles with first-fit reuse.
///
/// Slots are never removed, so handles index stably. Allocation scans for
/// the first inactive slot and only appends when every slot is in use.
pub struct ParticlePool {
    slots: Vec<Slot>,
    textures: Vec<String>,
    next_draw_order_key: i32,
}

impl ParticlePool {
    /// Create an empty pool. New slots pick their sprite from `textures`.
    ///
    /// # Panics
    ///
    /// Panics if `textures` is empty. [`SmokeConfig::validate`] rejects such
    /// configs before they reach the pool.
    pub fn new(textures: Vec<String>) -> Self {
        assert!(
            !textures.is_empty(),
            "ParticlePool needs at least one sprite texture"
        );
        Self {
            slots: Vec::new(),
            textures,
            next_draw_order_key: i32::MAX,
        }
    }

    /// Number of slots, active or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.particle.active).count()
    }

    /// Hand out a slot, reusing the first inactive one if any.
    ///
    /// The returned particle is marked active and keyed, but every other
    /// field is stale until the caller runs [`SmokeParticle::init`].
    pub fn allocate(&mut self, rng: &mut SmokeRng) -> ParticleHandle {
        let index = match self.slots.iter().position(|s| !s.particle.active) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                log::debug!(
                    "[smoke] reusing particle slot {index} (generation {})",
                    slot.generation
                );
                index
            }
            None => {
                let texture = self.textures[rng.index(self.textures.len())].clone();
                self.slots.push(Slot {
                    generation: 0,
                    particle: SmokeParticle::dead(texture),
                });
                log::debug!("[smoke] grew particle pool to {} slots", self.slots.len());
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[index];
        slot.particle.active = true;
        slot.particle.draw_order_key = self.next_draw_order_key;
        self.next_draw_order_key = self.next_draw_order_key.wrapping_sub(1);

        ParticleHandle {
            index: index as u32,
            generation: slot.generation,
        }
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&SmokeParticle> {
        self.slots
            .get(handle.index())
            .filter(|s| s.generation == handle.generation)
            .map(|s| &s.particle)
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut SmokeParticle> {
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation)
            .map(|s| &mut s.particle)
    }

    /// Like [`get_mut`](Self::get_mut), but reports a stale handle as an error
    pub fn try_get_mut(&mut self, handle: ParticleHandle) -> Result<&mut SmokeParticle> {
        self.get_mut(handle).ok_or(WispError::StaleHandle {
            index: handle.index,
            generation: handle.generation,
        })
    }

    /// Iterate active particles in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = &SmokeParticle> {
        self.slots.iter().map(|s| &s.particle).filter(|p| p.active)
    }

    /// Iterate active particles mutably, in slot order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut SmokeParticle> {
        self.slots
            .iter_mut()
            .map(|s| &mut s.particle)
            .filter(|p| p.active)
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(SmokeConfig::default().textures)
    }
}
