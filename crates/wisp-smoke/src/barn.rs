//! Owns every smoke particle and entity for a session and drives them each frame

use crate::collab::{Camera, SmokeRenderer, StructureMap, Viewer};
use crate::config::SmokeConfig;
use crate::entity::{SmokeData, SmokeEntity};
use crate::layer::resolve_layer;
use crate::particle::{ParticlePool, SmokeParticle};
use crate::rand::SmokeRng;
use std::collections::HashMap;
use wisp_core::{ObjectId, Result, WispError};

/// Counts from one [`SmokeBarn::update`] pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Particles still active after the pass
    pub active: usize,
    /// Sprites handed to the renderer
    pub submitted: usize,
    /// Particles whose fade completed this pass
    pub retired: usize,
}

/// Session-scoped smoke state: the particle pool plus the network objects
/// bound into it.
pub struct SmokeBarn {
    pool: ParticlePool,
    entities: HashMap<ObjectId, SmokeEntity>,
    rng: SmokeRng,
    config: SmokeConfig,
}

impl SmokeBarn {
    pub fn new() -> Self {
        let config = SmokeConfig::default();
        Self {
            pool: ParticlePool::new(config.textures.clone()),
            entities: HashMap::new(),
            rng: SmokeRng::new(config.seed),
            config,
        }
    }

    pub fn with_config(config: SmokeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pool: ParticlePool::new(config.textures.clone()),
            entities: HashMap::new(),
            rng: SmokeRng::new(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn entity(&self, id: ObjectId) -> Option<&SmokeEntity> {
        self.entities.get(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The particle currently bound to `id`
    pub fn particle(&self, id: ObjectId) -> Option<&SmokeParticle> {
        self.entities
            .get(&id)
            .and_then(|e| self.pool.get(e.particle()))
    }

    /// Apply one network update for a smoke object.
    ///
    /// The first sighting (`is_new`) must be a full update, since the layer
    /// and interior flag are needed to create the particle.
    pub fn apply_update(&mut self, id: ObjectId, data: &SmokeData, is_new: bool) -> Result<()> {
        if !is_new {
            let entity = self
                .entities
                .get_mut(&id)
                .ok_or(WispError::UnknownObject(id))?;
            return entity.update(data, &mut self.pool);
        }

        let full = data.full.ok_or(WispError::IncompleteCreate(id))?;
        if let Some(previous) = self.entities.remove(&id) {
            log::warn!("[smoke] object {id} created twice; fading out its old particle");
            previous.destroy(&mut self.pool)?;
        }

        let entity = SmokeEntity::create(
            id,
            data.pos,
            data.rad,
            full,
            &mut self.pool,
            &mut self.rng,
            &self.config,
        )?;
        self.entities.insert(id, entity);
        Ok(())
    }

    /// The server dropped `id`: let its smoke dissolve
    pub fn remove(&mut self, id: ObjectId) -> Result<()> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(WispError::UnknownObject(id))?;
        entity.destroy(&mut self.pool)
    }

    /// Drop every entity for a scene transition. Their particles fade out
    /// rather than vanish.
    ///
    /// Every entity is released even if some fail; the first failure is
    /// returned afterwards.
    pub fn clear(&mut self) -> Result<()> {
        let mut first_err = None;
        for (id, entity) in self.entities.drain() {
            if let Err(e) = entity.destroy(&mut self.pool) {
                log::warn!("[smoke] object {id} could not be faded out: {e}");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Advance every active particle by `dt` seconds and submit it for drawing
    pub fn update(
        &mut self,
        dt: f32,
        camera: &impl Camera,
        viewer: &impl Viewer,
        map: &impl StructureMap,
        renderer: &mut impl SmokeRenderer,
    ) -> FrameStats {
        let viewer_layer = viewer.layer();
        let mut stats = FrameStats::default();

        for p in self.pool.iter_active_mut() {
            if !p.advance(dt) {
                stats.retired += 1;
            }
            let alpha = p.alpha(self.config.max_alpha);

            let layer = resolve_layer(p.layer, p.pos, viewer_layer, map);
            let z_order = if p.interior {
                self.config.interior_z_order
            } else {
                self.config.exterior_z_order
            };

            let scale = camera.pixels(p.rad * 2.0 / camera.ppu());
            p.sprite.position = camera.point_to_screen(p.pos);
            p.sprite.scale = scale;
            p.sprite.rotation = p.rot;
            p.sprite.tint = p.tint;
            p.sprite.alpha = alpha;
            p.sprite.visible = p.active;

            renderer.submit(&p.sprite, layer, z_order, p.draw_order_key);
            stats.submitted += 1;
        }

        stats.active = stats.submitted - stats.retired;
        log::trace!(
            "[smoke] frame: {} active, {} submitted, {} retired",
            stats.active,
            stats.submitted,
            stats.retired
        );
        stats
    }
}

impl Default for SmokeBarn {
    fn default() -> Self {
        Self::new()
    }
}
