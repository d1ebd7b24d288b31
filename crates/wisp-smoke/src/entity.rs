//! Network smoke objects and their binding to a pooled particle

use crate::config::SmokeConfig;
use crate::particle::{ParticleHandle, ParticlePool};
use crate::rand::SmokeRng;
use wisp_core::{Layer, ObjectId, Result, Vec2};

/// Fields only present on a full update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmokeFullData {
    pub layer: Layer,
    pub interior: bool,
}

/// Authoritative smoke state from one network update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmokeData {
    pub pos: Vec2,
    pub rad: f32,
    /// `Some` on a full update
    pub full: Option<SmokeFullData>,
}

/// One networked smoke source, bound to exactly one particle.
///
/// An entity only exists once created, and [`destroy`](Self::destroy)
/// consumes it, so there is no way to update or free an unbound entity.
#[derive(Debug)]
pub struct SmokeEntity {
    id: ObjectId,
    pos: Vec2,
    rad: f32,
    layer: Layer,
    interior: bool,
    particle: ParticleHandle,
}

impl SmokeEntity {
    /// Bind a fresh particle to a newly seen smoke object
    pub fn create(
        id: ObjectId,
        pos: Vec2,
        rad: f32,
        full: SmokeFullData,
        pool: &mut ParticlePool,
        rng: &mut SmokeRng,
        config: &SmokeConfig,
    ) -> Result<Self> {
        let particle = pool.allocate(rng);
        pool.try_get_mut(particle)?
            .init(pos, rad, full.layer, full.interior, rng, config);
        log::debug!(
            "[smoke] object {id} bound to particle slot {}",
            particle.index()
        );

        Ok(Self {
            id,
            pos,
            rad,
            layer: full.layer,
            interior: full.interior,
            particle,
        })
    }

    /// Retarget the bound particle. Its current position and radius keep
    /// easing from wherever they are.
    pub fn update(&mut self, data: &SmokeData, pool: &mut ParticlePool) -> Result<()> {
        self.pos = data.pos;
        self.rad = data.rad;
        if let Some(full) = data.full {
            self.layer = full.layer;
            self.interior = full.interior;
        }

        let p = pool.try_get_mut(self.particle)?;
        p.pos_target = self.pos;
        p.rad_target = self.rad;
        p.layer = self.layer;
        p.interior = self.interior;
        Ok(())
    }

    /// Release the particle into its fade-out. The smoke lingers until the
    /// fade completes, then the slot returns to the pool.
    pub fn destroy(self, pool: &mut ParticlePool) -> Result<()> {
        pool.try_get_mut(self.particle)?.fade_out();
        log::debug!(
            "[smoke] object {} released particle slot {}",
            self.id,
            self.particle.index()
        );
        Ok(())
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn rad(&self) -> f32 {
        self.rad
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn interior(&self) -> bool {
        self.interior
    }

    pub fn particle(&self) -> ParticleHandle {
        self.particle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: SmokeFullData = SmokeFullData {
        layer: Layer(1),
        interior: false,
    };

    fn setup() -> (ParticlePool, SmokeRng, SmokeConfig) {
        (ParticlePool::default(), SmokeRng::new(42), SmokeConfig::default())
    }

    #[test]
    fn create_binds_initialized_particle() {
        let (mut pool, mut rng, config) = setup();
        let e = SmokeEntity::create(
            ObjectId(1),
            Vec2::new(3.0, 4.0),
            5.0,
            GROUND,
            &mut pool,
            &mut rng,
            &config,
        )
        .unwrap();

        let p = pool.get(e.particle()).unwrap();
        assert!(p.active);
        assert_eq!(p.pos, Vec2::new(3.0, 4.0));
        assert_eq!(p.pos_target, p.pos);
        assert_eq!(p.rad, 5.0);
        assert_eq!(p.layer, Layer(1));
        assert!(!p.interior);
        assert_eq!(e.id(), ObjectId(1));
    }

    #[test]
    fn partial_update_moves_targets_only() {
        let (mut pool, mut rng, config) = setup();
        let mut e =
            SmokeEntity::create(ObjectId(1), Vec2::ZERO, 5.0, GROUND, &mut pool, &mut rng, &config)
                .unwrap();

        let data = SmokeData {
            pos: Vec2::new(10.0, 0.0),
            rad: 6.0,
            full: None,
        };
        e.update(&data, &mut pool).unwrap();

        let p = pool.get(e.particle()).unwrap();
        assert_eq!(p.pos_target, Vec2::new(10.0, 0.0));
        assert_eq!(p.rad_target, 6.0);
        // Current state is not snapped
        assert_eq!(p.pos, Vec2::ZERO);
        assert_eq!(p.rad, 5.0);
        // Layer untouched without a full update
        assert_eq!(p.layer, Layer(1));
        assert_eq!(e.layer(), Layer(1));
    }

    #[test]
    fn full_update_overwrites_layer_and_interior() {
        let (mut pool, mut rng, config) = setup();
        let mut e =
            SmokeEntity::create(ObjectId(1), Vec2::ZERO, 5.0, GROUND, &mut pool, &mut rng, &config)
                .unwrap();

        let data = SmokeData {
            pos: Vec2::ZERO,
            rad: 5.0,
            full: Some(SmokeFullData {
                layer: Layer(0),
                interior: true,
            }),
        };
        e.update(&data, &mut pool).unwrap();

        let p = pool.get(e.particle()).unwrap();
        assert_eq!(p.layer, Layer(0));
        assert!(p.interior);
        assert!(e.interior());
    }

    #[test]
    fn destroy_starts_fade_but_keeps_particle_active() {
        let (mut pool, mut rng, config) = setup();
        let e =
            SmokeEntity::create(ObjectId(9), Vec2::ZERO, 5.0, GROUND, &mut pool, &mut rng, &config)
                .unwrap();
        let handle = e.particle();

        e.destroy(&mut pool).unwrap();
        let p = pool.get(handle).unwrap();
        assert!(p.fading);
        assert!(p.active);
    }
}
