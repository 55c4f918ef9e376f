//=========================================================================
// Explosion Manager
//=========================================================================
//
// Owns the transient explosion animations and their sound effect.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::explosion::Explosion;
use crate::core::math::Vec2;
use crate::core::services::SoundCue;

use super::{Pool, Pooled};

impl Pooled for Explosion {
    fn entity(&self) -> &crate::core::entity::Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut crate::core::entity::Entity {
        &mut self.entity
    }
}

//=== ExplosionManager ====================================================

pub struct ExplosionManager {
    pool: Pool<Explosion>,
}

impl ExplosionManager {
    pub fn new() -> Self {
        Self { pool: Pool::new() }
    }

    /// Starts an explosion centered on the given world point.
    pub fn add(&mut self, data: &mut GameData, center: Vec2) {
        data.audio.play_sound(SoundCue::Explosion);
        self.pool.spawn_with(|| Explosion::new(data, center));
    }

    /// Advances every animation; finished explosions die and return to
    /// the pool.
    pub fn update(&mut self, data: &mut GameData) {
        for explosion in self.pool.iter_mut() {
            if !explosion.entity.state.alive {
                continue;
            }

            explosion.advance();
            explosion.entity.update(data);
        }

        self.pool.compact();
    }

    pub fn draw(&mut self, data: &mut GameData) {
        self.pool.draw_all(data);
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

impl Default for ExplosionManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::test_data;

    #[test]
    fn explosions_expire_and_pool_drains() {
        let mut data = test_data();
        let mut explosions = ExplosionManager::new();

        explosions.add(&mut data, Vec2::new(100.0, 100.0));
        explosions.add(&mut data, Vec2::new(200.0, 200.0));
        assert_eq!(explosions.live_count(), 2);

        for _ in 0..60 {
            explosions.update(&mut data);
        }

        assert_eq!(explosions.live_count(), 0);
    }
}
