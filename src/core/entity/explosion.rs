//=========================================================================
// Explosions
//=========================================================================
//
// Short-lived indexed-sprite animations spawned at impact sites. The
// animation plays through its atlas once, then the entity dies and its
// slot returns to the pool.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::Vec2;
use crate::core::services::TextureId;

use super::components::IndexedSprite;
use super::{Entity, EntityState};

//=== Constants ===========================================================

const FRAME_WIDTH: f32 = 96.0;
const FRAME_HEIGHT: f32 = 96.0;
const FRAME_COUNT: u32 = 12;
const TICKS_PER_FRAME: u32 = 2;

//=== Explosion ===========================================================

/// One playing explosion animation.
pub struct Explosion {
    pub entity: Entity,
    ticks: u32,
}

impl Explosion {
    /// Starts an explosion centered on the given world point.
    pub fn new(data: &GameData, center: Vec2) -> Self {
        let size = Vec2::new(
            FRAME_WIDTH * data.screen_scale,
            FRAME_HEIGHT * data.screen_scale,
        );
        let position = Vec2::new(center.x - size.x / 2.0, center.y - size.y / 2.0);

        let entity = Entity::new(EntityState::new(position, size)).with_graphics(
            IndexedSprite::new(TextureId::ExplosionSheet, FRAME_WIDTH, FRAME_HEIGHT),
        );

        Self { entity, ticks: 0 }
    }

    /// Advances the animation one tick; the entity dies after the last
    /// frame has been shown.
    pub fn advance(&mut self) {
        self.ticks += 1;

        let frame = self.ticks / TICKS_PER_FRAME;
        if frame >= FRAME_COUNT {
            self.entity.state.alive = false;
        } else {
            self.entity.state.frame = frame;
        }
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
    fn animation_plays_through_then_dies() {
        let data = test_data();
        let mut explosion = Explosion::new(&data, Vec2::new(100.0, 100.0));

        let mut frames_seen = 0;
        while explosion.entity.state.alive {
            explosion.advance();
            frames_seen += 1;
            assert!(
                frames_seen <= FRAME_COUNT * TICKS_PER_FRAME + 1,
                "animation never terminated"
            );
        }

        assert!(!explosion.entity.state.alive);
    }

    #[test]
    fn spawn_is_centered_on_impact_point() {
        let data = test_data();
        let explosion = Explosion::new(&data, Vec2::new(100.0, 100.0));

        assert_eq!(explosion.entity.state.center(), Vec2::new(100.0, 100.0));
    }
}
