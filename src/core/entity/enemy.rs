//=========================================================================
// Enemies
//=========================================================================
//
// Fighters ram toward the player and take pot shots; freighters are
// slow, tough targets that drift with the world.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::Vec2;
use crate::core::services::TextureId;

use super::components::{Physics, Sprite};
use super::{Entity, EntityState};

//=== Constants ===========================================================

const FIGHTER_HEALTH: i32 = 9;
const FREIGHTER_HEALTH: i32 = 27;

const FIGHTER_VELOCITY: Vec2 = Vec2::new(0.0, 1.0);

//=== EnemyKind ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Fighter,
    Freighter,
}

impl EnemyKind {
    fn texture(self) -> TextureId {
        match self {
            EnemyKind::Fighter => TextureId::EnemyFighter,
            EnemyKind::Freighter => TextureId::EnemyFreighter,
        }
    }

    fn health(self) -> i32 {
        match self {
            EnemyKind::Fighter => FIGHTER_HEALTH,
            EnemyKind::Freighter => FREIGHTER_HEALTH,
        }
    }
}

//=== Enemy ===============================================================

/// An enemy craft owned by the enemy manager.
pub struct Enemy {
    pub entity: Entity,
    pub kind: EnemyKind,
    /// Frames until this enemy may fire again. Managed by the enemy
    /// manager; only fighters shoot.
    pub fire_cooldown: u32,
}

impl Enemy {
    /// Builds an enemy at a world position, facing down-world toward
    /// the approaching player.
    pub fn new(data: &GameData, kind: EnemyKind, position: Vec2, fire_cooldown: u32) -> Self {
        let size = data
            .renderer
            .texture_size(kind.texture())
            .scaled(data.screen_scale);

        let mut state = EntityState::new(position, size);
        state.health = kind.health();
        state.rotation = std::f32::consts::PI;
        if kind == EnemyKind::Fighter {
            state.velocity = FIGHTER_VELOCITY;
        }

        let entity = Entity::new(state)
            .with_physics(Physics)
            .with_graphics(Sprite::new(kind.texture()));

        Self {
            entity,
            kind,
            fire_cooldown,
        }
    }
}
