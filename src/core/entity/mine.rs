//=========================================================================
// Enemy Mines
//=========================================================================
//
// Stationary hazards placed at fixed points by the level definition.
// They detonate on contact with the ship.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::Vec2;
use crate::core::services::TextureId;

use super::components::Sprite;
use super::{Entity, EntityState};

/// A stationary hazard owned by the mine manager.
pub struct EnemyMine {
    pub entity: Entity,
}

impl EnemyMine {
    pub fn new(data: &GameData, position: Vec2) -> Self {
        let size = data
            .renderer
            .texture_size(TextureId::EnemyMine)
            .scaled(data.screen_scale);

        let entity = Entity::new(EntityState::new(position, size))
            .with_graphics(Sprite::new(TextureId::EnemyMine));

        Self { entity }
    }
}
