//=========================================================================
// Space Blocks
//=========================================================================
//
// Drifting debris obstacles scattered across the world at level start.
// They damage the ship on contact and die to a single shot.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::Vec2;
use crate::core::services::TextureId;

use super::components::{Physics, Sprite};
use super::{Entity, EntityState};

/// A drifting obstacle owned by the block manager.
pub struct SpaceBlock {
    pub entity: Entity,
}

impl SpaceBlock {
    pub fn new(data: &GameData, position: Vec2, velocity: Vec2) -> Self {
        let size = data
            .renderer
            .texture_size(TextureId::Block)
            .scaled(data.screen_scale);

        let mut state = EntityState::new(position, size);
        state.velocity = velocity;

        let entity = Entity::new(state)
            .with_physics(Physics)
            .with_graphics(Sprite::new(TextureId::Block));

        Self { entity }
    }
}
