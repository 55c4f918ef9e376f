//=========================================================================
// Enemy Mine Manager
//=========================================================================
//
// Owns the stationary mines placed at the level's declared points.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::mine::EnemyMine;
use crate::core::math::{Rect, Vec2};

use super::{EntityId, Pool, Pooled};

impl Pooled for EnemyMine {
    fn entity(&self) -> &crate::core::entity::Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut crate::core::entity::Entity {
        &mut self.entity
    }
}

//=== EnemyMineManager ====================================================

pub struct EnemyMineManager {
    pool: Pool<EnemyMine>,
}

impl EnemyMineManager {
    pub fn new() -> Self {
        Self { pool: Pool::new() }
    }

    pub fn spawn_enemy_mine(&mut self, data: &mut GameData, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        self.pool.spawn_with(|| EnemyMine::new(data, position));
    }

    pub fn update(&mut self, data: &mut GameData) {
        self.pool.update_all(data);
        self.pool.compact();
    }

    pub fn draw(&mut self, data: &mut GameData) {
        self.pool.draw_all(data);
    }

    /// Live mines whose bounds overlap `rect`.
    pub fn collisions(&self, rect: &Rect) -> Vec<EntityId> {
        self.pool
            .live()
            .filter(|(_, m)| m.entity.state.rect().intersects(rect))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn get_live_mut(&mut self, id: EntityId) -> Option<&mut EnemyMine> {
        self.pool.get_live_mut(id)
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

impl Default for EnemyMineManager {
    fn default() -> Self {
        Self::new()
    }
}
