//=========================================================================
// Block Manager
//=========================================================================
//
// Owns the drifting space blocks scattered across the world at level
// start.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::block::SpaceBlock;
use crate::core::entity::projectile::{TargetCandidate, TargetKind, TargetRef};
use crate::core::math::{Rect, Vec2};

use super::{EntityId, Pool, Pooled};

impl Pooled for SpaceBlock {
    fn entity(&self) -> &crate::core::entity::Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut crate::core::entity::Entity {
        &mut self.entity
    }
}

//=== BlockManager ========================================================

pub struct BlockManager {
    pool: Pool<SpaceBlock>,
}

impl BlockManager {
    pub fn new() -> Self {
        Self { pool: Pool::new() }
    }

    //--- Spawning ---------------------------------------------------------

    /// Scatters blocks across the world with slow random drift.
    pub fn spawn_blocks(&mut self, data: &mut GameData, count: u32) {
        for _ in 0..count {
            let position = Vec2::new(
                data.rng.gen_range(0.0..data.world.w),
                data.rng.gen_range(0.0..data.world.h),
            );
            let velocity = Vec2::new(
                data.rng.gen_range(-1.0..1.0),
                data.rng.gen_range(-1.0..1.0),
            );

            self.pool
                .spawn_with(|| SpaceBlock::new(data, position, velocity));
        }
    }

    //--- Frame Processing -------------------------------------------------

    pub fn update(&mut self, data: &mut GameData) {
        self.pool.update_all(data);
        self.pool.compact();
    }

    pub fn draw(&mut self, data: &mut GameData) {
        self.pool.draw_all(data);
    }

    //--- Queries ----------------------------------------------------------

    /// Live blocks currently intersecting the visible rectangle, as
    /// homing-target candidates.
    pub fn visible_targets(&self, data: &GameData) -> Vec<TargetCandidate> {
        let visible = data.on_screen_world();

        self.pool
            .live()
            .filter(|(_, b)| visible.intersects(&b.entity.state.rect()))
            .map(|(id, b)| TargetCandidate {
                target: TargetRef {
                    kind: TargetKind::Block,
                    id,
                },
                center: b.entity.state.center(),
            })
            .collect()
    }

    /// Live blocks whose bounds overlap `rect`.
    pub fn collisions(&self, rect: &Rect) -> Vec<EntityId> {
        self.pool
            .live()
            .filter(|(_, b)| b.entity.state.rect().intersects(rect))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn get_live(&self, id: EntityId) -> Option<&SpaceBlock> {
        self.pool.get_live(id)
    }

    pub fn get_live_mut(&mut self, id: EntityId) -> Option<&mut SpaceBlock> {
        self.pool.get_live_mut(id)
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

impl Default for BlockManager {
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
    fn blocks_spawn_inside_world_bounds() {
        let mut data = test_data();
        let mut blocks = BlockManager::new();

        blocks.spawn_blocks(&mut data, 20);

        assert_eq!(blocks.live_count(), 20);
        for (_, block) in blocks.pool.live() {
            let p = block.entity.state.position;
            assert!(p.x >= 0.0 && p.x < data.world.w);
            assert!(p.y >= 0.0 && p.y < data.world.h);
        }
    }

    #[test]
    fn clear_then_respawn_reuses_storage() {
        let mut data = test_data();
        let mut blocks = BlockManager::new();

        blocks.spawn_blocks(&mut data, 5);
        blocks.clear();
        assert_eq!(blocks.live_count(), 0);

        blocks.spawn_blocks(&mut data, 5);
        assert_eq!(blocks.live_count(), 5);
    }
}
