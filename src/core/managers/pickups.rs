//=========================================================================
// Pickup Manager
//=========================================================================
//
// Owns the collectibles scattered across the world at level start.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::pickup::{Pickup, PickupKind};
use crate::core::math::{Rect, Vec2};

use super::{EntityId, Pool, Pooled};

impl Pooled for Pickup {
    fn entity(&self) -> &crate::core::entity::Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut crate::core::entity::Entity {
        &mut self.entity
    }
}

//=== PickUpManager =======================================================

pub struct PickUpManager {
    pool: Pool<Pickup>,
}

impl PickUpManager {
    pub fn new() -> Self {
        Self { pool: Pool::new() }
    }

    //--- Spawning ---------------------------------------------------------

    /// Scatters `count` pickups of one kind across the world.
    pub fn spawn_pickups(&mut self, data: &mut GameData, count: u32, kind: PickupKind) {
        debug!("spawning {} {:?} pickups", count, kind);

        for _ in 0..count {
            let x = data.rng.gen_range(0.0..data.world.w);
            let y = data.rng.gen_range(0.0..data.world.h);

            self.spawn_pickup_at(data, kind, x, y);
        }
    }

    /// Places a single pickup at a fixed world position.
    pub fn spawn_pickup_at(&mut self, data: &mut GameData, kind: PickupKind, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        self.pool.spawn_with(|| Pickup::new(data, kind, position));
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

    /// Live pickups whose bounds overlap `rect`.
    pub fn collisions(&self, rect: &Rect) -> Vec<EntityId> {
        self.pool
            .live()
            .filter(|(_, p)| p.entity.state.rect().intersects(rect))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn get_live(&self, id: EntityId) -> Option<&Pickup> {
        self.pool.get_live(id)
    }

    pub fn get_live_mut(&mut self, id: EntityId) -> Option<&mut Pickup> {
        self.pool.get_live_mut(id)
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// Drops every pickup ahead of a fresh level population.
    pub fn reset(&mut self) {
        self.pool.clear();
    }
}

impl Default for PickUpManager {
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
    fn spawned_pickups_carry_their_kind() {
        let mut data = test_data();
        let mut pickups = PickUpManager::new();

        pickups.spawn_pickups(&mut data, 3, PickupKind::Health);
        pickups.spawn_pickups(&mut data, 2, PickupKind::ExtraLife);

        assert_eq!(pickups.live_count(), 5);

        let health = pickups
            .pool
            .live()
            .filter(|(_, p)| p.kind == PickupKind::Health)
            .count();
        assert_eq!(health, 3);
    }

    #[test]
    fn collisions_reports_overlapping_pickups_only() {
        let mut data = test_data();
        let mut pickups = PickUpManager::new();

        pickups.spawn_pickups(&mut data, 8, PickupKind::Health);

        let (id, pickup) = pickups.pool.live().next().expect("pickups spawned");
        let probe = pickup.entity.state.rect();

        assert!(pickups.collisions(&probe).contains(&id));

        let far = Rect::new(-500.0, -500.0, 1.0, 1.0);
        assert!(pickups.collisions(&far).is_empty());
    }
}
