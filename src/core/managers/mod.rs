//=========================================================================
// Manager Layer
//=========================================================================
//
// Owners and per-frame drivers of each entity kind.
//
// Architecture:
//   Pool<T>:           homogeneous slot storage with generational ids
//   concrete managers: wrap a Pool and add spawn/query operations
//   Managers:          the full set, borrowed field-by-field by the
//                       active game state each frame
//
// Dead entities stay allocated: a slot is reused by the next spawn,
// bumping its generation so stale ids resolve to nothing instead of a
// recycled entity.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::Entity;

//=== Module Declarations =================================================

mod blocks;
mod collisions;
mod enemies;
mod explosions;
mod mines;
mod pickups;
mod player;
mod projectiles;

//=== Public API ==========================================================

pub use blocks::BlockManager;
pub use collisions::CollisionManager;
pub use enemies::EnemyManager;
pub use explosions::ExplosionManager;
pub use mines::EnemyMineManager;
pub use pickups::PickUpManager;
pub use player::PlayerManager;
pub use projectiles::ProjectileManager;

//=== EntityId ============================================================

/// Stable identity of a pooled entity.
///
/// The generation distinguishes an entity from later occupants of the
/// same slot; resolving a stale id yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

//=== Pooled Trait ========================================================

/// Access to the entity embedded in a pooled game object.
pub trait Pooled {
    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;
}

//=== Pool ================================================================

/// Slot storage for one entity kind.
///
/// Generations are tracked per slot index and survive compaction, so an
/// id handed out before a slot was reused can never alias the new
/// occupant.
pub struct Pool<T> {
    slots: Vec<T>,
    generations: Vec<u32>,
}

impl<T: Pooled> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
        }
    }

    //--- Spawning ---------------------------------------------------------

    /// Places a new entity, reusing the first dead slot if one exists.
    pub fn spawn_with(&mut self, make: impl FnOnce() -> T) -> EntityId {
        if let Some(index) = self
            .slots
            .iter()
            .position(|slot| !slot.entity().state.alive)
        {
            self.generations[index] += 1;
            self.slots[index] = make();

            return EntityId {
                index: index as u32,
                generation: self.generations[index],
            };
        }

        let index = self.slots.len();
        self.slots.push(make());

        // A previously compacted slot keeps its generation history.
        if index < self.generations.len() {
            self.generations[index] += 1;
        } else {
            self.generations.push(0);
        }

        EntityId {
            index: index as u32,
            generation: self.generations[index],
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Resolves an id to the entity it was issued for, if still alive.
    pub fn get_live(&self, id: EntityId) -> Option<&T> {
        let index = id.index as usize;

        self.slots
            .get(index)
            .filter(|_| self.generations[index] == id.generation)
            .filter(|slot| slot.entity().state.alive)
    }

    /// Mutable variant of [`get_live`](Self::get_live).
    pub fn get_live_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let index = id.index as usize;

        if index >= self.slots.len()
            || self.generations[index] != id.generation
            || !self.slots[index].entity().state.alive
        {
            return None;
        }

        Some(&mut self.slots[index])
    }

    //--- Iteration --------------------------------------------------------

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }

    /// Live entities with their ids.
    pub fn live(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.entity().state.alive)
            .map(|(index, slot)| {
                (
                    EntityId {
                        index: index as u32,
                        generation: self.generations[index],
                    },
                    slot,
                )
            })
    }

    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.entity().state.alive)
            .count()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    //--- Frame Processing -------------------------------------------------

    /// Updates every live entity once. Dead entities are skipped by
    /// the entity itself.
    pub fn update_all(&mut self, data: &mut GameData) {
        for slot in &mut self.slots {
            slot.entity_mut().update(data);
        }
    }

    /// Draws every live entity once.
    pub fn draw_all(&mut self, data: &mut GameData) {
        for slot in &mut self.slots {
            slot.entity_mut().draw(data);
        }
    }

    //--- Maintenance ------------------------------------------------------

    /// Drops dead slots from the tail of the storage. Interior dead
    /// slots stay put so live indices never move.
    pub fn compact(&mut self) {
        while self
            .slots
            .last()
            .is_some_and(|slot| !slot.entity().state.alive)
        {
            self.slots.pop();
        }
    }

    /// Kills every entity and releases the storage tail. Generations
    /// are retained so outstanding ids stay invalid.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.entity_mut().state.alive = false;
        }
        self.compact();
    }
}

impl<T: Pooled> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Managers ============================================================

/// The complete manager set for one running game.
///
/// Game states borrow individual fields, keeping cross-manager frame
/// logic free of aliasing.
pub struct Managers {
    pub players: PlayerManager,
    pub projectiles: ProjectileManager,
    pub enemies: EnemyManager,
    pub blocks: BlockManager,
    pub pickups: PickUpManager,
    pub mines: EnemyMineManager,
    pub explosions: ExplosionManager,
    pub collisions: CollisionManager,
}

impl Managers {
    pub fn new() -> Self {
        Self {
            players: PlayerManager::new(),
            projectiles: ProjectileManager::new(),
            enemies: EnemyManager::new(),
            blocks: BlockManager::new(),
            pickups: PickUpManager::new(),
            mines: EnemyMineManager::new(),
            explosions: ExplosionManager::new(),
            collisions: CollisionManager::new(),
        }
    }
}

impl Default for Managers {
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
    use crate::core::entity::EntityState;
    use crate::core::math::Vec2;

    struct Dummy {
        entity: Entity,
    }

    impl Dummy {
        fn new() -> Self {
            Self {
                entity: Entity::new(EntityState::new(Vec2::ZERO, Vec2::new(8.0, 8.0))),
            }
        }
    }

    impl Pooled for Dummy {
        fn entity(&self) -> &Entity {
            &self.entity
        }

        fn entity_mut(&mut self) -> &mut Entity {
            &mut self.entity
        }
    }

    #[test]
    fn spawn_reuses_dead_slot_with_new_generation() {
        let mut pool: Pool<Dummy> = Pool::new();

        let first = pool.spawn_with(Dummy::new);
        let _second = pool.spawn_with(Dummy::new);
        assert_eq!(pool.slot_count(), 2);

        pool.get_live_mut(first)
            .map(|d| d.entity.state.alive = false)
            .expect("first entity should resolve");

        let reused = pool.spawn_with(Dummy::new);
        assert_eq!(pool.slot_count(), 2, "dead slot should be reused");

        assert!(pool.get_live(first).is_none(), "stale id must not resolve");
        assert!(pool.get_live(reused).is_some());
    }

    #[test]
    fn stale_id_stays_invalid_across_compaction() {
        let mut pool: Pool<Dummy> = Pool::new();

        let id = pool.spawn_with(Dummy::new);
        if let Some(d) = pool.get_live_mut(id) {
            d.entity.state.alive = false;
        }
        pool.compact();
        assert_eq!(pool.slot_count(), 0);

        let fresh = pool.spawn_with(Dummy::new);
        assert!(pool.get_live(id).is_none(), "stale id must not alias fresh entity");
        assert!(pool.get_live(fresh).is_some());
    }

    #[test]
    fn compact_only_trims_the_tail() {
        let mut pool: Pool<Dummy> = Pool::new();

        let a = pool.spawn_with(Dummy::new);
        let b = pool.spawn_with(Dummy::new);
        let c = pool.spawn_with(Dummy::new);

        for id in [a, c] {
            if let Some(d) = pool.get_live_mut(id) {
                d.entity.state.alive = false;
            }
        }
        pool.compact();

        // Interior dead slot remains; tail slot dropped.
        assert_eq!(pool.slot_count(), 2);
        assert!(pool.get_live(b).is_some());
    }

    #[test]
    fn clear_invalidates_all_ids() {
        let mut pool: Pool<Dummy> = Pool::new();
        let ids: Vec<_> = (0..4).map(|_| pool.spawn_with(Dummy::new)).collect();

        pool.clear();

        assert_eq!(pool.live_count(), 0);
        for id in ids {
            assert!(pool.get_live(id).is_none());
        }
    }

    #[test]
    fn live_yields_only_living_entities() {
        let mut pool: Pool<Dummy> = Pool::new();
        let a = pool.spawn_with(Dummy::new);
        let _b = pool.spawn_with(Dummy::new);

        if let Some(d) = pool.get_live_mut(a) {
            d.entity.state.alive = false;
        }

        assert_eq!(pool.live().count(), 1);
        assert_eq!(pool.live_count(), 1);
    }
}
