//=========================================================================
// Enemy Manager
//=========================================================================
//
// Owns enemy craft, spawns them from the level's declarative zones,
// and drives fighter fire at the player.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::enemy::{Enemy, EnemyKind};
use crate::core::entity::projectile::{TargetCandidate, TargetKind, TargetRef};
use crate::core::level::SpawnZone;
use crate::core::math::{Rect, Vec2};

use super::{EntityId, Pool, Pooled, ProjectileManager};

//=== Constants ===========================================================

// Fighter fire cadence: a fixed recovery plus a random stagger so a
// zone's worth of fighters doesn't volley in lockstep.
const FIRE_COOLDOWN: u32 = 90;
const FIRE_JITTER: u32 = 90;

impl Pooled for Enemy {
    fn entity(&self) -> &crate::core::entity::Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut crate::core::entity::Entity {
        &mut self.entity
    }
}

//=== EnemyManager ========================================================

pub struct EnemyManager {
    pool: Pool<Enemy>,
}

impl EnemyManager {
    pub fn new() -> Self {
        Self { pool: Pool::new() }
    }

    //--- Spawning ---------------------------------------------------------

    /// Populates one spawn zone: random placements for a group, the
    /// zone center for a lone enemy.
    pub fn spawn_zone(&mut self, data: &mut GameData, zone: &SpawnZone, kind: EnemyKind) {
        debug!("spawning {} {:?} in zone {:?}", zone.count, kind, zone.area);

        if zone.count > 1 {
            for _ in 0..zone.count {
                let position = random_point_in(data, &zone.area);
                self.spawn_at(data, kind, position);
            }
        } else {
            self.spawn_at(data, kind, zone.center());
        }
    }

    fn spawn_at(&mut self, data: &mut GameData, kind: EnemyKind, position: Vec2) {
        let cooldown = FIRE_COOLDOWN + data.rng.gen_range(0..FIRE_JITTER);

        self.pool
            .spawn_with(|| Enemy::new(data, kind, position, cooldown));
    }

    //--- Frame Processing -------------------------------------------------

    /// Moves every enemy and lets on-screen fighters shoot at the ship.
    pub fn update(
        &mut self,
        data: &mut GameData,
        projectiles: &mut ProjectileManager,
        ship_center: Option<Vec2>,
    ) {
        let visible = data.on_screen_world();

        for enemy in self.pool.iter_mut() {
            if !enemy.entity.state.alive {
                continue;
            }

            if enemy.kind == EnemyKind::Fighter {
                if enemy.fire_cooldown > 0 {
                    enemy.fire_cooldown -= 1;
                } else if let Some(target) = ship_center {
                    if visible.intersects(&enemy.entity.state.rect()) {
                        let muzzle = enemy.entity.state.center();
                        let heading = (target - muzzle).normalized();

                        if heading != Vec2::ZERO {
                            projectiles
                                .fire_laser_directed(data, muzzle.x, muzzle.y, heading, true);
                        }

                        enemy.fire_cooldown = FIRE_COOLDOWN + data.rng.gen_range(0..FIRE_JITTER);
                    }
                }
            }

            enemy.entity.update(data);
        }

        self.pool.compact();
    }

    pub fn draw(&mut self, data: &mut GameData) {
        self.pool.draw_all(data);
    }

    //--- Queries ----------------------------------------------------------

    /// Live enemies currently intersecting the visible rectangle, as
    /// homing-target candidates.
    pub fn visible_targets(&self, data: &GameData) -> Vec<TargetCandidate> {
        let visible = data.on_screen_world();

        self.pool
            .live()
            .filter(|(_, e)| visible.intersects(&e.entity.state.rect()))
            .map(|(id, e)| TargetCandidate {
                target: TargetRef {
                    kind: TargetKind::Enemy,
                    id,
                },
                center: e.entity.state.center(),
            })
            .collect()
    }

    /// Live enemies whose bounds overlap `rect`.
    pub fn collisions(&self, rect: &Rect) -> Vec<EntityId> {
        self.pool
            .live()
            .filter(|(_, e)| e.entity.state.rect().intersects(rect))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn get_live(&self, id: EntityId) -> Option<&Enemy> {
        self.pool.get_live(id)
    }

    pub fn get_live_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.pool.get_live_mut(id)
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

impl Default for EnemyManager {
    fn default() -> Self {
        Self::new()
    }
}

//--- Helpers --------------------------------------------------------------

fn random_point_in(data: &mut GameData, area: &Rect) -> Vec2 {
    let x = if area.w > 0.0 {
        data.rng.gen_range(area.x..area.right())
    } else {
        area.x
    };
    let y = if area.h > 0.0 {
        data.rng.gen_range(area.y..area.bottom())
    } else {
        area.y
    };

    Vec2::new(x, y)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::test_data;

    #[test]
    fn group_zone_spawns_count_inside_area() {
        let mut data = test_data();
        let mut enemies = EnemyManager::new();
        let zone = SpawnZone::new(5, Rect::new(100.0, 200.0, 300.0, 300.0));

        enemies.spawn_zone(&mut data, &zone, EnemyKind::Fighter);

        assert_eq!(enemies.live_count(), 5);
        for (_, enemy) in enemies.pool.live() {
            let p = enemy.entity.state.position;
            assert!(p.x >= zone.area.x && p.x < zone.area.right());
            assert!(p.y >= zone.area.y && p.y < zone.area.bottom());
        }
    }

    #[test]
    fn lone_zone_spawns_at_center() {
        let mut data = test_data();
        let mut enemies = EnemyManager::new();
        let zone = SpawnZone::new(1, Rect::new(100.0, 200.0, 40.0, 40.0));

        enemies.spawn_zone(&mut data, &zone, EnemyKind::Freighter);

        assert_eq!(enemies.live_count(), 1);
        let (_, enemy) = enemies.pool.live().next().expect("one enemy spawned");
        assert_eq!(enemy.entity.state.position, zone.center());
    }

    #[test]
    fn enemies_face_down_world() {
        let mut data = test_data();
        let mut enemies = EnemyManager::new();
        let zone = SpawnZone::new(1, Rect::new(0.0, 0.0, 10.0, 10.0));

        enemies.spawn_zone(&mut data, &zone, EnemyKind::Fighter);

        let (_, enemy) = enemies.pool.live().next().expect("one enemy spawned");
        assert!((enemy.entity.state.rotation - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn visible_targets_excludes_offscreen_enemies() {
        let mut data = test_data();
        let mut enemies = EnemyManager::new();

        // One inside the viewport, one far outside it.
        let on = data.on_screen_world().center();
        enemies.spawn_zone(&mut data, &SpawnZone::new(1, Rect::new(on.x, on.y, 0.0, 0.0)), EnemyKind::Fighter);
        enemies.spawn_zone(
            &mut data,
            &SpawnZone::new(1, Rect::new(0.0, 3000.0, 0.0, 0.0)),
            EnemyKind::Fighter,
        );

        assert_eq!(enemies.live_count(), 2);
        assert_eq!(enemies.visible_targets(&data).len(), 1);
    }

    #[test]
    fn onscreen_fighter_fires_enemy_laser_after_cooldown() {
        let mut data = test_data();
        let mut enemies = EnemyManager::new();
        let mut projectiles = ProjectileManager::new();

        let on = data.on_screen_world().center();
        enemies.spawn_zone(&mut data, &SpawnZone::new(1, Rect::new(on.x, on.y, 0.0, 0.0)), EnemyKind::Fighter);

        // Freeze drift so the fighter stays visible while we wait out
        // the cooldown.
        for enemy in enemies.pool.iter_mut() {
            enemy.entity.state.velocity = Vec2::ZERO;
        }

        let ship = Some(Vec2::new(on.x, on.y + 200.0));
        for _ in 0..(FIRE_COOLDOWN + FIRE_JITTER + 1) {
            enemies.update(&mut data, &mut projectiles, ship);
        }

        assert!(
            !projectiles.enemy_projectiles().is_empty(),
            "fighter should have fired at the ship"
        );
        assert!(projectiles.player_projectiles().is_empty());
    }
}
