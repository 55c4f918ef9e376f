//=========================================================================
// Collision Manager
//=========================================================================
//
// Resolves every cross-manager intersection for the frame:
//
//   player shots  vs  enemies / blocks / enemy mines
//   enemy shots   vs  ship
//   ship contact  vs  enemies / blocks / enemy mines
//   ship contact  vs  pickups
//
// Runs after projectiles, blocks, and explosions have moved but before
// the player and enemy managers read the damage it applies. The ship
// takes no damage while its spawn protection is active.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::pickup::PickupKind;
use crate::core::math::Rect;
use crate::core::services::SoundCue;
use crate::core::weapons::{BluelaserWeapon, MissileWeapon, SampleWeapon};

use super::{
    BlockManager, EnemyManager, EnemyMineManager, ExplosionManager, PickUpManager, PlayerManager,
    ProjectileManager,
};

//=== CollisionManager ====================================================

pub struct CollisionManager;

impl CollisionManager {
    pub fn new() -> Self {
        Self
    }

    /// Resolves all intersections for this frame.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        data: &mut GameData,
        players: &mut PlayerManager,
        projectiles: &mut ProjectileManager,
        enemies: &mut EnemyManager,
        blocks: &mut BlockManager,
        pickups: &mut PickUpManager,
        mines: &mut EnemyMineManager,
        explosions: &mut ExplosionManager,
    ) {
        self.player_shots(data, players, projectiles, enemies, blocks, mines, explosions);
        self.enemy_shots(data, players, projectiles);
        self.ship_contact(data, players, enemies, blocks, mines, explosions);
        self.ship_pickups(data, players, pickups);
    }

    //--- Player shots -----------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    fn player_shots(
        &mut self,
        data: &mut GameData,
        players: &mut PlayerManager,
        projectiles: &mut ProjectileManager,
        enemies: &mut EnemyManager,
        blocks: &mut BlockManager,
        mines: &mut EnemyMineManager,
        explosions: &mut ExplosionManager,
    ) {
        for id in projectiles.player_projectiles() {
            let Some(projectile) = projectiles.get_live(id) else {
                continue;
            };

            let shot = projectile.entity.state.rect();
            let damage = projectile.damage;
            // A zero-damage marker is a laid mine: it detonates on
            // enemy contact and destroys the target outright.
            let is_mine_marker = damage == 0;
            let mut hit = false;

            for enemy_id in enemies.collisions(&shot) {
                let Some(enemy) = enemies.get_live_mut(enemy_id) else {
                    continue;
                };

                if is_mine_marker {
                    enemy.entity.state.health = 0;
                } else {
                    enemy.entity.state.health -= damage;
                }
                hit = true;

                if enemy.entity.state.health <= 0 {
                    enemy.entity.state.alive = false;
                    let center = enemy.entity.state.center();
                    explosions.add(data, center);
                    players.scored(data);
                }
            }

            for block_id in blocks.collisions(&shot) {
                let Some(block) = blocks.get_live_mut(block_id) else {
                    continue;
                };

                if is_mine_marker {
                    continue;
                }

                block.entity.state.health -= damage;
                hit = true;

                if block.entity.state.health <= 0 {
                    block.entity.state.alive = false;
                    let center = block.entity.state.center();
                    explosions.add(data, center);
                }
            }

            for mine_id in mines.collisions(&shot) {
                if is_mine_marker {
                    continue;
                }

                if let Some(mine) = mines.get_live_mut(mine_id) {
                    mine.entity.state.alive = false;
                    let center = mine.entity.state.center();
                    explosions.add(data, center);
                    hit = true;
                }
            }

            if hit {
                if let Some(projectile) = projectiles.get_live_mut(id) {
                    projectile.entity.state.alive = false;
                }
            }
        }
    }

    //--- Enemy shots ------------------------------------------------------

    fn enemy_shots(
        &mut self,
        data: &mut GameData,
        players: &mut PlayerManager,
        projectiles: &mut ProjectileManager,
    ) {
        let Some(ship_rect) = vulnerable_ship_rect(players) else {
            return;
        };

        for id in projectiles.enemy_projectiles() {
            let Some(projectile) = projectiles.get_live(id) else {
                continue;
            };

            if !projectile.entity.state.rect().intersects(&ship_rect) {
                continue;
            }

            if let Some(projectile) = projectiles.get_live_mut(id) {
                projectile.entity.state.alive = false;
            }
            players.ship_hit(data);

            if !players.is_alive() {
                break;
            }
        }
    }

    //--- Ship contact -----------------------------------------------------

    fn ship_contact(
        &mut self,
        data: &mut GameData,
        players: &mut PlayerManager,
        enemies: &mut EnemyManager,
        blocks: &mut BlockManager,
        mines: &mut EnemyMineManager,
        explosions: &mut ExplosionManager,
    ) {
        let Some(ship_rect) = vulnerable_ship_rect(players) else {
            return;
        };

        for enemy_id in enemies.collisions(&ship_rect) {
            if let Some(enemy) = enemies.get_live_mut(enemy_id) {
                enemy.entity.state.alive = false;
                let center = enemy.entity.state.center();
                explosions.add(data, center);
            }
            players.ship_hit(data);
            if !players.is_alive() {
                return;
            }
        }

        for block_id in blocks.collisions(&ship_rect) {
            if let Some(block) = blocks.get_live_mut(block_id) {
                block.entity.state.alive = false;
                let center = block.entity.state.center();
                explosions.add(data, center);
            }
            players.ship_hit(data);
            if !players.is_alive() {
                return;
            }
        }

        for mine_id in mines.collisions(&ship_rect) {
            if let Some(mine) = mines.get_live_mut(mine_id) {
                mine.entity.state.alive = false;
                let center = mine.entity.state.center();
                explosions.add(data, center);
            }
            players.ship_hit(data);
            if !players.is_alive() {
                return;
            }
        }
    }

    //--- Pickups ----------------------------------------------------------

    fn ship_pickups(
        &mut self,
        data: &mut GameData,
        players: &mut PlayerManager,
        pickups: &mut PickUpManager,
    ) {
        // Pickups are collectible even under spawn protection.
        let Some(ship_rect) = players
            .ship()
            .filter(|ship| ship.entity.state.alive)
            .map(|ship| ship.entity.state.rect())
        else {
            return;
        };

        for id in pickups.collisions(&ship_rect) {
            let Some(kind) = pickups.get_live(id).map(|pickup| pickup.kind) else {
                continue;
            };

            let consumed = match kind {
                PickupKind::ExtraLife => {
                    data.round.lives += 1;
                    true
                }
                PickupKind::Health => players.heal_if_damaged(),
                PickupKind::MissileWeapon => {
                    players.set_weapon(Box::new(MissileWeapon::new()));
                    true
                }
                PickupKind::SampleWeapon => {
                    players.set_weapon(Box::new(SampleWeapon::new()));
                    true
                }
                PickupKind::BluelaserWeapon => {
                    players.set_weapon(Box::new(BluelaserWeapon::new()));
                    true
                }
            };

            if consumed {
                if let Some(pickup) = pickups.get_live_mut(id) {
                    pickup.entity.state.alive = false;
                }
                data.audio.play_sound(SoundCue::Pickup);
            }
        }
    }
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new()
    }
}

//--- Helpers --------------------------------------------------------------

// The ship's bounds, only while it is alive and not spawn-protected.
fn vulnerable_ship_rect(players: &PlayerManager) -> Option<Rect> {
    players
        .ship()
        .filter(|ship| ship.entity.state.alive && !ship.is_invulnerable())
        .map(|ship| ship.entity.state.rect())
}

//=========================================================================
// Unit Tests
//=========================================================================
