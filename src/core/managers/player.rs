//=========================================================================
// Player Manager
//=========================================================================
//
// Single source of truth for the player ship: existence, health,
// scoring, and the equipped weapon.
//
// The ship is constructed on demand by the spawn path, so every other
// operation can assume it exists or degrade quietly: missing-ship
// conditions are defensive defaults here, never errors surfaced to
// callers.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::ship::{Ship, ShipStateKind, MAX_HEALTH};
use crate::core::math::Vec2;
use crate::core::round::STARTING_LIVES;
use crate::core::services::SoundCue;
use crate::core::weapons::{FireContext, LaserWeapon, Weapon};

use super::{BlockManager, EnemyManager, ProjectileManager};

//=== Constants ===========================================================

/// Damage the ship takes per hit.
const HIT_DAMAGE: i32 = 5;

/// Points awarded per kill.
const SCORE_PER_KILL: u32 = 10;

// Faster than the camera autoscroll, so a fresh ship visibly lags the
// scroll instead of despawning off the bottom edge.
const STARTING_VELOCITY: Vec2 = Vec2::new(0.0, -2.0);

//=== PlayerManager =======================================================

pub struct PlayerManager {
    ship: Option<Ship>,
}

impl PlayerManager {
    pub fn new() -> Self {
        Self { ship: None }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_alive(&self) -> bool {
        self.ship
            .as_ref()
            .map(|ship| ship.entity.state.alive)
            .unwrap_or(false)
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        self.ship.as_mut()
    }

    /// Remaining health as a 0..=1 fraction, for the HUD bar.
    pub fn health_fraction(&self) -> f32 {
        self.ship
            .as_ref()
            .map(|ship| (ship.entity.state.health.max(0) as f32) / MAX_HEALTH as f32)
            .unwrap_or(0.0)
    }

    //--- Spawning ---------------------------------------------------------

    /// Puts the ship at the bottom-center of the visible viewport in
    /// the Spawning state, constructing it on first use and reusing the
    /// existing instance afterwards.
    pub fn spawn(&mut self, data: &mut GameData) {
        data.audio.play_sound(SoundCue::PlayerSpawn);

        let start = Vec2::new(
            data.resolution.w / 2.0 + data.camera.x,
            data.resolution.h * 0.05 + data.camera.y,
        );

        if let Some(ship) = self.ship.as_mut() {
            ship.entity.state.position = start;
            ship.entity.state.alive = true;
            ship.transition_to(data, ShipStateKind::Spawning);
        } else {
            self.ship = Some(Ship::new(data, start));
        }

        if let Some(ship) = self.ship.as_mut() {
            ship.entity.state.health = MAX_HEALTH;
            ship.entity.state.velocity = STARTING_VELOCITY;
        }
    }

    //--- Damage & Death ---------------------------------------------------

    /// Applies one hit's worth of damage; depleting health hands
    /// control to [`handle_death`](Self::handle_death).
    pub fn ship_hit(&mut self, data: &mut GameData) {
        let health = {
            let Some(ship) = self.ship.as_mut() else {
                return;
            };
            if !ship.entity.state.alive {
                return;
            }

            ship.entity.state.health -= HIT_DAMAGE;
            ship.entity.state.health
        };

        if health <= 0 {
            self.handle_death(data);
        }
    }

    /// Runs the ship's death path: the Dying state's entering hook,
    /// then either a respawn (a life is spent, health restored) or the
    /// end of the round. The weapon always falls back to the laser.
    pub fn handle_death(&mut self, data: &mut GameData) {
        {
            let Some(ship) = self.ship.as_mut() else {
                warn!("handle_death with no ship spawned");
                return;
            };
            ship.transition_to(data, ShipStateKind::Dying);
        }

        if data.round.lives > 0 {
            data.round.lives -= 1;
            debug!("respawning; {} extra live(s) left", data.round.lives);

            if let Some(ship) = self.ship.as_mut() {
                ship.entity.state.health = MAX_HEALTH;
            }
            self.spawn(data);
        } else if let Some(ship) = self.ship.as_mut() {
            debug!("no lives left; round over");
            ship.entity.state.alive = false;
        }

        self.reset_weapon();
    }

    /// Restores full health if the ship is damaged. Returns whether
    /// anything was healed (a health pickup is only consumed then).
    pub fn heal_if_damaged(&mut self) -> bool {
        match self.ship.as_mut() {
            Some(ship) if ship.entity.state.alive && ship.entity.state.health < MAX_HEALTH => {
                ship.entity.state.health = MAX_HEALTH;
                true
            }
            _ => false,
        }
    }

    //--- Scoring ----------------------------------------------------------

    pub fn scored(&mut self, data: &mut GameData) {
        data.round.score += SCORE_PER_KILL;
    }

    pub fn reset_score(&mut self, data: &mut GameData) {
        data.round.score = 0;
    }

    pub fn reset_lives(&mut self, data: &mut GameData) {
        data.round.lives = STARTING_LIVES;
    }

    //--- Weapons ----------------------------------------------------------

    /// Forces the default laser weapon.
    pub fn reset_weapon(&mut self) {
        self.set_weapon(Box::new(LaserWeapon::new()));
    }

    pub fn set_weapon(&mut self, weapon: Box<dyn Weapon>) {
        match self.ship.as_mut() {
            Some(ship) => {
                debug!("weapon set to {}", weapon.name());
                ship.weapon = weapon;
            }
            None => warn!("weapon change with no ship spawned"),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Updates the ship and fires the equipped weapon if input raised a
    /// request this frame.
    pub fn update(
        &mut self,
        data: &mut GameData,
        projectiles: &mut ProjectileManager,
        enemies: &EnemyManager,
        blocks: &BlockManager,
    ) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        if !ship.entity.state.alive {
            return;
        }

        ship.update(data);

        if ship.take_fire_request() {
            let state = ship.entity.state;
            let mut ctx = FireContext {
                data,
                projectiles,
                enemies,
                blocks,
            };

            ship.weapon.fire(&state, &mut ctx);
        }
    }

    pub fn draw(&mut self, data: &mut GameData) {
        if let Some(ship) = self.ship.as_mut() {
            ship.draw(data);
        }
    }
}

impl Default for PlayerManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
