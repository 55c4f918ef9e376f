//=========================================================================
// Player Ship
//=========================================================================
//
// The player's ship: an entity with an explicit state machine and the
// currently equipped weapon.
//
// States flow Spawning → Flying → Dying. Firing is a capability of the
// ship (weapon + edge-triggered request), not a state. Transitions run
// the exiting hook of the old state and the entering hook of the new
// one back to back within the same frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::Vec2;
use crate::core::services::{SoundCue, TextureId, Tint};
use crate::core::weapons::{LaserWeapon, Weapon};

use super::components::{IndexedSprite, Physics, ShipInput};
use super::{Entity, EntityState, InputComponent};

//=== Constants ===========================================================

// Frames of the ship sheet (left turn, at rest, right turn).
pub const FRAME_LEFT: u32 = 0;
pub const FRAME_AT_REST: u32 = 4;
pub const FRAME_RIGHT: u32 = 7;

/// Per-axis velocity clamp applied while thrusting.
pub const MAX_VELOCITY: f32 = 20.0;

pub const MAX_HEALTH: i32 = 100;

/// Dimensions of one ship-sheet cell.
pub const SHIP_FRAME_WIDTH: f32 = 60.0;
pub const SHIP_FRAME_HEIGHT: f32 = 133.0;

// How long the spawn animation (and its invulnerability) lasts.
const SPAWN_FRAMES: u32 = 100;

//=== Ship State ==========================================================

/// The ship's behavior mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipStateKind {
    /// Materializing after (re)spawn; invulnerable, sprite flickers.
    Spawning,
    /// Normal play.
    Flying,
    /// Health depleted; the player manager decides what happens next.
    Dying,
}

//=== Ship ================================================================

/// The player ship.
pub struct Ship {
    pub entity: Entity,
    pub weapon: Box<dyn Weapon>,
    input: ShipInput,
    state: ShipStateKind,
    spawn_frames_left: u32,
}

impl Ship {
    /// Creates a ship at the given world position, entering the
    /// Spawning state.
    pub fn new(data: &mut GameData, position: Vec2) -> Self {
        let size = Vec2::new(
            SHIP_FRAME_WIDTH * data.screen_scale / 2.0,
            SHIP_FRAME_HEIGHT * data.screen_scale / 2.0,
        );

        let mut state = EntityState::new(position, size);
        state.health = MAX_HEALTH;
        state.frame = FRAME_AT_REST;

        let entity = Entity::new(state).with_physics(Physics).with_graphics(
            IndexedSprite::new(TextureId::ShipSheet, SHIP_FRAME_WIDTH, SHIP_FRAME_HEIGHT),
        );

        let mut ship = Self {
            entity,
            weapon: Box::new(LaserWeapon::new()),
            input: ShipInput::new(),
            state: ShipStateKind::Spawning,
            spawn_frames_left: 0,
        };

        // The initial state's entering hook runs at construction.
        ship.entering(data);
        ship
    }

    //--- State Machine ----------------------------------------------------

    pub fn state(&self) -> ShipStateKind {
        self.state
    }

    /// True while spawn protection is active.
    pub fn is_invulnerable(&self) -> bool {
        self.state == ShipStateKind::Spawning
    }

    /// Switches states, running the old state's exiting hook and the
    /// new state's entering hook within this frame.
    pub fn transition_to(&mut self, data: &mut GameData, next: ShipStateKind) {
        debug!("ship state {:?} -> {:?}", self.state, next);

        self.exiting(data);
        self.state = next;
        self.entering(data);
    }

    fn entering(&mut self, data: &mut GameData) {
        match self.state {
            ShipStateKind::Spawning => {
                self.spawn_frames_left = SPAWN_FRAMES;
            }
            ShipStateKind::Flying => {}
            ShipStateKind::Dying => {
                data.audio.play_sound(SoundCue::PlayerDeath);
            }
        }
    }

    fn exiting(&mut self, _data: &mut GameData) {
        if self.state == ShipStateKind::Spawning {
            self.entity.state.tint = Tint::WHITE;
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Advances the state machine, applies input, and runs the attached
    /// behaviors.
    pub fn update(&mut self, data: &mut GameData) {
        if !self.entity.state.alive {
            return;
        }

        if self.state == ShipStateKind::Spawning {
            // Flicker while materializing
            let dim = (self.spawn_frames_left / 5) % 2 == 0;
            self.entity.state.tint = Tint::WHITE.with_alpha(if dim { 0.4 } else { 0.9 });

            self.spawn_frames_left = self.spawn_frames_left.saturating_sub(1);
            if self.spawn_frames_left == 0 {
                self.transition_to(data, ShipStateKind::Flying);
            }
        }

        self.input.update(data, &mut self.entity.state);
        self.entity.update(data);
    }

    pub fn draw(&mut self, data: &mut GameData) {
        self.entity.draw(data);
    }

    //--- Firing -----------------------------------------------------------

    /// Consumes the edge-triggered fire request raised by input this
    /// frame.
    pub fn take_fire_request(&mut self) -> bool {
        self.input.take_fire_request()
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
    fn new_ship_starts_spawning() {
        let mut data = test_data();
        let ship = Ship::new(&mut data, Vec2::new(100.0, 100.0));

        assert_eq!(ship.state(), ShipStateKind::Spawning);
        assert!(ship.is_invulnerable());
        assert_eq!(ship.entity.state.health, MAX_HEALTH);
    }

    #[test]
    fn spawning_ends_in_flying_after_fixed_duration() {
        let mut data = test_data();
        let mut ship = Ship::new(&mut data, Vec2::new(100.0, 100.0));

        for _ in 0..99 {
            ship.update(&mut data);
            assert_eq!(ship.state(), ShipStateKind::Spawning);
        }

        ship.update(&mut data);
        assert_eq!(ship.state(), ShipStateKind::Flying);
        assert!(!ship.is_invulnerable());
    }

    #[test]
    fn leaving_spawning_restores_tint() {
        let mut data = test_data();
        let mut ship = Ship::new(&mut data, Vec2::new(100.0, 100.0));

        for _ in 0..100 {
            ship.update(&mut data);
        }

        assert_eq!(ship.entity.state.tint, Tint::WHITE);
    }

    #[test]
    fn transition_reenters_spawning() {
        let mut data = test_data();
        let mut ship = Ship::new(&mut data, Vec2::new(100.0, 100.0));

        for _ in 0..100 {
            ship.update(&mut data);
        }
        assert_eq!(ship.state(), ShipStateKind::Flying);

        ship.transition_to(&mut data, ShipStateKind::Spawning);
        assert!(ship.is_invulnerable());

        // Full spawn duration applies again
        for _ in 0..99 {
            ship.update(&mut data);
            assert_eq!(ship.state(), ShipStateKind::Spawning);
        }
        ship.update(&mut data);
        assert_eq!(ship.state(), ShipStateKind::Flying);
    }
}
