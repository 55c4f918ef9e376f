//=========================================================================
// End-of-Level State
//=========================================================================
//
// Shown when the ship reaches the level marker on a non-final level.
// Fire advances to the next level; if loading it fails the game falls
// back to the menu instead of wedging.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::managers::Managers;
use crate::core::math::Vec2;
use crate::core::services::{GameKey, Tint};

use super::{GameState, StateKey};

pub struct EndOfLevelState;

impl EndOfLevelState {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EndOfLevelState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for EndOfLevelState {
    fn update(&mut self, data: &mut GameData, _managers: &mut Managers) {
        if data.keys.is_pressed(GameKey::Fire) {
            let next = data.level.number + 1;

            if data.load_level(next) {
                data.request_state(StateKey::InPlay);
            } else {
                warn!("no level {} to advance to; returning to menu", next);
                data.request_state(StateKey::Menu);
            }
        }
    }

    fn draw(&mut self, data: &mut GameData, _managers: &mut Managers) {
        let center_x = data.resolution.w / 2.0;
        let center_y = data.resolution.h / 2.0;
        let score = format!("SCORE: {}", data.round.score);

        data.renderer.draw_text(
            "LEVEL COMPLETE",
            Vec2::new(center_x - 130.0, center_y - 60.0),
            Tint::WHITE,
        );
        data.renderer
            .draw_text(&score, Vec2::new(center_x - 70.0, center_y), Tint::WHITE);
        data.renderer.draw_text(
            "PRESS FIRE TO CONTINUE",
            Vec2::new(center_x - 110.0, center_y + 60.0),
            Tint::WHITE,
        );
    }
}
