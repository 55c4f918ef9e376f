//=========================================================================
// End-of-Game State
//=========================================================================
//
// Shown when the last level's marker is reached: the campaign is
// complete. Fire returns to the menu.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::managers::Managers;
use crate::core::math::Vec2;
use crate::core::services::{GameKey, Tint};

use super::{GameState, StateKey};

pub struct EndOfGameState {
    final_score: u32,
}

impl EndOfGameState {
    pub fn new() -> Self {
        Self { final_score: 0 }
    }
}

impl Default for EndOfGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for EndOfGameState {
    fn on_enter(&mut self, data: &mut GameData, _managers: &mut Managers) {
        self.final_score = data.round.score;
    }

    fn update(&mut self, data: &mut GameData, _managers: &mut Managers) {
        if data.keys.is_pressed(GameKey::Fire) {
            data.request_state(StateKey::Menu);
        }
    }

    fn draw(&mut self, data: &mut GameData, _managers: &mut Managers) {
        let center_x = data.resolution.w / 2.0;
        let center_y = data.resolution.h / 2.0;
        let score = format!("FINAL SCORE: {}", self.final_score);

        data.renderer.draw_text(
            "SECTOR CLEARED - YOU WIN",
            Vec2::new(center_x - 160.0, center_y - 60.0),
            Tint::WHITE,
        );
        data.renderer
            .draw_text(&score, Vec2::new(center_x - 90.0, center_y), Tint::WHITE);
    }
}
