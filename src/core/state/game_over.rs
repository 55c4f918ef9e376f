//=========================================================================
// Game Over State
//=========================================================================
//
// Shown after the last life is lost. Displays the final score until
// the player presses fire, then returns to the menu.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::managers::Managers;
use crate::core::math::Vec2;
use crate::core::services::{GameKey, Tint};

use super::{GameState, StateKey};

pub struct GameOverState {
    final_score: u32,
}

impl GameOverState {
    pub fn new() -> Self {
        Self { final_score: 0 }
    }
}

impl Default for GameOverState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for GameOverState {
    fn on_enter(&mut self, data: &mut GameData, _managers: &mut Managers) {
        // The round resets on the next play-through, so the score is
        // captured here for display.
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
        let score = format!("SCORE: {}", self.final_score);

        data.renderer.draw_text(
            "GAME OVER",
            Vec2::new(center_x - 90.0, center_y - 60.0),
            Tint::RED,
        );
        data.renderer
            .draw_text(&score, Vec2::new(center_x - 70.0, center_y), Tint::RED);
    }
}
