//=========================================================================
// Menu State
//=========================================================================
//
// The title screen. Waits for the fire key and hands off to gameplay.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::managers::Managers;
use crate::core::math::Vec2;
use crate::core::services::{GameKey, Tint};

use super::{GameState, StateKey};

pub struct MenuState;

impl MenuState {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for MenuState {
    fn update(&mut self, data: &mut GameData, _managers: &mut Managers) {
        if data.keys.is_pressed(GameKey::Fire) {
            data.request_state(StateKey::InPlay);
        }
    }

    fn draw(&mut self, data: &mut GameData, _managers: &mut Managers) {
        let center_x = data.resolution.w / 2.0;
        let center_y = data.resolution.h / 2.0;

        data.renderer.draw_text(
            "NOVASTRIKE",
            Vec2::new(center_x - 100.0, center_y - 60.0),
            Tint::WHITE,
        );
        data.renderer.draw_text(
            "PRESS FIRE TO START",
            Vec2::new(center_x - 95.0, center_y + 20.0),
            Tint::WHITE,
        );
    }
}
