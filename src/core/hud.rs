//=========================================================================
// HUD
//=========================================================================
//
// Composes the in-play overlay: score and lives readouts plus a health
// bar. Text rasterization itself belongs to the render service.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::managers::PlayerManager;
use crate::core::math::{Rect, Vec2};
use crate::core::services::Tint;

//=== Constants ===========================================================

const HEALTH_BAR_WIDTH: f32 = 150.0;
const HEALTH_BAR_HEIGHT: f32 = 12.0;

//=== Hud =================================================================

#[derive(Debug, Default)]
pub struct Hud;

impl Hud {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, data: &mut GameData, players: &PlayerManager) {
        let score = format!("SCORE {:06}", data.round.score);
        let lives = format!("LIVES {}", data.round.lives);

        data.renderer
            .draw_text(&score, Vec2::new(10.0, 10.0), Tint::WHITE);
        data.renderer
            .draw_text(&lives, Vec2::new(10.0, 28.0), Tint::WHITE);

        // Health bar along the bottom edge: dim backdrop, filled
        // portion proportional to remaining health.
        let backdrop = Rect::new(
            10.0,
            data.resolution.h - HEALTH_BAR_HEIGHT - 10.0,
            HEALTH_BAR_WIDTH,
            HEALTH_BAR_HEIGHT,
        );
        let fraction = players.health_fraction();
        let fill = Rect::new(
            backdrop.x,
            backdrop.y,
            backdrop.w * fraction,
            backdrop.h,
        );

        let fill_tint = if fraction > 0.3 {
            Tint::WHITE
        } else {
            Tint::RED
        };

        data.renderer
            .draw_filled_region(backdrop, Tint::WHITE.with_alpha(0.25));
        data.renderer.draw_filled_region(fill, fill_tint);
    }
}
