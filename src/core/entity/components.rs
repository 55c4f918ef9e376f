//=========================================================================
// Behavior Components
//=========================================================================
//
// The stock behavior strategies entities are assembled from:
//
// - Physics:       truncating Euler integration of velocity
// - Sprite:        draws a whole texture over the entity's rectangle
// - IndexedSprite: draws one cell of a horizontal texture atlas
// - ShipInput:     maps the sampled key state onto ship motion
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::{Rect, Vec2};
use crate::core::services::{GameKey, TextureId};

use super::ship::{FRAME_AT_REST, FRAME_LEFT, FRAME_RIGHT, MAX_VELOCITY};
use super::{EntityState, GraphicsComponent, InputComponent, PhysicsComponent};

//=== Physics =============================================================

/// Integrates velocity into position with a simple Euler step.
///
/// Each axis advances by the velocity truncated toward zero, so
/// fractional velocities below 1.0 produce no motion until they
/// accumulate past a whole unit elsewhere.
#[derive(Debug, Default)]
pub struct Physics;

impl PhysicsComponent for Physics {
    fn update(&mut self, _data: &mut GameData, ent: &mut EntityState) {
        ent.position.x += ent.velocity.x.trunc();
        ent.position.y += ent.velocity.y.trunc();
    }
}

//=== Sprite ==============================================================

/// Draws the entire texture scaled to the entity's rectangle.
#[derive(Debug)]
pub struct Sprite {
    texture: TextureId,
}

impl Sprite {
    pub fn new(texture: TextureId) -> Self {
        Self { texture }
    }
}

impl GraphicsComponent for Sprite {
    fn draw(&mut self, data: &mut GameData, ent: &EntityState) {
        let tex = data.renderer.texture_size(self.texture);
        let src = Rect::new(0.0, 0.0, tex.x, tex.y);

        draw_region(data, self.texture, src, ent);
    }
}

//=== IndexedSprite =======================================================

/// Draws one cell of a horizontal texture atlas.
///
/// The entity's `frame` field selects the visible cell; the ship sets
/// it while turning and the explosion animation advances it over time.
#[derive(Debug)]
pub struct IndexedSprite {
    texture: TextureId,
    frame_width: f32,
    frame_height: f32,
}

impl IndexedSprite {
    pub fn new(texture: TextureId, frame_width: f32, frame_height: f32) -> Self {
        Self {
            texture,
            frame_width,
            frame_height,
        }
    }
}

impl GraphicsComponent for IndexedSprite {
    fn draw(&mut self, data: &mut GameData, ent: &EntityState) {
        let src = Rect::new(
            self.frame_width * ent.frame as f32,
            0.0,
            self.frame_width,
            self.frame_height,
        );

        draw_region(data, self.texture, src, ent);
    }
}

//--- Shared draw path ----------------------------------------------------
//
// Draws the region centered on the entity's rectangle, offset by the
// camera, so rotation pivots around the sprite center rather than the
// top-left corner.
//
fn draw_region(data: &mut GameData, texture: TextureId, src: Rect, ent: &EntityState) {
    let rect = ent.rect();
    let origin = Vec2::new(rect.w / 2.0, rect.h / 2.0);
    let position = ent.position + origin - data.camera;
    let scale = data.screen_scale;
    let size = Vec2::new(rect.w, rect.h);

    data.renderer
        .draw_sprite_region(texture, src, position, origin, size, scale, ent.rotation, ent.tint);
}

//=== ShipInput ===========================================================

/// Maps the frame's key state onto ship motion and the fire trigger.
///
/// Turning keys pick the turn frame while held and restore the at-rest
/// frame on release. The fire key is edge-triggered: it must be
/// released before another shot is requested.
#[derive(Debug, Default)]
pub struct ShipInput {
    fire_requested: bool,
}

impl ShipInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the pending fire request, if any.
    pub fn take_fire_request(&mut self) -> bool {
        std::mem::take(&mut self.fire_requested)
    }
}

impl InputComponent for ShipInput {
    fn update(&mut self, data: &mut GameData, ent: &mut EntityState) {
        let keys = &data.keys;

        if keys.is_down(GameKey::Forward) {
            ent.frame = FRAME_AT_REST;
            nudge(ent, Vec2::new(0.0, -1.0));
        }

        if keys.is_released(GameKey::Left) || keys.is_released(GameKey::Right) {
            ent.frame = FRAME_AT_REST;
        }

        if keys.is_down(GameKey::Left) {
            ent.frame = FRAME_LEFT;
            nudge(ent, Vec2::new(-1.0, 0.0));
        }

        if keys.is_down(GameKey::Right) {
            ent.frame = FRAME_RIGHT;
            nudge(ent, Vec2::new(1.0, 0.0));
        }

        if keys.is_down(GameKey::Backward) {
            ent.frame = FRAME_AT_REST;
            nudge(ent, Vec2::new(0.0, 1.0));
        }

        if keys.is_pressed(GameKey::Fire) {
            self.fire_requested = true;
        }
    }
}

// Accumulates thrust, clamped per axis.
fn nudge(ent: &mut EntityState, delta: Vec2) {
    ent.velocity.x = (ent.velocity.x + delta.x).clamp(-MAX_VELOCITY, MAX_VELOCITY);
    ent.velocity.y = (ent.velocity.y + delta.y).clamp(-MAX_VELOCITY, MAX_VELOCITY);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{test_data, test_data_with_keys, PressedKeys};

    #[test]
    fn physics_truncates_toward_zero() {
        let mut data = test_data();
        let mut ent = EntityState::new(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0));
        ent.velocity = Vec2::new(2.9, -1.7);

        Physics.update(&mut data, &mut ent);

        assert_eq!(ent.position, Vec2::new(102.0, 99.0));
    }

    #[test]
    fn physics_sub_unit_velocity_is_no_motion() {
        let mut data = test_data();
        let mut ent = EntityState::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        ent.velocity = Vec2::new(0.9, -0.9);

        Physics.update(&mut data, &mut ent);

        assert_eq!(ent.position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn fire_is_edge_triggered() {
        let mut data = test_data_with_keys(PressedKeys::held(&[GameKey::Fire]));
        let mut input = ShipInput::new();
        let mut ent = EntityState::new(Vec2::ZERO, Vec2::new(10.0, 10.0));

        // Frame 1: press produces one request
        data.poll_input();
        input.update(&mut data, &mut ent);
        assert!(input.take_fire_request());

        // Frame 2: still held, no new request
        data.poll_input();
        input.update(&mut data, &mut ent);
        assert!(!input.take_fire_request());
    }

    #[test]
    fn turn_release_restores_at_rest_frame() {
        let pressed = PressedKeys::held(&[GameKey::Left]);
        let shared = pressed.keys.clone();
        let mut data = test_data_with_keys(pressed);
        let mut input = ShipInput::new();
        let mut ent = EntityState::new(Vec2::ZERO, Vec2::new(10.0, 10.0));

        data.poll_input();
        input.update(&mut data, &mut ent);
        assert_eq!(ent.frame, FRAME_LEFT);

        shared.borrow_mut().clear();
        data.poll_input();
        input.update(&mut data, &mut ent);
        assert_eq!(ent.frame, FRAME_AT_REST);
    }

    #[test]
    fn thrust_clamps_at_max_velocity() {
        let mut data = test_data_with_keys(PressedKeys::held(&[GameKey::Right]));
        let mut input = ShipInput::new();
        let mut ent = EntityState::new(Vec2::ZERO, Vec2::new(10.0, 10.0));

        for _ in 0..50 {
            data.poll_input();
            input.update(&mut data, &mut ent);
        }

        assert_eq!(ent.velocity.x, MAX_VELOCITY);
    }
}
