//=========================================================================
// In-Play State
//=========================================================================
//
// The gameplay state: sequences every manager each frame, scrolls the
// camera up the world, and decides the transitions out (end of level,
// end of game, game over).
//
// Manager update order is fixed (projectiles, blocks, explosions,
// collisions, player, enemies, pickups, mines) because later managers
// read state the earlier ones mutate within the same frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::enemy::EnemyKind;
use crate::core::entity::pickup::PickupKind;
use crate::core::entity::EntityState;
use crate::core::hud::Hud;
use crate::core::managers::Managers;
use crate::core::math::{Rect, Vec2};
use crate::core::services::{TextureId, Tint};

use super::{GameState, StateKey};

//=== Constants ===========================================================

/// How fast the camera scrolls up the world per frame.
const SCROLL_SPEED: f32 = 1.5;

/// Velocity multiplier applied when the ship is pushed back on screen.
const VELOCITY_DAMPING: f32 = 0.125;

// Pickup population per level enter.
const EXTRA_LIFE_PICKUPS: u32 = 3;
const SAMPLE_WEAPON_PICKUPS: u32 = 4;
const HEALTH_PICKUPS: u32 = 4;
const BLUELASER_PICKUPS: u32 = 5;
const MISSILE_PICKUPS: u32 = 3;

// Title overlay: fades in over the first two seconds, gone after three.
const TITLE_FADE_FRAMES: u32 = 120;
const TITLE_TOTAL_FRAMES: u32 = 180;

//=== keep_on_screen ======================================================

/// Clamps an entity inside the visible viewport.
///
/// A position beyond an edge snaps to that boundary and the velocity on
/// the violated axis is inverted and damped, giving a bounce-back
/// rather than a hard stop.
pub fn keep_on_screen(data: &GameData, ent: &mut EntityState) {
    let far_right = data.camera.x + data.resolution.w;
    let bottom = data.camera.y + data.resolution.h;
    let half_height = ent.size.y / 2.0;

    let beyond_right = ent.position.x > far_right;
    let beyond_left = ent.position.x < data.camera.x;
    let beyond_bottom = ent.position.y + half_height > bottom;
    let beyond_top = ent.position.y < data.camera.y;

    if beyond_right {
        ent.position.x = far_right - ent.size.x;
    } else if beyond_left {
        ent.position.x = data.camera.x;
    }
    if beyond_right || beyond_left {
        ent.velocity.x *= -VELOCITY_DAMPING;
    }

    if beyond_bottom {
        ent.position.y = bottom - ent.size.y;
    } else if beyond_top {
        ent.position.y = data.camera.y + ent.size.y / 16.0;
    }
    if beyond_bottom || beyond_top {
        ent.velocity.y *= -VELOCITY_DAMPING;
    }
}

//=== InPlayState =========================================================

pub struct InPlayState {
    hud: Hud,
    debris_field: Vec<Rect>,
    end_marker: Rect,
    frames_in_level: u32,
    title_shown: bool,
}

impl InPlayState {
    pub fn new() -> Self {
        Self {
            hud: Hud::new(),
            debris_field: Vec::new(),
            end_marker: Rect::default(),
            frames_in_level: 0,
            title_shown: false,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    // End-of-level marker, in world coordinates.
    fn compute_end_marker(&self, data: &GameData) -> Rect {
        let marker = data.renderer.texture_size(TextureId::LevelEnd);

        Rect::new(
            data.world.w / 2.0 - marker.x / 2.0,
            data.level.height / 8.0,
            marker.x,
            marker.y,
        )
    }

    fn regenerate_debris(&mut self, data: &mut GameData) {
        self.debris_field.clear();

        let particle = data.renderer.texture_size(data.level.debris_particle);
        let min = data.level.debris_min_scale * 10;
        let max = data.level.debris_max_scale * 10;

        for _ in 0..data.level.debris_count {
            let scale = data.rng.gen_range(min..=max) as f32 * 0.01;
            let x = data.rng.gen_range(0.0..data.world.w);
            let y = data.rng.gen_range(0.0..data.world.h);

            self.debris_field
                .push(Rect::new(x, y, particle.x * scale, particle.y * scale));
        }
    }

    fn spawn_level_population(&mut self, data: &mut GameData, managers: &mut Managers) {
        managers.blocks.clear();
        managers.blocks.spawn_blocks(data, data.level.block_count);

        managers.enemies.clear();
        for zone in data.level.fighters.clone() {
            managers.enemies.spawn_zone(data, &zone, EnemyKind::Fighter);
        }
        for zone in data.level.freighters.clone() {
            managers
                .enemies
                .spawn_zone(data, &zone, EnemyKind::Freighter);
        }

        managers.mines.clear();
        for point in data.level.mines.clone() {
            managers.mines.spawn_enemy_mine(data, point.x, point.y);
        }

        managers.pickups.reset();
        managers
            .pickups
            .spawn_pickups(data, EXTRA_LIFE_PICKUPS, PickupKind::ExtraLife);
        managers
            .pickups
            .spawn_pickups(data, SAMPLE_WEAPON_PICKUPS, PickupKind::SampleWeapon);
        managers
            .pickups
            .spawn_pickups(data, HEALTH_PICKUPS, PickupKind::Health);
        managers
            .pickups
            .spawn_pickups(data, BLUELASER_PICKUPS, PickupKind::BluelaserWeapon);
        managers
            .pickups
            .spawn_pickups(data, MISSILE_PICKUPS, PickupKind::MissileWeapon);
    }

    fn draw_background(&self, data: &mut GameData) {
        let background = data.level.background;
        let tex = data.renderer.texture_size(background);
        let dest = Vec2::new(data.resolution.w, data.resolution.h);

        data.renderer.draw_sprite_region(
            background,
            Rect::new(0.0, 0.0, tex.x, tex.y),
            Vec2::ZERO,
            Vec2::ZERO,
            dest,
            1.0,
            0.0,
            Tint::WHITE,
        );
    }

    fn draw_debris(&self, data: &mut GameData) {
        let particle = data.level.debris_particle;
        let tex = data.renderer.texture_size(particle);
        let camera = data.camera;

        for rect in &self.debris_field {
            data.renderer.draw_sprite_region(
                particle,
                Rect::new(0.0, 0.0, tex.x, tex.y),
                Vec2::new(rect.x - camera.x, rect.y - camera.y),
                Vec2::ZERO,
                Vec2::new(rect.w, rect.h),
                1.0,
                0.0,
                Tint::WHITE,
            );
        }
    }

    fn draw_level_markers(&mut self, data: &mut GameData) {
        let marker = self.end_marker;
        let camera = data.camera;

        data.renderer.draw_sprite_region(
            TextureId::LevelEnd,
            Rect::new(0.0, 0.0, marker.w, marker.h),
            Vec2::new(marker.x - camera.x, marker.y - camera.y),
            Vec2::ZERO,
            Vec2::new(marker.w, marker.h),
            1.0,
            0.0,
            Tint::WHITE,
        );

        if !self.title_shown {
            if self.frames_in_level < TITLE_TOTAL_FRAMES {
                let alpha =
                    (self.frames_in_level as f32 / TITLE_FADE_FRAMES as f32).min(1.0);
                let title = data.level.title.clone();
                let at = Vec2::new(
                    data.resolution.w / 2.0 - title.len() as f32 * 10.0,
                    data.resolution.h / 2.0 - 48.0,
                );

                data.renderer
                    .draw_text(&title, at, Tint::WHITE.with_alpha(alpha));
            } else {
                self.title_shown = true;
            }
        }
    }
}

impl Default for InPlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for InPlayState {
    fn on_load(&mut self, data: &mut GameData, _managers: &mut Managers) {
        data.load_level(1);
        self.debris_field = Vec::with_capacity(data.level.debris_count);
        self.end_marker = self.compute_end_marker(data);
    }

    fn on_enter(&mut self, data: &mut GameData, managers: &mut Managers) {
        info!("entering level {}: {}", data.level.number, data.level.title);

        data.round.reset();
        data.audio.play_music_loop(data.level.song);

        // Camera starts at the bottom of the world.
        data.camera = Vec2::new(0.0, data.world.h - data.resolution.h);

        managers.projectiles.clear();
        managers.explosions.clear();

        managers.players.spawn(data);
        managers.players.reset_lives(data);
        managers.players.reset_score(data);
        managers.players.reset_weapon();

        self.spawn_level_population(data, managers);
        self.regenerate_debris(data);

        self.end_marker = self.compute_end_marker(data);
        self.frames_in_level = 0;
        self.title_shown = false;
    }

    fn update(&mut self, data: &mut GameData, managers: &mut Managers) {
        self.frames_in_level += 1;

        if !managers.players.is_alive() {
            data.request_state(StateKey::GameOver);
            return;
        }

        if let Some(ship) = managers.players.ship_mut() {
            keep_on_screen(data, &mut ship.entity.state);
        }
        let ship_center = managers
            .players
            .ship()
            .map(|ship| ship.entity.state.center());

        managers
            .projectiles
            .update(data, &managers.enemies, &managers.blocks);
        managers.blocks.update(data);
        managers.explosions.update(data);
        managers.collisions.update(
            data,
            &mut managers.players,
            &mut managers.projectiles,
            &mut managers.enemies,
            &mut managers.blocks,
            &mut managers.pickups,
            &mut managers.mines,
            &mut managers.explosions,
        );
        managers
            .players
            .update(data, &mut managers.projectiles, &managers.enemies, &managers.blocks);
        managers
            .enemies
            .update(data, &mut managers.projectiles, ship_center);
        managers.pickups.update(data);
        managers.mines.update(data);

        // Scroll up the world until the top is reached.
        if data.camera.y >= data.world.y {
            data.camera.y -= SCROLL_SPEED;
        }

        self.end_marker = self.compute_end_marker(data);

        if let Some(ship) = managers.players.ship() {
            if ship.entity.state.rect().intersects(&self.end_marker) {
                let next = if data.level.is_last_level {
                    StateKey::EndOfGame
                } else {
                    StateKey::EndOfLevel
                };
                data.request_state(next);
            }
        }
    }

    fn draw(&mut self, data: &mut GameData, managers: &mut Managers) {
        self.draw_background(data);
        self.draw_debris(data);

        managers.projectiles.draw(data);
        managers.blocks.draw(data);
        managers.explosions.draw(data);
        managers.players.draw(data);
        managers.enemies.draw(data);
        managers.pickups.draw(data);
        managers.mines.draw(data);

        self.draw_level_markers(data);
        self.hud.draw(data, &managers.players);
    }

    fn on_exit(&mut self, data: &mut GameData, _managers: &mut Managers) {
        data.audio.stop_music();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::round::STARTING_LIVES;
    use crate::core::testing::test_data;

    fn entered() -> (InPlayState, GameData, Managers) {
        let mut state = InPlayState::new();
        let mut data = test_data();
        let mut managers = Managers::new();

        state.on_load(&mut data, &mut managers);
        state.on_enter(&mut data, &mut managers);

        (state, data, managers)
    }

    #[test]
    fn entering_resets_round_and_spawns_world() {
        let (_state, data, managers) = entered();

        assert_eq!(data.round.score, 0);
        assert_eq!(data.round.lives, STARTING_LIVES);
        assert!(managers.players.is_alive());

        assert_eq!(
            managers.blocks.live_count() as u32,
            data.level.block_count
        );
        assert_eq!(managers.enemies.live_count(), 2); // test level zone
        assert_eq!(managers.mines.live_count(), 1);
        assert_eq!(
            managers.pickups.live_count() as u32,
            EXTRA_LIFE_PICKUPS
                + SAMPLE_WEAPON_PICKUPS
                + HEALTH_PICKUPS
                + BLUELASER_PICKUPS
                + MISSILE_PICKUPS
        );
    }

    #[test]
    fn entering_positions_camera_at_world_bottom() {
        let (_state, data, _managers) = entered();

        assert_eq!(data.camera.x, 0.0);
        assert_eq!(data.camera.y, data.world.h - data.resolution.h);
    }

    #[test]
    fn first_frame_after_enter_keeps_round_clean() {
        let (mut state, mut data, mut managers) = entered();

        state.update(&mut data, &mut managers);

        assert!(managers.players.is_alive());
        assert_eq!(data.round.score, 0);
        assert_eq!(data.round.lives, STARTING_LIVES);

        use crate::core::weapons::Weapon as _;
        let weapon = managers.players.ship().map(|ship| ship.weapon.name());
        assert_eq!(weapon, Some("laser"), "round starts on the default weapon");
    }

    #[test]
    fn camera_scrolls_up_until_world_top() {
        let (mut state, mut data, mut managers) = entered();
        let before = data.camera.y;

        state.update(&mut data, &mut managers);
        assert_eq!(data.camera.y, before - SCROLL_SPEED);

        // Once past the top, the camera stops.
        data.camera.y = data.world.y - 1.0;
        state.update(&mut data, &mut managers);
        assert_eq!(data.camera.y, data.world.y - 1.0);
    }

    #[test]
    fn dead_player_requests_game_over() {
        let (mut state, mut data, mut managers) = entered();

        if let Some(ship) = managers.players.ship_mut() {
            ship.entity.state.alive = false;
        }
        state.update(&mut data, &mut managers);

        assert_eq!(data.pending_state, Some(StateKey::GameOver));
    }

    #[test]
    fn debris_field_matches_level_count_and_bounds() {
        let (state, data, _managers) = entered();

        assert_eq!(state.debris_field.len(), data.level.debris_count);
        for rect in &state.debris_field {
            assert!(rect.x >= 0.0 && rect.x < data.world.w);
            assert!(rect.y >= 0.0 && rect.y < data.world.h);
            assert!(rect.w > 0.0 && rect.h > 0.0);
        }
    }

    //--- keep_on_screen ---------------------------------------------------

    #[test]
    fn clamp_right_edge_snaps_and_damps() {
        let (_state, data, _managers) = entered();

        let far_right = data.camera.x + data.resolution.w;
        let mut ent = EntityState::new(
            Vec2::new(far_right + 1.0, data.camera.y + 100.0),
            Vec2::new(30.0, 60.0),
        );
        ent.velocity = Vec2::new(8.0, 0.0);

        keep_on_screen(&data, &mut ent);

        assert_eq!(ent.position.x, far_right - ent.size.x);
        assert_eq!(ent.velocity.x, 8.0 * -VELOCITY_DAMPING);
    }

    #[test]
    fn clamp_left_edge_snaps_to_camera() {
        let (_state, data, _managers) = entered();

        let mut ent = EntityState::new(
            Vec2::new(data.camera.x - 5.0, data.camera.y + 100.0),
            Vec2::new(30.0, 60.0),
        );
        ent.velocity = Vec2::new(-8.0, 0.0);

        keep_on_screen(&data, &mut ent);

        assert_eq!(ent.position.x, data.camera.x);
        assert_eq!(ent.velocity.x, -8.0 * -VELOCITY_DAMPING);
    }

    #[test]
    fn clamp_preserves_untouched_axis() {
        let (_state, data, _managers) = entered();

        let far_right = data.camera.x + data.resolution.w;
        let mut ent = EntityState::new(
            Vec2::new(far_right + 1.0, data.camera.y + 100.0),
            Vec2::new(30.0, 60.0),
        );
        ent.velocity = Vec2::new(8.0, 3.0);

        keep_on_screen(&data, &mut ent);

        assert_eq!(ent.velocity.y, 3.0, "y velocity untouched by x clamp");
    }

    #[test]
    fn onscreen_entity_is_untouched() {
        let (_state, data, _managers) = entered();

        let center = data.on_screen_world().center();
        let mut ent = EntityState::new(center, Vec2::new(30.0, 60.0));
        ent.velocity = Vec2::new(4.0, -2.0);
        let before = ent;

        keep_on_screen(&data, &mut ent);

        assert_eq!(ent, before);
    }
}
