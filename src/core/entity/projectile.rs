//=========================================================================
// Projectile
//=========================================================================
//
// A shot in flight: player laser, missile, homing rocket, mine marker,
// or enemy fire.
//
// A projectile never owns its seek target: it carries a pooled id and
// resolves it by identity each frame, so a recycled slot can never be
// mistaken for the entity it was aimed at.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::managers::EntityId;
use crate::core::math::Vec2;
use crate::core::services::TextureId;

use super::components::{Physics, Sprite};
use super::{Entity, EntityState};

//=== Seek Targets ========================================================

/// Which manager a seek target lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Enemy,
    Block,
}

/// Identity of a homing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: EntityId,
}

/// A potential homing target gathered for the sample weapon.
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate {
    pub target: TargetRef,
    pub center: Vec2,
}

//=== Projectile ==========================================================

/// A projectile owned by the projectile manager.
pub struct Projectile {
    pub entity: Entity,
    /// Damage dealt on impact. Zero marks a mine marker, not a shot.
    pub damage: i32,
    pub enemy_owned: bool,
    /// Flight speed, kept for homing course corrections.
    pub speed: f32,
    pub target: Option<TargetRef>,
}

impl Projectile {
    /// Builds a projectile moving along `direction`.
    ///
    /// `power` is the combined speed/damage magnitude of the shot.
    pub fn new(
        data: &GameData,
        texture: TextureId,
        position: Vec2,
        direction: Vec2,
        power: i32,
        enemy_owned: bool,
    ) -> Self {
        let size = data.renderer.texture_size(texture).scaled(data.screen_scale);

        let mut state = EntityState::new(position, size);
        state.velocity = direction.scaled(power as f32);

        let entity = Entity::new(state)
            .with_physics(Physics)
            .with_graphics(Sprite::new(texture));

        Self {
            entity,
            damage: power,
            enemy_owned,
            speed: power as f32,
            target: None,
        }
    }
}
