//=========================================================================
// Pickups
//=========================================================================
//
// Collectibles scattered across the world. The effect applies when the
// ship touches one; a pickup whose effect is refused (health pickup at
// full health) stays in the world.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::Vec2;
use crate::core::services::{TextureId, Tint};

use super::components::Sprite;
use super::{Entity, EntityState};

//=== PickupKind ==========================================================

/// What collecting the pickup does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    ExtraLife,
    Health,
    MissileWeapon,
    SampleWeapon,
    BluelaserWeapon,
}

impl PickupKind {
    fn texture(self) -> TextureId {
        match self {
            PickupKind::ExtraLife => TextureId::ExtraLifePickup,
            PickupKind::Health => TextureId::HealthPickup,
            PickupKind::MissileWeapon => TextureId::MissilePickup,
            PickupKind::SampleWeapon => TextureId::RocketPickup,
            PickupKind::BluelaserWeapon => TextureId::MinePickup,
        }
    }

    fn tint(self) -> Tint {
        match self {
            PickupKind::Health => Tint::PINK,
            PickupKind::SampleWeapon => Tint::RED,
            _ => Tint::WHITE,
        }
    }
}

//=== Pickup ==============================================================

/// A stationary collectible owned by the pickup manager.
pub struct Pickup {
    pub entity: Entity,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(data: &GameData, kind: PickupKind, position: Vec2) -> Self {
        let size = data
            .renderer
            .texture_size(kind.texture())
            .scaled(data.screen_scale);

        let mut state = EntityState::new(position, size);
        state.tint = kind.tint();

        let entity = Entity::new(state).with_graphics(Sprite::new(kind.texture()));

        Self { entity, kind }
    }
}
