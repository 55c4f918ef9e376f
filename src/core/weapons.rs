//=========================================================================
// Weapons
//=========================================================================
//
// Polymorphic fire behaviors equipped by the ship. Each weapon turns a
// fire request into projectile-manager spawn calls; the managers it may
// touch arrive through a FireContext so no weapon reaches outside it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::entity::projectile::TargetCandidate;
use crate::core::entity::EntityState;
use crate::core::managers::{BlockManager, EnemyManager, ProjectileManager};
use crate::core::services::SoundCue;

//=== FireContext =========================================================

/// Everything a weapon may touch while firing.
pub struct FireContext<'a> {
    pub data: &'a mut GameData,
    pub projectiles: &'a mut ProjectileManager,
    pub enemies: &'a EnemyManager,
    pub blocks: &'a BlockManager,
}

//=== Weapon Trait ========================================================

/// A fire behavior the ship can equip.
pub trait Weapon {
    /// Spawns this weapon's projectiles for one trigger pull.
    fn fire(&mut self, ship: &EntityState, ctx: &mut FireContext<'_>);

    /// Display name, used in logs.
    fn name(&self) -> &'static str;
}

//=== LaserWeapon =========================================================

/// The default weapon: a single laser fired straight up from the
/// ship's nose.
#[derive(Debug, Default)]
pub struct LaserWeapon;

impl LaserWeapon {
    pub fn new() -> Self {
        Self
    }
}

impl Weapon for LaserWeapon {
    fn fire(&mut self, ship: &EntityState, ctx: &mut FireContext<'_>) {
        let rect = ship.rect();

        ctx.data.audio.play_sound(SoundCue::Laser);
        ctx.projectiles
            .fire_laser(ctx.data, rect.x + rect.w / 2.0, rect.y);
    }

    fn name(&self) -> &'static str {
        "laser"
    }
}

//=== MissileWeapon =======================================================

/// Fires a cluster of three missiles: a heavy one up the middle with a
/// lighter missile on each flank.
#[derive(Debug, Default)]
pub struct MissileWeapon;

impl MissileWeapon {
    pub fn new() -> Self {
        Self
    }
}

impl Weapon for MissileWeapon {
    fn fire(&mut self, ship: &EntityState, ctx: &mut FireContext<'_>) {
        let rect = ship.rect();

        ctx.data.audio.play_sound(SoundCue::Laser);
        ctx.projectiles
            .fire_missile(ctx.data, rect.x + rect.w / 2.0 - 6.0, rect.y);
    }

    fn name(&self) -> &'static str {
        "missile"
    }
}

//=== SampleWeapon ========================================================

/// Fires a volley of homing rockets at random on-screen targets above
/// the ship.
#[derive(Debug, Default)]
pub struct SampleWeapon;

impl SampleWeapon {
    pub fn new() -> Self {
        Self
    }
}

impl Weapon for SampleWeapon {
    fn fire(&mut self, ship: &EntityState, ctx: &mut FireContext<'_>) {
        let rect = ship.rect();

        // Candidates are gathered into a fresh list; the managers'
        // collections are never touched while being read.
        let mut candidates: Vec<TargetCandidate> = ctx.enemies.visible_targets(ctx.data);
        candidates.extend(ctx.blocks.visible_targets(ctx.data));

        ctx.data.audio.play_sound(SoundCue::Laser);
        ctx.projectiles
            .fire_sample_weapon(ctx.data, rect.x + rect.w / 2.0, rect.y, &candidates);
    }

    fn name(&self) -> &'static str {
        "sample"
    }
}

//=== BluelaserWeapon =====================================================

/// Lays a stationary mine marker at the ship's position instead of
/// firing a shot.
#[derive(Debug, Default)]
pub struct BluelaserWeapon;

impl BluelaserWeapon {
    pub fn new() -> Self {
        Self
    }
}

impl Weapon for BluelaserWeapon {
    fn fire(&mut self, ship: &EntityState, ctx: &mut FireContext<'_>) {
        let center = ship.center();

        ctx.projectiles
            .fire_bluelaser(ctx.data, center.x, center.y);
    }

    fn name(&self) -> &'static str {
        "bluelaser"
    }
}
