//=========================================================================
// Render Service
//=========================================================================
//
// Drawing contract between the simulation core and the embedding
// renderer.
//
// The core describes draw operations in world-independent terms (texture
// id, source region, destination, rotation, tint); rasterization and
// texture storage belong to the embedder.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{Rect, Vec2};

//=== Texture Identifiers =================================================

/// Identifies a texture known to the embedding renderer.
///
/// The fixed variants name sprites the core spawns itself; level data
/// carries `Background` and `DebrisParticle` ids chosen per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Horizontal atlas of ship turning frames.
    ShipSheet,
    Laser,
    Missile,
    /// Homing rocket fired by the sample weapon.
    Rocket,
    /// Stationary mine marker laid by the bluelaser.
    MineMarker,
    EnemyFighter,
    EnemyFreighter,
    Block,
    EnemyMine,
    /// Horizontal atlas of explosion animation frames.
    ExplosionSheet,
    HealthPickup,
    ExtraLifePickup,
    MissilePickup,
    RocketPickup,
    MinePickup,
    /// End-of-level marker sprite.
    LevelEnd,
    Background(u8),
    DebrisParticle(u8),
}

//=== Tint ================================================================

/// An RGBA color multiplier applied when drawing an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Tint = Tint::new(1.0, 0.0, 0.0, 1.0);
    pub const PINK: Tint = Tint::new(1.0, 0.75, 0.8, 1.0);
    pub const CRIMSON: Tint = Tint::new(0.86, 0.08, 0.24, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}

//=== Renderer Trait ======================================================

/// Drawing operations consumed by the core.
///
/// All positions are screen coordinates; callers subtract the camera
/// before issuing a draw.
pub trait Renderer {
    /// Draws a sub-region of a texture.
    ///
    /// `origin` is the pivot (relative to `position`) used for rotation;
    /// `size` is the destination footprint before `scale` is applied.
    #[allow(clippy::too_many_arguments)]
    fn draw_sprite_region(
        &mut self,
        texture: TextureId,
        src: Rect,
        position: Vec2,
        origin: Vec2,
        size: Vec2,
        scale: f32,
        rotation: f32,
        tint: Tint,
    );

    /// Draws a line of text at a screen position.
    fn draw_text(&mut self, text: &str, position: Vec2, tint: Tint);

    /// Fills a screen-space rectangle with a solid color.
    fn draw_filled_region(&mut self, area: Rect, tint: Tint);

    /// Reports the pixel dimensions of a texture.
    ///
    /// Entity bounding boxes for sprites without fixed dimensions are
    /// derived from this.
    fn texture_size(&self, texture: TextureId) -> Vec2;
}

//=== NullRenderer ========================================================

/// Renderer that discards every draw call.
///
/// Used in headless runs and tests. Reports a fixed nominal size for
/// every texture so bounding boxes stay non-degenerate.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_sprite_region(
        &mut self,
        _texture: TextureId,
        _src: Rect,
        _position: Vec2,
        _origin: Vec2,
        _size: Vec2,
        _scale: f32,
        _rotation: f32,
        _tint: Tint,
    ) {
    }

    fn draw_text(&mut self, _text: &str, _position: Vec2, _tint: Tint) {}

    fn draw_filled_region(&mut self, _area: Rect, _tint: Tint) {}

    fn texture_size(&self, _texture: TextureId) -> Vec2 {
        Vec2::new(16.0, 16.0)
    }
}
