//=========================================================================
// Level Data
//=========================================================================
//
// Declarative level definitions consumed by the in-play state.
//
// Levels arrive already parsed from whatever format the embedder uses;
// the core only reads them. A LevelProvider owns the ordered set for
// the current game and hands out definitions by level number.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::math::{Rect, Vec2};
use crate::core::services::{MusicId, TextureId};

//=== Spawn Declarations ==================================================

/// A rectangular region and a count of enemies to create inside it at
/// level start.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnZone {
    pub count: u32,
    pub area: Rect,
}

impl SpawnZone {
    pub fn new(count: u32, area: Rect) -> Self {
        Self { count, area }
    }

    /// Center of the zone, used when the zone holds a single enemy.
    pub fn center(&self) -> Vec2 {
        self.area.center()
    }
}

/// A fixed world position, used for mine placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

//=== Level ===============================================================

/// One level's worth of world layout, spawn declarations, and
/// presentation ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub number: u32,
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub background: TextureId,
    pub song: MusicId,

    //--- Decorative debris field -----------------------------------------
    pub debris_particle: TextureId,
    pub debris_count: usize,
    /// Particle scale range, in tenths (3 ⇒ 0.3×).
    pub debris_min_scale: u32,
    pub debris_max_scale: u32,

    //--- Spawn declarations ----------------------------------------------
    pub block_count: u32,
    pub fighters: Vec<SpawnZone>,
    pub freighters: Vec<SpawnZone>,
    pub mines: Vec<SpawnPoint>,

    pub is_last_level: bool,
}

impl Level {
    /// World rectangle spanned by this level.
    pub fn world(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

//=== LevelProvider =======================================================

/// Owns the ordered level set for a game.
///
/// Level numbers are 1-based, matching how campaign data is authored.
pub struct LevelProvider {
    levels: Vec<Level>,
}

impl LevelProvider {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Looks up a level definition by 1-based number.
    pub fn level(&self, number: u32) -> Option<&Level> {
        if number == 0 {
            warn!("level numbers are 1-based; refusing level 0");
            return None;
        }

        self.levels.get((number - 1) as usize)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn level(number: u32) -> Level {
        Level {
            number,
            width: 800.0,
            height: 4000.0,
            title: format!("Sector {}", number),
            background: TextureId::Background(0),
            song: MusicId(0),
            debris_particle: TextureId::DebrisParticle(0),
            debris_count: 10,
            debris_min_scale: 2,
            debris_max_scale: 6,
            block_count: 5,
            fighters: vec![],
            freighters: vec![],
            mines: vec![],
            is_last_level: false,
        }
    }

    #[test]
    fn lookup_is_one_based() {
        let provider = LevelProvider::new(vec![level(1), level(2)]);

        assert_eq!(provider.level(1).map(|l| l.number), Some(1));
        assert_eq!(provider.level(2).map(|l| l.number), Some(2));
        assert!(provider.level(0).is_none());
        assert!(provider.level(3).is_none());
    }

    #[test]
    fn zone_center_is_area_center() {
        let zone = SpawnZone::new(3, Rect::new(10.0, 20.0, 100.0, 40.0));
        assert_eq!(zone.center(), Vec2::new(60.0, 40.0));
    }
}
