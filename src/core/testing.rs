//=========================================================================
// Test Support
//=========================================================================
//
// Shared fixtures for unit tests: a GameData wired to Null services
// with a seeded RNG, and a scriptable key poller.
//
//=========================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::context::GameData;
use crate::core::level::{Level, LevelProvider, SpawnPoint, SpawnZone};
use crate::core::math::Rect;
use crate::core::services::{GameKey, InputPoller, MusicId, NullAudio, NullRenderer, TextureId};

//=== PressedKeys =========================================================

/// Poller whose held-key set tests mutate between frames.
pub(crate) struct PressedKeys {
    pub keys: Rc<RefCell<HashSet<GameKey>>>,
}

impl PressedKeys {
    pub fn held(keys: &[GameKey]) -> Self {
        Self {
            keys: Rc::new(RefCell::new(keys.iter().copied().collect())),
        }
    }
}

impl InputPoller for PressedKeys {
    fn is_key_down(&self, key: GameKey) -> bool {
        self.keys.borrow().contains(&key)
    }
}

//=== Fixtures ============================================================

pub(crate) fn test_level() -> Level {
    Level {
        number: 1,
        width: 800.0,
        height: 4000.0,
        title: "Test Sector".to_string(),
        background: TextureId::Background(0),
        song: MusicId(0),
        debris_particle: TextureId::DebrisParticle(0),
        debris_count: 8,
        debris_min_scale: 2,
        debris_max_scale: 6,
        block_count: 3,
        fighters: vec![SpawnZone::new(2, Rect::new(100.0, 200.0, 300.0, 300.0))],
        freighters: vec![],
        mines: vec![SpawnPoint { x: 400.0, y: 1000.0 }],
        is_last_level: false,
    }
}

pub(crate) fn test_data() -> GameData {
    test_data_with_keys(PressedKeys::held(&[]))
}

pub(crate) fn test_data_with_keys(poller: PressedKeys) -> GameData {
    GameData::new(
        Box::new(NullRenderer),
        Box::new(NullAudio),
        Box::new(poller),
        LevelProvider::new(vec![test_level()]),
        Rect::new(0.0, 0.0, 800.0, 600.0),
        0.5,
        StdRng::seed_from_u64(7),
    )
}
