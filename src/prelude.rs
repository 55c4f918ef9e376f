//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use novastrike::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Facade
pub use crate::game::{Game, GameBuilder};

// Shared context and round bookkeeping
pub use crate::core::context::GameData;
pub use crate::core::round::RoundData;

// Math
pub use crate::core::math::{Rect, Vec2};

// Level data
pub use crate::core::level::{Level, LevelProvider, SpawnPoint, SpawnZone};

// Collaborator services
pub use crate::core::services::{
    Audio, GameKey, InputPoller, MusicId, Renderer, SoundCue, TextureId, Tint,
};

// Game states
pub use crate::core::state::{GameState, StateKey, StateManager};

// Managers
pub use crate::core::managers::{EntityId, Managers};
