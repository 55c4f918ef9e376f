//=========================================================================
// Game Data
//=========================================================================
//
// Shared context for managers, entities, and game states.
//
// One GameData exists per running game. It is the composition root:
// camera, world geometry, round statistics, the active level, sampled
// input, the RNG, and the collaborator services all live here and are
// passed by reference into every update/draw path. Manager logic lives
// separately in `Managers` so that context data and the systems that
// mutate it can be borrowed independently.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use crate::core::level::{Level, LevelProvider};
use crate::core::math::{Rect, Vec2};
use crate::core::round::RoundData;
use crate::core::services::{Audio, InputPoller, KeyState, Renderer};
use crate::core::state::StateKey;

//=== GameData ============================================================

/// Shared context threaded through every per-frame operation.
pub struct GameData {
    /// World-space offset of the visible viewport's top-left corner.
    pub camera: Vec2,

    /// Screen resolution as a rectangle at the origin.
    pub resolution: Rect,

    /// Bounds of the current level's world.
    pub world: Rect,

    /// Global sprite scale applied by graphics components.
    pub screen_scale: f32,

    /// Score / lives / shots-fired counters for the round in progress.
    pub round: RoundData,

    /// The active level definition.
    pub level: Level,

    /// Per-frame sampled key state with edge detection.
    pub keys: KeyState,

    /// Seedable RNG driving spawn placement and target selection.
    pub rng: StdRng,

    /// Drawing service provided by the embedder.
    pub renderer: Box<dyn Renderer>,

    /// Sound service provided by the embedder.
    pub audio: Box<dyn Audio>,

    /// Key polling service provided by the embedder.
    pub input: Box<dyn InputPoller>,

    /// State transition requested during this frame, applied at the top
    /// of the next frame. Last write wins.
    pub pending_state: Option<StateKey>,

    levels: LevelProvider,
}

impl GameData {
    /// Creates the context around the injected services and level set.
    ///
    /// The first level becomes active immediately; callers guarantee the
    /// provider is non-empty.
    pub(crate) fn new(
        renderer: Box<dyn Renderer>,
        audio: Box<dyn Audio>,
        input: Box<dyn InputPoller>,
        levels: LevelProvider,
        resolution: Rect,
        screen_scale: f32,
        rng: StdRng,
    ) -> Self {
        let level = levels
            .level(1)
            .cloned()
            .unwrap_or_else(|| unreachable!("builder rejects an empty level set"));
        let world = level.world();

        Self {
            camera: Vec2::ZERO,
            resolution,
            world,
            screen_scale,
            round: RoundData::new(),
            level,
            keys: KeyState::new(),
            rng,
            renderer,
            audio,
            input,
            pending_state: None,
            levels,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Samples the input poller into the key tracker.
    ///
    /// Called once per frame before the state machine runs.
    pub fn poll_input(&mut self) {
        let GameData { keys, input, .. } = self;
        keys.begin_frame(input.as_ref());
    }

    //--- Level Handling ---------------------------------------------------

    /// Activates the given level, replacing the world bounds.
    ///
    /// Returns false (and keeps the current level) if no such level
    /// exists.
    pub fn load_level(&mut self, number: u32) -> bool {
        match self.levels.level(number) {
            Some(level) => {
                debug!("loading level {} ({})", number, level.title);
                self.level = level.clone();
                self.world = self.level.world();
                true
            }
            None => {
                warn!("level {} does not exist; keeping current level", number);
                false
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// The portion of the world currently visible.
    pub fn on_screen_world(&self) -> Rect {
        Rect::new(
            self.camera.x,
            self.camera.y,
            self.resolution.w,
            self.resolution.h,
        )
    }

    //--- Transitions ------------------------------------------------------

    /// Requests a game-state change, applied at the next frame boundary.
    pub fn request_state(&mut self, state: StateKey) {
        debug!("state transition requested: {:?}", state);
        self.pending_state = Some(state);
    }
}
