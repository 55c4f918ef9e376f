//=========================================================================
// Game
//
// Main entry point and coordinator for the simulation core.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──advance_frame()──>  [one tick]
//         │                       │
//         ├─ with_renderer()      ├─ polls input
//         ├─ with_audio()         ├─ applies pending state transition
//         ├─ with_input()         ├─ updates the active state
//         └─ with_levels()        └─ draws the active state
// ```
//
// The embedding shell owns the real frame clock: it calls
// `advance_frame` once per tick. Update always completes before draw
// within a frame, and a state transition requested during an update
// takes effect at the top of the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::level::{Level, LevelProvider};
use crate::core::managers::Managers;
use crate::core::math::Rect;
use crate::core::services::{Audio, InputPoller, NullAudio, NullInput, NullRenderer, Renderer};
use crate::core::state::{
    EndOfGameState, EndOfLevelState, GameOverState, InPlayState, MenuState, StateKey, StateManager,
};

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// Services default to their Null implementations, so a headless game
/// (tests, simulations) only needs levels.
///
/// # Default Values
///
/// - **Resolution**: 1280×720
/// - **Screen scale**: 0.5
/// - **Services**: Null renderer / audio / input
///
/// # Examples
///
/// ```no_run
/// use novastrike::GameBuilder;
/// # fn levels() -> Vec<novastrike::core::level::Level> { Vec::new() }
///
/// let mut game = GameBuilder::new()
///     .with_levels(levels())
///     .with_resolution(1920.0, 1080.0)
///     .build();
///
/// loop {
///     game.advance_frame();
/// }
/// ```
pub struct GameBuilder {
    renderer: Box<dyn Renderer>,
    audio: Box<dyn Audio>,
    input: Box<dyn InputPoller>,
    levels: Vec<Level>,
    resolution: Rect,
    screen_scale: f32,
    rng_seed: Option<u64>,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            renderer: Box::new(NullRenderer),
            audio: Box::new(NullAudio),
            input: Box::new(NullInput),
            levels: Vec::new(),
            resolution: Rect::new(0.0, 0.0, 1280.0, 720.0),
            screen_scale: 0.5,
            rng_seed: None,
        }
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_audio(mut self, audio: impl Audio + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_input(mut self, input: impl InputPoller + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Sets the campaign's ordered level definitions.
    pub fn with_levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the screen resolution used for viewport math.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_resolution(mut self, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "resolution must be positive, got {}x{}",
            width,
            height
        );
        self.resolution = Rect::new(0.0, 0.0, width, height);
        self
    }

    /// Sets the global sprite scale.
    ///
    /// # Panics
    ///
    /// Panics if `scale <= 0.0`.
    pub fn with_screen_scale(mut self, scale: f32) -> Self {
        assert!(scale > 0.0, "screen scale must be positive, got {}", scale);
        self.screen_scale = scale;
        self
    }

    /// Fixes the RNG seed, making spawn placement and target selection
    /// deterministic.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Builds the game: constructs the shared context, the manager set,
    /// and the state machine, then enters the menu.
    ///
    /// # Panics
    ///
    /// Panics if no levels were provided.
    pub fn build(self) -> Game {
        assert!(!self.levels.is_empty(), "at least one level is required");

        let level_count = self.levels.len();
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut data = GameData::new(
            self.renderer,
            self.audio,
            self.input,
            LevelProvider::new(self.levels),
            self.resolution,
            self.screen_scale,
            rng,
        );
        let mut managers = Managers::new();

        let mut states = StateManager::new();
        states.register(StateKey::Menu, MenuState::new());
        states.register(StateKey::InPlay, InPlayState::new());
        states.register(StateKey::EndOfLevel, EndOfLevelState::new());
        states.register(StateKey::EndOfGame, EndOfGameState::new());
        states.register(StateKey::GameOver, GameOverState::new());
        states.start(&mut data, &mut managers, StateKey::Menu);

        info!("game initialized with {} level(s)", level_count);

        Game {
            data,
            managers,
            states,
        }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// A running game: shared context, managers, and the state machine.
pub struct Game {
    data: GameData,
    managers: Managers,
    states: StateManager,
}

impl Game {
    /// Runs one frame: input sampling, then the active state's update
    /// and draw.
    pub fn advance_frame(&mut self) {
        self.data.poll_input();
        self.states.advance_frame(&mut self.data, &mut self.managers);
    }

    //--- Accessors --------------------------------------------------------

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut GameData {
        &mut self.data
    }

    pub fn managers(&self) -> &Managers {
        &self.managers
    }

    pub fn managers_mut(&mut self) -> &mut Managers {
        &mut self.managers
    }

    /// Context and managers together, for embedders (and tests) that
    /// drive manager operations directly.
    pub fn split_mut(&mut self) -> (&mut GameData, &mut Managers) {
        (&mut self.data, &mut self.managers)
    }

    /// The state currently driving the frame loop.
    pub fn current_state(&self) -> Option<StateKey> {
        self.states.current()
    }
}
