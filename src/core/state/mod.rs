//=========================================================================
// Game State Machine
//=========================================================================
//
// Manages the top-level game states and their lifecycle.
//
// Architecture:
//   StateManager
//     ├─ states: HashMap<StateKey, Box<dyn GameState>>
//     └─ current: Option<StateKey>
//
// Flow per frame:
//   apply pending transition (exit old → enter new) → update → draw
//
// Transitions requested during an update take effect at the top of the
// next frame, never mid-update: in-flight entity updates for the
// current frame always complete.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::managers::Managers;

//=== Module Declarations =================================================

mod end_of_game;
mod end_of_level;
mod game_over;
mod in_play;
mod menu;

//=== Public API ==========================================================

pub use end_of_game::EndOfGameState;
pub use end_of_level::EndOfLevelState;
pub use game_over::GameOverState;
pub use in_play::{keep_on_screen, InPlayState};
pub use menu::MenuState;

//=== StateKey ============================================================

/// Identifies one top-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Menu,
    InPlay,
    EndOfLevel,
    EndOfGame,
    GameOver,
}

//=== GameState Trait =====================================================

/// One top-level game mode with lifecycle hooks.
///
/// Only `update` is required; the lifecycle hooks default to doing
/// nothing.
pub trait GameState {
    /// Called once at startup, before any state becomes active.
    fn on_load(&mut self, _data: &mut GameData, _managers: &mut Managers) {}

    /// Called every time this state becomes the active one.
    fn on_enter(&mut self, _data: &mut GameData, _managers: &mut Managers) {}

    /// Called when another state takes over.
    fn on_exit(&mut self, _data: &mut GameData, _managers: &mut Managers) {}

    /// Called once per frame while active, before drawing.
    fn update(&mut self, data: &mut GameData, managers: &mut Managers);

    /// Called once per frame while active, after every update.
    fn draw(&mut self, _data: &mut GameData, _managers: &mut Managers) {}
}

//=== StateManager ========================================================

/// Owns the registered states and drives the active one.
pub struct StateManager {
    states: HashMap<StateKey, Box<dyn GameState>>,
    current: Option<StateKey>,
}

impl StateManager {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a state under its key. Re-registering replaces the
    /// previous instance.
    pub fn register<T>(&mut self, key: StateKey, state: T)
    where
        T: GameState + 'static,
    {
        if self.states.insert(key, Box::new(state)).is_some() {
            warn!("state {:?} was already registered and has been replaced", key);
        }
    }

    /// Runs every state's load hook, then enters the initial state.
    pub fn start(&mut self, data: &mut GameData, managers: &mut Managers, initial: StateKey) {
        for state in self.states.values_mut() {
            state.on_load(data, managers);
        }

        if let Some(state) = self.states.get_mut(&initial) {
            debug!("starting in state {:?}", initial);
            self.current = Some(initial);
            state.on_enter(data, managers);
        } else {
            warn!("initial state {:?} not registered", initial);
        }
    }

    pub fn current(&self) -> Option<StateKey> {
        self.current
    }

    //--- Frame Processing -------------------------------------------------

    /// Runs one frame: applies any transition queued last frame, then
    /// updates and draws the active state.
    pub fn advance_frame(&mut self, data: &mut GameData, managers: &mut Managers) {
        if let Some(next) = data.pending_state.take() {
            self.apply_transition(data, managers, next);
        }

        let Some(current) = self.current else {
            return;
        };

        if let Some(state) = self.states.get_mut(&current) {
            state.update(data, managers);
            state.draw(data, managers);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply_transition(&mut self, data: &mut GameData, managers: &mut Managers, next: StateKey) {
        if Some(next) == self.current {
            debug!("state {:?} already active, ignoring transition", next);
            return;
        }

        if !self.states.contains_key(&next) {
            warn!("transition to unregistered state {:?} ignored", next);
            return;
        }

        if let Some(previous) = self.current {
            if let Some(state) = self.states.get_mut(&previous) {
                state.on_exit(data, managers);
            }
        }

        debug!("state {:?} -> {:?}", self.current, next);
        self.current = Some(next);

        if let Some(state) = self.states.get_mut(&next) {
            state.on_enter(data, managers);
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::test_data;

    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    struct Probe {
        name: &'static str,
        log: Rc<RefCell<Log>>,
        request: Option<StateKey>,
    }

    impl Probe {
        fn new(name: &'static str, log: Rc<RefCell<Log>>) -> Self {
            Self {
                name,
                log,
                request: None,
            }
        }

        fn push(&self, event: &str) {
            self.log
                .borrow_mut()
                .events
                .push(format!("{}:{}", self.name, event));
        }
    }

    impl GameState for Probe {
        fn on_load(&mut self, _data: &mut GameData, _managers: &mut Managers) {
            self.push("load");
        }

        fn on_enter(&mut self, _data: &mut GameData, _managers: &mut Managers) {
            self.push("enter");
        }

        fn on_exit(&mut self, _data: &mut GameData, _managers: &mut Managers) {
            self.push("exit");
        }

        fn update(&mut self, data: &mut GameData, _managers: &mut Managers) {
            self.push("update");
            if let Some(next) = self.request.take() {
                data.request_state(next);
            }
        }

        fn draw(&mut self, _data: &mut GameData, _managers: &mut Managers) {
            self.push("draw");
        }
    }

    fn harness() -> (StateManager, GameData, Managers, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut states = StateManager::new();
        states.register(StateKey::Menu, Probe::new("menu", log.clone()));
        states.register(StateKey::InPlay, Probe::new("play", log.clone()));

        (states, test_data(), Managers::new(), log)
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn start_enters_initial_state_after_loading_all() {
        let (mut states, mut data, mut managers, log) = harness();

        states.start(&mut data, &mut managers, StateKey::Menu);

        let events = &log.borrow().events;
        assert_eq!(events.last().map(String::as_str), Some("menu:enter"));
        assert!(events.contains(&"menu:load".to_string()));
        assert!(events.contains(&"play:load".to_string()));
        assert_eq!(states.current(), Some(StateKey::Menu));
    }

    #[test]
    fn transition_takes_effect_next_frame_with_hooks_in_order() {
        let (mut states, mut data, mut managers, log) = harness();
        states.start(&mut data, &mut managers, StateKey::Menu);
        log.borrow_mut().events.clear();

        // A transition queued last frame is applied at the top of this
        // one: exit, enter, then the new state's update and draw.
        data.request_state(StateKey::InPlay);
        states.advance_frame(&mut data, &mut managers);

        let events = log.borrow().events.clone();
        assert_eq!(
            events,
            vec![
                "menu:exit".to_string(),
                "play:enter".to_string(),
                "play:update".to_string(),
                "play:draw".to_string(),
            ]
        );
        assert_eq!(states.current(), Some(StateKey::InPlay));
    }

    #[test]
    fn request_during_update_finishes_the_frame_in_old_state() {
        let (mut states, mut data, mut managers, log) = harness();
        states.start(&mut data, &mut managers, StateKey::Menu);

        // Have the menu itself request the transition mid-update.
        states.register(StateKey::Menu, {
            let mut probe = Probe::new("menu", log.clone());
            probe.request = Some(StateKey::InPlay);
            probe
        });
        log.borrow_mut().events.clear();

        states.advance_frame(&mut data, &mut managers);
        let after_first = log.borrow().events.clone();
        assert_eq!(
            after_first,
            vec!["menu:update".to_string(), "menu:draw".to_string()],
            "frame in progress completes in the old state"
        );

        states.advance_frame(&mut data, &mut managers);
        assert_eq!(states.current(), Some(StateKey::InPlay));
    }

    #[test]
    fn unregistered_transition_is_ignored() {
        let (mut states, mut data, mut managers, _log) = harness();
        states.start(&mut data, &mut managers, StateKey::Menu);

        data.request_state(StateKey::GameOver);
        states.advance_frame(&mut data, &mut managers);

        assert_eq!(states.current(), Some(StateKey::Menu));
    }
}
