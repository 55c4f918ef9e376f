//=========================================================================
// Input Service
//=========================================================================
//
// Key polling contract plus per-frame edge tracking.
//
// Architecture:
//   InputPoller (embedder) → KeyState::begin_frame() → HashSet
//   (keys held) + frame deltas (pressed / released) → query
//
// Frame lifecycle: begin_frame() once per tick, then query.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== GameKey =============================================================

/// The fixed key set the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Forward,
    Backward,
    Left,
    Right,
    Fire,
}

impl GameKey {
    /// Every key the tracker samples each frame.
    pub const ALL: [GameKey; 5] = [
        GameKey::Forward,
        GameKey::Backward,
        GameKey::Left,
        GameKey::Right,
        GameKey::Fire,
    ];
}

//=== InputPoller Trait ===================================================

/// Raw key polling, implemented by the embedding application.
pub trait InputPoller {
    /// Returns `true` while the device key mapped to `key` is held.
    fn is_key_down(&self, key: GameKey) -> bool;
}

/// Poller that reports every key as up. Used in headless runs and tests.
#[derive(Debug, Default)]
pub struct NullInput;

impl InputPoller for NullInput {
    fn is_key_down(&self, _key: GameKey) -> bool {
        false
    }
}

//=== KeyState ============================================================

/// Tracks persistent key state (held) and per-frame deltas
/// (pressed / released).
///
/// Sampling the poller once per frame at the tick boundary gives every
/// consumer the same view of the keyboard for that frame and makes
/// edge-triggered behaviors (fire-on-press, reset-on-release) queryable
/// without each consumer keeping its own latch.
pub struct KeyState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<GameKey>,

    //--- Frame Deltas (recomputed each frame) ----------------------------
    keys_pressed_this_frame: HashSet<GameKey>,
    keys_released_this_frame: HashSet<GameKey>,
}

impl KeyState {
    /// Creates a new tracker with every key up.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Samples the poller and recomputes held/pressed/released sets.
    ///
    /// Call exactly once per frame, before any manager update.
    pub fn begin_frame(&mut self, poller: &dyn InputPoller) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();

        for key in GameKey::ALL {
            let down = poller.is_key_down(key);

            if down {
                // Only mark as pressed if it wasn't already down
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                }
            } else if self.keys_down.remove(&key) {
                self.keys_released_this_frame.insert(key);
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while the key is held.
    ///
    /// Use for continuous actions like thrust.
    pub fn is_down(&self, key: GameKey) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if the key transitioned UP → DOWN this frame.
    ///
    /// Use for discrete actions like firing.
    pub fn is_pressed(&self, key: GameKey) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` if the key transitioned DOWN → UP this frame.
    ///
    /// Use for release-dependent actions like ending a turn animation.
    pub fn is_released(&self, key: GameKey) -> bool {
        self.keys_released_this_frame.contains(&key)
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
