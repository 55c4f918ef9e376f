//=========================================================================
// Novastrike — Library Root
//
// This crate is the simulation core of a scrolling space shooter: the
// entity/component update-draw loop, the per-frame game-state machine,
// and the manager layer that owns the game objects and mediates their
// interactions.
//
// Responsibilities:
// - Expose the top-level facade (`Game` / `GameBuilder`)
// - Expose the core systems for embedders that need direct access
// - Consume rendering, audio, and input polling as injected services;
//   the core never touches a window, a sound card, or a keyboard
//
// Typical usage:
// ```no_run
// use novastrike::GameBuilder;
// # fn levels() -> Vec<novastrike::core::level::Level> { Vec::new() }
//
// let mut game = GameBuilder::new().with_levels(levels()).build();
//
// loop {
//     game.advance_frame();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all gameplay systems (entities, managers, weapons,
// game states). It is exposed publicly for embedder-level access, but
// normal application code will mostly use the top-level `Game` facade.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `game` defines the facade and builder that wire the core together.
//
mod game;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the facade as the main entry point for applications, so
// users can simply `use novastrike::GameBuilder;` without having to
// know the internal module structure.
//
pub mod prelude;

pub use game::{Game, GameBuilder};
