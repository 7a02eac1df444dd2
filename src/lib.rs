//! # 2048 Rules Engine
//!
//! This library provides the core rules of the 2048 sliding-tile puzzle: a
//! 4x4 grid of tiles that slide and merge when a direction is played, a new
//! tile spawned after every move that changed the board, and the game-over check.
//!
//! Every call to `Game::play` returns the net movement of each tile for that
//! turn, merge flags included, so a front end can animate it.
//!
//! It is used by the `human_player` binary, which plays the game interactively
//! on the command line.
//!
//! ## Modules
//! - `engine`: Contains the tile (`Tile`), the directions (`Direction`), the grid and
//!   its slide/merge passes (`Board`), and the turn orchestration (`Game`).
//! - `movement`: Defines `Movement` and the `MovementCollector` that folds the passes
//!   of a turn into one movement per tile.
//! - `error`: The `EngineError` type returned by fallible operations.
//! - `utils`: Provides utility functions, such as parsing board layouts from strings.

pub mod engine;
pub mod error;
pub mod movement;
pub mod utils;

pub use engine::{Board, Direction, Game, Tile, BOARD_SIZE};
pub use error::EngineError;
pub use movement::{Movement, MovementCollector, Position};
