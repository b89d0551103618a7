//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation
//! logic. It has **zero dependencies** on rendering, the DOM, or I/O, making
//! it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: The embedder pumps the clock, so tests drive time directly
//! - **Portable**: Can run behind any shell (canvas, terminal, headless)
//!
//! # Module Structure
//!
//! - [`board`]: the cell grid with collision detection and row sweeping
//! - [`game_state`]: the session object and its phase machine
//! - [`pieces`]: tetromino matrices, the shape catalog, rotation and kicks
//! - [`rng`]: seedable uniform piece selection
//! - [`scoring`]: line clear points, level progression, gravity intervals
//! - [`snapshot`]: read-only frame snapshots for the renderer
//!
//! # Game Rules
//!
//! - Seven piece kinds drawn uniformly at random, each with a fixed color id
//! - Rotation swaps in a freshly rotated matrix; collisions are resolved by
//!   a bounded horizontal kick search (a simplified wall-kick approximation,
//!   not the SRS kick tables)
//! - A blocked descent locks the piece immediately (no lock delay), sweeps
//!   and scores full rows, and spawns the next piece
//! - A blocked spawn is the sole game-over condition
//! - Behaviors that differ between common renditions (top-row sweep
//!   eligibility, board handling on game over, scoring rule) are selected
//!   per session via [`types::GameRules`]
//!
//! # Example
//!
//! ```
//! use canvas_tetris_core::GameState;
//! use canvas_tetris_types::{GameAction, Phase};
//!
//! // Create and start a game
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! // Apply input actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Pump the clock (the embedder owns the scheduling primitive)
//! game.tick(16);
//!
//! // Read a frame for the renderer
//! let frame = game.snapshot();
//! assert!(frame.playable());
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use canvas_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{ActivePiece, GameState};
pub use pieces::{create_piece, kick_offsets, try_rotate, Matrix};
pub use rng::{PieceStream, SimpleRng};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score, soft_drop_interval_ms};
pub use snapshot::{GameSnapshot, PieceSnapshot};
