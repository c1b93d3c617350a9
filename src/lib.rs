//! A Connect 4 engine for playing against a human
//!
//! The engine searches the game tree to a fixed look-ahead depth with
//! minimax, scoring positions only by whether they are won or lost, and
//! breaks ties between equally good moves with a seedable random source.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{game::GameState, strategist::MinimaxStrategist};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // red has three in a row along the bottom, red to move
//! let state: GameState = GameState::from_moves("051626")?;
//! let mut strategist = MinimaxStrategist::new(3, StdRng::seed_from_u64(0));
//! let best = strategist.best_move(&state, state.current_player())?;
//!
//! assert_eq!((best.column, best.score), (3, 1000));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod moves;
pub mod pacing;
pub mod player;
pub mod strategist;

mod test;

pub use board::Board;
pub use error::{ConfigError, IllegalMove, ParseMovesError, SearchError};
pub use game::{apply_human_move, evaluate_outcome, legal_moves, new_game, GameState, Outcome};
pub use moves::Move;
pub use player::{Chip, Player};
pub use strategist::{request_ai_move, MinimaxStrategist};

/// The width of the standard game board in tiles
pub const WIDTH: usize = 7;

/// The height of the standard game board in tiles
pub const HEIGHT: usize = 6;

/// The number of chips in a line needed to win
pub const CONNECT: usize = 4;

/// The look-ahead depth of the automated opponent, in plies
pub const DEFAULT_DEPTH: u32 = 7;

/// The score of a won position, from the winner's point of view
pub const WIN_SCORE: i32 = 1000;

// a line of CONNECT chips must fit on the board in some direction
const_assert!(CONNECT >= 2);
const_assert!(CONNECT <= WIDTH || CONNECT <= HEIGHT);
// the search depth can never usefully exceed the number of cells
const_assert!((DEFAULT_DEPTH as usize) <= WIDTH * HEIGHT);
