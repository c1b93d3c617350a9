//! The game state explored by the search, and the calls the presentation
//! layer makes into it

use crate::{board::Board, error::*, moves::Move, player::*, CONNECT, HEIGHT, WIDTH};

/// Where a game stands after a move
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// A board together with the player whose turn it is
///
/// Copying a `GameState` copies the whole grid, so the search can explore
/// futures without touching the position it started from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GameState<const W: usize = WIDTH, const H: usize = HEIGHT, const K: usize = CONNECT> {
    board: Board<W, H, K>,
    current_player: Player,
}

impl<const W: usize, const H: usize, const K: usize> GameState<W, H, K> {
    /// An empty board with red to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Red,
        }
    }

    /// Builds a position from a string of 0-based column digits, played
    /// alternately starting with red
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, ParseMovesError> {
        let mut state = Self::new();

        for (index, column_char) in moves.as_ref().chars().enumerate() {
            let column = column_char
                .to_digit(10)
                .ok_or(ParseMovesError::InvalidChar(column_char))? as usize;
            // abort if the position is decided at any point
            if state.outcome_for(state.current_player.opponent()).is_over() {
                return Err(ParseMovesError::GameOver { index });
            }
            state.play(column)?;
        }
        Ok(state)
    }

    pub fn board(&self) -> &Board<W, H, K> {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// One unscored move per playable column, in ascending column order
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..W)
            .filter(|&column| self.board.can_move_in_column(column))
            .map(Move::new)
            .collect()
    }

    pub fn is_legal_move(&self, column: usize) -> bool {
        column < W && self.board.can_move_in_column(column)
    }

    /// Drops the current player's chip into `mv.column` and passes the turn.
    ///
    /// # Panics
    /// If the column is full. Only moves from [`legal_moves`](Self::legal_moves)
    /// may be applied; use [`play`](Self::play) for unchecked input.
    pub fn apply(&mut self, mv: Move) {
        let row = match self.board.next_empty_slot_in_column(mv.column) {
            Some(row) => row,
            None => panic!("move applied to full column {}", mv.column),
        };
        self.board
            .set_chip(self.current_player.chip(), mv.column, row);
        self.current_player = self.current_player.opponent();
    }

    /// Checked move application: validates `column`, applies it and
    /// reports the outcome for the player who just moved
    pub fn play(&mut self, column: usize) -> Result<Outcome, IllegalMove> {
        if column >= W {
            return Err(IllegalMove::OutOfRange { column, width: W });
        }
        if !self.board.can_move_in_column(column) {
            return Err(IllegalMove::ColumnFull { column });
        }

        let mover = self.current_player;
        self.apply(Move::new(column));
        Ok(self.outcome_for(mover))
    }

    /// Score of the position from `player`'s point of view
    pub fn score(&self, player: Player) -> i32 {
        self.board.score(player)
    }

    /// Whether the game is decided either way or cannot continue
    pub fn is_terminal_for(&self, player: Player) -> bool {
        self.board.is_win(player) || self.board.is_win(player.opponent()) || self.board.is_full()
    }

    /// The outcome after `mover` placed a chip. The mover's win is checked
    /// before the full board, so a win on the last cell is not a draw.
    pub fn outcome_for(&self, mover: Player) -> Outcome {
        if self.board.is_win(mover) {
            Outcome::Win(mover)
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

impl<const W: usize, const H: usize, const K: usize> Default for GameState<W, H, K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh standard game, red to move
pub fn new_game() -> GameState {
    GameState::new()
}

/// The columns currently open for a drop
pub fn legal_moves<const W: usize, const H: usize, const K: usize>(
    state: &GameState<W, H, K>,
) -> Vec<usize> {
    state.legal_moves().into_iter().map(|mv| mv.column).collect()
}

/// Plays a human-chosen column in place. The state is left untouched on error.
pub fn apply_human_move<const W: usize, const H: usize, const K: usize>(
    state: &mut GameState<W, H, K>,
    column: usize,
) -> Result<(), IllegalMove> {
    state.play(column).map(|_| ())
}

pub fn evaluate_outcome<const W: usize, const H: usize, const K: usize>(
    state: &GameState<W, H, K>,
    mover: Player,
) -> Outcome {
    state.outcome_for(mover)
}
