//! Chips and the two players that own them

use serde::{Deserialize, Serialize};

use std::fmt;

/// The occupant of a single board cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Chip {
    #[default]
    None,
    Red,
    Black,
}

impl Chip {
    pub fn is_empty(&self) -> bool {
        matches!(self, Chip::None)
    }

    /// Display name of the chip: "Red", "Black" or "None"
    pub fn name(&self) -> &'static str {
        match self {
            Chip::Red => "Red",
            Chip::Black => "Black",
            Chip::None => "None",
        }
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two sides of the game
///
/// Each player is bound to exactly one non-empty [`Chip`]. Players are plain
/// values, so two copies of the same player always compare equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Black,
}

impl Player {
    /// Both players, first mover first
    pub const ALL: [Player; 2] = [Player::Red, Player::Black];

    pub fn chip(self) -> Chip {
        match self {
            Player::Red => Chip::Red,
            Player::Black => Chip::Black,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// The player owning `chip`, or `None` for an empty cell
    pub fn from_chip(chip: Chip) -> Option<Player> {
        match chip {
            Chip::Red => Some(Player::Red),
            Chip::Black => Some(Player::Black),
            Chip::None => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.chip().name()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
