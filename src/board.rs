use crate::{player::*, CONNECT, HEIGHT, WIDTH, WIN_SCORE};

/// The directions a winning line can run in, as (dx, dy):
/// vertical, horizontal, diagonal up and diagonal down
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Connect 4 grid of `W` columns by `H` rows where `K` chips in a line win
///
/// Cells are stored column by column, bottom to top, so the cell at
/// (`column`, `row`) is the `row + column * H`th cell. Row 0 is the bottom.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board<const W: usize = WIDTH, const H: usize = HEIGHT, const K: usize = CONNECT> {
    cells: [[Chip; H]; W],
}

impl<const W: usize, const H: usize, const K: usize> Board<W, H, K> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;
    pub const CONNECT: usize = K;

    pub fn new() -> Self {
        Self {
            cells: [[Chip::None; H]; W],
        }
    }

    pub fn chip(&self, column: usize, row: usize) -> Chip {
        self.cells[column][row]
    }

    /// Writes a chip into a cell. `row` should come from
    /// [`next_empty_slot_in_column`](Self::next_empty_slot_in_column)
    /// to keep the columns free of gaps.
    pub fn set_chip(&mut self, chip: Chip, column: usize, row: usize) {
        self.cells[column][row] = chip;
    }

    /// The lowest empty row of `column`, or `None` if the column is full
    pub fn next_empty_slot_in_column(&self, column: usize) -> Option<usize> {
        self.cells[column].iter().position(Chip::is_empty)
    }

    pub fn can_move_in_column(&self, column: usize) -> bool {
        self.next_empty_slot_in_column(column).is_some()
    }

    pub fn is_full(&self) -> bool {
        !(0..W).any(|column| self.can_move_in_column(column))
    }

    /// Number of chips on the board
    pub fn num_chips(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|chip| !chip.is_empty())
            .count()
    }

    /// Whether `player` has `K` chips in a line anywhere on the board
    pub fn is_win(&self, player: Player) -> bool {
        let chip = player.chip();
        (0..W).any(|column| {
            (0..H).any(|row| {
                DIRECTIONS
                    .iter()
                    .any(|&(dx, dy)| self.line_from(column, row, dx, dy, chip))
            })
        })
    }

    /// Checks the `K` cells starting at (`column`, `row`) and stepping by
    /// (`dx`, `dy`). Lines whose last cell leaves the board are rejected
    /// before any cell is read.
    fn line_from(&self, column: usize, row: usize, dx: isize, dy: isize, chip: Chip) -> bool {
        let reach = K as isize - 1;
        let end_x = column as isize + dx * reach;
        let end_y = row as isize + dy * reach;
        if end_x < 0 || end_x >= W as isize || end_y < 0 || end_y >= H as isize {
            return false;
        }

        (0..K as isize).all(|i| {
            let x = (column as isize + dx * i) as usize;
            let y = (row as isize + dy * i) as usize;
            self.cells[x][y] == chip
        })
    }

    /// Terminal-only evaluation from `player`'s point of view:
    /// [`WIN_SCORE`] for a win, its negation for a loss, otherwise 0
    pub fn score(&self, player: Player) -> i32 {
        if self.is_win(player) {
            WIN_SCORE
        } else if self.is_win(player.opponent()) {
            -WIN_SCORE
        } else {
            0
        }
    }
}

impl<const W: usize, const H: usize, const K: usize> Default for Board<W, H, K> {
    fn default() -> Self {
        Self::new()
    }
}
