/// A candidate drop into `column`, with the score the search gave it
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub column: usize,
    pub score: i32,
}

impl Move {
    /// An unscored move
    pub fn new(column: usize) -> Self {
        Self { column, score: 0 }
    }

    pub fn with_score(self, score: i32) -> Self {
        Self { score, ..self }
    }
}
