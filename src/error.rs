use std::path::PathBuf;

/// A move that cannot be played on the current board
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },

    #[error("Invalid move, column {column} out of range, columns must be below {width}")]
    OutOfRange { column: usize, width: usize },
}

/// Errors returned by the strategist
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves, the board is full")]
    NoLegalMoves,
}

/// Errors from reading a position out of a string of column digits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMovesError {
    #[error("could not parse '{0}' as a valid move")]
    InvalidChar(char),

    #[error(transparent)]
    Illegal(#[from] IllegalMove),

    #[error("Invalid position, game is over before move {index}")]
    GameOver { index: usize },
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
