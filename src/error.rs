//! Level loading errors

use std::fmt;
use std::path::PathBuf;

/// Why a level grid could not be turned into a playable level
#[derive(Debug)]
pub enum LevelLoadError {
    /// The level file could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// The grid has no rows
    Empty,
    /// A token is not a non-negative integer
    InvalidToken { row: usize, column: usize, token: String },
    /// A tile code with no block type
    UnknownTile { row: usize, column: usize, code: u32 },
    /// A row is wider or narrower than the first row
    RaggedRow { row: usize, expected: usize, found: usize },
    /// No ball start tile (8)
    MissingSpawn,
    /// More than one ball start tile; (row, column) of both
    MultipleSpawns { first: (usize, usize), second: (usize, usize) },
    /// The game was given zero levels
    NoLevels,
}

impl fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelLoadError::Io { path, source } => {
                write!(f, "failed to read level {}: {}", path.display(), source)
            }
            LevelLoadError::Empty => write!(f, "level grid is empty"),
            LevelLoadError::InvalidToken { row, column, token } => {
                write!(f, "invalid tile '{}' at row {}, column {}", token, row, column)
            }
            LevelLoadError::UnknownTile { row, column, code } => {
                write!(f, "unknown tile code {} at row {}, column {}", code, row, column)
            }
            LevelLoadError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} tiles, expected {}",
                row, found, expected
            ),
            LevelLoadError::MissingSpawn => write!(f, "level has no ball start tile"),
            LevelLoadError::MultipleSpawns { first, second } => write!(
                f,
                "level has more than one ball start tile: {:?} and {:?}",
                first, second
            ),
            LevelLoadError::NoLevels => write!(f, "no levels to play"),
        }
    }
}

impl std::error::Error for LevelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelLoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
