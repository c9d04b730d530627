use crate::coord::Coord2;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridcastError {
    #[error("cell {coord:?} is outside the {width}x{height} grid")]
    OutOfBounds { coord: Coord2, width: u32, height: u32 },
    #[error("grid expects {expected} cells, got {got}")]
    GridSizeMismatch { expected: usize, got: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
