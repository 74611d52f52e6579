use thiserror::Error;

use crate::core::{LineOrientation, SeriesId};

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series capacity exceeded: at most {capacity} series can be active")]
    CapacityExceeded { capacity: usize },

    #[error("unknown series: {0}")]
    UnknownSeries(SeriesId),

    #[error("orientation {0:?} has no grid geometry")]
    InvalidOrientation(LineOrientation),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
