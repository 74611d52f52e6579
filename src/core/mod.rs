pub mod grid;
pub mod line_pool;
pub mod primitives;
pub mod resample;
pub mod series;
pub mod types;

pub use grid::{
    BoundingBox, CoordinateGrid, GridConfig, LineExtremes, ReconcileOutcome, line_allocation,
    line_offset,
};
pub use line_pool::{LineOrientation, LinePool, LineSlot, SlotId};
pub use resample::{BoundaryPolicy, ResampleOptions, SampleSpacing, resample};
pub use series::{Sample, Series, SeriesId};
pub use types::{Density, FormatMode, GridPoint, Viewport};
