use serde::{Deserialize, Serialize};

use crate::core::primitives::{lerp, non_negative_max, nonzero_or_one};
use crate::core::{
    BoundingBox, Density, FormatMode, GridPoint, ResampleOptions, Series, SeriesId, resample,
};

use super::SeriesRegistry;

/// Grid state every series is projected against during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionContext {
    pub bounding_box: BoundingBox,
    pub density: Density,
    pub spacing: f64,
    /// Shared horizontal scale for `FormatMode::Default`.
    pub max_time: f64,
    pub format: FormatMode,
    pub resample: ResampleOptions,
}

/// Maps `series` into grid coordinates; the result is both the curve and the
/// keyframe positions.
#[must_use]
pub fn project_series(series: &Series, context: &ProjectionContext) -> Vec<GridPoint> {
    match context.format {
        FormatMode::Default => project_default(series, context),
        FormatMode::Normalized => project_normalized(series, context),
    }
}

fn project_default(series: &Series, context: &ProjectionContext) -> Vec<GridPoint> {
    let bounds = context.bounding_box;
    let max_time = nonzero_or_one(context.max_time);
    let max_value = nonzero_or_one(non_negative_max(
        series.samples().iter().map(|sample| sample.value),
    ));

    series
        .samples()
        .iter()
        .map(|sample| {
            GridPoint::new(
                lerp(bounds.min_x, bounds.max_x, sample.time / max_time),
                lerp(bounds.min_y, bounds.max_y, sample.value / max_value),
            )
        })
        .collect()
}

fn project_normalized(series: &Series, context: &ProjectionContext) -> Vec<GridPoint> {
    let bounds = context.bounding_box;
    let values = resample(series.samples(), context.density.x, context.resample);
    let max_value = nonzero_or_one(non_negative_max(values.iter().copied()));
    let height = context.density.y.saturating_sub(1) as f64 * context.spacing;

    values
        .iter()
        .enumerate()
        .map(|(k, value)| {
            GridPoint::new(
                bounds.min_x + k as f64 * context.spacing,
                bounds.min_y + lerp(0.0, height, value / max_value),
            )
        })
        .collect()
}

/// Projects every registered series, in registry order.
#[cfg(not(feature = "parallel-projection"))]
pub(crate) fn project_registry(
    registry: &SeriesRegistry,
    context: &ProjectionContext,
) -> Vec<(SeriesId, Vec<GridPoint>)> {
    registry
        .iter()
        .map(|(id, entry)| (id, project_series(entry.series(), context)))
        .collect()
}

/// Projects every registered series on the rayon pool, in registry order.
#[cfg(feature = "parallel-projection")]
pub(crate) fn project_registry(
    registry: &SeriesRegistry,
    context: &ProjectionContext,
) -> Vec<(SeriesId, Vec<GridPoint>)> {
    use rayon::prelude::*;

    let entries: Vec<_> = registry.iter().collect();
    entries
        .par_iter()
        .map(|(id, entry)| (*id, project_series(entry.series(), context)))
        .collect()
}
