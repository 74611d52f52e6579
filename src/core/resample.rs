//! Linear resampling of time-ordered samples onto evenly spaced targets.
//!
//! Every target does a linear scan of the input, so cost is
//! `O(target_count * samples.len())`. That is fine for the dozens to low
//! hundreds of samples a plotted file holds; it is the first thing to replace
//! (with a moving cursor) if inputs grow.

use serde::{Deserialize, Serialize};

use crate::core::Sample;
use crate::core::primitives::{lerp, nonzero_or_one};

/// What to interpolate against when a target falls outside the observed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Missing neighbours become `(0, 0)` before the data and `(T, 0)` after it.
    #[default]
    SyntheticZero,
    /// Missing neighbours take the value of the nearest real sample.
    ClampToNearest,
}

/// How target times are spread over `[0, T]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleSpacing {
    /// `step = T / (n - 1)`: first target at `0`, last at `T`.
    #[default]
    EndpointInclusive,
    /// `step = T / n`: last target one step short of `T`.
    Exclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResampleOptions {
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    #[serde(default)]
    pub spacing: SampleSpacing,
}

impl ResampleOptions {
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: SampleSpacing) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Produces `target_count` values evenly spaced in time over `[0, T]`, where
/// `T` is the time of the last sample (`1` when that is zero).
#[must_use]
pub fn resample(samples: &[Sample], target_count: usize, options: ResampleOptions) -> Vec<f64> {
    if target_count == 0 {
        return Vec::new();
    }

    let total_time = nonzero_or_one(samples.last().map_or(0.0, |sample| sample.time));
    let step = match options.spacing {
        SampleSpacing::EndpointInclusive if target_count > 1 => {
            total_time / (target_count - 1) as f64
        }
        SampleSpacing::EndpointInclusive => 0.0,
        SampleSpacing::Exclusive => total_time / target_count as f64,
    };

    (0..target_count)
        .map(|k| value_at(samples, k as f64 * step, total_time, options.boundary))
        .collect()
}

fn value_at(samples: &[Sample], time: f64, total_time: f64, boundary: BoundaryPolicy) -> f64 {
    let mut prev = None;
    let mut next = None;
    for sample in samples {
        if sample.time <= time {
            prev = Some(*sample);
        } else {
            next = Some(*sample);
            break;
        }
    }

    let (prev, next) = match boundary {
        BoundaryPolicy::SyntheticZero => (
            prev.unwrap_or(Sample::new(0.0, 0.0)),
            next.unwrap_or(Sample::new(total_time, 0.0)),
        ),
        BoundaryPolicy::ClampToNearest => match (prev, next) {
            (Some(prev), Some(next)) => (prev, next),
            (Some(prev), None) => return prev.value,
            (None, Some(next)) => return next.value,
            (None, None) => return 0.0,
        },
    };

    let span = next.time - prev.time;
    let fraction = if span == 0.0 {
        0.0
    } else {
        (time - prev.time) / span
    };
    lerp(prev.value, next.value, fraction)
}
