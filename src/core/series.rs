use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u32);

impl SeriesId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "series#{}", self.0)
    }
}

/// One `(time, value)` pair of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}

/// Named, time-ordered and immutable sample sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    samples: Vec<Sample>,
}

impl Series {
    /// Validates finiteness and non-decreasing time order.
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> PlotResult<Self> {
        let name = name.into();
        for (index, sample) in samples.iter().enumerate() {
            if !sample.time.is_finite() || !sample.value.is_finite() {
                return Err(PlotError::InvalidData(format!(
                    "sample {index} of `{name}` must have finite time and value"
                )));
            }
        }
        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1].time < pair[0].time)
        {
            return Err(PlotError::InvalidData(format!(
                "sample {} of `{name}` goes back in time",
                index + 1
            )));
        }
        Ok(Self { name, samples })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the last sample, `0.0` when empty.
    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |sample| sample.time)
    }
}

#[cfg(test)]
mod tests {
    use super::{Sample, Series};

    #[test]
    fn rejects_out_of_order_samples() {
        let err = Series::new(
            "temp",
            vec![Sample::new(0.0, 1.0), Sample::new(2.0, 1.0), Sample::new(1.0, 1.0)],
        )
        .expect_err("out of order");
        assert!(err.to_string().contains("sample 2"));
    }

    #[test]
    fn accepts_repeated_times_and_empty_series() {
        let series = Series::new("dup", vec![Sample::new(1.0, 1.0), Sample::new(1.0, 2.0)])
            .expect("repeated time is non-decreasing");
        assert_eq!(series.total_time(), 1.0);

        let empty = Series::new("empty", Vec::new()).expect("empty series");
        assert!(empty.is_empty());
        assert_eq!(empty.total_time(), 0.0);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(Series::new("nan", vec![Sample::new(0.0, f64::NAN)]).is_err());
    }
}
