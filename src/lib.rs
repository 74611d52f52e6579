//! gridplot: zoomable grid and multi-series time plot engine.
//!
//! `core` holds the grid coordinate engine, the line pool and the resampler;
//! `api` holds the series registry, projection and the `PlotEngine` context;
//! `render` is the backend-agnostic drawing seam.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{PlotEngine, PlotEngineConfig};
pub use error::{PlotError, PlotResult};
