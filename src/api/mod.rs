mod engine;
mod engine_config;
mod engine_snapshot;
mod ingest;
mod render_frame_builder;
mod series_projection;
mod series_registry;

pub use engine::PlotEngine;
pub use engine_config::{DEFAULT_PALETTE, DEFAULT_SERIES_CAPACITY, PlotEngineConfig, RenderStyle};
pub use engine_snapshot::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1, SeriesSnapshot,
};
pub use ingest::{SampleParser, TextSampleParser, series_name_from_path};
pub use series_projection::{ProjectionContext, project_series};
pub use series_registry::{
    Keyframe, MAX_LABEL_CHARS, SeriesEntry, SeriesRegistry, SeriesVisualState, display_label,
};
