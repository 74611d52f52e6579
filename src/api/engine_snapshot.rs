use serde::{Deserialize, Serialize};

use crate::core::{BoundingBox, Density, FormatMode, GridPoint, LineOrientation, SeriesId, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, Renderer};

use super::PlotEngine;

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub id: SeriesId,
    pub name: String,
    pub label: String,
    pub order_index: usize,
    pub color: Color,
    pub visible: bool,
    pub sample_count: usize,
    pub curve: Vec<GridPoint>,
}

/// Serializable state snapshot used by regression tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub spacing: f64,
    pub zoom_percent: f64,
    pub density: Density,
    pub format: FormatMode,
    pub active_horizontal: usize,
    pub active_vertical: usize,
    pub inactive_lines: usize,
    pub bounding_box: Option<BoundingBox>,
    pub max_time: f64,
    pub series: Vec<SeriesSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_contract_str(input: &str) -> PlotResult<Self> {
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlotError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(PlotError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> PlotEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let grid = self.grid();
        let pool = grid.pool();
        let registry = self.registry();
        EngineSnapshot {
            viewport: grid.viewport(),
            spacing: grid.spacing(),
            zoom_percent: grid.zoom_percent(),
            density: grid.density(),
            format: grid.format(),
            active_horizontal: pool.active_count(LineOrientation::Horizontal),
            active_vertical: pool.active_count(LineOrientation::Vertical),
            inactive_lines: pool.inactive_count(),
            bounding_box: grid.bounding_box(),
            max_time: registry.max_time(),
            series: registry
                .iter()
                .enumerate()
                .map(|(order_index, (id, entry))| SeriesSnapshot {
                    id,
                    name: entry.series().name().to_owned(),
                    label: entry.label(),
                    order_index,
                    color: entry.visual().color(),
                    visible: entry.visual().is_visible(),
                    sample_count: entry.series().len(),
                    curve: entry.visual().curve().points().to_vec(),
                })
                .collect(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> PlotResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
