use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::{inverse_lerp, lerp};
use crate::core::{Density, FormatMode, GridPoint, LineOrientation, LinePool, SlotId, Viewport};
use crate::error::{PlotError, PlotResult};

/// Zoom and pool tuning for [`CoordinateGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub initial_spacing: f64,
    pub min_spacing: f64,
    pub max_spacing: f64,
    pub line_pool_capacity: usize,
    /// Spacing change per unit of wheel delta per second.
    pub scroll_sensitivity: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initial_spacing: 10.0,
            min_spacing: 3.0,
            max_spacing: 20.0,
            line_pool_capacity: 100,
            scroll_sensitivity: 1000.0,
        }
    }
}

impl GridConfig {
    pub fn validate(self) -> PlotResult<Self> {
        if !self.min_spacing.is_finite() || self.min_spacing <= 0.0 {
            return Err(PlotError::InvalidData(
                "grid min spacing must be finite and > 0".to_owned(),
            ));
        }
        if !self.max_spacing.is_finite() || self.max_spacing <= self.min_spacing {
            return Err(PlotError::InvalidData(
                "grid max spacing must be finite and > min spacing".to_owned(),
            ));
        }
        if !self.initial_spacing.is_finite() {
            return Err(PlotError::InvalidData(
                "grid initial spacing must be finite".to_owned(),
            ));
        }
        if self.line_pool_capacity == 0 {
            return Err(PlotError::InvalidData(
                "line pool capacity must be > 0".to_owned(),
            ));
        }
        if !self.scroll_sensitivity.is_finite() || self.scroll_sensitivity < 0.0 {
            return Err(PlotError::InvalidData(
                "scroll sensitivity must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Extreme active lines of one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineExtremes {
    pub min: SlotId,
    pub max: SlotId,
    pub min_offset: f64,
    pub max_offset: f64,
}

/// Rectangle spanned by the outermost active grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn min_corner(self) -> GridPoint {
        GridPoint::new(self.min_x, self.min_y)
    }

    #[must_use]
    pub fn max_corner(self) -> GridPoint {
        GridPoint::new(self.max_x, self.max_y)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Line-count changes applied by one [`CoordinateGrid::reconcile`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub activated: usize,
    pub deactivated: usize,
}

impl ReconcileOutcome {
    #[must_use]
    pub fn is_noop(self) -> bool {
        self.activated == 0 && self.deactivated == 0
    }
}

/// Perpendicular offset of the line at `position` among `count` lines.
#[must_use]
pub fn line_offset(position: usize, count: usize, spacing: f64) -> f64 {
    let centre = (count as f64 - 1.0) / 2.0;
    (position as f64 - centre) * spacing
}

/// Active line counts a pool of `capacity` slots can give to `density`.
///
/// When the pool is large enough every orientation gets its full density.
/// Otherwise each orientation first keeps up to two lines, so the plot keeps a
/// bounding box, and the remaining slots are split in proportion to what each
/// orientation still lacks. The result depends only on the arguments.
#[must_use]
pub fn line_allocation(density: Density, capacity: usize) -> Density {
    if density.x.saturating_add(density.y) <= capacity {
        return density;
    }

    let base_y = density.y.min(2);
    let base_x = density.x.min(2);
    if base_x + base_y >= capacity {
        let y = base_y.min(capacity / 2);
        return Density::new(base_x.min(capacity - y), y);
    }

    let spare = capacity - base_x - base_y;
    let need_y = density.y - base_y;
    let need_x = density.x - base_x;
    let extra_y = (spare * need_y / (need_x + need_y)).min(need_y);
    let extra_x = (spare - extra_y).min(need_x);
    Density::new(base_x + extra_x, base_y + extra_y)
}

/// Zoomable grid centred on the viewport origin.
///
/// Only [`CoordinateGrid::new`] builds one, so spacing always sits inside the
/// zoom limits and the pool lists agree with the slot tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateGrid {
    viewport: Viewport,
    spacing: f64,
    min_spacing: f64,
    max_spacing: f64,
    scroll_sensitivity: f64,
    format: FormatMode,
    pool: LinePool,
}

impl CoordinateGrid {
    /// Builds the pool and brings it in line with the initial density.
    pub fn new(viewport: Viewport, config: GridConfig) -> PlotResult<Self> {
        let viewport = viewport.validate()?;
        let config = config.validate()?;
        let mut grid = Self {
            viewport,
            spacing: config
                .initial_spacing
                .clamp(config.min_spacing, config.max_spacing),
            min_spacing: config.min_spacing,
            max_spacing: config.max_spacing,
            scroll_sensitivity: config.scroll_sensitivity,
            format: FormatMode::default(),
            pool: LinePool::new(config.line_pool_capacity),
        };
        grid.reconcile();
        grid.layout();
        Ok(grid)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Host re-init after a resize. Takes effect on the next reconcile.
    pub fn resize(&mut self, viewport: Viewport) -> PlotResult<()> {
        self.viewport = viewport.validate()?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "grid viewport resized"
        );
        Ok(())
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn spacing_range(&self) -> (f64, f64) {
        (self.min_spacing, self.max_spacing)
    }

    #[must_use]
    pub fn format(&self) -> FormatMode {
        self.format
    }

    pub fn set_format(&mut self, format: FormatMode) {
        self.format = format;
    }

    #[must_use]
    pub fn pool(&self) -> &LinePool {
        &self.pool
    }

    #[must_use]
    pub fn density(&self) -> Density {
        let (width, height) = (f64::from(self.viewport.width), f64::from(self.viewport.height));
        Density::new(
            (width / self.spacing).round() as usize,
            (height / self.spacing).round() as usize,
        )
    }

    /// Adds `delta` to the spacing, clamped to the zoom limits.
    pub fn set_zoom(&mut self, delta: f64) -> PlotResult<f64> {
        if !delta.is_finite() {
            return Err(PlotError::InvalidData("zoom delta must be finite".to_owned()));
        }
        self.spacing = (self.spacing + delta).clamp(self.min_spacing, self.max_spacing);
        trace!(delta, spacing = self.spacing, "grid zoom delta applied");
        Ok(self.spacing)
    }

    /// Scroll-wheel zoom: `wheel_delta * dt_seconds * scroll_sensitivity`.
    pub fn scroll(&mut self, wheel_delta: f64, dt_seconds: f64) -> PlotResult<f64> {
        if !wheel_delta.is_finite() || !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return Err(PlotError::InvalidData(
                "scroll delta and frame time must be finite (frame time >= 0)".to_owned(),
            ));
        }
        if wheel_delta == 0.0 {
            return Ok(self.spacing);
        }
        self.set_zoom(wheel_delta * dt_seconds * self.scroll_sensitivity)
    }

    /// Sets spacing from a `[0, 1]` slider position; out-of-range input is clamped.
    pub fn set_zoom_percent(&mut self, percent: f64) -> PlotResult<()> {
        if !percent.is_finite() {
            return Err(PlotError::InvalidData(
                "zoom percent must be finite".to_owned(),
            ));
        }
        self.spacing = lerp(self.min_spacing, self.max_spacing, percent.clamp(0.0, 1.0));
        trace!(percent, spacing = self.spacing, "grid zoom percent applied");
        Ok(())
    }

    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        inverse_lerp(self.min_spacing, self.max_spacing, self.spacing)
    }

    /// Activates or deactivates pooled lines until the active counts match
    /// [`line_allocation`] for the current density.
    ///
    /// All deactivations run before any activation, so slots released by one
    /// orientation are available to the other within the same call.
    pub fn reconcile(&mut self) -> ReconcileOutcome {
        let density = self.density();
        let target = line_allocation(density, self.pool.capacity());
        let targets = [
            (LineOrientation::Horizontal, target.y),
            (LineOrientation::Vertical, target.x),
        ];

        let mut outcome = ReconcileOutcome::default();
        for (orientation, wanted) in targets {
            let current = self.pool.active_count(orientation);
            if wanted < current {
                outcome.deactivated += self.pool.deactivate(current - wanted, orientation);
            }
        }
        for (orientation, wanted) in targets {
            let current = self.pool.active_count(orientation);
            if wanted > current {
                outcome.activated += self.pool.activate(wanted - current, orientation);
            }
        }

        if !outcome.is_noop() {
            debug!(
                activated = outcome.activated,
                deactivated = outcome.deactivated,
                density_x = density.x,
                density_y = density.y,
                vertical = target.x,
                horizontal = target.y,
                "grid lines reconciled"
            );
        }
        outcome
    }

    /// Writes endpoint positions of every active grid line.
    pub fn layout(&mut self) {
        let (half_width, half_height) = self.viewport.half_extents();
        let spacing = self.spacing;
        for orientation in [LineOrientation::Horizontal, LineOrientation::Vertical] {
            let ids = self.pool.active(orientation).to_vec();
            let count = ids.len();
            for (position, id) in ids.into_iter().enumerate() {
                let Some((start, end)) =
                    line_endpoints(orientation, position, count, spacing, half_width, half_height)
                else {
                    continue;
                };
                if let Some(slot) = self.pool.slot_mut(id) {
                    slot.set_endpoints(start, end);
                }
            }
        }
    }

    /// Endpoints of the line at `position` in `orientation`'s active list.
    pub fn line_position(
        &self,
        orientation: LineOrientation,
        position: usize,
    ) -> PlotResult<(GridPoint, GridPoint)> {
        let (half_width, half_height) = self.viewport.half_extents();
        let count = self.pool.active_count(orientation);
        line_endpoints(orientation, position, count, self.spacing, half_width, half_height)
            .ok_or(PlotError::InvalidOrientation(orientation))
    }

    /// Minimum- and maximum-offset active lines of a grid orientation.
    ///
    /// Offsets grow with list position, so the extremes are the first and
    /// last active ids. `Ok(None)` while the orientation has no lines.
    pub fn extreme_lines(&self, orientation: LineOrientation) -> PlotResult<Option<LineExtremes>> {
        if !matches!(
            orientation,
            LineOrientation::Horizontal | LineOrientation::Vertical
        ) {
            return Err(PlotError::InvalidOrientation(orientation));
        }
        let active = self.pool.active(orientation);
        let (Some(min), Some(max)) = (active.first(), active.last()) else {
            return Ok(None);
        };
        let count = active.len();
        Ok(Some(LineExtremes {
            min: *min,
            max: *max,
            min_offset: line_offset(0, count, self.spacing),
            max_offset: line_offset(count - 1, count, self.spacing),
        }))
    }

    /// Plot rectangle, `None` while either orientation has no active lines.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let vertical = self.extreme_lines(LineOrientation::Vertical).ok().flatten()?;
        let horizontal = self
            .extreme_lines(LineOrientation::Horizontal)
            .ok()
            .flatten()?;
        Some(BoundingBox {
            min_x: vertical.min_offset,
            max_x: vertical.max_offset,
            min_y: horizontal.min_offset,
            max_y: horizontal.max_offset,
        })
    }
}

fn line_endpoints(
    orientation: LineOrientation,
    position: usize,
    count: usize,
    spacing: f64,
    half_width: f64,
    half_height: f64,
) -> Option<(GridPoint, GridPoint)> {
    let offset = line_offset(position, count, spacing);
    match orientation {
        LineOrientation::Horizontal => Some((
            GridPoint::new(-half_width, offset),
            GridPoint::new(half_width, offset),
        )),
        LineOrientation::Vertical => Some((
            GridPoint::new(offset, half_height),
            GridPoint::new(offset, -half_height),
        )),
        LineOrientation::Custom | LineOrientation::Inactive => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{CoordinateGrid, GridConfig, line_allocation, line_offset};
    use crate::core::{Density, LineOrientation, Viewport};

    fn grid(width: u32, height: u32) -> CoordinateGrid {
        CoordinateGrid::new(Viewport::new(width, height), GridConfig::default()).expect("grid")
    }

    #[test]
    fn offsets_are_centred_on_origin() {
        assert_eq!(line_offset(0, 3, 10.0), -10.0);
        assert_eq!(line_offset(1, 3, 10.0), 0.0);
        assert_eq!(line_offset(2, 3, 10.0), 10.0);
        assert_eq!(line_offset(0, 2, 10.0), -5.0);
    }

    #[test]
    fn layout_places_lines_across_opposite_axis() {
        let grid = grid(200, 100);
        let first = grid.pool().active(LineOrientation::Horizontal)[0];
        let (start, end) = grid
            .pool()
            .slot(first)
            .and_then(|slot| slot.endpoints())
            .expect("endpoints");
        assert_eq!(start.x, -100.0);
        assert_eq!(end.x, 100.0);
        assert_eq!(start.y, -45.0);

        let first_vertical = grid.pool().active(LineOrientation::Vertical)[0];
        let (top, bottom) = grid
            .pool()
            .slot(first_vertical)
            .and_then(|slot| slot.endpoints())
            .expect("endpoints");
        assert_eq!(top.y, 50.0);
        assert_eq!(bottom.y, -50.0);
        assert_eq!(top.x, -95.0);
    }

    #[test]
    fn line_position_rejects_custom_orientation() {
        let grid = grid(100, 100);
        assert!(grid.line_position(LineOrientation::Custom, 0).is_err());
        assert!(grid.line_position(LineOrientation::Horizontal, 0).is_ok());
    }

    #[test]
    fn invalid_zoom_limits_are_rejected() {
        let config = GridConfig {
            min_spacing: 5.0,
            max_spacing: 5.0,
            ..GridConfig::default()
        };
        assert!(CoordinateGrid::new(Viewport::new(10, 10), config).is_err());
    }

    #[test]
    fn allocation_fills_density_when_pool_allows() {
        assert_eq!(line_allocation(Density::new(20, 10), 100), Density::new(20, 10));
        assert_eq!(line_allocation(Density::new(20, 10), 30), Density::new(20, 10));
    }

    #[test]
    fn short_pool_is_split_by_remaining_need() {
        assert_eq!(line_allocation(Density::new(20, 10), 12), Density::new(8, 4));
        assert_eq!(line_allocation(Density::new(10, 2), 10), Density::new(8, 2));
        assert_eq!(line_allocation(Density::new(2, 10), 10), Density::new(2, 8));
        assert_eq!(line_allocation(Density::new(133, 100), 100), Density::new(57, 43));
    }

    #[test]
    fn tiny_pool_keeps_both_orientations() {
        assert_eq!(line_allocation(Density::new(50, 50), 3), Density::new(2, 1));
        assert_eq!(line_allocation(Density::new(50, 50), 4), Density::new(2, 2));
        assert_eq!(line_allocation(Density::new(0, 50), 4), Density::new(0, 4));
    }

    #[test]
    fn constructor_clamps_initial_spacing_into_zoom_limits() {
        let config = GridConfig {
            initial_spacing: 50.0,
            ..GridConfig::default()
        };
        let grid = CoordinateGrid::new(Viewport::new(200, 100), config).expect("grid");
        assert_eq!(grid.spacing(), 20.0);

        let config = GridConfig {
            initial_spacing: -1.0,
            ..GridConfig::default()
        };
        let grid = CoordinateGrid::new(Viewport::new(200, 100), config).expect("grid");
        assert_eq!(grid.spacing(), 3.0);
    }
}
