use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::core::{
    BoundingBox, CoordinateGrid, Density, FormatMode, ReconcileOutcome, ResampleOptions, Series,
    SeriesId,
};
use crate::error::{PlotError, PlotResult};
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::build_render_frame;
use super::series_projection::{ProjectionContext, project_registry};
use super::{
    PlotEngineConfig, RenderStyle, SampleParser, SeriesRegistry, TextSampleParser,
    series_name_from_path,
};

/// Main orchestration context consumed by host applications.
///
/// `PlotEngine` owns the grid, the series registry and the renderer; every
/// component reaches the others through it. One tick runs
/// reconcile → layout → series projection → render to completion.
pub struct PlotEngine<R: Renderer> {
    renderer: R,
    grid: CoordinateGrid,
    registry: SeriesRegistry,
    parser: Box<dyn SampleParser + Send>,
    resample: ResampleOptions,
    style: RenderStyle,
}

impl<R: Renderer> PlotEngine<R> {
    pub fn new(renderer: R, config: PlotEngineConfig) -> PlotResult<Self> {
        config.validate()?;
        let mut grid = CoordinateGrid::new(config.viewport, config.grid)?;
        grid.set_format(config.format);
        let registry = SeriesRegistry::new(config.series_capacity, config.palette)?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            spacing = grid.spacing(),
            "plot engine initialized"
        );
        Ok(Self {
            renderer,
            grid,
            registry,
            parser: Box::new(TextSampleParser::default()),
            resample: config.resample,
            style: config.style,
        })
    }

    /// Replaces the parser used by [`Self::ingest`].
    #[must_use]
    pub fn with_parser(mut self, parser: impl SampleParser + Send + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    #[must_use]
    pub fn grid(&self) -> &CoordinateGrid {
        &self.grid
    }

    #[must_use]
    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: RenderStyle) -> PlotResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    #[must_use]
    pub fn resample_options(&self) -> ResampleOptions {
        self.resample
    }

    pub fn set_resample_options(&mut self, options: ResampleOptions) {
        self.resample = options;
        self.refresh_series();
    }

    /// One full update: grid reconcile and layout, series projection, render.
    pub fn tick(&mut self) -> PlotResult<ReconcileOutcome> {
        let outcome = self.update_layout();
        self.render()?;
        Ok(outcome)
    }

    /// Grid reconcile and layout followed by projection of every series.
    pub fn update_layout(&mut self) -> ReconcileOutcome {
        let outcome = self.grid.reconcile();
        self.grid.layout();
        self.refresh_series();
        outcome
    }

    pub fn render(&mut self) -> PlotResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)?;
        trace!(
            lines = frame.lines.len(),
            curves = frame.polylines.len(),
            markers = frame.markers.len(),
            "frame rendered"
        );
        Ok(())
    }

    #[must_use]
    pub fn build_frame(&self) -> RenderFrame {
        build_render_frame(&self.grid, &self.registry, &self.style)
    }

    /// Host re-init after its plot area changed size.
    pub fn resize(&mut self, viewport: crate::core::Viewport) -> PlotResult<()> {
        self.grid.resize(viewport)?;
        self.update_layout();
        Ok(())
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.grid.spacing()
    }

    #[must_use]
    pub fn density(&self) -> Density {
        self.grid.density()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.grid.bounding_box()
    }

    /// Relative zoom; returns the new spacing.
    pub fn set_zoom(&mut self, delta: f64) -> PlotResult<f64> {
        self.grid.set_zoom(delta)
    }

    /// Scroll-wheel zoom scaled by frame time; returns the new spacing.
    pub fn scroll(&mut self, wheel_delta: f64, dt_seconds: f64) -> PlotResult<f64> {
        self.grid.scroll(wheel_delta, dt_seconds)
    }

    /// Absolute zoom from a `[0, 1]` slider.
    pub fn set_zoom_percent(&mut self, percent: f64) -> PlotResult<()> {
        self.grid.set_zoom_percent(percent)
    }

    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.grid.zoom_percent()
    }

    #[must_use]
    pub fn format(&self) -> FormatMode {
        self.grid.format()
    }

    /// Switches format mode and reprojects every series immediately.
    pub fn set_format(&mut self, format: FormatMode) {
        if self.grid.format() != format {
            debug!(?format, "format mode changed");
        }
        self.grid.set_format(format);
        self.refresh_series();
    }

    pub fn toggle_format(&mut self) -> FormatMode {
        let format = self.grid.format().toggled();
        self.set_format(format);
        format
    }

    /// Parses `raw_text` with the configured parser and registers the result.
    pub fn ingest(&mut self, name: &str, raw_text: &str) -> PlotResult<SeriesId> {
        self.ensure_capacity()?;
        let samples = self.parser.parse(raw_text)?;
        let series = Series::new(name, samples)?;
        self.add_series(series)
    }

    /// Reads a dataset file and registers it under its file name.
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) -> PlotResult<SeriesId> {
        let path = path.as_ref();
        self.ensure_capacity()?;
        let raw_text = fs::read_to_string(path)?;
        let name = series_name_from_path(path);
        debug!(path = %path.display(), name = %name, "dataset file read");
        self.ingest(&name, &raw_text)
    }

    pub fn add_series(&mut self, series: Series) -> PlotResult<SeriesId> {
        let id = self.registry.add(series)?;
        self.refresh_series();
        Ok(id)
    }

    pub fn remove_series(&mut self, id: SeriesId) -> PlotResult<Series> {
        let series = self.registry.remove(id)?;
        self.refresh_series();
        Ok(series)
    }

    pub fn set_series_visible(&mut self, id: SeriesId, visible: bool) -> PlotResult<()> {
        self.registry.set_visible(id, visible)
    }

    pub fn toggle_series_visible(&mut self, id: SeriesId) -> PlotResult<bool> {
        self.registry.toggle_visible(id)
    }

    fn ensure_capacity(&self) -> PlotResult<()> {
        if self.registry.is_full() {
            return Err(PlotError::CapacityExceeded {
                capacity: self.registry.capacity(),
            });
        }
        Ok(())
    }

    /// Reprojects curves and keyframes of every series against the current
    /// grid. Without a bounding box the previous geometry is kept.
    fn refresh_series(&mut self) {
        let Some(bounding_box) = self.grid.bounding_box() else {
            trace!("no active grid lines, series projection skipped");
            return;
        };
        let context = ProjectionContext {
            bounding_box,
            density: self.grid.density(),
            spacing: self.grid.spacing(),
            max_time: self.registry.max_time(),
            format: self.grid.format(),
            resample: self.resample,
        };

        for (id, points) in project_registry(&self.registry, &context) {
            if let Some(entry) = self.registry.get_mut(id) {
                entry.visual_mut().apply_points(&points);
            }
        }
    }
}
