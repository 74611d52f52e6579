use serde::{Deserialize, Serialize};

use crate::core::{FormatMode, GridConfig, ResampleOptions, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Maximum number of simultaneously plotted series.
pub const DEFAULT_SERIES_CAPACITY: usize = 6;

/// Series colors assigned by order index.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::rgb(1.0, 0.5, 0.5),
    Color::rgb(0.5, 1.0, 0.5),
    Color::rgb(0.5, 0.5, 1.0),
    Color::rgb(1.0, 0.0, 1.0),
    Color::rgb(1.0, 0.5, 0.0),
    Color::rgb(0.0, 1.0, 1.0),
];

/// Stroke widths, colors and label text of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    /// Color of the minimum-x and minimum-y lines framing the plot origin.
    pub axis_line_color: Color,
    pub axis_line_width: f64,
    pub curve_width: f64,
    pub keyframe_radius: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    /// Caption next to the plot origin; `None` hides it.
    pub axis_label: Option<String>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            grid_line_color: Color::rgba(0.6, 0.6, 0.6, 0.35),
            grid_line_width: 1.0,
            axis_line_color: Color::rgb(1.0, 1.0, 1.0),
            axis_line_width: 1.5,
            curve_width: 2.0,
            keyframe_radius: 2.5,
            label_color: Color::rgb(1.0, 1.0, 1.0),
            label_font_size_px: 10.0,
            axis_label: Some("time".to_owned()),
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> PlotResult<()> {
        for (value, name) in [
            (self.grid_line_width, "grid_line_width"),
            (self.axis_line_width, "axis_line_width"),
            (self.curve_width, "curve_width"),
            (self.keyframe_radius, "keyframe_radius"),
            (self.label_font_size_px, "label_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }
        self.grid_line_color.validate()?;
        self.axis_line_color.validate()?;
        self.label_color.validate()
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can keep their plot setup in a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default = "default_series_capacity")]
    pub series_capacity: usize,
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    #[serde(default)]
    pub format: FormatMode,
    #[serde(default)]
    pub resample: ResampleOptions,
    #[serde(default)]
    pub style: RenderStyle,
}

impl PlotEngineConfig {
    /// Creates a config with default zoom limits, palette and style.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            grid: GridConfig::default(),
            series_capacity: default_series_capacity(),
            palette: default_palette(),
            format: FormatMode::default(),
            resample: ResampleOptions::default(),
            style: RenderStyle::default(),
        }
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Sets initial spacing and its clamp range.
    #[must_use]
    pub fn with_spacing(mut self, initial: f64, min: f64, max: f64) -> Self {
        self.grid.initial_spacing = initial;
        self.grid.min_spacing = min;
        self.grid.max_spacing = max;
        self
    }

    #[must_use]
    pub fn with_line_pool_capacity(mut self, capacity: usize) -> Self {
        self.grid.line_pool_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_series_capacity(mut self, capacity: usize) -> Self {
        self.series_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: FormatMode) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_resample(mut self, resample: ResampleOptions) -> Self {
        self.resample = resample;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.viewport.validate()?;
        self.grid.validate()?;
        if self.series_capacity == 0 {
            return Err(PlotError::InvalidData(
                "series capacity must be > 0".to_owned(),
            ));
        }
        if self.palette.is_empty() {
            return Err(PlotError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &self.palette {
            color.validate()?;
        }
        self.style.validate()
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize config json: {e}")))
    }
}

fn default_series_capacity() -> usize {
    DEFAULT_SERIES_CAPACITY
}

fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.to_vec()
}
