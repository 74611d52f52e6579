use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{GridPoint, LineSlot, Series, SeriesId};
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Longest series name shown untruncated in host menus.
pub const MAX_LABEL_CHARS: usize = 20;

/// Menu label for a series name: at most [`MAX_LABEL_CHARS`] characters,
/// followed by `...` when cut.
#[must_use]
pub fn display_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        return name.to_owned();
    }
    let mut label: String = name.chars().take(MAX_LABEL_CHARS).collect();
    label.push_str("...");
    label
}

/// Marker drawn at one plotted point of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub position: GridPoint,
    pub visible: bool,
}

/// Curve, keyframes, color and visibility of one active series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesVisualState {
    curve: LineSlot,
    keyframes: Vec<Keyframe>,
    visible: bool,
    color: Color,
}

impl SeriesVisualState {
    fn new(color: Color) -> Self {
        Self {
            curve: LineSlot::custom(),
            keyframes: Vec::new(),
            visible: true,
            color,
        }
    }

    #[must_use]
    pub fn curve(&self) -> &LineSlot {
        &self.curve
    }

    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.curve.set_visible(visible);
        for keyframe in &mut self.keyframes {
            keyframe.visible = visible;
        }
    }

    /// Replaces the curve and resizes the keyframes to match it one-to-one.
    pub(crate) fn apply_points(&mut self, points: &[GridPoint]) {
        self.curve.set_points(points.iter().copied());
        let visible = self.visible;
        self.keyframes.clear();
        self.keyframes.extend(points.iter().map(|position| Keyframe {
            position: *position,
            visible,
        }));
    }
}

/// One registered series and the state drawn for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    series: Series,
    visual: SeriesVisualState,
}

impl SeriesEntry {
    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn visual(&self) -> &SeriesVisualState {
        &self.visual
    }

    pub(crate) fn visual_mut(&mut self) -> &mut SeriesVisualState {
        &mut self.visual
    }

    #[must_use]
    pub fn label(&self) -> String {
        display_label(self.series.name())
    }
}

/// Ordered, capacity-bounded set of active series.
///
/// The order index of a series decides its palette color; colors are
/// reassigned for every series whenever the order changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRegistry {
    capacity: usize,
    palette: Vec<Color>,
    entries: IndexMap<SeriesId, SeriesEntry>,
    next_id: u32,
}

impl SeriesRegistry {
    pub fn new(capacity: usize, palette: Vec<Color>) -> PlotResult<Self> {
        if capacity == 0 {
            return Err(PlotError::InvalidData(
                "series capacity must be > 0".to_owned(),
            ));
        }
        if palette.is_empty() {
            return Err(PlotError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        Ok(Self {
            capacity,
            palette,
            entries: IndexMap::with_capacity(capacity),
            next_id: 0,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Appends `series` at the end of the order.
    pub fn add(&mut self, series: Series) -> PlotResult<SeriesId> {
        if self.is_full() {
            warn!(
                capacity = self.capacity,
                name = series.name(),
                "series rejected: registry full"
            );
            return Err(PlotError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let id = SeriesId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let color = self.palette_color(self.entries.len());
        debug!(%id, name = series.name(), samples = series.len(), "series added");
        self.entries.insert(
            id,
            SeriesEntry {
                series,
                visual: SeriesVisualState::new(color),
            },
        );
        self.recolor();
        Ok(id)
    }

    /// Removes `id`, keeping the relative order of the others.
    pub fn remove(&mut self, id: SeriesId) -> PlotResult<Series> {
        let entry = self
            .entries
            .shift_remove(&id)
            .ok_or(PlotError::UnknownSeries(id))?;
        self.recolor();
        debug!(%id, remaining = self.entries.len(), "series removed");
        Ok(entry.series)
    }

    /// Shows or hides the curve and every keyframe of `id`.
    pub fn set_visible(&mut self, id: SeriesId, visible: bool) -> PlotResult<()> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(PlotError::UnknownSeries(id))?;
        entry.visual.set_visible(visible);
        debug!(%id, visible, "series visibility changed");
        Ok(())
    }

    /// Flips visibility of `id` and returns the new state.
    pub fn toggle_visible(&mut self, id: SeriesId) -> PlotResult<bool> {
        let visible = !self
            .entries
            .get(&id)
            .ok_or(PlotError::UnknownSeries(id))?
            .visual
            .is_visible();
        self.set_visible(id, visible)?;
        Ok(visible)
    }

    /// Latest sample time across every active series, `0.0` when none.
    ///
    /// Scans all samples on each call; sized for small files.
    #[must_use]
    pub fn max_time(&self) -> f64 {
        self.entries
            .values()
            .flat_map(|entry| entry.series.samples())
            .map(|sample| OrderedFloat(sample.time))
            .fold(OrderedFloat(0.0), std::cmp::max)
            .into_inner()
    }

    #[must_use]
    pub fn get(&self, id: SeriesId) -> Option<&SeriesEntry> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: SeriesId) -> Option<&mut SeriesEntry> {
        self.entries.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: SeriesId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn order_index(&self, id: SeriesId) -> Option<usize> {
        self.entries.get_index_of(&id)
    }

    #[must_use]
    pub fn color_of(&self, id: SeriesId) -> Option<Color> {
        self.entries.get(&id).map(|entry| entry.visual.color())
    }

    /// Series ids in order.
    #[must_use]
    pub fn ids(&self) -> Vec<SeriesId> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &SeriesEntry)> + '_ {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    fn palette_color(&self, order_index: usize) -> Color {
        self.palette[order_index % self.palette.len()]
    }

    fn recolor(&mut self) {
        let palette = &self.palette;
        for (order_index, entry) in self.entries.values_mut().enumerate() {
            entry.visual.color = palette[order_index % palette.len()];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SeriesRegistry, display_label};
    use crate::api::DEFAULT_PALETTE;
    use crate::core::{GridPoint, Sample, Series};

    fn series(name: &str) -> Series {
        Series::new(name, vec![Sample::new(0.0, 1.0), Sample::new(4.0, 2.0)]).expect("series")
    }

    #[test]
    fn long_names_are_truncated_for_labels() {
        assert_eq!(display_label("short"), "short");
        assert_eq!(
            display_label("a_really_long_dataset_name"),
            "a_really_long_datase..."
        );
    }

    #[test]
    fn keyframes_follow_curve_length_and_visibility() {
        let mut registry = SeriesRegistry::new(6, DEFAULT_PALETTE.to_vec()).expect("registry");
        let id = registry.add(series("a")).expect("add");
        registry.set_visible(id, false).expect("hide");

        let entry = registry.get_mut(id).expect("entry");
        entry
            .visual_mut()
            .apply_points(&[GridPoint::new(0.0, 0.0), GridPoint::new(1.0, 1.0)]);

        let visual = registry.get(id).expect("entry").visual();
        assert_eq!(visual.keyframes().len(), 2);
        assert!(visual.keyframes().iter().all(|keyframe| !keyframe.visible));
        assert!(!visual.curve().is_visible());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut registry = SeriesRegistry::new(2, DEFAULT_PALETTE.to_vec()).expect("registry");
        let first = registry.add(series("a")).expect("add");
        registry.remove(first).expect("remove");
        let second = registry.add(series("b")).expect("add");
        assert_ne!(first, second);
    }
}
