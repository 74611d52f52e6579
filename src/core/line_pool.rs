use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::GridPoint;

/// Role a line slot currently plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineOrientation {
    Horizontal,
    Vertical,
    /// Free-form polyline owned by a series curve.
    Custom,
    Inactive,
}

/// Index of a slot inside its [`LinePool`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(u32);

impl SlotId {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn as_index(self) -> usize {
        self.0 as usize
    }
}

/// Reusable line: two endpoints for grid lines, any number for curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSlot {
    orientation: LineOrientation,
    index: usize,
    points: SmallVec<[GridPoint; 2]>,
    visible: bool,
}

impl LineSlot {
    fn inactive() -> Self {
        Self {
            orientation: LineOrientation::Inactive,
            index: 0,
            points: SmallVec::from_buf([GridPoint::default(); 2]),
            visible: false,
        }
    }

    /// Empty, visible curve slot.
    #[must_use]
    pub fn custom() -> Self {
        Self {
            orientation: LineOrientation::Custom,
            index: 0,
            points: SmallVec::new(),
            visible: true,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> LineOrientation {
        self.orientation
    }

    /// Position inside the orientation's active list. Only meaningful for
    /// horizontal and vertical slots.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// First and last point, if the slot has any.
    #[must_use]
    pub fn endpoints(&self) -> Option<(GridPoint, GridPoint)> {
        Some((*self.points.first()?, *self.points.last()?))
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_endpoints(&mut self, start: GridPoint, end: GridPoint) {
        self.points.clear();
        self.points.push(start);
        self.points.push(end);
    }

    pub fn set_points(&mut self, points: impl IntoIterator<Item = GridPoint>) {
        self.points.clear();
        self.points.extend(points);
    }
}

/// Fixed-capacity arena of grid-line slots.
///
/// Slots are allocated once and only move between the free list and the
/// per-orientation active lists. Every transition is a pop from one stack and
/// a push onto another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePool {
    slots: Vec<LineSlot>,
    free: Vec<SlotId>,
    horizontal: Vec<SlotId>,
    vertical: Vec<SlotId>,
}

impl LinePool {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(u32::MAX as usize);
        Self {
            slots: (0..capacity).map(|_| LineSlot::inactive()).collect(),
            free: (0..capacity as u32).map(SlotId).collect(),
            horizontal: Vec::with_capacity(capacity),
            vertical: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub fn active_count(&self, orientation: LineOrientation) -> usize {
        self.active(orientation).len()
    }

    /// Active slot ids in list order. `Inactive` yields the free list and
    /// `Custom` is never pooled.
    #[must_use]
    pub fn active(&self, orientation: LineOrientation) -> &[SlotId] {
        match orientation {
            LineOrientation::Horizontal => &self.horizontal,
            LineOrientation::Vertical => &self.vertical,
            LineOrientation::Inactive => &self.free,
            LineOrientation::Custom => &[],
        }
    }

    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&LineSlot> {
        self.slots.get(id.as_index())
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> Option<&mut LineSlot> {
        self.slots.get_mut(id.as_index())
    }

    /// Moves up to `count` free slots into `orientation`'s active list.
    ///
    /// Returns how many slots moved; stops quietly once the free list is empty.
    pub fn activate(&mut self, count: usize, orientation: LineOrientation) -> usize {
        let Some(target) = self.pooled_list(orientation) else {
            return 0;
        };
        let target_len = target.len();
        let moved = count.min(self.free.len());

        for offset in 0..moved {
            let Some(id) = self.free.pop() else {
                break;
            };
            let slot = &mut self.slots[id.as_index()];
            slot.orientation = orientation;
            slot.index = target_len + offset;
            slot.visible = true;
            self.push_active(orientation, id);
        }

        if moved < count {
            trace!(
                requested = count,
                moved,
                ?orientation,
                "line pool exhausted during activation"
            );
        }
        moved
    }

    /// Moves up to `count` slots from the end of `orientation`'s active list
    /// back to the free list.
    pub fn deactivate(&mut self, count: usize, orientation: LineOrientation) -> usize {
        let mut moved = 0;
        while moved < count {
            let Some(id) = self.pooled_list(orientation).and_then(Vec::pop) else {
                break;
            };
            let slot = &mut self.slots[id.as_index()];
            slot.orientation = LineOrientation::Inactive;
            slot.visible = false;
            self.free.push(id);
            moved += 1;
        }
        moved
    }

    /// Visible grid lines of both orientations.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &LineSlot)> + '_ {
        self.horizontal
            .iter()
            .chain(self.vertical.iter())
            .map(|id| (*id, &self.slots[id.as_index()]))
    }

    fn pooled_list(&mut self, orientation: LineOrientation) -> Option<&mut Vec<SlotId>> {
        match orientation {
            LineOrientation::Horizontal => Some(&mut self.horizontal),
            LineOrientation::Vertical => Some(&mut self.vertical),
            LineOrientation::Custom | LineOrientation::Inactive => None,
        }
    }

    fn push_active(&mut self, orientation: LineOrientation, id: SlotId) {
        if let Some(list) = self.pooled_list(orientation) {
            list.push(id);
        }
    }
}
