use crate::core::{CoordinateGrid, GridPoint, LineOrientation, SlotId};
use crate::render::{
    LinePrimitive, MarkerPrimitive, PolylinePrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{RenderStyle, SeriesRegistry};

/// Offset of the axis caption from the plot origin, in pixels.
const AXIS_LABEL_OFFSET_PX: f64 = 5.0;

/// Materializes grid lines, visible curves, keyframes and the axis caption.
pub(crate) fn build_render_frame(
    grid: &CoordinateGrid,
    registry: &SeriesRegistry,
    style: &RenderStyle,
) -> RenderFrame {
    let mut frame = RenderFrame::new(grid.viewport());
    let axis_lines = origin_lines(grid);

    for (id, slot) in grid.pool().iter_active() {
        let Some((start, end)) = slot.endpoints() else {
            continue;
        };
        let (x1, y1) = frame.to_pixel(start);
        let (x2, y2) = frame.to_pixel(end);
        let (width, color) = if axis_lines.contains(&Some(id)) {
            (style.axis_line_width, style.axis_line_color)
        } else {
            (style.grid_line_width, style.grid_line_color)
        };
        frame.lines.push(LinePrimitive::new(x1, y1, x2, y2, width, color));
    }

    for (_, entry) in registry.iter() {
        let visual = entry.visual();
        if !visual.is_visible() {
            continue;
        }
        let curve = visual.curve();
        if !curve.points().is_empty() {
            let points = curve
                .points()
                .iter()
                .map(|point| frame.to_pixel(*point))
                .collect();
            frame.polylines.push(PolylinePrimitive {
                points,
                stroke_width: style.curve_width,
                color: visual.color(),
            });
        }
        for keyframe in visual.keyframes().iter().filter(|keyframe| keyframe.visible) {
            let (x, y) = frame.to_pixel(keyframe.position);
            frame.markers.push(MarkerPrimitive {
                x,
                y,
                radius: style.keyframe_radius,
                color: visual.color(),
            });
        }
    }

    if let (Some(label), Some(bounds)) = (style.axis_label.as_deref(), grid.bounding_box()) {
        if !label.is_empty() {
            let (x, y) = frame.to_pixel(GridPoint::new(bounds.min_x, bounds.min_y));
            frame.texts.push(TextPrimitive::new(
                label,
                x + AXIS_LABEL_OFFSET_PX,
                y + AXIS_LABEL_OFFSET_PX,
                style.label_font_size_px,
                style.label_color,
                TextHAlign::Left,
            ));
        }
    }

    frame
}

/// Minimum-offset vertical and horizontal lines.
fn origin_lines(grid: &CoordinateGrid) -> [Option<SlotId>; 2] {
    [LineOrientation::Vertical, LineOrientation::Horizontal].map(|orientation| {
        grid.extreme_lines(orientation)
            .ok()
            .flatten()
            .map(|extremes| extremes.min)
    })
}
