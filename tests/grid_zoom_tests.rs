use approx::assert_abs_diff_eq;
use gridplot::PlotError;
use gridplot::core::{CoordinateGrid, Density, GridConfig, LineOrientation, Viewport};

fn grid(width: u32, height: u32) -> CoordinateGrid {
    CoordinateGrid::new(Viewport::new(width, height), GridConfig::default()).expect("grid init")
}

#[test]
fn density_rounds_viewport_over_spacing() {
    let mut grid = grid(205, 96);
    assert_eq!(grid.density(), Density::new(21, 10));

    grid.set_zoom_percent(1.0).expect("zoom");
    assert_eq!(grid.spacing(), 20.0);
    assert_eq!(grid.density(), Density::new(10, 5));
}

#[test]
fn zoom_delta_is_clamped_to_limits() {
    let mut grid = grid(200, 100);
    assert_eq!(grid.set_zoom(-100.0).expect("zoom"), 3.0);
    assert_eq!(grid.set_zoom(2.5).expect("zoom"), 5.5);
    assert_eq!(grid.set_zoom(1_000.0).expect("zoom"), 20.0);
    assert!(matches!(
        grid.set_zoom(f64::NAN),
        Err(PlotError::InvalidData(_))
    ));
}

#[test]
fn scroll_scales_wheel_delta_by_frame_time() {
    let mut grid = grid(200, 100);
    let spacing = grid.scroll(0.1, 0.016).expect("scroll");
    assert_abs_diff_eq!(spacing, 10.0 + 0.1 * 0.016 * 1000.0, epsilon = 1e-9);
    assert_eq!(grid.scroll(0.0, 0.016).expect("scroll"), spacing);
    assert!(grid.scroll(1.0, -1.0).is_err());
}

#[test]
fn zoom_percent_tracks_both_mutation_paths() {
    let mut grid = grid(200, 100);
    assert_abs_diff_eq!(grid.zoom_percent(), (10.0 - 3.0) / 17.0, epsilon = 1e-12);

    grid.set_zoom_percent(0.25).expect("percent");
    assert_abs_diff_eq!(grid.zoom_percent(), 0.25, epsilon = 1e-12);

    grid.set_zoom(17.0 * 0.5).expect("delta");
    assert_abs_diff_eq!(grid.zoom_percent(), 0.75, epsilon = 1e-12);

    grid.set_zoom_percent(4.0).expect("clamped percent");
    assert_abs_diff_eq!(grid.zoom_percent(), 1.0, epsilon = 1e-12);
}

#[test]
fn reconcile_follows_zoom_and_is_idempotent() {
    let mut grid = grid(200, 100);
    assert_eq!(grid.pool().active_count(LineOrientation::Vertical), 20);
    assert_eq!(grid.pool().active_count(LineOrientation::Horizontal), 10);

    grid.set_zoom_percent(1.0).expect("zoom out");
    let outcome = grid.reconcile();
    assert_eq!(outcome.deactivated, 15);
    assert_eq!(grid.pool().active_count(LineOrientation::Vertical), 10);
    assert_eq!(grid.pool().active_count(LineOrientation::Horizontal), 5);
    assert!(grid.reconcile().is_noop());
    assert_eq!(
        grid.pool().active_count(LineOrientation::Vertical)
            + grid.pool().active_count(LineOrientation::Horizontal)
            + grid.pool().inactive_count(),
        grid.pool().capacity()
    );
}

fn short_pool(capacity: usize) -> GridConfig {
    GridConfig {
        line_pool_capacity: capacity,
        ..GridConfig::default()
    }
}

fn active(grid: &CoordinateGrid) -> (usize, usize) {
    (
        grid.pool().active_count(LineOrientation::Horizontal),
        grid.pool().active_count(LineOrientation::Vertical),
    )
}

#[test]
fn exhausted_pool_degrades_without_failing() {
    let mut grid = CoordinateGrid::new(Viewport::new(200, 100), short_pool(12)).expect("grid init");
    // Density 20x10 on 12 slots: two each, the spare eight split by need.
    assert_eq!(active(&grid), (4, 8));
    assert_eq!(grid.pool().inactive_count(), 0);
    assert!(grid.reconcile().is_noop());
    assert!(grid.bounding_box().is_some());
}

#[test]
fn swapping_axes_on_short_pool_settles_in_one_reconcile() {
    let mut grid = CoordinateGrid::new(Viewport::new(100, 20), short_pool(10)).expect("grid init");
    assert_eq!(active(&grid), (2, 8));

    grid.resize(Viewport::new(20, 100)).expect("resize");
    let outcome = grid.reconcile();
    assert_eq!(outcome.deactivated, 6);
    assert_eq!(outcome.activated, 6);
    assert_eq!(active(&grid), (8, 2));
    assert!(grid.reconcile().is_noop());

    grid.layout();
    assert!(grid.bounding_box().is_some());
}

#[test]
fn pool_filled_by_one_axis_still_leaves_a_plot_area() {
    let config = GridConfig {
        initial_spacing: 3.0,
        ..GridConfig::default()
    };
    let grid = CoordinateGrid::new(Viewport::new(400, 300), config).expect("grid init");
    assert_eq!(grid.density(), Density::new(133, 100));
    assert_eq!(active(&grid), (43, 57));
    assert!(grid.bounding_box().is_some());
}

#[test]
fn short_pool_split_does_not_depend_on_zoom_history() {
    let fresh = CoordinateGrid::new(
        Viewport::new(400, 300),
        GridConfig {
            initial_spacing: 3.0,
            ..GridConfig::default()
        },
    )
    .expect("grid init");

    let mut zoomed = grid(400, 300);
    for percent in [1.0, 0.5, 0.0] {
        zoomed.set_zoom_percent(percent).expect("zoom");
        zoomed.reconcile();
    }
    assert_eq!(zoomed.spacing(), fresh.spacing());
    assert_eq!(active(&zoomed), active(&fresh));
    assert!(zoomed.reconcile().is_noop());
}

#[test]
fn bounding_box_matches_outermost_lines_after_reconcile() {
    let mut grid = grid(200, 100);
    let bounds = grid.bounding_box().expect("bounds");
    assert_abs_diff_eq!(bounds.min_x, -95.0);
    assert_abs_diff_eq!(bounds.max_x, 95.0);
    assert_abs_diff_eq!(bounds.min_y, -45.0);
    assert_abs_diff_eq!(bounds.max_y, 45.0);

    grid.set_zoom_percent(1.0).expect("zoom");
    grid.reconcile();
    grid.layout();
    let bounds = grid.bounding_box().expect("bounds");
    assert_abs_diff_eq!(bounds.min_x, -90.0);
    assert_abs_diff_eq!(bounds.max_y, 40.0);

    let vertical = grid
        .extreme_lines(LineOrientation::Vertical)
        .expect("valid orientation")
        .expect("lines");
    let (start, _) = grid
        .pool()
        .slot(vertical.min)
        .and_then(|slot| slot.endpoints())
        .expect("laid out");
    assert_abs_diff_eq!(start.x, bounds.min_x);
}

#[test]
fn custom_orientation_has_no_extremes() {
    let grid = grid(200, 100);
    assert!(matches!(
        grid.extreme_lines(LineOrientation::Custom),
        Err(PlotError::InvalidOrientation(LineOrientation::Custom))
    ));
    assert!(grid.extreme_lines(LineOrientation::Inactive).is_err());
}

#[test]
fn resize_changes_density_on_next_reconcile() {
    let mut grid = grid(200, 100);
    grid.resize(Viewport::new(100, 100)).expect("resize");
    assert_eq!(grid.density(), Density::new(10, 10));
    grid.reconcile();
    assert_eq!(grid.pool().active_count(LineOrientation::Vertical), 10);
    assert!(grid.resize(Viewport::new(0, 10)).is_err());
}
