use approx::assert_abs_diff_eq;
use gridplot::api::{PlotEngine, PlotEngineConfig};
use gridplot::core::{FormatMode, Sample, Series, SeriesId, Viewport};
use gridplot::render::NullRenderer;

fn engine() -> PlotEngine<NullRenderer> {
    PlotEngine::new(
        NullRenderer::default(),
        PlotEngineConfig::new(Viewport::new(200, 100)),
    )
    .expect("engine")
}

fn add(engine: &mut PlotEngine<NullRenderer>, name: &str, pairs: &[(f64, f64)]) -> SeriesId {
    let samples = pairs.iter().copied().map(Sample::from).collect();
    engine
        .add_series(Series::new(name, samples).expect("series"))
        .expect("add")
}

fn curve(engine: &PlotEngine<NullRenderer>, id: SeriesId) -> Vec<(f64, f64)> {
    engine
        .registry()
        .get(id)
        .expect("entry")
        .visual()
        .curve()
        .points()
        .iter()
        .map(|point| (point.x, point.y))
        .collect()
}

#[test]
fn origin_sample_lands_on_bounding_box_min_corner() {
    let mut engine = engine();
    let id = add(&mut engine, "origin", &[(0.0, 0.0)]);
    engine.tick().expect("tick");

    let bounds = engine.bounding_box().expect("bounds");
    assert_eq!(curve(&engine, id), vec![(bounds.min_x, bounds.min_y)]);
}

#[test]
fn default_mode_shares_time_scale_across_series() {
    let mut engine = engine();
    let long = add(&mut engine, "long", &[(0.0, 1.0), (10.0, 2.0)]);
    let short = add(&mut engine, "short", &[(0.0, 4.0), (5.0, 8.0)]);
    engine.tick().expect("tick");

    let long_curve = curve(&engine, long);
    assert_abs_diff_eq!(long_curve[1].0, 95.0);
    assert_abs_diff_eq!(long_curve[1].1, 45.0);

    let short_curve = curve(&engine, short);
    assert_abs_diff_eq!(short_curve[1].0, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(short_curve[1].1, 45.0);
    assert_abs_diff_eq!(short_curve[0].1, 0.0, epsilon = 1e-9);
}

#[test]
fn normalized_mode_places_one_point_per_vertical_line() {
    let mut engine = engine();
    let id = add(&mut engine, "ramp", &[(0.0, 0.0), (10.0, 10.0)]);
    engine.set_format(FormatMode::Normalized);

    let density = engine.density();
    let points = curve(&engine, id);
    assert_eq!(points.len(), density.x);
    for (k, (x, _)) in points.iter().enumerate() {
        assert_abs_diff_eq!(*x, -95.0 + k as f64 * 10.0, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(points[0].1, -45.0);
    assert_abs_diff_eq!(
        points[density.x - 1].1,
        -45.0 + (density.y - 1) as f64 * 10.0,
        epsilon = 1e-9
    );
}

#[test]
fn format_toggle_reprojects_immediately() {
    let mut engine = engine();
    let id = add(&mut engine, "pair", &[(0.0, 0.0), (4.0, 2.0)]);
    assert_eq!(curve(&engine, id).len(), 2);

    assert_eq!(engine.toggle_format(), FormatMode::Normalized);
    assert_eq!(curve(&engine, id).len(), engine.density().x);

    assert_eq!(engine.toggle_format(), FormatMode::Default);
    assert_eq!(curve(&engine, id).len(), 2);
}

#[test]
fn zoom_change_reprojects_on_next_tick() {
    let mut engine = engine();
    let id = add(&mut engine, "pair", &[(0.0, 0.0), (4.0, 2.0)]);
    engine.tick().expect("tick");
    assert_eq!(curve(&engine, id)[1], (95.0, 45.0));

    engine.set_zoom_percent(1.0).expect("zoom");
    engine.tick().expect("tick");
    assert_eq!(curve(&engine, id)[1], (90.0, 40.0));
}

#[test]
fn keyframes_mirror_curve_points() {
    let mut engine = engine();
    let id = add(&mut engine, "tri", &[(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)]);
    engine.set_format(FormatMode::Normalized);

    let visual = engine.registry().get(id).expect("entry").visual();
    let keyframes: Vec<_> = visual
        .keyframes()
        .iter()
        .map(|keyframe| keyframe.position)
        .collect();
    assert_eq!(keyframes, visual.curve().points().to_vec());
}

#[test]
fn hidden_series_are_left_out_of_the_frame() {
    let mut engine = engine();
    let shown = add(&mut engine, "shown", &[(0.0, 0.0), (1.0, 1.0)]);
    let hidden = add(&mut engine, "hidden", &[(0.0, 1.0), (1.0, 0.0), (2.0, 1.0)]);
    engine.set_series_visible(hidden, false).expect("hide");
    engine.tick().expect("tick");

    let renderer = engine.renderer();
    assert_eq!(renderer.last_polyline_count, 1);
    assert_eq!(renderer.last_marker_count, 2);
    assert!(engine.registry().get(shown).expect("entry").visual().is_visible());
}

#[test]
fn empty_series_projects_to_nothing() {
    let mut engine = engine();
    let id = add(&mut engine, "empty", &[]);
    engine.tick().expect("tick");
    assert!(curve(&engine, id).is_empty());
    assert_eq!(engine.renderer().last_polyline_count, 0);
}

#[test]
fn finest_zoom_on_default_pool_still_projects_curves() {
    let config = PlotEngineConfig::new(Viewport::new(400, 300)).with_spacing(3.0, 3.0, 20.0);
    let mut engine = PlotEngine::new(NullRenderer::default(), config).expect("engine");
    let id = add(&mut engine, "pair", &[(0.0, 0.0), (4.0, 2.0)]);
    engine.tick().expect("tick");

    let bounds = engine.bounding_box().expect("plot area");
    assert_eq!(
        curve(&engine, id),
        vec![(bounds.min_x, bounds.min_y), (bounds.max_x, bounds.max_y)]
    );
    assert_eq!(engine.renderer().last_polyline_count, 1);
}
