#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use gridplot::PlotError;
use gridplot::api::{PlotEngine, PlotEngineConfig};
use gridplot::core::Viewport;
use gridplot::render::{CairoContextRenderer, CairoRenderer};

const DATASET: &str = "0 1\n2 4\n4 2\n6 5\n";

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 240).expect_err("invalid width must fail");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_grid_curve_and_caption() {
    let renderer = CairoRenderer::new(200, 100).expect("renderer");
    let config = PlotEngineConfig::new(Viewport::new(200, 100));
    let mut engine = PlotEngine::new(renderer, config).expect("engine init");
    engine.ingest("wave", DATASET).expect("ingest");
    engine.tick().expect("tick");

    let stats = engine.into_renderer().last_stats();
    assert_eq!(stats.lines_drawn, 30);
    assert_eq!(stats.polylines_drawn, 1);
    assert_eq!(stats.markers_drawn, 4);
    assert_eq!(stats.texts_drawn, 1);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(320, 200).expect("renderer");
    let mut engine = PlotEngine::new(renderer, PlotEngineConfig::new(Viewport::new(320, 200)))
        .expect("engine init");
    engine.ingest("wave", DATASET).expect("ingest");
    engine.update_layout();
    let frame = engine.build_frame();

    let surface = ImageSurface::create(Format::ARgb32, 320, 200).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = engine.into_renderer();
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on external context");
    assert_eq!(renderer.last_stats().polylines_drawn, 1);
}

#[test]
fn cairo_renderer_writes_png() {
    let mut engine = PlotEngine::new(
        CairoRenderer::new(120, 80).expect("renderer"),
        PlotEngineConfig::new(Viewport::new(120, 80)),
    )
    .expect("engine init");
    engine.tick().expect("tick");

    let mut bytes = Vec::new();
    engine.renderer().write_png(&mut bytes).expect("png");
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
