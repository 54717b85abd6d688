use approx::assert_relative_eq;
use bar_chart_rs::core::{
    AxisBound, BarDatum, BarLayoutConfig, CoordinateFrame, CornerStyle, LinearScale, Orientation,
    PatternKind, PixelRange, PlotRect, TickRequest, TickScale, TileAccent, generate_ticks,
    layout_bars, pattern_tile, rounded_bar_path, to_pixel, to_value,
};
use bar_chart_rs::render::Color;
use kurbo::{PathEl, Rect};

#[test]
fn generate_ticks_widens_degenerate_domain() {
    let ticks = generate_ticks(5.0, 5.0);
    assert!(ticks.len() >= 2);
    assert!(ticks[0] < ticks[ticks.len() - 1]);
    assert!(ticks[0] <= 4.0 && ticks[ticks.len() - 1] >= 6.0);
}

#[test]
fn explicit_bounds_and_step_are_honored_exactly() {
    let scale = TickScale::resolve(TickRequest::auto(0.0, 87.0).with_bounds(
        AxisBound::Value(3.0),
        AxisBound::Value(17.0),
        AxisBound::Value(5.0),
    ));
    assert_eq!(scale.ticks, vec![3.0, 5.0, 10.0, 15.0, 17.0]);
    assert_eq!(scale.axis_min, 3.0);
    assert_eq!(scale.axis_max, 17.0);
}

#[test]
fn explicit_max_may_clip_data() {
    let scale = TickScale::resolve(TickRequest::auto(0.0, 250.0).with_bounds(
        AxisBound::Auto,
        AxisBound::Value(100.0),
        AxisBound::Auto,
    ));
    assert_eq!(scale.axis_max, 100.0);
    assert_eq!(scale.axis_min, 0.0);
}

#[test]
fn mapper_round_trips_and_clamps() {
    let range = PixelRange::new(400.0, 40.0);
    let px = to_pixel(25.0, 0.0, 100.0, range);
    assert_relative_eq!(px, 310.0, epsilon = 1e-9);
    assert_relative_eq!(to_value(px, 0.0, 100.0, range), 25.0, epsilon = 1e-9);

    assert_eq!(to_pixel(-50.0, 0.0, 100.0, range), 400.0);
    assert_eq!(to_pixel(500.0, 0.0, 100.0, range), 40.0);
    assert!(LinearScale::new(1.0, 1.0).is_err());
}

#[test]
fn bars_share_the_category_extent() {
    let plot = PlotRect::new(72.0, 48.0, 600.0, 300.0);
    let frame = CoordinateFrame::new(Orientation::Vertical, plot);
    let scale = LinearScale::new(0.0, 10.0).expect("scale");
    let data: Vec<BarDatum> = (0..6).map(|i| BarDatum::new(i as f64, 1.0, 0.0)).collect();
    let bars = layout_bars(&data, frame, scale, BarLayoutConfig::default());

    let total: f64 = bars.iter().map(|bar| bar.thickness + bar.gap()).sum();
    assert_relative_eq!(total, 600.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].x, 72.0 + 10.0, epsilon = 1e-9);
    assert_relative_eq!(bars[5].center, 72.0 + 550.0, epsilon = 1e-9);
}

#[test]
fn horizontal_rounded_end_is_the_right_edge() {
    let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
    let path = rounded_bar_path(rect, 6.0, CornerStyle::Top, Orientation::Horizontal)
        .expect("rounded path");
    let controls: Vec<(f64, f64)> = path
        .elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::QuadTo(control, _) => Some((control.x, control.y)),
            _ => None,
        })
        .collect();
    assert_eq!(controls.len(), 2);
    assert!(controls.contains(&(100.0, 0.0)));
    assert!(controls.contains(&(100.0, 20.0)));

    assert!(rounded_bar_path(rect, 0.0, CornerStyle::Both, Orientation::Vertical).is_none());
}

#[test]
fn pattern_tiles_scale_with_tile_size() {
    let accent = Color::rgb(1.0, 1.0, 1.0);
    let base = Color::rgb(0.0, 0.0, 0.0);
    let tile = pattern_tile(PatternKind::Vertical, 10.0, accent, 0.5, base).expect("tile");
    assert_eq!(tile.accents.len(), 1);
    match tile.accents[0] {
        TileAccent::Line { width, .. } => assert_relative_eq!(width, 1.8, epsilon = 1e-12),
        TileAccent::Dot { .. } => panic!("vertical tiles use lines"),
    }
    assert!(pattern_tile(PatternKind::Solid, 10.0, accent, 0.5, base).is_none());
    let tiny = pattern_tile(PatternKind::Dots, 0.5, accent, 0.5, base).expect("tile");
    assert_eq!(tiny.size, 2.0);
}
