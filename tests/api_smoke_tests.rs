use bar_chart_rs::api::{ChartState, LayoutCache, build_render_frame};
use bar_chart_rs::core::Orientation;
use bar_chart_rs::import::{Delimiter, ImportSession};
use bar_chart_rs::render::{NullRenderer, Renderer, SvgRenderer};

#[test]
fn editor_smoke_flow() {
    let mut state = ChartState::default();
    let added = state.add_item();
    let copy = state.duplicate_item(added).expect("duplicate");
    assert!(state.update_item(copy, |item| bar_chart_rs::DataItem {
        label: "Copy".to_owned(),
        value: -4.0,
        ..item.clone()
    }));
    assert!(state.move_item(copy, 0));
    assert_eq!(state.items()[0].label, "Copy");
    state.set_orientation(Orientation::Horizontal);

    let frame = build_render_frame(&state).expect("frame");
    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render should succeed");
    assert_eq!(renderer.last_bar_count, state.items().len());

    let mut cache = LayoutCache::new();
    let cached = cache.frame_for(&state).expect("cached frame");
    assert_eq!(cached, &frame);
}

#[test]
fn deleting_the_sole_item_leaves_one() {
    let mut state = ChartState::default();
    while state.items().len() > 1 {
        let id = state.items()[0].id;
        assert!(state.remove_item(id));
    }
    let last = state.items()[0].id;
    assert!(!state.remove_item(last));
    assert_eq!(state.items().len(), 1);
}

#[test]
fn import_to_svg_flow() {
    let session = ImportSession::new(
        "Name,Score,Error\nNorth,12.5,1\nSouth,-3,0.5\nEast,8,",
        Delimiter::Comma,
    );
    let outcome = session.import().expect("valid import");

    let mut state = ChartState::default();
    let ids = state.apply_import(&outcome.records);
    assert_eq!(ids.len(), 3);
    assert_eq!(state.items()[1].value, -3.0);

    let frame = build_render_frame(&state).expect("frame");
    let mut renderer = SvgRenderer::default();
    renderer.render(&frame).expect("svg render");
    let svg = renderer.last_document();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">North</text>"));
    assert!(svg.contains(">South</text>"));
}
