use bar_chart_rs::api::{CHART_STATE_JSON_SCHEMA_V1, ChartState, ItemId, STORAGE_KEY};
use bar_chart_rs::core::{AxisBound, Orientation};

#[test]
fn contract_snapshot_survives_a_reload() {
    let mut state = ChartState::default();
    let id = state.add_item();
    state.set_focus(Some(id));
    state.set_orientation(Orientation::Horizontal);

    let json = state.to_json_contract_v1_pretty().expect("serialize");
    let payload: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(payload["schema_version"], CHART_STATE_JSON_SCHEMA_V1);
    assert!(payload["state"].get("focus").is_none());

    let restored = ChartState::from_json_compat_str(&json).expect("reload");
    assert_eq!(restored.items(), state.items());
    assert_eq!(restored.style(), state.style());
    assert_eq!(restored.focus(), None);

    let mut restored = restored;
    let next = restored.add_item();
    assert!(next.0 > id.0, "ids are never reused after a reload");
}

#[test]
fn bare_state_payload_is_accepted() {
    let json = r#"{"items": [{"id": 1, "label": "solo", "value": 3}], "next_id": 2}"#;
    let state = ChartState::from_json_compat_str(json).expect("bare payload");
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].label, "solo");
    assert_eq!(state.next_id(), 2);
}

#[test]
fn lenient_reload_keeps_valid_fields_around_corrupt_ones() {
    let json = r##"{
        "schema_version": 1,
        "state": {
            "items": [
                {"id": 10, "label": "kept", "value": 4.5, "fill_color": "#123456"},
                {"id": 11, "label": "broken", "value": null, "opacity": 7}
            ],
            "style": {
                "title": "Quarterly",
                "tick_count": "many",
                "background_color": "blue-ish",
                "x_axis": {"min": "auto", "tick_step": 2}
            }
        }
    }"##;
    let state = ChartState::from_json_lenient(json);
    assert_eq!(state.items().len(), 2);
    assert_eq!(state.items()[0].fill_color, "#123456");
    assert_eq!(state.items()[1].id, ItemId(11));
    assert_eq!(state.items()[1].value, 0.0);
    assert_eq!(state.items()[1].opacity, 1.0);

    let style = state.style();
    assert_eq!(style.title, "Quarterly");
    assert_eq!(style.background_color, "#ffffff");
    assert_eq!(style.x_axis.min, AxisBound::Auto);
    assert_eq!(style.x_axis.tick_step, AxisBound::Value(2.0));
    state.build_render_frame().expect("recovered state renders");
}

#[test]
fn storage_key_is_versioned() {
    assert!(STORAGE_KEY.ends_with("-v1"));
}
