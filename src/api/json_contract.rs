use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{AxisConfig, ChartState, DataItem, ItemId, StyleConfig, palette_color};

/// Key hosts store the persisted chart state under.
pub const STORAGE_KEY: &str = "bar-chart-state-v1";
pub const CHART_STATE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStateJsonContractV1 {
    pub schema_version: u32,
    pub state: ChartState,
}

impl ChartState {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartStateJsonContractV1 {
            schema_version: CHART_STATE_JSON_SCHEMA_V1,
            state: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize chart state contract v1: {e}"))
        })
    }

    /// Strict load: accepts a bare state or a v1 contract, rejects anything else.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let loaded = match serde_json::from_str::<ChartStateJsonContractV1>(input) {
            Ok(payload) if payload.schema_version != CHART_STATE_JSON_SCHEMA_V1 => {
                return Err(ChartError::InvalidData(format!(
                    "unsupported chart state schema version: {}",
                    payload.schema_version
                )));
            }
            Ok(payload) => payload.state,
            Err(_) => serde_json::from_str::<ChartState>(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse chart state json payload: {e}"))
            })?,
        };
        Ok(loaded)
    }

    /// Lenient load for untrusted storage: never fails.
    ///
    /// Every field is read on its own; a missing or corrupt field keeps its
    /// default, items that are not objects are dropped, and an empty item list
    /// falls back to the default items.
    #[must_use]
    pub fn from_json_lenient(input: &str) -> Self {
        let value: Value = match serde_json::from_str(input) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "stored chart state is not json, using defaults");
                return Self::default();
            }
        };
        let root = match (value.get("schema_version"), value.get("state")) {
            (Some(_), Some(state)) => state,
            _ => &value,
        };
        let Some(object) = root.as_object() else {
            warn!("stored chart state is not an object, using defaults");
            return Self::default();
        };

        let style = object
            .get("style")
            .and_then(Value::as_object)
            .map_or_else(StyleConfig::default, lenient_style)
            .sanitized();
        let items: Vec<DataItem> = object
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| lenient_item(index, item, &style))
                    .collect()
            })
            .unwrap_or_default();

        let mut state = Self::from_parts(items, style);
        if let Some(next_id) = object.get("next_id").and_then(Value::as_u64) {
            state.set_next_id(next_id);
        }
        state
    }
}

fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str, fallback: T) -> T {
    match object.get(key) {
        None => fallback,
        Some(raw) => T::deserialize(raw).unwrap_or_else(|err| {
            warn!(field = key, error = %err, "ignoring corrupt persisted field");
            fallback
        }),
    }
}

fn color_field(object: &Map<String, Value>, key: &str, fallback: &str) -> String {
    let value: String = field(object, key, fallback.to_owned());
    if Color::from_hex(&value).is_ok() {
        value
    } else {
        warn!(field = key, value = %value, "ignoring invalid persisted color");
        fallback.to_owned()
    }
}

fn lenient_style(object: &Map<String, Value>) -> StyleConfig {
    let d = StyleConfig::default();
    StyleConfig {
        canvas: field(object, "canvas", d.canvas),
        padding: field(object, "padding", d.padding),
        orientation: field(object, "orientation", d.orientation),
        gap_ratio: field(object, "gap_ratio", d.gap_ratio),
        corner_radius: field(object, "corner_radius", d.corner_radius),
        corner_style: field(object, "corner_style", d.corner_style),
        opacity: field(object, "opacity", d.opacity),
        border_width: field(object, "border_width", d.border_width),
        border_color: color_field(object, "border_color", &d.border_color),
        error_bar_mode: field(object, "error_bar_mode", d.error_bar_mode),
        error_bar_color: color_field(object, "error_bar_color", &d.error_bar_color),
        error_bar_width: field(object, "error_bar_width", d.error_bar_width),
        show_value_labels: field(object, "show_value_labels", d.show_value_labels),
        value_label_font_size: field(object, "value_label_font_size", d.value_label_font_size),
        title: field(object, "title", d.title),
        title_font_size: field(object, "title_font_size", d.title_font_size),
        title_offset: field(object, "title_offset", d.title_offset),
        x_axis: lenient_axis(object.get("x_axis"), d.x_axis),
        y_axis: lenient_axis(object.get("y_axis"), d.y_axis),
        tick_count: field(object, "tick_count", d.tick_count),
        locale: field(object, "locale", d.locale),
        background_color: color_field(object, "background_color", &d.background_color),
        text_color: color_field(object, "text_color", &d.text_color),
        axis_color: color_field(object, "axis_color", &d.axis_color),
        grid_color: color_field(object, "grid_color", &d.grid_color),
        export: field(object, "export", d.export),
    }
}

fn lenient_axis(value: Option<&Value>, d: AxisConfig) -> AxisConfig {
    let Some(object) = value.and_then(Value::as_object) else {
        return d;
    };
    AxisConfig {
        title: field(object, "title", d.title),
        title_font_size: field(object, "title_font_size", d.title_font_size),
        title_offset: field(object, "title_offset", d.title_offset),
        tick_font_size: field(object, "tick_font_size", d.tick_font_size),
        tick_offset: field(object, "tick_offset", d.tick_offset),
        show_line: field(object, "show_line", d.show_line),
        show_ticks: field(object, "show_ticks", d.show_ticks),
        show_grid: field(object, "show_grid", d.show_grid),
        show_labels: field(object, "show_labels", d.show_labels),
        min: field(object, "min", d.min),
        max: field(object, "max", d.max),
        tick_step: field(object, "tick_step", d.tick_step),
    }
}

fn lenient_item(index: usize, value: &Value, style: &StyleConfig) -> Option<DataItem> {
    let Some(object) = value.as_object() else {
        warn!(index, "dropping persisted item that is not an object");
        return None;
    };
    let d = DataItem {
        fill_color: palette_color(index).to_owned(),
        opacity: style.opacity,
        border_width: style.border_width,
        border_color: style.border_color.clone(),
        ..DataItem::default()
    };

    let finite = |key: &str, fallback: f64| {
        let value: f64 = field(object, key, fallback);
        if value.is_finite() { value } else { fallback }
    };
    Some(DataItem {
        id: ItemId(object.get("id").and_then(Value::as_u64).unwrap_or(0)),
        label: field(object, "label", d.label.clone()),
        value: finite("value", d.value),
        error: finite("error", d.error).abs(),
        fill_color: color_field(object, "fill_color", &d.fill_color),
        border_color: color_field(object, "border_color", &d.border_color),
        border_width: finite("border_width", d.border_width).max(0.0),
        opacity: finite("opacity", d.opacity).clamp(0.0, 1.0),
        pattern: field(object, "pattern", d.pattern),
        pattern_color: color_field(object, "pattern_color", &d.pattern_color),
        pattern_opacity: finite("pattern_opacity", d.pattern_opacity).clamp(0.0, 1.0),
        pattern_size: finite("pattern_size", d.pattern_size),
    })
}
