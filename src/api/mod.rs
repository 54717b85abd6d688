//! Chart model and the layout pass that turns it into a [`RenderFrame`](crate::render::RenderFrame).

mod axis_label_format;
mod chart_state;
mod data_item;
mod json_contract;
mod layout_cache;
mod palette;
mod render_frame_builder;
mod style;
mod validation;

pub use axis_label_format::{MAX_TICK_FRACTION_DIGITS, format_tick_label};
pub use chart_state::{ChartState, MAX_ITEM_ID};
pub use data_item::{DataItem, ItemId};
pub use json_contract::{CHART_STATE_JSON_SCHEMA_V1, ChartStateJsonContractV1, STORAGE_KEY};
pub use layout_cache::{LayoutCache, LayoutCacheStats};
pub use palette::{PALETTE, palette_color};
pub use render_frame_builder::{
    ERROR_CAP_RATIO, TICK_MARK_LENGTH_PX, build_export_frame, build_render_frame, error_span,
    value_extent,
};
pub use style::{AxisConfig, AxisLabelLocale, ErrorBarMode, ExportOptions, StyleConfig};
pub use validation::validate_item;
