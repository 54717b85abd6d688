//! bar-chart-rs: bar chart layout engine with a delimited-text import pipeline.
//!
//! Layout is a pure function from [`ChartState`] to a backend-agnostic
//! [`RenderFrame`](render::RenderFrame); import turns delimited text into
//! validated records the state can merge.

pub mod api;
pub mod core;
pub mod error;
pub mod import;
pub mod render;
pub mod telemetry;

pub use api::{ChartState, DataItem, ItemId, StyleConfig, build_render_frame};
pub use error::{ChartError, ChartResult};
