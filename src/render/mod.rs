mod frame;
mod null_renderer;
mod primitives;
mod svg;

pub use frame::{BarPrimitive, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, Paint, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};
pub use svg::{SvgRenderer, frame_to_svg};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart state and import logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
