use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests catch invalid geometry without a
/// real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_bar_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_pattern_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_bar_count = frame.bars.len();
        self.last_line_count = frame.grid_lines.len() + frame.lines.len();
        self.last_text_count = frame.texts.len();
        self.last_pattern_count = frame.patterns.len();
        Ok(())
    }
}
