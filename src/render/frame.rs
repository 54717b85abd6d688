use indexmap::IndexMap;

use crate::core::{PatternTile, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, Paint, PathPrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// Draw order: background, `grid_lines`, `bars`, `lines` (axes, ticks, error
/// bars), `texts`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    /// `None` when exporting with a transparent background.
    pub background: Option<Color>,
    pub grid_lines: Vec<LinePrimitive>,
    pub bars: Vec<BarPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    /// Pattern tiles keyed by id, in first-use order.
    pub patterns: IndexMap<String, PatternTile>,
}

/// A bar is a plain rectangle unless it has rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub enum BarPrimitive {
    Rect(RectPrimitive),
    Path(PathPrimitive),
}

impl BarPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Rect(rect) => rect.validate(),
            Self::Path(path) => path.validate(),
        }
    }

    #[must_use]
    pub fn fill(&self) -> &Paint {
        match self {
            Self::Rect(rect) => &rect.fill,
            Self::Path(path) => &path.fill,
        }
    }
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: None,
            grid_lines: Vec::new(),
            bars: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            patterns: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_bar(mut self, bar: BarPrimitive) -> Self {
        self.bars.push(bar);
        self
    }

    /// Registers a pattern tile; an existing id keeps its first definition.
    pub fn register_pattern(&mut self, id: impl Into<String>, tile: PatternTile) {
        self.patterns.entry(id.into()).or_insert(tile);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if let Some(background) = self.background {
            background.validate()?;
        }

        for line in self.grid_lines.iter().chain(&self.lines) {
            line.validate()?;
        }
        for bar in &self.bars {
            bar.validate()?;
            if let Paint::Pattern(id) = bar.fill() {
                if !self.patterns.contains_key(id) {
                    return Err(ChartError::InvalidData(format!(
                        "bar references unknown pattern `{id}`"
                    )));
                }
            }
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid_lines.is_empty()
            && self.bars.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }
}
