use crate::error::{ChartError, ChartResult};
use crate::render::RenderFrame;

use super::{ChartState, DataItem, StyleConfig, build_render_frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes the last built frame, keyed on the fields layout reads
/// (items and style). Focus changes never invalidate it.
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<(Vec<DataItem>, StyleConfig)>,
    frame: Option<RenderFrame>,
    stats: LayoutCacheStats,
}

impl LayoutCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_for(&mut self, state: &ChartState) -> ChartResult<&RenderFrame> {
        let fresh = matches!(
            &self.key,
            Some((items, style)) if items.as_slice() == state.items() && style == state.style()
        );
        if fresh && self.frame.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            let frame = build_render_frame(state)?;
            self.key = Some((state.items().to_vec(), state.style().clone()));
            self.frame = Some(frame);
        }
        self.frame
            .as_ref()
            .ok_or_else(|| ChartError::InvalidData("layout cache holds no frame".to_owned()))
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.frame = None;
    }

    #[must_use]
    pub fn stats(&self) -> LayoutCacheStats {
        self.stats
    }
}
