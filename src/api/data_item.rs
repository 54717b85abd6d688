use serde::{Deserialize, Serialize};

use crate::core::PatternKind;

/// Stable item identity. Ids are allocated monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One bar: a labelled value with optional error and its own styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataItem {
    pub id: ItemId,
    pub label: String,
    pub value: f64,
    /// Non-negative error magnitude; `0` draws no error bar.
    pub error: f64,
    pub fill_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub opacity: f64,
    pub pattern: PatternKind,
    pub pattern_color: String,
    pub pattern_opacity: f64,
    pub pattern_size: f64,
}

impl Default for DataItem {
    fn default() -> Self {
        Self {
            id: ItemId(0),
            label: String::new(),
            value: 0.0,
            error: 0.0,
            fill_color: super::palette_color(0).to_owned(),
            border_color: "#333333".to_owned(),
            border_width: 0.0,
            opacity: 1.0,
            pattern: PatternKind::Solid,
            pattern_color: "#ffffff".to_owned(),
            pattern_opacity: 0.6,
            pattern_size: 8.0,
        }
    }
}

impl DataItem {
    #[must_use]
    pub fn new(id: ItemId, label: impl Into<String>, value: f64) -> Self {
        Self {
            id,
            label: label.into(),
            value,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: f64) -> Self {
        self.error = error;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill_color: impl Into<String>) -> Self {
        self.fill_color = fill_color.into();
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = pattern;
        self
    }

    /// Error magnitude usable for drawing: finite and non-negative, else `0`.
    #[must_use]
    pub fn effective_error(&self) -> f64 {
        if self.error.is_finite() {
            self.error.abs()
        } else {
            0.0
        }
    }
}
