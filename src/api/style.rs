use serde::{Deserialize, Serialize};

use crate::core::{AxisBound, AxisId, CornerStyle, Orientation, Padding, Viewport};

/// Locale preset used by tick-label formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisLabelLocale {
    /// `1,234.5`
    #[default]
    EnUs,
    /// `1.234,5`
    EsEs,
}

/// How error bars are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorBarMode {
    #[default]
    None,
    /// `value ± error`.
    Both,
    /// From the bar end outward only.
    Upper,
}

/// Per-screen-axis presentation and bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub title: String,
    pub title_font_size: f64,
    /// Distance from the plot edge to the axis title.
    pub title_offset: f64,
    pub tick_font_size: f64,
    /// Distance from the plot edge to tick labels.
    pub tick_offset: f64,
    pub show_line: bool,
    pub show_ticks: bool,
    pub show_grid: bool,
    /// Tick labels along this axis (value ticks or category names).
    pub show_labels: bool,
    pub min: AxisBound,
    pub max: AxisBound,
    pub tick_step: AxisBound,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_font_size: 14.0,
            title_offset: 44.0,
            tick_font_size: 12.0,
            tick_offset: 12.0,
            show_line: true,
            show_ticks: true,
            show_grid: false,
            show_labels: true,
            min: AxisBound::Auto,
            max: AxisBound::Auto,
            tick_step: AxisBound::Auto,
        }
    }
}

/// Raster export settings handed to the export sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub scale: f64,
    pub transparent_background: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            transparent_background: false,
        }
    }
}

/// Global chart styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub canvas: Viewport,
    pub padding: Padding,
    pub orientation: Orientation,
    /// Fraction of each category band left empty, in `[0, 1]`.
    pub gap_ratio: f64,
    pub corner_radius: f64,
    pub corner_style: CornerStyle,
    pub opacity: f64,
    pub border_width: f64,
    pub border_color: String,
    pub error_bar_mode: ErrorBarMode,
    pub error_bar_color: String,
    pub error_bar_width: f64,
    pub show_value_labels: bool,
    pub value_label_font_size: f64,
    pub title: String,
    pub title_font_size: f64,
    pub title_offset: f64,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub tick_count: usize,
    pub locale: AxisLabelLocale,
    pub background_color: String,
    pub text_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub export: ExportOptions,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            canvas: Viewport::default(),
            padding: Padding::default(),
            orientation: Orientation::Vertical,
            gap_ratio: 0.2,
            corner_radius: 4.0,
            corner_style: CornerStyle::Top,
            opacity: 1.0,
            border_width: 0.0,
            border_color: "#333333".to_owned(),
            error_bar_mode: ErrorBarMode::None,
            error_bar_color: "#333333".to_owned(),
            error_bar_width: 1.5,
            show_value_labels: false,
            value_label_font_size: 11.0,
            title: String::new(),
            title_font_size: 18.0,
            title_offset: 24.0,
            x_axis: AxisConfig {
                title: "Category".to_owned(),
                ..AxisConfig::default()
            },
            y_axis: AxisConfig {
                title: "Value".to_owned(),
                title_offset: 52.0,
                show_grid: true,
                ..AxisConfig::default()
            },
            tick_count: crate::core::ticks::DEFAULT_TICK_COUNT,
            locale: AxisLabelLocale::EnUs,
            background_color: "#ffffff".to_owned(),
            text_color: "#222222".to_owned(),
            axis_color: "#444444".to_owned(),
            grid_color: "#e0e0e0".to_owned(),
            export: ExportOptions::default(),
        }
    }
}

impl StyleConfig {
    #[must_use]
    pub fn axis(&self, axis: AxisId) -> &AxisConfig {
        match axis {
            AxisId::X => &self.x_axis,
            AxisId::Y => &self.y_axis,
        }
    }

    /// Switches orientation, swapping axis presentation when it actually changes.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.swap_axis_presentation();
        }
    }

    /// Exchanges titles, font sizes, offsets and bounds between the x and y axes.
    ///
    /// Line/tick/grid/label toggles stay with the screen axis. Applying it twice is a no-op.
    pub fn swap_axis_presentation(&mut self) {
        let (x, y) = (&mut self.x_axis, &mut self.y_axis);
        std::mem::swap(&mut x.title, &mut y.title);
        std::mem::swap(&mut x.title_font_size, &mut y.title_font_size);
        std::mem::swap(&mut x.title_offset, &mut y.title_offset);
        std::mem::swap(&mut x.tick_font_size, &mut y.tick_font_size);
        std::mem::swap(&mut x.tick_offset, &mut y.tick_offset);
        std::mem::swap(&mut x.min, &mut y.min);
        std::mem::swap(&mut x.max, &mut y.max);
        std::mem::swap(&mut x.tick_step, &mut y.tick_step);
    }

    /// Replaces out-of-range numerics with defaults or clamps them.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.gap_ratio = unit_or(self.gap_ratio, defaults.gap_ratio);
        self.opacity = unit_or(self.opacity, defaults.opacity);
        self.corner_radius = non_negative_or(self.corner_radius, defaults.corner_radius);
        self.border_width = non_negative_or(self.border_width, defaults.border_width);
        self.error_bar_width = positive_or(self.error_bar_width, defaults.error_bar_width);
        self.value_label_font_size =
            positive_or(self.value_label_font_size, defaults.value_label_font_size);
        self.title_font_size = positive_or(self.title_font_size, defaults.title_font_size);
        self.title_offset = finite_or(self.title_offset, defaults.title_offset);
        self.tick_count = self.tick_count.clamp(2, 20);
        self.export.scale = positive_or(self.export.scale, defaults.export.scale);
        self.x_axis = self.x_axis.sanitized(&defaults.x_axis);
        self.y_axis = self.y_axis.sanitized(&defaults.y_axis);
        if !self.canvas.is_valid() {
            self.canvas = defaults.canvas;
        }
        self
    }
}

impl AxisConfig {
    fn sanitized(mut self, defaults: &Self) -> Self {
        self.title_font_size = positive_or(self.title_font_size, defaults.title_font_size);
        self.tick_font_size = positive_or(self.tick_font_size, defaults.tick_font_size);
        self.title_offset = finite_or(self.title_offset, defaults.title_offset);
        self.tick_offset = finite_or(self.tick_offset, defaults.tick_offset);
        self
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn unit_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
