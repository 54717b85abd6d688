use tracing::{trace, warn};

use crate::core::{
    BarDatum, BarGeometry, BarLayoutConfig, CoordinateFrame, LinearScale, Orientation, PixelRange,
    PlotRect, TickRequest, TickScale, layout_bars, pattern_tile, rounded_bar_path,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarPrimitive, Color, LinePrimitive, Paint, PathPrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive,
};

use super::{AxisConfig, ChartState, DataItem, ErrorBarMode, StyleConfig, format_tick_label};

pub const TICK_MARK_LENGTH_PX: f64 = 5.0;
/// Error-bar cap width as a fraction of bar thickness.
pub const ERROR_CAP_RATIO: f64 = 0.4;
const VALUE_LABEL_GAP_PX: f64 = 4.0;
const AXIS_STROKE_PX: f64 = 1.0;
const GRID_STROKE_PX: f64 = 1.0;

const FALLBACK_FILL: Color = Color::rgb(0.5, 0.5, 0.5);
const FALLBACK_INK: Color = Color::rgb(0.0, 0.0, 0.0);
const FALLBACK_BACKGROUND: Color = Color::rgb(1.0, 1.0, 1.0);

/// Value domain covered by the data: always includes `0` and, when error
/// bars are shown, every error-bar end.
#[must_use]
pub fn value_extent(items: &[DataItem], mode: ErrorBarMode) -> (f64, f64) {
    let mut min: f64 = 0.0;
    let mut max: f64 = 0.0;
    for item in items.iter().filter(|item| item.value.is_finite()) {
        min = min.min(item.value);
        max = max.max(item.value);
        if let Some((low, high)) = error_span(item.value, item.effective_error(), mode) {
            min = min.min(low);
            max = max.max(high);
        }
    }
    (min, max)
}

/// Value span of an error bar, `None` when nothing should be drawn.
///
/// `Upper` extends away from the baseline, so negative bars get a downward
/// whisker.
#[must_use]
pub fn error_span(value: f64, error: f64, mode: ErrorBarMode) -> Option<(f64, f64)> {
    if !value.is_finite() || !error.is_finite() || error <= 0.0 {
        return None;
    }
    let low = (value - error).max(f64::MIN);
    let high = (value + error).min(f64::MAX);
    match mode {
        ErrorBarMode::None => None,
        ErrorBarMode::Both => Some((low, high)),
        ErrorBarMode::Upper if value >= 0.0 => Some((value, high)),
        ErrorBarMode::Upper => Some((low, value)),
    }
}

/// Pure layout pass: turns the chart state into a backend-agnostic frame.
pub fn build_render_frame(state: &ChartState) -> ChartResult<RenderFrame> {
    let style = state.style();
    let items = state.items();
    let viewport = style.canvas;
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let plot = PlotRect::inset(viewport, style.padding);
    if !plot.is_valid() {
        return Err(ChartError::InvalidData(
            "padding leaves no room for the plot area".to_owned(),
        ));
    }

    let frame = CoordinateFrame::new(style.orientation, plot);
    let ink = Ink::resolve(style);
    let value_config = style.axis(frame.value_axis());
    let category_config = style.axis(frame.category_axis());

    let (data_min, data_max) = value_extent(items, style.error_bar_mode);
    let ticks = TickScale::resolve(TickRequest {
        data_min,
        data_max,
        min: value_config.min,
        max: value_config.max,
        step: value_config.tick_step,
        tick_count: style.tick_count,
    });
    let scale = LinearScale::new(ticks.axis_min, ticks.axis_max)?;
    let range = frame.value_range();

    let data: Vec<BarDatum> = items
        .iter()
        .map(|item| BarDatum::new(item.value, item.opacity, item.border_width))
        .collect();
    let bars = layout_bars(
        &data,
        frame,
        scale,
        BarLayoutConfig {
            gap_ratio: style.gap_ratio,
            default_opacity: style.opacity,
            default_border_width: style.border_width,
        },
    );

    let mut out = RenderFrame::new(viewport).with_background(ink.background);
    let axes = AxisPlacement::new(frame, range);

    if value_config.show_grid {
        for &tick in &ticks.ticks {
            let (start, end) = frame.value_line(scale.to_pixel(tick, range));
            out.grid_lines.push(LinePrimitive::new(
                start.x,
                start.y,
                end.x,
                end.y,
                GRID_STROKE_PX,
                ink.grid,
            ));
        }
    }
    if category_config.show_grid {
        for bar in &bars {
            let start = frame.point(bar.center, range.start);
            let end = frame.point(bar.center, range.end);
            out.grid_lines.push(LinePrimitive::new(
                start.x,
                start.y,
                end.x,
                end.y,
                GRID_STROKE_PX,
                ink.grid,
            ));
        }
    }

    for (item, bar) in items.iter().zip(&bars) {
        push_bar(&mut out, item, bar, style);
        push_error_bar(&mut out, item, bar, style, frame, scale, range, ink.error);
    }

    push_value_axis(&mut out, &ticks, scale, value_config, &axes, &ink, style);
    push_category_axis(&mut out, items, &bars, category_config, &axes, &ink);
    push_titles(&mut out, style, plot, &ink);
    if style.show_value_labels {
        push_value_labels(&mut out, items, &bars, style, frame, range, &ink);
    }

    trace!(
        bar_count = out.bars.len(),
        line_count = out.lines.len(),
        text_count = out.texts.len(),
        axis_min = ticks.axis_min,
        axis_max = ticks.axis_max,
        "built render frame"
    );
    Ok(out)
}

/// Frame for export: like [`build_render_frame`] but honors
/// `ExportOptions::transparent_background`.
pub fn build_export_frame(state: &ChartState) -> ChartResult<RenderFrame> {
    let mut frame = build_render_frame(state)?;
    if state.style().export.transparent_background {
        frame.background = None;
    }
    Ok(frame)
}

/// Resolved theme colors; invalid hex strings fall back with a warning.
struct Ink {
    background: Color,
    text: Color,
    axis: Color,
    grid: Color,
    error: Color,
}

impl Ink {
    fn resolve(style: &StyleConfig) -> Self {
        Self {
            background: resolve_color(&style.background_color, FALLBACK_BACKGROUND, "background"),
            text: resolve_color(&style.text_color, FALLBACK_INK, "text"),
            axis: resolve_color(&style.axis_color, FALLBACK_INK, "axis"),
            grid: resolve_color(&style.grid_color, FALLBACK_FILL, "grid"),
            error: resolve_color(&style.error_bar_color, FALLBACK_INK, "error_bar"),
        }
    }
}

fn resolve_color(hex: &str, fallback: Color, field: &'static str) -> Color {
    match Color::from_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            warn!(field, error = %err, "invalid color, using fallback");
            fallback
        }
    }
}

/// Where the value axis and category labels sit, in frame coordinates.
struct AxisPlacement {
    frame: CoordinateFrame,
    range: PixelRange,
    /// Category-axis pixel the value axis is drawn at.
    value_anchor: f64,
    /// Direction (along the category axis) pointing away from the plot at `value_anchor`.
    value_outward: f64,
    /// Direction (along the value axis) pointing away from the plot below category labels.
    category_outward: f64,
}

impl AxisPlacement {
    fn new(frame: CoordinateFrame, range: PixelRange) -> Self {
        let (value_anchor, value_outward) = match frame.orientation {
            Orientation::Vertical => (frame.category_start(), -1.0),
            Orientation::Horizontal => (frame.category_start() + frame.category_extent(), 1.0),
        };
        Self {
            frame,
            range,
            value_anchor,
            value_outward,
            category_outward: -value_outward,
        }
    }
}

fn push_bar(out: &mut RenderFrame, item: &DataItem, bar: &BarGeometry, style: &StyleConfig) {
    let fill_color = resolve_color(&item.fill_color, FALLBACK_FILL, "fill");
    let fill = match pattern_tile(
        item.pattern,
        item.pattern_size,
        resolve_color(&item.pattern_color, FALLBACK_BACKGROUND, "pattern"),
        item.pattern_opacity,
        fill_color,
    ) {
        Some(tile) => {
            let id = format!("bar-pattern-{}", item.id);
            out.register_pattern(id.clone(), tile);
            Paint::Pattern(id)
        }
        None => Paint::Solid(fill_color),
    };
    let border_color = resolve_color(&item.border_color, FALLBACK_INK, "border");

    let rect = bar.rect();
    let primitive = match rounded_bar_path(
        rect,
        style.corner_radius,
        style.corner_style,
        style.orientation,
    ) {
        Some(path) => BarPrimitive::Path(
            PathPrimitive::new(path, fill)
                .with_opacity(bar.opacity)
                .with_border(bar.border_width, border_color),
        ),
        None => BarPrimitive::Rect(
            RectPrimitive::new(rect.x0, rect.y0, rect.width(), rect.height(), fill)
                .with_opacity(bar.opacity)
                .with_border(bar.border_width, border_color),
        ),
    };
    out.bars.push(primitive);
}

#[allow(clippy::too_many_arguments)]
fn push_error_bar(
    out: &mut RenderFrame,
    item: &DataItem,
    bar: &BarGeometry,
    style: &StyleConfig,
    frame: CoordinateFrame,
    scale: LinearScale,
    range: PixelRange,
    color: Color,
) {
    let Some((low, high)) = error_span(item.value, item.effective_error(), style.error_bar_mode)
    else {
        return;
    };
    let width = if style.error_bar_width.is_finite() && style.error_bar_width > 0.0 {
        style.error_bar_width
    } else {
        1.0
    };
    let low_px = scale.to_pixel(low, range);
    let high_px = scale.to_pixel(high, range);
    let half_cap = bar.thickness * ERROR_CAP_RATIO * 0.5;

    let segments = [
        (bar.center, low_px, bar.center, high_px),
        (bar.center - half_cap, low_px, bar.center + half_cap, low_px),
        (bar.center - half_cap, high_px, bar.center + half_cap, high_px),
    ];
    for (cat_a, value_a, cat_b, value_b) in segments {
        let a = frame.point(cat_a, value_a);
        let b = frame.point(cat_b, value_b);
        out.lines
            .push(LinePrimitive::new(a.x, a.y, b.x, b.y, width, color));
    }
}

fn push_value_axis(
    out: &mut RenderFrame,
    ticks: &TickScale,
    scale: LinearScale,
    config: &AxisConfig,
    axes: &AxisPlacement,
    ink: &Ink,
    style: &StyleConfig,
) {
    let frame = axes.frame;
    if config.show_line {
        let a = frame.point(axes.value_anchor, axes.range.start);
        let b = frame.point(axes.value_anchor, axes.range.end);
        out.lines
            .push(LinePrimitive::new(a.x, a.y, b.x, b.y, AXIS_STROKE_PX, ink.axis));
    }

    let align = match frame.orientation {
        Orientation::Vertical => TextHAlign::Right,
        Orientation::Horizontal => TextHAlign::Center,
    };
    for &tick in &ticks.ticks {
        let px = scale.to_pixel(tick, axes.range);
        if config.show_ticks {
            let a = frame.point(axes.value_anchor, px);
            let b = frame.point(
                axes.value_anchor + axes.value_outward * TICK_MARK_LENGTH_PX,
                px,
            );
            out.lines
                .push(LinePrimitive::new(a.x, a.y, b.x, b.y, AXIS_STROKE_PX, ink.axis));
        }
        if config.show_labels {
            let at = frame.point(axes.value_anchor + axes.value_outward * config.tick_offset, px);
            out.texts.push(TextPrimitive::new(
                format_tick_label(tick, style.locale),
                at.x,
                at.y,
                config.tick_font_size,
                ink.text,
                align,
            ));
        }
    }
}

fn push_category_axis(
    out: &mut RenderFrame,
    items: &[DataItem],
    bars: &[BarGeometry],
    config: &AxisConfig,
    axes: &AxisPlacement,
    ink: &Ink,
) {
    let frame = axes.frame;
    if config.show_line {
        if let Some(baseline_px) = bars.first().map(|bar| bar.baseline_px) {
            let (a, b) = frame.value_line(baseline_px);
            out.lines
                .push(LinePrimitive::new(a.x, a.y, b.x, b.y, AXIS_STROKE_PX, ink.axis));
        }
    }

    let edge = axes.range.start;
    let align = match frame.orientation {
        Orientation::Vertical => TextHAlign::Center,
        Orientation::Horizontal => TextHAlign::Right,
    };
    for (item, bar) in items.iter().zip(bars) {
        if config.show_ticks {
            let a = frame.point(bar.center, edge);
            let b = frame.point(bar.center, edge + axes.category_outward * TICK_MARK_LENGTH_PX);
            out.lines
                .push(LinePrimitive::new(a.x, a.y, b.x, b.y, AXIS_STROKE_PX, ink.axis));
        }
        let label = item.label.trim();
        if config.show_labels && !label.is_empty() {
            let at = frame.point(bar.center, edge + axes.category_outward * config.tick_offset);
            out.texts.push(TextPrimitive::new(
                label,
                at.x,
                at.y,
                config.tick_font_size,
                ink.text,
                align,
            ));
        }
    }
}

fn push_titles(out: &mut RenderFrame, style: &StyleConfig, plot: PlotRect, ink: &Ink) {
    let center_x = plot.x + plot.width * 0.5;
    let center_y = plot.y + plot.height * 0.5;

    let title = style.title.trim();
    if !title.is_empty() {
        out.texts.push(TextPrimitive::new(
            title,
            f64::from(style.canvas.width) * 0.5,
            style.title_offset,
            style.title_font_size,
            ink.text,
            TextHAlign::Center,
        ));
    }

    let x_title = style.x_axis.title.trim();
    if !x_title.is_empty() {
        out.texts.push(TextPrimitive::new(
            x_title,
            center_x,
            plot.bottom() + style.x_axis.title_offset,
            style.x_axis.title_font_size,
            ink.text,
            TextHAlign::Center,
        ));
    }

    let y_title = style.y_axis.title.trim();
    if !y_title.is_empty() {
        out.texts.push(
            TextPrimitive::new(
                y_title,
                plot.x - style.y_axis.title_offset,
                center_y,
                style.y_axis.title_font_size,
                ink.text,
                TextHAlign::Center,
            )
            .rotated(-90.0),
        );
    }
}

fn push_value_labels(
    out: &mut RenderFrame,
    items: &[DataItem],
    bars: &[BarGeometry],
    style: &StyleConfig,
    frame: CoordinateFrame,
    range: PixelRange,
    ink: &Ink,
) {
    let growth = range.span().signum();
    let font_size = style.value_label_font_size;
    for (item, bar) in items.iter().zip(bars) {
        if !item.value.is_finite() {
            continue;
        }
        let away = if item.value < 0.0 { -growth } else { growth };
        let (offset, align) = match frame.orientation {
            Orientation::Vertical => (VALUE_LABEL_GAP_PX + font_size * 0.5, TextHAlign::Center),
            Orientation::Horizontal if away > 0.0 => (VALUE_LABEL_GAP_PX, TextHAlign::Left),
            Orientation::Horizontal => (VALUE_LABEL_GAP_PX, TextHAlign::Right),
        };
        let at = frame.point(bar.center, bar.value_px + away * offset);
        out.texts.push(TextPrimitive::new(
            format_tick_label(item.value, style.locale),
            at.x,
            at.y,
            font_size,
            ink.text,
            align,
        ));
    }
}
