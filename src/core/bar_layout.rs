use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::core::frame::CoordinateFrame;
use crate::core::scale::LinearScale;

/// Bars never get thinner than this, whatever the gap ratio says.
pub const MIN_BAR_THICKNESS_PX: f64 = 4.0;

/// Per-bar layout input. Opacity and border width may be non-finite when they
/// come from corrupt records; the layout falls back to the global defaults then.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarDatum {
    pub value: f64,
    pub opacity: f64,
    pub border_width: f64,
}

impl BarDatum {
    #[must_use]
    pub const fn new(value: f64, opacity: f64, border_width: f64) -> Self {
        Self {
            value,
            opacity,
            border_width,
        }
    }
}

/// Global settings shared by every bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayoutConfig {
    /// Fraction of each band left empty, in `[0, 1]`.
    pub gap_ratio: f64,
    pub default_opacity: f64,
    pub default_border_width: f64,
}

impl Default for BarLayoutConfig {
    fn default() -> Self {
        Self {
            gap_ratio: 0.2,
            default_opacity: 1.0,
            default_border_width: 0.0,
        }
    }
}

/// Deterministic bar geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Band midpoint along the category axis (labels and error bars).
    pub center: f64,
    pub band_start: f64,
    pub band_size: f64,
    pub thickness: f64,
    /// Value-axis pixel of the zero baseline (clamped into the plot).
    pub baseline_px: f64,
    /// Value-axis pixel of the bar end.
    pub value_px: f64,
    pub opacity: f64,
    pub border_width: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Empty part of the band around the bar; negative when the thickness floor kicked in.
    #[must_use]
    pub fn gap(self) -> f64 {
        self.band_size - self.thickness
    }
}

/// Lays out one bar per datum, in order, across the category axis of `frame`.
#[must_use]
pub fn layout_bars(
    data: &[BarDatum],
    frame: CoordinateFrame,
    scale: LinearScale,
    config: BarLayoutConfig,
) -> Vec<BarGeometry> {
    if data.is_empty() {
        return Vec::new();
    }

    let band = frame.category_extent().max(0.0) / data.len() as f64;
    let thickness = bar_thickness(band, config.gap_ratio);
    let value_range = frame.value_range();
    let baseline_px = scale.to_pixel(0.0, value_range);
    let default_opacity = resolve_unit(config.default_opacity, 1.0);
    let default_border_width = resolve_non_negative(config.default_border_width, 0.0);

    data.iter()
        .enumerate()
        .map(|(index, datum)| {
            let band_start = frame.category_start() + band * index as f64;
            let bar_start = band_start + (band - thickness) * 0.5;
            let value_px = scale.to_pixel(datum.value, value_range);
            let rect = frame.rect(bar_start, thickness, baseline_px, value_px);
            BarGeometry {
                x: rect.x0,
                y: rect.y0,
                width: rect.width(),
                height: rect.height(),
                center: band_start + band * 0.5,
                band_start,
                band_size: band,
                thickness,
                baseline_px,
                value_px,
                opacity: resolve_unit(datum.opacity, default_opacity),
                border_width: resolve_non_negative(datum.border_width, default_border_width),
            }
        })
        .collect()
}

/// `band - band * gap_ratio`, floored at [`MIN_BAR_THICKNESS_PX`].
#[must_use]
pub fn bar_thickness(band: f64, gap_ratio: f64) -> f64 {
    let gap_ratio = if gap_ratio.is_finite() {
        gap_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (band - band * gap_ratio).max(MIN_BAR_THICKNESS_PX)
}

fn resolve_unit(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

fn resolve_non_negative(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Orientation, PlotRect};

    fn frame(orientation: Orientation) -> CoordinateFrame {
        CoordinateFrame::new(orientation, PlotRect::new(0.0, 0.0, 400.0, 200.0))
    }

    #[test]
    fn vertical_bars_grow_up_from_baseline() {
        let scale = LinearScale::new(-50.0, 100.0).expect("scale");
        let bars = layout_bars(
            &[BarDatum::new(100.0, 1.0, 0.0), BarDatum::new(-50.0, 1.0, 0.0)],
            frame(Orientation::Vertical),
            scale,
            BarLayoutConfig {
                gap_ratio: 0.5,
                ..BarLayoutConfig::default()
            },
        );

        assert_eq!(bars.len(), 2);
        let baseline = 200.0 * (100.0 / 150.0);
        assert!((bars[0].baseline_px - baseline).abs() < 1e-9);
        assert_eq!(bars[0].y, 0.0);
        assert!((bars[0].height - baseline).abs() < 1e-9);
        assert!((bars[1].y - baseline).abs() < 1e-9);
        assert!((bars[1].y + bars[1].height - 200.0).abs() < 1e-9);
        assert_eq!(bars[0].thickness, 100.0);
        assert_eq!(bars[0].x, 50.0);
        assert_eq!(bars[1].center, 300.0);
    }

    #[test]
    fn horizontal_bars_grow_right_along_x() {
        let scale = LinearScale::new(0.0, 10.0).expect("scale");
        let bars = layout_bars(
            &[BarDatum::new(5.0, 1.0, 0.0)],
            frame(Orientation::Horizontal),
            scale,
            BarLayoutConfig {
                gap_ratio: 0.0,
                ..BarLayoutConfig::default()
            },
        );

        let bar = bars[0];
        assert_eq!(bar.x, 0.0);
        assert_eq!(bar.width, 200.0);
        assert_eq!(bar.y, 0.0);
        assert_eq!(bar.height, 200.0);
        assert_eq!(bar.center, 100.0);
    }

    #[test]
    fn thickness_is_floored_for_crowded_bands() {
        assert_eq!(bar_thickness(3.0, 0.0), MIN_BAR_THICKNESS_PX);
        assert_eq!(bar_thickness(100.0, 0.99), MIN_BAR_THICKNESS_PX);
        assert_eq!(bar_thickness(100.0, f64::NAN), 100.0);
    }

    #[test]
    fn corrupt_per_item_styles_fall_back_to_defaults() {
        let scale = LinearScale::new(0.0, 1.0).expect("scale");
        let bars = layout_bars(
            &[
                BarDatum::new(0.5, f64::NAN, f64::INFINITY),
                BarDatum::new(0.5, 0.25, 3.0),
            ],
            frame(Orientation::Vertical),
            scale,
            BarLayoutConfig {
                gap_ratio: 0.2,
                default_opacity: 0.8,
                default_border_width: 2.0,
            },
        );

        assert_eq!(bars[0].opacity, 0.8);
        assert_eq!(bars[0].border_width, 2.0);
        assert_eq!(bars[1].opacity, 0.25);
        assert_eq!(bars[1].border_width, 3.0);
    }
}
