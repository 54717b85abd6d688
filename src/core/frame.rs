use kurbo::{Point, Rect};

use crate::core::scale::PixelRange;
use crate::core::types::{AxisId, Orientation, PlotRect};

/// Orientation-aware view of the plot area.
///
/// Geometry code speaks in "category" and "value" coordinates; the frame is the
/// only place that knows which of them is x and which is y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateFrame {
    pub orientation: Orientation,
    pub plot: PlotRect,
}

impl CoordinateFrame {
    #[must_use]
    pub const fn new(orientation: Orientation, plot: PlotRect) -> Self {
        Self { orientation, plot }
    }

    #[must_use]
    pub fn category_axis(self) -> AxisId {
        match self.orientation {
            Orientation::Vertical => AxisId::X,
            Orientation::Horizontal => AxisId::Y,
        }
    }

    #[must_use]
    pub fn value_axis(self) -> AxisId {
        match self.orientation {
            Orientation::Vertical => AxisId::Y,
            Orientation::Horizontal => AxisId::X,
        }
    }

    /// Pixel start of the category axis (left edge or top edge).
    #[must_use]
    pub fn category_start(self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.plot.x,
            Orientation::Horizontal => self.plot.y,
        }
    }

    /// Length of the category axis in pixels.
    #[must_use]
    pub fn category_extent(self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.plot.width,
            Orientation::Horizontal => self.plot.height,
        }
    }

    /// Pixel range of the value axis, oriented from the domain minimum to the maximum.
    #[must_use]
    pub fn value_range(self) -> PixelRange {
        match self.orientation {
            Orientation::Vertical => PixelRange::new(self.plot.bottom(), self.plot.y),
            Orientation::Horizontal => PixelRange::new(self.plot.x, self.plot.right()),
        }
    }

    /// Screen point for a `(category, value)` pixel pair.
    #[must_use]
    pub fn point(self, category_px: f64, value_px: f64) -> Point {
        match self.orientation {
            Orientation::Vertical => Point::new(category_px, value_px),
            Orientation::Horizontal => Point::new(value_px, category_px),
        }
    }

    /// Screen rectangle covering `[category_px, category_px + thickness]` on the
    /// category axis and the span between two value pixels.
    #[must_use]
    pub fn rect(self, category_px: f64, thickness: f64, value_a: f64, value_b: f64) -> Rect {
        let (value_lo, value_hi) = if value_a <= value_b {
            (value_a, value_b)
        } else {
            (value_b, value_a)
        };
        match self.orientation {
            Orientation::Vertical => {
                Rect::new(category_px, value_lo, category_px + thickness, value_hi)
            }
            Orientation::Horizontal => {
                Rect::new(value_lo, category_px, value_hi, category_px + thickness)
            }
        }
    }

    /// Line across the plot at a value-axis pixel (grid lines).
    #[must_use]
    pub fn value_line(self, value_px: f64) -> (Point, Point) {
        let start = self.category_start();
        let end = start + self.category_extent();
        (self.point(start, value_px), self.point(end, value_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_frame_swaps_axes() {
        let plot = PlotRect::new(10.0, 20.0, 300.0, 200.0);
        let vertical = CoordinateFrame::new(Orientation::Vertical, plot);
        let horizontal = CoordinateFrame::new(Orientation::Horizontal, plot);

        assert_eq!(vertical.category_extent(), 300.0);
        assert_eq!(horizontal.category_extent(), 200.0);
        assert_eq!(vertical.value_range(), PixelRange::new(220.0, 20.0));
        assert_eq!(horizontal.value_range(), PixelRange::new(10.0, 310.0));
        assert_eq!(horizontal.point(50.0, 70.0), Point::new(70.0, 50.0));
    }

    #[test]
    fn rect_normalizes_value_span() {
        let frame = CoordinateFrame::new(Orientation::Vertical, PlotRect::new(0.0, 0.0, 100.0, 100.0));
        let rect = frame.rect(10.0, 20.0, 80.0, 30.0);
        assert_eq!(rect, Rect::new(10.0, 30.0, 30.0, 80.0));
    }
}
