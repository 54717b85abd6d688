use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};

use crate::core::types::Orientation;

/// Which bar corners get rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    /// Only the value end: the top for vertical bars, the right edge for horizontal ones.
    #[default]
    Top,
    /// Every corner.
    Both,
}

/// Clamps `radius` to at most half of the rectangle's shorter side.
#[must_use]
pub fn clamp_corner_radius(rect: Rect, radius: f64) -> f64 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    let limit = rect.width().abs().min(rect.height().abs()) * 0.5;
    radius.min(limit).max(0.0)
}

/// Builds a rounded bar outline.
///
/// Returns `None` when the clamped radius is zero; callers draw a plain rectangle
/// then. Corners are quadratic curves whose control point is the rectangle corner
/// itself, which approximates a circular arc.
#[must_use]
pub fn rounded_bar_path(
    rect: Rect,
    radius: f64,
    style: CornerStyle,
    orientation: Orientation,
) -> Option<BezPath> {
    let rect = rect.abs();
    let r = clamp_corner_radius(rect, radius);
    if r <= 0.0 {
        return None;
    }

    let Rect { x0, y0, x1, y1 } = rect;
    let mut path = BezPath::new();
    match (style, orientation) {
        (CornerStyle::Both, _) => {
            path.move_to((x0 + r, y0));
            path.line_to((x1 - r, y0));
            path.quad_to((x1, y0), (x1, y0 + r));
            path.line_to((x1, y1 - r));
            path.quad_to((x1, y1), (x1 - r, y1));
            path.line_to((x0 + r, y1));
            path.quad_to((x0, y1), (x0, y1 - r));
            path.line_to((x0, y0 + r));
            path.quad_to((x0, y0), (x0 + r, y0));
        }
        (CornerStyle::Top, Orientation::Vertical) => {
            path.move_to((x0, y1));
            path.line_to((x0, y0 + r));
            path.quad_to((x0, y0), (x0 + r, y0));
            path.line_to((x1 - r, y0));
            path.quad_to((x1, y0), (x1, y0 + r));
            path.line_to((x1, y1));
        }
        (CornerStyle::Top, Orientation::Horizontal) => {
            path.move_to((x0, y0));
            path.line_to((x1 - r, y0));
            path.quad_to((x1, y0), (x1, y0 + r));
            path.line_to((x1, y1 - r));
            path.quad_to((x1, y1), (x1 - r, y1));
            path.line_to((x0, y1));
        }
    }
    path.close_path();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn quad_control_points(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|element| match element {
                kurbo::PathEl::QuadTo(control, _) => Some(*control),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn radius_is_clamped_to_half_the_short_side() {
        let rect = Rect::new(0.0, 0.0, 10.0, 40.0);
        assert_eq!(clamp_corner_radius(rect, 20.0), 5.0);
        assert_eq!(clamp_corner_radius(rect, 3.0), 3.0);
        assert_eq!(clamp_corner_radius(rect, -1.0), 0.0);
    }

    #[test]
    fn zero_radius_yields_no_path() {
        let rect = Rect::new(0.0, 0.0, 10.0, 40.0);
        assert!(rounded_bar_path(rect, 0.0, CornerStyle::Top, Orientation::Vertical).is_none());
        let flat = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(rounded_bar_path(flat, 4.0, CornerStyle::Both, Orientation::Vertical).is_none());
    }

    #[test]
    fn top_style_rounds_top_for_vertical_and_right_for_horizontal() {
        let rect = Rect::new(0.0, 0.0, 20.0, 50.0);
        let vertical = rounded_bar_path(rect, 4.0, CornerStyle::Top, Orientation::Vertical)
            .expect("vertical path");
        assert_eq!(
            quad_control_points(&vertical),
            vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0)]
        );

        let horizontal = rounded_bar_path(rect, 4.0, CornerStyle::Top, Orientation::Horizontal)
            .expect("horizontal path");
        assert_eq!(
            quad_control_points(&horizontal),
            vec![Point::new(20.0, 0.0), Point::new(20.0, 50.0)]
        );
    }

    #[test]
    fn both_style_rounds_all_four_corners() {
        let rect = Rect::new(5.0, 5.0, 25.0, 45.0);
        let path = rounded_bar_path(rect, 100.0, CornerStyle::Both, Orientation::Horizontal)
            .expect("path");
        assert_eq!(quad_control_points(&path).len(), 4);
        assert_eq!(path.elements().first(), Some(&kurbo::PathEl::MoveTo(Point::new(15.0, 5.0))));
    }
}
