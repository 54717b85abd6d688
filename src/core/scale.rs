use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel interval an axis is drawn over. `end` may be smaller than `start`
/// (the vertical value axis grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, pixel: f64) -> bool {
        let (low, high) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        pixel >= low && pixel <= high
    }
}

/// Linear value-to-pixel mapping with a clamped ratio.
///
/// Out-of-domain values land on the nearest range end instead of extrapolating
/// off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps a data value into `range`; non-finite values map to `range.start`.
    #[must_use]
    pub fn to_pixel(self, value: f64, range: PixelRange) -> f64 {
        if !value.is_finite() {
            return range.start;
        }
        let span = self.domain_end - self.domain_start;
        let ratio = if span.is_finite() {
            (value - self.domain_start) / span
        } else {
            // Halved operands keep spans wider than `f64::MAX` finite.
            let half_span = self.domain_end * 0.5 - self.domain_start * 0.5;
            (value * 0.5 - self.domain_start * 0.5) / half_span
        };
        range.start + ratio.clamp(0.0, 1.0) * range.span()
    }

    /// Inverse of [`Self::to_pixel`] for pixels inside `range`.
    #[must_use]
    pub fn to_value(self, pixel: f64, range: PixelRange) -> f64 {
        let span = range.span();
        if !pixel.is_finite() || span == 0.0 {
            return self.domain_start;
        }
        let ratio = ((pixel - range.start) / span).clamp(0.0, 1.0);
        let domain_span = self.domain_end - self.domain_start;
        if domain_span.is_finite() {
            self.domain_start + ratio * domain_span
        } else {
            self.domain_start * (1.0 - ratio) + self.domain_end * ratio
        }
    }
}

/// Free-function form of [`LinearScale::to_pixel`] for one-off lookups.
///
/// A degenerate domain maps everything to `range.start`.
#[must_use]
pub fn to_pixel(value: f64, domain_min: f64, domain_max: f64, range: PixelRange) -> f64 {
    match LinearScale::new(domain_min, domain_max) {
        Ok(scale) => scale.to_pixel(value, range),
        Err(_) => range.start,
    }
}

/// Free-function form of [`LinearScale::to_value`].
#[must_use]
pub fn to_value(pixel: f64, domain_min: f64, domain_max: f64, range: PixelRange) -> f64 {
    match LinearScale::new(domain_min, domain_max) {
        Ok(scale) => scale.to_value(pixel, range),
        Err(_) => domain_min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_outside_domain_are_clamped() {
        let scale = LinearScale::new(0.0, 100.0).expect("valid scale");
        let range = PixelRange::new(400.0, 0.0);
        assert_eq!(scale.to_pixel(-50.0, range), 400.0);
        assert_eq!(scale.to_pixel(150.0, range), 0.0);
        assert_eq!(scale.to_pixel(25.0, range), 300.0);
    }

    #[test]
    fn non_finite_values_fall_back_to_range_start() {
        let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
        assert_eq!(scale.to_pixel(f64::NAN, PixelRange::new(10.0, 20.0)), 10.0);
    }

    #[test]
    fn domains_wider_than_f64_max_map_finitely() {
        let scale = LinearScale::new(-f64::MAX, f64::MAX).expect("valid scale");
        let range = PixelRange::new(0.0, 100.0);
        assert_eq!(scale.to_pixel(0.0, range), 50.0);
        assert_eq!(scale.to_pixel(f64::MAX, range), 100.0);
        assert_eq!(scale.to_value(50.0, range), 0.0);
        assert_eq!(scale.to_value(100.0, range), f64::MAX);
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        assert!(LinearScale::new(3.0, 3.0).is_err());
        assert_eq!(to_pixel(3.0, 3.0, 3.0, PixelRange::new(5.0, 9.0)), 5.0);
    }
}
