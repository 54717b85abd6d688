use serde::{Deserialize, Serialize};

/// Default number of ticks requested from the nice-number path.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Upper bound on emitted ticks; tiny explicit steps fall back to nice steps past this.
pub const MAX_TICK_COUNT: usize = 1_000;

/// Fraction of `|min|` used to widen a zero-span domain.
const DEGENERATE_WIDEN_RATIO: f64 = 0.2;

/// One axis bound: either derived from data or pinned by the user.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "AxisBoundRepr", into = "AxisBoundRepr")]
pub enum AxisBound {
    #[default]
    Auto,
    Value(f64),
}

impl AxisBound {
    /// Returns the pinned value when it is usable.
    #[must_use]
    pub fn explicit(self) -> Option<f64> {
        match self {
            Self::Value(value) if value.is_finite() => Some(value),
            _ => None,
        }
    }
}

/// Persisted as either a number or the string `"auto"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AxisBoundRepr {
    Number(f64),
    Keyword(String),
}

impl From<AxisBoundRepr> for AxisBound {
    fn from(value: AxisBoundRepr) -> Self {
        match value {
            AxisBoundRepr::Number(number) if number.is_finite() => Self::Value(number),
            _ => Self::Auto,
        }
    }
}

impl From<AxisBound> for AxisBoundRepr {
    fn from(value: AxisBound) -> Self {
        match value.explicit() {
            Some(number) => Self::Number(number),
            None => Self::Keyword("auto".to_owned()),
        }
    }
}

/// Input for one value-axis tick computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRequest {
    pub data_min: f64,
    pub data_max: f64,
    pub min: AxisBound,
    pub max: AxisBound,
    pub step: AxisBound,
    pub tick_count: usize,
}

impl TickRequest {
    #[must_use]
    pub fn auto(data_min: f64, data_max: f64) -> Self {
        Self {
            data_min,
            data_max,
            min: AxisBound::Auto,
            max: AxisBound::Auto,
            step: AxisBound::Auto,
            tick_count: DEFAULT_TICK_COUNT,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, min: AxisBound, max: AxisBound, step: AxisBound) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }
}

/// Resolved value axis: ascending ticks and the plotted domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickScale {
    pub ticks: Vec<f64>,
    pub axis_min: f64,
    pub axis_max: f64,
}

impl TickScale {
    /// Resolves ticks for `request`.
    ///
    /// Explicit bounds are kept verbatim. Auto bounds snap outward to the step grid,
    /// so the realized domain always covers the data on the auto path. A snap that
    /// would leave the `f64` range keeps the raw bound instead.
    ///
    /// When only one bound is explicit and it lies beyond the data on the other
    /// side, the auto bound is derived from it (widened by 20% of its magnitude, or
    /// 1 at zero). Two explicit bounds in the wrong order are swapped.
    #[must_use]
    pub fn resolve(request: TickRequest) -> Self {
        let data_min = finite_or(request.data_min, 0.0);
        let data_max = finite_or(request.data_max, 0.0);
        let (data_min, data_max) = if data_min <= data_max {
            (data_min, data_max)
        } else {
            (data_max, data_min)
        };

        let explicit_min = request.min.explicit();
        let explicit_max = request.max.explicit();
        let mut min = explicit_min.unwrap_or(data_min);
        let mut max = explicit_max.unwrap_or(data_max);
        match (explicit_min, explicit_max) {
            (Some(_), None) if max <= min => max = min + degenerate_widen(min),
            (None, Some(_)) if max <= min => min = max - degenerate_widen(max),
            _ => {
                if min > max {
                    std::mem::swap(&mut min, &mut max);
                }
                if min == max {
                    let widen = degenerate_widen(min);
                    min -= widen;
                    max += widen;
                }
            }
        }
        let min = min.max(f64::MIN);
        let max = max.min(f64::MAX);

        let tick_count = request.tick_count.max(2);
        let explicit_step = request
            .step
            .explicit()
            .filter(|step| *step > 0.0 && (max - min) / *step <= MAX_TICK_COUNT as f64);
        let step = explicit_step
            .unwrap_or_else(|| nice_step((max - min) / (tick_count - 1) as f64));

        if !step.is_finite() || step <= 0.0 {
            return Self::from_ticks(vec![min, max]);
        }

        let lower = if explicit_min.is_some() || explicit_step.is_some() {
            min
        } else {
            let mut index = (min / step).floor();
            if index * step > min {
                index -= 1.0;
            }
            let snapped = index * step;
            if snapped.is_finite() { snapped } else { min }
        };
        let upper = if explicit_max.is_some() || explicit_step.is_some() {
            max
        } else {
            let mut index = (max / step).ceil();
            if index * step < max {
                index += 1.0;
            }
            let snapped = index * step;
            if snapped.is_finite() { snapped } else { max }
        };

        let mut ticks = stepped_ticks(lower, upper, step);
        // Rounding can leave snapped ends a hair inside the domain.
        if let Some(first) = ticks.first_mut() {
            *first = first.min(min);
        }
        if let Some(last) = ticks.last_mut() {
            *last = last.max(max);
        }
        Self::from_ticks(ticks)
    }

    fn from_ticks(ticks: Vec<f64>) -> Self {
        let axis_min = ticks.first().copied().unwrap_or(0.0);
        let axis_max = ticks.last().copied().unwrap_or(1.0);
        Self {
            ticks,
            axis_min,
            axis_max,
        }
    }
}

/// Half-width used to open up an empty domain around `value`.
fn degenerate_widen(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value.abs() * DEGENERATE_WIDEN_RATIO
    }
}

/// Auto-bounds tick generation for a `[min, max]` domain.
#[must_use]
pub fn generate_ticks(min: f64, max: f64) -> Vec<f64> {
    TickScale::resolve(TickRequest::auto(min, max)).ticks
}

/// Nearest "nice" step from {1, 2, 5, 10} × 10^k.
#[must_use]
pub fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 0.0;
    }
    let power = raw_step.log10().floor();
    let base = 10_f64.powf(power);
    let fraction = raw_step / base;
    let nice = if fraction <= 1.5 {
        1.0
    } else if fraction <= 3.5 {
        2.0
    } else if fraction <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Ticks on the `step` grid inside `[lower, upper]`, with the bounds themselves
/// prepended/appended when they fall off the grid.
fn stepped_ticks(lower: f64, upper: f64, step: f64) -> Vec<f64> {
    let epsilon = step * 1e-9;
    let first_index = ((lower - epsilon) / step).ceil();
    let last_index = ((upper + epsilon) / step).floor();
    let count = last_index - first_index;

    let mut ticks = Vec::new();
    if count.is_finite() && count >= 0.0 && count <= MAX_TICK_COUNT as f64 {
        for offset in 0..=(count as usize) {
            let tick = clean_tick((first_index + offset as f64) * step, step);
            // Huge grid indices lose integer precision; skip repeats.
            if ticks.last().is_none_or(|last| tick > *last) {
                ticks.push(tick);
            }
        }
    }

    match ticks.first() {
        Some(first) if *first <= lower + epsilon => {}
        _ => ticks.insert(0, lower),
    }
    match ticks.last() {
        Some(last) if *last >= upper - epsilon => {}
        _ => ticks.push(upper),
    }
    ticks
}

fn clean_tick(value: f64, step: f64) -> f64 {
    // Collapses `-0.0` and float dust around zero.
    if value.abs() < step * 1e-9 { 0.0 } else { value }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
