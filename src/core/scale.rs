use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ticks::linear_ticks;
use crate::error::{VizError, VizResult};

/// Continuous scale mapping a numeric domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how value
/// axes put larger values towards the top of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> VizResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(VizError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    /// Builds a scale bounded by the finite min/max of `values`.
    ///
    /// Returns `None` only when no finite value exists. A single distinct
    /// value is widened on both sides so the point lands mid-range: by `0.5`,
    /// or by a relative epsilon once `0.5` is below the value's precision.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (min, max) = finite_extent(values)?;
        let (start, end) = if min == max {
            let pad = (min.abs() * f64::EPSILON * 4.0).max(0.5);
            ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
        } else {
            (min, max)
        };
        let scale = Self::new(start, end);
        debug_assert!(scale.is_ok(), "finite extent must yield a valid domain");
        scale.ok()
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> VizResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(VizError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn map(self, value: f64) -> VizResult<f64> {
        if !value.is_finite() {
            return Err(VizError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> VizResult<f64> {
        if !pixel.is_finite() {
            return Err(VizError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(VizError::InvalidData(
                "cannot invert a scale with an empty range".to_owned(),
            ));
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Position of `value` inside the domain, in `[0, 1]` for in-domain values.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.domain_start) / (self.domain_end - self.domain_start)
    }

    /// Round tick values inside the domain, approximately `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, count)
    }
}

/// Finite `(min, max)` of `values`, skipping `NaN` and infinities.
#[must_use]
pub fn finite_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values.into_iter().filter(|value| value.is_finite()) {
        let value = OrderedFloat(value);
        extent = Some(match extent {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    extent.map(|(min, max)| (min.into_inner(), max.into_inner()))
}
