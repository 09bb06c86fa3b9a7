use crate::core::LinearScale;

use super::Color;

/// Sequential two-color scale used to shade choropleth regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialColorScale {
    domain: LinearScale,
    low: Color,
    high: Color,
    missing: Color,
}

impl SequentialColorScale {
    #[must_use]
    pub fn new(domain: LinearScale, low: Color, high: Color, missing: Color) -> Self {
        Self {
            domain,
            low,
            high,
            missing,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain.domain()
    }

    /// Color for `value`. Non-finite values get the missing-data color.
    #[must_use]
    pub fn color(self, value: f64) -> Color {
        if !value.is_finite() {
            return self.missing;
        }
        self.low.lerp(self.high, self.domain.normalize(value))
    }

    /// Color at relative position `t` in `[0, 1]`, for legend swatches.
    #[must_use]
    pub fn color_at(self, t: f64) -> Color {
        self.low.lerp(self.high, t)
    }
}
