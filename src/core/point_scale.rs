use crate::error::{VizError, VizResult};

/// Ordinal scale placing each domain entry at an evenly spaced point.
///
/// `padding` is expressed in steps and reserved on both outer edges. Points
/// are centered inside the range, so a single entry lands mid-range.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
}

impl PointScale {
    #[must_use]
    pub fn new(domain: Vec<String>) -> Self {
        Self {
            domain,
            range_start: 0.0,
            range_end: 1.0,
            padding: 0.0,
        }
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> VizResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(VizError::InvalidData(
                "point scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    pub fn with_padding(mut self, padding: f64) -> VizResult<Self> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(VizError::InvalidData(
                "point scale padding must be finite and >= 0".to_owned(),
            ));
        }
        self.padding = padding;
        Ok(self)
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Distance between two adjacent points.
    #[must_use]
    pub fn step(&self) -> f64 {
        let slots = (self.domain.len() as f64 - 1.0 + 2.0 * self.padding).max(1.0);
        (self.range_end - self.range_start) / slots
    }

    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<f64> {
        if index >= self.domain.len() {
            return None;
        }
        let step = self.step();
        let occupied = step * (self.domain.len() as f64 - 1.0);
        let start = self.range_start + (self.range_end - self.range_start - occupied) * 0.5;
        Some(start + step * index as f64)
    }

    /// Position of the first domain entry equal to `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|entry| entry == key)?;
        self.position_at(index)
    }
}
