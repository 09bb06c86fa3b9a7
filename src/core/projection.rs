use std::f64::consts::FRAC_PI_4;

use crate::core::geo::{GeoBounds, LonLat};
use crate::core::types::PlotArea;
use crate::error::{VizError, VizResult};

pub const MERCATOR_MAX_LAT_DEG: f64 = 85.05112878;

/// Spherical Mercator projection onto pixel space, north up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
}

impl MercatorProjection {
    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> VizResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(VizError::InvalidData(
                "projection scale must be finite and > 0".to_owned(),
            ));
        }
        if !translate_x.is_finite() || !translate_y.is_finite() {
            return Err(VizError::InvalidData(
                "projection translation must be finite".to_owned(),
            ));
        }
        Ok(Self {
            scale,
            translate_x,
            translate_y,
        })
    }

    /// Fits `bounds` into `area`, centered, preserving aspect ratio.
    pub fn fit(bounds: GeoBounds, area: PlotArea) -> VizResult<Self> {
        let [x0, y1] = unit_project(bounds.min);
        let [x1, y0] = unit_project(bounds.max);
        let span_x = x1 - x0;
        let span_y = y1 - y0;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (area.width / span_x).min(area.height / span_y),
            (true, false) => area.width / span_x,
            (false, true) => area.height / span_y,
            (false, false) => {
                return Err(VizError::InvalidGeometry(
                    "region bounds have no extent".to_owned(),
                ));
            }
        };

        Self::new(
            scale,
            area.left + (area.width - scale * (x1 + x0)) / 2.0,
            area.top + (area.height - scale * (y1 + y0)) / 2.0,
        )
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn project(self, point: LonLat) -> (f64, f64) {
        let [x, y] = unit_project(point);
        (
            self.scale * x + self.translate_x,
            self.scale * y + self.translate_y,
        )
    }
}

fn unit_project([lon, lat]: LonLat) -> [f64; 2] {
    let lat = lat.clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG).to_radians();
    [lon.to_radians(), -(FRAC_PI_4 + lat / 2.0).tan().ln()]
}
