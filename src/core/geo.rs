//! Region geometry loaded from a GeoJSON `FeatureCollection`.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{VizError, VizResult};

/// Longitude/latitude pair in degrees.
pub type LonLat = [f64; 2];

/// Named region made of closed rings (outer rings and holes alike).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub rings: Vec<Vec<LonLat>>,
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min: LonLat,
    pub max: LonLat,
}

impl GeoBounds {
    fn include(&mut self, point: LonLat) {
        self.min[0] = self.min[0].min(point[0]);
        self.min[1] = self.min[1].min(point[1]);
        self.max[0] = self.max[0].max(point[0]);
        self.max[1] = self.max[1].max(point[1]);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCollection {
    regions: Vec<Region>,
}

#[derive(Deserialize)]
struct FeatureCollectionDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<FeatureDoc>,
}

#[derive(Deserialize)]
struct FeatureDoc {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<GeometryDoc>,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum GeometryDoc {
    Polygon(Vec<Vec<Vec<f64>>>),
    MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

impl RegionCollection {
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Parses a GeoJSON `FeatureCollection`, naming regions by `name_property`.
    ///
    /// Features without geometry are skipped. Features without a string
    /// name property are rejected, since they could never match a data row.
    pub fn from_geojson_str(input: &str, name_property: &str) -> VizResult<Self> {
        let document: FeatureCollectionDoc = serde_json::from_str(input)
            .map_err(|e| VizError::InvalidGeometry(format!("invalid GeoJSON: {e}")))?;
        if document.kind != "FeatureCollection" {
            return Err(VizError::InvalidGeometry(format!(
                "expected a FeatureCollection, got `{}`",
                document.kind
            )));
        }

        let mut regions = Vec::with_capacity(document.features.len());
        for (index, feature) in document.features.into_iter().enumerate() {
            let Some(geometry) = feature.geometry else {
                continue;
            };
            let name = feature
                .properties
                .as_ref()
                .and_then(|properties| properties.get(name_property))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    VizError::InvalidGeometry(format!(
                        "feature {index} has no string `{name_property}` property"
                    ))
                })?
                .to_owned();

            let polygons = match geometry {
                GeometryDoc::Polygon(rings) => vec![rings],
                GeometryDoc::MultiPolygon(polygons) => polygons,
            };
            let mut rings = Vec::new();
            for ring in polygons.into_iter().flatten() {
                rings.push(convert_ring(ring, &name)?);
            }
            regions.push(Region { name, rings });
        }

        Ok(Self { regions })
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Bounds of all ring vertices, `None` for an empty collection.
    #[must_use]
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut points = self
            .regions
            .iter()
            .flat_map(|region| region.rings.iter())
            .flat_map(|ring| ring.iter().copied());
        let first = points.next()?;
        let mut bounds = GeoBounds {
            min: first,
            max: first,
        };
        for point in points {
            bounds.include(point);
        }
        Some(bounds)
    }
}

fn convert_ring(ring: Vec<Vec<f64>>, region: &str) -> VizResult<Vec<LonLat>> {
    ring.into_iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok([*lon, *lat]),
            _ => Err(VizError::InvalidGeometry(format!(
                "region `{region}` has an invalid position"
            ))),
        })
        .collect()
}
