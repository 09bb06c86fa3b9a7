pub mod dataset;
pub mod geo;
pub mod manifest;
pub mod point_scale;
pub mod projection;
pub mod scale;
pub mod selection;
pub mod ticks;
pub mod types;

pub use dataset::{DataRow, DataTable, SeriesPoint, coerce_number};
pub use geo::{GeoBounds, LonLat, Region, RegionCollection};
pub use manifest::{FilterAttribute, Manifest};
pub use point_scale::PointScale;
pub use projection::MercatorProjection;
pub use scale::{LinearScale, finite_extent};
pub use selection::{Selection, composite_key};
pub use types::{Margins, PlotArea, Viewport};
