//! studviz: choropleth map and line chart views over a student-demographics
//! dataset.
//!
//! A [`api::Controller`] loads the dataset manifest, builds the filter
//! controls and keeps a [`api::ChoroplethMap`] and a [`api::LineChart`] in sync
//! with the selected filters. Views draw backend-agnostic frames through the
//! [`render::Renderer`] contract.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{AppConfig, ChoroplethMap, Controller, ControllerState, LineChart};
pub use error::{FetchError, VizError, VizResult};
