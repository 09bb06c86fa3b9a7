use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{FilterAttribute, Margins, PlotArea, Viewport};
use crate::error::{VizError, VizResult};
use crate::render::Color;

pub const DEFAULT_MANIFEST_PATH: &str = "manifest.json";
pub const DEFAULT_GEOMETRY_PATH: &str = "states.geojson";
pub const DEFAULT_DATA_UNAVAILABLE_MESSAGE: &str = "The dataset has not been downloaded yet. \
Run the data retrieval step to place `manifest.json` and the CSV file into the data \
directory, then reload the page.";

/// Class hooks the host page provides for the controller's regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorHooks {
    pub page_wrapper: String,
    pub loading_overlay: String,
    pub data_info: String,
    pub controls: String,
    pub device_notice: String,
    pub device_notice_button: String,
}

impl Default for SelectorHooks {
    fn default() -> Self {
        Self {
            page_wrapper: "page".to_owned(),
            loading_overlay: "fullscreen-loading".to_owned(),
            data_info: "data-info".to_owned(),
            controls: "controls".to_owned(),
            device_notice: "device-notice".to_owned(),
            device_notice_button: "device-notice-button".to_owned(),
        }
    }
}

impl SelectorHooks {
    /// CSS selector for a class hook.
    #[must_use]
    pub fn selector(class: &str) -> String {
        format!(".{class}")
    }

    fn validate(&self) -> VizResult<()> {
        for (hook, class) in [
            ("page_wrapper", &self.page_wrapper),
            ("loading_overlay", &self.loading_overlay),
            ("data_info", &self.data_info),
            ("controls", &self.controls),
            ("device_notice", &self.device_notice),
            ("device_notice_button", &self.device_notice_button),
        ] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(VizError::InvalidConfig(format!(
                    "selector hook `{hook}` must be a single non-empty class name"
                )));
            }
        }
        Ok(())
    }
}

/// Device compatibility notice persisted through a cookie flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceNoticeConfig {
    pub cookie_name: String,
    pub confirmed_class: String,
}

impl Default for DeviceNoticeConfig {
    fn default() -> Self {
        Self {
            cookie_name: "device_notice_confirmed".to_owned(),
            confirmed_class: "device-notice-confirmed".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartLayout {
    pub viewport: Viewport,
    pub margins: Margins,
    /// Outer padding of the row-id axis, in steps.
    pub point_padding: f64,
    pub line_color: Color,
    pub line_width: f64,
    pub dot_color: Color,
    pub dot_radius: f64,
    pub highlight_color: Color,
    pub highlight_radius: f64,
    pub axis_color: Color,
    pub text_color: Color,
    pub font_size_px: f64,
    pub tick_length_px: f64,
}

impl Default for LineChartLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(720, 360),
            margins: Margins::new(20.0, 20.0, 60.0, 60.0),
            point_padding: 0.5,
            line_color: Color::from_rgb8(0x31, 0x82, 0xbd),
            line_width: 2.0,
            dot_color: Color::from_rgb8(0x31, 0x82, 0xbd),
            dot_radius: 3.5,
            highlight_color: Color::from_rgb8(0xe6, 0x55, 0x0d),
            highlight_radius: 6.0,
            axis_color: Color::from_rgb8(0x44, 0x44, 0x44),
            text_color: Color::from_rgb8(0x22, 0x22, 0x22),
            font_size_px: 11.0,
            tick_length_px: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoroplethLayout {
    pub viewport: Viewport,
    pub margins: Margins,
    pub low_color: Color,
    pub high_color: Color,
    pub no_data_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub legend_steps: usize,
    pub legend_swatch_px: f64,
    pub text_color: Color,
    pub font_size_px: f64,
}

impl Default for ChoroplethLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(480, 600),
            margins: Margins::new(10.0, 10.0, 50.0, 10.0),
            low_color: Color::from_rgb8(0xde, 0xeb, 0xf7),
            high_color: Color::from_rgb8(0x08, 0x51, 0x9c),
            no_data_color: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            stroke_color: Color::rgb(1.0, 1.0, 1.0),
            stroke_width: 1.0,
            legend_steps: 5,
            legend_swatch_px: 24.0,
            text_color: Color::from_rgb8(0x22, 0x22, 0x22),
            font_size_px: 11.0,
        }
    }
}

/// Immutable application configuration passed into every component.
///
/// Serializable so hosts can ship it next to the data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page title before the dataset title is appended.
    pub base_title: String,
    pub manifest_path: String,
    pub geometry_path: String,
    /// CSV column holding the category (semester) of each row.
    pub category_column: String,
    /// GeoJSON feature property holding the region name.
    pub region_name_property: String,
    /// Values used for filters the manifest offers no control for.
    pub filter_defaults: IndexMap<FilterAttribute, String>,
    pub data_unavailable_message: String,
    pub selectors: SelectorHooks,
    pub device_notice: DeviceNoticeConfig,
    pub chart: LineChartLayout,
    pub map: ChoroplethLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_title: "Studierende in Deutschland".to_owned(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_owned(),
            geometry_path: DEFAULT_GEOMETRY_PATH.to_owned(),
            category_column: "semester".to_owned(),
            region_name_property: "name".to_owned(),
            filter_defaults: IndexMap::new(),
            data_unavailable_message: DEFAULT_DATA_UNAVAILABLE_MESSAGE.to_owned(),
            selectors: SelectorHooks::default(),
            device_notice: DeviceNoticeConfig::default(),
            chart: LineChartLayout::default(),
            map: ChoroplethLayout::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| VizError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()
    }

    #[must_use]
    pub fn with_base_title(mut self, title: impl Into<String>) -> Self {
        self.base_title = title.into();
        self
    }

    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = path.into();
        self
    }

    #[must_use]
    pub fn with_geometry_path(mut self, path: impl Into<String>) -> Self {
        self.geometry_path = path.into();
        self
    }

    #[must_use]
    pub fn with_filter_default(
        mut self,
        attribute: FilterAttribute,
        value: impl Into<String>,
    ) -> Self {
        self.filter_defaults.insert(attribute, value.into());
        self
    }

    pub fn validate(self) -> VizResult<Self> {
        for (field, value) in [
            ("manifest_path", &self.manifest_path),
            ("geometry_path", &self.geometry_path),
            ("category_column", &self.category_column),
            ("region_name_property", &self.region_name_property),
            ("device_notice.cookie_name", &self.device_notice.cookie_name),
            (
                "device_notice.confirmed_class",
                &self.device_notice.confirmed_class,
            ),
        ] {
            if value.is_empty() {
                return Err(VizError::InvalidConfig(format!("`{field}` must not be empty")));
            }
        }
        if self
            .device_notice
            .cookie_name
            .chars()
            .any(|ch| ch == ';' || ch == '=' || ch.is_whitespace())
        {
            return Err(VizError::InvalidConfig(
                "device notice cookie name must not contain `;`, `=` or whitespace".to_owned(),
            ));
        }
        self.selectors.validate()?;

        PlotArea::resolve(self.chart.viewport, self.chart.margins)?;
        PlotArea::resolve(self.map.viewport, self.map.margins)?;
        if self.map.legend_steps == 0 {
            return Err(VizError::InvalidConfig(
                "map legend needs at least one step".to_owned(),
            ));
        }
        for (field, value) in [
            ("chart.line_width", self.chart.line_width),
            ("chart.dot_radius", self.chart.dot_radius),
            ("chart.highlight_radius", self.chart.highlight_radius),
            ("chart.font_size_px", self.chart.font_size_px),
            ("chart.tick_length_px", self.chart.tick_length_px),
            ("map.stroke_width", self.map.stroke_width),
            ("map.legend_swatch_px", self.map.legend_swatch_px),
            ("map.font_size_px", self.map.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(VizError::InvalidConfig(format!(
                    "`{field}` must be finite and > 0"
                )));
            }
        }
        if !self.chart.point_padding.is_finite() || self.chart.point_padding < 0.0 {
            return Err(VizError::InvalidConfig(
                "`chart.point_padding` must be finite and >= 0".to_owned(),
            ));
        }
        for color in [
            self.chart.line_color,
            self.chart.dot_color,
            self.chart.highlight_color,
            self.chart.axis_color,
            self.chart.text_color,
            self.map.low_color,
            self.map.high_color,
            self.map.no_data_color,
            self.map.stroke_color,
            self.map.text_color,
        ] {
            color
                .validate()
                .map_err(|e| VizError::InvalidConfig(e.to_string()))?;
        }

        Ok(self)
    }
}
