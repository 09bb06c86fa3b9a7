mod choropleth_frame_builder;
mod choropleth_map;
mod config;
mod controller;
mod controls;
mod data_source;
mod device_notice;
mod line_chart;
mod line_chart_frame_builder;
mod page;
mod page_export;
mod surface;
mod view;

pub use choropleth_frame_builder::{ChoroplethFrame, build_choropleth_frame};
pub use choropleth_map::ChoroplethMap;
pub use config::{
    AppConfig, ChoroplethLayout, DEFAULT_DATA_UNAVAILABLE_MESSAGE, DEFAULT_GEOMETRY_PATH,
    DEFAULT_MANIFEST_PATH, DeviceNoticeConfig, LineChartLayout, SelectorHooks,
};
pub use controller::{Controller, ControllerState};
pub use controls::{FilterControl, FilterControls};
pub use data_source::{DataSource, DirectorySource, MemorySource};
pub use device_notice::{CONFIRMED_COOKIE_VALUE, CookieJar, DeviceNotice, MemoryCookieJar};
pub use line_chart::LineChart;
pub use line_chart_frame_builder::{LineChartFrame, build_line_chart_frame};
pub use page::{InfoPanel, PageModel};
pub use page_export::{PageViews, export_page_html};
pub use surface::ViewSurface;
pub use view::{
    LoadOutcome, LoadSequencer, LoadTicket, RenderSummary, VisualizationView, load_view,
    render_view,
};
