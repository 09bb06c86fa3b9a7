use smallvec::smallvec;
use tracing::{debug, trace};

use crate::core::DataTable;
use crate::error::{VizError, VizResult};
use crate::render::{LayeredRenderFrame, Renderer, ViewLayerStack};

use super::line_chart_frame_builder::build_line_chart_frame;
use super::{
    AppConfig, LineChartLayout, LoadOutcome, LoadSequencer, LoadTicket, RenderSummary,
    ViewSurface, VisualizationView,
};

/// Single-series line chart of one category slice.
///
/// The x axis lists row ids in file order, the y axis spans the observed
/// values of the `key_x` column. The dot whose id equals `key_y` is drawn
/// highlighted.
pub struct LineChart<R: Renderer> {
    renderer: R,
    layout: LineChartLayout,
    category_column: String,
    data_path: Option<String>,
    key_x: String,
    key_y: String,
    surface: ViewSurface,
    sequencer: LoadSequencer,
    table: Option<DataTable>,
    last_frame: Option<LayeredRenderFrame>,
    last_render: Option<RenderSummary>,
}

impl<R: Renderer> LineChart<R> {
    pub fn new(
        renderer: R,
        layout: LineChartLayout,
        category_column: impl Into<String>,
    ) -> VizResult<Self> {
        layout.viewport.ensure_valid()?;
        let category_column = category_column.into();
        if category_column.is_empty() {
            return Err(VizError::InvalidConfig(
                "category column must not be empty".to_owned(),
            ));
        }
        Ok(Self {
            renderer,
            layout,
            category_column,
            data_path: None,
            key_x: String::new(),
            key_y: String::new(),
            surface: ViewSurface::default(),
            sequencer: LoadSequencer::default(),
            table: None,
            last_frame: None,
            last_render: None,
        })
    }

    pub fn from_config(renderer: R, config: &AppConfig) -> VizResult<Self> {
        Self::new(renderer, config.chart, config.category_column.clone())
    }

    #[must_use]
    pub fn layout(&self) -> &LineChartLayout {
        &self.layout
    }

    #[must_use]
    pub fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> &ViewSurface {
        &self.surface
    }

    /// Layered frame of the last successful render.
    #[must_use]
    pub fn last_frame(&self) -> Option<&LayeredRenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn last_render(&self) -> Option<&RenderSummary> {
        self.last_render.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> VisualizationView for LineChart<R> {
    fn data(&self) -> Option<&str> {
        self.data_path.as_deref()
    }

    fn set_data(&mut self, path: impl Into<String>) -> &mut Self {
        let path = path.into();
        if self.data_path.as_deref() != Some(path.as_str()) {
            debug!(path = %path, "bind chart data");
            self.table = None;
            self.sequencer.invalidate();
            self.data_path = Some(path);
        }
        self
    }

    fn key_x(&self) -> &str {
        &self.key_x
    }

    fn set_key_x(&mut self, key: impl Into<String>) -> &mut Self {
        self.key_x = key.into();
        self
    }

    fn key_y(&self) -> &str {
        &self.key_y
    }

    fn set_key_y(&mut self, key: impl Into<String>) -> &mut Self {
        self.key_y = key.into();
        self
    }

    fn init(&mut self) -> bool {
        let created = self.surface.ensure(ViewLayerStack::line_chart);
        if created {
            trace!("chart surface created");
        }
        created
    }

    fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    fn begin_load(&mut self) -> VizResult<LoadTicket> {
        let path = self.data_path.clone().ok_or(VizError::NoDataBound)?;
        let ticket = self.sequencer.issue(smallvec![path]);
        trace!(sequence = ticket.sequence(), "chart load issued");
        Ok(ticket)
    }

    fn complete_load(
        &mut self,
        ticket: LoadTicket,
        payloads: Vec<String>,
    ) -> VizResult<LoadOutcome> {
        if !self.sequencer.is_fresh(&ticket) {
            debug!(sequence = ticket.sequence(), "discard stale chart load");
            return Ok(LoadOutcome::Stale);
        }
        let [csv] = payloads.as_slice() else {
            return Err(VizError::InvalidData(format!(
                "chart load expects 1 payload, got {}",
                payloads.len()
            )));
        };

        let table = DataTable::parse_csv(csv, &self.category_column)?;
        self.sequencer.accept(&ticket);
        debug!(
            sequence = ticket.sequence(),
            rows = table.rows().len(),
            "chart data loaded"
        );
        self.table = Some(table);
        Ok(LoadOutcome::Applied)
    }

    fn render(&mut self, category: &str) -> VizResult<RenderSummary> {
        self.init();
        let table = self.table.as_ref().ok_or(VizError::NoDataBound)?;
        let stack = self
            .surface
            .stack()
            .cloned()
            .unwrap_or_else(ViewLayerStack::line_chart);

        let series = table.series(category, &self.key_x);
        let built = build_line_chart_frame(&self.layout, &stack, &series, &self.key_y)?;
        self.renderer.render(&built.frame.flatten())?;

        let summary = RenderSummary {
            category: category.to_owned(),
            key_x: self.key_x.clone(),
            key_y: self.key_y.clone(),
            drawn_items: built.drawn_items,
            highlighted: built.highlighted,
        };
        debug!(
            category,
            key_x = %summary.key_x,
            points = series.len(),
            dots = summary.drawn_items,
            "chart rendered"
        );
        self.last_frame = Some(built.frame);
        self.last_render = Some(summary.clone());
        Ok(summary)
    }
}
