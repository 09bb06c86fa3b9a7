use smallvec::smallvec;
use tracing::{debug, trace};

use crate::core::{DataTable, RegionCollection};
use crate::error::{VizError, VizResult};
use crate::render::{LayeredRenderFrame, Renderer, ViewLayerStack};

use super::choropleth_frame_builder::build_choropleth_frame;
use super::{
    AppConfig, ChoroplethLayout, LoadOutcome, LoadSequencer, LoadTicket, RenderSummary,
    ViewSurface, VisualizationView,
};

/// Choropleth of one category slice over named regions.
///
/// Loads two resources per ticket: the bound CSV and the region geometry.
pub struct ChoroplethMap<R: Renderer> {
    renderer: R,
    layout: ChoroplethLayout,
    category_column: String,
    geometry_path: String,
    region_name_property: String,
    data_path: Option<String>,
    key_x: String,
    key_y: String,
    surface: ViewSurface,
    sequencer: LoadSequencer,
    table: Option<DataTable>,
    regions: Option<RegionCollection>,
    last_frame: Option<LayeredRenderFrame>,
    last_render: Option<RenderSummary>,
}

impl<R: Renderer> ChoroplethMap<R> {
    pub fn new(
        renderer: R,
        layout: ChoroplethLayout,
        category_column: impl Into<String>,
        geometry_path: impl Into<String>,
        region_name_property: impl Into<String>,
    ) -> VizResult<Self> {
        layout.viewport.ensure_valid()?;
        let category_column = category_column.into();
        let geometry_path = geometry_path.into();
        let region_name_property = region_name_property.into();
        for (field, value) in [
            ("category column", &category_column),
            ("geometry path", &geometry_path),
            ("region name property", &region_name_property),
        ] {
            if value.is_empty() {
                return Err(VizError::InvalidConfig(format!("{field} must not be empty")));
            }
        }

        Ok(Self {
            renderer,
            layout,
            category_column,
            geometry_path,
            region_name_property,
            data_path: None,
            key_x: String::new(),
            key_y: String::new(),
            surface: ViewSurface::default(),
            sequencer: LoadSequencer::default(),
            table: None,
            regions: None,
            last_frame: None,
            last_render: None,
        })
    }

    pub fn from_config(renderer: R, config: &AppConfig) -> VizResult<Self> {
        Self::new(
            renderer,
            config.map,
            config.category_column.clone(),
            config.geometry_path.clone(),
            config.region_name_property.clone(),
        )
    }

    #[must_use]
    pub fn geometry_path(&self) -> &str {
        &self.geometry_path
    }

    #[must_use]
    pub fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    #[must_use]
    pub fn regions(&self) -> Option<&RegionCollection> {
        self.regions.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> &ViewSurface {
        &self.surface
    }

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

impl<R: Renderer> VisualizationView for ChoroplethMap<R> {
    fn data(&self) -> Option<&str> {
        self.data_path.as_deref()
    }

    fn set_data(&mut self, path: impl Into<String>) -> &mut Self {
        let path = path.into();
        if self.data_path.as_deref() != Some(path.as_str()) {
            debug!(path = %path, "bind map data");
            self.table = None;
            self.regions = None;
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
        let created = self.surface.ensure(ViewLayerStack::choropleth);
        if created {
            trace!("map surface created");
        }
        created
    }

    fn is_loaded(&self) -> bool {
        self.table.is_some() && self.regions.is_some()
    }

    fn begin_load(&mut self) -> VizResult<LoadTicket> {
        let path = self.data_path.clone().ok_or(VizError::NoDataBound)?;
        let ticket = self
            .sequencer
            .issue(smallvec![path, self.geometry_path.clone()]);
        trace!(sequence = ticket.sequence(), "map load issued");
        Ok(ticket)
    }

    fn complete_load(
        &mut self,
        ticket: LoadTicket,
        payloads: Vec<String>,
    ) -> VizResult<LoadOutcome> {
        if !self.sequencer.is_fresh(&ticket) {
            debug!(sequence = ticket.sequence(), "discard stale map load");
            return Ok(LoadOutcome::Stale);
        }
        let [csv, geometry] = payloads.as_slice() else {
            return Err(VizError::InvalidData(format!(
                "map load expects 2 payloads, got {}",
                payloads.len()
            )));
        };

        let table = DataTable::parse_csv(csv, &self.category_column)?;
        let regions = RegionCollection::from_geojson_str(geometry, &self.region_name_property)?;
        self.sequencer.accept(&ticket);
        debug!(
            sequence = ticket.sequence(),
            rows = table.rows().len(),
            regions = regions.regions().len(),
            "map data loaded"
        );
        self.table = Some(table);
        self.regions = Some(regions);
        Ok(LoadOutcome::Applied)
    }

    fn render(&mut self, category: &str) -> VizResult<RenderSummary> {
        self.init();
        let (Some(table), Some(regions)) = (self.table.as_ref(), self.regions.as_ref()) else {
            return Err(VizError::NoDataBound);
        };
        let stack = self
            .surface
            .stack()
            .cloned()
            .unwrap_or_else(ViewLayerStack::choropleth);

        let built =
            build_choropleth_frame(&self.layout, &stack, regions, table, category, &self.key_x)?;
        self.renderer.render(&built.frame.flatten())?;

        let summary = RenderSummary {
            category: category.to_owned(),
            key_x: self.key_x.clone(),
            key_y: self.key_y.clone(),
            drawn_items: built.drawn_items,
            highlighted: None,
        };
        debug!(
            category,
            key_x = %summary.key_x,
            shaded = summary.drawn_items,
            "map rendered"
        );
        self.last_frame = Some(built.frame);
        self.last_render = Some(summary.clone());
        Ok(summary)
    }
}
