use std::cell::{Ref, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::core::{FilterAttribute, Manifest, Selection};
use crate::error::{VizError, VizResult};

use super::{
    AppConfig, CookieJar, DataSource, DeviceNotice, FilterControls, PageModel, VisualizationView,
    load_view, render_view,
};

/// Lifecycle of the page controller.
///
/// `Loading -> FiltersReady -> Interactive`, or `Loading -> ErrorDisplayed`.
/// `ErrorDisplayed` is terminal: a new controller has to be built to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    Loading,
    FiltersReady,
    Interactive,
    ErrorDisplayed,
}

/// Wires the manifest, the filter controls and the two views together.
///
/// Views live in `Rc<RefCell<_>>` so their loads and the first update can
/// run concurrently on one thread.
pub struct Controller<M: VisualizationView, C: VisualizationView> {
    config: AppConfig,
    source: Rc<dyn DataSource>,
    cookies: Box<dyn CookieJar>,
    device_notice: DeviceNotice,
    map: Rc<RefCell<M>>,
    chart: Rc<RefCell<C>>,
    page: PageModel,
    manifest: Option<Manifest>,
    pinned: IndexMap<FilterAttribute, String>,
    selection: RefCell<Selection>,
    state: ControllerState,
    last_error: Option<VizError>,
}

impl<M: VisualizationView, C: VisualizationView> Controller<M, C> {
    /// Shows the loading overlay and applies the device-notice cookie.
    pub fn new(
        config: AppConfig,
        source: Rc<dyn DataSource>,
        cookies: Box<dyn CookieJar>,
        map: M,
        chart: C,
    ) -> VizResult<Self> {
        let config = config.validate()?;
        let device_notice = DeviceNotice::new(config.device_notice.clone());
        let mut page = PageModel::new(config.base_title.clone());
        let confirmed = device_notice.apply(&*cookies, &mut page);
        debug!(confirmed, "controller created");

        Ok(Self {
            pinned: config.filter_defaults.clone(),
            config,
            source,
            cookies,
            device_notice,
            map: Rc::new(RefCell::new(map)),
            chart: Rc::new(RefCell::new(chart)),
            page,
            manifest: None,
            selection: RefCell::new(Selection::default()),
            state: ControllerState::Loading,
            last_error: None,
        })
    }

    /// Builds the controller and runs the manifest load.
    ///
    /// Manifest failures do not fail construction: they end in
    /// [`ControllerState::ErrorDisplayed`] with the error kept in
    /// [`Controller::last_error`].
    pub async fn initialize(
        config: AppConfig,
        source: Rc<dyn DataSource>,
        cookies: Box<dyn CookieJar>,
        map: M,
        chart: C,
    ) -> VizResult<Self> {
        let mut controller = Self::new(config, source, cookies, map, chart)?;
        controller.load_manifest().await;
        Ok(controller)
    }

    /// Fetches the manifest, builds the controls and binds the data file to
    /// both views.
    ///
    /// The map load, the chart load and the first update run concurrently;
    /// the loading overlay is hidden once all three finished.
    #[instrument(skip_all)]
    pub async fn load_manifest(&mut self) -> ControllerState {
        if self.state == ControllerState::ErrorDisplayed {
            warn!("manifest load requested after a terminal error");
            return self.state;
        }

        let manifest = match self.fetch_manifest().await {
            Ok(manifest) => manifest,
            Err(err) => {
                self.display_error(err);
                return self.state;
            }
        };

        self.page.apply_manifest(&manifest);
        self.page.set_controls(FilterControls::from_manifest(&manifest));
        self.state = ControllerState::FiltersReady;
        debug!(
            title = %manifest.title,
            file = %manifest.file,
            controls = self.page.controls().len(),
            "manifest applied"
        );

        self.map.borrow_mut().set_data(manifest.file.as_str());
        self.chart.borrow_mut().set_data(manifest.file.as_str());
        self.manifest = Some(manifest);

        let source = &*self.source;
        let (map_load, chart_load, selection) = futures::join!(
            load_view(&self.map, source),
            load_view(&self.chart, source),
            self.update()
        );
        if let Err(err) = map_load {
            warn!(error = %err, "map data load failed");
        }
        if let Err(err) = chart_load {
            warn!(error = %err, "chart data load failed");
        }

        self.page.hide_loading();
        self.state = ControllerState::Interactive;
        info!(key_x = %selection.key_x, key_y = %selection.key_y, "visualization ready");
        self.state
    }

    /// Recomposes the selection keys from the live control values, pushes
    /// them into both views and re-renders them.
    ///
    /// The chart renders the category named by `key_y`. Render failures are
    /// logged and leave the affected view as it was.
    pub async fn update(&self) -> Selection {
        let selection = Selection::compose(
            self.filter_value(FilterAttribute::Nationality),
            self.filter_value(FilterAttribute::Sex),
            self.filter_value(FilterAttribute::Semester),
        );
        self.map
            .borrow_mut()
            .set_key_x(selection.key_x.as_str())
            .set_key_y(selection.key_y.as_str());
        self.chart
            .borrow_mut()
            .set_key_x(selection.key_x.as_str())
            .set_key_y(selection.key_y.as_str());
        *self.selection.borrow_mut() = selection.clone();

        let source = &*self.source;
        if let Err(err) = render_view(&self.map, source, &selection.key_y).await {
            warn!(error = %err, "map render failed");
        }
        if let Err(err) = render_view(&self.chart, source, &selection.key_y).await {
            warn!(error = %err, "chart render failed");
        }
        selection
    }

    /// Control change listener.
    ///
    /// Attributes with a control accept only one of its options. Attributes
    /// without one keep `value` as a pinned selection.
    pub async fn select(
        &mut self,
        attribute: FilterAttribute,
        value: impl Into<String>,
    ) -> VizResult<Selection> {
        let value = value.into();
        if self.page.controls().contains(attribute) {
            self.page.controls_mut().select(attribute, &value)?;
        } else {
            debug!(%attribute, value = %value, "pin filter without control");
            self.pinned.insert(attribute, value);
        }
        Ok(self.update().await)
    }

    pub fn confirm_device_notice(&mut self) {
        self.device_notice.confirm(&mut *self.cookies, &mut self.page);
    }

    /// Returns whether the notice is confirmed afterwards.
    pub fn toggle_device_notice(&mut self) -> bool {
        self.device_notice.toggle(&mut *self.cookies, &mut self.page)
    }

    /// Live value of `attribute`: the control's value, else the pinned one,
    /// else empty.
    #[must_use]
    pub fn filter_value(&self, attribute: FilterAttribute) -> &str {
        self.page
            .controls()
            .value(attribute)
            .or_else(|| self.pinned.get(&attribute).map(String::as_str))
            .unwrap_or("")
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn page(&self) -> &PageModel {
        &self.page
    }

    #[must_use]
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&VizError> {
        self.last_error.as_ref()
    }

    /// Selection applied by the last update.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection.borrow().clone()
    }

    #[must_use]
    pub fn cookies(&self) -> &dyn CookieJar {
        &*self.cookies
    }

    #[must_use]
    pub fn map(&self) -> Ref<'_, M> {
        self.map.borrow()
    }

    #[must_use]
    pub fn chart(&self) -> Ref<'_, C> {
        self.chart.borrow()
    }

    #[must_use]
    pub fn map_handle(&self) -> Rc<RefCell<M>> {
        Rc::clone(&self.map)
    }

    #[must_use]
    pub fn chart_handle(&self) -> Rc<RefCell<C>> {
        Rc::clone(&self.chart)
    }

    async fn fetch_manifest(&self) -> VizResult<Manifest> {
        let path = self.config.manifest_path.as_str();
        let text = self
            .source
            .fetch_text(path)
            .await
            .map_err(|source| VizError::ManifestUnavailable {
                path: path.to_owned(),
                source,
            })?;
        Manifest::from_json_str(&text).map_err(|source| VizError::ManifestInvalid {
            path: path.to_owned(),
            source,
        })
    }

    fn display_error(&mut self, err: VizError) {
        warn!(error = %err, "manifest unavailable, showing fallback message");
        self.page
            .show_fallback(self.config.data_unavailable_message.clone());
        self.page.hide_loading();
        self.state = ControllerState::ErrorDisplayed;
        self.last_error = Some(err);
    }
}
