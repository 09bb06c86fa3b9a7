use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::Manifest;

use super::FilterControls;

/// Content of the data-info panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfoPanel {
    Loading,
    Dataset {
        title: String,
        author: String,
        url: String,
        file: String,
    },
    /// Fixed instructional message shown when the manifest is unavailable.
    Fallback { message: String },
}

/// Page state the controller drives: title, info panel, controls, overlay
/// and body classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageModel {
    base_title: String,
    title: String,
    info: InfoPanel,
    controls: FilterControls,
    loading_visible: bool,
    content_visible: bool,
    body_classes: IndexSet<String>,
}

impl PageModel {
    /// Fresh page: base title, loading overlay shown, content visible.
    #[must_use]
    pub fn new(base_title: impl Into<String>) -> Self {
        let base_title = base_title.into();
        Self {
            title: base_title.clone(),
            base_title,
            info: InfoPanel::Loading,
            controls: FilterControls::default(),
            loading_visible: true,
            content_visible: true,
            body_classes: IndexSet::new(),
        }
    }

    /// Fills the info panel and title from `manifest`.
    ///
    /// The title is derived from the base title each time, so applying the
    /// same manifest twice leaves it unchanged.
    pub fn apply_manifest(&mut self, manifest: &Manifest) {
        self.title = format!("{}: {}", self.base_title, manifest.title);
        self.info = InfoPanel::Dataset {
            title: manifest.title.clone(),
            author: manifest.author.clone(),
            url: manifest.url.clone(),
            file: manifest.file.clone(),
        };
    }

    /// Replaces the info panel with `message` and hides the main content.
    pub fn show_fallback(&mut self, message: impl Into<String>) {
        self.info = InfoPanel::Fallback {
            message: message.into(),
        };
        self.content_visible = false;
    }

    pub fn set_controls(&mut self, controls: FilterControls) {
        self.controls = controls;
    }

    pub fn hide_loading(&mut self) {
        self.loading_visible = false;
    }

    /// Adds `class` to the body. Returns `false` if it was already there.
    pub fn add_body_class(&mut self, class: &str) -> bool {
        self.body_classes.insert(class.to_owned())
    }

    /// Removes `class` from the body. Returns `false` if it was absent.
    pub fn remove_body_class(&mut self, class: &str) -> bool {
        self.body_classes.shift_remove(class)
    }

    #[must_use]
    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    #[must_use]
    pub fn body_classes(&self) -> impl Iterator<Item = &str> {
        self.body_classes.iter().map(String::as_str)
    }

    #[must_use]
    pub fn base_title(&self) -> &str {
        &self.base_title
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn info(&self) -> &InfoPanel {
        &self.info
    }

    #[must_use]
    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut FilterControls {
        &mut self.controls
    }

    #[must_use]
    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    #[must_use]
    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }
}
