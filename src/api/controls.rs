use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{FilterAttribute, Manifest};
use crate::error::{VizError, VizResult};

/// One select-style filter control built from a manifest attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterControl {
    pub attribute: FilterAttribute,
    pub options: Vec<String>,
    /// Index into `options`, `None` when the attribute offers no values.
    pub selected: Option<usize>,
}

impl FilterControl {
    #[must_use]
    pub fn new(attribute: FilterAttribute, options: Vec<String>) -> Self {
        let selected = (!options.is_empty()).then_some(0);
        Self {
            attribute,
            options,
            selected,
        }
    }

    /// Live value of the control; empty when nothing can be selected.
    #[must_use]
    pub fn value(&self) -> &str {
        self.selected
            .and_then(|index| self.options.get(index))
            .map_or("", String::as_str)
    }

    pub fn select(&mut self, value: &str) -> VizResult<()> {
        let index = self
            .options
            .iter()
            .position(|option| option == value)
            .ok_or_else(|| VizError::InvalidSelection {
                attribute: self.attribute.name().to_owned(),
                value: value.to_owned(),
            })?;
        self.selected = Some(index);
        Ok(())
    }
}

/// Controls panel: one control per recognized manifest attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterControls {
    controls: SmallVec<[FilterControl; 3]>,
}

impl FilterControls {
    /// Builds controls for `nationality`, `sex` and `semester`, in that
    /// order, skipping attributes the manifest does not list.
    #[must_use]
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let controls = manifest
            .filter_attributes()
            .map(|attribute| {
                let options = manifest
                    .filter_values(attribute)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                FilterControl::new(attribute, options)
            })
            .collect();
        Self { controls }
    }

    #[must_use]
    pub fn get(&self, attribute: FilterAttribute) -> Option<&FilterControl> {
        self.controls
            .iter()
            .find(|control| control.attribute == attribute)
    }

    #[must_use]
    pub fn contains(&self, attribute: FilterAttribute) -> bool {
        self.get(attribute).is_some()
    }

    /// Live value of `attribute`, `None` when it has no control.
    #[must_use]
    pub fn value(&self, attribute: FilterAttribute) -> Option<&str> {
        self.get(attribute).map(FilterControl::value)
    }

    /// Selects `value` on the control for `attribute`.
    ///
    /// Fails when no control exists or `value` is not among its options.
    pub fn select(&mut self, attribute: FilterAttribute, value: &str) -> VizResult<()> {
        let control = self
            .controls
            .iter_mut()
            .find(|control| control.attribute == attribute)
            .ok_or_else(|| VizError::InvalidSelection {
                attribute: attribute.name().to_owned(),
                value: value.to_owned(),
            })?;
        control.select(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterControl> {
        self.controls.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}
