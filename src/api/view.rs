//! Contract shared by the chart and map views, plus the async drivers the
//! controller uses to load and render them.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::error::{VizError, VizResult};

use super::DataSource;

/// Resources requested by one load of a view, tagged with its sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    sequence: u64,
    paths: SmallVec<[String; 2]>,
}

impl LoadTicket {
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    /// Payload parsed and bound to the view.
    Applied,
    /// A newer load already landed, or the data path changed meanwhile.
    Stale,
}

/// Monotonic request-sequence tokens for one view.
///
/// A completion is accepted only if it is newer than the last accepted one,
/// so a slow early fetch can never overwrite a faster later one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSequencer {
    issued: u64,
    applied: u64,
}

impl LoadSequencer {
    pub fn issue(&mut self, paths: SmallVec<[String; 2]>) -> LoadTicket {
        self.issued += 1;
        LoadTicket {
            sequence: self.issued,
            paths,
        }
    }

    /// Whether `ticket` is newer than every completion accepted so far.
    #[must_use]
    pub fn is_fresh(&self, ticket: &LoadTicket) -> bool {
        ticket.sequence > self.applied && ticket.sequence <= self.issued
    }

    /// Marks `ticket` as applied when it is the newest completion so far.
    pub fn accept(&mut self, ticket: &LoadTicket) -> bool {
        if !self.is_fresh(ticket) {
            return false;
        }
        self.applied = ticket.sequence;
        true
    }

    /// Turns every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.applied = self.issued;
    }

    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// What one render pass drew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSummary {
    pub category: String,
    pub key_x: String,
    pub key_y: String,
    /// Dots for the chart, shaded regions for the map.
    pub drawn_items: usize,
    pub highlighted: Option<String>,
}

/// Capability set the controller relies on: data binding, the two selection
/// keys, and render.
///
/// Setters return `&mut Self` so configuration can be chained.
pub trait VisualizationView {
    /// Path of the bound CSV source.
    fn data(&self) -> Option<&str>;

    /// Binds a CSV source. A different path drops loaded data and turns
    /// outstanding loads stale.
    fn set_data(&mut self, path: impl Into<String>) -> &mut Self
    where
        Self: Sized;

    fn key_x(&self) -> &str;

    fn set_key_x(&mut self, key: impl Into<String>) -> &mut Self
    where
        Self: Sized;

    fn key_y(&self) -> &str;

    fn set_key_y(&mut self, key: impl Into<String>) -> &mut Self
    where
        Self: Sized;

    /// Creates the drawing surface once. Returns `true` when it was created.
    fn init(&mut self) -> bool;

    fn is_loaded(&self) -> bool;

    /// Issues the next load ticket for the bound resources.
    fn begin_load(&mut self) -> VizResult<LoadTicket>;

    /// Parses and binds `payloads` (one per ticket path) unless stale.
    fn complete_load(&mut self, ticket: LoadTicket, payloads: Vec<String>)
    -> VizResult<LoadOutcome>;

    /// Redraws the view for rows in `category` from loaded data.
    fn render(&mut self, category: &str) -> VizResult<RenderSummary>;
}

/// Fetches and binds the view's resources.
///
/// The `RefCell` borrow is released while the fetch is pending so several
/// drivers can run concurrently on one thread.
#[instrument(skip_all)]
pub async fn load_view<V: VisualizationView>(
    view: &RefCell<V>,
    source: &dyn DataSource,
) -> VizResult<LoadOutcome> {
    let ticket = view.borrow_mut().begin_load()?;
    let mut payloads = Vec::with_capacity(ticket.paths().len());
    for path in ticket.paths() {
        let text = source
            .fetch_text(path)
            .await
            .map_err(|source| VizError::DataUnavailable {
                path: path.clone(),
                source,
            })?;
        payloads.push(text);
    }

    let sequence = ticket.sequence();
    let outcome = view.borrow_mut().complete_load(ticket, payloads)?;
    debug!(sequence, ?outcome, "view load completed");
    Ok(outcome)
}

/// Renders `category`, loading the view's data first when none is bound yet.
///
/// Returns `None` when the load turned out stale and no data is available.
pub async fn render_view<V: VisualizationView>(
    view: &RefCell<V>,
    source: &dyn DataSource,
    category: &str,
) -> VizResult<Option<RenderSummary>> {
    let loaded = view.borrow().is_loaded();
    if !loaded {
        load_view(view, source).await?;
        if !view.borrow().is_loaded() {
            return Ok(None);
        }
    }
    view.borrow_mut().render(category).map(Some)
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::LoadSequencer;

    #[test]
    fn newer_completion_wins_over_older() {
        let mut sequencer = LoadSequencer::default();
        let first = sequencer.issue(smallvec!["a.csv".to_owned()]);
        let second = sequencer.issue(smallvec!["a.csv".to_owned()]);

        assert!(sequencer.accept(&second));
        assert!(!sequencer.accept(&first));
    }

    #[test]
    fn in_order_completions_are_both_applied() {
        let mut sequencer = LoadSequencer::default();
        let first = sequencer.issue(smallvec!["a.csv".to_owned()]);
        let second = sequencer.issue(smallvec!["a.csv".to_owned()]);

        assert!(sequencer.accept(&first));
        assert!(sequencer.accept(&second));
    }

    #[test]
    fn invalidate_turns_outstanding_tickets_stale() {
        let mut sequencer = LoadSequencer::default();
        let pending = sequencer.issue(smallvec!["old.csv".to_owned()]);
        sequencer.invalidate();
        assert!(!sequencer.accept(&pending));

        let fresh = sequencer.issue(smallvec!["new.csv".to_owned()]);
        assert!(sequencer.accept(&fresh));
    }
}
