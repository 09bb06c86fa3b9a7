use serde::{Deserialize, Serialize};

/// Drawing groups of a view surface, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Regions,
    Axis,
    Series,
    Markers,
    Legend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl ViewLayerStack {
    /// Axis groups below the line, dots on top.
    #[must_use]
    pub fn line_chart() -> Self {
        Self {
            layers: vec![
                CanvasLayerKind::Axis,
                CanvasLayerKind::Series,
                CanvasLayerKind::Markers,
            ],
        }
    }

    #[must_use]
    pub fn choropleth() -> Self {
        Self {
            layers: vec![CanvasLayerKind::Regions, CanvasLayerKind::Legend],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, ViewLayerStack};

    #[test]
    fn line_chart_stack_draws_markers_last() {
        let stack = ViewLayerStack::line_chart();
        assert_eq!(stack.layers.last(), Some(&CanvasLayerKind::Markers));
        assert_eq!(stack.layers.first(), Some(&CanvasLayerKind::Axis));
    }
}
