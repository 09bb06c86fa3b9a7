use crate::render::ViewLayerStack;

/// Drawing surface of a view, created lazily and exactly once.
///
/// Initialization state is tracked here rather than inferred from whatever
/// the renderer last drew.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSurface {
    stack: Option<ViewLayerStack>,
    creations: usize,
}

impl ViewSurface {
    /// Creates the layer stack on first call. Returns `true` when it did.
    pub fn ensure(&mut self, build: impl FnOnce() -> ViewLayerStack) -> bool {
        if self.stack.is_some() {
            return false;
        }
        self.stack = Some(build());
        self.creations += 1;
        true
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.stack.is_some()
    }

    #[must_use]
    pub fn stack(&self) -> Option<&ViewLayerStack> {
        self.stack.as_ref()
    }

    /// How many times the layer stack was built. Stays at 1 once initialized.
    #[must_use]
    pub fn creations(&self) -> usize {
        self.creations
    }
}
