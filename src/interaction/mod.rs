use serde::{Deserialize, Serialize};

use crate::render::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// A shape is hovered and its tooltip is shown.
    Hovering,
}

/// Pointer interaction state of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    mode: InteractionMode,
    hovered: Option<ElementId>,
    cursor: Option<(f64, f64)>,
    clicks: u64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            hovered: None,
            cursor: None,
            clicks: 0,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn hovered(self) -> Option<ElementId> {
        self.hovered
    }

    /// Last pointer position reported by the host, if any.
    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn click_count(self) -> u64 {
        self.clicks
    }

    pub fn on_pointer_over(&mut self, element: ElementId, pointer: Option<(f64, f64)>) {
        self.mode = InteractionMode::Hovering;
        self.hovered = Some(element);
        if pointer.is_some() {
            self.cursor = pointer;
        }
    }

    pub fn on_pointer_out(&mut self) {
        self.mode = InteractionMode::Idle;
        self.hovered = None;
    }

    pub fn on_click(&mut self) {
        self.clicks += 1;
    }

    /// Drops the hover when the hovered shape no longer exists.
    pub fn forget_if(&mut self, missing: impl FnOnce(ElementId) -> bool) {
        if self.hovered.is_some_and(missing) {
            self.on_pointer_out();
        }
    }
}
