//! Push button.

use crate::{
    widget::WidgetBase,
    input::UiMouseState,
    geometry::contains_point,
    observers::Observers,
};
use vek::*;


pub const DEFAULT_SIZE: Extent2<i32> = Extent2 { w: 100, h: 30 };

pub const DEFAULT_LABEL: &str = "Click Me";


/// Fires `clicked` when the left button is released over it after being
/// pressed over it.
#[derive(Debug)]
pub struct Button {
    pub(crate) base: WidgetBase,
    label: String,
    clicked: Observers<()>,
}

impl Button {
    pub(crate) fn new(base: WidgetBase, label: String) -> Self {
        Button {
            base,
            label,
            clicked: Observers::new(),
        }
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.base.invalidate();
    }

    /// Subscribe to clicks.
    pub fn on_clicked<F: FnMut() + 'static>(&mut self, mut f: F) {
        self.clicked.subscribe(move |()| f());
    }

    /// Advance the interaction state, given the widget's global rectangle.
    pub(crate) fn update(&mut self, rect: Rect<i32, i32>, mouse: &UiMouseState) {
        if contains_point(rect, mouse.pos) {
            self.base.set_hovered(true);

            if mouse.left_down && !self.base.active() {
                self.base.set_active(true);
            } else if !mouse.left_down && self.base.active() {
                self.base.set_active(false);
                debug!(label = %self.label, "button clicked");
                self.clicked.notify(());
            }
        } else if self.base.hovered() {
            // leaving cancels a press without clicking
            self.base.set_active(false);
            self.base.set_hovered(false);
        }
    }
}
