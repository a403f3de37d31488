//! Two-state toggle box.

use crate::{
    widget::WidgetBase,
    input::UiMouseState,
    geometry::contains_point,
    observers::Observers,
};
use vek::*;


pub const DEFAULT_SIZE: Extent2<i32> = Extent2 { w: 20, h: 20 };


/// Toggles when the left button is released over it after being pressed
/// over it.
///
/// Dragging the cursor out of the box while pressed also toggles it, and
/// fires the event for the new state at the moment the cursor leaves.
#[derive(Debug)]
pub struct CheckBox {
    pub(crate) base: WidgetBase,
    checked: bool,
    on_checked: Observers<()>,
    on_unchecked: Observers<()>,
}

impl CheckBox {
    pub(crate) fn new(base: WidgetBase) -> Self {
        CheckBox {
            base,
            checked: false,
            on_checked: Observers::new(),
            on_unchecked: Observers::new(),
        }
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state directly. Does not fire events.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        self.base.invalidate();
    }

    pub fn on_checked<F: FnMut() + 'static>(&mut self, mut f: F) {
        self.on_checked.subscribe(move |()| f());
    }

    pub fn on_unchecked<F: FnMut() + 'static>(&mut self, mut f: F) {
        self.on_unchecked.subscribe(move |()| f());
    }

    /// Advance the interaction state, given the widget's global rectangle.
    ///
    /// Leaving the box while pressed still toggles it, and fires
    /// `on_checked`/`on_unchecked` for the new state. A button cancels
    /// silently in the same case; whether the checkbox should too is an
    /// open product question.
    pub(crate) fn update(&mut self, rect: Rect<i32, i32>, mouse: &UiMouseState) {
        if contains_point(rect, mouse.pos) {
            self.base.set_hovered(true);

            if mouse.left_down && !self.base.active() {
                self.base.set_active(true);
            } else if !mouse.left_down && self.base.active() {
                self.base.set_active(false);
                self.toggle();
            }
        } else {
            if self.base.active() {
                self.base.set_active(false);
                self.toggle();
            }
            self.base.set_hovered(false);
        }
    }

    fn toggle(&mut self) {
        self.checked = !self.checked;
        self.base.invalidate();
        debug!(checked = self.checked, "checkbox toggled");
        if self.checked {
            self.on_checked.notify(());
        } else {
            self.on_unchecked.notify(());
        }
    }
}
