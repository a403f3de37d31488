//! The top-level GUI object driven by the host once per frame.

use crate::{
    input::{
        InputSnapshot,
        UiMouseState,
    },
    invalidation::Invalidation,
    settings::GuiSettings,
    theme::{
        Theme,
        DefaultTheme,
    },
    tree::WidgetTree,
    widget::WidgetId,
};
use graphics::{
    DrawSurface,
    Font,
    TargetId,
};
use vek::*;


/// Owns the widget tree, the theme, and the offscreen target the tree is
/// painted into.
///
/// The host calls `update` then `render` once per frame, in that order. The
/// tree is repainted into the offscreen target only while the invalidation
/// flag is raised; the target is composited onto the surface every frame.
///
/// The offscreen target belongs to whichever surface `render` is called
/// with, so a `Gui` should always render to the same surface.
#[derive(Debug)]
pub struct Gui {
    widgets: WidgetTree,
    mouse: UiMouseState,
    theme: Box<dyn Theme>,
    invalidation: Invalidation,
    target: Option<(TargetId, Extent2<i32>)>,
    size: Extent2<i32>,
}

impl Gui {
    /// Construct with default settings and a glyphless font.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_settings(width, height, &GuiSettings::default())
    }

    pub fn with_settings(width: i32, height: i32, settings: &GuiSettings) -> Self {
        let size = Extent2::new(width, height).map(|n| n.max(0));
        let invalidation = Invalidation::new();
        let widgets = WidgetTree::new(
            size,
            settings.padding,
            settings.item_spacing,
            invalidation.clone(),
        );
        Gui {
            widgets,
            mouse: UiMouseState::default(),
            theme: Box::new(DefaultTheme::new(settings.colors, Font::blank())),
            invalidation,
            target: None,
            size,
        }
    }

    pub fn set_theme<T: Theme + 'static>(&mut self, theme: T) {
        self.theme = Box::new(theme);
        self.invalidation.invalidate();
    }

    pub fn theme(&self) -> &dyn Theme {
        &*self.theme
    }

    /// The root container.
    pub fn root(&self) -> WidgetId {
        self.widgets.root()
    }

    pub fn widgets(&self) -> &WidgetTree {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut WidgetTree {
        &mut self.widgets
    }

    /// Look up a direct child of `container` by identifier.
    pub fn lookup(&self, container: WidgetId, id: &str) -> Option<WidgetId> {
        self.widgets.lookup(container, id)
    }

    /// Look up a widget by slash separated identifier path from the root.
    pub fn find(&self, path: &str) -> Option<WidgetId> {
        self.widgets.find(path)
    }

    pub fn size(&self) -> Extent2<i32> {
        self.size
    }

    /// Mouse state as of the last update.
    pub fn mouse(&self) -> &UiMouseState {
        &self.mouse
    }

    /// Resize the display area. The root container takes the new size and
    /// is laid out again on the next update.
    pub fn resize(&mut self, width: i32, height: i32) {
        let size = Extent2::new(width, height).map(|n| n.max(0));
        debug!(w = size.w, h = size.h, "resizing gui");
        self.size = size;
        let root = self.widgets.root();
        if let Some(container) = self.widgets.container_mut(root) {
            container.base_mut().set_size(size);
            container.mark_layout_dirty();
        }
        self.invalidation.invalidate();
    }

    /// Force a repaint on the next render.
    pub fn invalidate(&self) {
        self.invalidation.invalidate();
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidation.is_invalidated()
    }

    /// Take in this frame's input, then run layout and every widget's
    /// interaction state machine. Event callbacks run before this returns.
    pub fn update(&mut self, input: &InputSnapshot) {
        self.mouse.ingest(input);
        self.widgets.update(&self.mouse);
    }

    /// Repaint the offscreen target if invalidated, then composite it onto
    /// `surface` at the origin.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        let target = self.ensure_target(surface);

        if self.invalidation.take() {
            trace!("repainting gui");
            surface.begin_target(target);
            surface.clear();
            self.widgets.draw(surface, &*self.theme);
            surface.end_target();
        }

        surface.draw_target(target, 0, 0);
    }

    /// Get the offscreen target, reallocating it if the size changed. A new
    /// target always needs a repaint.
    fn ensure_target(&mut self, surface: &mut dyn DrawSurface) -> TargetId {
        match self.target {
            Some((target, size)) if size == self.size => target,
            stale => {
                if let Some((old, _)) = stale {
                    surface.destroy_target(old);
                }
                let target = surface.create_target(self.size.w, self.size.h);
                self.target = Some((target, self.size));
                self.invalidation.invalidate();
                target
            }
        }
    }
}


#[cfg(test)]
mod test_util {
    pub use crate::{
        input::{
            InputSnapshot,
            MouseButton,
        },
        layout::Orientation,
    };
    pub use std::{
        cell::Cell,
        rc::Rc,
    };

    pub fn up(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot::at(x, y)
    }

    pub fn down(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot::at(x, y).with_button(MouseButton::Left)
    }
}

#[test]
fn hit_testing_is_exact() {
    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let w = gui.widgets_mut().add_panel(root, "w").unwrap();
    gui.widgets_mut().base_mut(w).unwrap().set_pos(Vec2::new(10, 10));
    gui.widgets_mut().base_mut(w).unwrap().set_size(Extent2::new(50, 20));

    assert!(gui.widgets().contains_point(w, 10, 10));
    assert!(!gui.widgets().contains_point(w, 60, 30));
    assert!(gui.widgets().contains_point(w, 59, 29));
}

#[test]
fn vertical_stretch_layout() {
    let mut gui = Gui::new(120, 210);
    let root = gui.root();
    let col = gui.widgets_mut().add_vertical_container(root, "col").unwrap();
    let kids = ["a", "b", "c"].iter()
        .map(|id| gui.widgets_mut().add_checkbox(col, id).unwrap())
        .collect::<Vec<_>>();
    gui.update(&test_util::up(-1, -1));

    for (&kid, y) in kids.iter().zip([10, 76, 142]) {
        let base = gui.widgets().base(kid).unwrap();
        assert_eq!(base.y(), y);
        assert_eq!(base.h(), 56);
    }
}

#[test]
fn button_clicks_on_release() {
    use test_util::*;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let ok = gui.widgets_mut().add_button(root, "ok", "OK").unwrap();
    let clicks = Rc::new(Cell::new(0));
    let clicks2 = Rc::clone(&clicks);
    gui.widgets_mut().button_mut(ok).unwrap().on_clicked(move || clicks2.set(clicks2.get() + 1));

    let frames = [up(200, 200), up(50, 15), down(50, 15), up(50, 15)];
    let mut seen = Vec::new();
    for input in &frames {
        gui.update(input);
        seen.push(clicks.get());
    }
    assert_eq!(seen, vec![0, 0, 0, 1]);
    assert!(gui.widgets().base(ok).unwrap().hovered());
    assert!(!gui.widgets().base(ok).unwrap().active());
}

#[test]
fn button_click_suppressed_on_exit() {
    use test_util::*;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let ok = gui.widgets_mut().add_button(root, "ok", "OK").unwrap();
    let clicks = Rc::new(Cell::new(0));
    let clicks2 = Rc::clone(&clicks);
    gui.widgets_mut().button_mut(ok).unwrap().on_clicked(move || clicks2.set(clicks2.get() + 1));

    gui.update(&down(50, 15));
    assert!(gui.widgets().base(ok).unwrap().active());
    gui.update(&down(250, 150));
    assert!(!gui.widgets().base(ok).unwrap().active());
    assert!(!gui.widgets().base(ok).unwrap().hovered());
    gui.update(&up(250, 150));
    assert_eq!(clicks.get(), 0);
}

#[test]
fn checkbox_toggles_when_dragged_out() {
    use test_util::*;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let c = gui.widgets_mut().add_checkbox(root, "c").unwrap();
    let checked = Rc::new(Cell::new(0));
    let unchecked = Rc::new(Cell::new(0));
    let checked2 = Rc::clone(&checked);
    let unchecked2 = Rc::clone(&unchecked);
    let checkbox = gui.widgets_mut().checkbox_mut(c).unwrap();
    checkbox.on_checked(move || checked2.set(checked2.get() + 1));
    checkbox.on_unchecked(move || unchecked2.set(unchecked2.get() + 1));

    gui.update(&up(100, 100));
    gui.update(&down(10, 10));
    assert_eq!(checked.get(), 0);
    assert!(!gui.widgets().checkbox(c).unwrap().checked());

    gui.update(&down(100, 100));
    assert_eq!(checked.get(), 1);
    assert!(gui.widgets().checkbox(c).unwrap().checked());

    // a later release changes nothing
    gui.update(&up(100, 100));
    assert_eq!(checked.get(), 1);
    assert_eq!(unchecked.get(), 0);
    assert!(gui.widgets().checkbox(c).unwrap().checked());
}

#[test]
fn checkbox_click_toggles_both_ways() {
    use test_util::*;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let c = gui.widgets_mut().add_checkbox(root, "c").unwrap();
    let unchecked = Rc::new(Cell::new(0));
    let unchecked2 = Rc::clone(&unchecked);
    gui.widgets_mut().checkbox_mut(c).unwrap()
        .on_unchecked(move || unchecked2.set(unchecked2.get() + 1));

    for input in &[down(5, 5), up(5, 5), down(5, 5)] {
        gui.update(input);
    }
    assert!(gui.widgets().checkbox(c).unwrap().checked());
    gui.update(&up(5, 5));
    assert!(!gui.widgets().checkbox(c).unwrap().checked());
    assert_eq!(unchecked.get(), 1);
}

#[test]
fn slider_quantizes_dragged_value() {
    use test_util::*;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let s = gui.widgets_mut()
        .add_slider(root, "s", 0, 100, 10, Orientation::Horizontal)
        .unwrap();
    let changes = Rc::new(Cell::new(Vec::new()));
    let changes2 = Rc::clone(&changes);
    gui.widgets_mut().slider_mut(s).unwrap().on_value_changed(move |v| {
        let mut seen = changes2.take();
        seen.push(v);
        changes2.set(seen);
    });

    // factor = (94 - 2 - 0) / 200 = 0.46
    gui.update(&down(94, 15));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), 40);
    assert!(gui.widgets().slider(s).unwrap().dragging());

    // dragging continues outside the slider, clamped to the range
    gui.update(&down(94, 15));
    gui.update(&down(400, 100));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), 100);

    gui.update(&up(400, 100));
    assert!(!gui.widgets().slider(s).unwrap().dragging());
    gui.update(&up(10, 15));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), 100);
    assert_eq!(changes.take(), vec![40, 100]);
}

#[test]
fn vertical_slider_follows_cursor_y() {
    use test_util::*;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let s = gui.widgets_mut()
        .add_slider(root, "s", 0, 100, 10, Orientation::Vertical)
        .unwrap();
    assert_eq!(gui.widgets().base(s).unwrap().size(), Extent2::new(30, 200));

    // factor = (94 - 2 - 0) / 200 = 0.46
    gui.update(&down(15, 94));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), 40);

    // horizontal movement leaves the value alone
    gui.update(&down(25, 94));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), 40);

    gui.update(&down(25, 300));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), 100);
    gui.update(&up(25, 300));
    assert!(!gui.widgets().slider(s).unwrap().dragging());
}

#[test]
fn full_width_slider_drags_end_to_end() {
    use test_util::*;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let s = gui.widgets_mut()
        .add_slider(root, "s", i32::MIN, i32::MAX, 1, Orientation::Horizontal)
        .unwrap();
    assert_eq!(gui.widgets().slider(s).unwrap().step(), 1);

    gui.update(&down(100, 15));
    let mid = gui.widgets().slider(s).unwrap().value();
    assert!(mid > i32::MIN && mid < 0, "{}", mid);

    gui.update(&down(400, 15));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), i32::MAX);
    assert_eq!(gui.widgets().slider(s).unwrap().fraction(), 1.0);

    gui.update(&down(-50, 15));
    assert_eq!(gui.widgets().slider(s).unwrap().value(), i32::MIN);
    assert_eq!(gui.widgets().slider(s).unwrap().fraction(), 0.0);
}

#[test]
fn repaints_once_per_invalidation() {
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let ok = gui.widgets_mut().add_button(root, "ok", "OK").unwrap();
    let mut frame = FrameContent::new();
    let repaints = |frame: &FrameContent| {
        frame.count(|call| matches!(call, DrawCall::BeginTarget(_)))
    };

    assert!(gui.is_invalidated());
    gui.render(&mut frame);
    assert!(!gui.is_invalidated());
    assert_eq!(repaints(&frame), 1);

    gui.render(&mut frame);
    assert_eq!(repaints(&frame), 1);

    gui.widgets_mut().base_mut(ok).unwrap().set_x(40);
    assert!(gui.is_invalidated());
    gui.render(&mut frame);
    gui.render(&mut frame);
    assert_eq!(repaints(&frame), 2);

    gui.widgets_mut().base_mut(ok).unwrap().set_y(40);
    gui.render(&mut frame);
    assert_eq!(repaints(&frame), 3);

    // composited every frame, allocated once
    assert_eq!(frame.count(|call| matches!(call, DrawCall::DrawTarget { .. })), 5);
    assert_eq!(frame.count(|call| matches!(call, DrawCall::CreateTarget { .. })), 1);
}

#[test]
fn repaint_is_wrapped_in_target() {
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut gui = Gui::new(64, 48);
    let mut frame = FrameContent::new();
    gui.render(&mut frame);
    let target = match frame.calls[0] {
        DrawCall::CreateTarget { target, size } => {
            assert_eq!(size, Extent2::new(64, 48));
            target
        }
        ref call => panic!("expected target creation, got {:?}", call),
    };
    assert_eq!(&frame.calls[1..3], &[DrawCall::BeginTarget(target), DrawCall::Clear]);
    assert_eq!(
        &frame.calls[frame.calls.len() - 2..],
        &[DrawCall::EndTarget, DrawCall::DrawTarget { target, pos: Vec2::zero() }],
    );
}

#[test]
fn hover_invalidates() {
    use test_util::*;
    use graphics::FrameContent;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    gui.widgets_mut().add_button(root, "ok", "OK").unwrap();
    gui.update(&up(200, 200));
    gui.render(&mut FrameContent::new());

    gui.update(&up(201, 200));
    assert!(!gui.is_invalidated());
    gui.update(&up(10, 10));
    assert!(gui.is_invalidated());
}

#[test]
fn duplicate_identifier_is_rejected() {
    use crate::error::AddWidgetError;

    let mut gui = Gui::new(320, 240);
    let root = gui.root();
    let first = gui.widgets_mut().add_button(root, "ok", "OK").unwrap();
    let err = gui.widgets_mut().add_button(root, "ok", "Other").unwrap_err();
    assert_eq!(err, AddWidgetError::DuplicateId { id: "ok".to_owned() });
    assert_eq!(err.to_string(), "duplicate widget identifier \"ok\"");
    assert_eq!(gui.lookup(root, "ok"), Some(first));
    assert_eq!(gui.widgets().button(first).unwrap().label(), "OK");
    assert_eq!(gui.widgets().container(root).unwrap().children().len(), 1);
}

#[test]
fn resize_relayouts_and_reallocates_target() {
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut gui = Gui::new(100, 100);
    let root = gui.root();
    let row = gui.widgets_mut().add_horizontal_container(root, "row").unwrap();
    let ok = gui.widgets_mut().add_button(row, "ok", "").unwrap();
    let mut frame = FrameContent::new();
    gui.update(&InputSnapshot::at(-1, -1));
    gui.render(&mut frame);

    gui.resize(200, 50);
    assert!(gui.is_invalidated());
    gui.update(&InputSnapshot::at(-1, -1));
    gui.render(&mut frame);

    assert_eq!(gui.widgets().base(root).unwrap().size(), Extent2::new(200, 50));
    assert_eq!(frame.count(|call| matches!(call, DrawCall::DestroyTarget(_))), 1);
    assert_eq!(frame.count(|call| matches!(call, DrawCall::CreateTarget { .. })), 2);
    // the row keeps its creation size, its child is laid out within it
    assert_eq!(gui.widgets().base(ok).unwrap().size(), Extent2::new(80, 80));
    assert_eq!(gui.find("row/ok"), Some(ok));
}
