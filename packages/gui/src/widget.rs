//! State common to every widget, and the closed set of widget kinds.

use crate::{
    invalidation::Invalidation,
    container::Container,
    widgets::{
        button::Button,
        checkbox::CheckBox,
        slider::Slider,
    },
};
use vek::*;


/// Handle to a widget within its `WidgetTree`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) usize);

impl WidgetId {
    /// Index of the widget's slot in the tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}


/// Geometry and interaction flags shared by all widgets.
///
/// Position is local, relative to the parent container. Any change to
/// position, size, or the hover/active flags raises the GUI's invalidation
/// flag.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    parent: Option<WidgetId>,
    pos: Vec2<i32>,
    size: Extent2<i32>,
    hovered: bool,
    active: bool,
    is_container: bool,
    invalidation: Invalidation,
}

impl WidgetBase {
    pub(crate) fn new(
        parent: Option<WidgetId>,
        size: Extent2<i32>,
        is_container: bool,
        invalidation: Invalidation,
    ) -> Self {
        WidgetBase {
            parent,
            pos: Vec2::zero(),
            size: size.map(|n| n.max(0)),
            hovered: false,
            active: false,
            is_container,
            invalidation,
        }
    }

    /// Owning container, or `None` for the root.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    pub fn w(&self) -> i32 {
        self.size.w
    }

    pub fn h(&self) -> i32 {
        self.size.h
    }

    pub fn pos(&self) -> Vec2<i32> {
        self.pos
    }

    pub fn size(&self) -> Extent2<i32> {
        self.size
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn is_container(&self) -> bool {
        self.is_container
    }

    /// Rectangle at the local position.
    pub fn local_rect(&self) -> Rect<i32, i32> {
        Rect::new(self.pos.x, self.pos.y, self.size.w, self.size.h)
    }

    pub fn set_x(&mut self, x: i32) {
        self.pos.x = x;
        self.invalidate();
    }

    pub fn set_y(&mut self, y: i32) {
        self.pos.y = y;
        self.invalidate();
    }

    /// Set the width. Negative values clamp to zero.
    pub fn set_w(&mut self, w: i32) {
        self.size.w = w.max(0);
        self.invalidate();
    }

    /// Set the height. Negative values clamp to zero.
    pub fn set_h(&mut self, h: i32) {
        self.size.h = h.max(0);
        self.invalidate();
    }

    pub fn set_pos(&mut self, pos: Vec2<i32>) {
        self.pos = pos;
        self.invalidate();
    }

    pub fn set_size(&mut self, size: Extent2<i32>) {
        self.size = size.map(|n| n.max(0));
        self.invalidate();
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.invalidate();
        }
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.invalidate();
        }
    }

    /// Raise the GUI's invalidation flag.
    pub fn invalidate(&self) {
        self.invalidation.invalidate();
    }
}


/// A node in the widget tree.
#[derive(Debug)]
pub enum Widget {
    /// Plain container, optionally with a stack layout.
    Container(Container),
    /// Container drawn with a framed background.
    Panel(Container),
    Button(Button),
    CheckBox(CheckBox),
    Slider(Slider),
}

impl Widget {
    pub fn base(&self) -> &WidgetBase {
        match self {
            Widget::Container(c) | Widget::Panel(c) => &c.base,
            Widget::Button(w) => &w.base,
            Widget::CheckBox(w) => &w.base,
            Widget::Slider(w) => &w.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        match self {
            Widget::Container(c) | Widget::Panel(c) => &mut c.base,
            Widget::Button(w) => &mut w.base,
            Widget::CheckBox(w) => &mut w.base,
            Widget::Slider(w) => &mut w.base,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Widget::Container(c) | Widget::Panel(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Widget::Container(c) | Widget::Panel(c) => Some(c),
            _ => None,
        }
    }

    /// Short name of the widget kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Widget::Container(_) => "container",
            Widget::Panel(_) => "panel",
            Widget::Button(_) => "button",
            Widget::CheckBox(_) => "checkbox",
            Widget::Slider(_) => "slider",
        }
    }
}


#[test]
fn setters_invalidate_and_clamp() {
    let flag = Invalidation::new();
    flag.take();
    let mut base = WidgetBase::new(None, Extent2::new(10, 10), false, flag.clone());
    assert!(!flag.is_invalidated());

    base.set_w(-5);
    assert_eq!(base.w(), 0);
    assert!(flag.take());

    base.set_pos(Vec2::new(3, 4));
    assert_eq!(base.local_rect(), Rect::new(3, 4, 0, 10));
    assert!(flag.take());
}

#[test]
fn hover_invalidates_only_on_change() {
    let flag = Invalidation::new();
    let mut base = WidgetBase::new(None, Extent2::new(10, 10), false, flag.clone());
    flag.take();

    base.set_hovered(false);
    assert!(!flag.is_invalidated());
    base.set_hovered(true);
    assert!(flag.take());
    base.set_hovered(true);
    assert!(!flag.is_invalidated());
}
