//! The widget arena, and the update and draw passes over it.

use crate::{
    widget::{
        Widget,
        WidgetBase,
        WidgetId,
    },
    container::Container,
    layout::{
        Orientation,
        StackLayout,
        LayoutItem,
    },
    widgets::{
        button::{
            self,
            Button,
        },
        checkbox::{
            self,
            CheckBox,
        },
        slider::{
            self,
            Slider,
        },
    },
    error::AddWidgetError,
    input::UiMouseState,
    invalidation::Invalidation,
    geometry,
    theme::Theme,
};
use graphics::DrawSurface;
use slab::Slab;
use vek::*;


/// Size of a freshly added panel.
pub const PANEL_DEFAULT_SIZE: Extent2<i32> = Extent2 { w: 200, h: 200 };


/// Every widget of one GUI, addressed by `WidgetId`.
///
/// Widgets are created only through the `add_*` methods, which register
/// them under an identifier unique within their parent container, and live
/// as long as the tree. Each widget records its parent's handle, and global
/// positions are composed by walking up those handles.
#[derive(Debug)]
pub struct WidgetTree {
    widgets: Slab<Widget>,
    root: WidgetId,
    invalidation: Invalidation,
    padding: i32,
    item_spacing: i32,
}

impl WidgetTree {
    /// Tree with a plain root container of the given size.
    ///
    /// `padding` and `item_spacing` are the defaults for containers added
    /// later.
    pub(crate) fn new(
        size: Extent2<i32>,
        padding: i32,
        item_spacing: i32,
        invalidation: Invalidation,
    ) -> Self {
        let mut widgets = Slab::new();
        let base = WidgetBase::new(None, size, true, invalidation.clone());
        let root = WidgetId(widgets.insert(Widget::Container(Container::new(base, padding, None))));
        WidgetTree {
            widgets,
            root,
            invalidation,
            padding,
            item_spacing,
        }
    }

    /// The root container.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Number of widgets, including the root.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id.0)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(id.0)
    }

    pub fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.get(id).map(Widget::base)
    }

    pub fn base_mut(&mut self, id: WidgetId) -> Option<&mut WidgetBase> {
        self.get_mut(id).map(Widget::base_mut)
    }

    pub fn container(&self, id: WidgetId) -> Option<&Container> {
        self.get(id).and_then(Widget::as_container)
    }

    pub fn container_mut(&mut self, id: WidgetId) -> Option<&mut Container> {
        self.get_mut(id).and_then(Widget::as_container_mut)
    }

    pub fn button(&self, id: WidgetId) -> Option<&Button> {
        match self.get(id) {
            Some(&Widget::Button(ref w)) => Some(w),
            _ => None,
        }
    }

    pub fn button_mut(&mut self, id: WidgetId) -> Option<&mut Button> {
        match self.get_mut(id) {
            Some(&mut Widget::Button(ref mut w)) => Some(w),
            _ => None,
        }
    }

    pub fn checkbox(&self, id: WidgetId) -> Option<&CheckBox> {
        match self.get(id) {
            Some(&Widget::CheckBox(ref w)) => Some(w),
            _ => None,
        }
    }

    pub fn checkbox_mut(&mut self, id: WidgetId) -> Option<&mut CheckBox> {
        match self.get_mut(id) {
            Some(&mut Widget::CheckBox(ref mut w)) => Some(w),
            _ => None,
        }
    }

    pub fn slider(&self, id: WidgetId) -> Option<&Slider> {
        match self.get(id) {
            Some(&Widget::Slider(ref w)) => Some(w),
            _ => None,
        }
    }

    pub fn slider_mut(&mut self, id: WidgetId) -> Option<&mut Slider> {
        match self.get_mut(id) {
            Some(&mut Widget::Slider(ref mut w)) => Some(w),
            _ => None,
        }
    }

    /// Position in screen space: the sum of local positions up to the root.
    pub fn global_pos(&self, id: WidgetId) -> Option<Vec2<i32>> {
        let mut pos = Vec2::zero();
        let mut next = Some(id);
        while let Some(curr) = next {
            let base = self.base(curr)?;
            pos += base.pos();
            next = base.parent();
        }
        Some(pos)
    }

    /// Rectangle at the global position.
    pub fn bounding_rect(&self, id: WidgetId) -> Option<Rect<i32, i32>> {
        let pos = self.global_pos(id)?;
        let size = self.base(id)?.size();
        Some(Rect::new(pos.x, pos.y, size.w, size.h))
    }

    /// Hit-test against the widget's bounding rectangle, excluding the right
    /// and bottom edges. False for unknown handles.
    pub fn contains_point(&self, id: WidgetId, x: i32, y: i32) -> bool {
        self.bounding_rect(id)
            .map(|rect| geometry::contains_point(rect, Vec2::new(x, y)))
            .unwrap_or(false)
    }

    /// Look up a direct child of `container` by identifier.
    pub fn lookup(&self, container: WidgetId, id: &str) -> Option<WidgetId> {
        self.container(container)?.child(id)
    }

    /// Look up a widget by slash separated identifier path from the root,
    /// such as `"column/ok"`. The empty path names the root.
    pub fn find(&self, path: &str) -> Option<WidgetId> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self.root, |curr, part| self.lookup(curr, part))
    }

    /// Add a button labeled `label`, or "Click Me" if `label` is empty.
    pub fn add_button(
        &mut self,
        parent: WidgetId,
        id: &str,
        label: &str,
    ) -> Result<WidgetId, AddWidgetError> {
        let label =
            if label.is_empty() { button::DEFAULT_LABEL }
            else { label };
        self.try_add(parent, id, Some(button::DEFAULT_SIZE), false, |base| {
            Widget::Button(Button::new(base, label.to_owned()))
        })
    }

    pub fn add_checkbox(
        &mut self,
        parent: WidgetId,
        id: &str,
    ) -> Result<WidgetId, AddWidgetError> {
        self.try_add(parent, id, Some(checkbox::DEFAULT_SIZE), false, |base| {
            Widget::CheckBox(CheckBox::new(base))
        })
    }

    /// Add a slider starting at its minimum value. A reversed range is
    /// swapped, and `step` is normalized into range.
    pub fn add_slider(
        &mut self,
        parent: WidgetId,
        id: &str,
        min: i32,
        max: i32,
        step: i32,
        orientation: Orientation,
    ) -> Result<WidgetId, AddWidgetError> {
        self.try_add(parent, id, Some(slider::DEFAULT_SIZE), false, |base| {
            Widget::Slider(Slider::new(base, min, max, step, orientation))
        })
    }

    pub fn add_panel(
        &mut self,
        parent: WidgetId,
        id: &str,
    ) -> Result<WidgetId, AddWidgetError> {
        let padding = self.padding;
        self.try_add(parent, id, Some(PANEL_DEFAULT_SIZE), true, |base| {
            Widget::Panel(Container::new(base, padding, None))
        })
    }

    /// Add a plain container, the same size as its parent.
    pub fn add_container(
        &mut self,
        parent: WidgetId,
        id: &str,
    ) -> Result<WidgetId, AddWidgetError> {
        self.add_container_with(parent, id, None)
    }

    /// Add a container stacking its children left to right, the same size
    /// as its parent.
    pub fn add_horizontal_container(
        &mut self,
        parent: WidgetId,
        id: &str,
    ) -> Result<WidgetId, AddWidgetError> {
        let layout = StackLayout::new(Orientation::Horizontal, self.item_spacing);
        self.add_container_with(parent, id, Some(layout))
    }

    /// Add a container stacking its children top to bottom, the same size
    /// as its parent.
    pub fn add_vertical_container(
        &mut self,
        parent: WidgetId,
        id: &str,
    ) -> Result<WidgetId, AddWidgetError> {
        let layout = StackLayout::new(Orientation::Vertical, self.item_spacing);
        self.add_container_with(parent, id, Some(layout))
    }

    fn add_container_with(
        &mut self,
        parent: WidgetId,
        id: &str,
        layout: Option<StackLayout>,
    ) -> Result<WidgetId, AddWidgetError> {
        let padding = self.padding;
        self.try_add(parent, id, None, true, |base| {
            Widget::Container(Container::new(base, padding, layout))
        })
    }

    /// Validate, then insert a widget built by `make` and register it under
    /// `id`. `size` of `None` means the parent's size.
    fn try_add<F>(
        &mut self,
        parent: WidgetId,
        id: &str,
        size: Option<Extent2<i32>>,
        is_container: bool,
        make: F,
    ) -> Result<WidgetId, AddWidgetError>
    where
        F: FnOnce(WidgetBase) -> Widget,
    {
        // validate
        let container = self.widgets.get(parent.0)
            .ok_or(AddWidgetError::NoSuchWidget(parent))?
            .as_container()
            .ok_or(AddWidgetError::NotAContainer(parent))?;
        if container.contains_id(id) {
            warn!(id, parent = parent.index(), "rejected duplicate widget identifier");
            return Err(AddWidgetError::DuplicateId { id: id.to_owned() });
        }
        let size = size.unwrap_or(container.base.size());

        // insert
        let base = WidgetBase::new(Some(parent), size, is_container, self.invalidation.clone());
        let child = WidgetId(self.widgets.insert(make(base)));
        if let Some(container) = self.container_mut(parent) {
            container.insert(id.to_owned(), child);
        }
        self.invalidation.invalidate();
        Ok(child)
    }

    /// Run the update pass: recompute dirty layouts and advance every
    /// visible widget's interaction state, in insertion order.
    pub(crate) fn update(&mut self, mouse: &UiMouseState) {
        self.update_widget(self.root, Vec2::zero(), mouse);
    }

    fn update_widget(&mut self, id: WidgetId, origin: Vec2<i32>, mouse: &UiMouseState) {
        let (rect, is_container) = match self.get(id) {
            Some(widget) => (
                translate(widget.base().local_rect(), origin),
                widget.as_container().is_some(),
            ),
            None => return,
        };

        if is_container {
            self.layout_if_dirty(id);

            let children = self.container(id)
                .map(|c| c.children().to_vec())
                .unwrap_or_default();
            for child in children {
                let child_rect = match self.base(child) {
                    Some(base) => translate(base.local_rect(), rect.position()),
                    None => continue,
                };
                // coarse culling, partially visible children still update
                if geometry::intersects(rect, child_rect) {
                    self.update_widget(child, rect.position(), mouse);
                }
            }
        } else {
            match self.get_mut(id) {
                Some(Widget::Button(w)) => w.update(rect, mouse),
                Some(Widget::CheckBox(w)) => w.update(rect, mouse),
                Some(Widget::Slider(w)) => w.update(rect, mouse),
                _ => (),
            }
        }
    }

    /// Recompute a stack container's child geometry if its layout is dirty.
    fn layout_if_dirty(&mut self, id: WidgetId) {
        let container = match self.container_mut(id) {
            Some(container) => container,
            None => return,
        };
        if !container.take_layout_dirty() {
            return;
        }
        let layout = match container.layout() {
            Some(&layout) => layout,
            None => return,
        };
        let size = container.base().size();
        let padding = container.padding();
        let children = container.children().to_vec();

        let items = children.iter()
            .filter_map(|&child| self.base(child))
            .map(|base| LayoutItem {
                size: base.size(),
                is_container: base.is_container(),
            })
            .collect::<Vec<_>>();
        let rects = layout.arrange(size, padding, &items);
        debug!(
            container = id.index(),
            children = children.len(),
            axis = ?layout.axis,
            "recomputed layout"
        );

        for (&child, rect) in children.iter().zip(rects) {
            if let Some(widget) = self.get_mut(child) {
                let resized = widget.base().size() != rect.extent();
                widget.base_mut().set_pos(rect.position());
                widget.base_mut().set_size(rect.extent());
                if resized {
                    if let Some(container) = widget.as_container_mut() {
                        container.mark_layout_dirty();
                    }
                }
            }
        }
    }

    /// Run the draw pass. Each container clips its descendants to its own
    /// rectangle, and children paint in insertion order.
    pub fn draw(&self, surface: &mut dyn DrawSurface, theme: &dyn Theme) {
        self.draw_widget(self.root, Vec2::zero(), surface, theme);
    }

    fn draw_widget(
        &self,
        id: WidgetId,
        origin: Vec2<i32>,
        surface: &mut dyn DrawSurface,
        theme: &dyn Theme,
    ) {
        let widget = match self.get(id) {
            Some(widget) => widget,
            None => return,
        };
        let rect = translate(widget.base().local_rect(), origin);
        match widget {
            Widget::Button(w) => theme.draw_button(surface, rect, w),
            Widget::CheckBox(w) => theme.draw_checkbox(surface, rect, w),
            Widget::Slider(w) => theme.draw_slider(surface, rect, w),
            Widget::Panel(c) => {
                theme.draw_panel(surface, rect, c);
                self.draw_children(c, rect, surface, theme);
            }
            Widget::Container(c) => self.draw_children(c, rect, surface, theme),
        }
    }

    fn draw_children(
        &self,
        container: &Container,
        rect: Rect<i32, i32>,
        surface: &mut dyn DrawSurface,
        theme: &dyn Theme,
    ) {
        surface.begin_clip(rect.x, rect.y, rect.w, rect.h);
        for &child in container.children() {
            self.draw_widget(child, rect.position(), surface, theme);
        }
        surface.end_clip();
    }
}

fn translate(rect: Rect<i32, i32>, by: Vec2<i32>) -> Rect<i32, i32> {
    Rect::new(rect.x + by.x, rect.y + by.y, rect.w, rect.h)
}


#[cfg(test)]
fn test_tree(w: i32, h: i32) -> WidgetTree {
    WidgetTree::new(Extent2::new(w, h), 10, 10, Invalidation::new())
}

#[cfg(test)]
fn mouse_at(x: i32, y: i32, left_down: bool) -> UiMouseState {
    UiMouseState {
        pos: Vec2::new(x, y),
        last_pos: Vec2::new(x, y),
        left_down,
        ..Default::default()
    }
}

#[test]
fn duplicate_identifier_is_rejected() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let ok = tree.add_button(root, "ok", "OK").unwrap();
    let err = tree.add_checkbox(root, "ok").unwrap_err();
    assert_eq!(err, AddWidgetError::DuplicateId { id: "ok".to_owned() });
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.container(root).unwrap().children(), &[ok]);
    assert_eq!(tree.lookup(root, "ok"), Some(ok));
    assert!(tree.button(ok).is_some());
}

#[test]
fn adding_to_a_leaf_or_stale_handle_fails() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let ok = tree.add_button(root, "ok", "").unwrap();
    assert_eq!(tree.button(ok).unwrap().label(), "Click Me");
    assert_eq!(
        tree.add_button(ok, "inner", "x").unwrap_err(),
        AddWidgetError::NotAContainer(ok),
    );
    assert_eq!(
        tree.add_panel(WidgetId(99), "p").unwrap_err(),
        AddWidgetError::NoSuchWidget(WidgetId(99)),
    );
    assert_eq!(tree.len(), 2);
}

#[test]
fn default_sizes() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let b = tree.add_button(root, "b", "b").unwrap();
    let c = tree.add_checkbox(root, "c").unwrap();
    let p = tree.add_panel(root, "p").unwrap();
    let h = tree.add_slider(root, "h", 0, 10, 1, Orientation::Horizontal).unwrap();
    let v = tree.add_slider(root, "v", 0, 10, 1, Orientation::Vertical).unwrap();
    let col = tree.add_vertical_container(root, "col").unwrap();
    assert_eq!(tree.base(b).unwrap().size(), Extent2::new(100, 30));
    assert_eq!(tree.base(c).unwrap().size(), Extent2::new(20, 20));
    assert_eq!(tree.base(p).unwrap().size(), Extent2::new(200, 200));
    assert_eq!(tree.base(h).unwrap().size(), Extent2::new(200, 30));
    assert_eq!(tree.base(v).unwrap().size(), Extent2::new(30, 200));
    assert_eq!(tree.base(col).unwrap().size(), Extent2::new(320, 240));
    assert!(tree.base(col).unwrap().is_container());
    assert!(!tree.base(b).unwrap().is_container());
}

#[test]
fn global_position_composes_through_parents() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let outer = tree.add_container(root, "outer").unwrap();
    let inner = tree.add_container(outer, "inner").unwrap();
    let ok = tree.add_button(inner, "ok", "OK").unwrap();
    tree.base_mut(outer).unwrap().set_pos(Vec2::new(10, 10));
    tree.base_mut(inner).unwrap().set_pos(Vec2::new(5, 7));
    tree.base_mut(ok).unwrap().set_pos(Vec2::new(-5, 13));

    assert_eq!(tree.global_pos(ok), Some(Vec2::new(10, 30)));
    assert_eq!(tree.bounding_rect(ok), Some(Rect::new(10, 30, 100, 30)));
    assert_eq!(tree.find("outer/inner/ok"), Some(ok));
    assert_eq!(tree.find(""), Some(root));
    assert_eq!(tree.find("outer/missing"), None);
}

#[test]
fn hit_test_on_global_rect() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let c = tree.add_container(root, "c").unwrap();
    tree.base_mut(c).unwrap().set_pos(Vec2::new(4, 6));
    let w = tree.add_panel(c, "w").unwrap();
    tree.base_mut(w).unwrap().set_pos(Vec2::new(6, 4));
    tree.base_mut(w).unwrap().set_size(Extent2::new(50, 20));

    assert!(tree.contains_point(w, 10, 10));
    assert!(tree.contains_point(w, 59, 29));
    assert!(!tree.contains_point(w, 60, 30));
    assert!(!tree.contains_point(WidgetId(42), 10, 10));
}

#[test]
fn vertical_layout_runs_on_update() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let col = tree.add_vertical_container(root, "col").unwrap();
    tree.base_mut(col).unwrap().set_size(Extent2::new(120, 210));
    let kids = ["a", "b", "c"].iter()
        .map(|id| tree.add_button(col, id, "").unwrap())
        .collect::<Vec<_>>();

    // layout is lazy
    assert_eq!(tree.base(kids[1]).unwrap().y(), 0);

    tree.update(&mouse_at(-100, -100, false));
    let ys = kids.iter().map(|&k| tree.base(k).unwrap().y()).collect::<Vec<_>>();
    let hs = kids.iter().map(|&k| tree.base(k).unwrap().h()).collect::<Vec<_>>();
    assert_eq!(ys, vec![10, 76, 142]);
    assert_eq!(hs, vec![56, 56, 56]);
    assert!(kids.iter().all(|&k| tree.base(k).unwrap().w() == 100));
    assert!(!tree.container(col).unwrap().is_layout_dirty());
}

#[test]
fn padding_and_spacing_changes_relayout() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let col = tree.add_vertical_container(root, "col").unwrap();
    tree.base_mut(col).unwrap().set_size(Extent2::new(120, 210));
    let kids = ["a", "b", "c"].iter()
        .map(|id| tree.add_button(col, id, "").unwrap())
        .collect::<Vec<_>>();
    tree.update(&mouse_at(-100, -100, false));

    tree.container_mut(col).unwrap().set_padding(20);
    assert!(tree.container(col).unwrap().is_layout_dirty());
    tree.update(&mouse_at(-100, -100, false));
    let ys = kids.iter().map(|&k| tree.base(k).unwrap().y()).collect::<Vec<_>>();
    assert_eq!(ys, vec![20, 80, 140]);
    assert_eq!(tree.base(kids[0]).unwrap().size(), Extent2::new(80, 50));

    tree.container_mut(col).unwrap().set_item_spacing(0);
    tree.update(&mouse_at(-100, -100, false));
    let ys = kids.iter().map(|&k| tree.base(k).unwrap().y()).collect::<Vec<_>>();
    assert_eq!(ys, vec![20, 76, 132]);
}

#[test]
fn children_report_ids_and_kinds() {
    let mut tree = test_tree(320, 240);
    let root = tree.root();
    tree.add_slider(root, "z", 0, 10, 1, Orientation::Horizontal).unwrap();
    tree.add_panel(root, "a").unwrap();
    tree.add_checkbox(root, "m").unwrap();

    let container = tree.container(root).unwrap();
    assert_eq!(container.child_ids(), vec!["z", "a", "m"]);
    let kinds = container.children().iter()
        .map(|&k| tree.get(k).unwrap().kind_name())
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec!["slider", "panel", "checkbox"]);
    assert_eq!(tree.get(root).unwrap().kind_name(), "container");
}

#[test]
fn nested_stack_fills_cross_axis() {
    let mut tree = test_tree(400, 300);
    let root = tree.root();
    let row = tree.add_horizontal_container(root, "row").unwrap();
    tree.container_mut(row).unwrap().set_stretch_items(false);
    let col = tree.add_vertical_container(row, "col").unwrap();
    let ok = tree.add_button(col, "ok", "").unwrap();

    tree.update(&mouse_at(-100, -100, false));
    assert_eq!(tree.base(col).unwrap().size(), Extent2::new(400, 280));
    assert_eq!(tree.bounding_rect(ok), Some(Rect::new(20, 20, 380, 260)));
}

#[test]
fn culled_children_do_not_update() {
    let mut tree = test_tree(100, 100);
    let root = tree.root();
    let ok = tree.add_button(root, "ok", "").unwrap();
    tree.base_mut(ok).unwrap().set_pos(Vec2::new(150, 0));
    tree.update(&mouse_at(160, 10, false));
    assert!(!tree.base(ok).unwrap().hovered());

    tree.base_mut(ok).unwrap().set_pos(Vec2::new(90, 0));
    tree.update(&mouse_at(160, 10, false));
    assert!(tree.base(ok).unwrap().hovered());
}

#[test]
fn draw_clips_containers_in_insertion_order() {
    use crate::theme::DefaultTheme;
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut tree = test_tree(320, 240);
    let root = tree.root();
    let panel = tree.add_panel(root, "panel").unwrap();
    tree.base_mut(panel).unwrap().set_pos(Vec2::new(20, 20));
    let ok = tree.add_button(panel, "ok", "OK").unwrap();
    tree.base_mut(ok).unwrap().set_pos(Vec2::new(5, 5));

    let mut frame = FrameContent::new();
    tree.draw(&mut frame, &DefaultTheme::default());

    let clips = frame.calls.iter()
        .filter_map(|call| match call {
            &DrawCall::BeginClip(rect) => Some(rect),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(clips, vec![Rect::new(0, 0, 320, 240), Rect::new(20, 20, 200, 200)]);
    assert_eq!(frame.count(|call| call == &DrawCall::EndClip), 2);

    // panel frame before the clip it opens, button text inside it
    let panel_fill = frame.calls.iter()
        .position(|call| call == &DrawCall::FillRect(Rect::new(22, 22, 196, 196)))
        .unwrap();
    let panel_clip = frame.calls.iter()
        .position(|call| call == &DrawCall::BeginClip(Rect::new(20, 20, 200, 200)))
        .unwrap();
    let text = frame.calls.iter()
        .position(|call| matches!(call, DrawCall::Text { .. }))
        .unwrap();
    assert!(panel_fill < panel_clip);
    assert!(panel_clip < text);
}
