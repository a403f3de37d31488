//! Widgets which hold other widgets.

use crate::{
    widget::{
        WidgetBase,
        WidgetId,
    },
    layout::StackLayout,
};
use std::collections::HashMap;


/// Ordered children plus an identifier index.
///
/// Child order is both layout order and paint order. A container with a
/// `StackLayout` positions its children on the next update after its layout
/// is marked dirty; a plain container leaves them where the host put them.
#[derive(Debug)]
pub struct Container {
    pub(crate) base: WidgetBase,
    children: Vec<WidgetId>,
    ids: HashMap<String, usize>,
    padding: i32,
    layout: Option<StackLayout>,
    layout_dirty: bool,
}

impl Container {
    pub(crate) fn new(base: WidgetBase, padding: i32, layout: Option<StackLayout>) -> Self {
        Container {
            base,
            children: Vec::new(),
            ids: HashMap::new(),
            padding,
            layout,
            layout_dirty: true,
        }
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Look up a direct child by identifier.
    pub fn child(&self, id: &str) -> Option<WidgetId> {
        self.ids.get(id).map(|&i| self.children[i])
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Identifiers of the children, in insertion order.
    pub fn child_ids(&self) -> Vec<&str> {
        let mut ids = self.ids.iter()
            .map(|(id, &i)| (i, id.as_str()))
            .collect::<Vec<_>>();
        ids.sort_unstable_by_key(|&(i, _)| i);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn padding(&self) -> i32 {
        self.padding
    }

    pub fn layout(&self) -> Option<&StackLayout> {
        self.layout.as_ref()
    }

    pub fn set_padding(&mut self, padding: i32) {
        self.padding = padding;
        self.mark_layout_dirty();
    }

    /// Set the gap between stacked children. No effect without a stack
    /// layout.
    pub fn set_item_spacing(&mut self, item_spacing: i32) {
        if let Some(layout) = self.layout.as_mut() {
            layout.item_spacing = item_spacing;
            self.mark_layout_dirty();
        }
    }

    /// Set whether stacked children are stretched. No effect without a stack
    /// layout.
    pub fn set_stretch_items(&mut self, stretch_items: bool) {
        if let Some(layout) = self.layout.as_mut() {
            layout.stretch_items = stretch_items;
            self.mark_layout_dirty();
        }
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Recompute the layout on the next update.
    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
        self.base.invalidate();
    }

    /// Append a child. The caller has already checked `id` is free.
    pub(crate) fn insert(&mut self, id: String, child: WidgetId) {
        debug_assert!(!self.ids.contains_key(&id));
        self.ids.insert(id, self.children.len());
        self.children.push(child);
        self.layout_dirty = true;
    }

    /// Clear the dirty flag, returning whether it was set.
    pub(crate) fn take_layout_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.layout_dirty, false)
    }
}
