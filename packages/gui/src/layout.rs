//! Stack layouts, arranging a container's children along one axis.

use vek::*;


#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Stack layout settings attached to a container.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StackLayout {
    pub axis: Orientation,
    /// Gap between adjacent children along the axis.
    pub item_spacing: i32,
    /// Whether children are resized to share the axis evenly.
    pub stretch_items: bool,
}

impl StackLayout {
    pub fn new(axis: Orientation, item_spacing: i32) -> Self {
        StackLayout {
            axis,
            item_spacing,
            stretch_items: true,
        }
    }

    /// Compute the local rectangles of `items` within a container of the
    /// given size.
    pub fn arrange(
        &self,
        container: Extent2<i32>,
        padding: i32,
        items: &[LayoutItem],
    ) -> Vec<Rect<i32, i32>> {
        match self.axis {
            Orientation::Vertical => v_arrange(
                container,
                padding,
                self.item_spacing,
                self.stretch_items,
                items,
            ),
            Orientation::Horizontal => h_arrange(
                container,
                padding,
                self.item_spacing,
                self.stretch_items,
                items,
            ),
        }
    }
}

/// What the layout needs to know about a child.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayoutItem {
    pub size: Extent2<i32>,
    pub is_container: bool,
}


fn v_arrange(
    container: Extent2<i32>,
    padding: i32,
    item_spacing: i32,
    stretch_items: bool,
    items: &[LayoutItem],
) -> Vec<Rect<i32, i32>> {
    if items.is_empty() {
        return Vec::new();
    }

    let n = items.len() as i32;
    let stretched_h = ((container.h - 2 * padding - (n - 1) * item_spacing) / n).max(0);
    let stretched_w = (container.w - 2 * padding).max(0);

    let mut rects = Vec::with_capacity(items.len());
    let mut y = padding;
    for item in items {
        let h =
            if stretch_items { stretched_h }
            else { item.size.h };
        let w =
            if stretch_items || item.is_container { stretched_w }
            else { item.size.w };
        rects.push(Rect::new(padding, y, w, h));
        y += h + item_spacing;
    }
    rects
}

fn h_arrange(
    container: Extent2<i32>,
    padding: i32,
    item_spacing: i32,
    stretch_items: bool,
    items: &[LayoutItem],
) -> Vec<Rect<i32, i32>> {
    let swapped = items.iter()
        .map(|item| LayoutItem {
            size: swap_extent(item.size),
            ..*item
        })
        .collect::<Vec<_>>();
    v_arrange(swap_extent(container), padding, item_spacing, stretch_items, &swapped)
        .into_iter()
        .map(|rect| Rect::new(rect.y, rect.x, rect.h, rect.w))
        .collect()
}

fn swap_extent(e: Extent2<i32>) -> Extent2<i32> {
    Extent2::new(e.h, e.w)
}


#[cfg(test)]
fn leaf(w: i32, h: i32) -> LayoutItem {
    LayoutItem {
        size: Extent2::new(w, h),
        is_container: false,
    }
}

#[test]
fn vertical_stretch_divides_evenly() {
    let layout = StackLayout::new(Orientation::Vertical, 10);
    let rects = layout.arrange(
        Extent2::new(120, 210),
        10,
        &[leaf(1, 1), leaf(1, 1), leaf(1, 1)],
    );
    assert_eq!(rects, vec![
        Rect::new(10, 10, 100, 56),
        Rect::new(10, 76, 100, 56),
        Rect::new(10, 142, 100, 56),
    ]);
}

#[test]
fn horizontal_stretch_divides_evenly() {
    let layout = StackLayout::new(Orientation::Horizontal, 10);
    let rects = layout.arrange(
        Extent2::new(210, 50),
        10,
        &[leaf(1, 1), leaf(1, 1), leaf(1, 1)],
    );
    assert_eq!(rects, vec![
        Rect::new(10, 10, 56, 30),
        Rect::new(76, 10, 56, 30),
        Rect::new(142, 10, 56, 30),
    ]);
}

#[test]
fn remainder_is_dropped() {
    let layout = StackLayout::new(Orientation::Vertical, 0);
    let rects = layout.arrange(Extent2::new(10, 11), 0, &[leaf(1, 1), leaf(1, 1)]);
    assert_eq!(rects[0].h, 5);
    assert_eq!(rects[1].y, 5);
}

#[test]
fn no_items_is_a_no_op() {
    let layout = StackLayout::new(Orientation::Vertical, 10);
    assert!(layout.arrange(Extent2::new(100, 100), 10, &[]).is_empty());
}

#[test]
fn unstretched_items_keep_their_size_and_pack() {
    let mut layout = StackLayout::new(Orientation::Vertical, 5);
    layout.stretch_items = false;
    let container = LayoutItem {
        size: Extent2::new(3, 40),
        is_container: true,
    };
    let rects = layout.arrange(
        Extent2::new(100, 300),
        10,
        &[leaf(30, 20), container, leaf(50, 10)],
    );
    assert_eq!(rects, vec![
        Rect::new(10, 10, 30, 20),
        Rect::new(10, 35, 80, 40),
        Rect::new(10, 80, 50, 10),
    ]);
}

#[test]
fn undersized_container_clamps_to_zero() {
    let layout = StackLayout::new(Orientation::Horizontal, 10);
    let rects = layout.arrange(Extent2::new(15, 15), 10, &[leaf(1, 1), leaf(1, 1)]);
    assert!(rects.iter().all(|r| r.w == 0 && r.h == 0));
}
