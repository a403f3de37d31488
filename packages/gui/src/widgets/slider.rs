//! Draggable integer slider.

use crate::{
    widget::WidgetBase,
    input::UiMouseState,
    geometry::contains_point,
    observers::Observers,
    layout::Orientation,
};
use vek::*;


/// Size of a horizontal slider. Vertical sliders swap the extents.
pub const DEFAULT_SIZE: Extent2<i32> = Extent2 { w: 200, h: 30 };

/// Inset of the indicator from the slider's edge, in pixels.
pub const INDICATOR_INSET: i32 = 2;


/// Integer value in `[min, max]`, quantized to multiples of `step`, set by
/// dragging along the slider's axis.
///
/// Invariants: `min <= max`, `min <= value <= max`, and
/// `1 <= step <= max(1, max - min)`.
#[derive(Debug)]
pub struct Slider {
    pub(crate) base: WidgetBase,
    value: i32,
    min: i32,
    max: i32,
    step: i32,
    orientation: Orientation,
    dragging: bool,
    value_changed: Observers<i32>,
}

impl Slider {
    pub(crate) fn new(
        mut base: WidgetBase,
        mut min: i32,
        mut max: i32,
        step: i32,
        orientation: Orientation,
    ) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        if orientation == Orientation::Vertical {
            let size = base.size();
            base.set_size(Extent2::new(size.h, size.w));
        }
        Slider {
            base,
            value: min,
            min,
            max,
            step: normalize_step(step, min, max),
            orientation,
            dragging: false,
            value_changed: Observers::new(),
        }
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn min_value(&self) -> i32 {
        self.min
    }

    pub fn max_value(&self) -> i32 {
        self.max
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Position of the value within the range, from 0 to 1.
    pub fn fraction(&self) -> f32 {
        let range = span(self.min, self.max);
        if range > 0 {
            (span(self.min, self.value) as f64 / range as f64) as f32
        } else {
            0.0
        }
    }

    /// Set the value, clamped into range. Does not fire `value_changed`.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
        self.base.invalidate();
    }

    /// Set the minimum. A minimum above the maximum collapses onto it.
    pub fn set_min_value(&mut self, min: i32) {
        self.min = min.min(self.max);
        self.value = self.value.max(self.min);
        self.step = normalize_step(self.step, self.min, self.max);
        self.base.invalidate();
    }

    /// Set the maximum. A maximum below the minimum collapses onto it.
    pub fn set_max_value(&mut self, max: i32) {
        self.max = max.max(self.min);
        self.value = self.value.min(self.max);
        self.step = normalize_step(self.step, self.min, self.max);
        self.base.invalidate();
    }

    pub fn set_step(&mut self, step: i32) {
        self.step = normalize_step(step, self.min, self.max);
        self.base.invalidate();
    }

    /// Change the axis. Swaps width and height when the axis actually
    /// changes, so the long side stays long.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            let size = self.base.size();
            self.base.set_size(Extent2::new(size.h, size.w));
        }
    }

    /// Subscribe to committed value changes.
    pub fn on_value_changed<F: FnMut(i32) + 'static>(&mut self, f: F) {
        self.value_changed.subscribe(f);
    }

    /// Advance the drag state, given the widget's global rectangle.
    pub(crate) fn update(&mut self, rect: Rect<i32, i32>, mouse: &UiMouseState) {
        let inside = contains_point(rect, mouse.pos);
        self.base.set_hovered(inside);

        let mut recomputed = false;
        if inside && mouse.left_down && !self.dragging {
            self.dragging = true;
            self.base.set_active(true);
            self.drag_to(rect, mouse.pos);
            recomputed = true;
        }

        if !mouse.left_down && self.dragging {
            self.dragging = false;
            self.base.set_active(false);
        }

        if self.dragging && mouse.moved() && !recomputed {
            self.drag_to(rect, mouse.pos);
        }
    }

    fn drag_to(&mut self, rect: Rect<i32, i32>, cursor: Vec2<i32>) {
        let (offset, extent) = match self.orientation {
            Orientation::Horizontal => (cursor.x - INDICATOR_INSET - rect.x, rect.w),
            Orientation::Vertical => (cursor.y - INDICATOR_INSET - rect.y, rect.h),
        };
        let factor =
            if extent > 0 { (offset as f64 / extent as f64).clamp(0.0, 1.0) }
            else { 0.0 };

        let value = quantize(self.min, self.max, self.step, factor);
        if value != self.value {
            self.value = value;
            self.base.invalidate();
            debug!(value, "slider value changed");
            self.value_changed.notify(value);
        }
    }
}

// computed in i64 so full-width ranges don't overflow
fn span(from: i32, to: i32) -> i64 {
    to as i64 - from as i64
}

fn normalize_step(step: i32, min: i32, max: i32) -> i32 {
    (step as i64).min(span(min, max)).max(1) as i32
}

/// Value at `factor` along the range, snapped down to a multiple of `step`
/// and clamped into range.
fn quantize(min: i32, max: i32, step: i32, factor: f64) -> i32 {
    let raw = span(min, max) as f64 * factor + min as f64;
    let snapped = (raw / step as f64).floor() as i64 * step as i64;
    snapped.clamp(min as i64, max as i64) as i32
}


#[test]
fn quantize_snaps_down() {
    assert_eq!(quantize(0, 100, 10, 0.46), 40);
    assert_eq!(quantize(0, 100, 10, 1.0), 100);
    assert_eq!(quantize(0, 100, 1, 0.0), 0);
    assert_eq!(quantize(5, 25, 10, 0.0), 5);
}

#[test]
fn step_normalizes_into_range() {
    assert_eq!(normalize_step(0, 0, 100), 1);
    assert_eq!(normalize_step(500, 0, 100), 100);
    assert_eq!(normalize_step(7, 3, 3), 1);
    assert_eq!(normalize_step(i32::MAX, i32::MIN, i32::MAX), i32::MAX);
}

#[test]
fn full_width_range() {
    assert_eq!(quantize(i32::MIN, i32::MAX, 1, 0.0), i32::MIN);
    assert_eq!(quantize(i32::MIN, i32::MAX, 1, 1.0), i32::MAX);
    assert_eq!(quantize(i32::MIN, i32::MAX, 3, 0.0), i32::MIN);
    assert_eq!(quantize(i32::MIN, i32::MAX, 1, 0.5), 0);
}

#[cfg(test)]
fn test_slider(min: i32, max: i32, step: i32, orientation: Orientation) -> (Slider, crate::invalidation::Invalidation) {
    let flag = crate::invalidation::Invalidation::new();
    let base = WidgetBase::new(None, DEFAULT_SIZE, false, flag.clone());
    (Slider::new(base, min, max, step, orientation), flag)
}

#[test]
fn min_above_max_collapses_onto_it() {
    let (mut s, _) = test_slider(0, 100, 10, Orientation::Horizontal);
    s.set_value(30);
    s.set_min_value(150);
    assert_eq!((s.min_value(), s.max_value()), (100, 100));
    assert_eq!(s.value(), 100);
    assert_eq!(s.step(), 1);

    s.set_min_value(40);
    assert_eq!(s.min_value(), 40);
    assert_eq!(s.value(), 100);
}

#[test]
fn max_below_min_collapses_onto_it() {
    let (mut s, _) = test_slider(20, 100, 50, Orientation::Horizontal);
    s.set_value(80);
    s.set_max_value(5);
    assert_eq!((s.min_value(), s.max_value()), (20, 20));
    assert_eq!(s.value(), 20);
    assert_eq!(s.step(), 1);
}

#[test]
fn step_renormalizes_after_range_change() {
    let (mut s, _) = test_slider(0, 100, 50, Orientation::Horizontal);
    assert_eq!(s.step(), 50);
    s.set_max_value(30);
    assert_eq!(s.step(), 30);
    s.set_step(1000);
    assert_eq!(s.step(), 30);
    s.set_step(-4);
    assert_eq!(s.step(), 1);
}

#[test]
fn orientation_swaps_extents_only_on_change() {
    let (mut s, flag) = test_slider(0, 10, 1, Orientation::Horizontal);
    assert_eq!(s.base().size(), Extent2::new(200, 30));
    flag.take();
    s.set_orientation(Orientation::Horizontal);
    assert_eq!(s.base().size(), Extent2::new(200, 30));
    assert!(!flag.is_invalidated());
    s.set_orientation(Orientation::Vertical);
    assert_eq!(s.base().size(), Extent2::new(30, 200));
    assert!(flag.is_invalidated());
    s.set_orientation(Orientation::Vertical);
    assert_eq!(s.base().size(), Extent2::new(30, 200));
}
