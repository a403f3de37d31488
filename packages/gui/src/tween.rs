//! Animating integer widget properties over time.

use crate::{
    tree::WidgetTree,
    widget::{
        Widget,
        WidgetId,
    },
};
use std::{
    f32::consts::PI,
    time::Duration,
};


/// A typed accessor for an animatable widget property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WidgetProperty {
    X,
    Y,
    Width,
    Height,
    /// The value of a slider. Not applicable to other widgets.
    SliderValue,
}

impl WidgetProperty {
    /// Whether `widget` has this property.
    pub fn applies_to(self, widget: &Widget) -> bool {
        match self {
            WidgetProperty::SliderValue => matches!(widget, Widget::Slider(_)),
            _ => true,
        }
    }

    pub fn get(self, tree: &WidgetTree, id: WidgetId) -> Option<i32> {
        let widget = tree.get(id)?;
        let base = widget.base();
        match self {
            WidgetProperty::X => Some(base.x()),
            WidgetProperty::Y => Some(base.y()),
            WidgetProperty::Width => Some(base.w()),
            WidgetProperty::Height => Some(base.h()),
            WidgetProperty::SliderValue => tree.slider(id).map(|s| s.value()),
        }
    }

    /// Write through the widget's normal setter. Returns false if the widget
    /// is gone or lacks the property.
    pub fn set(self, tree: &mut WidgetTree, id: WidgetId, value: i32) -> bool {
        if self == WidgetProperty::SliderValue {
            return match tree.slider_mut(id) {
                Some(slider) => {
                    slider.set_value(value);
                    true
                }
                None => false,
            };
        }

        let base = match tree.base_mut(id) {
            Some(base) => base,
            None => return false,
        };
        match self {
            WidgetProperty::X => base.set_x(value),
            WidgetProperty::Y => base.set_y(value),
            WidgetProperty::Width => base.set_w(value),
            WidgetProperty::Height => base.set_h(value),
            WidgetProperty::SliderValue => (),
        }
        true
    }
}


/// Shape of a tween's progress curve.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    SineInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut =>
                if t < 0.5 { 2.0 * t * t }
                else { -1.0 + (4.0 - 2.0 * t) * t },
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// What a tween does when it reaches its end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Repeat {
    /// Stop at the end value.
    Once,
    /// Jump back to the start value and run again.
    Loop,
    /// Run back to the start value, then forwards again.
    Reflect,
}


/// One property animation.
#[derive(Debug, Clone)]
pub struct Tween {
    target: WidgetId,
    property: WidgetProperty,
    from: i32,
    to: i32,
    duration: Duration,
    delay: Duration,
    easing: Easing,
    repeat: Repeat,
    elapsed: Duration,
}

impl Tween {
    /// Linear, undelayed, non-repeating tween of `property` from `from` to
    /// `to`.
    pub fn new(
        target: WidgetId,
        property: WidgetProperty,
        from: i32,
        to: i32,
        duration: Duration,
    ) -> Self {
        Tween {
            target,
            property,
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing: Easing::Linear,
            repeat: Repeat::Once,
            elapsed: Duration::ZERO,
        }
    }

    /// Tween of `property` from its current value to `to`. `None` if the
    /// widget lacks the property.
    pub fn from_current(
        tree: &WidgetTree,
        target: WidgetId,
        property: WidgetProperty,
        to: i32,
        duration: Duration,
    ) -> Option<Self> {
        let from = property.get(tree, target)?;
        Some(Tween::new(target, property, from, to, duration))
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Hold the start value for `delay` before moving.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn target(&self) -> WidgetId {
        self.target
    }

    pub fn property(&self) -> WidgetProperty {
        self.property
    }

    /// Whether a non-repeating tween has reached its end.
    pub fn is_finished(&self) -> bool {
        self.repeat == Repeat::Once && self.elapsed >= self.delay + self.duration
    }

    /// Current value, or `None` while still delayed.
    pub fn sample(&self) -> Option<i32> {
        let moving = self.elapsed.checked_sub(self.delay)?;
        let t = self.progress(moving);
        let eased = self.easing.apply(t);
        let delta = self.to as f64 - self.from as f64;
        Some((self.from as f64 + delta * eased as f64).round() as i32)
    }

    /// Linear progress through the current cycle, in `[0, 1]`.
    fn progress(&self, moving: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let cycles = moving.as_secs_f32() / self.duration.as_secs_f32();
        match self.repeat {
            Repeat::Once => cycles.min(1.0),
            Repeat::Loop => cycles.fract(),
            Repeat::Reflect => {
                let phase = cycles % 2.0;
                if phase > 1.0 { 2.0 - phase } else { phase }
            }
        }
    }
}


/// Runs a set of tweens against a widget tree.
#[derive(Debug, Clone, Default)]
pub struct Tweener {
    tweens: Vec<Tween>,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween. It is dropped on the next advance if its target does
    /// not have the property.
    pub fn add(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    /// Step every tween forward by `dt`, write the sampled values into the
    /// tree, and drop tweens which finished or whose target no longer
    /// accepts the property.
    pub fn advance(&mut self, tree: &mut WidgetTree, dt: Duration) {
        self.tweens.retain_mut(|tween| {
            let compatible = tree.get(tween.target)
                .map(|widget| tween.property.applies_to(widget))
                .unwrap_or(false);
            if !compatible {
                debug!(
                    widget = tween.target.index(),
                    property = ?tween.property,
                    "dropping tween with incompatible target"
                );
                return false;
            }

            tween.elapsed += dt;
            if let Some(value) = tween.sample() {
                if tween.property.get(tree, tween.target) != Some(value) {
                    tween.property.set(tree, tween.target, value);
                }
            }
            !tween.is_finished()
        });
    }
}


#[test]
fn easing_endpoints() {
    let all = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::SineInOut,
    ];
    for easing in all {
        assert!(easing.apply(0.0).abs() < 1e-5, "{:?}", easing);
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{:?}", easing);
    }
    assert_eq!(Easing::QuadIn.apply(0.5), 0.25);
    assert_eq!(Easing::QuadOut.apply(0.5), 0.75);
}

#[test]
fn reflect_runs_back() {
    let tween = Tween::new(WidgetId(0), WidgetProperty::X, 0, 100, Duration::from_secs(1))
        .with_repeat(Repeat::Reflect);
    let at = |ms| Tween { elapsed: Duration::from_millis(ms), ..tween.clone() }.sample();
    assert_eq!(at(250), Some(25));
    assert_eq!(at(1250), Some(75));
    assert_eq!(at(2250), Some(25));
}

#[test]
fn full_width_tween_stays_in_range() {
    let tween = Tween::new(WidgetId(0), WidgetProperty::X, i32::MIN, i32::MAX, Duration::from_secs(1));
    let at = |ms| Tween { elapsed: Duration::from_millis(ms), ..tween.clone() }.sample();
    assert_eq!(at(0), Some(i32::MIN));
    assert_eq!(at(1000), Some(i32::MAX));
}

#[test]
fn delay_holds_then_moves() {
    let tween = Tween::new(WidgetId(0), WidgetProperty::Y, 10, 20, Duration::from_secs(1))
        .with_delay(Duration::from_millis(500));
    let at = |ms| Tween { elapsed: Duration::from_millis(ms), ..tween.clone() }.sample();
    assert_eq!(at(400), None);
    assert_eq!(at(1000), Some(15));
    assert_eq!(at(5000), Some(20));
}

#[test]
fn advance_writes_through_setters() {
    use crate::{
        invalidation::Invalidation,
        layout::Orientation,
    };
    use vek::*;

    let flag = Invalidation::new();
    let mut tree = WidgetTree::new(Extent2::new(320, 240), 10, 10, flag.clone());
    let root = tree.root();
    let ok = tree.add_button(root, "ok", "").unwrap();
    let s = tree.add_slider(root, "s", 0, 100, 1, Orientation::Horizontal).unwrap();

    let mut tweener = Tweener::new();
    tweener.add(Tween::from_current(&tree, ok, WidgetProperty::X, 100, Duration::from_secs(1)).unwrap());
    assert!(Tween::from_current(&tree, ok, WidgetProperty::SliderValue, 5, Duration::from_secs(1)).is_none());
    tweener.add(Tween::new(s, WidgetProperty::SliderValue, 0, 50, Duration::from_secs(2)));
    tweener.add(Tween::new(ok, WidgetProperty::SliderValue, 0, 50, Duration::from_secs(2)));
    assert_eq!(tweener.len(), 3);

    flag.take();
    tweener.advance(&mut tree, Duration::from_millis(500));
    assert!(flag.is_invalidated());
    assert_eq!(tree.base(ok).unwrap().x(), 50);
    assert_eq!(tree.slider(s).unwrap().value(), 13);
    assert_eq!(tweener.len(), 2);

    tweener.advance(&mut tree, Duration::from_millis(600));
    assert_eq!(tree.base(ok).unwrap().x(), 100);
    assert_eq!(tweener.len(), 1);

    tweener.advance(&mut tree, Duration::from_secs(1));
    assert_eq!(tree.slider(s).unwrap().value(), 50);
    assert!(tweener.is_empty());
}
