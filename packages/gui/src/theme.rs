//! Mapping from widgets to draw calls.

use crate::{
    container::Container,
    widgets::{
        button::Button,
        checkbox::CheckBox,
        slider::{
            Slider,
            INDICATOR_INSET,
        },
    },
    layout::Orientation,
};
use graphics::{
    DrawSurface,
    Font,
};
use serde::{
    Serialize,
    Deserialize,
};
use std::fmt::Debug;
use vek::*;


/// Visual style of the GUI.
///
/// Each method receives the widget's global rectangle and draws the widget
/// onto `surface`. Themes hold no per-widget state, so swapping the theme
/// changes how widgets look without affecting how they behave.
pub trait Theme: Debug {
    fn draw_button(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, button: &Button);

    /// Draw a panel's background. Its children are drawn afterwards.
    fn draw_panel(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, panel: &Container);

    fn draw_slider(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, slider: &Slider);

    fn draw_checkbox(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, checkbox: &CheckBox);
}


/// Colors used by `DefaultTheme`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(with = "rgb_triple")]
    pub frame_outer_border: Rgb<u8>,
    #[serde(with = "rgb_triple")]
    pub frame_inner_border: Rgb<u8>,
    #[serde(with = "rgb_triple")]
    pub frame_fill: Rgb<u8>,
    #[serde(with = "rgb_triple")]
    pub button_fill: Rgb<u8>,
    #[serde(with = "rgb_triple")]
    pub button_active_fill: Rgb<u8>,
    #[serde(with = "rgb_triple")]
    pub slider_fill: Rgb<u8>,
    #[serde(with = "rgb_triple")]
    pub checkbox_fill: Rgb<u8>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        ThemeColors {
            frame_outer_border: Rgb::new(17, 27, 73),
            frame_inner_border: Rgb::new(109, 136, 255),
            frame_fill: Rgb::new(75, 94, 175),
            button_fill: Rgb::new(75, 94, 175),
            button_active_fill: Rgb::new(55, 74, 155),
            slider_fill: Rgb::new(55, 74, 155),
            checkbox_fill: Rgb::new(41, 173, 255),
        }
    }
}

mod rgb_triple {
    use serde::{
        Serialize,
        Serializer,
        Deserialize,
        Deserializer,
    };
    use vek::*;

    pub fn serialize<S: Serializer>(color: &Rgb<u8>, s: S) -> Result<S::Ok, S::Error> {
        [color.r, color.g, color.b].serialize(s)
    }

    pub fn deserialize<'d, D: Deserializer<'d>>(d: D) -> Result<Rgb<u8>, D::Error> {
        let [r, g, b] = <[u8; 3]>::deserialize(d)?;
        Ok(Rgb::new(r, g, b))
    }
}


/// Framed, flat-shaded look with a one pixel drop shadow.
///
/// Idle frames sit on a shadow line; pressed buttons and checkboxes drop one
/// pixel into it.
#[derive(Debug, Clone, Default)]
pub struct DefaultTheme {
    pub colors: ThemeColors,
    pub font: Font,
}

impl DefaultTheme {
    pub fn new(colors: ThemeColors, font: Font) -> Self {
        DefaultTheme { colors, font }
    }

    fn draw_frame(
        &self,
        surface: &mut dyn DrawSurface,
        rect: Rect<i32, i32>,
        fill: Rgb<u8>,
        shadow: bool,
    ) {
        let Rect { x, y, w, h } = rect;

        surface.set_color(self.colors.frame_outer_border);
        surface.draw_rect(x, y, w, h);

        surface.set_color(self.colors.frame_inner_border);
        surface.draw_rect(x + 1, y + 1, w - 2, h - 2);

        surface.set_color(fill);
        surface.fill_rect(x + 2, y + 2, w - 4, h - 4);

        if shadow {
            surface.set_color(self.colors.frame_outer_border);
            surface.draw_h_line(x, x + w - 1, y + h);
        }
    }
}

impl Theme for DefaultTheme {
    fn draw_button(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, button: &Button) {
        let text_size = self.font.measure(button.label());
        let label_x = rect.x + (rect.w / 2 - text_size.w / 2);
        let label_y = rect.y + 2 + (rect.h / 2 - text_size.h / 2);

        if button.base().active() {
            let pressed = Rect::new(rect.x, rect.y + 1, rect.w, rect.h);
            self.draw_frame(surface, pressed, self.colors.button_active_fill, false);
            surface.draw_text(label_x, label_y + 1, &self.font, button.label());
        } else {
            self.draw_frame(surface, rect, self.colors.button_fill, true);
            surface.draw_text(label_x, label_y, &self.font, button.label());
        }
    }

    fn draw_panel(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, _: &Container) {
        self.draw_frame(surface, rect, self.colors.frame_fill, true);
    }

    fn draw_slider(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, slider: &Slider) {
        self.draw_frame(surface, rect, self.colors.frame_fill, true);

        let inner = Rect::new(
            rect.x + INDICATOR_INSET,
            rect.y + INDICATOR_INSET,
            (rect.w - 2 * INDICATOR_INSET).max(0),
            (rect.h - 2 * INDICATOR_INSET).max(0),
        );
        surface.set_color(self.colors.slider_fill);
        match slider.orientation() {
            Orientation::Horizontal => {
                let len = ((slider.fraction() * rect.w as f32) as i32).clamp(0, inner.w);
                surface.fill_rect(inner.x, inner.y, len, inner.h);
            }
            Orientation::Vertical => {
                let len = ((slider.fraction() * rect.h as f32) as i32).clamp(0, inner.h);
                surface.fill_rect(inner.x, inner.y, inner.w, len);
            }
        }
    }

    fn draw_checkbox(&self, surface: &mut dyn DrawSurface, rect: Rect<i32, i32>, checkbox: &CheckBox) {
        if checkbox.base().active() {
            let pressed = Rect::new(rect.x, rect.y + 1, rect.w, rect.h);
            self.draw_frame(surface, pressed, self.colors.checkbox_fill, false);
        } else {
            let fill =
                if checkbox.checked() { self.colors.checkbox_fill }
                else { self.colors.frame_fill };
            self.draw_frame(surface, rect, fill, true);
        }
    }
}


#[cfg(test)]
fn test_tree() -> crate::tree::WidgetTree {
    crate::tree::WidgetTree::new(
        Extent2::new(320, 240),
        10,
        10,
        crate::invalidation::Invalidation::new(),
    )
}

#[test]
fn idle_button_frame() {
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut tree = test_tree();
    let root = tree.root();
    let ok = tree.add_button(root, "ok", "OK").unwrap();
    let theme = DefaultTheme::default();
    let mut frame = FrameContent::new();
    theme.draw_button(&mut frame, Rect::new(10, 10, 100, 30), tree.button(ok).unwrap());

    let colors = ThemeColors::default();
    assert_eq!(frame.calls, vec![
        DrawCall::SetColor(colors.frame_outer_border),
        DrawCall::DrawRect(Rect::new(10, 10, 100, 30)),
        DrawCall::SetColor(colors.frame_inner_border),
        DrawCall::DrawRect(Rect::new(11, 11, 98, 28)),
        DrawCall::SetColor(colors.button_fill),
        DrawCall::FillRect(Rect::new(12, 12, 96, 26)),
        DrawCall::SetColor(colors.frame_outer_border),
        DrawCall::HLine { x1: 10, x2: 109, y: 40 },
        DrawCall::Text { pos: Vec2::new(52, 23), text: "OK".to_owned() },
    ]);
}

#[test]
fn pressed_button_drops_one_pixel() {
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut tree = test_tree();
    let root = tree.root();
    let ok = tree.add_button(root, "ok", "OK").unwrap();
    tree.base_mut(ok).unwrap().set_active(true);
    let mut frame = FrameContent::new();
    DefaultTheme::default().draw_button(&mut frame, Rect::new(10, 10, 100, 30), tree.button(ok).unwrap());

    assert!(frame.calls.contains(&DrawCall::DrawRect(Rect::new(10, 11, 100, 30))));
    assert!(frame.calls.contains(&DrawCall::SetColor(ThemeColors::default().button_active_fill)));
    assert!(frame.calls.contains(&DrawCall::Text { pos: Vec2::new(52, 24), text: "OK".to_owned() }));
    assert_eq!(frame.count(|call| matches!(call, DrawCall::HLine { .. })), 0);
}

#[test]
fn slider_indicator_tracks_value() {
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut tree = test_tree();
    let root = tree.root();
    let s = tree.add_slider(root, "s", 50, 150, 1, Orientation::Horizontal).unwrap();
    tree.slider_mut(s).unwrap().set_value(100);
    let mut frame = FrameContent::new();
    DefaultTheme::default().draw_slider(&mut frame, Rect::new(0, 0, 200, 30), tree.slider(s).unwrap());

    let indicator = frame.calls.iter()
        .skip_while(|call| **call != DrawCall::SetColor(ThemeColors::default().slider_fill))
        .nth(1);
    assert_eq!(indicator, Some(&DrawCall::FillRect(Rect::new(2, 2, 100, 26))));
}

#[test]
fn checked_checkbox_uses_checkbox_fill() {
    use graphics::{
        FrameContent,
        DrawCall,
    };

    let mut tree = test_tree();
    let root = tree.root();
    let c = tree.add_checkbox(root, "c").unwrap();
    tree.checkbox_mut(c).unwrap().set_checked(true);
    let mut frame = FrameContent::new();
    DefaultTheme::default().draw_checkbox(&mut frame, Rect::new(0, 0, 20, 20), tree.checkbox(c).unwrap());
    assert!(frame.calls.contains(&DrawCall::SetColor(ThemeColors::default().checkbox_fill)));
    assert!(!frame.calls.contains(&DrawCall::SetColor(ThemeColors::default().frame_fill)));
}

#[test]
fn colors_serialize_as_triples() {
    let json = serde_json::to_value(ThemeColors::default()).unwrap();
    assert_eq!(json["checkbox_fill"], serde_json::json!([41, 173, 255]));
    let back: ThemeColors = serde_json::from_value(json).unwrap();
    assert_eq!(back, ThemeColors::default());
}
